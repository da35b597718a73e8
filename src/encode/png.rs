//! Minimal PNG writer: 8-bit RGBA, filter type 0, zlib stream made of stored (uncompressed)
//! deflate blocks.
//!
//! The output is byte-for-byte deterministic for a given pixel buffer:
//!
//! ```text
//! signature | IHDR(13) | IDAT(78 01, stored blocks, adler32) | IEND(0)
//! ```
//!
//! Every chunk is `BE length | tag | payload | BE crc32(tag + payload)`.

use std::io::Write;
use std::path::Path;

use anyhow::Context as _;

use crate::encode::checksum::{Crc32, adler32};
use crate::encode::ensure_parent_dir;
use crate::foundation::error::{PixmillError, PixmillResult};
use crate::raster::canvas::{Canvas, PixelStorage};

/// Fixed 8-byte PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// zlib header: deflate, 32K window, no preset dictionary, fastest level.
pub const ZLIB_HEADER: [u8; 2] = [0x78, 0x01];

/// Largest payload of a single stored deflate block.
pub const MAX_STORED_BLOCK: usize = 65_535;

const BIT_DEPTH: u8 = 8;
const COLOR_TYPE_RGBA: u8 = 6;
const FILTER_NONE: u8 = 0;
// BFINAL bit with BTYPE=00.
const BLOCK_FINAL: u8 = 0x01;
const BLOCK_MORE: u8 = 0x00;
const STORED_BLOCK_HEADER_LEN: usize = 5;

/// Serialize `width * height` packed `0xRRGGBBAA` pixels as a PNG into `sink`.
///
/// Invalid arguments are reported before anything is written. A sink failure part-way leaves
/// whatever was already written in place.
#[tracing::instrument(skip(sink, pixels))]
pub fn encode_png<W: Write + ?Sized>(
    sink: &mut W,
    pixels: &[u32],
    width: u32,
    height: u32,
) -> PixmillResult<()> {
    validate_image(pixels, width, height)?;

    let raw = raw_scanlines(pixels, width, height)?;
    let idat = zlib_stored(&raw)?;

    sink.write_all(&PNG_SIGNATURE)
        .context("failed to write png signature")?;
    write_chunk(sink, b"IHDR", &ihdr(width, height))?;
    write_chunk(sink, b"IDAT", &idat)?;
    write_chunk(sink, b"IEND", &[])?;
    Ok(())
}

/// [`encode_png`] into a fresh buffer.
pub fn encode_png_to_vec(pixels: &[u32], width: u32, height: u32) -> PixmillResult<Vec<u8>> {
    let mut out = Vec::new();
    encode_png(&mut out, pixels, width, height)?;
    Ok(out)
}

/// Write a PNG file at `path`, creating its parent directory when missing.
///
/// The file handle is closed on every path; a failed write may leave a partial file behind.
pub fn write_png(
    path: impl AsRef<Path>,
    pixels: &[u32],
    width: u32,
    height: u32,
) -> PixmillResult<()> {
    let path = path.as_ref();
    validate_image(pixels, width, height)?;
    ensure_parent_dir(path)?;

    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create png '{}'", path.display()))?;
    let mut out = std::io::BufWriter::new(file);
    encode_png(&mut out, pixels, width, height)?;
    out.flush()
        .with_context(|| format!("failed to flush png '{}'", path.display()))?;
    Ok(())
}

/// Write the visible pixels of `canvas` as a PNG file.
pub fn write_canvas_png<P: PixelStorage>(
    path: impl AsRef<Path>,
    canvas: &Canvas<P>,
) -> PixmillResult<()> {
    write_png(path, canvas.pixels(), canvas.width(), canvas.height())
}

fn validate_image(pixels: &[u32], width: u32, height: u32) -> PixmillResult<()> {
    if pixels.is_empty() {
        return Err(PixmillError::validation("png pixel buffer is empty"));
    }
    if width == 0 || height == 0 {
        return Err(PixmillError::validation(format!(
            "png dimensions must be non-zero, got {width}x{height}"
        )));
    }
    let needed = (width as usize).checked_mul(height as usize);
    if needed.is_none_or(|n| pixels.len() < n) {
        return Err(PixmillError::validation(format!(
            "png {width}x{height} needs {} pixels, buffer holds {}",
            width as u64 * height as u64,
            pixels.len()
        )));
    }
    Ok(())
}

fn ihdr(width: u32, height: u32) -> [u8; 13] {
    let mut out = [0u8; 13];
    out[0..4].copy_from_slice(&width.to_be_bytes());
    out[4..8].copy_from_slice(&height.to_be_bytes());
    out[8] = BIT_DEPTH;
    out[9] = COLOR_TYPE_RGBA;
    // compression, filter method and interlace stay 0.
    out
}

fn reserve(len: usize, what: &str) -> PixmillResult<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|e| PixmillError::allocation(format!("{what} ({len} bytes): {e}")))?;
    Ok(buf)
}

/// Filter-tagged scanlines: per row `00` then R,G,B,A for each pixel.
fn raw_scanlines(pixels: &[u32], width: u32, height: u32) -> PixmillResult<Vec<u8>> {
    let row_bytes = (width as usize)
        .checked_mul(4)
        .and_then(|n| n.checked_add(1))
        .ok_or_else(|| PixmillError::validation("png row size overflows"))?;
    let total = row_bytes
        .checked_mul(height as usize)
        .ok_or_else(|| PixmillError::validation("png scanline stream size overflows"))?;

    let mut raw = reserve(total, "png scanlines")?;
    for row in pixels.chunks_exact(width as usize).take(height as usize) {
        raw.push(FILTER_NONE);
        for &p in row {
            raw.extend_from_slice(&p.to_be_bytes());
        }
    }
    if raw.len() != total {
        return Err(PixmillError::consistency(format!(
            "scanline stream is {} bytes, expected {total}",
            raw.len()
        )));
    }
    Ok(raw)
}

/// Wrap `raw` in a zlib stream of stored deflate blocks.
fn zlib_stored(raw: &[u8]) -> PixmillResult<Vec<u8>> {
    let blocks = raw.len().div_ceil(MAX_STORED_BLOCK).max(1);
    let expected = ZLIB_HEADER.len() + raw.len() + blocks * STORED_BLOCK_HEADER_LEN + 4;

    let mut out = reserve(expected, "png idat")?;
    out.extend_from_slice(&ZLIB_HEADER);

    let mut emitted = 0usize;
    let mut chunks = raw.chunks(MAX_STORED_BLOCK).peekable();
    while let Some(block) = chunks.next() {
        let marker = if chunks.peek().is_some() {
            BLOCK_MORE
        } else {
            BLOCK_FINAL
        };
        let len = u16::try_from(block.len())
            .map_err(|_| PixmillError::consistency("stored block exceeds 65535 bytes"))?;
        out.push(marker);
        out.extend_from_slice(&len.to_le_bytes());
        out.extend_from_slice(&(!len).to_le_bytes());
        out.extend_from_slice(block);
        emitted += 1;
    }
    out.extend_from_slice(&adler32(raw).to_be_bytes());

    if emitted != blocks || out.len() != expected {
        return Err(PixmillError::consistency(format!(
            "idat is {} bytes in {emitted} blocks, expected {expected} bytes in {blocks} blocks",
            out.len()
        )));
    }
    tracing::debug!(bytes = out.len(), blocks, "assembled idat");
    Ok(out)
}

/// `BE length | tag | payload | BE crc32(tag + payload)`.
fn write_chunk<W: Write + ?Sized>(sink: &mut W, tag: &[u8; 4], payload: &[u8]) -> PixmillResult<()> {
    let name = String::from_utf8_lossy(tag);
    let len = u32::try_from(payload.len()).map_err(|_| {
        PixmillError::validation(format!(
            "{name} payload of {} bytes exceeds the chunk length limit",
            payload.len()
        ))
    })?;

    let mut crc = Crc32::new();
    crc.update(tag);
    crc.update(payload);

    sink.write_all(&len.to_be_bytes())
        .and_then(|()| sink.write_all(tag))
        .and_then(|()| sink.write_all(payload))
        .and_then(|()| sink.write_all(&crc.finish().to_be_bytes()))
        .with_context(|| format!("failed to write {name} chunk"))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
