use super::*;
use crate::encode::checksum::crc32;

const TINY: [u32; 6] = [
    0xFF00_00FF,
    0x00FF_00FF,
    0x0000_FFFF,
    0x0000_0000,
    0xFFFF_FFFF,
    0x1122_3344,
];

struct Chunk<'a> {
    tag: [u8; 4],
    payload: &'a [u8],
    crc: u32,
}

fn be32(b: &[u8]) -> u32 {
    u32::from_be_bytes([b[0], b[1], b[2], b[3]])
}

fn parse(bytes: &[u8]) -> Vec<Chunk<'_>> {
    assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    let mut p = 8;
    let mut out = Vec::new();
    while p < bytes.len() {
        let len = be32(&bytes[p..]) as usize;
        let tag = [bytes[p + 4], bytes[p + 5], bytes[p + 6], bytes[p + 7]];
        let payload = &bytes[p + 8..p + 8 + len];
        let crc = be32(&bytes[p + 8 + len..]);
        out.push(Chunk { tag, payload, crc });
        p += 12 + len;
    }
    assert_eq!(p, bytes.len(), "no bytes may follow the last chunk");
    out
}

fn chunk_crc(c: &Chunk<'_>) -> u32 {
    let mut joined = c.tag.to_vec();
    joined.extend_from_slice(c.payload);
    crc32(&joined)
}

fn rebuild_scanlines(pixels: &[u32], w: usize, h: usize) -> Vec<u8> {
    let mut raw = Vec::new();
    for y in 0..h {
        raw.push(0);
        for x in 0..w {
            raw.extend_from_slice(&pixels[y * w + x].to_be_bytes());
        }
    }
    raw
}

/// Concatenated payloads of the stored blocks between the zlib header and the adler32.
fn unstore(idat: &[u8]) -> Vec<u8> {
    let mut p = 2;
    let mut raw = Vec::new();
    loop {
        let marker = idat[p];
        let len = u16::from_le_bytes([idat[p + 1], idat[p + 2]]);
        let nlen = u16::from_le_bytes([idat[p + 3], idat[p + 4]]);
        assert_eq!(nlen, !len);
        raw.extend_from_slice(&idat[p + 5..p + 5 + len as usize]);
        p += 5 + len as usize;
        if marker == 0x01 {
            break;
        }
        assert_eq!(marker, 0x00);
    }
    assert_eq!(p + 4, idat.len());
    raw
}

#[test]
fn tiny_image_round_trips_through_chunk_parser() {
    let bytes = encode_png_to_vec(&TINY, 3, 2).unwrap();
    let chunks = parse(&bytes);
    assert_eq!(chunks.len(), 3);

    let ihdr = &chunks[0];
    assert_eq!(&ihdr.tag, b"IHDR");
    assert_eq!(ihdr.payload.len(), 13);
    assert_eq!(be32(&ihdr.payload[0..]), 3);
    assert_eq!(be32(&ihdr.payload[4..]), 2);
    assert_eq!(&ihdr.payload[8..], &[8, 6, 0, 0, 0]);
    assert_eq!(ihdr.crc, chunk_crc(ihdr));

    let idat = &chunks[1];
    assert_eq!(&idat.tag, b"IDAT");
    assert_eq!(idat.crc, chunk_crc(idat));
    assert_eq!(&idat.payload[..2], &[0x78, 0x01]);
    let raw = rebuild_scanlines(&TINY, 3, 2);
    assert_eq!(raw.len(), 2 * (1 + 3 * 4));
    let tail = &idat.payload[idat.payload.len() - 4..];
    assert_eq!(be32(tail), adler32(&raw));
    assert_eq!(unstore(idat.payload), raw);
    // header + one stored block + adler
    assert_eq!(idat.payload.len(), 2 + 5 + raw.len() + 4);

    let iend = &chunks[2];
    assert_eq!(&iend.tag, b"IEND");
    assert!(iend.payload.is_empty());
    assert_eq!(iend.crc, 0xAE42_6082);
}

#[test]
fn scanlines_carry_rgba_in_pixel_order() {
    let bytes = encode_png_to_vec(&TINY, 3, 2).unwrap();
    let chunks = parse(&bytes);
    let raw = unstore(chunks[1].payload);
    assert_eq!(
        &raw[..13],
        &[0, 0xFF, 0, 0, 0xFF, 0, 0xFF, 0, 0xFF, 0, 0, 0xFF, 0xFF]
    );
    assert_eq!(&raw[13..], &[0, 0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF, 0x11, 0x22, 0x33, 0x44]);
}

#[test]
fn large_images_split_into_multiple_stored_blocks() {
    // 200 * (1 + 100*4) = 80_200 raw bytes -> two blocks.
    let (w, h) = (100usize, 200usize);
    let pixels: Vec<u32> = (0..(w * h) as u32).map(|i| i.wrapping_mul(2_654_435_761)).collect();
    let bytes = encode_png_to_vec(&pixels, w as u32, h as u32).unwrap();
    let chunks = parse(&bytes);
    let idat = chunks[1].payload;

    assert_eq!(idat[2], 0x00, "first block is not final");
    assert_eq!(u16::from_le_bytes([idat[3], idat[4]]), 65_535);
    let second = 2 + 5 + 65_535;
    assert_eq!(idat[second], 0x01);
    assert_eq!(
        u16::from_le_bytes([idat[second + 1], idat[second + 2]]) as usize,
        80_200 - 65_535
    );

    let raw = rebuild_scanlines(&pixels, w, h);
    assert_eq!(unstore(idat), raw);
    assert_eq!(be32(&idat[idat.len() - 4..]), adler32(&raw));
}

#[test]
fn exact_block_multiple_has_no_empty_trailing_block() {
    // 1 + 4*w = 65535 / h  ->  h = 3, w = 5461: 3 * 21845 = 65535 bytes exactly.
    let pixels = vec![0x0102_0304u32; 5_461 * 3];
    let bytes = encode_png_to_vec(&pixels, 5_461, 3).unwrap();
    let chunks = parse(&bytes);
    let idat = chunks[1].payload;
    assert_eq!(idat[2], 0x01);
    assert_eq!(idat.len(), 2 + 5 + 65_535 + 4);
}

#[test]
fn invalid_arguments_write_nothing() {
    let mut out = Vec::new();
    assert!(matches!(
        encode_png(&mut out, &[], 1, 1),
        Err(PixmillError::Validation(_))
    ));
    assert!(matches!(
        encode_png(&mut out, &TINY, 0, 2),
        Err(PixmillError::Validation(_))
    ));
    assert!(matches!(
        encode_png(&mut out, &TINY, 3, 0),
        Err(PixmillError::Validation(_))
    ));
    assert!(matches!(
        encode_png(&mut out, &TINY, 4, 2),
        Err(PixmillError::Validation(_))
    ));
    assert!(out.is_empty());
}

struct FailAfter {
    budget: usize,
    written: Vec<u8>,
}

impl std::io::Write for FailAfter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.budget == 0 {
            return Err(std::io::Error::other("disk full"));
        }
        let n = buf.len().min(self.budget);
        self.budget -= n;
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn sink_failure_is_reported_with_context() {
    for budget in [0, 5, 8 + 12, 40] {
        let mut sink = FailAfter {
            budget,
            written: Vec::new(),
        };
        let err = encode_png(&mut sink, &TINY, 3, 2).unwrap_err();
        assert!(matches!(err, PixmillError::Other(_)), "budget {budget}");
        assert!(format!("{err:#}").contains("failed to write"), "budget {budget}");
        assert_eq!(sink.written.len(), budget);
    }
}

#[test]
fn write_png_creates_file_and_parent_dir() {
    let dir = std::path::PathBuf::from("target").join("unit_png");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("nested").join("tiny.png");

    write_png(&path, &TINY, 3, 2).unwrap();
    let on_disk = std::fs::read(&path).unwrap();
    assert_eq!(on_disk, encode_png_to_vec(&TINY, 3, 2).unwrap());
}

#[test]
fn write_png_rejects_bad_input_without_touching_disk() {
    let path = std::path::PathBuf::from("target")
        .join("unit_png_rejects")
        .join("never.png");
    assert!(write_png(&path, &TINY, 0, 0).is_err());
    assert!(!path.exists());
}

#[test]
fn destroyed_canvas_cannot_be_written() {
    let mut c = Canvas::new(2, 2).unwrap();
    c.destroy();
    let err = write_canvas_png("target/unit_png/destroyed.png", &c).unwrap_err();
    assert!(matches!(err, PixmillError::Validation(_)));
}
