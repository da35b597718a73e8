//! YUV4MPEG2 stream writer with full-resolution (4:4:4) planes.
//!
//! Stream layout:
//!
//! ```text
//! YUV4MPEG2 W{w} H{h} F{num}:{den} Ip A1:1 C444\n
//! FRAME\n | Y plane (w*h) | Cb plane (w*h) | Cr plane (w*h)
//! FRAME\n | ...
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context as _;

use crate::encode::ensure_parent_dir;
use crate::foundation::core::{Color, Fps};
use crate::foundation::error::{PixmillError, PixmillResult};
use crate::raster::canvas::{Canvas, PixelStorage};

/// Marker line preceding every frame's planes.
pub const FRAME_MARKER: &[u8] = b"FRAME\n";

/// Stream header line for the given geometry and frame rate.
pub fn header_line(width: u32, height: u32, fps: Fps) -> String {
    format!(
        "YUV4MPEG2 W{width} H{height} F{}:{} Ip A1:1 C444\n",
        fps.num, fps.den
    )
}

/// Full-range BT.601-style conversion, truncated to 8 bits. Alpha is ignored.
pub fn rgba_to_ycbcr(color: Color) -> [u8; 3] {
    let r = f64::from(color.r());
    let g = f64::from(color.g());
    let b = f64::from(color.b());
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cb = -0.169 * r - 0.331 * g + 0.5 * b + 128.0;
    let cr = 0.5 * r - 0.419 * g - 0.081 * b + 128.0;
    // `as` saturates, so 255.5 lands on 255.
    [y as u8, cb as u8, cr as u8]
}

/// Luma and chroma planes reused across frames.
#[derive(Default)]
struct Planes {
    y: Vec<u8>,
    cb: Vec<u8>,
    cr: Vec<u8>,
}

impl Planes {
    fn allocate(len: usize) -> PixmillResult<Self> {
        let mut planes = Self::default();
        for plane in [&mut planes.y, &mut planes.cb, &mut planes.cr] {
            plane.try_reserve_exact(len).map_err(|e| {
                PixmillError::allocation(format!("y4m plane ({len} bytes): {e}"))
            })?;
            plane.resize(len, 0);
        }
        Ok(planes)
    }

    fn fill_from(&mut self, pixels: &[u32]) {
        for (i, &p) in pixels.iter().enumerate() {
            let [y, cb, cr] = rgba_to_ycbcr(Color(p));
            self.y[i] = y;
            self.cb[i] = cb;
            self.cr[i] = cr;
        }
    }
}

/// Streaming YUV4MPEG2 writer.
///
/// The writer owns its sink and plane buffers until [`Y4mWriter::close`]. Dropping an unclosed
/// writer flushes best-effort and releases everything; call `close` to observe flush errors.
pub struct Y4mWriter<W: Write> {
    sink: Option<W>,
    width: u32,
    height: u32,
    fps: Fps,
    planes: Planes,
    frames_written: u64,
}

impl Y4mWriter<BufWriter<File>> {
    /// Create (or truncate) a `.y4m` file at `path` and write the stream header.
    pub fn create(path: impl AsRef<Path>, width: u32, height: u32, fps: Fps) -> PixmillResult<Self> {
        let path = path.as_ref();
        validate_stream(width, height, fps)?;
        ensure_parent_dir(path)?;
        let file = File::create(path)
            .with_context(|| format!("failed to create y4m '{}'", path.display()))?;
        Self::open(BufWriter::new(file), width, height, fps)
    }
}

fn validate_stream(width: u32, height: u32, fps: Fps) -> PixmillResult<usize> {
    if width == 0 || height == 0 {
        return Err(PixmillError::validation(format!(
            "y4m dimensions must be non-zero, got {width}x{height}"
        )));
    }
    if fps.num == 0 || fps.den == 0 {
        return Err(PixmillError::validation("y4m fps must be non-zero"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| PixmillError::validation(format!("y4m frame {width}x{height} overflows")))
}

impl<W: Write> Y4mWriter<W> {
    /// Write the stream header to `sink` and allocate the three frame planes.
    #[tracing::instrument(skip(sink))]
    pub fn open(mut sink: W, width: u32, height: u32, fps: Fps) -> PixmillResult<Self> {
        let len = validate_stream(width, height, fps)?;
        let planes = Planes::allocate(len)?;

        sink.write_all(header_line(width, height, fps).as_bytes())
            .context("failed to write y4m header")?;

        Ok(Self {
            sink: Some(sink),
            width,
            height,
            fps,
            planes,
            frames_written: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Append one frame from `canvas`, whose size must match the stream.
    pub fn write_frame<P: PixelStorage>(&mut self, canvas: &Canvas<P>) -> PixmillResult<()> {
        self.write_pixels(canvas.pixels(), canvas.width(), canvas.height())
    }

    /// Append one frame of packed `0xRRGGBBAA` pixels.
    pub fn write_pixels(&mut self, pixels: &[u32], width: u32, height: u32) -> PixmillResult<()> {
        if width != self.width || height != self.height {
            return Err(PixmillError::validation(format!(
                "frame size mismatch: got {width}x{height}, expected {}x{}",
                self.width, self.height
            )));
        }
        if pixels.len() != self.planes.y.len() {
            return Err(PixmillError::validation(format!(
                "frame holds {} pixels, expected {}",
                pixels.len(),
                self.planes.y.len()
            )));
        }
        let Some(sink) = self.sink.as_mut() else {
            return Err(PixmillError::validation("y4m writer is already closed"));
        };

        self.planes.fill_from(pixels);

        let frame = self.frames_written;
        sink.write_all(FRAME_MARKER)
            .and_then(|()| sink.write_all(&self.planes.y))
            .and_then(|()| sink.write_all(&self.planes.cb))
            .and_then(|()| sink.write_all(&self.planes.cr))
            .with_context(|| format!("failed to write y4m frame {frame}"))?;

        self.frames_written += 1;
        Ok(())
    }

    /// Flush the stream, release the planes and hand the sink back.
    pub fn close(mut self) -> PixmillResult<W> {
        self.planes = Planes::default();
        let mut sink = self
            .sink
            .take()
            .ok_or_else(|| PixmillError::validation("y4m writer is already closed"))?;
        sink.flush().context("failed to flush y4m stream")?;
        tracing::debug!(frames = self.frames_written, "closed y4m stream");
        Ok(sink)
    }
}

impl<W: Write> Drop for Y4mWriter<W> {
    fn drop(&mut self) {
        if let Some(mut sink) = self.sink.take()
            && let Err(e) = sink.flush()
        {
            tracing::warn!(error = %e, "failed to flush unclosed y4m stream");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/y4m.rs"]
mod tests;
