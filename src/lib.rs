//! pixmill is a small software rasterizer with byte-exact output encoders.
//!
//! # Pipeline overview
//!
//! 1. **Canvas**: a row-major buffer of packed `0xRRGGBBAA` pixels, either owned
//!    ([`OwnedCanvas`]) or borrowed from the caller ([`CanvasView`]).
//! 2. **Rasterize**: [`draw`] primitives (lines, rectangles, circles, triangles) that clip against
//!    the canvas and never fail.
//! 3. **Encode**: [`encode_png`] writes a still image, [`Y4mWriter`] streams frames as
//!    uncompressed 4:4:4 YUV4MPEG2.
//!
//! [`Scene`] describes a canvas and its shapes as JSON and drives the `pixmill` CLI.
//!
//! ```
//! use pixmill::{Canvas, Color, Rect, draw, encode_png_to_vec};
//!
//! let mut c = Canvas::new(64, 48)?;
//! c.clear(Color::rgb(0x00, 0x22, 0x2D));
//! draw::rect_fill(&mut c, Rect::new(4, 4, 20, 10), Color::rgb(255, 0, 255));
//! draw::circle_fill(&mut c, 40, 24, 12, Color::rgb(255, 255, 0));
//! let png = encode_png_to_vec(c.pixels(), c.width(), c.height())?;
//! assert_eq!(&png[1..4], b"PNG");
//! # Ok::<(), pixmill::PixmillError>(())
//! ```
#![forbid(unsafe_code)]

mod encode;
mod foundation;
mod raster;
mod scene;

pub use encode::checksum::{Adler32, CRC32_TABLE, Crc32, Crc32Table, adler32, crc32};
pub use encode::ensure_parent_dir;
pub use encode::png::{
    MAX_STORED_BLOCK, PNG_SIGNATURE, ZLIB_HEADER, encode_png, encode_png_to_vec,
    write_canvas_png, write_png,
};
pub use encode::y4m::{FRAME_MARKER, Y4mWriter, header_line, rgba_to_ycbcr};
pub use foundation::core::{Color, Fps, Rect};
pub use foundation::error::{PixmillError, PixmillResult};
pub use raster::canvas::{Canvas, CanvasView, OwnedCanvas, PixelStorage};
pub use raster::draw;
pub use scene::model::{Scene, SceneCanvas, Shape};
