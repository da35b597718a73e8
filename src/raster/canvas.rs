use crate::foundation::core::Color;
use crate::foundation::error::{PixmillError, PixmillResult};

/// Storage a [`Canvas`] can hold packed `0xRRGGBBAA` pixels in.
///
/// Implemented for owned `Vec<u32>` and for borrowed `&mut [u32]`.
pub trait PixelStorage: AsRef<[u32]> + AsMut<[u32]> {}

impl<T: AsRef<[u32]> + AsMut<[u32]> + ?Sized> PixelStorage for T {}

/// Canvas owning its heap storage.
pub type OwnedCanvas = Canvas<Vec<u32>>;

/// Canvas drawing into caller-managed storage.
pub type CanvasView<'a> = Canvas<&'a mut [u32]>;

/// Row-major pixel buffer with total, bounds-checked pixel access.
///
/// The storage type decides ownership: an [`OwnedCanvas`] releases its buffer when destroyed or
/// dropped, a [`CanvasView`] never releases the slice it was bound to.
///
/// Every accessor tolerates out-of-range coordinates and an unbound (destroyed) buffer, which is
/// what lets the rasterizer clip by simply calling [`Canvas::set`].
#[derive(Clone)]
pub struct Canvas<P = Vec<u32>> {
    width: u32,
    height: u32,
    pixels: Option<P>,
}

fn pixel_count(width: u32, height: u32) -> PixmillResult<usize> {
    (width as usize).checked_mul(height as usize).ok_or_else(|| {
        PixmillError::validation(format!("canvas {width}x{height} overflows the address space"))
    })
}

impl Canvas<Vec<u32>> {
    /// Allocate a zeroed (transparent) canvas.
    pub fn new(width: u32, height: u32) -> PixmillResult<Self> {
        let len = pixel_count(width, height)?;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|e| {
            PixmillError::allocation(format!("canvas {width}x{height} storage: {e}"))
        })?;
        pixels.resize(len, 0);
        Ok(Self {
            width,
            height,
            pixels: Some(pixels),
        })
    }
}

impl<'a> Canvas<&'a mut [u32]> {
    /// Bind a canvas to caller storage. Only the first `width * height` values are used.
    pub fn from_slice(width: u32, height: u32, pixels: &'a mut [u32]) -> PixmillResult<Self> {
        let len = pixel_count(width, height)?;
        if pixels.len() < len {
            return Err(PixmillError::validation(format!(
                "canvas {width}x{height} needs {len} pixels, storage holds {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels: Some(pixels),
        })
    }
}

impl<P: PixelStorage> Canvas<P> {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `false` once the canvas has been destroyed.
    pub fn is_bound(&self) -> bool {
        self.pixels.is_some()
    }

    fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Exactly `width * height` pixels, empty when unbound.
    pub fn pixels(&self) -> &[u32] {
        let len = self.len();
        match &self.pixels {
            Some(p) => &p.as_ref()[..len],
            None => &[],
        }
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        let len = self.len();
        match &mut self.pixels {
            Some(p) => &mut p.as_mut()[..len],
            None => &mut [],
        }
    }

    /// Invalidate the canvas to zero size and hand the storage back.
    ///
    /// Dropping the returned value releases owned storage; borrowed storage is returned untouched.
    pub fn destroy(&mut self) -> Option<P> {
        self.width = 0;
        self.height = 0;
        self.pixels.take()
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels_mut().fill(color.0);
    }

    /// Stored color at `(x, y)`, or `fallback` when out of range or unbound.
    pub fn get(&self, x: i32, y: i32, fallback: Color) -> Color {
        self.index(i64::from(x), i64::from(y))
            .map(|i| Color(self.pixels()[i]))
            .unwrap_or(fallback)
    }

    /// Store `color` at `(x, y)`; silently ignored when out of range or unbound.
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        self.put(i64::from(x), i64::from(y), color);
    }

    pub(crate) fn put(&mut self, x: i64, y: i64, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels_mut()[i] = color.0;
        }
    }

    /// Fill `[x0, x1)` of row `y`; both already clipped by the caller.
    pub(crate) fn fill_row(&mut self, y: u32, x0: u32, x1: u32, color: Color) {
        let start = y as usize * self.width as usize;
        self.pixels_mut()[start + x0 as usize..start + x1 as usize].fill(color.0);
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if !self.is_bound()
            || x < 0
            || y < 0
            || x >= i64::from(self.width)
            || y >= i64::from(self.height)
        {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

impl<P> std::fmt::Debug for Canvas<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bound", &self.pixels.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/canvas.rs"]
mod tests;
