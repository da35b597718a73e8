use crate::foundation::error::{PixmillError, PixmillResult};

/// Packed 32-bit color, `0xRRGGBBAA` (red in the most significant byte).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub u32);

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0x0000_0000);
    /// Opaque black.
    pub const BLACK: Self = Self(0x0000_00FF);
    /// Opaque white.
    pub const WHITE: Self = Self(0xFFFF_FFFF);

    /// Pack straight (non-premultiplied) channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(u32::from_be_bytes([r, g, b, a]))
    }

    /// Pack an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0xFF)
    }

    pub const fn r(self) -> u8 {
        self.0.to_be_bytes()[0]
    }

    pub const fn g(self) -> u8 {
        self.0.to_be_bytes()[1]
    }

    pub const fn b(self) -> u8 {
        self.0.to_be_bytes()[2]
    }

    pub const fn a(self) -> u8 {
        self.0.to_be_bytes()[3]
    }

    /// Channels in R,G,B,A order.
    pub const fn to_rgba(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Parse `#rrggbb` (opaque) or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> PixmillResult<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if !matches!(digits.len(), 6 | 8) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PixmillError::validation(format!(
                "color '{s}' must look like #rrggbb or #rrggbbaa"
            )));
        }
        let v = u32::from_str_radix(digits, 16)
            .map_err(|e| PixmillError::validation(format!("color '{s}' is not hex: {e}")))?;
        Ok(if digits.len() == 6 {
            Self((v << 8) | 0xFF)
        } else {
            Self(v)
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:08x}", self.0)
    }
}

impl From<u32> for Color {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl From<Color> for u32 {
    fn from(c: Color) -> Self {
        c.0
    }
}

impl TryFrom<String> for Color {
    type Error = PixmillError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
///
/// A zero `w` or `h` makes every operation on it a no-op.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn is_empty(self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Intersection with `[0, width) x [0, height)` as half-open `(x0, y0, x1, y1)`.
    ///
    /// Returns `None` when the intersection is empty.
    pub fn clip_to(self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        if self.is_empty() {
            return None;
        }
        let x1 = self.x.saturating_add(self.w).min(width);
        let y1 = self.y.saturating_add(self.h).min(height);
        if self.x >= x1 || self.y >= y1 {
            return None;
        }
        Some((self.x, self.y, x1, y1))
    }
}

/// Rational frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> PixmillResult<Self> {
        if den == 0 {
            return Err(PixmillError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(PixmillError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Whole frames per second (`den == 1`).
    pub fn whole(num: u32) -> PixmillResult<Self> {
        Self::new(num, 1)
    }

    /// Playback duration of `frames` frames, in seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * f64::from(self.den) / f64::from(self.num)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
