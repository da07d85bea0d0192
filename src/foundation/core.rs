use crate::foundation::error::{RetouchError, RetouchResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Straight-alpha RGBA8 pixel (`[r, g, b, a]`).
pub type Rgba8 = [u8; 4];

/// Opaque black, the paint color of redaction tools.
pub const BLACK: Rgba8 = [0, 0, 0, 255];

/// Opaque white.
pub const WHITE: Rgba8 = [255, 255, 255, 255];

/// 8-bit RGB color used for configured paint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Construct a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> RetouchResult<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(RetouchError::validation(format!(
                "color '{s}' must be #rrggbb"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| RetouchError::validation(format!("color '{s}' is not hex")))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// The color as an opaque straight-alpha pixel.
    pub fn opaque(self) -> Rgba8 {
        [self.r, self.g, self.b, 255]
    }
}

/// Pixel dimensions of a surface or buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Construct a size, rejecting zero-area dimensions.
    pub fn new(width: u32, height: u32) -> RetouchResult<Self> {
        if width == 0 || height == 0 {
            return Err(RetouchError::validation("size must be non-zero"));
        }
        Ok(Self { width, height })
    }

    /// Number of bytes for a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> RetouchResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| RetouchError::validation("rgba buffer size overflow"))
    }
}

/// Center of pixel `(x, y)`; all coverage decisions sample here.
#[inline]
pub fn pixel_center(x: i64, y: i64) -> Point {
    Point::new(x as f64 + 0.5, y as f64 + 0.5)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
