use std::str::FromStr;

use thiserror::Error;

use super::mathf::clamp01;

/// Straight-alpha RGBA color with channels in `[0, 1]`.
///
/// Every constructor clamps, so a `Color32` is always in range.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color32 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color32 {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Error returned by [`Color32::from_hex`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    #[error("invalid hex color length {0} (expected #RRGGBB or #RRGGBBAA)")]
    Length(usize),
    #[error("invalid hex digit in color {0:?}")]
    Digit(String),
}

impl Color32 {
    pub const WHITE: Color32 = Color32::raw(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color32 = Color32::raw(0.0, 0.0, 0.0, 1.0);
    pub const RED: Color32 = Color32::raw(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color32 = Color32::raw(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color32 = Color32::raw(0.0, 0.0, 1.0, 1.0);
    pub const TRANSPARENT: Color32 = Color32::raw(0.0, 0.0, 0.0, 0.0);

    const fn raw(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from `[0, 1]` float channels (clamped).
    #[inline]
    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::raw(clamp01(r), clamp01(g), clamp01(b), clamp01(a))
    }

    #[inline]
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates a color from `0..=255` channel bytes with a float alpha.
    #[inline]
    pub fn from_rgb_u8(r: u8, g: u8, b: u8, a: f32) -> Self {
        const INV_255: f32 = 1.0 / 255.0;
        Self::rgba(r as f32 * INV_255, g as f32 * INV_255, b as f32 * INV_255, a)
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ParseColorError> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ParseColorError::Length(digits.len()));
        }

        let channel = |i: usize| -> Result<f32, ParseColorError> {
            let pair = digits
                .get(i * 2..i * 2 + 2)
                .filter(|pair| pair.bytes().all(|b| b.is_ascii_hexdigit()))
                .ok_or_else(|| ParseColorError::Digit(hex.to_string()))?;
            u8::from_str_radix(pair, 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| ParseColorError::Digit(hex.to_string()))
        };

        let a = if digits.len() == 8 { channel(3)? } else { 1.0 };
        Ok(Self::rgba(channel(0)?, channel(1)?, channel(2)?, a))
    }

    /// Channel-wise interpolation with `t` clamped to `[0, 1]`.
    pub fn lerp(self, to: Color32, t: f32) -> Self {
        let t = clamp01(t);
        Self::rgba(
            self.r + (to.r - self.r) * t,
            self.g + (to.g - self.g) * t,
            self.b + (to.b - self.b) * t,
            self.a + (to.a - self.a) * t,
        )
    }

    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl FromStr for Color32 {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
