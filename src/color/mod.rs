mod ramp;
mod schemes;

pub use ramp::{Palette, PaletteBank, PALETTE_SIZE};
pub use schemes::PaletteKind;

use serde::{Deserialize, Serialize};

/// An opaque 8-bit-per-channel color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from float channels in `[0, 255]`, clamping and rounding.
    /// NaN channels become 0.
    pub fn from_f32(r: f32, g: f32, b: f32) -> Self {
        Self::new(channel(r), channel(g), channel(b))
    }

    /// Pack as `0xFF_RR_GG_BB`.
    #[inline]
    pub const fn pack(self) -> u32 {
        0xFF00_0000 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Inverse of [`Rgb::pack`]; the alpha byte is ignored.
    #[inline]
    pub const fn unpack(packed: u32) -> Self {
        Self::new((packed >> 16) as u8, (packed >> 8) as u8, packed as u8)
    }

    /// Scale every channel by `factor` (clamped to `[0, 1]`).
    pub fn scale(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self::from_f32(self.r as f32 * f, self.g as f32 * f, self.b as f32 * f)
    }

    /// Channel-wise maximum.
    #[inline]
    pub fn max(self, other: Rgb) -> Self {
        Self::new(self.r.max(other.r), self.g.max(other.g), self.b.max(other.b))
    }

    /// Screen blend: `255 - (255 - a)(255 - b) / 255`.
    #[inline]
    pub fn screen(self, other: Rgb) -> Self {
        Self::new(
            screen_channel(self.r, other.r),
            screen_channel(self.g, other.g),
            screen_channel(self.b, other.b),
        )
    }

    /// Multiply blend: `a * b / 255`.
    #[inline]
    pub fn multiply(self, other: Rgb) -> Self {
        Self::new(
            multiply_channel(self.r, other.r),
            multiply_channel(self.g, other.g),
            multiply_channel(self.b, other.b),
        )
    }
}

/// Clamp a float channel to `[0, 255]` and round it. NaN becomes 0.
#[inline]
pub fn channel(v: f32) -> u8 {
    if v.is_nan() {
        0
    } else {
        v.clamp(0.0, 255.0).round() as u8
    }
}

#[inline]
fn screen_channel(a: u8, b: u8) -> u8 {
    let inv = (255 - a as u32) * (255 - b as u32) / 255;
    (255 - inv) as u8
}

#[inline]
fn multiply_channel(a: u8, b: u8) -> u8 {
    (a as u32 * b as u32 / 255) as u8
}
