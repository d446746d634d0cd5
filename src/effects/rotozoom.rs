use serde::{Deserialize, Serialize};

use super::{clamp_param, PixelKernel};
use crate::color::{Palette, Rgb};

/// Texture-space frequency of the plasma overlay.
const PLASMA_SCALE: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotozoomParams {
    pub zoom: f32,
    pub zoom_amount: f32,
    pub rotation_speed: f32,
    /// Checker cell size in texture pixels.
    pub checker_size: f32,
    pub plasma_mix: f32,
}

impl Default for RotozoomParams {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            zoom_amount: 0.5,
            rotation_speed: 0.5,
            checker_size: 16.0,
            plasma_mix: 0.35,
        }
    }
}

impl RotozoomParams {
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        Self {
            zoom: clamp_param(self.zoom, 0.1, 8.0, d.zoom),
            zoom_amount: clamp_param(self.zoom_amount, 0.0, 4.0, d.zoom_amount),
            rotation_speed: clamp_param(self.rotation_speed, -5.0, 5.0, d.rotation_speed),
            checker_size: clamp_param(self.checker_size, 2.0, 128.0, d.checker_size),
            plasma_mix: clamp_param(self.plasma_mix, 0.0, 1.0, d.plasma_mix),
        }
    }
}

/// Rotating, zooming checkerboard with a plasma tint.
pub struct Rotozoom {
    cos_a: f32,
    sin_a: f32,
    inv_zoom: f32,
    cx: f32,
    cy: f32,
    time: f32,
    params: RotozoomParams,
}

impl Rotozoom {
    pub fn new(params: &RotozoomParams, width: usize, height: usize, time: f32) -> Self {
        let params = params.clamped();
        let angle = time * params.rotation_speed;
        // The swing can cross zero; keep the scale away from it.
        let zoom = (params.zoom + params.zoom_amount * (time * 0.7).sin()).abs().max(0.05);
        Self {
            cos_a: angle.cos(),
            sin_a: angle.sin(),
            inv_zoom: 1.0 / zoom,
            cx: width as f32 * 0.5,
            cy: height as f32 * 0.5,
            time,
            params,
        }
    }

    /// Texture coordinates for screen pixel (x, y).
    pub fn texture_coords(&self, x: usize, y: usize) -> (f32, f32) {
        let dx = x as f32 - self.cx;
        let dy = y as f32 - self.cy;
        (
            (dx * self.cos_a - dy * self.sin_a) * self.inv_zoom,
            (dx * self.sin_a + dy * self.cos_a) * self.inv_zoom,
        )
    }

    pub fn value(&self, x: usize, y: usize) -> f32 {
        let (u, v) = self.texture_coords(x, y);
        let size = self.params.checker_size;
        let cell = (u / size).floor() as i64 + (v / size).floor() as i64;
        let checker = cell.rem_euclid(2) as f32;
        let plasma = 0.5 + 0.5 * (u * PLASMA_SCALE + self.time).sin() * (v * PLASMA_SCALE - self.time).cos();
        let mix = self.params.plasma_mix;
        (checker * (1.0 - mix) + plasma * mix).clamp(0.0, 1.0)
    }
}

impl PixelKernel for Rotozoom {
    #[inline]
    fn shade(&self, x: usize, y: usize, palette: &Palette) -> Rgb {
        palette.color_at(self.value(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrotated_checker_alternates() {
        let params = RotozoomParams {
            zoom: 1.0,
            zoom_amount: 0.0,
            rotation_speed: 0.0,
            checker_size: 10.0,
            plasma_mix: 0.0,
        };
        let r = Rotozoom::new(&params, 100, 100, 0.0);
        assert_eq!(r.value(55, 55), 0.0);
        assert_eq!(r.value(65, 55), 1.0);
        assert_eq!(r.value(65, 65), 0.0);
    }
}
