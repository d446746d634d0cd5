use serde::{Deserialize, Serialize};

use super::{clamp_param, PixelKernel};
use crate::color::{Palette, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireParams {
    pub intensity: f32,
    pub turbulence: f32,
    pub flicker: f32,
    pub speed: f32,
}

impl Default for FireParams {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            turbulence: 0.8,
            flicker: 0.3,
            speed: 1.5,
        }
    }
}

impl FireParams {
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        Self {
            intensity: clamp_param(self.intensity, 0.1, 3.0, d.intensity),
            turbulence: clamp_param(self.turbulence, 0.0, 2.0, d.turbulence),
            flicker: clamp_param(self.flicker, 0.0, 1.0, d.flicker),
            speed: clamp_param(self.speed, 0.0, 10.0, d.speed),
        }
    }
}

/// Procedural flames: a bottom-hot gradient torn up by turbulence.
pub struct Fire {
    params: FireParams,
    inv_w: f32,
    inv_h: f32,
    phase: f32,
}

impl Fire {
    pub fn new(params: &FireParams, width: usize, height: usize, time: f32) -> Self {
        let params = params.clamped();
        Self {
            params,
            inv_w: 1.0 / width.max(1) as f32,
            // Normalize so the bottom row reaches exactly 1.0.
            inv_h: 1.0 / height.saturating_sub(1).max(1) as f32,
            phase: time * params.speed,
        }
    }

    /// Heat at (x, y). The unclamped sum can overshoot, so the clamp here is
    /// load-bearing.
    pub fn value(&self, x: usize, y: usize) -> f32 {
        let nx = x as f32 * self.inv_w;
        let ny = y as f32 * self.inv_h;
        let p = self.phase;

        let gradient = ny.powf(1.5);
        let turbulence = 0.5 * (nx * 8.0 + p).sin()
            + 0.3 * (nx * 17.0 - p * 1.3 + ny * 6.0).sin()
            + 0.2 * (nx * 31.0 + ny * 13.0 + p * 2.1).sin();
        let flicker = 0.1 * self.params.flicker * (p * 11.0 + nx * 3.0).sin();

        let heat = gradient * self.params.intensity * (1.0 + 0.5 * self.params.turbulence * turbulence)
            + flicker;
        heat.clamp(0.0, 1.0)
    }
}

impl PixelKernel for Fire {
    #[inline]
    fn shade(&self, x: usize, y: usize, palette: &Palette) -> Rgb {
        palette.color_at(self.value(x, y))
    }
}
