//! Interfering sine waves over normalized space and time.

use serde::{Deserialize, Serialize};

use super::{clamp_param, PixelKernel};
use crate::color::{Palette, Rgb};

/// Complexity above which the doubled-frequency product term is added.
pub const COMPLEXITY_LOW: f32 = 0.33;
/// Complexity above which the high-frequency radial term is added.
pub const COMPLEXITY_HIGH: f32 = 0.66;

const BASE_TERMS: f32 = 4.0;
const DETAIL_WEIGHT: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlasmaParams {
    pub x_freq: f32,
    pub y_freq: f32,
    pub complexity: f32,
}

impl Default for PlasmaParams {
    fn default() -> Self {
        Self {
            x_freq: 6.0,
            y_freq: 4.0,
            complexity: 0.5,
        }
    }
}

impl PlasmaParams {
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        Self {
            x_freq: clamp_param(self.x_freq, 0.5, 32.0, d.x_freq),
            y_freq: clamp_param(self.y_freq, 0.5, 32.0, d.y_freq),
            complexity: clamp_param(self.complexity, 0.0, 1.0, d.complexity),
        }
    }
}

/// Per-frame plasma kernel.
pub struct Plasma {
    params: PlasmaParams,
    inv_w: f32,
    inv_h: f32,
    time: f32,
    max_amplitude: f32,
}

impl Plasma {
    pub fn new(params: &PlasmaParams, width: usize, height: usize, time: f32) -> Self {
        let params = params.clamped();
        Self {
            params,
            inv_w: 1.0 / width.max(1) as f32,
            inv_h: 1.0 / height.max(1) as f32,
            time,
            max_amplitude: max_amplitude(params.complexity),
        }
    }

    /// Normalized field value in `[0, 1]` at pixel (x, y).
    pub fn value(&self, x: usize, y: usize) -> f32 {
        let nx = x as f32 * self.inv_w;
        let ny = y as f32 * self.inv_h;
        let t = self.time;
        let xf = self.params.x_freq;
        let yf = self.params.y_freq;

        let cx = nx - 0.5;
        let cy = ny - 0.5;
        let radius = (cx * cx + cy * cy).sqrt();

        let mut sum = (nx * xf + t).sin()
            + (ny * yf + t * 1.3).sin()
            + ((nx * xf + ny * yf) * 0.5 + t * 0.7).sin()
            + (radius * (xf + yf) + t).sin();

        if self.params.complexity > COMPLEXITY_LOW {
            sum += DETAIL_WEIGHT * (nx * xf * 2.0 - t * 1.7).sin() * (ny * yf * 2.0 + t).cos();
        }
        if self.params.complexity > COMPLEXITY_HIGH {
            sum += DETAIL_WEIGHT * (radius * (xf + yf) * 4.0 - t * 2.1).sin();
        }

        ((sum + self.max_amplitude) / (2.0 * self.max_amplitude)).clamp(0.0, 1.0)
    }
}

impl PixelKernel for Plasma {
    #[inline]
    fn shade(&self, x: usize, y: usize, palette: &Palette) -> Rgb {
        palette.color_at(self.value(x, y))
    }
}

/// Upper bound of `|sum|` for the terms active at `complexity`.
pub fn max_amplitude(complexity: f32) -> f32 {
    let mut amp = BASE_TERMS;
    if complexity > COMPLEXITY_LOW {
        amp += DETAIL_WEIGHT;
    }
    if complexity > COMPLEXITY_HIGH {
        amp += DETAIL_WEIGHT;
    }
    amp
}
