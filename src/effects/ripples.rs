use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::{clamp_param, PixelKernel};
use crate::color::{Palette, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RippleParams {
    pub sources: u32,
    /// Wavelength as a fraction of the canvas height.
    pub wavelength: f32,
    pub speed: f32,
    pub damping: f32,
}

impl Default for RippleParams {
    fn default() -> Self {
        Self {
            sources: 3,
            wavelength: 0.06,
            speed: 1.0,
            damping: 4.0,
        }
    }
}

impl RippleParams {
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        Self {
            sources: self.sources.clamp(1, 8),
            wavelength: clamp_param(self.wavelength, 0.01, 0.5, d.wavelength),
            speed: clamp_param(self.speed, 0.0, 10.0, d.speed),
            damping: clamp_param(self.damping, 0.0, 20.0, d.damping),
        }
    }
}

/// Superposed circular wavefronts from drifting sources.
pub struct Ripples {
    sources: Vec<(f32, f32)>,
    params: RippleParams,
    phase: f32,
    inv_h: f32,
}

impl Ripples {
    pub fn new(params: &RippleParams, width: usize, height: usize, time: f32) -> Self {
        let params = params.clamped();
        let aspect = width as f32 / height.max(1) as f32;
        let sources = (0..params.sources)
            .map(|k| {
                let k = k as f32;
                let x = 0.5 + 0.3 * (time * 0.3 * (k + 1.0) + k).sin();
                let y = 0.5 + 0.3 * (time * 0.4 * (k + 1.0) + k * 2.0).cos();
                (x * aspect, y)
            })
            .collect();
        Self {
            sources,
            params,
            phase: time * params.speed,
            inv_h: 1.0 / height.max(1) as f32,
        }
    }

    pub fn value(&self, x: usize, y: usize) -> f32 {
        let px = x as f32 * self.inv_h;
        let py = y as f32 * self.inv_h;
        let sum: f32 = self
            .sources
            .iter()
            .map(|&(sx, sy)| {
                let d = ((px - sx).powi(2) + (py - sy).powi(2)).sqrt();
                ((d / self.params.wavelength - self.phase) * TAU).sin() / (1.0 + d * self.params.damping)
            })
            .sum();
        let avg = sum / self.sources.len() as f32;
        ((avg + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

impl PixelKernel for Ripples {
    #[inline]
    fn shade(&self, x: usize, y: usize, palette: &Palette) -> Rgb {
        palette.color_at(self.value(x, y))
    }
}
