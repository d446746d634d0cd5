use serde::{Deserialize, Serialize};

use super::{clamp_param, PixelKernel};
use crate::color::{Palette, Rgb};

pub const OCTAVES: usize = 4;
/// Sum of octave amplitudes: 1 + 1/2 + 1/4 + 1/8.
const AMPLITUDE_SUM: f32 = 1.875;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    pub scale: f32,
    pub speed: f32,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            scale: 4.0,
            speed: 0.5,
        }
    }
}

impl NoiseParams {
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        Self {
            scale: clamp_param(self.scale, 0.5, 64.0, d.scale),
            speed: clamp_param(self.speed, 0.0, 10.0, d.speed),
        }
    }
}

/// Fractal sum of sine products.
pub struct Noise {
    params: NoiseParams,
    inv_w: f32,
    inv_h: f32,
    phase: f32,
}

impl Noise {
    pub fn new(params: &NoiseParams, width: usize, height: usize, time: f32) -> Self {
        let params = params.clamped();
        Self {
            params,
            inv_w: 1.0 / width.max(1) as f32,
            inv_h: 1.0 / height.max(1) as f32,
            phase: time * params.speed,
        }
    }

    pub fn value(&self, x: usize, y: usize) -> f32 {
        let nx = x as f32 * self.inv_w;
        let ny = y as f32 * self.inv_h;
        let mut amplitude = 1.0;
        let mut frequency = self.params.scale;
        let mut sum = 0.0;
        for octave in 0..OCTAVES {
            let o = octave as f32;
            let t = self.phase * (o + 1.0);
            sum += amplitude * (nx * frequency + t).sin() * (ny * frequency * 1.3 - t * 0.7 + o).sin();
            amplitude *= 0.5;
            frequency *= 2.0;
        }
        ((sum / AMPLITUDE_SUM + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

impl PixelKernel for Noise {
    #[inline]
    fn shade(&self, x: usize, y: usize, palette: &Palette) -> Rgb {
        palette.color_at(self.value(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_at_rest_is_mid_range() {
        // sin(0) zeroes every octave at the origin when time is 0.
        let n = Noise::new(&NoiseParams::default(), 64, 64, 0.0);
        assert_eq!(n.value(0, 0), 0.5);
    }
}
