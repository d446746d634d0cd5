use serde::{Deserialize, Serialize};

use super::{clamp_param, PixelKernel};
use crate::color::{Palette, Rgb};

const EPSILON: f32 = 1e-4;
const ORBIT: f32 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaballParams {
    pub count: u32,
    pub radius: f32,
    pub threshold: f32,
    pub speed: f32,
}

impl Default for MetaballParams {
    fn default() -> Self {
        Self {
            count: 5,
            radius: 0.1,
            threshold: 1.0,
            speed: 1.0,
        }
    }
}

impl MetaballParams {
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        Self {
            count: self.count.clamp(1, 16),
            radius: clamp_param(self.radius, 0.01, 0.5, d.radius),
            threshold: clamp_param(self.threshold, 0.1, 8.0, d.threshold),
            speed: clamp_param(self.speed, 0.0, 10.0, d.speed),
        }
    }
}

/// Inverse-distance field of orbiting point sources.
pub struct Metaballs {
    /// Source centers in aspect-corrected space (x spans `[0, aspect]`).
    centers: Vec<(f32, f32)>,
    radius: f32,
    threshold: f32,
    inv_h: f32,
}

impl Metaballs {
    pub fn new(params: &MetaballParams, width: usize, height: usize, time: f32) -> Self {
        let params = params.clamped();
        let aspect = width as f32 / height.max(1) as f32;
        let t = time * params.speed;
        let centers = (0..params.count)
            .map(|k| {
                let k = k as f32;
                let x = 0.5 + ORBIT * (t * (0.7 + 0.13 * k) + k * 1.7).sin();
                let y = 0.5 + ORBIT * (t * (0.9 + 0.11 * k) + k * 2.3).cos();
                (x * aspect, y)
            })
            .collect();
        Self {
            centers,
            radius: params.radius,
            threshold: params.threshold,
            inv_h: 1.0 / height.max(1) as f32,
        }
    }

    pub fn centers(&self) -> &[(f32, f32)] {
        &self.centers
    }

    /// Raw field strength at pixel (x, y).
    pub fn field(&self, x: usize, y: usize) -> f32 {
        let px = x as f32 * self.inv_h;
        let py = y as f32 * self.inv_h;
        self.centers
            .iter()
            .map(|&(cx, cy)| {
                let d = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
                self.radius / (d + EPSILON)
            })
            .sum()
    }

    /// Field thresholded at `threshold / 2` and scaled into `[0, 1]`.
    pub fn value(&self, x: usize, y: usize) -> f32 {
        let floor = self.threshold * 0.5;
        let f = self.field(x, y);
        if f < floor {
            0.0
        } else {
            ((f - floor) / (self.threshold * 1.5)).clamp(0.0, 1.0)
        }
    }
}

impl PixelKernel for Metaballs {
    #[inline]
    fn shade(&self, x: usize, y: usize, palette: &Palette) -> Rgb {
        palette.color_at(self.value(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_centers_are_hot() {
        let m = Metaballs::new(&MetaballParams::default(), 200, 100, 0.8);
        let (cx, cy) = m.centers()[0];
        let x = (cx * 100.0).round() as usize;
        let y = (cy * 100.0).round() as usize;
        assert_eq!(m.value(x, y), 1.0);
    }

    #[test]
    fn far_field_is_cold() {
        let params = MetaballParams { count: 1, radius: 0.01, threshold: 8.0, speed: 0.0 };
        let m = Metaballs::new(&params, 100, 100, 0.0);
        assert_eq!(m.value(0, 0), 0.0);
    }
}
