//! Escape-time fractals.
//!
//! Iteration runs in `f64` so the breathing zoom keeps detail at its deepest
//! point.

use serde::{Deserialize, Serialize};

use super::{clamp_param, PixelKernel};
use crate::color::{Palette, Rgb};

const ESCAPE_RADIUS_SQ: f64 = 4.0;
/// View height in complex-plane units at zoom 1.
const BASE_SPAN: f64 = 3.0;
/// `ln` of the deepest zoom factor reached by the breathing cycle.
const ZOOM_DEPTH: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalParams {
    pub max_iterations: u32,
    pub center_x: f64,
    pub center_y: f64,
    pub zoom: f64,
    pub zoom_speed: f32,
    /// Render a Julia set with a time-orbiting constant instead of the
    /// Mandelbrot set.
    pub julia: bool,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            max_iterations: 64,
            center_x: -0.5,
            center_y: 0.0,
            zoom: 1.0,
            zoom_speed: 0.1,
            julia: false,
        }
    }
}

impl FractalParams {
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        Self {
            max_iterations: self.max_iterations.clamp(8, 1024),
            center_x: clamp_f64(self.center_x, -2.5, 1.5, d.center_x),
            center_y: clamp_f64(self.center_y, -1.5, 1.5, d.center_y),
            zoom: clamp_f64(self.zoom, 0.25, 1e4, d.zoom),
            zoom_speed: clamp_param(self.zoom_speed, 0.0, 2.0, d.zoom_speed),
            julia: self.julia,
        }
    }
}

fn clamp_f64(v: f64, lo: f64, hi: f64, fallback: f64) -> f64 {
    if v.is_nan() {
        fallback
    } else {
        v.clamp(lo, hi)
    }
}

pub struct Fractal {
    params: FractalParams,
    origin: (f64, f64),
    scale: f64,
    julia_c: (f64, f64),
}

impl Fractal {
    pub fn new(params: &FractalParams, width: usize, height: usize, time: f32) -> Self {
        let params = params.clamped();
        let t = time as f64;
        let breath = 0.5 - 0.5 * (t * params.zoom_speed as f64).cos();
        let zoom = params.zoom * (ZOOM_DEPTH * breath).exp();
        let scale = BASE_SPAN / (zoom * height.max(1) as f64);
        let origin = (
            params.center_x - scale * width as f64 * 0.5,
            params.center_y - scale * height as f64 * 0.5,
        );
        let julia_c = (0.7885 * (t * 0.2).cos(), 0.7885 * (t * 0.2).sin());
        Self {
            params,
            origin,
            scale,
            julia_c,
        }
    }

    /// Iterations before escape, capped at `max_iterations`.
    pub fn iterations(&self, x: usize, y: usize) -> u32 {
        let px = self.origin.0 + x as f64 * self.scale;
        let py = self.origin.1 + y as f64 * self.scale;
        let ((mut zr, mut zi), (cr, ci)) = if self.params.julia {
            ((px, py), self.julia_c)
        } else {
            ((0.0, 0.0), (px, py))
        };

        let cap = self.params.max_iterations;
        let mut i = 0;
        while i < cap {
            let zr2 = zr * zr;
            let zi2 = zi * zi;
            if zr2 + zi2 > ESCAPE_RADIUS_SQ {
                break;
            }
            zi = 2.0 * zr * zi + ci;
            zr = zr2 - zi2 + cr;
            i += 1;
        }
        i
    }

    pub fn value(&self, x: usize, y: usize) -> f32 {
        self.iterations(x, y) as f32 / self.params.max_iterations as f32
    }
}

impl PixelKernel for Fractal {
    #[inline]
    fn shade(&self, x: usize, y: usize, palette: &Palette) -> Rgb {
        palette.color_at(self.value(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_inside_the_mandelbrot_set() {
        let params = FractalParams { center_x: 0.0, center_y: 0.0, ..Default::default() };
        let f = Fractal::new(&params, 101, 101, 0.0);
        // Pixel (50.5, 50.5) is the view center; (50, 50) is within half a pixel of c = 0.
        assert_eq!(f.iterations(50, 50), 64);
        assert_eq!(f.value(50, 50), 1.0);
    }

    #[test]
    fn far_points_escape_immediately() {
        let f = Fractal::new(&FractalParams::default(), 100, 100, 0.0);
        // Left edge sits near -2.0 on the real axis, top-left corner well outside.
        assert!(f.iterations(0, 0) < 4);
    }
}
