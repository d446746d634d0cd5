use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::polar::{to_polar, unit_length};
use super::{clamp_param, PixelKernel};
use crate::color::{Palette, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwisterParams {
    pub twist: f32,
    pub speed: f32,
    pub frequency: f32,
}

impl Default for TwisterParams {
    fn default() -> Self {
        Self {
            twist: 3.0,
            speed: 1.0,
            frequency: 6.0,
        }
    }
}

impl TwisterParams {
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        Self {
            twist: clamp_param(self.twist, 0.0, 16.0, d.twist),
            speed: clamp_param(self.speed, 0.0, 10.0, d.speed),
            frequency: clamp_param(self.frequency, 1.0, 32.0, d.frequency),
        }
    }
}

/// Spiral warp: the polar angle is bent by radius and time.
pub struct Twister {
    params: TwisterParams,
    cx: f32,
    cy: f32,
    unit: f32,
    spin: f32,
}

impl Twister {
    pub fn new(params: &TwisterParams, width: usize, height: usize, time: f32) -> Self {
        let params = params.clamped();
        Self {
            params,
            cx: width as f32 * 0.5,
            cy: height as f32 * 0.5,
            unit: unit_length(width, height),
            spin: time * params.speed,
        }
    }

    pub fn value(&self, x: usize, y: usize) -> f32 {
        let (radius, angle) = to_polar(x, y, self.cx, self.cy, self.unit);
        let warped = angle + self.params.twist * radius + self.spin;
        let f = self.params.frequency;
        let v = 0.5 + 0.25 * (warped * f * 0.5).sin() + 0.25 * (radius * f * TAU - self.spin * 2.0).sin();
        v.clamp(0.0, 1.0)
    }
}

impl PixelKernel for Twister {
    #[inline]
    fn shade(&self, x: usize, y: usize, palette: &Palette) -> Rgb {
        palette.color_at(self.value(x, y))
    }
}
