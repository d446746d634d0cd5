use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::polar::{to_polar, unit_length};
use super::{clamp_param, PixelKernel};
use crate::color::{Palette, Rgb};

const EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunnelParams {
    pub depth: f32,
    pub speed: f32,
    pub angular_repeats: u32,
    pub center_x: f32,
    pub center_y: f32,
}

impl Default for TunnelParams {
    fn default() -> Self {
        Self {
            depth: 0.5,
            speed: 1.0,
            angular_repeats: 4,
            center_x: 0.5,
            center_y: 0.5,
        }
    }
}

impl TunnelParams {
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        Self {
            depth: clamp_param(self.depth, 0.05, 4.0, d.depth),
            speed: clamp_param(self.speed, 0.0, 10.0, d.speed),
            angular_repeats: self.angular_repeats.clamp(1, 32),
            center_x: clamp_param(self.center_x, 0.0, 1.0, d.center_x),
            center_y: clamp_param(self.center_y, 0.0, 1.0, d.center_y),
        }
    }
}

/// Polar-remapped tunnel: depth grows as `1 / radius` toward the center.
pub struct Tunnel {
    params: TunnelParams,
    cx: f32,
    cy: f32,
    unit: f32,
    travel: f32,
}

impl Tunnel {
    pub fn new(params: &TunnelParams, width: usize, height: usize, time: f32) -> Self {
        let params = params.clamped();
        Self {
            params,
            cx: params.center_x * width as f32,
            cy: params.center_y * height as f32,
            unit: unit_length(width, height),
            travel: time * params.speed,
        }
    }

    pub fn value(&self, x: usize, y: usize) -> f32 {
        let (radius, angle) = to_polar(x, y, self.cx, self.cy, self.unit);
        let depth = self.params.depth / (radius + EPSILON) + self.travel;
        let texture = 0.5 * (angle * self.params.angular_repeats as f32).sin() + 0.5 * (depth * TAU).sin();
        // Far walls (small radius) fade toward the dark end of the ramp.
        let fog = (radius * 4.0).min(1.0);
        ((texture + 1.0) * 0.5 * fog).clamp(0.0, 1.0)
    }
}

impl PixelKernel for Tunnel {
    #[inline]
    fn shade(&self, x: usize, y: usize, palette: &Palette) -> Rgb {
        palette.color_at(self.value(x, y))
    }
}
