//! Surface-wave distortion: directional sine displacement plus a radial
//! ripple, both scaled by the selected mode.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::renderer::Canvas;

/// Displacement in pixels at multiplier 1.
const BASE_AMPLITUDE: f32 = 4.0;
/// Radians per pixel at multiplier 1.
const BASE_FREQUENCY: f32 = 0.05;
/// Radians per second at multiplier 1.
const BASE_SPEED: f32 = 2.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceWaveMode {
    #[default]
    None,
    Gentle,
    Moderate,
    Intense,
    Storm,
}

/// Per-mode scale factors applied to the base wave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveScale {
    pub amplitude: f32,
    pub frequency: f32,
    pub speed: f32,
}

impl SurfaceWaveMode {
    pub fn scale(&self) -> WaveScale {
        let (amplitude, frequency, speed) = match self {
            SurfaceWaveMode::None => (0.0, 0.0, 0.0),
            SurfaceWaveMode::Gentle => (0.5, 0.75, 0.6),
            SurfaceWaveMode::Moderate => (1.0, 1.0, 1.0),
            SurfaceWaveMode::Intense => (1.75, 1.3, 1.5),
            SurfaceWaveMode::Storm => (2.5, 1.6, 2.2),
        };
        WaveScale { amplitude, frequency, speed }
    }

    pub fn all() -> &'static [SurfaceWaveMode] {
        &[
            SurfaceWaveMode::None,
            SurfaceWaveMode::Gentle,
            SurfaceWaveMode::Moderate,
            SurfaceWaveMode::Intense,
            SurfaceWaveMode::Storm,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            SurfaceWaveMode::None => "none",
            SurfaceWaveMode::Gentle => "gentle",
            SurfaceWaveMode::Moderate => "moderate",
            SurfaceWaveMode::Intense => "intense",
            SurfaceWaveMode::Storm => "storm",
        }
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|m| m == self).unwrap_or(0);
        all[(current + 1) % all.len()]
    }
}

impl FromStr for SurfaceWaveMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|m| m.name() == s.to_lowercase())
            .ok_or_else(|| format!("Unknown wave mode: {}", s))
    }
}

/// Source position for destination pixel (x, y).
pub fn displace(x: usize, y: usize, width: usize, height: usize, scale: WaveScale, time: f32) -> (usize, usize) {
    let amp = BASE_AMPLITUDE * scale.amplitude;
    let freq = BASE_FREQUENCY * scale.frequency;
    let t = time * BASE_SPEED * scale.speed;

    let xf = x as f32;
    let yf = y as f32;
    let dx = amp * (yf * freq + t).sin() + amp * 0.5 * ((xf + yf) * freq * 0.7 + t * 1.3).sin();
    let dy = amp * (xf * freq + t * 0.8).sin();

    let rx = xf - width as f32 * 0.5;
    let ry = yf - height as f32 * 0.5;
    let radius = (rx * rx + ry * ry).sqrt();
    let (ux, uy) = if radius > 0.0 { (rx / radius, ry / radius) } else { (0.0, 0.0) };
    let ripple = amp * 0.5 * (radius * freq * 1.5 - t * 2.0).sin();

    let sx = (xf + dx + ripple * ux).round().clamp(0.0, (width - 1) as f32);
    let sy = (yf + dy + ripple * uy).round().clamp(0.0, (height - 1) as f32);
    (sx as usize, sy as usize)
}

/// Remap every pixel of `canvas` from `snapshot`.
pub fn apply(canvas: &mut Canvas, snapshot: &[u8], mode: SurfaceWaveMode, time: f32) {
    if mode == SurfaceWaveMode::None {
        return;
    }
    let scale = mode.scale();
    let (w, h) = (canvas.width(), canvas.height());
    let out = canvas.as_bytes_mut();
    for y in 0..h {
        for x in 0..w {
            let (sx, sy) = displace(x, y, w, h, scale, time);
            let dst = (y * w + x) * 4;
            let src = (sy * w + sx) * 4;
            out[dst..dst + 4].copy_from_slice(&snapshot[src..src + 4]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipliers_grow_with_mode() {
        let amps: Vec<f32> = SurfaceWaveMode::all().iter().map(|m| m.scale().amplitude).collect();
        assert!(amps.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(SurfaceWaveMode::Storm.scale().amplitude, 2.5);
    }

    #[test]
    fn zero_scale_is_identity() {
        let zero = SurfaceWaveMode::None.scale();
        for (x, y) in [(0, 0), (7, 3), (19, 9)] {
            assert_eq!(displace(x, y, 20, 10, zero, 4.2), (x, y));
        }
    }

    #[test]
    fn displacement_stays_in_bounds() {
        let storm = SurfaceWaveMode::Storm.scale();
        for y in 0..12 {
            for x in 0..16 {
                let (sx, sy) = displace(x, y, 16, 12, storm, 1.1);
                assert!(sx < 16 && sy < 12);
            }
        }
    }

    #[test]
    fn parse_names() {
        assert_eq!("Storm".parse::<SurfaceWaveMode>(), Ok(SurfaceWaveMode::Storm));
        assert!("hurricane".parse::<SurfaceWaveMode>().is_err());
    }
}
