//! Procedural effect library.
//!
//! Per-pixel effects build a kernel once per frame (capturing canvas size,
//! time and clamped parameters) and implement [`PixelKernel`]; the shared
//! driver then writes every pixel exactly once. Object-based effects
//! (starfield, grid) clear the canvas and draw a bounded number of shapes.

pub mod combined;
pub mod copper;
pub mod fire;
pub mod fractal;
pub mod grid;
pub mod metaballs;
pub mod noise;
pub mod plasma;
mod polar;
pub mod ripples;
pub mod rotozoom;
pub mod starfield;
pub mod tunnel;
pub mod twister;

pub use combined::{BlendMode, CombinedParams};
pub use copper::CopperParams;
pub use fire::FireParams;
pub use fractal::FractalParams;
pub use grid::GridParams;
pub use metaballs::MetaballParams;
pub use noise::NoiseParams;
pub use plasma::PlasmaParams;
pub use ripples::RippleParams;
pub use rotozoom::RotozoomParams;
pub use starfield::StarfieldParams;
pub use tunnel::TunnelParams;
pub use twister::TwisterParams;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::color::{Palette, Rgb};
use crate::renderer::{fill_pixels, Canvas};

/// Uniform interface of the per-pixel effects.
pub trait PixelKernel {
    fn shade(&self, x: usize, y: usize, palette: &Palette) -> Rgb;
}

/// `v` limited to `[lo, hi]`. NaN maps to `default`, since `f32::clamp`
/// passes it through.
#[inline]
pub(crate) fn clamp_param(v: f32, lo: f32, hi: f32, default: f32) -> f32 {
    if v.is_nan() {
        default
    } else {
        v.clamp(lo, hi)
    }
}

/// Fill the whole canvas from `kernel`.
pub fn render_kernel<K: PixelKernel>(canvas: &mut Canvas, kernel: &K, palette: &Palette) {
    fill_pixels(canvas, |x, y| kernel.shade(x, y, palette));
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EffectKind {
    #[default]
    Plasma,
    CopperBars,
    Tunnel,
    Metaballs,
    Rotozoomer,
    Fire,
    Ripples,
    Fractal,
    Starfield,
    Twister,
    Grid,
    Noise,
    Combined,
}

impl FromStr for EffectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.to_lowercase().replace(['_', ' '], "-");
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.key() == key)
            .ok_or_else(|| format!("Unknown effect: {}", s))
    }
}

impl EffectKind {
    pub fn all() -> &'static [EffectKind] {
        &[
            EffectKind::Plasma,
            EffectKind::CopperBars,
            EffectKind::Tunnel,
            EffectKind::Metaballs,
            EffectKind::Rotozoomer,
            EffectKind::Fire,
            EffectKind::Ripples,
            EffectKind::Fractal,
            EffectKind::Starfield,
            EffectKind::Twister,
            EffectKind::Grid,
            EffectKind::Noise,
            EffectKind::Combined,
        ]
    }

    /// Config/CLI spelling.
    pub fn key(&self) -> &'static str {
        match self {
            EffectKind::Plasma => "plasma",
            EffectKind::CopperBars => "copper-bars",
            EffectKind::Tunnel => "tunnel",
            EffectKind::Metaballs => "metaballs",
            EffectKind::Rotozoomer => "rotozoomer",
            EffectKind::Fire => "fire",
            EffectKind::Ripples => "ripples",
            EffectKind::Fractal => "fractal",
            EffectKind::Starfield => "starfield",
            EffectKind::Twister => "twister",
            EffectKind::Grid => "grid",
            EffectKind::Noise => "noise",
            EffectKind::Combined => "combined",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::Plasma => "Plasma",
            EffectKind::CopperBars => "Copper Bars",
            EffectKind::Tunnel => "Tunnel",
            EffectKind::Metaballs => "Metaballs",
            EffectKind::Rotozoomer => "Rotozoomer",
            EffectKind::Fire => "Fire",
            EffectKind::Ripples => "Ripples",
            EffectKind::Fractal => "Fractal",
            EffectKind::Starfield => "Starfield",
            EffectKind::Twister => "Twister",
            EffectKind::Grid => "Grid",
            EffectKind::Noise => "Noise",
            EffectKind::Combined => "Plasma + Copper",
        }
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|k| k == self).unwrap_or(0);
        all[(current + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|k| k == self).unwrap_or(0);
        all[(current + all.len() - 1) % all.len()]
    }
}

/// Knobs for every effect. Only the selected effect's record is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectParams {
    pub plasma: PlasmaParams,
    pub copper: CopperParams,
    pub tunnel: TunnelParams,
    pub metaballs: MetaballParams,
    pub rotozoom: RotozoomParams,
    pub fire: FireParams,
    pub ripples: RippleParams,
    pub fractal: FractalParams,
    pub starfield: StarfieldParams,
    pub twister: TwisterParams,
    pub grid: GridParams,
    pub noise: NoiseParams,
    pub combined: CombinedParams,
}

impl EffectParams {
    pub fn clamped(&self) -> Self {
        Self {
            plasma: self.plasma.clamped(),
            copper: self.copper.clamped(),
            tunnel: self.tunnel.clamped(),
            metaballs: self.metaballs.clamped(),
            rotozoom: self.rotozoom.clamped(),
            fire: self.fire.clamped(),
            ripples: self.ripples.clamped(),
            fractal: self.fractal.clamped(),
            starfield: self.starfield.clamped(),
            twister: self.twister.clamped(),
            grid: self.grid.clamped(),
            noise: self.noise.clamped(),
            combined: self.combined,
        }
    }
}

/// Render `kind` into `canvas`, overwriting every pixel.
pub fn render_effect(canvas: &mut Canvas, kind: EffectKind, params: &EffectParams, palette: &Palette, time: f32) {
    let (w, h) = (canvas.width(), canvas.height());
    match kind {
        EffectKind::Plasma => render_kernel(canvas, &plasma::Plasma::new(&params.plasma, w, h, time), palette),
        EffectKind::CopperBars => copper::render(canvas, &params.copper, palette, time),
        EffectKind::Tunnel => render_kernel(canvas, &tunnel::Tunnel::new(&params.tunnel, w, h, time), palette),
        EffectKind::Metaballs => {
            render_kernel(canvas, &metaballs::Metaballs::new(&params.metaballs, w, h, time), palette)
        }
        EffectKind::Rotozoomer => {
            render_kernel(canvas, &rotozoom::Rotozoom::new(&params.rotozoom, w, h, time), palette)
        }
        EffectKind::Fire => render_kernel(canvas, &fire::Fire::new(&params.fire, w, h, time), palette),
        EffectKind::Ripples => render_kernel(canvas, &ripples::Ripples::new(&params.ripples, w, h, time), palette),
        EffectKind::Fractal => render_kernel(canvas, &fractal::Fractal::new(&params.fractal, w, h, time), palette),
        EffectKind::Starfield => starfield::render(canvas, &params.starfield, palette, time),
        EffectKind::Twister => render_kernel(canvas, &twister::Twister::new(&params.twister, w, h, time), palette),
        EffectKind::Grid => grid::render(canvas, &params.grid, palette, time),
        EffectKind::Noise => render_kernel(canvas, &noise::Noise::new(&params.noise, w, h, time), palette),
        EffectKind::Combined => combined::render(
            canvas,
            &params.plasma,
            &params.copper,
            &params.combined,
            palette,
            time,
        ),
    }
}
