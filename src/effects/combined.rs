//! Plasma base with copper bars composited on top.
//!
//! Only this pair is combinable; the blend operator is the one knob.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::copper::{self, CopperParams};
use super::plasma::{Plasma, PlasmaParams};
use super::render_kernel;
use crate::color::{Palette, Rgb};
use crate::renderer::Canvas;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    #[default]
    Screen,
    Multiply,
}

impl BlendMode {
    pub fn apply(&self, base: Rgb, top: Rgb) -> Rgb {
        match self {
            BlendMode::Screen => base.screen(top),
            BlendMode::Multiply => base.multiply(top),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombinedParams {
    pub blend: BlendMode,
}

pub fn render(
    canvas: &mut Canvas,
    plasma: &PlasmaParams,
    bars: &CopperParams,
    combined: &CombinedParams,
    palette: &Palette,
    time: f32,
) {
    let kernel = Plasma::new(plasma, canvas.width(), canvas.height(), time);
    render_kernel(canvas, &kernel, palette);
    let blend = combined.blend;
    copper::composite(canvas, bars, palette, time, |base, top| blend.apply(base, top));
}
