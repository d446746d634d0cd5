use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::str::FromStr;

use super::Palette;

/// Built-in palette presets, in bank order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaletteKind {
    #[default]
    Fire,
    Ocean,
    Rainbow,
    Psychedelic,
    Copper,
    Grayscale,
    Forest,
    Sunset,
}

impl FromStr for PaletteKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fire" => Ok(Self::Fire),
            "ocean" => Ok(Self::Ocean),
            "rainbow" => Ok(Self::Rainbow),
            "psychedelic" | "acid" => Ok(Self::Psychedelic),
            "copper" => Ok(Self::Copper),
            "gray" | "grey" | "grayscale" | "mono" => Ok(Self::Grayscale),
            "forest" => Ok(Self::Forest),
            "sunset" => Ok(Self::Sunset),
            _ => Err(format!("Unknown palette: {}", s)),
        }
    }
}

impl PaletteKind {
    /// Continuous generator for this ramp: `t` in `[0, 1]` to channels in `[0, 255]`.
    pub fn sample(&self, t: f32) -> [f32; 3] {
        match self {
            PaletteKind::Fire => {
                // Black -> red -> yellow -> white
                let t3 = t * 3.0;
                [t3 * 255.0, (t3 - 1.0) * 255.0, (t3 - 2.0) * 255.0]
            }
            PaletteKind::Ocean => {
                // Deep blue -> cyan -> foam
                hsl(200.0 - t * 30.0, 0.85, 0.08 + t * 0.72)
            }
            PaletteKind::Rainbow => hsl(t * 360.0, 0.9, 0.5),
            PaletteKind::Psychedelic => {
                let r = 0.5 + 0.5 * (TAU * (t + 0.00)).cos();
                let g = 0.5 + 0.5 * (TAU * (t + 0.33)).cos();
                let b = 0.5 + 0.5 * (TAU * (t + 0.67)).cos();
                [r * 255.0, g * 255.0, b * 255.0]
            }
            PaletteKind::Copper => {
                // Dark bronze -> polished copper -> pale gold
                hsl(18.0 + t * 27.0, 0.75, 0.05 + t * 0.75)
            }
            PaletteKind::Grayscale => [t * 255.0; 3],
            PaletteKind::Forest => hsl(80.0 + t * 60.0, 0.75, 0.05 + t * 0.55),
            PaletteKind::Sunset => {
                // Deep purple -> magenta -> orange -> yellow
                hsl(280.0 + t * 135.0, 0.85, 0.15 + t * 0.5)
            }
        }
    }

    pub fn build(&self, count: usize) -> Palette {
        Palette::generate(|t| self.sample(t), count)
    }

    pub fn name(&self) -> &'static str {
        match self {
            PaletteKind::Fire => "Fire",
            PaletteKind::Ocean => "Ocean",
            PaletteKind::Rainbow => "Rainbow",
            PaletteKind::Psychedelic => "Psychedelic",
            PaletteKind::Copper => "Copper",
            PaletteKind::Grayscale => "Grayscale",
            PaletteKind::Forest => "Forest",
            PaletteKind::Sunset => "Sunset",
        }
    }

    pub fn all() -> &'static [PaletteKind] {
        &[
            PaletteKind::Fire,
            PaletteKind::Ocean,
            PaletteKind::Rainbow,
            PaletteKind::Psychedelic,
            PaletteKind::Copper,
            PaletteKind::Grayscale,
            PaletteKind::Forest,
            PaletteKind::Sunset,
        ]
    }

    /// Position in the palette bank.
    pub fn index(&self) -> usize {
        Self::all().iter().position(|c| c == self).unwrap_or(0)
    }

    /// Kind at a bank index, clamped like the bank itself.
    pub fn from_index(index: usize) -> Self {
        let all = Self::all();
        all[index.min(all.len() - 1)]
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

/// HSL (hue in degrees) to float sRGB channels in `[0, 255]`.
fn hsl(h: f32, s: f32, l: f32) -> [f32; 3] {
    let rgb: Srgb = Hsl::new(h, s, l).into_color();
    [rgb.red * 255.0, rgb.green * 255.0, rgb.blue * 255.0]
}
