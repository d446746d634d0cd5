//! Object-based cell grid. Each cell is a flat block colored from a 2D sine
//! field sampled at the cell center; gaps between cells stay black.

use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::clamp_param;
use crate::color::Palette;
use crate::renderer::Canvas;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParams {
    pub cell_size: u32,
    pub gap: u32,
    pub frequency: f32,
    pub speed: f32,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            cell_size: 24,
            gap: 2,
            frequency: 2.0,
            speed: 1.0,
        }
    }
}

impl GridParams {
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        let cell_size = self.cell_size.clamp(2, 256);
        Self {
            cell_size,
            gap: self.gap.clamp(0, 16).min(cell_size - 1),
            frequency: clamp_param(self.frequency, 0.1, 16.0, d.frequency),
            speed: clamp_param(self.speed, 0.0, 10.0, d.speed),
        }
    }
}

/// Field value for the cell whose center sits at normalized `(u, v)`.
pub fn cell_value(u: f32, v: f32, params: &GridParams, time: f32) -> f32 {
    let f = params.frequency;
    let t = time * params.speed;
    (0.5 + 0.25 * (u * f * TAU + t).sin() + 0.25 * (v * f * TAU - t * 0.7).sin()).clamp(0.0, 1.0)
}

pub fn render(canvas: &mut Canvas, params: &GridParams, palette: &Palette, time: f32) {
    let params = params.clamped();
    canvas.clear();

    let cell = params.cell_size as usize;
    let gap = params.gap as usize;
    let cols = canvas.width().div_ceil(cell);
    let rows = canvas.height().div_ceil(cell);

    for row in 0..rows {
        for col in 0..cols {
            let u = (col as f32 + 0.5) / cols as f32;
            let v = (row as f32 + 0.5) / rows as f32;
            let color = palette.color_at(cell_value(u, v, &params, time));
            canvas.fill_rect(col * cell, row * cell, cell - gap, cell - gap, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{PaletteKind, Rgb, PALETTE_SIZE};

    #[test]
    fn gaps_stay_black() {
        let palette = PaletteKind::Grayscale.build(PALETTE_SIZE);
        let mut canvas = Canvas::new(40, 40);
        let params = GridParams { cell_size: 10, gap: 2, ..Default::default() };
        render(&mut canvas, &params, &palette, 0.3);
        assert_eq!(canvas.get_pixel(8, 3), Rgb::BLACK);
        assert_eq!(canvas.get_pixel(3, 9), Rgb::BLACK);
        let u = 0.5 / 4.0;
        let expected = palette.color_at(cell_value(u, u, &params, 0.3));
        assert_eq!(canvas.get_pixel(3, 3), expected);
    }

    #[test]
    fn gap_never_swallows_the_cell() {
        let p = GridParams { cell_size: 2, gap: 16, ..Default::default() }.clamped();
        assert_eq!(p.gap, 1);
    }
}
