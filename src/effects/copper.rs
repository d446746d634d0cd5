//! Horizontal copper bars with sinusoidal vertical motion.
//!
//! Every bar paints an edge-to-center-to-edge gradient from its own slice of
//! the palette. Rows are computed once and then filled, so each pixel is
//! still written exactly once per frame.

use serde::{Deserialize, Serialize};

use super::clamp_param;
use crate::color::{Palette, Rgb};
use crate::renderer::Canvas;

/// Brightness of odd rows when scanlines are enabled.
const SCANLINE_DIM: f32 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopperParams {
    pub bar_count: u32,
    /// Full bar thickness in pixels.
    pub bar_height: f32,
    /// Oscillation amplitude as a fraction of the canvas height.
    pub amplitude: f32,
    pub speed: f32,
    pub scanlines: bool,
}

impl Default for CopperParams {
    fn default() -> Self {
        Self {
            bar_count: 3,
            bar_height: 40.0,
            amplitude: 0.15,
            speed: 1.0,
            scanlines: false,
        }
    }
}

impl CopperParams {
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        Self {
            bar_count: self.bar_count.clamp(1, 16),
            bar_height: clamp_param(self.bar_height, 2.0, 200.0, d.bar_height),
            amplitude: clamp_param(self.amplitude, 0.0, 0.5, d.amplitude),
            speed: clamp_param(self.speed, 0.0, 10.0, d.speed),
            scanlines: self.scanlines,
        }
    }
}

/// One bar's placement for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CopperBar {
    pub center: f32,
    pub half_height: f32,
    /// Palette slice `[start, end)` this bar draws from.
    pub slice: (usize, usize),
}

impl CopperBar {
    /// Gradient intensity at row `y`: 1.0 at the center, falling linearly to 0
    /// at the edges.
    #[inline]
    pub fn intensity(&self, y: f32) -> f32 {
        (1.0 - (y - self.center).abs() / self.half_height).clamp(0.0, 1.0)
    }
}

/// Bar layout at `time` for a canvas of `height` rows.
pub fn layout_bars(params: &CopperParams, height: usize, palette_len: usize, time: f32) -> Vec<CopperBar> {
    let params = params.clamped();
    let count = params.bar_count as usize;
    let h = height as f32;
    (0..count)
        .map(|i| {
            let base = h * (i + 1) as f32 / (count + 1) as f32;
            let phase = time * params.speed * (1.0 + 0.25 * i as f32);
            CopperBar {
                center: base + params.amplitude * h * phase.sin(),
                half_height: params.bar_height * 0.5,
                slice: (i * palette_len / count, (i + 1) * palette_len / count),
            }
        })
        .collect()
}

/// Color of row `y`, or `None` when no bar covers it.
pub fn row_color(bars: &[CopperBar], y: usize, palette: &Palette) -> Option<Rgb> {
    let yf = y as f32;
    bars.iter()
        .filter_map(|bar| {
            let intensity = bar.intensity(yf);
            (intensity > 0.0).then(|| palette.color_in_slice(bar.slice.0, bar.slice.1, intensity))
        })
        .reduce(Rgb::max)
}

fn scanline(color: Rgb, y: usize, enabled: bool) -> Rgb {
    if enabled && y % 2 == 1 {
        color.scale(SCANLINE_DIM)
    } else {
        color
    }
}

/// Render bars over a black background.
pub fn render(canvas: &mut Canvas, params: &CopperParams, palette: &Palette, time: f32) {
    let params = params.clamped();
    let bars = layout_bars(&params, canvas.height(), palette.len(), time);
    for y in 0..canvas.height() {
        let color = row_color(&bars, y, palette).unwrap_or(Rgb::BLACK);
        fill_row(canvas, y, scanline(color, y, params.scanlines));
    }
}

/// Composite bars over the existing canvas contents with `blend`; rows
/// without a bar are left untouched.
pub fn composite<B>(canvas: &mut Canvas, params: &CopperParams, palette: &Palette, time: f32, blend: B)
where
    B: Fn(Rgb, Rgb) -> Rgb,
{
    let params = params.clamped();
    let bars = layout_bars(&params, canvas.height(), palette.len(), time);
    for y in 0..canvas.height() {
        let Some(color) = row_color(&bars, y, palette) else {
            continue;
        };
        let color = scanline(color, y, params.scanlines);
        for px in canvas.row_mut(y).chunks_exact_mut(4) {
            let mixed = blend(Rgb::new(px[0], px[1], px[2]), color);
            px.copy_from_slice(&[mixed.r, mixed.g, mixed.b, 255]);
        }
    }
}

fn fill_row(canvas: &mut Canvas, y: usize, color: Rgb) {
    for px in canvas.row_mut(y).chunks_exact_mut(4) {
        px.copy_from_slice(&[color.r, color.g, color.b, 255]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{PaletteKind, PALETTE_SIZE};

    #[test]
    fn three_bars_start_at_quarter_points() {
        let params = CopperParams { bar_count: 3, ..Default::default() };
        let bars = layout_bars(&params, 400, PALETTE_SIZE, 0.0);
        let centers: Vec<f32> = bars.iter().map(|b| b.center).collect();
        assert_eq!(centers, vec![100.0, 200.0, 300.0]);
        assert_eq!(bars[0].intensity(100.0), 1.0);
        assert_eq!(bars[0].slice, (0, 21));
        assert_eq!(bars[2].slice, (42, 64));
    }

    #[test]
    fn intensity_falls_off_to_edges() {
        let bar = CopperBar { center: 50.0, half_height: 10.0, slice: (0, 64) };
        assert_eq!(bar.intensity(55.0), 0.5);
        assert_eq!(bar.intensity(60.0), 0.0);
        assert_eq!(bar.intensity(90.0), 0.0);
    }

    #[test]
    fn overlapping_bars_take_the_maximum() {
        let palette = PaletteKind::Grayscale.build(PALETTE_SIZE);
        let a = CopperBar { center: 10.0, half_height: 10.0, slice: (0, 64) };
        let b = CopperBar { center: 14.0, half_height: 10.0, slice: (0, 64) };
        let color = row_color(&[a, b], 14, &palette).unwrap();
        assert_eq!(color, palette.get(63));
    }

    #[test]
    fn uncovered_rows_are_black() {
        let palette = PaletteKind::Copper.build(PALETTE_SIZE);
        let params = CopperParams { bar_count: 1, bar_height: 4.0, amplitude: 0.0, ..Default::default() };
        let mut canvas = Canvas::new(8, 100);
        render(&mut canvas, &params, &palette, 0.0);
        assert_eq!(canvas.get_pixel(3, 0), Rgb::BLACK);
        assert_ne!(canvas.get_pixel(3, 50), Rgb::BLACK);
    }
}
