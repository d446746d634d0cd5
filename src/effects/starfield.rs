//! Object-based star field flying out of the screen center.

use serde::{Deserialize, Serialize};

use super::polar::{fract, hash01, polar_to_grid};
use super::clamp_param;
use crate::color::{Palette, Rgb};
use crate::renderer::Canvas;

const SEED_ANGLE: u32 = 0x51A7;
const SEED_SPREAD: u32 = 0x0B17;
const SEED_PHASE: u32 = 0xF1E1;
/// Nearest projection depth; stars are recycled before reaching the viewer.
const NEAR_PLANE: f32 = 0.02;
const MAX_STAR_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldParams {
    pub star_count: u32,
    pub speed: f32,
    /// Brightness above which a star gets a glow ring.
    pub glow_threshold: f32,
}

impl Default for StarfieldParams {
    fn default() -> Self {
        Self {
            star_count: 400,
            speed: 1.0,
            glow_threshold: 0.75,
        }
    }
}

impl StarfieldParams {
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        Self {
            star_count: self.star_count.clamp(1, 4096),
            speed: clamp_param(self.speed, 0.0, 10.0, d.speed),
            glow_threshold: clamp_param(self.glow_threshold, 0.0, 1.0, d.glow_threshold),
        }
    }
}

/// One projected star for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    /// `1 - depth`, in `[0, 1)`.
    pub brightness: f32,
    pub size: usize,
}

/// Project star `i` at `time`. `None` when it falls outside the canvas.
pub fn project_star(i: u32, params: &StarfieldParams, width: usize, height: usize, time: f32) -> Option<Star> {
    let angle = hash01(i, SEED_ANGLE) * std::f32::consts::TAU;
    let spread = 0.05 + 0.95 * hash01(i, SEED_SPREAD);
    let depth = (1.0 - fract(hash01(i, SEED_PHASE) + time * params.speed * 0.2)).max(NEAR_PLANE);

    let cx = width as f32 * 0.5;
    let cy = height as f32 * 0.5;
    let reach = cx.max(cy) * spread * 0.5 / depth;
    let (x, y) = polar_to_grid(cx, cy, angle, reach);
    if x < 0.0 || y < 0.0 || x >= width as f32 || y >= height as f32 {
        return None;
    }

    let brightness = 1.0 - depth;
    Some(Star {
        x,
        y,
        brightness,
        size: 1 + (brightness * (MAX_STAR_SIZE - 1) as f32) as usize,
    })
}

pub fn render(canvas: &mut Canvas, params: &StarfieldParams, palette: &Palette, time: f32) {
    let params = params.clamped();
    canvas.clear();
    let (w, h) = (canvas.width(), canvas.height());

    for i in 0..params.star_count {
        let Some(star) = project_star(i, &params, w, h, time) else {
            continue;
        };
        let color = palette.color_at(star.brightness);
        let x0 = star.x as isize - (star.size / 2) as isize;
        let y0 = star.y as isize - (star.size / 2) as isize;
        let size = star.size as isize;

        if star.brightness > params.glow_threshold {
            draw_glow(canvas, x0, y0, size, color.scale(0.5));
        }
        for dy in 0..size {
            for dx in 0..size {
                canvas.max_pixel(x0 + dx, y0 + dy, color);
            }
        }
    }
}

/// One-pixel ring around the star square.
fn draw_glow(canvas: &mut Canvas, x0: isize, y0: isize, size: isize, color: Rgb) {
    for d in -1..=size {
        canvas.max_pixel(x0 + d, y0 - 1, color);
        canvas.max_pixel(x0 + d, y0 + size, color);
        canvas.max_pixel(x0 - 1, y0 + d, color);
        canvas.max_pixel(x0 + size, y0 + d, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{PaletteKind, PALETTE_SIZE};

    #[test]
    fn projection_is_deterministic_and_on_screen() {
        let params = StarfieldParams::default();
        for i in 0..params.star_count {
            let a = project_star(i, &params, 320, 200, 1.5);
            assert_eq!(a, project_star(i, &params, 320, 200, 1.5));
            if let Some(star) = a {
                assert!(star.x >= 0.0 && star.x < 320.0);
                assert!(star.y >= 0.0 && star.y < 200.0);
                assert!(star.size >= 1 && star.size <= MAX_STAR_SIZE);
            }
        }
    }

    #[test]
    fn render_clears_previous_contents() {
        let palette = PaletteKind::Grayscale.build(PALETTE_SIZE);
        let mut canvas = Canvas::new(64, 48);
        canvas.fill(Rgb::WHITE);
        let params = StarfieldParams { star_count: 1, ..Default::default() };
        render(&mut canvas, &params, &palette, 0.0);
        let lit = canvas
            .as_bytes()
            .chunks_exact(4)
            .filter(|px| px[..3] != [0, 0, 0])
            .count();
        assert!(lit <= 36, "expected at most one star and its glow, got {lit}");
    }
}
