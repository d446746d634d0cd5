//! Fixed-size color ramps sampled from continuous generator functions.

use super::{channel, PaletteKind, Rgb};

/// Number of entries in every built-in palette.
pub const PALETTE_SIZE: usize = 64;

/// An immutable, ordered color lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<Rgb>,
}

impl Palette {
    /// Sample `f` at `t = i / (count - 1)` for every `i` in `0..count`.
    ///
    /// `f` returns float channels nominally in `[0, 255]`; anything outside is
    /// clamped before storage. A single-entry palette samples `t = 0`.
    pub fn generate<F>(f: F, count: usize) -> Self
    where
        F: Fn(f32) -> [f32; 3],
    {
        let last = count.saturating_sub(1).max(1) as f32;
        let entries = (0..count)
            .map(|i| {
                let [r, g, b] = f(i as f32 / last);
                Rgb::new(channel(r), channel(g), channel(b))
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Rgb] {
        &self.entries
    }

    /// Entry at `index`, clamped to the last entry. Empty palettes yield black.
    #[inline]
    pub fn get(&self, index: usize) -> Rgb {
        match self.entries.len() {
            0 => Rgb::BLACK,
            n => self.entries[index.min(n - 1)],
        }
    }

    /// `floor(v * (len - 1))`, clamped to `[0, len - 1]`. NaN maps to 0.
    #[inline]
    pub fn index_for(&self, v: f32) -> usize {
        let last = self.entries.len().saturating_sub(1);
        if v.is_nan() || v <= 0.0 {
            return 0;
        }
        ((v * last as f32).floor() as usize).min(last)
    }

    /// Color for a normalized intensity.
    #[inline]
    pub fn color_at(&self, v: f32) -> Rgb {
        self.get(self.index_for(v))
    }

    /// Color for an intensity within the sub-range `[start, end)` of entries.
    /// Used by effects that give each object its own slice of the ramp.
    pub fn color_in_slice(&self, start: usize, end: usize, v: f32) -> Rgb {
        let end = end.min(self.entries.len());
        if start >= end {
            return self.get(start);
        }
        let span = end - start - 1;
        let offset = if v.is_nan() || v <= 0.0 {
            0
        } else {
            ((v * span as f32).floor() as usize).min(span)
        };
        self.get(start + offset)
    }
}

/// Every built-in palette, generated once at engine start.
#[derive(Debug, Clone)]
pub struct PaletteBank {
    palettes: Vec<Palette>,
}

impl PaletteBank {
    pub fn builtin(count: usize) -> Self {
        let palettes = PaletteKind::all()
            .iter()
            .map(|kind| kind.build(count))
            .collect();
        Self { palettes }
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    /// Palette at `index`; out-of-range indices clamp to the last palette.
    pub fn get(&self, index: usize) -> &Palette {
        let last = self.palettes.len().saturating_sub(1);
        &self.palettes[index.min(last)]
    }
}
