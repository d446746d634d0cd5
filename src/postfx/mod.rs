//! Post-processing chain: bloom, then chromatic aberration, then surface
//! wave. Every pass is a strict no-op when disabled.

pub mod aberration;
pub mod bloom;
pub mod wave;

pub use wave::SurfaceWaveMode;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::renderer::Canvas;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostSettings {
    /// Bloom weight, 0 to 1.
    pub bloom: f32,
    /// Channel offset as a fraction of the width, 0 to 0.05.
    pub aberration: f32,
    pub wave: SurfaceWaveMode,
}

impl PostSettings {
    pub fn clamped(&self) -> Self {
        Self {
            bloom: if self.bloom.is_nan() { 0.0 } else { self.bloom.clamp(0.0, 1.0) },
            aberration: if self.aberration.is_nan() { 0.0 } else { self.aberration.clamp(0.0, 0.05) },
            wave: self.wave,
        }
    }

    pub fn is_passthrough(&self) -> bool {
        let s = self.clamped();
        s.bloom == 0.0 && s.aberration == 0.0 && s.wave == SurfaceWaveMode::None
    }
}

/// Runs the passes in order, reusing one snapshot buffer across frames.
#[derive(Debug, Default)]
pub struct PostChain {
    snapshot: Vec<u8>,
}

impl PostChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, canvas: &mut Canvas, settings: &PostSettings, time: f32) {
        let settings = settings.clamped();

        if settings.bloom > 0.0 {
            self.take_snapshot(canvas);
            bloom::apply(canvas, &self.snapshot, settings.bloom);
        }

        let offset = aberration::offset_for(settings.aberration, canvas.width());
        if offset > 0 {
            self.take_snapshot(canvas);
            aberration::shift_channels(canvas, &self.snapshot, offset);
        }

        if settings.wave != SurfaceWaveMode::None {
            self.take_snapshot(canvas);
            wave::apply(canvas, &self.snapshot, settings.wave, time);
        }

        trace!(?settings, offset, "post chain applied");
    }

    fn take_snapshot(&mut self, canvas: &Canvas) {
        self.snapshot.clear();
        self.snapshot.extend_from_slice(canvas.as_bytes());
    }
}
