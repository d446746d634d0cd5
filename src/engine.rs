//! Per-frame orchestration: clock, buffer mode, effect, post chain, present.

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::clock::AnimationClock;
use crate::color::{Palette, PaletteBank, PALETTE_SIZE};
use crate::display::{BufferMode, FrameBuffers};
use crate::effects::{self, EffectKind, EffectParams};
use crate::error::EngineError;
use crate::postfx::{PostChain, PostSettings};
use crate::renderer::Canvas;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    pub buffer_mode: BufferMode,
    /// Cap on total pixel memory across the buffer set.
    pub memory_limit: Option<usize>,
    pub palette_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 200,
            buffer_mode: BufferMode::Double,
            memory_limit: None,
            palette_size: PALETTE_SIZE,
        }
    }
}

/// Every knob for one tick. Built by the host and never retained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    pub effect: EffectKind,
    pub palette: usize,
    pub effects: EffectParams,
    pub post: PostSettings,
    pub buffer_mode: BufferMode,
    pub speed: f32,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            effect: EffectKind::default(),
            palette: 0,
            effects: EffectParams::default(),
            post: PostSettings::default(),
            buffer_mode: BufferMode::default(),
            speed: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    Presented,
    /// Called before a frame interval elapsed.
    Skipped,
    /// Rendering failed; the visible surface still shows the previous frame.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameResult {
    pub outcome: FrameOutcome,
    pub time: f32,
    pub delta_time: f32,
    pub fps: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingSample {
    pub time: f32,
    pub fps: u32,
}

pub struct Engine {
    config: EngineConfig,
    palettes: PaletteBank,
    buffers: FrameBuffers,
    clock: AnimationClock,
    post: PostChain,
    current_effect: Option<EffectKind>,
    failed_frames: u64,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let buffers = FrameBuffers::new(config.buffer_mode, config.width, config.height, config.memory_limit)?;
        let palettes = PaletteBank::builtin(config.palette_size);
        info!(
            "Engine ready: {}x{}, {} palettes of {} entries",
            config.width,
            config.height,
            palettes.len(),
            config.palette_size
        );

        Ok(Self {
            config,
            palettes,
            buffers,
            clock: AnimationClock::new(),
            post: PostChain::new(),
            current_effect: None,
            failed_frames: 0,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The visible surface.
    pub fn surface(&self) -> &Canvas {
        self.buffers.front()
    }

    pub fn buffers(&self) -> &FrameBuffers {
        &self.buffers
    }

    pub fn buffer_mode(&self) -> BufferMode {
        self.buffers.mode()
    }

    pub fn palettes(&self) -> &PaletteBank {
        &self.palettes
    }

    pub fn timing(&self) -> TimingSample {
        TimingSample {
            time: self.clock.time(),
            fps: self.clock.fps(),
        }
    }

    pub fn failed_frames(&self) -> u64 {
        self.failed_frames
    }

    /// Jump the animation to `time`.
    pub fn seek(&mut self, time: f32) {
        self.clock.seek(time);
    }

    /// Reallocate the buffer set at a new size. On failure the old set stays.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), EngineError> {
        if width == self.config.width && height == self.config.height {
            return Ok(());
        }
        let buffers = FrameBuffers::new(self.buffers.mode(), width, height, self.config.memory_limit)?;
        info!("Surface resized to {}x{}", width, height);
        self.buffers = buffers;
        self.config.width = width;
        self.config.height = height;
        Ok(())
    }

    pub fn tick(&mut self, wall_delta: Duration, params: &FrameParams) -> FrameResult {
        self.tick_with(wall_delta, params, |canvas, params, palette, time| {
            effects::render_effect(canvas, params.effect, &params.effects, palette, time);
            Ok(())
        })
    }

    /// Tick with `render` in place of the effect library. The post chain and
    /// presentation still run.
    pub fn tick_with<R>(&mut self, wall_delta: Duration, params: &FrameParams, render: R) -> FrameResult
    where
        R: FnOnce(&mut Canvas, &FrameParams, &Palette, f32) -> Result<(), EngineError>,
    {
        let sample = self.clock.tick(wall_delta, params.speed);
        self.apply_buffer_mode(params.buffer_mode);

        let result = |outcome| FrameResult {
            outcome,
            time: sample.time,
            delta_time: sample.delta_time,
            fps: sample.fps,
        };

        if !sample.advanced {
            debug!("Tick skipped after {:?}", wall_delta);
            return result(FrameOutcome::Skipped);
        }

        if self.current_effect != Some(params.effect) {
            info!("Effect: {}", params.effect.name());
            self.current_effect = Some(params.effect);
        }

        match self.render_frame(params, sample.time, render) {
            Ok(()) => result(FrameOutcome::Presented),
            Err(e) => {
                self.failed_frames += 1;
                error!("Frame at t={:.3} failed: {}", sample.time, e);
                result(FrameOutcome::Failed(e.to_string()))
            }
        }
    }

    /// Render one frame at `time` into a fresh canvas, leaving the clock and
    /// buffer set alone.
    pub fn render_still(&self, params: &FrameParams, time: f32) -> Result<Canvas, EngineError> {
        if !time.is_finite() {
            return Err(EngineError::NonFiniteTime(time));
        }
        let mut canvas = Canvas::try_new(self.config.width, self.config.height)?;
        let palette = self.palettes.get(params.palette);
        effects::render_effect(&mut canvas, params.effect, &params.effects, palette, time);
        PostChain::new().apply(&mut canvas, &params.post, time);
        Ok(canvas)
    }

    fn apply_buffer_mode(&mut self, mode: BufferMode) {
        let previous = self.buffers.mode();
        match self.buffers.set_mode(mode) {
            Ok(true) => info!("Buffer mode {} -> {}", previous.name(), mode.name()),
            Ok(false) => {}
            Err(e) => warn!("Staying in {} buffering: {}", previous.name(), e),
        }
    }

    fn render_frame<R>(&mut self, params: &FrameParams, time: f32, render: R) -> Result<(), EngineError>
    where
        R: FnOnce(&mut Canvas, &FrameParams, &Palette, f32) -> Result<(), EngineError>,
    {
        if !time.is_finite() {
            return Err(EngineError::NonFiniteTime(time));
        }

        let palette = self.palettes.get(params.palette);
        let work = self.buffers.work_mut();
        let post = &mut self.post;

        let rendered = panic::catch_unwind(AssertUnwindSafe(|| -> Result<(), EngineError> {
            render(&mut *work, params, palette, time)?;
            post.apply(&mut *work, &params.post, time);
            work.validate()
        }));

        match rendered {
            Ok(Ok(())) => self.buffers.present(),
            Ok(Err(e)) => Err(e),
            Err(payload) => Err(EngineError::Panic(panic_message(payload.as_ref()))),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
