//! Fixed-step animation clock driven by wall-clock deltas.

use std::collections::VecDeque;
use std::time::Duration;

/// Minimum wall time between advances.
pub const FRAME_INTERVAL: Duration = Duration::from_nanos(16_666_667);
/// Seconds of animation time added per advance at speed 1.
pub const FRAME_STEP: f64 = 1.0 / 60.0;

pub const MIN_SPEED: f32 = 0.1;
pub const MAX_SPEED: f32 = 3.0;

const FPS_WINDOW: Duration = Duration::from_secs(1);
const FPS_CAP: usize = 120;

pub fn clamp_speed(speed: f32) -> f32 {
    if speed.is_nan() {
        1.0
    } else {
        speed.clamp(MIN_SPEED, MAX_SPEED)
    }
}

/// Counts callbacks within the trailing one-second window.
#[derive(Debug, Default)]
pub struct FpsCounter {
    stamps: VecDeque<Duration>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a callback at `now` (elapsed since the counter's epoch).
    pub fn record(&mut self, now: Duration) {
        self.stamps.push_back(now);
        while let Some(&front) = self.stamps.front() {
            if now.saturating_sub(front) > FPS_WINDOW {
                self.stamps.pop_front();
            } else {
                break;
            }
        }
        // Zero-length ticks never age out of the window.
        if self.stamps.len() > FPS_CAP {
            self.stamps.pop_front();
        }
    }

    pub fn fps(&self) -> u32 {
        self.stamps.len().min(FPS_CAP) as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockSample {
    /// False when the tick came too soon and animation time did not move.
    pub advanced: bool,
    pub time: f32,
    /// Wall seconds since the previous advance.
    pub delta_time: f32,
    pub fps: u32,
}

#[derive(Debug, Default)]
pub struct AnimationClock {
    /// Kept in `f64` so a 1/60 s step still registers after days of
    /// runtime; kernels get the narrowed `f32`.
    time: f64,
    /// Wall time accumulated since the last advance.
    pending: Duration,
    /// Total wall time seen, the epoch for the FPS window.
    elapsed: Duration,
    fps: FpsCounter,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time(&self) -> f32 {
        self.time as f32
    }

    /// Animation time at full precision.
    pub fn seconds(&self) -> f64 {
        self.time
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    /// Set animation time directly. Pending wall time is discarded.
    pub fn seek(&mut self, time: f32) {
        self.time = time as f64;
        self.pending = Duration::ZERO;
    }

    pub fn tick(&mut self, wall_delta: Duration, speed: f32) -> ClockSample {
        self.elapsed += wall_delta;
        self.fps.record(self.elapsed);
        self.pending += wall_delta;

        if self.pending < FRAME_INTERVAL {
            return ClockSample {
                advanced: false,
                time: self.time(),
                delta_time: 0.0,
                fps: self.fps(),
            };
        }

        let delta_time = self.pending.as_secs_f32();
        self.pending = Duration::ZERO;
        self.time += FRAME_STEP * clamp_speed(speed) as f64;
        ClockSample {
            advanced: true,
            time: self.time(),
            delta_time,
            fps: self.fps(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_ticks_accumulate_before_advancing() {
        let mut clock = AnimationClock::new();
        assert!(!clock.tick(Duration::from_millis(5), 1.0).advanced);
        assert!(!clock.tick(Duration::from_millis(5), 1.0).advanced);
        let sample = clock.tick(Duration::from_millis(10), 1.0);
        assert!(sample.advanced);
        assert!((sample.delta_time - 0.020).abs() < 1e-6);
        assert!((sample.time - FRAME_STEP as f32).abs() < 1e-7);
    }

    #[test]
    fn one_long_tick_advances_once() {
        let mut clock = AnimationClock::new();
        let sample = clock.tick(Duration::from_millis(500), 2.0);
        assert!((sample.time - 2.0 / 60.0).abs() < 1e-7);
    }

    #[test]
    fn time_keeps_advancing_after_a_long_run() {
        let start = (1u32 << 19) as f32;
        let mut clock = AnimationClock::new();
        clock.seek(start);
        let mut last = clock.seconds();
        for _ in 0..600 {
            assert!(clock.tick(Duration::from_millis(20), 1.0).advanced);
            assert!(clock.seconds() > last);
            last = clock.seconds();
        }
        assert!((clock.seconds() - start as f64 - 10.0).abs() < 1e-6);
        assert!(clock.time() > start);
    }

    #[test]
    fn speed_is_clamped() {
        assert_eq!(clamp_speed(10.0), MAX_SPEED);
        assert_eq!(clamp_speed(0.0), MIN_SPEED);
        assert_eq!(clamp_speed(f32::NAN), 1.0);
    }

    #[test]
    fn fps_window_drops_stale_and_caps() {
        let mut fps = FpsCounter::new();
        for i in 0..200u64 {
            fps.record(Duration::from_millis(i));
        }
        assert_eq!(fps.fps(), 120);

        fps.record(Duration::from_secs(5));
        assert_eq!(fps.fps(), 1);
    }

    #[test]
    fn zero_length_ticks_stay_bounded() {
        let mut fps = FpsCounter::new();
        for _ in 0..10_000 {
            fps.record(Duration::ZERO);
        }
        assert_eq!(fps.stamps.len(), FPS_CAP);
        assert_eq!(fps.fps(), 120);
    }
}
