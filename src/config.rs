use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::cli::Args;
use crate::clock;
use crate::color::PALETTE_SIZE;
use crate::display::BufferMode;
use crate::effects::{EffectKind, EffectParams};
use crate::engine::{EngineConfig, FrameParams};
use crate::postfx::PostSettings;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineSection,
    pub effect: EffectSection,
    pub post: PostSettings,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    /// Render size. Zero means "fit the terminal".
    pub width: usize,
    pub height: usize,
    pub buffer_mode: BufferMode,
    pub speed: f32,
    pub memory_limit_bytes: Option<usize>,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            buffer_mode: BufferMode::Double,
            speed: 1.0,
            memory_limit_bytes: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSection {
    pub kind: EffectKind,
    pub palette: usize,
    /// One table per effect, e.g. `[effect.plasma]`.
    #[serde(flatten)]
    pub params: EffectParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub rotate_effects: bool,
    pub rotation_interval_secs: u64,
    pub target_fps: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            rotate_effects: false,
            rotation_interval_secs: 30,
            target_fps: 60,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Default XDG config path (~/.config/demofx/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("demofx").join("config.toml"))
    }

    /// Load config from the default path if it exists.
    /// Parse errors are logged and fall back to defaults.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            return None;
        }
        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Failed to parse config at {}: {}. Using defaults.", path.display(), e);
                None
            }
        }
    }

    /// Write the config template to the default path and return it.
    pub fn init_default_config() -> Result<PathBuf> {
        let path = Self::default_path().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, Self::generate_config_template())?;

        Ok(path)
    }

    /// Commented TOML template holding every default.
    pub fn generate_config_template() -> String {
        r#"# demofx configuration
# This file is auto-generated. Edit as needed.

[engine]
# Render size in pixels; 0 fits the terminal (two pixels per cell vertically)
width = 0
height = 0
# Buffering: "double" or "triple"
buffer_mode = "double"
# Animation speed multiplier (0.1-3.0)
speed = 1.0
# Cap on pixel memory across all buffers, in bytes
# memory_limit_bytes = 1048576

[effect]
# plasma, copper-bars, tunnel, metaballs, rotozoomer, fire, ripples,
# fractal, starfield, twister, grid, noise, combined
kind = "plasma"
# Palette index: 0 fire, 1 ocean, 2 rainbow, 3 psychedelic, 4 copper,
# 5 grayscale, 6 forest, 7 sunset
palette = 0

[effect.plasma]
x_freq = 6.0
y_freq = 4.0
# Four base waves always; above 0.33 adds a doubled-frequency product term,
# above 0.66 a high-frequency radial term
complexity = 0.5

[effect.copper]
bar_count = 3
bar_height = 40.0
amplitude = 0.15
speed = 1.0
scanlines = false

[effect.tunnel]
depth = 0.5
speed = 1.0
angular_repeats = 4
center_x = 0.5
center_y = 0.5

[effect.metaballs]
count = 5
radius = 0.1
threshold = 1.0
speed = 1.0

[effect.rotozoom]
zoom = 1.0
zoom_amount = 0.5
rotation_speed = 0.5
checker_size = 16.0
plasma_mix = 0.35

[effect.fire]
intensity = 1.0
turbulence = 0.8
flicker = 0.3
speed = 1.5

[effect.ripples]
sources = 3
wavelength = 0.06
speed = 1.0
damping = 4.0

[effect.fractal]
max_iterations = 64
center_x = -0.5
center_y = 0.0
zoom = 1.0
zoom_speed = 0.1
julia = false

[effect.starfield]
star_count = 400
speed = 1.0
glow_threshold = 0.75

[effect.twister]
twist = 3.0
speed = 1.0
frequency = 6.0

[effect.grid]
cell_size = 24
gap = 2
frequency = 2.0
speed = 1.0

[effect.noise]
scale = 4.0
speed = 0.5

[effect.combined]
# "screen" or "multiply"
blend = "screen"

[post]
# Bloom intensity (0.0-1.0)
bloom = 0.0
# Chromatic aberration as a fraction of the width (0.0-0.05)
aberration = 0.0
# Surface wave: none, gentle, moderate, intense, storm
wave = "none"

[display]
# Cycle through effects automatically
rotate_effects = false
rotation_interval_secs = 30
target_fps = 60
"#
        .to_string()
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &Args) {
        if let Some(kind) = args.effect {
            self.effect.kind = kind;
        }
        if let Some(palette) = args.palette {
            self.effect.palette = palette;
        }
        if let Some(mode) = args.buffer_mode {
            self.engine.buffer_mode = mode;
        }
        if let Some(speed) = args.speed {
            self.engine.speed = clock::clamp_speed(speed);
        }
        if let Some(width) = args.width {
            self.engine.width = width;
        }
        if let Some(height) = args.height {
            self.engine.height = height;
        }
        if let Some(wave) = args.wave {
            self.post.wave = wave;
        }
        if let Some(bloom) = args.bloom {
            self.post.bloom = bloom;
        }
        if let Some(aberration) = args.aberration {
            self.post.aberration = aberration;
        }
        if args.rotate {
            self.display.rotate_effects = true;
        }
        if let Some(secs) = args.rotate_interval {
            self.display.rotation_interval_secs = secs;
        }
    }

    /// Engine setup at the given render size.
    pub fn engine_config(&self, width: usize, height: usize) -> EngineConfig {
        EngineConfig {
            width,
            height,
            buffer_mode: self.engine.buffer_mode,
            memory_limit: self.engine.memory_limit_bytes,
            palette_size: PALETTE_SIZE,
        }
    }

    /// Snapshot of the per-tick knobs.
    pub fn frame_params(&self) -> FrameParams {
        FrameParams {
            effect: self.effect.kind,
            palette: self.effect.palette,
            effects: self.effect.params,
            post: self.post,
            buffer_mode: self.engine.buffer_mode,
            speed: self.engine.speed,
        }
    }
}
