use clap::Parser;
use std::path::PathBuf;

use crate::color::PaletteKind;
use crate::display::BufferMode;
use crate::effects::EffectKind;
use crate::postfx::SurfaceWaveMode;

#[derive(Parser, Debug, Default)]
#[command(name = "demofx")]
#[command(author, version, about = "Real-time procedural demo effects in the terminal")]
pub struct Args {
    /// Config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write a default config to ~/.config/demofx/config.toml and exit
    #[arg(long)]
    pub init_config: bool,

    /// Effect to start with
    #[arg(short, long)]
    pub effect: Option<EffectKind>,

    /// Palette by name (fire, ocean, ...) or index
    #[arg(short, long, value_parser = parse_palette)]
    pub palette: Option<usize>,

    /// Buffering strategy
    #[arg(short, long)]
    pub buffer_mode: Option<BufferMode>,

    /// Surface wave distortion
    #[arg(short, long)]
    pub wave: Option<SurfaceWaveMode>,

    /// Bloom intensity (0.0-1.0)
    #[arg(long)]
    pub bloom: Option<f32>,

    /// Chromatic aberration as a fraction of the width (0.0-0.05)
    #[arg(long)]
    pub aberration: Option<f32>,

    /// Animation speed multiplier (0.1-3.0)
    #[arg(short, long)]
    pub speed: Option<f32>,

    /// Render width in pixels (defaults to the terminal size)
    #[arg(long)]
    pub width: Option<usize>,

    /// Render height in pixels (defaults to the terminal size)
    #[arg(long)]
    pub height: Option<usize>,

    /// Rotate effects automatically
    #[arg(short, long)]
    pub rotate: bool,

    /// Rotation interval in seconds
    #[arg(long)]
    pub rotate_interval: Option<u64>,
}

/// Accepts a palette name or a numeric index.
pub fn parse_palette(s: &str) -> Result<usize, String> {
    if let Ok(index) = s.parse::<usize>() {
        return Ok(index);
    }
    s.parse::<PaletteKind>().map(|kind| kind.index())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_by_name_or_index() {
        assert_eq!(parse_palette("3"), Ok(3));
        assert_eq!(parse_palette("ocean"), Ok(PaletteKind::Ocean.index()));
        assert!(parse_palette("mauve").is_err());
    }

    #[test]
    fn flags_parse() {
        let args = Args::parse_from([
            "demofx",
            "--effect",
            "copper-bars",
            "--buffer-mode",
            "triple",
            "--wave",
            "storm",
            "--speed",
            "2.5",
        ]);
        assert_eq!(args.effect, Some(EffectKind::CopperBars));
        assert_eq!(args.buffer_mode, Some(BufferMode::Triple));
        assert_eq!(args.wave, Some(SurfaceWaveMode::Storm));
        assert_eq!(args.speed, Some(2.5));
    }
}
