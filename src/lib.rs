//! Real-time procedural image generator.
//!
//! Each tick synthesizes a full frame from one of the [`effects`], maps it
//! through a 64-entry palette, runs the [`postfx`] chain and presents the
//! result through double or triple buffering. See [`engine::Engine`].

pub mod cli;
pub mod clock;
pub mod color;
pub mod config;
pub mod display;
pub mod effects;
pub mod engine;
pub mod error;
pub mod postfx;
pub mod renderer;

pub use engine::{Engine, EngineConfig, FrameOutcome, FrameParams, FrameResult, TimingSample};
pub use error::EngineError;
