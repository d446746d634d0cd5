use thiserror::Error;

/// Failures surfaced by the engine core.
///
/// None of these are fatal: tick failures skip one frame and allocation
/// failures keep the previous buffer mode.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("failed to allocate {bytes} bytes of pixel memory: {reason}")]
    Allocation { bytes: usize, reason: String },
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: usize, height: usize },
    #[error("buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("non-finite animation time {0}")]
    NonFiniteTime(f32),
    #[error("render panicked: {0}")]
    Panic(String),
}
