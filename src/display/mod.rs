pub mod buffers;
pub mod terminal;

pub use buffers::FrameBuffers;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BufferMode {
    #[default]
    Double,
    Triple,
}

impl BufferMode {
    pub fn buffer_count(&self) -> usize {
        match self {
            BufferMode::Double => 2,
            BufferMode::Triple => 3,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            BufferMode::Double => BufferMode::Triple,
            BufferMode::Triple => BufferMode::Double,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BufferMode::Double => "double",
            BufferMode::Triple => "triple",
        }
    }
}
