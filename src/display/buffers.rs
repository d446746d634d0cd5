//! Buffer set and presentation.
//!
//! Roles:
//! - `work`: render target, handed out exclusively via [`FrameBuffers::work_mut`]
//! - `back` (triple only): last completed frame awaiting blit
//! - `front`: the visible surface, changed only by a full copy
//!
//! Double buffering blits `work` straight to `front`. Triple buffering first
//! swaps the finished `work` into `back`, so the next render can start on
//! the other buffer, then blits `back` to `front`.

use std::mem;
use tracing::{debug, info};

use super::BufferMode;
use crate::error::EngineError;
use crate::renderer::Canvas;

#[derive(Debug)]
pub struct FrameBuffers {
    mode: BufferMode,
    width: usize,
    height: usize,
    work: Canvas,
    back: Option<Canvas>,
    front: Canvas,
    memory_limit: Option<usize>,
    allocations: usize,
    presented: u64,
}

impl FrameBuffers {
    /// Allocate the buffer set for `mode`. `memory_limit` caps the total
    /// bytes held across all buffers.
    pub fn new(mode: BufferMode, width: usize, height: usize, memory_limit: Option<usize>) -> Result<Self, EngineError> {
        let bytes = Canvas::byte_len(width, height)?;
        check_budget(mode.buffer_count() * bytes, memory_limit)?;

        let work = Canvas::try_new(width, height)?;
        let front = Canvas::try_new(width, height)?;
        let back = match mode {
            BufferMode::Double => None,
            BufferMode::Triple => Some(Canvas::try_new(width, height)?),
        };
        let buffers = Self {
            mode,
            width,
            height,
            work,
            back,
            front,
            memory_limit,
            allocations: mode.buffer_count(),
            presented: 0,
        };
        info!(
            "Allocated {:?} buffer set ({}x{}, {} bytes)",
            mode,
            width,
            height,
            buffers.bytes_in_use()
        );
        Ok(buffers)
    }

    pub fn mode(&self) -> BufferMode {
        self.mode
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of buffers currently held.
    pub fn buffer_count(&self) -> usize {
        2 + usize::from(self.back.is_some())
    }

    /// Total buffers allocated over this set's lifetime.
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    /// Bytes held across all current buffers.
    pub fn bytes_in_use(&self) -> usize {
        self.buffer_count() * self.work.as_bytes().len()
    }

    /// Frames handed to the visible surface so far.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn work_mut(&mut self) -> &mut Canvas {
        &mut self.work
    }

    pub fn back(&self) -> Option<&Canvas> {
        self.back.as_ref()
    }

    /// The visible surface.
    pub fn front(&self) -> &Canvas {
        &self.front
    }

    /// Publish the completed `work` buffer to the visible surface.
    pub fn present(&mut self) -> Result<(), EngineError> {
        match self.back.as_mut() {
            Some(back) => {
                mem::swap(&mut self.work, back);
                self.front.copy_from(back)?;
            }
            None => self.front.copy_from(&self.work)?,
        }
        self.presented += 1;
        Ok(())
    }

    /// Switch buffering strategy. Returns `Ok(true)` when the set changed.
    ///
    /// Double to triple allocates exactly one buffer; triple to double frees
    /// one. The visible surface is untouched either way. On failure the set
    /// is left as it was.
    pub fn set_mode(&mut self, mode: BufferMode) -> Result<bool, EngineError> {
        if mode == self.mode {
            return Ok(false);
        }
        match mode {
            BufferMode::Triple => {
                let bytes = self.work.as_bytes().len();
                check_budget(BufferMode::Triple.buffer_count() * bytes, self.memory_limit)?;
                self.back = Some(Canvas::try_new(self.width, self.height)?);
                self.allocations += 1;
            }
            BufferMode::Double => {
                self.back = None;
            }
        }
        self.mode = mode;
        debug!("Buffer mode now {:?}, {} bytes held", mode, self.bytes_in_use());
        Ok(true)
    }
}

fn check_budget(bytes: usize, limit: Option<usize>) -> Result<(), EngineError> {
    match limit {
        Some(limit) if bytes > limit => Err(EngineError::Allocation {
            bytes,
            reason: format!("exceeds memory limit of {} bytes", limit),
        }),
        _ => Ok(()),
    }
}
