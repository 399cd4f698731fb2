//! Talk chunk rotation.

use crate::error::{MouthtrackError, Result};
use crate::frames::bank::FrameId;

/// Hands out talk chunks in pool order so consecutive talk segments start on
/// different mouth shapes.
///
/// The cursor wraps to 0 once it reaches the second-to-last index, so the
/// last chunk of a pool with two or more chunks is never handed out. Frame
/// tracks already generated depend on this ordering. A single-chunk pool
/// always returns its only chunk.
#[derive(Debug, Clone)]
pub struct ChunkRotation<'a> {
    chunks: &'a [Vec<FrameId>],
    cursor: usize,
}

impl<'a> ChunkRotation<'a> {
    pub fn new(chunks: &'a [Vec<FrameId>]) -> Result<Self> {
        if chunks.is_empty() {
            return Err(MouthtrackError::EmptyChunkPool);
        }
        Ok(Self { chunks, cursor: 0 })
    }

    /// Returns the chunk under the cursor and advances.
    pub fn next_chunk(&mut self) -> &'a [FrameId] {
        let chunk = &self.chunks[self.cursor];
        self.cursor += 1;
        if self.cursor >= self.chunks.len() - 1 {
            self.cursor = 0;
        }
        chunk
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
