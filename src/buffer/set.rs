//! `BufferSet`: bounded collection of open buffers with an active index.

use tracing::debug;

use crate::buffer::Buffer;
use crate::error::{EditorError, Result};

/// Maximum number of simultaneously open buffers.
pub const MAX_BUFFERS: usize = 20;

/// The session's open buffers.
///
/// Invariant: the set is never empty once constructed, and the current
/// index is always valid.
#[derive(Debug)]
pub struct BufferSet {
    buffers: Vec<Buffer>,
    current: usize,
}

impl BufferSet {
    /// Create a set holding a single initial buffer.
    pub fn new(initial: Buffer) -> Self {
        Self {
            buffers: vec![initial],
            current: 0,
        }
    }

    /// Number of open buffers.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Always `false`; present for container-API symmetry.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Index of the active buffer.
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// The active buffer.
    pub fn current(&self) -> &Buffer {
        &self.buffers[self.current]
    }

    /// Mutable access to the active buffer.
    pub fn current_mut(&mut self) -> &mut Buffer {
        &mut self.buffers[self.current]
    }

    /// Iterate over all buffers in order.
    pub fn iter(&self) -> impl Iterator<Item = &Buffer> {
        self.buffers.iter()
    }

    /// Whether any buffer has unsaved modifications.
    pub fn any_dirty(&self) -> bool {
        self.buffers.iter().any(Buffer::is_dirty)
    }

    /// Number of buffers with unsaved modifications.
    pub fn dirty_count(&self) -> usize {
        self.buffers.iter().filter(|b| b.is_dirty()).count()
    }

    /// Open a buffer and make it active.
    ///
    /// Fails with [`EditorError::BufferLimit`] at capacity.
    pub fn add(&mut self, buffer: Buffer) -> Result<usize> {
        if self.buffers.len() >= MAX_BUFFERS {
            return Err(EditorError::BufferLimit { max: MAX_BUFFERS });
        }
        debug!(path = buffer.path(), "open buffer");
        self.buffers.push(buffer);
        self.current = self.buffers.len() - 1;
        Ok(self.current)
    }

    /// Open a new blank, unsaved buffer and make it active.
    pub fn add_blank(&mut self) -> Result<usize> {
        self.add(Buffer::blank(""))
    }

    /// Close the active buffer.
    ///
    /// Refused with [`EditorError::LastBuffer`] when it is the only one.
    pub fn close_current(&mut self) -> Result<()> {
        if self.buffers.len() <= 1 {
            return Err(EditorError::LastBuffer);
        }
        debug!(index = self.current, "close buffer");
        self.buffers.remove(self.current);
        if self.current >= self.buffers.len() {
            self.current = self.buffers.len() - 1;
        }
        Ok(())
    }

    /// Switch to the next buffer, wrapping around.
    pub fn next(&mut self) {
        if self.buffers.len() > 1 {
            self.current = (self.current + 1) % self.buffers.len();
        }
    }

    /// Switch to the previous buffer, wrapping around.
    pub fn prev(&mut self) {
        if self.buffers.len() > 1 {
            self.current = self
                .current
                .checked_sub(1)
                .unwrap_or(self.buffers.len() - 1);
        }
    }

    /// Switch to the buffer at `index`. Returns `false` if out of range.
    pub fn switch_to(&mut self, index: usize) -> bool {
        if index < self.buffers.len() {
            self.current = index;
            true
        } else {
            false
        }
    }
}
