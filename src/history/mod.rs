//! Undo history: bounded snapshot rings with drop-oldest overflow.
//!
//! History is snapshot-based rather than diff-based: one entry is a full
//! serialized copy of the buffer text. Simple, allocation-heavy, and fast
//! enough for the line counts this core targets; see the snapshot benchmark
//! for the measured cost curve.

use std::collections::VecDeque;

use tracing::trace;

use crate::buffer::Buffer;

/// Maximum undo snapshots retained per buffer.
pub const UNDO_MAX: usize = 25;

/// Maximum redo snapshots retained per buffer.
pub const REDO_MAX: usize = 25;

/// A bounded ring of buffer snapshots.
///
/// Pushing past capacity discards the oldest entry.
#[derive(Debug, Clone)]
pub struct SnapshotRing {
    snapshots: VecDeque<String>,
    capacity: usize,
}

impl SnapshotRing {
    /// Create a ring holding at most `capacity` snapshots.
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a snapshot, discarding the oldest if at capacity.
    pub fn push(&mut self, snapshot: String) {
        while self.snapshots.len() >= self.capacity {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
    }

    /// Pop the most recent snapshot.
    pub fn pop(&mut self) -> Option<String> {
        self.snapshots.pop_back()
    }

    /// Discard all snapshots.
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    /// Number of snapshots held.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if the ring is empty.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    #[cfg(test)]
    fn iter(&self) -> impl Iterator<Item = &String> {
        self.snapshots.iter()
    }
}

/// Record the buffer's current text as an undo snapshot.
///
/// Any new edit point invalidates the redo ring, which is cleared
/// unconditionally.
pub fn push_snapshot(buffer: &mut Buffer) {
    let snap = buffer.serialize();
    trace!(bytes = snap.len(), "undo snapshot");
    buffer.redo.clear();
    buffer.undo.push(snap);
}

/// Restore the most recent undo snapshot.
///
/// The pre-undo text moves onto the redo ring. Returns `false` (a no-op)
/// when there is nothing to undo.
pub fn undo(buffer: &mut Buffer) -> bool {
    let Some(snap) = buffer.undo.pop() else {
        return false;
    };
    let current = buffer.serialize();
    buffer.redo.push(current);
    buffer.replace_contents(&snap);
    buffer.mark_dirty();
    true
}

/// Re-apply the most recently undone state.
///
/// Symmetric with [`undo`]: the pre-redo text moves onto the undo ring.
pub fn redo(buffer: &mut Buffer) -> bool {
    let Some(snap) = buffer.redo.pop() else {
        return false;
    };
    let current = buffer.serialize();
    buffer.undo.push(current);
    buffer.replace_contents(&snap);
    buffer.mark_dirty();
    true
}

/// One-shot latch coalescing an Insert-mode run into a single undo entry.
///
/// The first mutating keystroke after entering Insert mode pushes a
/// snapshot and arms the latch; further keystrokes in the same mode
/// session push nothing. Leaving Insert mode disarms it.
#[derive(Debug, Default)]
pub struct InsertLatch {
    armed: bool,
}

impl InsertLatch {
    /// Check whether a snapshot has already been taken this session.
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    /// Mark the snapshot as taken.
    pub const fn arm(&mut self) {
        self.armed = true;
    }

    /// Reset on entering or leaving Insert mode.
    pub const fn disarm(&mut self) {
        self.armed = false;
    }
}
