//! Error types for core editing operations.

use thiserror::Error;

/// Errors surfaced by core operations.
///
/// Most operations are total over valid inputs: out-of-range positions are
/// clamped, and undo/redo on empty history is a silent no-op. Only conditions
/// too significant to clamp surface here, and none of them end the session;
/// the dispatcher reports them through the status line.
#[derive(Debug, Error)]
pub enum EditorError {
    /// All buffer slots are in use.
    #[error("max buffers reached ({max})")]
    BufferLimit {
        /// The configured buffer capacity.
        max: usize,
    },

    /// Refused to close the last remaining buffer.
    #[error("cannot close the last buffer")]
    LastBuffer,

    /// The buffer has no file path to write to.
    #[error("no file name")]
    NoFileName,

    /// A read or write failed; buffer state is unchanged.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The clipboard backend is missing or empty.
    #[error("clipboard empty or unavailable")]
    ClipboardUnavailable,
}

/// Convenience alias for results carrying an [`EditorError`].
pub type Result<T> = std::result::Result<T, EditorError>;
