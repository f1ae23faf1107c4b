//! External collaborators: clipboard and picker seams.
//!
//! The core drives these through traits so the terminal frontend can
//! plug in OS-backed implementations while tests stay hermetic.

use std::path::PathBuf;

/// System clipboard seam.
///
/// An unavailable backend degrades to a status message in the caller,
/// never an error that aborts a command.
pub trait Clipboard {
    /// Store `text` on the clipboard.
    fn copy(&mut self, text: &str);

    /// Retrieve the clipboard contents, or `None` if unavailable.
    fn paste(&mut self) -> Option<String>;
}

/// In-process clipboard; the default, and what tests use.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) {
        self.contents = Some(text.to_string());
    }

    fn paste(&mut self) -> Option<String> {
        self.contents.clone()
    }
}

/// An entry offered to the buffer picker.
#[derive(Debug, Clone)]
pub struct BufferEntry {
    /// Index within the buffer set.
    pub index: usize,
    /// Short display name.
    pub name: String,
    /// Whether the buffer has unsaved modifications.
    pub dirty: bool,
}

/// Interactive chooser seam (fuzzy finder, menu, or similar).
///
/// `None` from either method means the user cancelled.
pub trait Picker {
    /// Let the user choose a file to open.
    fn pick_file(&mut self) -> Option<PathBuf>;

    /// Let the user choose among open buffers.
    fn pick_buffer(&mut self, entries: &[BufferEntry]) -> Option<usize>;
}

/// Picker that always cancels; for headless use and tests.
#[derive(Debug, Default)]
pub struct NullPicker;

impl Picker for NullPicker {
    fn pick_file(&mut self) -> Option<PathBuf> {
        None
    }

    fn pick_buffer(&mut self, _entries: &[BufferEntry]) -> Option<usize> {
        None
    }
}
