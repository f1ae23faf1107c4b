//! `Buffer`: an open document's lines plus its edit metadata.

use crate::buffer::{Language, TextLine};
use crate::history::{SnapshotRing, REDO_MAX, UNDO_MAX};

/// A position in a buffer: logical line and character column.
///
/// The column may equal the line length (the append position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Logical line index.
    pub line: usize,
    /// Character column within the line.
    pub col: usize,
}

impl Position {
    /// Create a position.
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    /// The origin position `(0, 0)`.
    pub const ZERO: Self = Self::new(0, 0);
}

/// An open document: ordered lines, file metadata, scroll state, and the
/// buffer's own undo/redo history.
///
/// Invariant: a buffer always holds at least one line. Every constructor
/// and every structural mutation in [`crate::edit`] preserves this.
#[derive(Debug, Clone)]
pub struct Buffer {
    lines: Vec<TextLine>,
    path: String,
    language: Language,
    dirty: bool,
    scroll_offset: usize,
    pub(crate) undo: SnapshotRing,
    pub(crate) redo: SnapshotRing,
}

impl Buffer {
    /// Create a blank buffer with one empty line.
    ///
    /// An empty `path` means the buffer is unsaved.
    pub fn blank(path: &str) -> Self {
        Self {
            lines: vec![TextLine::new()],
            path: path.to_string(),
            language: Language::from_path(path),
            dirty: false,
            scroll_offset: 0,
            undo: SnapshotRing::new(UNDO_MAX),
            redo: SnapshotRing::new(REDO_MAX),
        }
    }

    /// Create a buffer from pre-split lines (e.g. a loaded file).
    ///
    /// An empty `lines` collection still yields one empty line.
    pub fn from_lines(path: &str, lines: Vec<String>) -> Self {
        let mut buffer = Self::blank(path);
        if !lines.is_empty() {
            buffer.lines = lines.iter().map(|l| TextLine::from_text(l)).collect();
        }
        buffer
    }

    /// Number of lines. Always at least 1.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The line at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds; callers clamp cursor positions
    /// before indexing.
    pub fn line(&self, index: usize) -> &TextLine {
        &self.lines[index]
    }

    /// The line at `index`, if in bounds.
    pub fn get_line(&self, index: usize) -> Option<&TextLine> {
        self.lines.get(index)
    }

    /// Mutable access to the line at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn line_mut(&mut self, index: usize) -> &mut TextLine {
        &mut self.lines[index]
    }

    /// Iterate over all lines in order.
    pub fn lines(&self) -> impl Iterator<Item = &TextLine> {
        self.lines.iter()
    }

    /// The file path; empty for unsaved buffers.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Adopt a file path, re-deriving the language tag.
    pub fn set_path(&mut self, path: &str) {
        self.path = path.to_string();
        self.language = Language::from_path(path);
    }

    /// Whether the buffer has no writable file path yet.
    pub fn is_unnamed(&self) -> bool {
        self.path.is_empty() || self.path == "<stdin>" || self.path.starts_with('[')
    }

    /// Short display name: the path's final component, or `[No Name]`.
    pub fn display_name(&self) -> &str {
        if self.path.is_empty() {
            return "[No Name]";
        }
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// The language tag derived from the path.
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Whether the buffer has unsaved modifications.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the buffer as modified.
    pub const fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Mark the buffer as saved.
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// First visible logical line.
    pub const fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Set the first visible logical line.
    pub const fn set_scroll_offset(&mut self, offset: usize) {
        self.scroll_offset = offset;
    }

    /// Serialize the buffer: lines joined by `\n`, no trailing separator.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(line.as_str());
        }
        out
    }

    /// Replace the buffer's lines with the deserialization of `text`.
    ///
    /// Splitting on `\n` exactly makes this the inverse of
    /// [`serialize`](Self::serialize): every line sequence round-trips,
    /// including trailing empty lines. Empty text becomes one empty line.
    pub fn replace_contents(&mut self, text: &str) {
        self.lines = text.split('\n').map(TextLine::from_text).collect();
        if self.lines.is_empty() {
            self.lines.push(TextLine::new());
        }
    }

    /// Depth of the undo ring.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Depth of the redo ring.
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    // Structural access reserved for the edit operations.

    pub(crate) fn insert_line(&mut self, index: usize, line: TextLine) {
        self.lines.insert(index, line);
    }

    pub(crate) fn remove_line(&mut self, index: usize) -> TextLine {
        let removed = self.lines.remove(index);
        if self.lines.is_empty() {
            self.lines.push(TextLine::new());
        }
        removed
    }

    pub(crate) fn remove_line_span(&mut self, start: usize, end_inclusive: usize) {
        self.lines.drain(start..=end_inclusive);
        if self.lines.is_empty() {
            self.lines.push(TextLine::new());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_has_one_line() {
        let buffer = Buffer::blank("");
        assert_eq!(buffer.line_count(), 1);
        assert!(buffer.line(0).is_empty());
        assert!(!buffer.is_dirty());
    }

    #[test]
    fn test_from_lines_empty_input() {
        let buffer = Buffer::from_lines("a.txt", vec![]);
        assert_eq!(buffer.line_count(), 1);
    }

    #[test]
    fn test_serialize_no_trailing_separator() {
        let buffer = Buffer::from_lines("", vec!["a".into(), "b".into()]);
        assert_eq!(buffer.serialize(), "a\nb");
    }

    #[test]
    fn test_round_trip_exact() {
        let cases: &[Vec<String>] = &[
            vec!["a".into(), "b".into()],
            vec!["a".into(), String::new()],
            vec![String::new()],
            vec![String::new(), String::new(), "x".into()],
        ];
        for lines in cases {
            let original = Buffer::from_lines("", lines.clone());
            let mut restored = Buffer::blank("");
            restored.replace_contents(&original.serialize());
            let a: Vec<_> = original.lines().map(TextLine::as_str).collect();
            let b: Vec<_> = restored.lines().map(TextLine::as_str).collect();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Buffer::blank("").display_name(), "[No Name]");
        assert_eq!(Buffer::blank("src/main.rs").display_name(), "main.rs");
        assert_eq!(Buffer::blank("plain").display_name(), "plain");
    }

    #[test]
    fn test_is_unnamed() {
        assert!(Buffer::blank("").is_unnamed());
        assert!(Buffer::blank("<stdin>").is_unnamed());
        assert!(!Buffer::blank("a.txt").is_unnamed());
    }

    #[test]
    fn test_language_from_path() {
        let buffer = Buffer::blank("lib.rs");
        assert_eq!(buffer.language(), Language::Rust);
    }
}
