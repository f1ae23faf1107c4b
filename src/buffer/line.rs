//! `TextLine`: a single line's mutable character content.
//!
//! Lines never contain an embedded newline. Columns are logical `char`
//! indices, not byte offsets; conversion happens at this boundary so the
//! rest of the crate can treat a cursor column as a plain index.

/// Maximum number of characters a single line may hold.
///
/// Insertions into a full line are silently refused rather than rejected
/// with an error, matching the clamp-over-reject policy used throughout
/// the core.
pub const MAX_LINE_LEN: usize = 2048;

/// A single line of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextLine {
    text: String,
}

impl TextLine {
    /// Create an empty line.
    pub const fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Create a line from existing text. Embedded newlines are stripped.
    pub fn from_text(text: &str) -> Self {
        if text.contains('\n') {
            Self {
                text: text.replace('\n', ""),
            }
        } else {
            Self {
                text: text.to_string(),
            }
        }
    }

    /// The line content as a string slice.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of characters in the line.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the line is empty.
    pub const fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Character at the given column, if any.
    pub fn char_at(&self, col: usize) -> Option<char> {
        self.text.chars().nth(col)
    }

    /// Check if the line contains `needle` as a literal substring.
    pub fn contains(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }

    /// Byte offset of the given column, clamped to the end of the line.
    fn byte_index(&self, col: usize) -> usize {
        self.text
            .char_indices()
            .nth(col)
            .map_or(self.text.len(), |(i, _)| i)
    }

    /// Insert a character at `col` (clamped to `[0, len]`).
    ///
    /// Returns `false` when the line is already at [`MAX_LINE_LEN`].
    pub fn insert(&mut self, col: usize, c: char) -> bool {
        if self.len() >= MAX_LINE_LEN {
            return false;
        }
        let at = self.byte_index(col);
        self.text.insert(at, c);
        true
    }

    /// Remove and return the character at `col`, if in bounds.
    pub fn remove(&mut self, col: usize) -> Option<char> {
        if col >= self.len() {
            return None;
        }
        let at = self.byte_index(col);
        Some(self.text.remove(at))
    }

    /// Split the line at `col` (clamped), keeping the left part and
    /// returning the right part as a new line.
    pub fn split_off(&mut self, col: usize) -> Self {
        let at = self.byte_index(col);
        Self {
            text: self.text.split_off(at),
        }
    }

    /// Truncate the line to its first `col` characters.
    pub fn truncate(&mut self, col: usize) {
        let at = self.byte_index(col);
        self.text.truncate(at);
    }

    /// Append another line's content to this one.
    pub fn push_line(&mut self, other: &Self) {
        self.text.push_str(&other.text);
    }

    /// Append a string slice. Used when joining line fragments.
    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    /// Slice of the columns `[start, end)`, both clamped.
    pub fn slice(&self, start: usize, end: usize) -> &str {
        let a = self.byte_index(start);
        let b = self.byte_index(end.max(start));
        &self.text[a..b]
    }

    /// Slice from column `start` to the end of the line.
    pub fn slice_from(&self, start: usize) -> &str {
        &self.text[self.byte_index(start)..]
    }

    /// Remove the columns `[start, end)` from the line.
    pub fn remove_span(&mut self, start: usize, end: usize) {
        let a = self.byte_index(start);
        let b = self.byte_index(end.max(start));
        self.text.replace_range(a..b, "");
    }
}

impl std::fmt::Display for TextLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
