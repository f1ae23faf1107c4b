//! Viewport model: scroll accounting and cursor-to-screen mapping.
//!
//! The same row-accounting walk is used for `ensure_visible`,
//! [`Viewport::visible_line_range`], and [`Viewport::cursor_to_screen`].
//! A renderer that paints rows with [`Viewport::wrap_segments`] therefore
//! agrees with the cursor mapping by construction.

use crate::buffer::{Buffer, Position};

/// Columns the line-number gutter occupies when enabled.
pub const GUTTER_WIDTH: usize = 6;

/// Terminal geometry plus the view toggles.
///
/// `height` is the full terminal height; two rows are reserved for the
/// status and message lines.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    /// Terminal width in columns.
    pub width: usize,
    /// Terminal height in rows.
    pub height: usize,
    /// Whether long lines wrap onto additional rows.
    pub wrap: bool,
    /// Whether the line-number gutter is shown.
    pub line_numbers: bool,
}

impl Viewport {
    /// Create a viewport for a terminal of the given size, with line
    /// numbers on and wrap off.
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            wrap: false,
            line_numbers: true,
        }
    }

    /// Rows available for buffer content.
    pub const fn content_height(&self) -> usize {
        let h = self.height.saturating_sub(2);
        if h == 0 { 1 } else { h }
    }

    /// Columns the gutter occupies, zero when line numbers are off.
    pub const fn gutter_width(&self) -> usize {
        if self.line_numbers { GUTTER_WIDTH } else { 0 }
    }

    /// Columns available for text after the gutter.
    pub const fn text_width(&self) -> usize {
        let w = self.width.saturating_sub(self.gutter_width() + 1);
        if w == 0 { 1 } else { w }
    }

    /// Screen rows occupied by a logical line of `len` characters.
    ///
    /// Minimum 1, even for an empty line.
    pub const fn rows_for_line(&self, len: usize) -> usize {
        if !self.wrap || len == 0 {
            return 1;
        }
        len.div_ceil(self.text_width())
    }

    /// The wrapped segments of a line as `(start, end)` character ranges.
    ///
    /// An empty line yields one empty segment.
    pub fn wrap_segments(&self, len: usize) -> Vec<(usize, usize)> {
        let width = if self.wrap { self.text_width() } else { usize::MAX };
        if len == 0 || !self.wrap {
            return vec![(0, len)];
        }
        (0..len.div_ceil(width))
            .map(|seg| (seg * width, ((seg + 1) * width).min(len)))
            .collect()
    }

    /// Minimally adjust the buffer's scroll offset so `cursor` is visible.
    ///
    /// With wrap on, wrapped-row counts are accumulated from the scroll
    /// offset through the cursor line; while the total exceeds the content
    /// height, the offset advances, consuming each skipped line's rows.
    pub fn ensure_visible(&self, buffer: &mut Buffer, cursor: Position) {
        let mut scroll = buffer.scroll_offset().min(buffer.line_count() - 1);
        if cursor.line < scroll {
            scroll = cursor.line;
        } else if self.wrap {
            let mut rows = 0;
            for l in scroll..=cursor.line {
                rows += self.rows_for_line(buffer.line(l).len());
            }
            while rows > self.content_height() && scroll < cursor.line {
                rows -= self.rows_for_line(buffer.line(scroll).len());
                scroll += 1;
            }
        } else if cursor.line >= scroll + self.content_height() {
            scroll = cursor.line - self.content_height() + 1;
        }
        buffer.set_scroll_offset(scroll);
    }

    /// Scroll by a signed row delta without moving the cursor, clamped to
    /// the range that keeps at least one line on screen.
    pub fn scroll_by(&self, buffer: &mut Buffer, delta: isize) {
        let max = buffer.line_count().saturating_sub(self.content_height());
        let scroll = buffer.scroll_offset() as isize + delta;
        let scroll = scroll.clamp(0, max as isize) as usize;
        buffer.set_scroll_offset(scroll);
    }

    /// The logical lines `[start, end)` that fit in the content area
    /// starting at the scroll offset.
    pub fn visible_line_range(&self, buffer: &Buffer) -> (usize, usize) {
        let start = buffer.scroll_offset().min(buffer.line_count() - 1);
        let mut rows = 0;
        let mut end = start;
        while end < buffer.line_count() {
            rows += self.rows_for_line(buffer.line(end).len());
            if rows > self.content_height() {
                break;
            }
            end += 1;
        }
        // A line taller than the viewport still shows its first rows.
        if end == start {
            end = start + 1;
        }
        (start, end)
    }

    /// Map the cursor to `(screen_row, screen_col)` within the terminal,
    /// or `None` when it is scrolled out of view.
    ///
    /// The column includes the gutter and its separator space.
    pub fn cursor_to_screen(&self, buffer: &Buffer, cursor: Position) -> Option<(usize, usize)> {
        let scroll = buffer.scroll_offset();
        if cursor.line < scroll {
            return None;
        }
        let mut row = 0;
        for l in scroll..cursor.line {
            row += self.rows_for_line(buffer.line(l).len());
        }
        let (seg_row, seg_col) = if self.wrap {
            (cursor.col / self.text_width(), cursor.col % self.text_width())
        } else {
            (0, cursor.col)
        };
        row += seg_row;
        if row >= self.content_height() {
            return None;
        }
        let col = (self.gutter_width() + 1 + seg_col).min(self.width.saturating_sub(1));
        Some((row, col))
    }
}
