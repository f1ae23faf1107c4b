//! Edit operations: structural mutations on a [`Buffer`].
//!
//! These are the only functions that change line content. They clamp
//! out-of-range positions instead of failing, always leave the buffer
//! with at least one line, and mark it dirty.
//!
//! None of them record undo history: snapshotting is the caller's
//! responsibility, which lets an Insert-mode run of keystrokes coalesce
//! into a single history entry.

use crate::buffer::{Buffer, Position, TextLine};

/// Clamp a position to a valid cursor location in `buffer`.
///
/// The column may equal the line length (append position).
pub fn clamp(buffer: &Buffer, pos: Position) -> Position {
    let line = pos.line.min(buffer.line_count() - 1);
    let col = pos.col.min(buffer.line(line).len());
    Position::new(line, col)
}

/// Insert a character at `pos` (column clamped to `[0, len]`).
pub fn insert_char(buffer: &mut Buffer, pos: Position, c: char) {
    let pos = clamp(buffer, pos);
    if buffer.line_mut(pos.line).insert(pos.col, c) {
        buffer.mark_dirty();
    }
}

/// Delete the character before `pos`, returning the new cursor position.
///
/// At column 0 the line is joined onto the previous one and removed, with
/// every following line shifting up. At `(0, 0)` this is a no-op.
pub fn delete_char_before(buffer: &mut Buffer, pos: Position) -> Position {
    let pos = clamp(buffer, pos);
    if pos.col > 0 {
        buffer.line_mut(pos.line).remove(pos.col - 1);
        buffer.mark_dirty();
        return Position::new(pos.line, pos.col - 1);
    }
    if pos.line == 0 {
        return pos;
    }
    let removed = buffer.remove_line(pos.line);
    let prev = buffer.line_mut(pos.line - 1);
    let junction = prev.len();
    prev.push_line(&removed);
    buffer.mark_dirty();
    Position::new(pos.line - 1, junction)
}

/// Split the line at `pos` in two, returning the new cursor position
/// (start of the newly created line).
///
/// The left half replaces the line, the right half becomes a new line
/// immediately after it; all following lines shift down.
pub fn insert_newline(buffer: &mut Buffer, pos: Position) -> Position {
    let pos = clamp(buffer, pos);
    let right = buffer.line_mut(pos.line).split_off(pos.col);
    buffer.insert_line(pos.line + 1, right);
    buffer.mark_dirty();
    Position::new(pos.line + 1, 0)
}

/// Delete the inclusive range between two positions, returning the
/// deleted text (lines joined by `\n`).
///
/// Endpoints are normalized into document order and clamped. A
/// single-line range splices within one line; a multi-line range joins
/// the first line's prefix to the last line's suffix and removes the
/// lines in between. The caller places the cursor at the range start.
pub fn delete_range(buffer: &mut Buffer, a: Position, b: Position) -> String {
    let (start, end) = if (b.line, b.col) < (a.line, a.col) {
        (b, a)
    } else {
        (a, b)
    };
    let start = clamp(buffer, start);
    let end_line = end.line.min(buffer.line_count() - 1);

    // Collect the deleted text before splicing. The end column is
    // inclusive; columns past the end of a line contribute nothing.
    let mut deleted = String::new();
    for l in start.line..=end_line {
        let line = buffer.line(l);
        let len = line.len();
        let from = if l == start.line { start.col.min(len) } else { 0 };
        let to = if l == end_line {
            end.col.saturating_add(1).min(len)
        } else {
            len
        };
        if to > from {
            deleted.push_str(line.slice(from, to));
        }
        if l != end_line {
            deleted.push('\n');
        }
    }

    if start.line == end_line {
        let line = buffer.line_mut(start.line);
        let to = end.col.saturating_add(1).min(line.len());
        line.remove_span(start.col, to);
    } else {
        let suffix_from = end.col.saturating_add(1);
        let suffix = buffer.line(end_line).slice_from(suffix_from.min(buffer.line(end_line).len())).to_string();
        let first = buffer.line_mut(start.line);
        first.truncate(start.col);
        first.push_str(&suffix);
        buffer.remove_line_span(start.line + 1, end_line);
    }
    buffer.mark_dirty();
    deleted
}

/// Remove a whole-line range (inclusive, clamped), returning the removed
/// text joined by `\n`. The buffer keeps at least one (empty) line.
pub fn delete_lines(buffer: &mut Buffer, lo: usize, hi: usize) -> String {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    let hi = hi.min(buffer.line_count() - 1);
    let lo = lo.min(hi);

    let mut removed = String::new();
    for l in lo..=hi {
        if l > lo {
            removed.push('\n');
        }
        removed.push_str(buffer.line(l).as_str());
    }
    buffer.remove_line_span(lo, hi);
    buffer.mark_dirty();
    removed
}

/// Remove a single line, returning its text.
pub fn delete_line(buffer: &mut Buffer, index: usize) -> String {
    let index = index.min(buffer.line_count() - 1);
    let removed = buffer.remove_line(index);
    buffer.mark_dirty();
    removed.as_str().to_string()
}

/// Replace the whole buffer with one empty line, returning the prior
/// serialized text.
pub fn clear_all(buffer: &mut Buffer) -> String {
    let prior = buffer.serialize();
    buffer.replace_contents("");
    buffer.mark_dirty();
    prior
}

/// Insert multi-line text at `pos` character by character, returning the
/// final cursor position. `\n` splits the current line.
pub fn insert_text(buffer: &mut Buffer, pos: Position, text: &str) -> Position {
    let mut cursor = clamp(buffer, pos);
    for c in text.chars() {
        if c == '\n' {
            cursor = insert_newline(buffer, cursor);
        } else {
            insert_char(buffer, cursor, c);
            cursor.col += 1;
        }
    }
    cursor
}
