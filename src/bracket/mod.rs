//! Bracket matching: depth-tracked scan for a delimiter's pair.

use crate::buffer::{Buffer, Position};

/// For a supported delimiter, return its pair and the scan direction
/// (`true` for forward).
const fn pair_of(c: char) -> Option<(char, bool)> {
    match c {
        '(' => Some((')', true)),
        ')' => Some(('(', false)),
        '[' => Some((']', true)),
        ']' => Some(('[', false)),
        '{' => Some(('}', true)),
        '}' => Some(('{', false)),
        _ => None,
    }
}

/// Whether `c` is a supported bracket delimiter.
pub const fn is_bracket(c: char) -> bool {
    pair_of(c).is_some()
}

/// Advance one character position, crossing line boundaries.
///
/// Returns the input unchanged at the end of the document; callers use
/// that to terminate the scan.
fn pos_next(buffer: &Buffer, pos: Position) -> Position {
    if pos.col + 1 < buffer.line(pos.line).len() {
        return Position::new(pos.line, pos.col + 1);
    }
    let mut line = pos.line + 1;
    while line < buffer.line_count() {
        if !buffer.line(line).is_empty() {
            return Position::new(line, 0);
        }
        line += 1;
    }
    pos
}

/// Step one character position backward, crossing line boundaries.
///
/// Returns the input unchanged at the start of the document.
fn pos_prev(buffer: &Buffer, pos: Position) -> Position {
    if pos.col > 0 {
        return Position::new(pos.line, pos.col - 1);
    }
    let mut line = pos.line;
    while line > 0 {
        line -= 1;
        let len = buffer.line(line).len();
        if len > 0 {
            return Position::new(line, len - 1);
        }
    }
    pos
}

/// Find the matching pair of the bracket at `pos`.
///
/// Walks the document in the delimiter's direction tracking nesting
/// depth: another copy of the delimiter increments depth, its pair at
/// depth 0 is the match, at deeper levels it decrements. Returns `None`
/// when `pos` is not on a bracket or the scan exhausts the document
/// without balancing.
pub fn find_match(buffer: &Buffer, pos: Position) -> Option<Position> {
    let open = buffer.line(pos.line).char_at(pos.col)?;
    let (close, forward) = pair_of(open)?;

    let mut depth = 0usize;
    let mut cur = pos;
    loop {
        let next = if forward {
            pos_next(buffer, cur)
        } else {
            pos_prev(buffer, cur)
        };
        if next == cur {
            return None;
        }
        cur = next;
        match buffer.line(cur.line).char_at(cur.col) {
            Some(c) if c == open => depth += 1,
            Some(c) if c == close => {
                if depth == 0 {
                    return Some(cur);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
}

/// Resolve a bracket-jump request at the cursor.
///
/// If the cursor is not on a bracket, the rest of the current line is
/// scanned forward for one first. Returns the matched pair's position.
pub fn bracket_jump(buffer: &Buffer, cursor: Position) -> Option<Position> {
    let line = buffer.line(cursor.line);
    let mut col = cursor.col;
    while col < line.len() {
        if line.char_at(col).is_some_and(is_bracket) {
            return find_match(buffer, Position::new(cursor.line, col));
        }
        col += 1;
    }
    None
}
