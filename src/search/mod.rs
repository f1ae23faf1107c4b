//! Literal substring search with circular scan and match counting.

use tracing::debug;

use crate::buffer::Buffer;

/// Direction of a circular line scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    /// Toward larger line indices, wrapping past the end.
    Forward,
    /// Toward smaller line indices, wrapping past the start.
    Backward,
}

/// Session search state: the active term plus display bookkeeping.
///
/// Counts are recomputed whenever the term changes or the active buffer
/// switches; they are for status display and never gate a scan.
#[derive(Debug, Default)]
pub struct SearchState {
    term: String,
    highlight: bool,
    match_count: usize,
    current_match: usize,
}

impl SearchState {
    /// The active search term; empty means no search.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Whether matches should be highlighted.
    ///
    /// True only with a non-empty term and the highlight flag set.
    pub fn highlight_active(&self) -> bool {
        self.highlight && !self.term.is_empty()
    }

    /// Total matching lines in the buffer the counts were taken against.
    pub const fn match_count(&self) -> usize {
        self.match_count
    }

    /// Zero-based ordinal of the match the cursor last landed on.
    pub const fn current_match(&self) -> usize {
        self.current_match
    }

    /// Adopt a term, enable highlighting, and recount against `buffer`.
    pub fn activate(&mut self, term: &str, buffer: &Buffer) {
        self.term = term.to_string();
        self.highlight = !term.is_empty();
        self.current_match = 0;
        self.recount(buffer);
        debug!(term, matches = self.match_count, "search activated");
    }

    /// Reset term, highlight, and counts.
    pub fn clear(&mut self) {
        self.term.clear();
        self.highlight = false;
        self.match_count = 0;
        self.current_match = 0;
    }

    /// Recompute the total match count against `buffer`.
    pub fn recount(&mut self, buffer: &Buffer) {
        self.match_count = if self.term.is_empty() {
            0
        } else {
            count_matches(buffer, &self.term)
        };
    }

    /// Move to the next matching line after `cursor_line`, updating the
    /// current ordinal. Returns the landing line.
    pub fn next_match(&mut self, buffer: &Buffer, cursor_line: usize) -> Option<usize> {
        let hit = search_from(buffer, &self.term, cursor_line + 1, SearchDirection::Forward)?;
        self.current_match = ordinal_of(buffer, &self.term, hit);
        Some(hit)
    }

    /// Move to the previous matching line before `cursor_line`, updating
    /// the current ordinal. Returns the landing line.
    pub fn prev_match(&mut self, buffer: &Buffer, cursor_line: usize) -> Option<usize> {
        let start = cursor_line
            .checked_sub(1)
            .unwrap_or_else(|| buffer.line_count() - 1);
        let hit = search_from(buffer, &self.term, start, SearchDirection::Backward)?;
        self.current_match = ordinal_of(buffer, &self.term, hit);
        Some(hit)
    }

    /// Jump to the first match at or after the top of the buffer.
    pub fn jump_to_first(&mut self, buffer: &Buffer) -> Option<usize> {
        let hit = search_from(buffer, &self.term, 0, SearchDirection::Forward)?;
        self.current_match = ordinal_of(buffer, &self.term, hit);
        Some(hit)
    }
}

/// Count the lines of `buffer` containing `term` as a literal substring.
pub fn count_matches(buffer: &Buffer, term: &str) -> usize {
    if term.is_empty() {
        return 0;
    }
    buffer.lines().filter(|l| l.contains(term)).count()
}

/// Scan circularly from `start` (inclusive) in `direction` for a line
/// containing `term`. A full wraparound with no hit returns `None`.
pub fn search_from(
    buffer: &Buffer,
    term: &str,
    start: usize,
    direction: SearchDirection,
) -> Option<usize> {
    if term.is_empty() {
        return None;
    }
    let count = buffer.line_count();
    let mut line = start % count;
    for _ in 0..count {
        if buffer.line(line).contains(term) {
            return Some(line);
        }
        line = match direction {
            SearchDirection::Forward => (line + 1) % count,
            SearchDirection::Backward => line.checked_sub(1).unwrap_or(count - 1),
        };
    }
    None
}

/// Zero-based ordinal of the match on `hit_line`: the number of matching
/// lines strictly before it.
fn ordinal_of(buffer: &Buffer, term: &str, hit_line: usize) -> usize {
    buffer
        .lines()
        .take(hit_line)
        .filter(|l| l.contains(term))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_of(lines: &[&str]) -> Buffer {
        Buffer::from_lines("", lines.iter().map(|s| (*s).to_string()).collect())
    }

    #[test]
    fn test_single_match_found_from_any_start() {
        let buffer = buffer_of(&["aa", "bb", "target", "cc"]);
        for start in 0..buffer.line_count() {
            assert_eq!(
                search_from(&buffer, "target", start, SearchDirection::Forward),
                Some(2),
                "start={start}"
            );
            assert_eq!(
                search_from(&buffer, "target", start, SearchDirection::Backward),
                Some(2),
                "start={start}"
            );
        }
    }

    #[test]
    fn test_wraparound_miss_returns_none() {
        let buffer = buffer_of(&["aa", "bb"]);
        assert_eq!(
            search_from(&buffer, "zz", 1, SearchDirection::Forward),
            None
        );
    }

    #[test]
    fn test_empty_term_never_matches() {
        let buffer = buffer_of(&["aa"]);
        assert_eq!(search_from(&buffer, "", 0, SearchDirection::Forward), None);
        assert_eq!(count_matches(&buffer, ""), 0);
    }

    #[test]
    fn test_count_is_per_line() {
        let buffer = buffer_of(&["xx xx", "yy", "xx"]);
        assert_eq!(count_matches(&buffer, "xx"), 2);
    }

    #[test]
    fn test_next_match_skips_current_line() {
        let buffer = buffer_of(&["hit", "miss", "hit"]);
        let mut state = SearchState::default();
        state.activate("hit", &buffer);
        assert_eq!(state.next_match(&buffer, 0), Some(2));
        assert_eq!(state.current_match(), 1);
        // From the last match the scan wraps to the first.
        assert_eq!(state.next_match(&buffer, 2), Some(0));
        assert_eq!(state.current_match(), 0);
    }

    #[test]
    fn test_prev_match_wraps_from_top() {
        let buffer = buffer_of(&["hit", "miss", "hit"]);
        let mut state = SearchState::default();
        state.activate("hit", &buffer);
        assert_eq!(state.prev_match(&buffer, 0), Some(2));
        assert_eq!(state.current_match(), 1);
    }

    #[test]
    fn test_highlight_requires_nonempty_term() {
        let buffer = buffer_of(&["a"]);
        let mut state = SearchState::default();
        state.activate("", &buffer);
        assert!(!state.highlight_active());
        state.activate("a", &buffer);
        assert!(state.highlight_active());
        state.clear();
        assert!(!state.highlight_active());
        assert_eq!(state.match_count(), 0);
    }
}
