//! The modal state machine: one key event in, session state out.
//!
//! `handle_key` is the single entry point. It routes by mode and pending
//! chord, drives the edit/undo/search/bracket components, and never
//! touches line content directly.

use crate::bracket;
use crate::buffer::Position;
use crate::edit;
use crate::external::{Clipboard, Picker};
use crate::history;
use crate::input::command;
use crate::input::{Key, Prompt, PromptKind};
use crate::session::{EditorSession, Mode, Operator, Pending, Selection};

/// Process one key event against the session.
///
/// Runs to completion before the next key is read; every call ends with
/// a bounds pass that clamps the cursor, follows it with the scroll
/// (unless a free scroll is latched), and ticks the status countdown.
pub fn handle_key(
    session: &mut EditorSession,
    key: Key,
    clipboard: &mut dyn Clipboard,
    picker: &mut dyn Picker,
) {
    match session.mode {
        Mode::Normal => normal_key(session, key, clipboard),
        Mode::Insert => insert_key(session, key),
        Mode::Visual => visual_key(session, key, clipboard),
        Mode::Command => prompt_key(session, key, clipboard, picker),
    }

    session.clamp_cursor();
    if !session.free_scroll {
        session.ensure_cursor_visible();
    }
    session.status.tick();
}

fn normal_key(session: &mut EditorSession, key: Key, clipboard: &mut dyn Clipboard) {
    match session.pending {
        Pending::Goto => {
            session.pending = Pending::None;
            goto_key(session, key);
            return;
        }
        Pending::Percent => {
            session.pending = Pending::None;
            percent_key(session, key, clipboard);
            return;
        }
        Pending::Op(op) => {
            session.pending = Pending::None;
            if operator_key(session, op, key, clipboard) {
                return;
            }
            // Unrecognized target: the operator is cancelled and the key
            // dispatches as if freshly pressed.
        }
        Pending::None => {}
    }

    match key {
        Key::Char('i') => {
            session.mode = Mode::Insert;
            session.insert_latch.disarm();
        }
        Key::Char('V') => {
            session.mode = Mode::Visual;
            let line = session.cursor.line;
            session.selection = Some(Selection { anchor: line, head: line });
        }
        Key::Char(':') => {
            session.mode = Mode::Command;
            session.prompt = Some(Prompt::new(PromptKind::Command));
        }
        Key::Char('/') => {
            session.mode = Mode::Command;
            session.prompt = Some(Prompt::new(PromptKind::Search));
        }
        Key::Char('h') | Key::Left => move_left(session),
        Key::Char('l') | Key::Right => move_right(session),
        Key::Char('j') | Key::Down => move_vertical(session, 1),
        Key::Char('k') | Key::Up => move_vertical(session, -1),
        Key::Char('g') => session.pending = Pending::Goto,
        Key::Char('G') => {
            session.free_scroll = false;
            session.cursor = Position::new(session.buffer().line_count() - 1, 0);
        }
        Key::Char('%') => session.pending = Pending::Percent,
        Key::Char('y') => session.pending = Pending::Op(Operator::Yank),
        Key::Char('d') => session.pending = Pending::Op(Operator::Delete),
        Key::Char('u') => {
            if !history::undo(session.buffer_mut()) {
                session.set_status("Nothing to undo");
            }
        }
        Key::Ctrl('r') => {
            if !history::redo(session.buffer_mut()) {
                session.set_status("Nothing to redo");
            }
        }
        Key::Char('p') => command::paste_at_cursor(session, clipboard),
        Key::Char('n') => jump_to_match(session, true),
        Key::Char('N') => jump_to_match(session, false),
        Key::Char('q') => session.running = false,
        Key::Char('x') => command::quit_one(session, true),
        Key::Char('L') => session.viewport.line_numbers = !session.viewport.line_numbers,
        Key::Char('T') => session.viewport.wrap = !session.viewport.wrap,
        Key::Ctrl('e') => free_scroll(session, 1),
        Key::Ctrl('y') => free_scroll(session, -1),
        Key::Esc => session.search.clear(),
        _ => {}
    }
}

fn goto_key(session: &mut EditorSession, key: Key) {
    match key {
        Key::Char('g') => {
            session.free_scroll = false;
            session.cursor = Position::ZERO;
        }
        Key::Char('t') => {
            session.buffers.next();
            session.after_buffer_switch();
        }
        Key::Char('T') => {
            session.buffers.prev();
            session.after_buffer_switch();
        }
        _ => {}
    }
}

fn percent_key(session: &mut EditorSession, key: Key, clipboard: &mut dyn Clipboard) {
    match key {
        Key::Char('y') => {
            clipboard.copy(&session.buffer().serialize());
            let lines = session.buffer().line_count();
            session.set_status(format!("{lines} lines yanked"));
        }
        Key::Char('d') => {
            history::push_snapshot(session.buffer_mut());
            let removed = edit::clear_all(session.buffer_mut());
            clipboard.copy(&removed);
            session.cursor = Position::ZERO;
        }
        // Anything else resolves the pending '%' as a bracket jump and
        // the intervening key is dropped, matching long-standing
        // behavior rather than buffering the key.
        _ => bracket_motion(session),
    }
}

/// Resolve an operator against its target key. Returns `false` when the
/// key is not a recognized target, leaving it to normal dispatch.
fn operator_key(
    session: &mut EditorSession,
    op: Operator,
    key: Key,
    clipboard: &mut dyn Clipboard,
) -> bool {
    let target_letter = match op {
        Operator::Yank => 'y',
        Operator::Delete => 'd',
    };
    match key {
        Key::Char(c) if c == target_letter => {
            let line = session.cursor.line;
            match op {
                Operator::Yank => {
                    clipboard.copy(session.buffer().line(line).as_str());
                    session.set_status("1 line yanked");
                }
                Operator::Delete => {
                    history::push_snapshot(session.buffer_mut());
                    let removed = edit::delete_line(session.buffer_mut(), line);
                    clipboard.copy(&removed);
                    session.cursor.col = 0;
                }
            }
            true
        }
        Key::Char('%') => {
            let cursor = session.cursor;
            if let Some(target) = bracket::bracket_jump(session.buffer(), cursor) {
                history::push_snapshot(session.buffer_mut());
                let removed = edit::delete_range(session.buffer_mut(), cursor, target);
                clipboard.copy(&removed);
                session.cursor = if (target.line, target.col) < (cursor.line, cursor.col) {
                    target
                } else {
                    cursor
                };
            } else {
                session.set_status("No matching bracket");
            }
            true
        }
        Key::Esc => true,
        _ => false,
    }
}

fn visual_key(session: &mut EditorSession, key: Key, clipboard: &mut dyn Clipboard) {
    let Some(selection) = session.selection else {
        session.mode = Mode::Normal;
        return;
    };
    match key {
        Key::Char(':') => {
            session.selection = None;
            session.mode = Mode::Command;
            session.prompt = Some(Prompt::new(PromptKind::Command));
        }
        Key::Char('j') | Key::Down => extend_selection(session, 1),
        Key::Char('k') | Key::Up => extend_selection(session, -1),
        Key::Char('g') => extend_selection_to(session, 0),
        Key::Char('G') => {
            let last = session.buffer().line_count() - 1;
            extend_selection_to(session, last);
        }
        Key::Char('y') => {
            let (lo, hi) = selection.ordered();
            clipboard.copy(&selected_text(session, lo, hi));
            session.set_status(format!("{} lines yanked", hi - lo + 1));
            session.mode = Mode::Normal;
            session.selection = None;
        }
        Key::Char('d') => {
            let (lo, hi) = selection.ordered();
            history::push_snapshot(session.buffer_mut());
            let removed = edit::delete_lines(session.buffer_mut(), lo, hi);
            clipboard.copy(&removed);
            leave_visual(session, lo);
        }
        Key::Char('p') => {
            // An unavailable clipboard still ends Visual mode.
            let Some(text) = clipboard.paste() else {
                session.set_status("Clipboard empty or unavailable");
                session.mode = Mode::Normal;
                session.selection = None;
                return;
            };
            let (lo, hi) = selection.ordered();
            // Delete and insert share one snapshot so a single undo
            // restores the selection.
            history::push_snapshot(session.buffer_mut());
            edit::delete_lines(session.buffer_mut(), lo, hi);
            let lo = lo.min(session.buffer().line_count() - 1);
            let mut replacement = text;
            replacement.push('\n');
            edit::insert_text(session.buffer_mut(), Position::new(lo, 0), &replacement);
            leave_visual(session, lo);
        }
        Key::Esc => {
            session.mode = Mode::Normal;
            session.selection = None;
        }
        _ => {}
    }
}

fn insert_key(session: &mut EditorSession, key: Key) {
    match key {
        Key::Esc => {
            session.mode = Mode::Normal;
            session.insert_latch.disarm();
        }
        Key::Char(c) => {
            session.arm_insert_undo();
            let cursor = session.cursor;
            edit::insert_char(session.buffer_mut(), cursor, c);
            session.cursor.col += 1;
        }
        Key::Tab => {
            session.arm_insert_undo();
            for _ in 0..4 {
                let cursor = session.cursor;
                edit::insert_char(session.buffer_mut(), cursor, ' ');
                session.cursor.col += 1;
            }
        }
        Key::Enter => {
            session.arm_insert_undo();
            let cursor = session.cursor;
            session.cursor = edit::insert_newline(session.buffer_mut(), cursor);
        }
        Key::Backspace => {
            session.arm_insert_undo();
            let cursor = session.cursor;
            session.cursor = edit::delete_char_before(session.buffer_mut(), cursor);
        }
        Key::Left => move_left(session),
        Key::Right => move_right(session),
        Key::Down => move_vertical(session, 1),
        Key::Up => move_vertical(session, -1),
        _ => {}
    }
}

fn prompt_key(
    session: &mut EditorSession,
    key: Key,
    clipboard: &mut dyn Clipboard,
    picker: &mut dyn Picker,
) {
    let Some(kind) = session.prompt.as_ref().map(|p| p.kind) else {
        session.mode = Mode::Normal;
        return;
    };
    match key {
        Key::Char(c) => {
            if let Some(prompt) = session.prompt.as_mut() {
                prompt.push(c);
            }
        }
        Key::Backspace => {
            if let Some(prompt) = session.prompt.as_mut() {
                prompt.pop();
            }
        }
        Key::Up if kind == PromptKind::Command => {
            if let Some(text) = session.history.prev() {
                let text = text.to_string();
                if let Some(prompt) = session.prompt.as_mut() {
                    prompt.set_text(&text);
                }
            }
        }
        Key::Down if kind == PromptKind::Command => {
            if let Some(text) = session.history.next() {
                let text = text.to_string();
                if let Some(prompt) = session.prompt.as_mut() {
                    prompt.set_text(&text);
                }
            }
        }
        Key::Enter => {
            let Some(prompt) = session.prompt.take() else {
                return;
            };
            session.mode = Mode::Normal;
            match prompt.kind {
                PromptKind::Command => {
                    session.history.record(prompt.text());
                    command::execute(session, prompt.text(), clipboard, picker);
                }
                PromptKind::Search => submit_search(session, prompt.text()),
            }
        }
        Key::Esc => {
            session.prompt = None;
            session.mode = Mode::Normal;
        }
        _ => {}
    }
}

fn submit_search(session: &mut EditorSession, term: &str) {
    session.search.activate(term, session.buffers.current());
    if term.is_empty() {
        return;
    }
    match session.search.jump_to_first(session.buffers.current()) {
        Some(line) => {
            session.cursor = Position::new(line, 0);
            report_match(session);
        }
        None => session.set_status(format!("Pattern not found: {term}")),
    }
}

fn jump_to_match(session: &mut EditorSession, forward: bool) {
    if session.search.term().is_empty() {
        session.set_status("No previous search");
        return;
    }
    let cursor_line = session.cursor.line;
    let hit = if forward {
        session.search.next_match(session.buffers.current(), cursor_line)
    } else {
        session.search.prev_match(session.buffers.current(), cursor_line)
    };
    match hit {
        Some(line) => {
            session.free_scroll = false;
            session.cursor = Position::new(line, 0);
            report_match(session);
        }
        None => {
            let term = session.search.term().to_string();
            session.set_status(format!("Pattern not found: {term}"));
        }
    }
}

fn report_match(session: &mut EditorSession) {
    let current = session.search.current_match() + 1;
    let total = session.search.match_count();
    session.set_status(format!("match {current} of {total}"));
}

fn bracket_motion(session: &mut EditorSession) {
    if let Some(target) = bracket::bracket_jump(session.buffer(), session.cursor) {
        session.free_scroll = false;
        session.cursor = target;
    } else {
        session.set_status("No matching bracket");
    }
}

fn move_left(session: &mut EditorSession) {
    session.free_scroll = false;
    if session.cursor.col > 0 {
        session.cursor.col -= 1;
    } else if session.cursor.line > 0 {
        session.cursor.line -= 1;
        session.cursor.col = session.buffer().line(session.cursor.line).len();
    }
}

fn move_right(session: &mut EditorSession) {
    session.free_scroll = false;
    let len = session.buffer().line(session.cursor.line).len();
    if session.cursor.col < len {
        session.cursor.col += 1;
    } else if session.cursor.line + 1 < session.buffer().line_count() {
        session.cursor.line += 1;
        session.cursor.col = 0;
    }
}

fn move_vertical(session: &mut EditorSession, delta: isize) {
    session.free_scroll = false;
    let last = session.buffer().line_count() - 1;
    let line = session.cursor.line as isize + delta;
    session.cursor.line = line.clamp(0, last as isize) as usize;
    // The column is clamped by the post-key bounds pass.
}

fn free_scroll(session: &mut EditorSession, delta: isize) {
    let viewport = session.viewport;
    viewport.scroll_by(session.buffers.current_mut(), delta);
    session.free_scroll = true;
}

fn extend_selection(session: &mut EditorSession, delta: isize) {
    let last = session.buffer().line_count() - 1;
    let head = session.cursor.line as isize + delta;
    extend_selection_to(session, head.clamp(0, last as isize) as usize);
}

fn extend_selection_to(session: &mut EditorSession, line: usize) {
    session.cursor.line = line;
    if let Some(selection) = session.selection.as_mut() {
        selection.head = line;
    }
}

fn selected_text(session: &EditorSession, lo: usize, hi: usize) -> String {
    let mut out = String::new();
    for l in lo..=hi.min(session.buffer().line_count() - 1) {
        if l > lo {
            out.push('\n');
        }
        out.push_str(session.buffer().line(l).as_str());
    }
    out
}

fn leave_visual(session: &mut EditorSession, line: usize) {
    session.mode = Mode::Normal;
    session.selection = None;
    session.cursor = Position::new(line.min(session.buffer().line_count() - 1), 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::external::{MemoryClipboard, NullPicker};
    use crate::viewport::Viewport;

    struct Rig {
        session: EditorSession,
        clipboard: MemoryClipboard,
        picker: NullPicker,
    }

    impl Rig {
        fn with_lines(lines: &[&str]) -> Self {
            let buffer =
                Buffer::from_lines("", lines.iter().map(|s| (*s).to_string()).collect());
            Self {
                session: EditorSession::new(buffer, Viewport::new(80, 24)),
                clipboard: MemoryClipboard::default(),
                picker: NullPicker,
            }
        }

        fn key(&mut self, key: Key) {
            handle_key(&mut self.session, key, &mut self.clipboard, &mut self.picker);
        }

        fn keys(&mut self, keys: &[Key]) {
            for &k in keys {
                self.key(k);
            }
        }

        fn type_str(&mut self, text: &str) {
            for c in text.chars() {
                self.key(Key::Char(c));
            }
        }
    }

    #[test]
    fn test_mode_transitions() {
        let mut rig = Rig::with_lines(&["abc"]);
        rig.key(Key::Char('i'));
        assert_eq!(rig.session.mode, Mode::Insert);
        rig.key(Key::Esc);
        assert_eq!(rig.session.mode, Mode::Normal);
        rig.key(Key::Char('V'));
        assert_eq!(rig.session.mode, Mode::Visual);
        rig.key(Key::Esc);
        rig.key(Key::Char(':'));
        assert_eq!(rig.session.mode, Mode::Command);
        rig.key(Key::Esc);
        assert_eq!(rig.session.mode, Mode::Normal);
    }

    #[test]
    fn test_insert_run_coalesces_into_one_undo() {
        let mut rig = Rig::with_lines(&[""]);
        rig.key(Key::Char('i'));
        rig.type_str("hello");
        rig.key(Key::Esc);
        assert_eq!(rig.session.buffer().serialize(), "hello");
        // Baseline snapshot plus one for the whole Insert run.
        assert_eq!(rig.session.buffer().undo_depth(), 2);

        // A second Insert session takes a fresh snapshot.
        rig.key(Key::Char('i'));
        rig.type_str("!");
        rig.key(Key::Esc);
        assert_eq!(rig.session.buffer().undo_depth(), 3);

        rig.key(Key::Char('u'));
        assert_eq!(rig.session.buffer().serialize(), "hello");
        rig.key(Key::Char('u'));
        assert_eq!(rig.session.buffer().serialize(), "");
    }

    #[test]
    fn test_insert_enter_and_backspace() {
        let mut rig = Rig::with_lines(&["abc"]);
        rig.session.cursor = Position::new(0, 3);
        rig.key(Key::Char('i'));
        rig.key(Key::Enter);
        assert_eq!(rig.session.buffer().line_count(), 2);
        assert_eq!(rig.session.cursor, Position::new(1, 0));
        rig.key(Key::Backspace);
        assert_eq!(rig.session.buffer().serialize(), "abc");
        assert_eq!(rig.session.cursor, Position::new(0, 3));
    }

    #[test]
    fn test_motion_wraps_line_boundaries() {
        let mut rig = Rig::with_lines(&["ab", "cd"]);
        rig.session.cursor = Position::new(0, 2);
        rig.key(Key::Char('l'));
        assert_eq!(rig.session.cursor, Position::new(1, 0));
        rig.key(Key::Char('h'));
        assert_eq!(rig.session.cursor, Position::new(0, 2));
    }

    #[test]
    fn test_vertical_motion_clamps_column() {
        let mut rig = Rig::with_lines(&["abcdef", "xy"]);
        rig.session.cursor = Position::new(0, 5);
        rig.key(Key::Char('j'));
        assert_eq!(rig.session.cursor, Position::new(1, 2));
    }

    #[test]
    fn test_goto_chord() {
        let mut rig = Rig::with_lines(&["a", "b", "c"]);
        rig.key(Key::Char('G'));
        assert_eq!(rig.session.cursor.line, 2);
        rig.keys(&[Key::Char('g'), Key::Char('g')]);
        assert_eq!(rig.session.cursor, Position::ZERO);
        // Unrecognized second key cancels the prefix.
        rig.keys(&[Key::Char('g'), Key::Char('z')]);
        assert_eq!(rig.session.pending, Pending::None);
        assert_eq!(rig.session.cursor, Position::ZERO);
    }

    #[test]
    fn test_visual_delete_scenario() {
        // Selecting lines 1..=3 of five and deleting leaves two lines
        // with the cursor on former line 1.
        let mut rig = Rig::with_lines(&["l0", "l1", "l2", "l3", "l4"]);
        rig.session.cursor = Position::new(1, 0);
        rig.keys(&[Key::Char('V'), Key::Char('j'), Key::Char('j'), Key::Char('d')]);
        assert_eq!(rig.session.buffer().line_count(), 2);
        assert_eq!(rig.session.buffer().serialize(), "l0\nl4");
        assert_eq!(rig.session.cursor, Position::new(1, 0));
        assert_eq!(rig.session.mode, Mode::Normal);
        assert_eq!(rig.clipboard.paste(), Some("l1\nl2\nl3".to_string()));
    }

    #[test]
    fn test_visual_yank_keeps_buffer() {
        let mut rig = Rig::with_lines(&["a", "b", "c"]);
        rig.keys(&[Key::Char('V'), Key::Char('j'), Key::Char('y')]);
        assert_eq!(rig.session.buffer().serialize(), "a\nb\nc");
        assert_eq!(rig.clipboard.paste(), Some("a\nb".to_string()));
        assert_eq!(rig.session.mode, Mode::Normal);
    }

    #[test]
    fn test_visual_paste_replaces_selection_one_undo() {
        let mut rig = Rig::with_lines(&["a", "b", "c"]);
        rig.clipboard.copy("XX");
        rig.keys(&[Key::Char('V'), Key::Char('j'), Key::Char('p')]);
        assert_eq!(rig.session.buffer().serialize(), "XX\nc");
        assert_eq!(rig.session.buffer().undo_depth(), 2);
        rig.key(Key::Char('u'));
        assert_eq!(rig.session.buffer().serialize(), "a\nb\nc");
    }

    #[test]
    fn test_colon_in_visual_enters_command() {
        let mut rig = Rig::with_lines(&["a", "b"]);
        rig.keys(&[Key::Char('V'), Key::Char('j'), Key::Char(':')]);
        assert_eq!(rig.session.mode, Mode::Command);
        assert!(rig.session.selection.is_none());
        assert!(rig.session.prompt.is_some());
    }

    #[test]
    fn test_visual_paste_empty_clipboard_returns_to_normal() {
        let mut rig = Rig::with_lines(&["a", "b"]);
        rig.keys(&[Key::Char('V'), Key::Char('p')]);
        assert_eq!(rig.session.mode, Mode::Normal);
        assert!(rig.session.selection.is_none());
        assert_eq!(rig.session.buffer().serialize(), "a\nb");
        assert!(!rig.session.status.text().is_empty());
    }

    #[test]
    fn test_operator_pending_cancel_no_mutation() {
        // Yank-pending resolved by an unrelated key leaves the buffer
        // untouched and the operator cleared.
        let mut rig = Rig::with_lines(&["abc", "def"]);
        rig.keys(&[Key::Char('y'), Key::Char('k')]);
        assert_eq!(rig.session.pending, Pending::None);
        assert_eq!(rig.session.buffer().serialize(), "abc\ndef");
        assert!(!rig.session.buffer().is_dirty());
        assert_eq!(rig.clipboard.paste(), None);
    }

    #[test]
    fn test_delete_line_chord() {
        let mut rig = Rig::with_lines(&["a", "b"]);
        rig.keys(&[Key::Char('d'), Key::Char('d')]);
        assert_eq!(rig.session.buffer().serialize(), "b");
        assert_eq!(rig.clipboard.paste(), Some("a".to_string()));
        rig.key(Key::Char('u'));
        assert_eq!(rig.session.buffer().serialize(), "a\nb");
    }

    #[test]
    fn test_yank_line_chord() {
        let mut rig = Rig::with_lines(&["abc"]);
        rig.keys(&[Key::Char('y'), Key::Char('y')]);
        assert_eq!(rig.clipboard.paste(), Some("abc".to_string()));
        assert_eq!(rig.session.buffer().serialize(), "abc");
    }

    #[test]
    fn test_percent_pending_drops_key_and_jumps() {
        // '%' followed by a key other than y/d performs the bracket jump
        // and drops the intervening key.
        let mut rig = Rig::with_lines(&["(a(b)c)"]);
        rig.keys(&[Key::Char('%'), Key::Char('j')]);
        assert_eq!(rig.session.cursor, Position::new(0, 6));
    }

    #[test]
    fn test_percent_delete_whole_buffer() {
        let mut rig = Rig::with_lines(&["a", "b"]);
        rig.keys(&[Key::Char('%'), Key::Char('d')]);
        assert_eq!(rig.session.buffer().serialize(), "");
        assert_eq!(rig.clipboard.paste(), Some("a\nb".to_string()));
        rig.key(Key::Char('u'));
        assert_eq!(rig.session.buffer().serialize(), "a\nb");
    }

    #[test]
    fn test_percent_yank_whole_buffer() {
        let mut rig = Rig::with_lines(&["a", "b"]);
        rig.keys(&[Key::Char('%'), Key::Char('y')]);
        assert_eq!(rig.session.buffer().serialize(), "a\nb");
        assert_eq!(rig.clipboard.paste(), Some("a\nb".to_string()));
    }

    #[test]
    fn test_delete_to_bracket() {
        let mut rig = Rig::with_lines(&["x(abc)y"]);
        rig.session.cursor = Position::new(0, 1);
        rig.keys(&[Key::Char('d'), Key::Char('%')]);
        assert_eq!(rig.session.buffer().serialize(), "xy");
        assert_eq!(rig.clipboard.paste(), Some("(abc)".to_string()));
        assert_eq!(rig.session.cursor, Position::new(0, 1));
    }

    #[test]
    fn test_search_prompt_flow() {
        let mut rig = Rig::with_lines(&["miss", "hit here", "hit again"]);
        rig.key(Key::Char('/'));
        rig.type_str("hit");
        rig.key(Key::Enter);
        assert_eq!(rig.session.mode, Mode::Normal);
        assert_eq!(rig.session.cursor, Position::new(1, 0));
        assert!(rig.session.search.highlight_active());

        rig.key(Key::Char('n'));
        assert_eq!(rig.session.cursor.line, 2);
        rig.key(Key::Char('n'));
        assert_eq!(rig.session.cursor.line, 1);
        rig.key(Key::Char('N'));
        assert_eq!(rig.session.cursor.line, 2);

        rig.key(Key::Esc);
        assert!(!rig.session.search.highlight_active());
    }

    #[test]
    fn test_command_prompt_history_recall() {
        let mut rig = Rig::with_lines(&["a"]);
        rig.key(Key::Char(':'));
        rig.type_str("noh");
        rig.key(Key::Enter);

        rig.key(Key::Char(':'));
        rig.key(Key::Up);
        assert_eq!(rig.session.prompt.as_ref().unwrap().text(), "noh");
        rig.key(Key::Down);
        assert_eq!(rig.session.prompt.as_ref().unwrap().text(), "");
        rig.key(Key::Esc);
    }

    #[test]
    fn test_free_scroll_latch() {
        let lines: Vec<String> = (0..100).map(|i| format!("line {i}")).collect();
        let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut rig = Rig::with_lines(&lines);

        rig.key(Key::Ctrl('e'));
        assert!(rig.session.free_scroll);
        assert_eq!(rig.session.buffer().scroll_offset(), 1);
        // The cursor stays at line 0 even though it is scrolled off.
        assert_eq!(rig.session.cursor.line, 0);

        // Any movement clears the latch and snaps the view back.
        rig.key(Key::Char('j'));
        assert!(!rig.session.free_scroll);
        assert_eq!(rig.session.buffer().scroll_offset(), 1);
        assert_eq!(rig.session.cursor.line, 1);
    }

    #[test]
    fn test_buffer_switch_resets_cursor() {
        let mut rig = Rig::with_lines(&["a", "b", "c"]);
        rig.session.buffers.add(Buffer::blank("other")).unwrap();
        rig.session.after_buffer_switch();
        rig.session.cursor = Position::ZERO;
        rig.keys(&[Key::Char('g'), Key::Char('T')]);
        assert_eq!(rig.session.buffers.current_index(), 0);
        assert_eq!(rig.session.cursor, Position::ZERO);
    }

    #[test]
    fn test_quit_key_ends_session() {
        let mut rig = Rig::with_lines(&["a"]);
        rig.key(Key::Char('q'));
        assert!(!rig.session.running);
    }

    #[test]
    fn test_close_key_discards_dirty_buffer() {
        let mut rig = Rig::with_lines(&["a"]);
        rig.session.buffers.add(Buffer::blank("b")).unwrap();
        rig.session.after_buffer_switch();
        rig.session.buffer_mut().mark_dirty();
        rig.key(Key::Char('x'));
        assert_eq!(rig.session.buffers.len(), 1);
        assert!(rig.session.running);
        // The last buffer stays open.
        rig.key(Key::Char('x'));
        assert_eq!(rig.session.buffers.len(), 1);
        assert!(!rig.session.status.text().is_empty());
    }

    #[test]
    fn test_view_toggles() {
        let mut rig = Rig::with_lines(&["a"]);
        assert!(rig.session.viewport.line_numbers);
        rig.key(Key::Char('L'));
        assert!(!rig.session.viewport.line_numbers);
        assert!(!rig.session.viewport.wrap);
        rig.key(Key::Char('T'));
        assert!(rig.session.viewport.wrap);
    }

    #[test]
    fn test_cursor_always_in_bounds() {
        let mut rig = Rig::with_lines(&["abc", "d"]);
        let keys = [
            Key::Char('j'),
            Key::Char('l'),
            Key::Char('l'),
            Key::Char('k'),
            Key::Char('d'),
            Key::Char('d'),
            Key::Char('j'),
            Key::Char('G'),
        ];
        for k in keys {
            rig.key(k);
            let b = rig.session.buffer();
            assert!(rig.session.cursor.line < b.line_count());
            assert!(rig.session.cursor.col <= b.line(rig.session.cursor.line).len());
        }
    }
}
