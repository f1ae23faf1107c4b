//! The `:` command dispatcher.

use tracing::debug;

use crate::buffer::BufferSet;
use crate::error::EditorError;
use crate::external::{BufferEntry, Clipboard, Picker};
use crate::history;
use crate::io;
use crate::session::EditorSession;
use crate::{edit, buffer::Position};

/// Execute a submitted command line (without its `:` sigil).
///
/// Commands act on session and buffer-set state; failures surface as
/// status messages, never as errors that end the session.
pub fn execute(
    session: &mut EditorSession,
    input: &str,
    clipboard: &mut dyn Clipboard,
    picker: &mut dyn Picker,
) {
    let input = input.trim();
    if input.is_empty() {
        return;
    }
    debug!(command = input, "execute");

    if input.chars().all(|c| c.is_ascii_digit()) {
        goto_line(session, input);
        return;
    }

    let (word, arg) = match input.split_once(char::is_whitespace) {
        Some((word, arg)) => (word, arg.trim()),
        None => (input, ""),
    };

    match word {
        "q" => quit_one(session, false),
        "q!" => quit_one(session, true),
        "qa" | "qall" => quit_all(session, false),
        "qa!" | "qall!" => quit_all(session, true),
        "w" => write_buffer(session, arg),
        "noh" | "nohlsearch" => session.search.clear(),
        "p" => paste_at_cursor(session, clipboard),
        "b" => buffer_command(session, arg, picker),
        "ls" | "buffers" => buffer_menu(session, picker),
        _ => session.set_status(format!("Not a command: {word}")),
    }
}

/// Paste the clipboard at the cursor under a single undo snapshot.
///
/// Shared between `:p` and the Normal-mode paste key.
pub(crate) fn paste_at_cursor(session: &mut EditorSession, clipboard: &mut dyn Clipboard) {
    let Some(text) = clipboard.paste() else {
        session.set_status("Clipboard empty or unavailable");
        return;
    };
    if text.is_empty() {
        return;
    }
    history::push_snapshot(session.buffer_mut());
    let cursor = session.cursor;
    session.cursor = edit::insert_text(session.buffer_mut(), cursor, &text);
}

fn goto_line(session: &mut EditorSession, digits: &str) {
    let Ok(n) = digits.parse::<usize>() else {
        session.set_status("Line number out of range");
        return;
    };
    let last = session.buffer().line_count() - 1;
    session.cursor = Position::new(n.saturating_sub(1).min(last), 0);
}

pub(crate) fn quit_one(session: &mut EditorSession, force: bool) {
    if !force && session.buffer().is_dirty() {
        session.set_status("No write since last change (use q! to close, w to save)");
        return;
    }
    match session.buffers.close_current() {
        Ok(()) => session.after_buffer_switch(),
        Err(e) => session.set_status(e.to_string()),
    }
}

pub(crate) fn quit_all(session: &mut EditorSession, force: bool) {
    if !force && session.buffers.any_dirty() {
        let n = session.buffers.dirty_count();
        let plural = if n == 1 { "" } else { "s" };
        session.set_status(format!("{n} modified buffer{plural} (use qa! to quit anyway)"));
        return;
    }
    session.running = false;
}

fn write_buffer(session: &mut EditorSession, arg: &str) {
    if !arg.is_empty() && session.buffer().is_unnamed() {
        session.buffer_mut().set_path(arg);
    }
    let path = if arg.is_empty() {
        session.buffer().path().to_string()
    } else {
        arg.to_string()
    };
    if path.is_empty() {
        session.set_status(EditorError::NoFileName.to_string());
        return;
    }
    match io::save(session.buffer(), &path) {
        Ok(()) => {
            session.buffer_mut().mark_clean();
            let lines = session.buffer().line_count();
            session.set_status(format!("\"{path}\" {lines}L written"));
        }
        Err(e) => session.set_status(format!("Write failed: {e}")),
    }
}

fn buffer_command(session: &mut EditorSession, arg: &str, picker: &mut dyn Picker) {
    match arg {
        "new" => match session.buffers.add_blank() {
            Ok(_) => session.after_buffer_switch(),
            Err(e) => session.set_status(e.to_string()),
        },
        "n" => {
            session.buffers.next();
            session.after_buffer_switch();
        }
        "p" => {
            session.buffers.prev();
            session.after_buffer_switch();
        }
        "a" | "add" => open_via_picker(session, picker),
        _ if arg.chars().all(|c| c.is_ascii_digit()) && !arg.is_empty() => {
            let n: usize = arg.parse().unwrap_or(0);
            if n >= 1 && session.buffers.switch_to(n - 1) {
                session.after_buffer_switch();
            } else {
                session.set_status(format!("No buffer {arg}"));
            }
        }
        _ => session.set_status("Usage: b new|n|p|a|<num>"),
    }
}

fn open_via_picker(session: &mut EditorSession, picker: &mut dyn Picker) {
    let Some(path) = picker.pick_file() else {
        return;
    };
    let path = path.to_string_lossy().into_owned();
    match io::load(&path) {
        Ok(buffer) => match session.buffers.add(buffer) {
            Ok(_) => session.after_buffer_switch(),
            Err(e) => session.set_status(e.to_string()),
        },
        Err(e) => session.set_status(format!("Open failed: {e}")),
    }
}

fn buffer_menu(session: &mut EditorSession, picker: &mut dyn Picker) {
    let entries = list_entries(&session.buffers);
    if let Some(index) = picker.pick_buffer(&entries) {
        if session.buffers.switch_to(index) {
            session.after_buffer_switch();
        }
    }
}

fn list_entries(buffers: &BufferSet) -> Vec<BufferEntry> {
    buffers
        .iter()
        .enumerate()
        .map(|(index, b)| BufferEntry {
            index,
            name: b.display_name().to_string(),
            dirty: b.is_dirty(),
        })
        .collect()
}
