//! File I/O: loading and saving buffers, with input scrubbing.
//!
//! Loaded text is scrubbed of artifacts that would corrupt a plain-text
//! line store: carriage returns, ANSI escape sequences, and the
//! backspace-overstrike bold/underline convention used by `man` output.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use crate::buffer::{Buffer, MAX_LINE_LEN};
use crate::error::Result;

/// Load `path` into a new buffer.
///
/// A missing file yields a blank buffer already marked dirty, so the
/// first save creates it. Other I/O failures are returned.
pub fn load(path: &str) -> Result<Buffer> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path, "new file");
            let mut buffer = Buffer::blank(path);
            buffer.mark_dirty();
            return Ok(buffer);
        }
        Err(e) => {
            warn!(path, error = %e, "load failed");
            return Err(e.into());
        }
    };
    let lines = read_lines(&text);
    debug!(path, lines = lines.len(), "loaded");
    Ok(Buffer::from_lines(path, lines))
}

/// Write the buffer's serialized text to `path`.
///
/// Lines are joined by `\n` with no trailing separator. The caller
/// clears the dirty flag on success.
pub fn save(buffer: &Buffer, path: &str) -> Result<()> {
    fs::write(Path::new(path), buffer.serialize())?;
    debug!(path, lines = buffer.line_count(), "saved");
    Ok(())
}

/// Split text into scrubbed lines.
///
/// Handles the last line not ending in a newline; a trailing newline
/// produces no extra empty line.
pub fn read_lines(text: &str) -> Vec<String> {
    text.lines().map(scrub_line).collect()
}

/// Scrub one raw line: drop carriage returns and ANSI CSI/OSC escape
/// sequences, resolve backspace overstrikes (`c\bc`, `_\bc`), trim
/// trailing whitespace, and cap the length.
fn scrub_line(raw: &str) -> String {
    let mut out = String::new();
    let mut count = 0usize;
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {}
            '\x08' => {
                // Overstrike: the struck character is superseded by the
                // one following the backspace.
                if out.pop().is_some() {
                    count -= 1;
                }
                if let Some(&next) = chars.peek() {
                    if next != '\x08' {
                        out.push(next);
                        count += 1;
                        chars.next();
                    }
                }
            }
            '\x1b' => match chars.peek() {
                Some('[') => {
                    chars.next();
                    // CSI: parameters and intermediates end at 0x40-0x7e.
                    for esc in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&esc) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    // OSC: terminated by BEL or ESC \.
                    while let Some(esc) = chars.next() {
                        if esc == '\x07' {
                            break;
                        }
                        if esc == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            },
            _ => {
                out.push(c);
                count += 1;
            }
        }
        if count >= MAX_LINE_LEN {
            break;
        }
    }
    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_missing_file_is_blank_and_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        let buffer = load(path.to_str().unwrap()).unwrap();
        assert_eq!(buffer.line_count(), 1);
        assert!(buffer.is_dirty());
    }

    #[test]
    fn test_load_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.txt");
        let path = path.to_str().unwrap();

        let buffer = Buffer::from_lines(path, vec!["one".into(), "two".into()]);
        save(&buffer, path).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "one\ntwo");

        let loaded = load(path).unwrap();
        assert_eq!(loaded.serialize(), "one\ntwo");
        assert!(!loaded.is_dirty());
    }

    #[test]
    fn test_load_strips_crlf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dos.txt");
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(b"a\r\nb\r\n").unwrap();
        let buffer = load(path.to_str().unwrap()).unwrap();
        assert_eq!(buffer.serialize(), "a\nb");
    }

    #[test]
    fn test_scrub_overstrike_bold_and_underline() {
        assert_eq!(scrub_line("N\x08NA\x08AM\x08ME\x08E"), "NAME");
        assert_eq!(scrub_line("_\x08w_\x08o_\x08r_\x08d"), "word");
    }

    #[test]
    fn test_scrub_ansi_sequences() {
        assert_eq!(scrub_line("\x1b[1;31mred\x1b[0m plain"), "red plain");
        assert_eq!(scrub_line("\x1b]0;title\x07text"), "text");
    }

    #[test]
    fn test_scrub_trims_trailing_whitespace() {
        assert_eq!(scrub_line("text   \t"), "text");
    }

    #[test]
    fn test_scrub_caps_line_length() {
        let long = "x".repeat(MAX_LINE_LEN + 100);
        assert_eq!(scrub_line(&long).chars().count(), MAX_LINE_LEN);
    }
}
