//! Command-line prompt buffer and its submission history.

use std::collections::VecDeque;

/// Maximum characters accepted into the prompt buffer.
pub const PROMPT_MAX: usize = 512;

/// Maximum retained prompt submissions.
pub const HISTORY_MAX: usize = 25;

/// What the prompt, once submitted, is interpreted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// A `:` command line.
    Command,
    /// A `/` search term.
    Search,
}

impl PromptKind {
    /// The character echoed before the entered text.
    pub const fn sigil(self) -> char {
        match self {
            Self::Command => ':',
            Self::Search => '/',
        }
    }
}

/// The transient prompt line while Command mode is active.
#[derive(Debug)]
pub struct Prompt {
    /// Interpretation of the text on submit.
    pub kind: PromptKind,
    text: String,
}

impl Prompt {
    /// Open an empty prompt of the given kind.
    pub const fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            text: String::new(),
        }
    }

    /// The entered text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Append a character, ignored once the bound is reached.
    pub fn push(&mut self, c: char) {
        if self.text.chars().count() < PROMPT_MAX {
            self.text.push(c);
        }
    }

    /// Remove the last character.
    pub fn pop(&mut self) {
        self.text.pop();
    }

    /// Replace the text wholesale (history recall).
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }
}

/// Bounded, navigable ring of past prompt submissions.
///
/// Navigation position semantics: `pos == len` means "past the newest
/// entry" (a fresh prompt); `prev` moves toward older entries, `next`
/// back toward the fresh prompt.
#[derive(Debug, Default)]
pub struct PromptHistory {
    entries: VecDeque<String>,
    pos: usize,
}

impl PromptHistory {
    /// Record a submission: leading whitespace is trimmed, empty entries
    /// and consecutive duplicates are skipped, oldest entries drop past
    /// capacity. Resets the navigation position to the fresh end.
    pub fn record(&mut self, entry: &str) {
        let entry = entry.trim_start();
        if !entry.is_empty() && self.entries.back().map(String::as_str) != Some(entry) {
            while self.entries.len() >= HISTORY_MAX {
                self.entries.pop_front();
            }
            self.entries.push_back(entry.to_string());
        }
        self.pos = self.entries.len();
    }

    /// Step toward older entries, returning the recalled text.
    pub fn prev(&mut self) -> Option<&str> {
        if self.pos == 0 {
            return None;
        }
        self.pos -= 1;
        self.entries.get(self.pos).map(String::as_str)
    }

    /// Step back toward newer entries. Past the newest entry the prompt
    /// goes blank (`Some("")`); already there, `None`.
    pub fn next(&mut self) -> Option<&str> {
        if self.pos >= self.entries.len() {
            return None;
        }
        self.pos += 1;
        Some(
            self.entries
                .get(self.pos)
                .map_or("", String::as_str),
        )
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no entries are retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
