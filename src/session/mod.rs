//! Editor session: the single aggregate owning all mutable state.
//!
//! One `EditorSession` is passed by mutable reference into every
//! handler; there is no ambient global state.

use tracing::info;

use crate::buffer::{Buffer, BufferSet, Position};
use crate::edit;
use crate::history::{self, InsertLatch};
use crate::input::{Prompt, PromptHistory};
use crate::search::SearchState;
use crate::viewport::Viewport;

/// Keystrokes a status message stays visible for.
pub const STATUS_TICKS: u32 = 80;

/// The editor's modal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Normal mode: commands and motions.
    #[default]
    Normal,
    /// Insert mode: typed characters enter the buffer.
    Insert,
    /// Visual mode: line-granularity selection.
    Visual,
    /// Command mode: a prompt line is being edited.
    Command,
}

/// Pending multi-key chord state, layered on Normal mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pending {
    /// No chord in progress.
    #[default]
    None,
    /// A `g` prefix awaiting its second key.
    Goto,
    /// A `%` prefix awaiting `y`/`d`, else a bracket jump.
    Percent,
    /// An operator awaiting its motion.
    Op(Operator),
}

/// Operators that pair with a following motion or target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Copy to the clipboard.
    Yank,
    /// Delete (and copy) text.
    Delete,
}

/// A line-granularity Visual selection.
#[derive(Debug, Clone, Copy)]
pub struct Selection {
    /// Line where Visual mode was entered.
    pub anchor: usize,
    /// Line the cursor has moved to.
    pub head: usize,
}

impl Selection {
    /// The selected lines as an ordered inclusive pair.
    pub const fn ordered(&self) -> (usize, usize) {
        if self.anchor <= self.head {
            (self.anchor, self.head)
        } else {
            (self.head, self.anchor)
        }
    }
}

/// A transient status-line message with a keystroke countdown.
#[derive(Debug, Default)]
pub struct StatusMessage {
    text: String,
    ticks: u32,
}

impl StatusMessage {
    /// The message, or empty once expired.
    pub fn text(&self) -> &str {
        if self.ticks > 0 { &self.text } else { "" }
    }

    /// Show a message for [`STATUS_TICKS`] keystrokes.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.ticks = STATUS_TICKS;
    }

    /// Decrement the countdown; called once per processed key.
    pub const fn tick(&mut self) {
        self.ticks = self.ticks.saturating_sub(1);
    }
}

/// All mutable editor state for one session.
#[derive(Debug)]
pub struct EditorSession {
    /// Open buffers and the active index.
    pub buffers: BufferSet,
    /// Session cursor, valid for the active buffer.
    pub cursor: Position,
    /// Current mode.
    pub mode: Mode,
    /// Pending chord, meaningful only in Normal mode.
    pub pending: Pending,
    /// Active Visual selection, if any.
    pub selection: Option<Selection>,
    /// Search term and match bookkeeping.
    pub search: SearchState,
    /// The prompt line while Command mode is active.
    pub prompt: Option<Prompt>,
    /// Past prompt submissions.
    pub history: PromptHistory,
    /// Transient status-line message.
    pub status: StatusMessage,
    /// Terminal geometry and wrap setting.
    pub viewport: Viewport,
    /// Set by manual scrolls; suppresses cursor-follow until movement.
    pub free_scroll: bool,
    /// Insert-mode undo coalescing latch.
    pub insert_latch: InsertLatch,
    /// Cleared by a quit command to end the event loop.
    pub running: bool,
}

impl EditorSession {
    /// Create a session around one initial buffer.
    ///
    /// The buffer gets a baseline undo snapshot so the loaded state is
    /// always reachable by undo.
    pub fn new(mut initial: Buffer, viewport: Viewport) -> Self {
        info!(path = initial.path(), "session start");
        history::push_snapshot(&mut initial);
        Self {
            buffers: BufferSet::new(initial),
            cursor: Position::ZERO,
            mode: Mode::Normal,
            pending: Pending::None,
            selection: None,
            search: SearchState::default(),
            prompt: None,
            history: PromptHistory::default(),
            status: StatusMessage::default(),
            viewport,
            free_scroll: false,
            insert_latch: InsertLatch::default(),
            running: true,
        }
    }

    /// The active buffer.
    pub fn buffer(&self) -> &Buffer {
        self.buffers.current()
    }

    /// Mutable access to the active buffer.
    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffers.current_mut()
    }

    /// Show a transient status message.
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status.set(text);
    }

    /// Clamp the cursor into the active buffer's bounds.
    pub fn clamp_cursor(&mut self) {
        self.cursor = edit::clamp(self.buffers.current(), self.cursor);
    }

    /// Scroll so the cursor is visible.
    pub fn ensure_cursor_visible(&mut self) {
        let cursor = self.cursor;
        self.viewport
            .ensure_visible(self.buffers.current_mut(), cursor);
    }

    /// Take the coalesced Insert-mode undo snapshot if not yet taken.
    pub fn arm_insert_undo(&mut self) {
        if !self.insert_latch.is_armed() {
            history::push_snapshot(self.buffers.current_mut());
            self.insert_latch.arm();
        }
    }

    /// Reset session state after a buffer switch or close.
    ///
    /// Cursor and selection drop to buffer-relative defaults; the search
    /// term survives but its counts are retaken against the new buffer.
    pub fn after_buffer_switch(&mut self) {
        self.cursor = Position::ZERO;
        self.selection = None;
        self.free_scroll = false;
        self.search.recount(self.buffers.current());
        self.buffers.current_mut().set_scroll_offset(0);
    }

    /// The selected line range for the renderer, ordered inclusive.
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        self.selection.as_ref().map(Selection::ordered)
    }
}
