//! # Scribe
//!
//! The editing core of a modal, multi-buffer terminal text editor.
//!
//! Scribe owns the hard part of an editor: buffers, edits, undo,
//! search, bracket matching, viewport math, and the modal key state
//! machine. Painting, syntax coloring, and OS integration are left to
//! its embedder.
//!
//! ## Core Concepts
//!
//! - **Session aggregate**: one [`EditorSession`] owns all mutable state;
//!   handlers take it by reference, no globals
//! - **Snapshot undo**: bounded rings of full-text snapshots, with
//!   Insert-mode runs coalesced into single entries
//! - **Clamp, don't fail**: cursor and column bounds are clamped;
//!   only capacity, I/O, and missing-file conditions surface as outcomes
//! - **External seams**: clipboard, file/buffer pickers, and rendering
//!   sit behind traits and read-only accessors
//!
//! ## Example
//!
//! ```rust,ignore
//! use scribe::{Buffer, EditorSession, Key, Viewport};
//! use scribe::external::{MemoryClipboard, NullPicker};
//!
//! let buffer = scribe::io::load("notes.txt")?;
//! let mut session = EditorSession::new(buffer, Viewport::new(80, 24));
//! let mut clipboard = MemoryClipboard::default();
//! let mut picker = NullPicker;
//!
//! // Feed key events from the terminal.
//! scribe::input::handle_key(&mut session, Key::Char('i'), &mut clipboard, &mut picker);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod bracket;
pub mod buffer;
pub mod edit;
pub mod error;
pub mod external;
pub mod history;
pub mod input;
pub mod io;
pub mod search;
pub mod session;
pub mod viewport;

// Re-exports for convenience
pub use buffer::{Buffer, BufferSet, Language, Position, TextLine, MAX_BUFFERS, MAX_LINE_LEN};
pub use error::{EditorError, Result};
pub use input::{handle_key, Key};
pub use session::{EditorSession, Mode, Operator, Pending, Selection};
pub use viewport::Viewport;
