//! Input module: key normalization, the prompt line, command dispatch,
//! and the modal state machine.

pub mod command;
mod dispatch;
mod key;
mod prompt;

pub use dispatch::handle_key;
pub use key::Key;
pub use prompt::{Prompt, PromptHistory, PromptKind, HISTORY_MAX, PROMPT_MAX};
