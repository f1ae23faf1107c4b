//! Buffer module: line storage, open-document metadata, and the buffer set.

mod buffer;
mod language;
mod line;
mod set;

pub use buffer::{Buffer, Position};
pub use language::Language;
pub use line::{TextLine, MAX_LINE_LEN};
pub use set::{BufferSet, MAX_BUFFERS};
