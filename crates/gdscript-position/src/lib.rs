//! Byte-span and line/column position tracking.
//!
//! GDScript diagnostics are reported as 1-based lines and 0-based columns.
//! The parser itself only ever needs byte offsets,
//! which are cheap to carry around and compare; [`LineIndex`] converts
//! between the two on demand so the hot parsing path never has to count
//! newlines itself.

mod line_index;
mod span;

pub use line_index::LineIndex;
pub use span::{ByteSpan, LineCol};
