//! The one error type internal to the reader: an assertion that a
//! resolver's state transition is impossible given the grammar as
//! written (§7.3 "infrastructure errors" / "internal parser
//! inconsistency"). Public parse entry points never propagate this —
//! it's caught at the point the inconsistency is detected, logged, and
//! turned into forced recovery so the tree still comes out complete.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InternalParserInconsistency {
    /// A resolver consumed zero bytes and didn't reach EOF either —
    /// left unchecked this would loop forever instead of terminating
    /// with a tree.
    #[error("resolver made no progress at byte offset {offset} while parsing {context}")]
    NoProgress { offset: usize, context: &'static str },
}
