//! Arena-indexed, lossless syntax tree for GDScript.
//!
//! Every node lives in a [`Tree`]'s arena and is addressed by [`NodeId`],
//! an index rather than an owning reference: each node lives in an
//! index-addressed vector owned by the root, and parent back-references
//! are indices rather than owning handles, so the tree never needs
//! `Rc`/`Weak` cycles to represent parent links.
//!
//! [`NodeKind`] is a tagged variant covering four polymorphic node
//! families — declarations, statements, expressions, and type nodes —
//! plus a generic [`ListKind`] node for comma/newline separated
//! sequences and an [`NodeKind::Error`] recovery placeholder.

mod kind;
mod list;
mod tree;

pub use kind::NodeKind;
pub use list::ListKind;
pub use tree::{NodeData, NodeId, Tree};

pub use gdscript_position::ByteSpan;
pub use gdscript_token::{Token, TokenKind};
