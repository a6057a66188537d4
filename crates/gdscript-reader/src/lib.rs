//! Lossless reader and round-trip printer for GDScript source: turns
//! text into a `gdscript_ast::Tree` and back, never failing to produce
//! a tree even for malformed input. See the crate README for the shape
//! of the three resolvers that make this up.

mod error;
mod lexer;
mod parser;
mod parser_context;
mod printer;

pub use error::InternalParserInconsistency;
pub use parser::{parse_expression, parse_file, parse_file_with_budget, parse_statement, ParseOutput};
pub use parser_context::ParseBudget;
pub use printer::{print_subtree, print_tree};

pub use gdscript_ast::{NodeId, NodeKind, Tree};
pub use gdscript_token::{Token, TokenKind};
