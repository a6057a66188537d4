//! Scope stack and symbol table.
//!
//! A scope is pushed at each of: file (global), class body, method,
//! lambda, `for`, `while`, `if`/`elif`/`else` body, and match case.
//! Pushing sets the parent pointer; popping does not destroy the scope
//! so the semantic model can query it later by id.

mod scope;
mod symbol;
mod table;

pub use scope::{Scope, ScopeId, ScopeKind};
pub use symbol::{Symbol, SymbolKind};
pub use table::SymbolTable;
