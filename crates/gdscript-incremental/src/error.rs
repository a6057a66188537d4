//! This crate re-exports [`gdscript_project::ToolError`] rather than
//! defining a second, incompatible error enum — every call site that
//! can hit a cache error can also hit a project I/O error, and callers
//! want one `Result` type across that boundary (see DESIGN.md).

pub use gdscript_project::ToolError;
