//! Project-wide GDScript analysis (§4.J): a collection of
//! [`ScriptFile`]s, scanned from disk or populated directly, analyzed
//! two-pass (sequential declaration collection, then optionally
//! parallel full analysis) via [`Project::analyze_all`], and queried
//! through the call-site registry and reference lookups this crate
//! builds on top of `gdscript-callsites` and `gdscript-semantic`.

mod cancellation;
mod error;
mod index;
mod project;
mod script_file;

pub use cancellation::CancellationToken;
pub use error::ToolError;
pub use index::GlobalIndex;
pub use project::{Parallelism, Project, Reference, SymbolRef};
pub use script_file::ScriptFile;
