//! Infrastructure error stratum (§7.3): the only error type that
//! crosses this crate's API boundary as a `Result::Err`. Parser input
//! errors and validation diagnostics never reach here — they are
//! values, not failures.

use std::path::PathBuf;

/// An infrastructure failure: I/O, cancellation, or a corrupt on-disk
/// artifact. `gdscript-incremental` re-exports this rather than
/// defining an incompatible sibling enum, since every call site that
/// can hit a cache error can also hit a project I/O error and callers
/// want one `Result` type across that boundary (see DESIGN.md).
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("access denied: {0}")]
    AccessDenied(PathBuf),
    #[error("corrupt cache entry: {0}")]
    CorruptCache(String),
    #[error("operation canceled")]
    Canceled,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
