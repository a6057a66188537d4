//! Interfaces the embedding host provides to the rest of the toolkit.
//!
//! Four seams: the runtime's type system ([`RuntimeTypeProvider`]), the
//! file system ([`FileSystemProvider`]), the active project
//! ([`ProjectContext`]), and a narrow logging facade ([`Logger`]) used
//! only by the incremental cache and a scene-provider boundary, not as
//! a general substitute for `tracing`.

mod fs;
mod logger;
mod project;
mod types;

pub use fs::{FileSystemProvider, StdFileSystem};
pub use logger::{Logger, NullLogger, TracingLogger};
pub use project::ProjectContext;
pub use types::{GlobalFunctionInfo, MemberInfo, NullRuntimeTypeProvider, RuntimeTypeProvider, TypeInfo};
