//! Incremental reanalysis pipeline for GDScript projects (§4.K):
//! content-hash change tracking, a dependency graph for computing the
//! affected closure of an edit, a call-site delta updater that avoids
//! re-registering unchanged methods, and a two-implementation analysis
//! cache with LRU-by-mtime eviction on disk.

mod cache;
mod delta;
mod error;
mod graph;
mod hash;
mod parse_incremental;
mod pipeline;
mod state;
mod tracker;

pub use cache::{cache_key, CacheStats, DiskCache, InMemoryCache};
pub use delta::{affected_files, apply_call_site_delta};
pub use error::ToolError;
pub use graph::{rebuild_edges_for_file, rebuild_graph, DependencyGraph};
pub use hash::content_hash;
pub use parse_incremental::{parse_incremental, IncrementalParseResult, TextChange};
pub use pipeline::IncrementalPipeline;
pub use state::{PersistedState, STATE_VERSION};
pub use tracker::{ChangeSet, FileChangeTracker};
