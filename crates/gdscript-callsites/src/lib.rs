//! The call-site registry (§4.H) and cross-method flow analyzer (§4.I).
//!
//! `gdscript-semantic` records a [`CallObservation`](gdscript_semantic::CallObservation)
//! for every call expression it walks, independent of which validation
//! passes are enabled. This crate turns those observations into
//! [`CallSiteEntry`] values keyed by `(target class, method name)`,
//! stores them in a concurrent [`CallSiteRegistry`], and uses the
//! accumulated registry to synthesize parameter types
//! ([`infer_parameter_types`]) and classify field readiness
//! ([`classify_field_readiness`]) across method boundaries.

mod classify;
mod entry;
mod flow;
mod readiness;
mod registry;

pub use classify::classify_call_sites;
pub use entry::{CallSiteEntry, Confidence, WILDCARD_CLASS};
pub use flow::{infer_parameter_types, ParameterInference, TypeConfidence};
pub use readiness::{classify_field_readiness, runs_after_ready, Readiness};
pub use registry::CallSiteRegistry;
