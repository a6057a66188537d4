//! # gdscript
//!
//! A library for reading, analyzing, and transforming GDScript source
//! code: a lossless, resumable parser; a round-trip printer; a
//! multi-pass validator with type inference; a project-wide semantic
//! model with reference tracking and a call-site registry; and an
//! incremental reanalysis pipeline for editor integration.
//!
//! This crate re-exports the public surface of its constituent crates
//! (`gdscript-token` through `gdscript-incremental`) under one name and
//! adds the few free functions that tie them together end to end —
//! everything else lives in the crate that owns it, see DESIGN.md for
//! the breakdown.
//!
//! ## Parsing and printing
//!
//! ```
//! use gdscript::{parse_file, print_tree};
//!
//! let source = "extends Node\n\nfunc _ready() -> void:\n\tpass\n";
//! let output = parse_file(source);
//! assert_eq!(print_tree(&output.tree), source);
//! ```
//!
//! ## Validation
//!
//! ```
//! use gdscript::{validate_code, GDValidationOptions, NullRuntimeTypeProvider};
//!
//! let source = "func f():\n\tbreak\n";
//! let diagnostics = validate_code(source, &GDValidationOptions::default(), &NullRuntimeTypeProvider);
//! assert!(!diagnostics.warnings.is_empty());
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub use gdscript_ast::{ListKind, NodeData, NodeId, NodeKind, Token, TokenKind, Tree};

pub use gdscript_position::{ByteSpan, LineCol, LineIndex};

pub use gdscript_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticList, Severity};

pub use gdscript_reader::{
    parse_expression, parse_file, parse_file_with_budget, parse_statement, print_subtree, print_tree, InternalParserInconsistency,
    ParseBudget, ParseOutput,
};

pub use gdscript_runtime::{
    FileSystemProvider, GlobalFunctionInfo, Logger, MemberInfo, NullLogger, NullRuntimeTypeProvider, ProjectContext,
    RuntimeTypeProvider, StdFileSystem, TracingLogger, TypeInfo,
};

pub use gdscript_symbols::{Scope, ScopeId, ScopeKind, Symbol, SymbolKind, SymbolTable};

pub use gdscript_semantic::{
    analyze_code, analyze_tree, validate_code, validate_tree, Analysis, CallCallee, CallObservation, Context, Declarations, GDType,
    GDValidationOptions, MethodSignature,
};

pub use gdscript_callsites::{
    classify_call_sites, classify_field_readiness, infer_parameter_types, runs_after_ready, CallSiteEntry, CallSiteRegistry,
    Confidence, ParameterInference, Readiness, TypeConfidence, WILDCARD_CLASS,
};

pub use gdscript_project::{CancellationToken, GlobalIndex, Parallelism, Project, Reference, ScriptFile, SymbolRef, ToolError};

pub use gdscript_incremental::{
    affected_files, apply_call_site_delta, cache_key, content_hash, parse_incremental, rebuild_edges_for_file, rebuild_graph,
    CacheStats, ChangeSet, DependencyGraph, DiskCache, FileChangeTracker, IncrementalParseResult, IncrementalPipeline, InMemoryCache,
    PersistedState, TextChange, STATE_VERSION,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_validate_and_print_compose_through_the_facade() {
        let source = "extends Node\n\nfunc _ready() -> void:\n\tpass\n";
        let output = parse_file(source);
        assert_eq!(print_tree(&output.tree), source);

        let diagnostics = validate_tree(source, &output.tree, &GDValidationOptions::default(), &NullRuntimeTypeProvider);
        assert!(diagnostics.errors.is_empty());
    }

    #[test]
    fn project_and_incremental_pipeline_are_reachable_from_the_facade() {
        let mut project = Project::new(ProjectContext::new("/project"));
        project.add_file("res://a.gd", "func f():\n\tpass\n");
        project
            .analyze_all(&GDValidationOptions::default(), &NullRuntimeTypeProvider, Parallelism::Sequential, &CancellationToken::new())
            .expect("analysis succeeds");
        assert!(project.file("res://a.gd").is_some());

        let pipeline = IncrementalPipeline::new(project);
        assert_eq!(pipeline.detect_changes().added, vec!["res://a.gd".to_string()]);
    }
}
