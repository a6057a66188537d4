//! The state every validation pass shares, threaded through explicitly
//! rather than reached for as a global — each pass takes a `&mut Context`
//! as its first argument and reports through it.

use gdscript_ast::{NodeId, Tree};
use gdscript_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticList};
use gdscript_position::{ByteSpan, LineIndex};
use gdscript_runtime::RuntimeTypeProvider;
use gdscript_symbols::SymbolTable;

use crate::call_observation::CallObservation;
use crate::declarations::Declarations;

/// Everything a pass needs to read the file under analysis and report
/// findings against it.
pub struct Context<'a> {
    pub source: &'a str,
    pub tree: &'a Tree,
    pub line_index: LineIndex,
    pub runtime: &'a dyn RuntimeTypeProvider,
    pub symbols: SymbolTable,
    pub declarations: Declarations,
    /// Name of the method currently being walked, if any. Tracked by
    /// the scope pass so a call observation can record which method it
    /// was made from, for the cross-method flow analyzer.
    pub current_method: Option<String>,
    /// Every call expression the scope pass walked through, in source
    /// order. Consumed downstream by the call-site registry; a plain
    /// validation run that never looks at it pays only the cost of the
    /// `Vec` pushes.
    pub call_observations: Vec<CallObservation>,
    /// `(use_site, declaration)` pairs recorded each time a bare
    /// identifier resolves to a declared symbol. Consumed by
    /// reference-lookup queries that need exact, scope-resolved hits
    /// rather than a name-text scan.
    pub reference_observations: Vec<(NodeId, NodeId)>,
    diagnostics: DiagnosticList,
}

impl<'a> Context<'a> {
    pub fn new(source: &'a str, tree: &'a Tree, runtime: &'a dyn RuntimeTypeProvider) -> Self {
        Context {
            source,
            tree,
            line_index: LineIndex::new(source),
            runtime,
            symbols: SymbolTable::new(),
            declarations: Declarations::default(),
            current_method: None,
            call_observations: Vec::new(),
            reference_observations: Vec::new(),
            diagnostics: DiagnosticList::new(),
        }
    }

    /// The byte span covered by every token under `node`, or an empty
    /// span at the start of the file when `node` carries no tokens
    /// (synthetic error nodes the reader inserted during recovery).
    pub fn span_of(&self, node: NodeId) -> ByteSpan {
        self.tree.span(node).unwrap_or_else(|| ByteSpan::empty(0))
    }

    pub fn report(&mut self, code: DiagnosticCode, message: impl Into<String>, span: ByteSpan) {
        let position = self.line_index.line_col(span.start);
        self.diagnostics.push(Diagnostic::new(code, message.into(), span, position));
    }

    pub fn report_at(&mut self, code: DiagnosticCode, message: impl Into<String>, node: NodeId) {
        let span = self.span_of(node);
        self.report(code, message, span);
    }

    pub fn into_diagnostics(mut self) -> DiagnosticList {
        self.diagnostics.sort();
        self.diagnostics
    }

    /// Consumes the context, returning every piece downstream consumers
    /// (the call-site registry, project-level query API) need once the
    /// walk is done. All four are `NodeId`-indexed rather than borrowing
    /// `tree` directly, so they outlive the `'a` this context was built
    /// with.
    pub fn into_parts(mut self) -> ContextParts {
        self.diagnostics.sort();
        ContextParts {
            diagnostics: self.diagnostics,
            symbols: self.symbols,
            declarations: self.declarations,
            call_observations: self.call_observations,
            reference_observations: self.reference_observations,
        }
    }
}

/// Owned result of [`Context::into_parts`].
pub struct ContextParts {
    pub diagnostics: DiagnosticList,
    pub symbols: SymbolTable,
    pub declarations: Declarations,
    pub call_observations: Vec<CallObservation>,
    pub reference_observations: Vec<(NodeId, NodeId)>,
}
