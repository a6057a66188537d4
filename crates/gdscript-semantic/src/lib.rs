//! Multi-pass validation and type inference over a parsed GDScript file.
//!
//! [`validate_code`] parses `text` with `gdscript-reader`, then runs the
//! declaration collector, the scope-aware analysis walk (scope, type,
//! call, and control-flow checks fused into one traversal — see
//! [`passes::analysis_pass`] for why), the syntax pass, and optionally
//! the indentation pass, returning every diagnostic they raised.

mod call_observation;
mod context;
mod declarations;
mod gdtype;
mod inference;
mod options;
mod passes;

pub use call_observation::{CallCallee, CallObservation};
pub use context::Context;
pub use declarations::{Declarations, MethodSignature};
pub use gdtype::GDType;
pub use inference::infer;
pub use options::GDValidationOptions;
pub use passes::{analysis_pass, declaration_pass, indentation_pass, syntax_pass};

use gdscript_ast::NodeId;
use gdscript_diagnostics::DiagnosticList;
use gdscript_reader::parse_file;
use gdscript_runtime::RuntimeTypeProvider;
use gdscript_symbols::SymbolTable;

/// Everything a single validation run produces, beyond the diagnostic
/// list `validate_code`/`validate_tree` hand back on their own. Callers
/// that only want diagnostics should keep using those two functions;
/// `gdscript-callsites` and `gdscript-project` need the rest to build
/// the call-site registry and the cross-file symbol index.
pub struct Analysis {
    pub diagnostics: DiagnosticList,
    pub symbols: SymbolTable,
    pub declarations: Declarations,
    pub call_observations: Vec<CallObservation>,
    pub reference_observations: Vec<(NodeId, NodeId)>,
}

/// Parses `text` and runs every pass selected by `options`, returning
/// the accumulated diagnostics sorted by (line, column, code).
pub fn validate_code(text: &str, options: &GDValidationOptions, runtime: &dyn RuntimeTypeProvider) -> DiagnosticList {
    let output = parse_file(text);
    validate_tree(text, &output.tree, options, runtime)
}

/// Runs the passes over an already-parsed tree, for callers that parsed
/// once and want to validate without reparsing (the incremental
/// pipeline's reanalysis path).
pub fn validate_tree(
    source: &str,
    tree: &gdscript_ast::Tree,
    options: &GDValidationOptions,
    runtime: &dyn RuntimeTypeProvider,
) -> DiagnosticList {
    analyze_tree(source, tree, options, runtime).diagnostics
}

/// Parses `text` and runs every pass selected by `options`, keeping the
/// symbol table, declaration set, and call/reference observations the
/// run produced instead of discarding everything but diagnostics.
pub fn analyze_code(text: &str, options: &GDValidationOptions, runtime: &dyn RuntimeTypeProvider) -> Analysis {
    let output = parse_file(text);
    analyze_tree(text, &output.tree, options, runtime)
}

/// [`analyze_code`], over an already-parsed tree.
pub fn analyze_tree(
    source: &str,
    tree: &gdscript_ast::Tree,
    options: &GDValidationOptions,
    runtime: &dyn RuntimeTypeProvider,
) -> Analysis {
    let mut ctx = Context::new(source, tree, runtime);

    if options.check_syntax {
        passes::syntax_pass(&mut ctx);
    }

    passes::declaration_pass(&mut ctx);

    if options.check_scope || options.check_types || options.check_calls || options.check_control_flow {
        passes::analysis_pass(&mut ctx, options);
    }

    if options.check_indentation {
        passes::indentation_pass(&mut ctx);
    }

    let parts = ctx.into_parts();
    Analysis {
        diagnostics: parts.diagnostics,
        symbols: parts.symbols,
        declarations: parts.declarations,
        call_observations: parts.call_observations,
        reference_observations: parts.reference_observations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdscript_runtime::NullRuntimeTypeProvider;

    #[test]
    fn undeclared_variable_is_reported() {
        let source = "func f():\n\treturn undeclared_name\n";
        let runtime = NullRuntimeTypeProvider;
        let diagnostics = validate_code(source, &GDValidationOptions::default(), &runtime);
        assert!(!diagnostics.is_empty());
    }

    #[test]
    fn declared_local_is_not_reported_as_undefined() {
        let source = "func f():\n\tvar x = 1\n\treturn x\n";
        let runtime = NullRuntimeTypeProvider;
        let diagnostics = validate_code(source, &GDValidationOptions::default(), &runtime);
        assert!(diagnostics.errors.iter().all(|d| d.code != gdscript_diagnostics::DiagnosticCode::UndefinedVariable));
    }

    #[test]
    fn break_outside_loop_is_reported() {
        let source = "func f():\n\tbreak\n";
        let runtime = NullRuntimeTypeProvider;
        let diagnostics = validate_code(source, &GDValidationOptions::default(), &runtime);
        assert!(diagnostics
            .warnings
            .iter()
            .any(|d| d.code == gdscript_diagnostics::DiagnosticCode::BreakOutsideLoop));
    }

    #[test]
    fn duplicate_method_declaration_is_reported() {
        let source = "func f():\n\tpass\n\nfunc f():\n\tpass\n";
        let runtime = NullRuntimeTypeProvider;
        let diagnostics = validate_code(source, &GDValidationOptions::default(), &runtime);
        assert!(diagnostics
            .errors
            .iter()
            .any(|d| d.code == gdscript_diagnostics::DiagnosticCode::DuplicateDeclaration));
    }

    #[test]
    fn disabling_a_pass_silences_its_diagnostics() {
        let source = "func f():\n\treturn undeclared_name\n";
        let runtime = NullRuntimeTypeProvider;
        let options = GDValidationOptions { check_scope: false, ..GDValidationOptions::default() };
        let diagnostics = validate_code(source, &options, &runtime);
        assert!(diagnostics.errors.iter().all(|d| d.code != gdscript_diagnostics::DiagnosticCode::UndefinedVariable));
    }

    #[test]
    fn analyze_code_records_a_bare_call_observation() {
        let source = "func f():\n\tprint(1)\n";
        let runtime = NullRuntimeTypeProvider;
        let analysis = analyze_code(source, &GDValidationOptions::default(), &runtime);
        assert_eq!(analysis.call_observations.len(), 1);
        assert_eq!(analysis.call_observations[0].callee.method_name(), "print");
    }

    #[test]
    fn analyze_code_records_a_self_method_call_observation() {
        let source = "func f():\n\tself.g()\n\nfunc g():\n\tpass\n";
        let runtime = NullRuntimeTypeProvider;
        let analysis = analyze_code(source, &GDValidationOptions::default(), &runtime);
        assert!(analysis
            .call_observations
            .iter()
            .any(|obs| matches!(&obs.callee, CallCallee::SelfMethod(name) if name == "g")
                && obs.caller_method.as_deref() == Some("f")));
    }

    #[test]
    fn analyze_code_records_resolved_identifier_references() {
        let source = "func f():\n\tvar x = 1\n\treturn x\n";
        let runtime = NullRuntimeTypeProvider;
        let analysis = analyze_code(source, &GDValidationOptions::default(), &runtime);
        assert!(!analysis.reference_observations.is_empty());
    }
}
