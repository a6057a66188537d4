//! Control-flow pass: placement rules for loop/function-scoped keywords
//! and reassignment of immutable symbols, run from the scope walker.

use gdscript_ast::NodeId;
use gdscript_diagnostics::DiagnosticCode;
use gdscript_symbols::ScopeId;

use crate::context::Context;

pub fn check_break_continue(ctx: &mut Context, node: NodeId, scope: ScopeId, is_break: bool) {
    if !ctx.symbols.in_loop(scope) {
        let code = if is_break { DiagnosticCode::BreakOutsideLoop } else { DiagnosticCode::ContinueOutsideLoop };
        let word = if is_break { "break" } else { "continue" };
        ctx.report_at(code, format!("'{word}' outside loop"), node);
    }
}

pub fn check_return(ctx: &mut Context, node: NodeId, scope: ScopeId) {
    if !ctx.symbols.in_function(scope) {
        ctx.report_at(DiagnosticCode::ReturnOutsideFunction, "'return' outside function", node);
    }
}

pub fn check_await(ctx: &mut Context, node: NodeId, scope: ScopeId) {
    if !ctx.symbols.in_function(scope) {
        ctx.report_at(DiagnosticCode::AwaitOutsideFunction, "'await' outside function", node);
    }
}

pub fn check_yield(ctx: &mut Context, node: NodeId, scope: ScopeId) {
    if !ctx.symbols.in_function(scope) {
        ctx.report_at(DiagnosticCode::YieldOutsideFunction, "'yield' outside function", node);
    }
}

pub fn check_super(ctx: &mut Context, node: NodeId, scope: ScopeId) {
    if !ctx.symbols.in_function(scope) {
        ctx.report_at(DiagnosticCode::SuperOutsideMethod, "'super' outside method", node);
    }
}

/// Checks an assignment's left-hand side for reassignment of a `const`
/// or enum-value symbol. `left` must already have been visited so the
/// identifier it names (if any) is resolvable.
pub fn check_assignment_target(ctx: &mut Context, node: NodeId, scope: ScopeId, name: &str) {
    if let Some(symbol) = ctx.symbols.lookup(scope, name) {
        if symbol.kind.is_immutable() {
            ctx.report_at(DiagnosticCode::ConstantReassignment, format!("cannot assign to constant '{name}'"), node);
        }
    }
}
