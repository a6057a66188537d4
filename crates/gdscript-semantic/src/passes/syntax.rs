//! Pass 1: reports every invalid token the reader left behind so later
//! passes don't need to special-case recovery slots.

use gdscript_diagnostics::DiagnosticCode;

use crate::context::Context;

pub fn run(ctx: &mut Context) {
    let root = ctx.tree.root();
    let spans: Vec<_> = ctx.tree.all_invalid_tokens(root).into_iter().map(|t| t.span).collect();
    for span in spans {
        ctx.report(DiagnosticCode::InvalidToken, "invalid token", span);
    }
}
