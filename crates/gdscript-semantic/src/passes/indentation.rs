//! Optional pass: flags mixed tabs/spaces within one indentation run,
//! and dedents that don't land on any enclosing block's column. Purely
//! token-based — it never needs the scope stack or symbol table.

use gdscript_diagnostics::DiagnosticCode;
use gdscript_token::TokenKind;

use crate::context::Context;

pub fn run(ctx: &mut Context) {
    let root = ctx.tree.root();
    let tokens = ctx.tree.all_tokens(root);

    let mut block_columns: Vec<usize> = vec![0];
    for token in &tokens {
        if token.kind != TokenKind::Indentation {
            continue;
        }
        let text = token.text.as_ref();
        if text.contains(' ') && text.contains('\t') {
            ctx.report(DiagnosticCode::InconsistentIndentation, "mixed tabs and spaces in indentation", token.span);
            continue;
        }
        let width = text.chars().count();
        match block_columns.last().copied() {
            Some(current) if width > current => block_columns.push(width),
            Some(current) if width == current => {}
            _ => {
                if let Some(pos) = block_columns.iter().position(|&c| c == width) {
                    block_columns.truncate(pos + 1);
                } else {
                    ctx.report(DiagnosticCode::IndentationMismatch, "dedent does not match any enclosing block", token.span);
                }
            }
        }
    }
}
