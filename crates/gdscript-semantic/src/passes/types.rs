//! Type pass: operand and assignment compatibility checks, run from the
//! scope walker (`super::scope`) once both sides of an expression have
//! been inferred.

use gdscript_ast::NodeId;
use gdscript_diagnostics::DiagnosticCode;
use gdscript_token::TokenKind;

use crate::context::Context;
use crate::gdtype::GDType;
use crate::inference::infer;

/// Checks one `BinaryOpExpr` node's operand types, and for assignment
/// operators the left-hand side's assignability. Called post-order, so
/// `left`/`right` have already been visited by the scope walker.
pub fn check_binary(ctx: &mut Context, node: NodeId, op: TokenKind, left: NodeId, right: NodeId) {
    use TokenKind::*;

    let is_assignment = matches!(
        op,
        Equal | PlusEqual | MinusEqual | StarEqual | SlashEqual | PercentEqual | PowerEqual | AmpEqual
            | PipeEqual | CaretEqual | ShlEqual | ShrEqual
    );
    if is_assignment {
        let (left_ty, right_ty) = (infer(ctx, left), infer(ctx, right));
        if !left_ty.compatible_with(&right_ty, ctx.runtime) {
            let message = format!("cannot assign {} to {}", right_ty.runtime_name(), left_ty.runtime_name());
            ctx.report_at(DiagnosticCode::InvalidAssignment, message, node);
        }
        return;
    }

    if matches!(op, And | Or | AmpAmp | PipePipe | Not) {
        return;
    }

    if matches!(op, Plus | Minus | Star | Slash | Percent | Power | Amp | Pipe | Caret | Shl | Shr) {
        let (left_ty, right_ty) = (infer(ctx, left), infer(ctx, right));
        if !operand_types_compatible(&left_ty, &right_ty) {
            let message =
                format!("operator '{}' cannot be applied to {} and {}", op_text(op), left_ty.runtime_name(), right_ty.runtime_name());
            ctx.report_at(DiagnosticCode::InvalidOperandType, message, node);
        }
    }
}

fn operand_types_compatible(left: &GDType, right: &GDType) -> bool {
    if matches!(left, GDType::Variant) || matches!(right, GDType::Variant) {
        return true;
    }
    if left.is_numeric() && right.is_numeric() {
        return true;
    }
    if matches!(left, GDType::String) && matches!(right, GDType::String) {
        return true;
    }
    left == right
}

fn op_text(op: TokenKind) -> &'static str {
    use TokenKind::*;
    match op {
        Plus => "+",
        Minus => "-",
        Star => "*",
        Slash => "/",
        Percent => "%",
        Power => "**",
        Amp => "&",
        Pipe => "|",
        Caret => "^",
        Shl => "<<",
        Shr => ">>",
        _ => "?",
    }
}

/// Checks a local-variable declaration's initializer against its
/// explicit type annotation, when both are present.
pub fn check_variable_decl(ctx: &mut Context, node: NodeId, type_node: Option<NodeId>, initializer: Option<NodeId>) {
    let (Some(type_node), Some(initializer)) = (type_node, initializer) else { return };
    let declared = crate::inference::type_of_type_node(ctx, type_node);
    let actual = infer(ctx, initializer);
    if !declared.compatible_with(&actual, ctx.runtime) {
        let message = format!("cannot initialize {} with {}", declared.runtime_name(), actual.runtime_name());
        ctx.report_at(DiagnosticCode::TypeMismatch, message, node);
    }
}
