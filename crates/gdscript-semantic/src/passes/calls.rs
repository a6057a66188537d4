//! Call pass: argument-count and callability checks, run from the scope
//! walker at every `CallExpr`.

use gdscript_ast::{NodeId, NodeKind};
use gdscript_diagnostics::DiagnosticCode;

use crate::context::Context;
use crate::inference::infer;

pub fn check_call(ctx: &mut Context, node: NodeId, callee: NodeId, args: NodeId) {
    let arg_count = match &ctx.tree.get(args).kind {
        NodeKind::List { items, .. } => items.len(),
        _ => 0,
    };

    match ctx.tree.get(callee).kind.clone() {
        NodeKind::IdentifierExpr(token) => check_named_call(ctx, node, &token.text, arg_count),
        NodeKind::MemberAccessExpr { receiver, member: Some(member), .. } => {
            let receiver_ty = infer(ctx, receiver);
            check_method_call(ctx, node, receiver_ty.runtime_name(), &member.text);
        }
        NodeKind::SuperExpr(_) => {}
        _ => {
            let callee_ty = infer(ctx, callee);
            if !matches!(callee_ty, crate::gdtype::GDType::Variant) {
                ctx.report_at(DiagnosticCode::NotCallable, format!("{} is not callable", callee_ty.runtime_name()), node);
            }
        }
    }
}

fn check_named_call(ctx: &mut Context, node: NodeId, name: &str, arg_count: usize) {
    if let Some(sig) = ctx.declarations.methods.get(name) {
        if arg_count < sig.min_required || arg_count > sig.param_count {
            let message = format!("'{name}' expects {} argument(s), got {arg_count}", expected_range(sig.min_required, sig.param_count));
            ctx.report_at(DiagnosticCode::WrongArgumentCount, message, node);
        }
        return;
    }
    if ctx.runtime.get_global_function(name).is_some() || ctx.runtime.is_known_type(name) {
        return;
    }
    ctx.report_at(DiagnosticCode::MethodNotFound, format!("'{name}' is not a known function"), node);
}

/// `MemberInfo` doesn't carry a parameter count, so a resolvable
/// receiver only gets a callability check, not an argument-count one.
fn check_method_call(ctx: &mut Context, node: NodeId, receiver_type: &str, method: &str) {
    if receiver_type == "Variant" {
        return;
    }
    match ctx.runtime.get_member(receiver_type, method) {
        Some(info) if info.is_method => {}
        Some(_) => ctx.report_at(DiagnosticCode::NotCallable, format!("'{method}' on {receiver_type} is not a method"), node),
        None => ctx.report_at(DiagnosticCode::MethodNotFound, format!("{receiver_type} has no method '{method}'"), node),
    }
}

fn expected_range(min: usize, max: usize) -> String {
    if min == max {
        min.to_string()
    } else {
        format!("{min}-{max}")
    }
}
