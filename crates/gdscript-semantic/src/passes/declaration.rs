//! Pass 2: pre-populates class-level declarations before any body is
//! walked, so a method can call another method defined further down the
//! file and a variable's type annotation can name a class declared later.

use gdscript_ast::{NodeId, NodeKind};
use gdscript_diagnostics::DiagnosticCode;

use crate::context::Context;
use crate::declarations::{Declarations, MethodSignature};

pub fn run(ctx: &mut Context) {
    let root = ctx.tree.root();
    let (class_name, extends_name, members) = match &ctx.tree.get(root).kind {
        NodeKind::ClassDecl { class_name, extends_name, members, .. } => (
            class_name.as_ref().map(|t| t.text.to_string()),
            extends_name.as_ref().map(|t| t.text.to_string()),
            *members,
        ),
        _ => return,
    };
    let decls = collect_members(ctx, members, class_name, extends_name);
    ctx.declarations = decls;
}

/// Walks one `ListKind::ClassBody` and builds the `Declarations` for it,
/// recursing into inner classes. Duplicate names within the same body
/// are reported against `ctx` as they're found.
fn collect_members(ctx: &mut Context, members: NodeId, class_name: Option<String>, extends_name: Option<String>) -> Declarations {
    let mut decls = Declarations { class_name, extends_name, ..Declarations::default() };

    let items = match &ctx.tree.get(members).kind {
        NodeKind::List { items, .. } => items.clone(),
        _ => return decls,
    };

    for item in items {
        let kind = ctx.tree.get(item).kind.clone();
        match kind {
            NodeKind::MethodDecl { name: Some(name), params, .. } => {
                declare_once(ctx, &mut decls, &name.text, item);
                let (param_count, min_required) = count_params(ctx, params);
                decls.methods.insert(name.text.to_string(), MethodSignature { node: item, param_count, min_required });
            }
            NodeKind::VariableDecl { name: Some(name), .. } => {
                declare_once(ctx, &mut decls, &name.text, item);
                decls.class_vars.insert(name.text.to_string(), item);
            }
            NodeKind::ConstantDecl { name: Some(name), .. } => {
                declare_once(ctx, &mut decls, &name.text, item);
                decls.constants.insert(name.text.to_string(), item);
            }
            NodeKind::SignalDecl { name: Some(name), .. } => {
                declare_once(ctx, &mut decls, &name.text, item);
                decls.signals.insert(name.text.to_string(), item);
            }
            NodeKind::EnumDecl { name, values, .. } => {
                if let Some(name) = &name {
                    declare_once(ctx, &mut decls, &name.text, item);
                    decls.enums.insert(name.text.to_string(), item);
                }
                declare_enum_values(ctx, &mut decls, values);
            }
            NodeKind::InnerClassDecl { name: Some(name), extends_name: inner_extends, members: inner_members, .. } => {
                declare_once(ctx, &mut decls, &name.text, item);
                let inner = collect_members(
                    ctx,
                    inner_members,
                    Some(name.text.to_string()),
                    inner_extends.as_ref().map(|t| t.text.to_string()),
                );
                decls.inner_classes.insert(name.text.to_string(), inner);
            }
            _ => {}
        }
    }

    decls
}

fn declare_enum_values(ctx: &mut Context, decls: &mut Declarations, values: NodeId) {
    let items = match &ctx.tree.get(values).kind {
        NodeKind::List { items, .. } => items.clone(),
        _ => return,
    };
    for item in items {
        if let NodeKind::EnumValueDecl { name: Some(name), .. } = &ctx.tree.get(item).kind {
            declare_once(ctx, decls, &name.text, item);
            decls.enum_values.insert(name.text.to_string(), item);
        }
    }
}

fn declare_once(ctx: &mut Context, decls: &mut Declarations, name: &str, node: NodeId) {
    if decls.is_declared(name) {
        ctx.report_at(DiagnosticCode::DuplicateDeclaration, format!("'{name}' is already declared in this scope"), node);
    }
}

fn count_params(ctx: &Context, params: NodeId) -> (usize, usize) {
    let items = match &ctx.tree.get(params).kind {
        NodeKind::List { items, .. } => items.clone(),
        _ => return (0, 0),
    };
    let total = items.len();
    let required = items
        .iter()
        .filter(|id| matches!(&ctx.tree.get(**id).kind, NodeKind::ParameterDecl { default: None, .. }))
        .count();
    (total, required)
}
