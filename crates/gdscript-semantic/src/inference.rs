//! Type inference over expression nodes. `infer` is the single entry
//! point the `types` pass calls for every expression in the tree; it is
//! also reused directly by the `calls` pass (receiver type of a method
//! call) and the cross-method flow analyzer in `gdscript-callsites`.

use gdscript_ast::{NodeId, NodeKind};
use gdscript_token::TokenKind;

use crate::context::Context;
use crate::gdtype::GDType;

/// Infers the type of `node`, or `GDType::Variant` when the engine has
/// no rule that pins it down further. Never fails — an unresolvable
/// expression is `Variant`, not an error; the passes that care (type,
/// call) report their own diagnostics when a `Variant` shows up somewhere
/// a more specific type was expected.
pub fn infer(ctx: &Context, node: NodeId) -> GDType {
    match &ctx.tree.get(node).kind {
        NodeKind::IntLiteral(_) => GDType::Int,
        NodeKind::FloatLiteral(_) => GDType::Float,
        NodeKind::StringLiteral(_) => GDType::String,
        NodeKind::BoolLiteral(_) => GDType::Bool,
        NodeKind::NullLiteral(_) => GDType::Null,
        NodeKind::ArrayInitExpr { .. } => GDType::Array(None),
        NodeKind::DictInitExpr { .. } => GDType::Dictionary(None, None),

        NodeKind::IdentifierExpr(token) => infer_identifier(ctx, &token.text),
        NodeKind::SelfExpr(_) => ctx
            .declarations
            .class_name
            .clone()
            .map(GDType::Named)
            .unwrap_or(GDType::Variant),
        NodeKind::SuperExpr(_) => ctx
            .declarations
            .extends_name
            .clone()
            .map(GDType::Named)
            .unwrap_or(GDType::Variant),

        NodeKind::MemberAccessExpr { receiver, member, .. } => {
            let receiver_ty = infer(ctx, *receiver);
            member
                .as_ref()
                .and_then(|m| ctx.runtime.get_member(receiver_ty.runtime_name(), &m.text))
                .and_then(|info| info.type_name)
                .map(GDType::Named)
                .unwrap_or(GDType::Variant)
        }

        NodeKind::IndexerExpr { receiver, .. } => match infer(ctx, *receiver) {
            GDType::Array(Some(element)) => *element,
            GDType::Dictionary(_, Some(value)) => *value,
            _ => GDType::Variant,
        },

        NodeKind::CallExpr { callee, .. } => infer_call(ctx, *callee),

        NodeKind::UnaryOpExpr { op, operand } => match op.kind {
            TokenKind::Not | TokenKind::Bang => GDType::Bool,
            TokenKind::Tilde => GDType::Int,
            TokenKind::Minus | TokenKind::Plus => infer(ctx, *operand),
            _ => GDType::Variant,
        },

        NodeKind::BinaryOpExpr { left, op, right } => infer_binary(ctx, op.kind, *left, *right),

        NodeKind::TernaryExpr { true_expr, .. } => infer(ctx, *true_expr),

        NodeKind::AwaitExpr { expr, .. } => infer(ctx, *expr),
        NodeKind::YieldExpr { .. } => GDType::Signal,

        NodeKind::GetNodeExpr { .. } | NodeKind::UniqueNodeExpr { .. } | NodeKind::NodePathExpr { .. } => {
            GDType::Node
        }

        NodeKind::BracketedExpr { inner, .. } => infer(ctx, *inner),

        NodeKind::LambdaExpr { .. } => GDType::Variant,

        _ => GDType::Variant,
    }
}

fn infer_identifier(ctx: &Context, name: &str) -> GDType {
    if let Some(symbol) = ctx.symbols.lookup(ctx.symbols.current(), name) {
        if let Some(declared) = &symbol.declared_type {
            return named_or_builtin(declared);
        }
        return GDType::Variant;
    }
    if ctx.declarations.is_declared(name) {
        return GDType::Variant;
    }
    if ctx.runtime.is_known_type(name) || ctx.runtime.get_global_class(name).is_some() {
        return GDType::Named(name.to_string());
    }
    GDType::Variant
}

fn infer_call(ctx: &Context, callee: NodeId) -> GDType {
    match &ctx.tree.get(callee).kind {
        NodeKind::IdentifierExpr(token) => {
            let name = token.text.as_ref();
            if let Some(sig) = ctx.declarations.methods.get(name) {
                return method_return_type(ctx, sig.node);
            }
            if let Some(info) = ctx.runtime.get_global_function(name) {
                return info.return_type.map(|t| named_or_builtin(&t)).unwrap_or(GDType::Variant);
            }
            if ctx.runtime.is_known_type(name) {
                return GDType::Named(name.to_string());
            }
            GDType::Variant
        }
        NodeKind::MemberAccessExpr { receiver, member, .. } => {
            let receiver_ty = infer(ctx, *receiver);
            member
                .as_ref()
                .and_then(|m| ctx.runtime.get_member(receiver_ty.runtime_name(), &m.text))
                .and_then(|info| info.type_name)
                .map(|t| named_or_builtin(&t))
                .unwrap_or(GDType::Variant)
        }
        _ => GDType::Variant,
    }
}

fn method_return_type(ctx: &Context, method_node: NodeId) -> GDType {
    match &ctx.tree.get(method_node).kind {
        NodeKind::MethodDecl { return_type: Some(type_node), .. } => type_of_type_node(ctx, *type_node),
        _ => GDType::Variant,
    }
}

pub(crate) fn type_of_type_node(ctx: &Context, node: NodeId) -> GDType {
    match &ctx.tree.get(node).kind {
        NodeKind::SingleTypeNode(token) => named_or_builtin(&token.text),
        NodeKind::ArrayOfTypeNode { element, .. } => GDType::Array(Some(Box::new(type_of_type_node(ctx, *element)))),
        NodeKind::DictionaryOfTypeNode { key, value, .. } => GDType::Dictionary(
            Some(Box::new(type_of_type_node(ctx, *key))),
            Some(Box::new(type_of_type_node(ctx, *value))),
        ),
        _ => GDType::Variant,
    }
}

/// Maps a declared-type name back to its built-in `GDType` variant when
/// one exists, falling back to `Named` for engine/user classes.
fn named_or_builtin(name: &str) -> GDType {
    GDType::from_declared_name(name)
}

fn infer_binary(ctx: &Context, op: TokenKind, left: NodeId, right: NodeId) -> GDType {
    use TokenKind::*;

    match op {
        EqualEqual | BangEqual | Less | Greater | LessEqual | GreaterEqual | AmpAmp | PipePipe | And | Or | In
        | Is => GDType::Bool,
        Amp | Pipe | Caret | Shl | Shr => GDType::Int,
        Slash | Power => GDType::Float,
        Percent => {
            let (l, r) = (infer(ctx, left), infer(ctx, right));
            if l == GDType::Int && r == GDType::Int {
                GDType::Int
            } else {
                GDType::Float
            }
        }
        Plus | Minus | Star => promote_arithmetic(ctx, left, right),
        Equal | PlusEqual | MinusEqual | StarEqual | SlashEqual | PercentEqual | PowerEqual | AmpEqual
        | PipeEqual | CaretEqual | ShlEqual | ShrEqual => infer(ctx, left),
        _ => GDType::Variant,
    }
}

fn promote_arithmetic(ctx: &Context, left: NodeId, right: NodeId) -> GDType {
    let (l, r) = (infer(ctx, left), infer(ctx, right));
    if l == GDType::String && r == GDType::String {
        return GDType::String;
    }
    if l.is_numeric() && r.is_numeric() {
        return if l == GDType::Float || r == GDType::Float { GDType::Float } else { GDType::Int };
    }
    l
}
