//! The scope-aware tree walker. Pushes and pops a scope per structural
//! block (passes 3's job) and, at each node, calls out to the type
//! (`super::types`), call (`super::calls`), and control-flow
//! (`super::control_flow`) checks while the scope that node was parsed
//! in is still the active one — those checks need a live scope to
//! resolve identifiers against, and a scope popped back off the active
//! stack can only be queried by id, not walked from. Rather than have
//! four passes each reconstruct that stack independently, this single
//! walk threads it through once and the other three "passes" are the
//! pure check functions it calls at the right moments.

use gdscript_ast::{NodeId, NodeKind};
use gdscript_diagnostics::DiagnosticCode;
use gdscript_symbols::{ScopeKind, Symbol, SymbolKind};
use gdscript_token::TokenKind;

use crate::call_observation::{CallCallee, CallObservation};
use crate::context::Context;
use crate::inference::{infer, type_of_type_node};
use crate::options::GDValidationOptions;

use super::{calls, control_flow, types};

pub fn run(ctx: &mut Context, options: &GDValidationOptions) {
    declare_class_scope(ctx);

    let root = ctx.tree.root();
    let members = match &ctx.tree.get(root).kind {
        NodeKind::ClassDecl { members, .. } => *members,
        _ => return,
    };
    walk_class_body(ctx, members, options);
}

fn declare_class_scope(ctx: &mut Context) {
    let decls = &ctx.declarations;
    let declarations: Vec<(String, SymbolKind, NodeId)> = decls
        .methods
        .iter()
        .map(|(n, sig)| (n.clone(), SymbolKind::Method, sig.node))
        .chain(decls.class_vars.iter().map(|(n, id)| (n.clone(), SymbolKind::Variable, *id)))
        .chain(decls.constants.iter().map(|(n, id)| (n.clone(), SymbolKind::Constant, *id)))
        .chain(decls.signals.iter().map(|(n, id)| (n.clone(), SymbolKind::Signal, *id)))
        .chain(decls.enums.iter().map(|(n, id)| (n.clone(), SymbolKind::Enum, *id)))
        .chain(decls.enum_values.iter().map(|(n, id)| (n.clone(), SymbolKind::EnumValue, *id)))
        .chain(decls.inner_classes.keys().map(|n| (n.clone(), SymbolKind::InnerClass, ctx.tree.root())))
        .collect();

    ctx.symbols.push(ScopeKind::Class);
    for (name, kind, node) in declarations {
        let mut symbol = Symbol::new(name, kind, node);
        if let Some(type_name) = class_level_declared_type(ctx, kind, node) {
            symbol = symbol.with_declared_type(type_name);
        }
        ctx.symbols.declare(symbol);
    }
}

/// Class-level `var`/`const` declarations carry their own `type_node`
/// the same way a local `VariableDeclStmt` does; this reads it back off
/// the declaration node so `GetEffectiveType` sees an annotation on a
/// class var exactly like it would on a local one.
fn class_level_declared_type(ctx: &Context, kind: SymbolKind, node: NodeId) -> Option<String> {
    let type_node = match (kind, &ctx.tree.get(node).kind) {
        (SymbolKind::Variable, NodeKind::VariableDecl { type_node, .. }) => *type_node,
        (SymbolKind::Constant, NodeKind::ConstantDecl { type_node, .. }) => *type_node,
        _ => None,
    }?;
    Some(type_of_type_node(ctx, type_node).runtime_name().to_string())
}

fn walk_class_body(ctx: &mut Context, members: NodeId, options: &GDValidationOptions) {
    let items = match &ctx.tree.get(members).kind {
        NodeKind::List { items, .. } => items.clone(),
        _ => return,
    };
    for item in items {
        match ctx.tree.get(item).kind.clone() {
            NodeKind::MethodDecl { name, params, body, .. } => {
                let previous = ctx.current_method.take();
                ctx.current_method = name.map(|t| t.text.to_string());
                walk_function_body(ctx, ScopeKind::Method, params, body, options);
                ctx.current_method = previous;
            }
            NodeKind::VariableDecl { type_node, initializer: Some(init), .. } => {
                walk_expr(ctx, init, options);
                if options.check_types {
                    types::check_variable_decl(ctx, item, type_node, Some(init));
                }
            }
            NodeKind::ConstantDecl { initializer: Some(init), .. } => walk_expr(ctx, init, options),
            NodeKind::InnerClassDecl { members: inner, .. } => {
                ctx.symbols.push(ScopeKind::Class);
                walk_class_body(ctx, inner, options);
                ctx.symbols.pop();
            }
            _ => {}
        }
    }
}

fn walk_function_body(ctx: &mut Context, kind: ScopeKind, params: NodeId, body: NodeId, options: &GDValidationOptions) {
    ctx.symbols.push(kind);
    declare_params(ctx, params);
    walk_suite(ctx, body, options);
    ctx.symbols.pop();
}

fn declare_params(ctx: &mut Context, params: NodeId) {
    let items = match &ctx.tree.get(params).kind {
        NodeKind::List { items, .. } => items.clone(),
        _ => return,
    };
    for item in items {
        if let NodeKind::ParameterDecl { name: Some(name), type_node, .. } = ctx.tree.get(item).kind.clone() {
            let mut symbol = Symbol::new(name.text.to_string(), SymbolKind::Parameter, item);
            if let Some(type_node) = type_node {
                symbol = symbol.with_declared_type(type_of_type_node(ctx, type_node).runtime_name().to_string());
            }
            ctx.symbols.declare(symbol);
        }
    }
}

fn walk_suite(ctx: &mut Context, suite: NodeId, options: &GDValidationOptions) {
    let items = match &ctx.tree.get(suite).kind {
        NodeKind::List { items, .. } => items.clone(),
        _ => return,
    };
    for item in items {
        walk_statement(ctx, item, options);
    }
}

fn walk_statement(ctx: &mut Context, node: NodeId, options: &GDValidationOptions) {
    let scope = ctx.symbols.current();
    match ctx.tree.get(node).kind.clone() {
        NodeKind::ExpressionStmt { expr } => walk_expr(ctx, expr, options),
        NodeKind::ReturnStmt { value, .. } => {
            if let Some(value) = value {
                walk_expr(ctx, value, options);
            }
            if options.check_control_flow {
                control_flow::check_return(ctx, node, scope);
            }
        }
        NodeKind::PassStmt { .. } => {}
        NodeKind::BreakStmt { .. } => {
            if options.check_control_flow {
                control_flow::check_break_continue(ctx, node, scope, true);
            }
        }
        NodeKind::ContinueStmt { .. } => {
            if options.check_control_flow {
                control_flow::check_break_continue(ctx, node, scope, false);
            }
        }
        NodeKind::IfStmt { cond, body, elifs, else_clause, .. } => {
            walk_expr(ctx, cond, options);
            push_block_and_walk(ctx, body, options);
            if let Some(elifs) = elifs {
                for elif in elifs_items(ctx, elifs) {
                    if let NodeKind::ElifClause { cond, body, .. } = ctx.tree.get(elif).kind.clone() {
                        walk_expr(ctx, cond, options);
                        push_block_and_walk(ctx, body, options);
                    }
                }
            }
            if let Some(else_clause) = else_clause {
                if let NodeKind::ElseClause { body, .. } = ctx.tree.get(else_clause).kind.clone() {
                    push_block_and_walk(ctx, body, options);
                }
            }
        }
        NodeKind::WhileStmt { cond, body, .. } => {
            walk_expr(ctx, cond, options);
            ctx.symbols.push(ScopeKind::WhileLoop);
            walk_suite(ctx, body, options);
            ctx.symbols.pop();
        }
        NodeKind::ForStmt { var_name, iterable, body, .. } => {
            walk_expr(ctx, iterable, options);
            ctx.symbols.push(ScopeKind::ForLoop);
            if let Some(var_name) = var_name {
                ctx.symbols.declare(Symbol::new(var_name.text.to_string(), SymbolKind::Variable, node));
            }
            walk_suite(ctx, body, options);
            ctx.symbols.pop();
        }
        NodeKind::MatchStmt { subject, cases, .. } => {
            walk_expr(ctx, subject, options);
            for case in list_items(ctx, cases) {
                if let NodeKind::MatchCase { guard, body, .. } = ctx.tree.get(case).kind.clone() {
                    ctx.symbols.push(ScopeKind::MatchCase);
                    if let Some(guard) = guard {
                        walk_expr(ctx, guard, options);
                    }
                    walk_suite(ctx, body, options);
                    ctx.symbols.pop();
                }
            }
        }
        NodeKind::VariableDeclStmt { inner } => {
            if let NodeKind::VariableDecl { name: Some(name), type_node, initializer, .. } = ctx.tree.get(inner).kind.clone() {
                if let Some(initializer) = initializer {
                    walk_expr(ctx, initializer, options);
                }
                let mut symbol = Symbol::new(name.text.to_string(), SymbolKind::Variable, inner);
                if let Some(type_node) = type_node {
                    symbol = symbol.with_declared_type(type_of_type_node(ctx, type_node).runtime_name().to_string());
                }
                ctx.symbols.declare(symbol);
                if options.check_types {
                    types::check_variable_decl(ctx, inner, type_node, initializer);
                }
            }
        }
        NodeKind::YieldStmt { yield_kw: _, args } => {
            if let Some(args) = args {
                walk_expr(ctx, args, options);
            }
            if options.check_control_flow {
                control_flow::check_yield(ctx, node, scope);
            }
        }
        NodeKind::AwaitStmt { expr, .. } => {
            walk_expr(ctx, expr, options);
            if options.check_control_flow {
                control_flow::check_await(ctx, node, scope);
            }
        }
        NodeKind::AssertStmt { cond, message, .. } => {
            walk_expr(ctx, cond, options);
            if let Some(message) = message {
                walk_expr(ctx, message, options);
            }
        }
        _ => {}
    }
}

fn push_block_and_walk(ctx: &mut Context, body: NodeId, options: &GDValidationOptions) {
    ctx.symbols.push(ScopeKind::Block);
    walk_suite(ctx, body, options);
    ctx.symbols.pop();
}

fn elifs_items(ctx: &Context, elifs: NodeId) -> Vec<NodeId> {
    list_items(ctx, elifs)
}

fn walk_expr(ctx: &mut Context, node: NodeId, options: &GDValidationOptions) {
    let scope = ctx.symbols.current();
    let kind = ctx.tree.get(node).kind.clone();
    match kind {
        NodeKind::IdentifierExpr(token) => {
            if options.check_scope {
                resolve_identifier(ctx, &token.text, node);
            }
        }
        NodeKind::CallExpr { callee, args, .. } => {
            match ctx.tree.get(callee).kind.clone() {
                NodeKind::IdentifierExpr(token) => {
                    if options.check_scope {
                        resolve_identifier(ctx, &token.text, callee);
                    }
                }
                _ => walk_expr(ctx, callee, options),
            }
            for arg in list_items(ctx, args) {
                walk_expr(ctx, arg, options);
            }
            if options.check_calls {
                calls::check_call(ctx, node, callee, args);
            }
            record_call_observation(ctx, node, callee, args);
        }
        NodeKind::MemberAccessExpr { receiver, .. } => walk_expr(ctx, receiver, options),
        NodeKind::IndexerExpr { receiver, index, .. } => {
            walk_expr(ctx, receiver, options);
            walk_expr(ctx, index, options);
        }
        NodeKind::UnaryOpExpr { operand, .. } => walk_expr(ctx, operand, options),
        NodeKind::BinaryOpExpr { left, op, right } => {
            walk_expr(ctx, left, options);
            walk_expr(ctx, right, options);
            if options.check_types {
                types::check_binary(ctx, node, op.kind, left, right);
            }
            if options.check_control_flow && is_assignment_op(op.kind) {
                if let NodeKind::IdentifierExpr(token) = ctx.tree.get(left).kind.clone() {
                    control_flow::check_assignment_target(ctx, node, scope, &token.text);
                }
            }
        }
        NodeKind::TernaryExpr { true_expr, cond, false_expr, .. } => {
            walk_expr(ctx, true_expr, options);
            walk_expr(ctx, cond, options);
            if let Some(false_expr) = false_expr {
                walk_expr(ctx, false_expr, options);
            }
        }
        NodeKind::ArrayInitExpr { elements, .. } => {
            for element in list_items(ctx, elements) {
                walk_expr(ctx, element, options);
            }
        }
        NodeKind::DictInitExpr { entries, .. } => {
            for entry in list_items(ctx, entries) {
                if let NodeKind::DictEntry { key, value, .. } = ctx.tree.get(entry).kind.clone() {
                    walk_expr(ctx, key, options);
                    walk_expr(ctx, value, options);
                }
            }
        }
        NodeKind::LambdaExpr { params, body, .. } => walk_function_body(ctx, ScopeKind::Lambda, params, body, options),
        NodeKind::AwaitExpr { expr, .. } => {
            walk_expr(ctx, expr, options);
            if options.check_control_flow {
                control_flow::check_await(ctx, node, scope);
            }
        }
        NodeKind::YieldExpr { args, .. } => {
            if let Some(args) = args {
                for arg in list_items(ctx, args) {
                    walk_expr(ctx, arg, options);
                }
            }
            if options.check_control_flow {
                control_flow::check_yield(ctx, node, scope);
            }
        }
        NodeKind::BracketedExpr { inner, .. } => walk_expr(ctx, inner, options),
        NodeKind::SuperExpr(_) => {
            if options.check_control_flow {
                control_flow::check_super(ctx, node, scope);
            }
        }
        _ => {}
    }
}

/// Records a [`CallObservation`] for every call expression, independent
/// of `options.check_calls` — the registry needs every call site a file
/// contains, not just the ones worth a diagnostic.
fn record_call_observation(ctx: &mut Context, node: NodeId, callee: NodeId, args: NodeId) {
    let callee_kind = match ctx.tree.get(callee).kind.clone() {
        NodeKind::IdentifierExpr(token) => CallCallee::Bare(token.text.to_string()),
        NodeKind::MemberAccessExpr { receiver, member: Some(member), .. } => {
            match ctx.tree.get(receiver).kind.clone() {
                NodeKind::SelfExpr(_) => CallCallee::SelfMethod(member.text.to_string()),
                NodeKind::SuperExpr(_) => CallCallee::Super(member.text.to_string()),
                _ => CallCallee::Method { receiver_type: infer(ctx, receiver), member: member.text.to_string() },
            }
        }
        _ => return,
    };
    let arg_types = list_items(ctx, args).into_iter().map(|arg| infer(ctx, arg)).collect();
    ctx.call_observations.push(CallObservation {
        call_node: node,
        callee: callee_kind,
        arg_types,
        caller_method: ctx.current_method.clone(),
    });
}

fn is_assignment_op(op: TokenKind) -> bool {
    use TokenKind::*;
    matches!(
        op,
        Equal | PlusEqual | MinusEqual | StarEqual | SlashEqual | PercentEqual | PowerEqual | AmpEqual
            | PipeEqual | CaretEqual | ShlEqual | ShrEqual
    )
}

fn list_items(ctx: &Context, list: NodeId) -> Vec<NodeId> {
    match &ctx.tree.get(list).kind {
        NodeKind::List { items, .. } => items.clone(),
        _ => Vec::new(),
    }
}

fn resolve_identifier(ctx: &mut Context, name: &str, node: NodeId) {
    let current = ctx.symbols.current();
    let Some(symbol) = ctx.symbols.lookup(current, name) else {
        if ctx.runtime.is_known_type(name)
            || ctx.runtime.get_global_function(name).is_some()
            || ctx.runtime.get_global_class(name).is_some()
        {
            return;
        }
        ctx.report_at(DiagnosticCode::UndefinedVariable, format!("'{name}' is not declared"), node);
        return;
    };

    ctx.reference_observations.push((node, symbol.declaration));

    if matches!(symbol.kind, SymbolKind::Variable | SymbolKind::Parameter) {
        let declared_at = ctx.span_of(symbol.declaration).start;
        let used_at = ctx.span_of(node).start;
        if ctx.symbols.lookup_local(current, name).is_some() && used_at < declared_at {
            ctx.report_at(DiagnosticCode::VariableUsedBeforeDeclaration, format!("'{name}' used before its declaration"), node);
        }
    }
}
