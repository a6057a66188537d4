//! Method readiness classification (§4.I, second half): whether a
//! class field is safe to read inside a given method, based on
//! whether it is guaranteed assigned by the time that method runs.
//!
//! A field is `Safe` inside a method only if (a) its declaration's
//! initializer is non-null, or (b) it is assigned on every top-level,
//! unconditional statement of `_ready()` *and* the caller is a Godot
//! virtual method known to run after `_ready()`. Conditional
//! assignment inside `_ready()` (an `if` with no covering `else`)
//! cannot be proven exhaustive by this analysis and is classified
//! `Unknown` rather than guessed either way — see DESIGN.md.

use gdscript_ast::{NodeId, NodeKind, Tree};
use gdscript_semantic::Declarations;
use gdscript_token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Readiness {
    Safe,
    Unsafe,
    Unknown,
}

/// Godot virtual methods the engine guarantees run only after
/// `_ready()` has returned for the same node.
const RUNS_AFTER_READY: &[&str] =
    &["_process", "_physics_process", "_input", "_unhandled_input", "_unhandled_key_input", "_draw", "_gui_input"];

pub fn runs_after_ready(method_name: &str) -> bool {
    RUNS_AFTER_READY.contains(&method_name)
}

/// Classifies whether `field_name` is safe to read inside
/// `caller_method`, per the rule above.
pub fn classify_field_readiness(tree: &Tree, declarations: &Declarations, caller_method: &str, field_name: &str) -> Readiness {
    let Some(&var_node) = declarations.class_vars.get(field_name) else {
        return Readiness::Unknown;
    };

    if has_non_null_initializer(tree, var_node) {
        return Readiness::Safe;
    }

    let Some(ready) = declarations.methods.get("_ready") else {
        return Readiness::Unsafe;
    };

    match assigned_unconditionally_in(tree, ready.node, field_name) {
        AssignmentEvidence::Unconditional if runs_after_ready(caller_method) => Readiness::Safe,
        AssignmentEvidence::Unconditional => Readiness::Unknown,
        AssignmentEvidence::Conditional => Readiness::Unknown,
        AssignmentEvidence::None => Readiness::Unsafe,
    }
}

fn has_non_null_initializer(tree: &Tree, var_node: NodeId) -> bool {
    match &tree.get(var_node).kind {
        NodeKind::VariableDecl { initializer: Some(init), .. } => !matches!(tree.get(*init).kind, NodeKind::NullLiteral(_)),
        _ => false,
    }
}

enum AssignmentEvidence {
    Unconditional,
    Conditional,
    None,
}

/// Walks `method_node`'s body (a `MethodDecl`) looking for an
/// assignment to `field_name`. Only the top-level statement list is
/// inspected at unconditional strength; an assignment nested inside an
/// `if`/`elif`/`else`/loop body downgrades to `Conditional` since this
/// analysis does not attempt exhaustive branch-coverage proof.
fn assigned_unconditionally_in(tree: &Tree, method_node: NodeId, field_name: &str) -> AssignmentEvidence {
    let NodeKind::MethodDecl { body, .. } = &tree.get(method_node).kind else {
        return AssignmentEvidence::None;
    };
    let NodeKind::List { items, .. } = &tree.get(*body).kind else {
        return AssignmentEvidence::None;
    };

    let mut conditional = false;
    for &stmt in items {
        match &tree.get(stmt).kind {
            NodeKind::ExpressionStmt { expr } if assigns_field(tree, *expr, field_name) => {
                return AssignmentEvidence::Unconditional;
            }
            NodeKind::IfStmt { .. } | NodeKind::WhileStmt { .. } | NodeKind::ForStmt { .. } | NodeKind::MatchStmt { .. } => {
                if subtree_assigns_field(tree, stmt, field_name) {
                    conditional = true;
                }
            }
            _ => {}
        }
    }

    if conditional {
        AssignmentEvidence::Conditional
    } else {
        AssignmentEvidence::None
    }
}

fn subtree_assigns_field(tree: &Tree, root: NodeId, field_name: &str) -> bool {
    tree.all_nodes(root).into_iter().any(|id| {
        matches!(&tree.get(id).kind, NodeKind::ExpressionStmt { expr } if assigns_field(tree, *expr, field_name))
    })
}

/// True when `expr_node` is `field_name = value` or `self.field_name =
/// value`, for any assignment-family operator, with `value` not a bare
/// `null` literal.
fn assigns_field(tree: &Tree, expr_node: NodeId, field_name: &str) -> bool {
    let NodeKind::BinaryOpExpr { left, op, right, .. } = &tree.get(expr_node).kind else {
        return false;
    };
    if !is_assignment_op(op.kind) {
        return false;
    }
    if matches!(tree.get(*right).kind, NodeKind::NullLiteral(_)) {
        return false;
    }
    match &tree.get(*left).kind {
        NodeKind::IdentifierExpr(t) => t.text.as_ref() == field_name,
        NodeKind::MemberAccessExpr { receiver, member: Some(m), .. } => {
            matches!(tree.get(*receiver).kind, NodeKind::SelfExpr(_)) && m.text.as_ref() == field_name
        }
        _ => false,
    }
}

const fn is_assignment_op(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Equal
            | TokenKind::PlusEqual
            | TokenKind::MinusEqual
            | TokenKind::StarEqual
            | TokenKind::SlashEqual
            | TokenKind::PercentEqual
            | TokenKind::PowerEqual
            | TokenKind::AmpEqual
            | TokenKind::PipeEqual
            | TokenKind::CaretEqual
            | TokenKind::ShlEqual
            | TokenKind::ShrEqual
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdscript_runtime::NullRuntimeTypeProvider;
    use gdscript_semantic::{analyze_code, GDValidationOptions};

    fn declarations_and_tree(source: &str) -> (Tree, Declarations) {
        let runtime = NullRuntimeTypeProvider;
        let analysis = analyze_code(source, &GDValidationOptions::default(), &runtime);
        let tree = gdscript_reader::parse_file(source).tree;
        (tree, analysis.declarations)
    }

    #[test]
    fn non_null_initializer_is_always_safe() {
        let source = "var health = 100\n\nfunc _process(delta):\n\tpass\n";
        let (tree, decls) = declarations_and_tree(source);
        assert_eq!(classify_field_readiness(&tree, &decls, "_process", "health"), Readiness::Safe);
    }

    #[test]
    fn unconditional_ready_assignment_is_safe_for_post_ready_callers() {
        let source = "var target\n\nfunc _ready():\n\ttarget = self\n\nfunc _process(delta):\n\tpass\n";
        let (tree, decls) = declarations_and_tree(source);
        assert_eq!(classify_field_readiness(&tree, &decls, "_process", "target"), Readiness::Safe);
    }

    #[test]
    fn unconditional_ready_assignment_is_unknown_for_unlisted_callers() {
        let source = "var target\n\nfunc _ready():\n\ttarget = self\n\nfunc custom_handler():\n\tpass\n";
        let (tree, decls) = declarations_and_tree(source);
        assert_eq!(classify_field_readiness(&tree, &decls, "custom_handler", "target"), Readiness::Unknown);
    }

    #[test]
    fn conditional_ready_assignment_is_unknown() {
        let source = "var target\n\nfunc _ready():\n\tif true:\n\t\ttarget = self\n\nfunc _process(delta):\n\tpass\n";
        let (tree, decls) = declarations_and_tree(source);
        assert_eq!(classify_field_readiness(&tree, &decls, "_process", "target"), Readiness::Unknown);
    }

    #[test]
    fn no_evidence_at_all_is_unsafe() {
        let source = "var target\n\nfunc _ready():\n\tpass\n\nfunc _process(delta):\n\tpass\n";
        let (tree, decls) = declarations_and_tree(source);
        assert_eq!(classify_field_readiness(&tree, &decls, "_process", "target"), Readiness::Unsafe);
    }
}
