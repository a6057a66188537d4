//! The round-trip printer: §4.D. Printing any subtree in depth-first
//! token order reproduces the source bytes it was parsed from exactly,
//! as long as no formatter mutation has touched it — §8 universal
//! invariant 3 is a direct corollary of `Tree::all_tokens` already
//! restoring source order by byte offset.

use gdscript_ast::{NodeId, Tree};
use std::fmt::Write as _;

/// Concatenates every token (primary, trivia, and invalid) in the
/// subtree rooted at `node`, in source order.
pub fn print_subtree(tree: &Tree, node: NodeId) -> String {
    let tokens = tree.all_tokens(node);
    let mut out = String::with_capacity(tokens.iter().map(|t| t.text.len()).sum());
    for token in tokens {
        let _ = write!(out, "{}", token.text);
    }
    out
}

/// Prints the whole tree from its root — the form `parse(S)` round
/// trips back to `S` through.
pub fn print_tree(tree: &Tree) -> String {
    print_subtree(tree, tree.root())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_file;

    #[test]
    fn printing_the_root_reproduces_the_source() {
        let source = "extends Node\n\nfunc _ready() -> void:\n\tpass\n";
        let output = parse_file(source);
        assert_eq!(print_tree(&output.tree), source);
    }

    #[test]
    fn printing_any_subtree_reproduces_its_own_slice() {
        let source = "var x = 1 + 2\n";
        let output = parse_file(source);
        let root_text = print_tree(&output.tree);
        assert_eq!(root_text, source);
        let class_body = match &output.tree.get(output.tree.root()).kind {
            gdscript_ast::NodeKind::ClassDecl { members, .. } => *members,
            _ => panic!("expected ClassDecl root"),
        };
        let printed_members = print_subtree(&output.tree, class_body);
        assert!(source.contains(printed_members.trim_end_matches('\n')) || printed_members == source);
    }
}
