//! The arena itself.

use crate::kind::NodeKind;
use gdscript_token::Token;

/// An index into a [`Tree`]'s arena. Only meaningful relative to the
/// `Tree` that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Constructs a `NodeId` from a raw arena index.
    ///
    /// Exposed so downstream crates (symbol tables, call-site registries)
    /// can key maps by id and build fixture nodes in tests without going
    /// through a full [`Tree`].
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// One arena slot: a node's kind, its parent, and the trivia/invalid
/// tokens attached directly to it.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    /// Whitespace, newline, indentation, and comment tokens the reader
    /// attached to this node. Unordered with respect to `kind`'s own
    /// tokens; [`Tree::all_tokens`] restores source order by byte offset.
    pub trivia: Vec<Token>,
    /// Tokens the reader could not place in `kind` at all — kept so the
    /// printer can still reproduce them and a syntax pass can flag them.
    pub invalid: Vec<Token>,
}

impl NodeData {
    pub fn new(kind: NodeKind) -> Self {
        NodeData { kind, parent: None, trivia: Vec::new(), invalid: Vec::new() }
    }
}

/// The whole syntax tree: a flat arena of nodes plus the id of the root.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Tree {
    /// Builds a tree whose root is `root_kind`, pushed as node 0.
    pub fn new(root_kind: NodeKind) -> Self {
        Tree { nodes: vec![NodeData::new(root_kind)], root: NodeId(0) }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Allocates a new node and returns its id. Does not set a parent;
    /// callers link children via [`Tree::set_parent`] or by constructing
    /// the parent's `NodeKind` with this id already in its child slots.
    pub fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData::new(kind));
        id
    }

    pub fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        self.nodes[child.as_usize()].parent = Some(parent);
    }

    pub fn get(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.as_usize()]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.as_usize()]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.as_usize()].parent
    }

    pub fn attach_trivia(&mut self, id: NodeId, token: Token) {
        self.nodes[id.as_usize()].trivia.push(token);
    }

    pub fn attach_invalid(&mut self, id: NodeId, token: Token) {
        self.nodes[id.as_usize()].invalid.push(token);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node ids in the subtree rooted at `root`, in pre-order
    /// (parent before children, children in grammatical order).
    pub fn all_nodes(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            let children = self.get(id).kind.child_ids();
            for child in children.into_iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Every token (own, trivia, and invalid) belonging to the subtree
    /// rooted at `root`, restored to source order.
    ///
    /// Trivia and invalid tokens are stored unordered relative to a
    /// node's own tokens, so this gathers the full set across the
    /// subtree and sorts by byte offset rather than walking an explicit
    /// interleaved slot list. Because byte offsets are exactly source
    /// order, this reproduces the original text just as precisely as
    /// an interleaved representation would, for strictly less
    /// bookkeeping.
    pub fn all_tokens(&self, root: NodeId) -> Vec<Token> {
        let mut out = Vec::new();
        for id in self.all_nodes(root) {
            let data = self.get(id);
            out.extend(data.kind.own_tokens());
            out.extend(data.trivia.iter().cloned());
            out.extend(data.invalid.iter().cloned());
        }
        out.sort_by_key(|t| (t.span.start, t.span.end));
        out
    }

    /// Invalid tokens anywhere in the subtree rooted at `root`, in
    /// source order.
    pub fn all_invalid_tokens(&self, root: NodeId) -> Vec<Token> {
        let mut out = Vec::new();
        for id in self.all_nodes(root) {
            out.extend(self.get(id).invalid.iter().cloned());
        }
        out.sort_by_key(|t| t.span.start);
        out
    }

    /// The byte span covering every token in the subtree rooted at
    /// `root`. Returns `None` for a subtree with no tokens at all
    /// (an empty list node with no separators, for instance).
    pub fn span(&self, root: NodeId) -> Option<gdscript_position::ByteSpan> {
        let tokens = self.all_tokens(root);
        let mut iter = tokens.iter().map(|t| t.span);
        let first = iter.next()?;
        Some(iter.fold(first, |acc, span| acc.union(span)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::ListKind;
    use gdscript_position::ByteSpan;
    use gdscript_token::TokenKind;
    use std::sync::Arc;

    fn tok(kind: TokenKind, text: &str, start: usize) -> Token {
        Token::new(kind, Arc::from(text), ByteSpan::new(start, start + text.len()))
    }

    #[test]
    fn arena_allocates_sequential_ids() {
        let mut tree = Tree::new(NodeKind::Error);
        let a = tree.push(NodeKind::PassStmt { pass_kw: tok(TokenKind::Pass, "pass", 0) });
        let b = tree.push(NodeKind::BreakStmt { break_kw: tok(TokenKind::Break, "break", 5) });
        assert_ne!(a, b);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn pre_order_visits_parent_before_children() {
        let mut tree = Tree::new(NodeKind::List { kind: ListKind::Statements, items: vec![], separators: vec![] });
        let stmt = tree.push(NodeKind::PassStmt { pass_kw: tok(TokenKind::Pass, "pass", 0) });
        tree.set_parent(stmt, tree.root());
        if let NodeKind::List { items, .. } = &mut tree.get_mut(tree.root()).kind {
            items.push(stmt);
        }
        let order = tree.all_nodes(tree.root());
        assert_eq!(order, vec![tree.root(), stmt]);
    }

    #[test]
    fn all_tokens_restores_source_order_across_trivia() {
        let mut tree = Tree::new(NodeKind::PassStmt { pass_kw: tok(TokenKind::Pass, "pass", 4) });
        tree.attach_trivia(tree.root(), tok(TokenKind::Whitespace, "    ", 0));
        let tokens = tree.all_tokens(tree.root());
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].span.start, 0);
        assert_eq!(tokens[1].span.start, 4);
    }

    #[test]
    fn span_unions_every_token_in_subtree() {
        let mut tree = Tree::new(NodeKind::PassStmt { pass_kw: tok(TokenKind::Pass, "pass", 4) });
        tree.attach_trivia(tree.root(), tok(TokenKind::Whitespace, "    ", 0));
        let span = tree.span(tree.root());
        assert_eq!(span, Some(ByteSpan::new(0, 8)));
    }

    #[test]
    fn invalid_tokens_are_collected_in_order() {
        let mut tree = Tree::new(NodeKind::Error);
        tree.attach_invalid(tree.root(), tok(TokenKind::Invalid, "@@@", 10));
        let invalid = tree.all_invalid_tokens(tree.root());
        assert_eq!(invalid.len(), 1);
        assert_eq!(invalid[0].text.as_ref(), "@@@");
    }
}
