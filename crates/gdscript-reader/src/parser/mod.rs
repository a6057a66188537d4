//! The resolver stack, recast as recursive descent over [`ParserContext`].
//!
//! Each `parse_*` method plays the role of one resolver from §4.B: it
//! owns a state machine only implicitly (Rust's call stack is the state
//! stack), but the contract is the same — consume what the grammar
//! allows, recover into an invalid-token run on anything else, and
//! never fail to produce a node. [`Parser::parse_file`],
//! [`Parser::parse_expression_only`], and [`Parser::parse_statement_only`]
//! are the three entry points §4.B promises.

mod class;
mod expressions;
mod statements;
mod types;

use crate::error::InternalParserInconsistency;
use crate::parser_context::{ParseBudget, ParserContext};
use gdscript_ast::{ListKind, NodeId, NodeKind, Tree};
use gdscript_diagnostics::Diagnostic;
use gdscript_token::{Token, TokenKind};

/// Result of any of the three parse entry points: a full tree plus
/// whatever `InvalidToken`/indentation diagnostics the syntax pass
/// would otherwise have to re-derive from walking invalid slots.
pub struct ParseOutput {
    pub tree: Tree,
    pub diagnostics: Vec<Diagnostic>,
}

pub(crate) struct Parser<'a> {
    pub(crate) ctx: ParserContext<'a>,
    pub(crate) tree: Tree,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, budget: ParseBudget) -> Self {
        Parser { ctx: ParserContext::with_budget(source, budget), tree: Tree::new(NodeKind::Error) }
    }

    fn finish(self) -> ParseOutput {
        ParseOutput { tree: self.tree, diagnostics: self.ctx.diagnostics() }
    }

    /// Consumes the current token, folding its leading trivia/invalid
    /// runs into the caller's accumulators rather than a node that
    /// doesn't exist yet (the node is only pushed once every field of
    /// its `NodeKind` is known).
    pub(crate) fn take_token(&mut self, trivia: &mut Vec<Token>, invalid: &mut Vec<Token>) -> Token {
        let consumed = self.ctx.bump();
        trivia.extend(consumed.trivia);
        invalid.extend(consumed.invalid);
        consumed.token
    }

    /// Consumes the current token only if it matches `kind`.
    pub(crate) fn eat_token(
        &mut self,
        kind: TokenKind,
        trivia: &mut Vec<Token>,
        invalid: &mut Vec<Token>,
    ) -> Option<Token> {
        if self.ctx.at(kind) { Some(self.take_token(trivia, invalid)) } else { None }
    }

    /// Pushes `kind` as a new node, links `children` as its parent, and
    /// attaches the trivia/invalid tokens the caller collected while
    /// building it.
    pub(crate) fn finish_node(
        &mut self,
        kind: NodeKind,
        trivia: Vec<Token>,
        invalid: Vec<Token>,
        children: &[NodeId],
    ) -> NodeId {
        let id = self.tree.push(kind);
        for &child in children {
            self.tree.set_parent(child, id);
        }
        for t in trivia {
            self.tree.attach_trivia(id, t);
        }
        for t in invalid {
            self.tree.attach_invalid(id, t);
        }
        id
    }

    /// Builds a `NodeKind::List` node of `kind` out of already-parsed
    /// `items`, recording whatever separator tokens the caller consumed
    /// between them.
    pub(crate) fn finish_list(&mut self, kind: ListKind, items: Vec<NodeId>, separators: Vec<Token>) -> NodeId {
        let id = self.tree.push(NodeKind::List { kind, items: items.clone(), separators });
        for item in items {
            self.tree.set_parent(item, id);
        }
        id
    }

    /// Consumes the current token as a one-token `Error` node, recovery
    /// for a slot the grammar expected something in but found nothing
    /// usable — e.g. a missing identifier after `func`.
    pub(crate) fn error_node(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        if !self.ctx.is_eof() {
            let tok = self.take_token(&mut trivia, &mut invalid);
            invalid.push(tok);
        }
        self.finish_node(NodeKind::Error, trivia, invalid, &[])
    }

    /// Checks that the resolver calling this made forward progress
    /// since `before`. If it didn't (and the stream isn't at EOF),
    /// that's an [`InternalParserInconsistency`]: an impossible resolver
    /// state that would otherwise spin forever. Logs it and forces one
    /// token of progress via [`Parser::error_node`], returning the
    /// extra node the caller must fold into its item list.
    pub(crate) fn guard_progress(&mut self, before: usize, context: &'static str) -> Option<NodeId> {
        if self.ctx.is_eof() || self.ctx.current().span.start > before {
            return None;
        }
        let err = InternalParserInconsistency::NoProgress { offset: before, context };
        tracing::error!(error = %err, "internal parser inconsistency; forcing recovery");
        Some(self.error_node())
    }

    /// Skips forward until `stop` is seen (or EOF, or the recovery
    /// budget runs out), wrapping everything skipped as invalid tokens
    /// on a single `Error` node. Used when a resolver cannot make sense
    /// of the current token in its current state at all.
    pub(crate) fn recover_into_error(&mut self, stop: TokenKind) -> NodeId {
        let skipped = self.ctx.recover_until(stop);
        let id = self.tree.push(NodeKind::Error);
        for t in skipped {
            if t.kind.is_trivia() {
                self.tree.attach_trivia(id, t);
            } else {
                self.tree.attach_invalid(id, t);
            }
        }
        id
    }
}

/// Parses a whole file; the root of the returned tree is a `ClassDecl`.
pub fn parse_file(source: &str) -> ParseOutput {
    let mut parser = Parser::new(source, ParseBudget::default());
    parser.parse_class_into_root();
    parser.finish()
}

/// Parses a whole file with an explicit recovery budget, for callers
/// (fuzzers, the incremental pipeline's worst-case guard) that want to
/// bound pathological input explicitly rather than trust the default.
pub fn parse_file_with_budget(source: &str, budget: ParseBudget) -> ParseOutput {
    let mut parser = Parser::new(source, budget);
    parser.parse_class_into_root();
    parser.finish()
}

/// Parses `source` as a single expression. Trailing trivia becomes the
/// root expression node's own trivia.
pub fn parse_expression(source: &str) -> ParseOutput {
    let mut parser = Parser::new(source, ParseBudget::default());
    let root = parser.parse_expr();
    reparent_as_root(&mut parser.tree, root);
    parser.finish()
}

/// Parses `source` as a single statement.
pub fn parse_statement(source: &str) -> ParseOutput {
    let mut parser = Parser::new(source, ParseBudget::default());
    let root = parser.parse_statement();
    reparent_as_root(&mut parser.tree, root);
    parser.finish()
}

/// `Tree::new` always reserves node 0 as the root. The single-expression
/// and single-statement entry points don't know their root's `NodeKind`
/// up front the way `parse_class_into_root` does (it overwrites node 0
/// in place), so instead they parse into a fresh node and swap its data
/// into slot 0.
fn reparent_as_root(tree: &mut Tree, actual_root: NodeId) {
    if actual_root == tree.root() {
        return;
    }
    let data = tree.get(actual_root).clone();
    let children = data.kind.child_ids();
    *tree.get_mut(tree.root()) = data;
    for child in children {
        tree.set_parent(child, tree.root());
    }
}
