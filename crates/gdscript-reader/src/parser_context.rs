//! Cursor over a flat token stream, with budgeted diagnostics.
//!
//! Tokenizes the whole source up front, then exposes a cursor that
//! skips trivia for lookahead decisions while still handing it back to
//! callers so nothing gets dropped from the tree.

use gdscript_diagnostics::{Diagnostic, DiagnosticCode};
use gdscript_position::{ByteSpan, LineIndex};
use gdscript_token::{Token, TokenKind};

/// Bounds recovery work so a pathological input can't loop or recurse
/// forever. Mirrors the budget a resumable parser needs to stay
/// responsive on editor-sized files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseBudget {
    pub max_errors: usize,
    pub max_depth: usize,
    pub max_recovery_skips: usize,
}

impl Default for ParseBudget {
    fn default() -> Self {
        ParseBudget { max_errors: 500, max_depth: 256, max_recovery_skips: 2000 }
    }
}

impl ParseBudget {
    pub fn unlimited() -> Self {
        ParseBudget { max_errors: usize::MAX, max_depth: usize::MAX, max_recovery_skips: usize::MAX }
    }
}

#[derive(Debug, Default)]
struct BudgetTracker {
    errors_emitted: usize,
    current_depth: usize,
    skips_done: usize,
}

/// Cursor over the lexer's flat token stream.
///
/// `index` always points at a significant (non-trivia, non-invalid)
/// token or `Eof`; trivia and invalid runs between significant tokens
/// are collected into `pending_trivia`/`pending_invalid` and handed to
/// whichever resolver consumes the next significant token, so they end
/// up attached to the node that follows them.
pub struct ParserContext<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    index: usize,
    pending_trivia: Vec<Token>,
    pending_invalid: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
    budget: ParseBudget,
    tracker: BudgetTracker,
    line_index: LineIndex,
}

impl<'a> ParserContext<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_budget(source, ParseBudget::default())
    }

    pub fn with_budget(source: &'a str, budget: ParseBudget) -> Self {
        let tokens = crate::lexer::tokenize(source);
        let line_index = LineIndex::new(source);
        let mut ctx = ParserContext {
            source,
            tokens,
            index: 0,
            pending_trivia: Vec::new(),
            pending_invalid: Vec::new(),
            diagnostics: Vec::new(),
            budget,
            tracker: BudgetTracker::default(),
            line_index,
        };
        ctx.skip_to_significant();
        ctx
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Advances `index` past any trivia/invalid tokens, stashing them
    /// in the pending buffers.
    fn skip_to_significant(&mut self) {
        while let Some(tok) = self.tokens.get(self.index) {
            if tok.kind.is_trivia() {
                self.pending_trivia.push(tok.clone());
                self.index += 1;
            } else if tok.kind == TokenKind::Invalid {
                self.pending_invalid.push(tok.clone());
                self.index += 1;
            } else {
                break;
            }
        }
    }

    /// The current significant token (never trivia or invalid).
    pub fn current(&self) -> &Token {
        &self.tokens[self.index.min(self.tokens.len() - 1)]
    }

    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    pub fn is_eof(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    /// Consumes the current significant token along with any trivia or
    /// invalid runs that preceded it, returning all three so the caller
    /// can attach them to a node.
    pub fn bump(&mut self) -> Consumed {
        let token = self.current().clone();
        let trivia = std::mem::take(&mut self.pending_trivia);
        let invalid = std::mem::take(&mut self.pending_invalid);
        if self.index < self.tokens.len() {
            self.index += 1;
        }
        self.skip_to_significant();
        Consumed { token, trivia, invalid }
    }

    /// Consumes the current token if it matches `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> Option<Consumed> {
        if self.at(kind) { Some(self.bump()) } else { None }
    }

    /// Drains any trivia/invalid tokens buffered ahead of the current
    /// position without consuming the current significant token. Used
    /// at the start of a construct that wants leading trivia attached
    /// to itself rather than to the previous sibling.
    pub fn take_pending_trivia(&mut self) -> (Vec<Token>, Vec<Token>) {
        (std::mem::take(&mut self.pending_trivia), std::mem::take(&mut self.pending_invalid))
    }

    pub fn push_diagnostic(&mut self, code: DiagnosticCode, message: impl Into<String>, span: ByteSpan) {
        if self.tracker.errors_emitted >= self.budget.max_errors {
            return;
        }
        self.tracker.errors_emitted += 1;
        let position = self.line_index.line_col(span.start);
        self.diagnostics.push(Diagnostic::new(code, message.into(), span, position));
    }

    pub fn diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Enters a nesting level, returning `false` if doing so would
    /// exceed the parse budget's depth limit — callers should fall
    /// back to a flat error-recovery read instead of recursing further.
    pub fn enter_depth(&mut self) -> bool {
        if self.tracker.current_depth >= self.budget.max_depth {
            return false;
        }
        self.tracker.current_depth += 1;
        true
    }

    pub fn exit_depth(&mut self) {
        self.tracker.current_depth = self.tracker.current_depth.saturating_sub(1);
    }

    /// The kind of the next significant token after the current one,
    /// without consuming anything. Used by the `static` recovery rule
    /// (§4.B edge case) and a handful of other one-token lookaheads that
    /// the grammar can't resolve from the current token alone.
    pub fn peek_next_significant_kind(&self) -> TokenKind {
        let mut i = self.index + 1;
        while let Some(tok) = self.tokens.get(i) {
            if !tok.kind.is_trivia() && tok.kind != TokenKind::Invalid {
                return tok.kind;
            }
            i += 1;
        }
        TokenKind::Eof
    }

    /// Width (in characters) of the indentation run governing the
    /// *next* significant token, if the trivia buffered ahead of it
    /// contains one. `None` only when no line boundary has been
    /// crossed since the last `bump` (e.g. two tokens on the same
    /// line with only space/comment trivia between them).
    pub fn pending_indent_width(&self) -> Option<usize> {
        self.pending_trivia.iter().rev().find(|t| t.kind == TokenKind::Indentation).map(|t| t.text.chars().count())
    }

    /// Whether a newline has been crossed since the last `bump`.
    pub fn pending_has_newline(&self) -> bool {
        self.pending_trivia.iter().any(|t| t.kind == TokenKind::Newline)
    }

    /// Skips tokens until `kind` is found or the budget for recovery
    /// skips is exhausted, returning every skipped token as an invalid
    /// run so the tree stays lossless.
    pub fn recover_until(&mut self, kind: TokenKind) -> Vec<Token> {
        let mut skipped = Vec::new();
        while !self.at(kind) && !self.is_eof() {
            if self.tracker.skips_done >= self.budget.max_recovery_skips {
                break;
            }
            self.tracker.skips_done += 1;
            let consumed = self.bump();
            skipped.extend(consumed.trivia);
            skipped.extend(consumed.invalid);
            skipped.push(consumed.token);
        }
        skipped
    }
}

/// A significant token together with the trivia and invalid runs that
/// immediately preceded it.
pub struct Consumed {
    pub token: Token,
    pub trivia: Vec<Token>,
    pub invalid: Vec<Token>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_skips_trivia_but_retains_it() {
        let mut ctx = ParserContext::new("  var x\n");
        assert_eq!(ctx.current_kind(), TokenKind::Var);
        let consumed = ctx.bump();
        assert_eq!(consumed.token.kind, TokenKind::Var);
        assert!(consumed.trivia.iter().any(|t| t.kind == TokenKind::Indentation));
    }

    #[test]
    fn invalid_tokens_are_buffered_until_next_bump() {
        let mut ctx = ParserContext::new("`var x\n");
        assert_eq!(ctx.current_kind(), TokenKind::Var);
        let consumed = ctx.bump();
        assert!(consumed.invalid.iter().any(|t| t.kind == TokenKind::Invalid));
    }

    #[test]
    fn depth_budget_is_enforced() {
        let mut ctx = ParserContext::with_budget("x", ParseBudget { max_depth: 1, ..ParseBudget::default() });
        assert!(ctx.enter_depth());
        assert!(!ctx.enter_depth());
        ctx.exit_depth();
        assert!(ctx.enter_depth());
    }

    #[test]
    fn recover_until_stops_at_target_kind() {
        let mut ctx = ParserContext::new("x y z :\n");
        let skipped = ctx.recover_until(TokenKind::Colon);
        assert!(ctx.at(TokenKind::Colon));
        assert!(skipped.iter().any(|t| t.kind == TokenKind::Identifier));
    }
}
