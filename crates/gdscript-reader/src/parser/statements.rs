//! Statement resolver: dispatches on the first keyword, and the
//! indentation-driven block ("suite") resolver shared by every
//! construct with a body (`if`, `while`, `for`, `func`, `match` cases).

use super::Parser;
use gdscript_ast::{ListKind, NodeId, NodeKind};
use gdscript_token::TokenKind;

impl<'a> Parser<'a> {
    /// Parses the body introduced by a `:` — either a single statement
    /// on the same line, or an indented block of statements at
    /// `body_indent` (or deeper; over-indented lines are still part of
    /// the block, matching a tolerant reader rather than a strict one).
    ///
    /// `parent_indent` is the indentation level of the construct that
    /// opened this suite (`if`, `func`, ...); it's only used as a
    /// fallback when the suite is empty and no line break follows the
    /// colon at all.
    pub(crate) fn parse_suite(&mut self, parent_indent: usize) -> NodeId {
        if !self.ctx.pending_has_newline() {
            // Same-line body, e.g. `if x: pass`.
            let mut items = Vec::new();
            if !self.ctx.is_eof() && !self.ctx.at(TokenKind::Newline) {
                items.push(self.parse_statement());
            }
            return self.finish_list(ListKind::Statements, items, Vec::new());
        }
        let body_indent = self.ctx.pending_indent_width().unwrap_or(parent_indent + 1);
        let mut items = Vec::new();
        loop {
            if self.ctx.is_eof() {
                break;
            }
            match self.ctx.pending_indent_width() {
                Some(width) if width >= body_indent => {}
                _ => break,
            }
            let before = self.ctx.current().span.start;
            items.push(self.parse_statement());
            if let Some(extra) = self.guard_progress(before, "suite statement") {
                items.push(extra);
            }
        }
        self.finish_list(ListKind::Statements, items, Vec::new())
    }

    /// Dispatches on the current token to the matching statement
    /// resolver. Never fails to return a node: an unrecognized leading
    /// token is absorbed as an expression-statement (which itself
    /// bottoms out in `Error` if nothing parses), keeping parsing
    /// resumable.
    pub(crate) fn parse_statement(&mut self) -> NodeId {
        match self.ctx.current_kind() {
            TokenKind::Pass => self.parse_pass(),
            TokenKind::Break => self.parse_break(),
            TokenKind::Continue => self.parse_continue(),
            TokenKind::Return => self.parse_return(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Match => self.parse_match(),
            TokenKind::Var | TokenKind::Const => self.parse_local_decl(),
            TokenKind::Yield => self.parse_yield_stmt(),
            TokenKind::Await => self.parse_await_stmt(),
            TokenKind::Assert => self.parse_assert(),
            TokenKind::Breakpoint => self.parse_breakpoint(),
            _ => self.parse_expression_stmt(),
        }
    }

    fn parse_pass(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let pass_kw = self.take_token(&mut trivia, &mut invalid);
        self.finish_node(NodeKind::PassStmt { pass_kw }, trivia, invalid, &[])
    }

    fn parse_break(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let break_kw = self.take_token(&mut trivia, &mut invalid);
        self.finish_node(NodeKind::BreakStmt { break_kw }, trivia, invalid, &[])
    }

    fn parse_continue(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let continue_kw = self.take_token(&mut trivia, &mut invalid);
        self.finish_node(NodeKind::ContinueStmt { continue_kw }, trivia, invalid, &[])
    }

    /// `breakpoint` has no dedicated node; it behaves exactly like
    /// `pass` grammatically and is represented as one for simplicity —
    /// the keyword token it carries is enough for any pass that cares
    /// to special-case it.
    fn parse_breakpoint(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let pass_kw = self.take_token(&mut trivia, &mut invalid);
        self.finish_node(NodeKind::PassStmt { pass_kw }, trivia, invalid, &[])
    }

    fn parse_return(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let return_kw = self.take_token(&mut trivia, &mut invalid);
        let value = if self.starts_expression() { Some(self.parse_expr()) } else { None };
        let children: Vec<NodeId> = value.into_iter().collect();
        self.finish_node(NodeKind::ReturnStmt { return_kw, value }, trivia, invalid, &children)
    }

    fn parse_if(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let indent = self.ctx.pending_indent_width().unwrap_or(0);
        let if_kw = self.take_token(&mut trivia, &mut invalid);
        let cond = self.parse_expr();
        let colon = self.eat_token(TokenKind::Colon, &mut trivia, &mut invalid);
        let body = self.parse_suite(indent);
        let mut elif_items = Vec::new();
        while self.ctx.pending_indent_width().unwrap_or(indent) == indent && self.ctx.at(TokenKind::Elif) {
            elif_items.push(self.parse_elif());
        }
        let elifs =
            if elif_items.is_empty() { None } else { Some(self.finish_list(ListKind::ElifClauses, elif_items, Vec::new())) };
        let else_clause = if self.ctx.pending_indent_width().unwrap_or(indent) == indent && self.ctx.at(TokenKind::Else) {
            Some(self.parse_else())
        } else {
            None
        };
        let mut children = vec![cond, body];
        if let Some(id) = elifs {
            children.push(id);
        }
        if let Some(id) = else_clause {
            children.push(id);
        }
        self.finish_node(NodeKind::IfStmt { if_kw, cond, colon, body, elifs, else_clause }, trivia, invalid, &children)
    }

    fn parse_elif(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let indent = self.ctx.pending_indent_width().unwrap_or(0);
        let elif_kw = self.take_token(&mut trivia, &mut invalid);
        let cond = self.parse_expr();
        let colon = self.eat_token(TokenKind::Colon, &mut trivia, &mut invalid);
        let body = self.parse_suite(indent);
        self.finish_node(NodeKind::ElifClause { elif_kw, cond, colon, body }, trivia, invalid, &[cond, body])
    }

    fn parse_else(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let indent = self.ctx.pending_indent_width().unwrap_or(0);
        let else_kw = self.take_token(&mut trivia, &mut invalid);
        let colon = self.eat_token(TokenKind::Colon, &mut trivia, &mut invalid);
        let body = self.parse_suite(indent);
        self.finish_node(NodeKind::ElseClause { else_kw, colon, body }, trivia, invalid, &[body])
    }

    fn parse_while(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let indent = self.ctx.pending_indent_width().unwrap_or(0);
        let while_kw = self.take_token(&mut trivia, &mut invalid);
        let cond = self.parse_expr();
        let colon = self.eat_token(TokenKind::Colon, &mut trivia, &mut invalid);
        let body = self.parse_suite(indent);
        self.finish_node(NodeKind::WhileStmt { while_kw, cond, colon, body }, trivia, invalid, &[cond, body])
    }

    fn parse_for(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let indent = self.ctx.pending_indent_width().unwrap_or(0);
        let for_kw = self.take_token(&mut trivia, &mut invalid);
        let var_name = self.eat_token(TokenKind::Identifier, &mut trivia, &mut invalid);
        let colon_type = self.eat_token(TokenKind::Colon, &mut trivia, &mut invalid);
        let type_node = if colon_type.is_some() { Some(self.parse_type_node()) } else { None };
        let in_kw = self.eat_token(TokenKind::In, &mut trivia, &mut invalid);
        let iterable = self.parse_expr();
        let colon = self.eat_token(TokenKind::Colon, &mut trivia, &mut invalid);
        let body = self.parse_suite(indent);
        let mut children = Vec::new();
        if let Some(id) = type_node {
            children.push(id);
        }
        children.push(iterable);
        children.push(body);
        self.finish_node(
            NodeKind::ForStmt { for_kw, var_name, colon_type, type_node, in_kw, iterable, colon, body },
            trivia,
            invalid,
            &children,
        )
    }

    fn parse_match(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let indent = self.ctx.pending_indent_width().unwrap_or(0);
        let match_kw = self.take_token(&mut trivia, &mut invalid);
        let subject = self.parse_expr();
        let colon = self.eat_token(TokenKind::Colon, &mut trivia, &mut invalid);
        let case_indent = self.ctx.pending_indent_width().unwrap_or(indent + 1);
        let mut case_items = Vec::new();
        loop {
            if self.ctx.is_eof() {
                break;
            }
            match self.ctx.pending_indent_width() {
                Some(width) if width >= case_indent => {}
                _ => break,
            }
            let before = self.ctx.current().span.start;
            case_items.push(self.parse_match_case(case_indent));
            if let Some(extra) = self.guard_progress(before, "match case") {
                case_items.push(extra);
            }
        }
        let cases = self.finish_list(ListKind::MatchCases, case_items, Vec::new());
        self.finish_node(NodeKind::MatchStmt { match_kw, subject, colon, cases }, trivia, invalid, &[subject, cases])
    }

    fn parse_match_case(&mut self, case_indent: usize) -> NodeId {
        let patterns = self.parse_comma_separated(ListKind::MatchPatterns, TokenKind::Colon, Self::parse_expr);
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let guard = if self.ctx.at(TokenKind::If) {
            let _if_kw = self.take_token(&mut trivia, &mut invalid);
            Some(self.parse_expr())
        } else {
            None
        };
        let colon = self.eat_token(TokenKind::Colon, &mut trivia, &mut invalid);
        let body = self.parse_suite(case_indent);
        let mut children = vec![patterns];
        if let Some(id) = guard {
            children.push(id);
        }
        children.push(body);
        self.finish_node(NodeKind::MatchCase { patterns, guard, colon, body }, trivia, invalid, &children)
    }

    /// `var`/`const` used as a statement inside a function body, as
    /// opposed to the class-level declaration resolver in `class.rs`.
    fn parse_local_decl(&mut self) -> NodeId {
        let inner = if self.ctx.at(TokenKind::Var) { self.parse_variable_decl(None) } else { self.parse_constant_decl() };
        self.finish_node(NodeKind::VariableDeclStmt { inner }, Vec::new(), Vec::new(), &[inner])
    }

    fn parse_yield_stmt(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let yield_kw = self.take_token(&mut trivia, &mut invalid);
        let args = if self.ctx.at(TokenKind::LeftParen) {
            let _ = self.eat_token(TokenKind::LeftParen, &mut trivia, &mut invalid);
            let list = self.parse_argument_list();
            let _ = self.eat_token(TokenKind::RightParen, &mut trivia, &mut invalid);
            Some(list)
        } else {
            None
        };
        let children: Vec<NodeId> = args.into_iter().collect();
        self.finish_node(NodeKind::YieldStmt { yield_kw, args }, trivia, invalid, &children)
    }

    fn parse_await_stmt(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let await_kw = self.take_token(&mut trivia, &mut invalid);
        let expr = self.parse_expr();
        self.finish_node(NodeKind::AwaitStmt { await_kw, expr }, trivia, invalid, &[expr])
    }

    fn parse_assert(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let assert_kw = self.take_token(&mut trivia, &mut invalid);
        let _ = self.eat_token(TokenKind::LeftParen, &mut trivia, &mut invalid);
        let cond = self.parse_expr();
        let comma = self.eat_token(TokenKind::Comma, &mut trivia, &mut invalid);
        let message = if comma.is_some() { Some(self.parse_expr()) } else { None };
        let _ = self.eat_token(TokenKind::RightParen, &mut trivia, &mut invalid);
        let mut children = vec![cond];
        if let Some(id) = message {
            children.push(id);
        }
        self.finish_node(NodeKind::AssertStmt { assert_kw, cond, comma, message }, trivia, invalid, &children)
    }

    fn parse_expression_stmt(&mut self) -> NodeId {
        if !self.starts_expression() {
            return self.recover_into_error(TokenKind::Newline);
        }
        let expr = self.parse_expr();
        self.finish_node(NodeKind::ExpressionStmt { expr }, Vec::new(), Vec::new(), &[expr])
    }

    /// Whether the current token can begin an expression at all — used
    /// to decide whether `return`/optional trailing expressions have
    /// one, and to recover gracefully instead of parsing garbage as an
    /// expression-statement.
    fn starts_expression(&self) -> bool {
        !matches!(
            self.ctx.current_kind(),
            TokenKind::Newline
                | TokenKind::Eof
                | TokenKind::Elif
                | TokenKind::Else
                | TokenKind::RightParen
                | TokenKind::RightBracket
                | TokenKind::RightBrace
        )
    }
}
