//! Expression resolver: Pratt-style precedence climbing.
//!
//! §4.B's precedence table, low to high: ternary `if/else`, `or`, `and`,
//! `not`, comparison (`== != < > <= >=`)/`in`/`is`, bitwise or, xor,
//! bitwise and, shifts, additive, multiplicative, unary `- ~`, power
//! `**`, call/index/member, primary. `and`/`or` recognize the symbolic
//! `&&`/`||` spellings as the identical operator. Assignment and power
//! are right-associative; everything else is left-associative.
//!
//! Rather than a single operator-precedence loop keyed by a numeric
//! binding power, this mirrors the table directly as a chain of
//! methods — one per level — each falling through to the next on no
//! match. It's more code than a table-driven climb but it makes each
//! precedence level's associativity a local, auditable decision instead
//! of an entry in a lookup table.

use super::Parser;
use gdscript_ast::{ListKind, NodeId, NodeKind};
use gdscript_token::TokenKind;

impl<'a> Parser<'a> {
    /// Entry point: assignment, the lowest-precedence, right-associative
    /// family.
    pub(crate) fn parse_expr(&mut self) -> NodeId {
        let left = self.parse_ternary();
        if is_assignment_op(self.ctx.current_kind()) {
            let mut trivia = Vec::new();
            let mut invalid = Vec::new();
            let op = self.take_token(&mut trivia, &mut invalid);
            let right = self.parse_expr();
            return self.finish_node(NodeKind::BinaryOpExpr { left, op, right }, trivia, invalid, &[left, right]);
        }
        left
    }

    /// `true_expr if cond else false_expr` — the condition follows the
    /// true branch syntactically, so this is parsed as a suffix on an
    /// already-parsed `or`-level expression rather than a prefix like a
    /// C-style ternary.
    fn parse_ternary(&mut self) -> NodeId {
        let true_expr = self.parse_or();
        if !self.ctx.at(TokenKind::If) {
            return true_expr;
        }
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let if_kw = self.take_token(&mut trivia, &mut invalid);
        let cond = self.parse_or();
        let else_kw = self.eat_token(TokenKind::Else, &mut trivia, &mut invalid);
        let false_expr = if else_kw.is_some() { Some(self.parse_ternary()) } else { None };
        let mut children = vec![true_expr, cond];
        if let Some(id) = false_expr {
            children.push(id);
        }
        self.finish_node(NodeKind::TernaryExpr { true_expr, if_kw, cond, else_kw, false_expr }, trivia, invalid, &children)
    }

    fn parse_or(&mut self) -> NodeId {
        self.left_assoc_binary(Self::parse_and, |k| matches!(k, TokenKind::Or | TokenKind::PipePipe))
    }

    fn parse_and(&mut self) -> NodeId {
        self.left_assoc_binary(Self::parse_not, |k| matches!(k, TokenKind::And | TokenKind::AmpAmp))
    }

    /// Prefix `not` (and its symbolic alias `!`), which the spec places
    /// between `and` and comparison in binding strength.
    fn parse_not(&mut self) -> NodeId {
        if matches!(self.ctx.current_kind(), TokenKind::Not | TokenKind::Bang) {
            let mut trivia = Vec::new();
            let mut invalid = Vec::new();
            let op = self.take_token(&mut trivia, &mut invalid);
            let operand = self.parse_not();
            return self.finish_node(NodeKind::UnaryOpExpr { op, operand }, trivia, invalid, &[operand]);
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> NodeId {
        self.left_assoc_binary(Self::parse_bitor, |k| {
            matches!(
                k,
                TokenKind::EqualEqual
                    | TokenKind::BangEqual
                    | TokenKind::Less
                    | TokenKind::Greater
                    | TokenKind::LessEqual
                    | TokenKind::GreaterEqual
                    | TokenKind::In
                    | TokenKind::Is
            )
        })
    }

    fn parse_bitor(&mut self) -> NodeId {
        self.left_assoc_binary(Self::parse_bitxor, |k| k == TokenKind::Pipe)
    }

    fn parse_bitxor(&mut self) -> NodeId {
        self.left_assoc_binary(Self::parse_bitand, |k| k == TokenKind::Caret)
    }

    fn parse_bitand(&mut self) -> NodeId {
        self.left_assoc_binary(Self::parse_shift, |k| k == TokenKind::Amp)
    }

    fn parse_shift(&mut self) -> NodeId {
        self.left_assoc_binary(Self::parse_additive, |k| matches!(k, TokenKind::Shl | TokenKind::Shr))
    }

    fn parse_additive(&mut self) -> NodeId {
        self.left_assoc_binary(Self::parse_multiplicative, |k| matches!(k, TokenKind::Plus | TokenKind::Minus))
    }

    fn parse_multiplicative(&mut self) -> NodeId {
        self.left_assoc_binary(Self::parse_unary, |k| {
            matches!(k, TokenKind::Star | TokenKind::Slash | TokenKind::Percent)
        })
    }

    /// Prefix `-`/`~`. Binds looser than `**` (`-x ** 2` is `-(x ** 2)`),
    /// so recursion on the operand goes through `parse_unary` again
    /// rather than stopping at `parse_power`, letting a chain of unary
    /// operators still land above a single power expression.
    fn parse_unary(&mut self) -> NodeId {
        if matches!(self.ctx.current_kind(), TokenKind::Minus | TokenKind::Tilde) {
            let mut trivia = Vec::new();
            let mut invalid = Vec::new();
            let op = self.take_token(&mut trivia, &mut invalid);
            let operand = self.parse_unary();
            return self.finish_node(NodeKind::UnaryOpExpr { op, operand }, trivia, invalid, &[operand]);
        }
        self.parse_power()
    }

    /// `**`, right-associative: `2 ** 3 ** 2 == 2 ** (3 ** 2)`. The right
    /// operand recurses through `parse_unary` so `2 ** -3` parses as
    /// `2 ** (-3)`.
    fn parse_power(&mut self) -> NodeId {
        let left = self.parse_postfix();
        if self.ctx.at(TokenKind::Power) {
            let mut trivia = Vec::new();
            let mut invalid = Vec::new();
            let op = self.take_token(&mut trivia, &mut invalid);
            let right = self.parse_unary();
            return self.finish_node(NodeKind::BinaryOpExpr { left, op, right }, trivia, invalid, &[left, right]);
        }
        left
    }

    /// Call, member access, and indexing — all left-associative and
    /// chainable (`a.b().c[0].d(...)`).
    fn parse_postfix(&mut self) -> NodeId {
        let mut expr = self.parse_primary();
        loop {
            expr = match self.ctx.current_kind() {
                TokenKind::Dot => self.parse_member_access(expr),
                TokenKind::LeftParen => self.parse_call(expr),
                TokenKind::LeftBracket => self.parse_indexer(expr),
                _ => break,
            };
        }
        expr
    }

    fn parse_member_access(&mut self, receiver: NodeId) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let dot = self.take_token(&mut trivia, &mut invalid);
        let member = self.eat_token(TokenKind::Identifier, &mut trivia, &mut invalid);
        self.finish_node(NodeKind::MemberAccessExpr { receiver, dot, member }, trivia, invalid, &[receiver])
    }

    fn parse_call(&mut self, callee: NodeId) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let lparen = self.eat_token(TokenKind::LeftParen, &mut trivia, &mut invalid);
        let args = self.parse_argument_list();
        let rparen = self.eat_token(TokenKind::RightParen, &mut trivia, &mut invalid);
        self.finish_node(NodeKind::CallExpr { callee, lparen, args, rparen }, trivia, invalid, &[callee, args])
    }

    pub(crate) fn parse_argument_list(&mut self) -> NodeId {
        self.parse_comma_separated(ListKind::Arguments, TokenKind::RightParen, Self::parse_expr)
    }

    fn parse_indexer(&mut self, receiver: NodeId) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let lbracket = self.take_token(&mut trivia, &mut invalid);
        let index = self.parse_expr();
        let rbracket = self.eat_token(TokenKind::RightBracket, &mut trivia, &mut invalid);
        self.finish_node(
            NodeKind::IndexerExpr { receiver, lbracket, index, rbracket },
            trivia,
            invalid,
            &[receiver, index],
        )
    }

    fn parse_primary(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        match self.ctx.current_kind() {
            TokenKind::IntLiteral => {
                let tok = self.take_token(&mut trivia, &mut invalid);
                self.finish_node(NodeKind::IntLiteral(tok), trivia, invalid, &[])
            }
            TokenKind::FloatLiteral => {
                let tok = self.take_token(&mut trivia, &mut invalid);
                self.finish_node(NodeKind::FloatLiteral(tok), trivia, invalid, &[])
            }
            TokenKind::StringLiteral => {
                let tok = self.take_token(&mut trivia, &mut invalid);
                self.finish_node(NodeKind::StringLiteral(tok), trivia, invalid, &[])
            }
            TokenKind::NodePathLiteral => {
                let tok = self.take_token(&mut trivia, &mut invalid);
                self.finish_node(NodeKind::NodePathExpr { literal: tok }, trivia, invalid, &[])
            }
            TokenKind::True | TokenKind::False => {
                let tok = self.take_token(&mut trivia, &mut invalid);
                self.finish_node(NodeKind::BoolLiteral(tok), trivia, invalid, &[])
            }
            TokenKind::Null => {
                let tok = self.take_token(&mut trivia, &mut invalid);
                self.finish_node(NodeKind::NullLiteral(tok), trivia, invalid, &[])
            }
            TokenKind::Identifier => {
                let tok = self.take_token(&mut trivia, &mut invalid);
                self.finish_node(NodeKind::IdentifierExpr(tok), trivia, invalid, &[])
            }
            TokenKind::SelfKw => {
                let tok = self.take_token(&mut trivia, &mut invalid);
                self.finish_node(NodeKind::SelfExpr(tok), trivia, invalid, &[])
            }
            TokenKind::Super => {
                let tok = self.take_token(&mut trivia, &mut invalid);
                self.finish_node(NodeKind::SuperExpr(tok), trivia, invalid, &[])
            }
            TokenKind::LeftParen => {
                let lparen = self.take_token(&mut trivia, &mut invalid);
                let inner = self.parse_expr();
                let rparen = self.eat_token(TokenKind::RightParen, &mut trivia, &mut invalid);
                self.finish_node(NodeKind::BracketedExpr { lparen, inner, rparen }, trivia, invalid, &[inner])
            }
            TokenKind::LeftBracket => {
                let lbracket = self.take_token(&mut trivia, &mut invalid);
                let elements = self.parse_comma_separated(ListKind::ArrayElements, TokenKind::RightBracket, Self::parse_expr);
                let rbracket = self.eat_token(TokenKind::RightBracket, &mut trivia, &mut invalid);
                self.finish_node(
                    NodeKind::ArrayInitExpr { lbracket, elements, rbracket },
                    trivia,
                    invalid,
                    &[elements],
                )
            }
            TokenKind::LeftBrace => self.parse_dict_init(),
            TokenKind::Dollar => {
                let dollar = self.take_token(&mut trivia, &mut invalid);
                let path = self.eat_token(TokenKind::Identifier, &mut trivia, &mut invalid);
                self.finish_node(NodeKind::GetNodeExpr { dollar, path }, trivia, invalid, &[])
            }
            TokenKind::PercentPrefix => {
                let percent = self.take_token(&mut trivia, &mut invalid);
                let path =
                    self.eat_token(TokenKind::Identifier, &mut trivia, &mut invalid).or_else(|| {
                        self.eat_token(TokenKind::StringLiteral, &mut trivia, &mut invalid)
                    });
                self.finish_node(NodeKind::UniqueNodeExpr { percent, path }, trivia, invalid, &[])
            }
            TokenKind::Await => {
                let await_kw = self.take_token(&mut trivia, &mut invalid);
                let expr = self.parse_expr();
                self.finish_node(NodeKind::AwaitExpr { await_kw, expr }, trivia, invalid, &[expr])
            }
            TokenKind::Yield => {
                let yield_kw = self.take_token(&mut trivia, &mut invalid);
                let args = if self.ctx.at(TokenKind::LeftParen) {
                    let _ = self.eat_token(TokenKind::LeftParen, &mut trivia, &mut invalid);
                    let list = self.parse_comma_separated(ListKind::Arguments, TokenKind::RightParen, Self::parse_expr);
                    let _ = self.eat_token(TokenKind::RightParen, &mut trivia, &mut invalid);
                    Some(list)
                } else {
                    None
                };
                let mut children = Vec::new();
                if let Some(id) = args {
                    children.push(id);
                }
                self.finish_node(NodeKind::YieldExpr { yield_kw, args }, trivia, invalid, &children)
            }
            TokenKind::Func => self.parse_lambda(),
            _ => self.recover_into_error(TokenKind::Newline),
        }
    }

    fn parse_dict_init(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let lbrace = self.take_token(&mut trivia, &mut invalid);
        let entries = self.parse_comma_separated(ListKind::DictEntries, TokenKind::RightBrace, Self::parse_dict_entry);
        let rbrace = self.eat_token(TokenKind::RightBrace, &mut trivia, &mut invalid);
        self.finish_node(NodeKind::DictInitExpr { lbrace, entries, rbrace }, trivia, invalid, &[entries])
    }

    /// `key: value` or `key = value` inside a `{}` literal; GDScript
    /// accepts either separator in the same dictionary.
    fn parse_dict_entry(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let key = self.parse_expr();
        let separator = self
            .eat_token(TokenKind::Colon, &mut trivia, &mut invalid)
            .or_else(|| self.eat_token(TokenKind::Equal, &mut trivia, &mut invalid));
        let value = self.parse_expr();
        self.finish_node(NodeKind::DictEntry { key, separator, value }, trivia, invalid, &[key, value])
    }

    /// `func(params) -> Type: body` in expression position, optionally
    /// named (GDScript permits named inner function expressions in
    /// addition to anonymous lambdas).
    fn parse_lambda(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let func_kw = self.take_token(&mut trivia, &mut invalid);
        let name = self.eat_token(TokenKind::Identifier, &mut trivia, &mut invalid);
        let params = self.parse_parameter_list();
        let arrow = self.eat_token(TokenKind::Arrow, &mut trivia, &mut invalid);
        let return_type = if arrow.is_some() { Some(self.parse_type_node()) } else { None };
        let colon = self.eat_token(TokenKind::Colon, &mut trivia, &mut invalid);
        let body_indent = self.ctx.pending_indent_width().unwrap_or(0);
        let body = self.parse_suite(body_indent);
        let mut children = vec![params];
        if let Some(id) = return_type {
            children.push(id);
        }
        children.push(body);
        self.finish_node(
            NodeKind::LambdaExpr { func_kw, name, params, arrow, return_type, colon, body },
            trivia,
            invalid,
            &children,
        )
    }

    /// Shared driver for comma-separated lists that may legally be
    /// empty (argument lists, array/dict literals) — stops at `closer`
    /// or EOF to avoid consuming past a missing close token.
    pub(crate) fn parse_comma_separated(
        &mut self,
        kind: ListKind,
        closer: TokenKind,
        mut parse_item: impl FnMut(&mut Self) -> NodeId,
    ) -> NodeId {
        let mut items = Vec::new();
        let mut separators = Vec::new();
        let mut extra_trivia = Vec::new();
        let mut extra_invalid = Vec::new();
        while !self.ctx.at(closer) && !self.ctx.is_eof() {
            items.push(parse_item(self));
            if self.ctx.at(TokenKind::Comma) {
                separators.push(self.take_token(&mut extra_trivia, &mut extra_invalid));
            } else {
                break;
            }
        }
        let list = self.finish_list(kind, items, separators);
        for t in extra_trivia {
            self.tree.attach_trivia(list, t);
        }
        for t in extra_invalid {
            self.tree.attach_invalid(list, t);
        }
        list
    }

    /// `(name: Type = default, ...)` shared by methods, signals, and
    /// lambdas.
    pub(crate) fn parse_parameter_list(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let _ = self.eat_token(TokenKind::LeftParen, &mut trivia, &mut invalid);
        let list = self.parse_comma_separated(ListKind::Parameters, TokenKind::RightParen, Self::parse_parameter);
        let _ = self.eat_token(TokenKind::RightParen, &mut trivia, &mut invalid);
        // The parens themselves aren't part of the list node; fold
        // their trivia onto the list so nothing is lost.
        for t in trivia {
            self.tree.attach_trivia(list, t);
        }
        for t in invalid {
            self.tree.attach_invalid(list, t);
        }
        list
    }

    fn parse_parameter(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let name = self.eat_token(TokenKind::Identifier, &mut trivia, &mut invalid);
        let colon = self.eat_token(TokenKind::Colon, &mut trivia, &mut invalid);
        let type_node = if colon.is_some() { Some(self.parse_type_node()) } else { None };
        let equal = self.eat_token(TokenKind::Equal, &mut trivia, &mut invalid);
        let default = if equal.is_some() { Some(self.parse_expr()) } else { None };
        let mut children = Vec::new();
        if let Some(id) = type_node {
            children.push(id);
        }
        if let Some(id) = default {
            children.push(id);
        }
        self.finish_node(NodeKind::ParameterDecl { name, colon, type_node, equal, default }, trivia, invalid, &children)
    }

    /// Parses `left`-precedence-level-or-higher, then loops consuming
    /// `matches` operators at this exact level, left-associative.
    fn left_assoc_binary(&mut self, mut next: impl FnMut(&mut Self) -> NodeId, matches: impl Fn(TokenKind) -> bool) -> NodeId {
        let mut left = next(self);
        while matches(self.ctx.current_kind()) {
            let mut trivia = Vec::new();
            let mut invalid = Vec::new();
            let op = self.take_token(&mut trivia, &mut invalid);
            let right = next(self);
            left = self.finish_node(NodeKind::BinaryOpExpr { left, op, right }, trivia, invalid, &[left, right]);
        }
        left
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
