//! Type reference resolver: `int`, `Array[T]`, `Dictionary[K, V]`.

use super::Parser;
use gdscript_ast::{NodeId, NodeKind};
use gdscript_token::TokenKind;

impl<'a> Parser<'a> {
    /// Parses one type node. Always produces a node: an unresolvable
    /// token still becomes a `SingleTypeNode` wrapping whatever was
    /// there, or an `Error` node if nothing usable follows.
    pub(crate) fn parse_type_node(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        if !matches!(self.ctx.current_kind(), TokenKind::Identifier | TokenKind::Void) {
            return self.error_node();
        }
        let base = self.take_token(&mut trivia, &mut invalid);
        if !self.ctx.at(TokenKind::LeftBracket) {
            return self.finish_node(NodeKind::SingleTypeNode(base), trivia, invalid, &[]);
        }
        let lbracket = self.take_token(&mut trivia, &mut invalid);
        let first = self.parse_type_node();
        if self.ctx.at(TokenKind::Comma) {
            let comma = self.take_token(&mut trivia, &mut invalid);
            let value = self.parse_type_node();
            let rbracket = self.eat_token(TokenKind::RightBracket, &mut trivia, &mut invalid);
            return self.finish_node(
                NodeKind::DictionaryOfTypeNode { base, lbracket, key: first, comma: Some(comma), value, rbracket },
                trivia,
                invalid,
                &[first, value],
            );
        }
        let rbracket = self.eat_token(TokenKind::RightBracket, &mut trivia, &mut invalid);
        self.finish_node(
            NodeKind::ArrayOfTypeNode { base, lbracket, element: first, rbracket },
            trivia,
            invalid,
            &[first],
        )
    }
}
