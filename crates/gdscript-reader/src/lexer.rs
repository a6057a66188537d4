//! Character-at-a-time tokenizer.
//!
//! Produces a flat stream including trivia; the parser decides what to
//! do with whitespace, newlines, and indentation runs. Anything the
//! lexer cannot classify becomes an `Invalid` run rather than stopping
//! — the cardinal invariant is that every source byte ends up in some
//! token.

use gdscript_position::ByteSpan;
use gdscript_token::{Token, TokenKind};
use std::sync::Arc;

/// Disambiguates tokens whose shape depends on whether a term or an
/// operator is expected next, mirroring how a Pratt-style expression
/// parser itself tracks this, but resolved here because the lexer is
/// the only place that can decide `%Node` is a unique-node prefix
/// rather than the start of a modulo expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexMode {
    ExpectTerm,
    ExpectOperator,
}

pub struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    mode: LexMode,
    at_line_start: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer { source, bytes: source.as_bytes(), pos: 0, mode: LexMode::ExpectTerm, at_line_start: true }
    }

    /// Tokenizes the whole source into a flat stream, terminated by one
    /// `Eof` token.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while self.pos < self.bytes.len() {
            if self.at_line_start {
                tokens.push(self.read_indentation());
                self.at_line_start = false;
                continue;
            }
            tokens.push(self.next_token());
        }
        tokens.push(Token::new(TokenKind::Eof, "", ByteSpan::empty(self.pos)));
        tokens
    }

    fn peek(&self) -> u8 {
        *self.bytes.get(self.pos).unwrap_or(&0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        *self.bytes.get(self.pos + offset).unwrap_or(&0)
    }

    fn slice(&self, start: usize) -> &'a str {
        &self.source[start..self.pos]
    }

    fn emit(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(kind, self.slice(start), ByteSpan::new(start, self.pos))
    }

    /// Reads the leading indentation run of a physical line, which may
    /// be empty. Does not consume past the first non-tab/space byte.
    fn read_indentation(&mut self) -> Token {
        let start = self.pos;
        while matches!(self.peek(), b' ' | b'\t') {
            self.pos += 1;
        }
        Token::new(TokenKind::Indentation, self.slice(start), ByteSpan::new(start, self.pos))
    }

    fn next_token(&mut self) -> Token {
        let start = self.pos;
        let c = self.peek();

        match c {
            b' ' | b'\t' => self.read_whitespace(start),
            b'\r' | b'\n' => self.read_newline(start),
            b'#' => self.read_comment(start),
            b'0'..=b'9' => self.read_number(start),
            b'"' | b'\'' => self.read_string(start),
            b'^' if self.peek_at(1) == b'"' => self.read_node_path(start),
            _ if is_ident_start(c) => self.read_identifier(start),
            _ => self.read_punctuation(start),
        }
    }

    fn read_whitespace(&mut self, start: usize) -> Token {
        while matches!(self.peek(), b' ' | b'\t') {
            self.pos += 1;
        }
        self.emit(TokenKind::Whitespace, start)
    }

    fn read_newline(&mut self, start: usize) -> Token {
        if self.peek() == b'\r' && self.peek_at(1) == b'\n' {
            self.pos += 2;
        } else {
            self.pos += 1;
        }
        self.at_line_start = true;
        self.mode = LexMode::ExpectTerm;
        self.emit(TokenKind::Newline, start)
    }

    fn read_comment(&mut self, start: usize) -> Token {
        while self.pos < self.bytes.len() && self.peek() != b'\n' && self.peek() != b'\r' {
            self.pos += 1;
        }
        self.emit(TokenKind::Comment, start)
    }

    fn read_number(&mut self, start: usize) -> Token {
        let mut is_float = false;
        while self.peek().is_ascii_digit() || self.peek() == b'_' {
            self.pos += 1;
        }
        if self.peek() == b'.' && self.peek_at(1).is_ascii_digit() {
            is_float = true;
            self.pos += 1;
            while self.peek().is_ascii_digit() || self.peek() == b'_' {
                self.pos += 1;
            }
        }
        if matches!(self.peek(), b'e' | b'E') {
            let mut lookahead = self.pos + 1;
            if matches!(self.bytes.get(lookahead), Some(b'+') | Some(b'-')) {
                lookahead += 1;
            }
            if self.bytes.get(lookahead).is_some_and(u8::is_ascii_digit) {
                is_float = true;
                self.pos = lookahead;
                while self.peek().is_ascii_digit() {
                    self.pos += 1;
                }
            }
        }
        self.mode = LexMode::ExpectOperator;
        self.emit(if is_float { TokenKind::FloatLiteral } else { TokenKind::IntLiteral }, start)
    }

    fn read_string(&mut self, start: usize) -> Token {
        self.advance_over_string_body();
        self.mode = LexMode::ExpectOperator;
        self.emit(TokenKind::StringLiteral, start)
    }

    fn read_node_path(&mut self, start: usize) -> Token {
        self.pos += 1;
        self.advance_over_string_body();
        self.mode = LexMode::ExpectOperator;
        self.emit(TokenKind::NodePathLiteral, start)
    }

    /// Advances `pos` past a quoted string body (single, double, or
    /// triple quoted), starting with `pos` on the opening quote.
    /// Shared by [`Lexer::read_string`] and [`Lexer::read_node_path`].
    fn advance_over_string_body(&mut self) {
        let quote = self.peek();
        let triple = self.peek_at(1) == quote && self.peek_at(2) == quote;
        self.pos += if triple { 3 } else { 1 };
        loop {
            if self.pos >= self.bytes.len() {
                break;
            }
            if self.peek() == b'\\' && self.pos + 1 < self.bytes.len() {
                self.pos += 2;
                continue;
            }
            if triple {
                if self.peek() == quote && self.peek_at(1) == quote && self.peek_at(2) == quote {
                    self.pos += 3;
                    break;
                }
            } else if self.peek() == quote {
                self.pos += 1;
                break;
            } else if self.peek() == b'\n' {
                break;
            }
            self.pos += 1;
        }
    }

    fn read_identifier(&mut self, start: usize) -> Token {
        while is_ident_continue(self.peek()) {
            self.pos += 1;
        }
        let word = self.slice(start);
        self.mode = LexMode::ExpectOperator;
        let kind = TokenKind::keyword_from_str(word).unwrap_or(TokenKind::Identifier);
        if matches!(kind, TokenKind::Await) {
            self.mode = LexMode::ExpectTerm;
        }
        self.emit(kind, start)
    }

    fn read_punctuation(&mut self, start: usize) -> Token {
        let c = self.peek();
        let kind = match c {
            b'(' => self.advance_one(TokenKind::LeftParen),
            b')' => self.advance_one(TokenKind::RightParen),
            b'[' => self.advance_one(TokenKind::LeftBracket),
            b']' => self.advance_one(TokenKind::RightBracket),
            b'{' => self.advance_one(TokenKind::LeftBrace),
            b'}' => self.advance_one(TokenKind::RightBrace),
            b',' => self.advance_one(TokenKind::Comma),
            b':' => self.advance_one(TokenKind::Colon),
            b';' => self.advance_one(TokenKind::Semicolon),
            b'@' => self.advance_one(TokenKind::At),
            b'$' => self.advance_one(TokenKind::Dollar),
            b'~' => self.advance_one(TokenKind::Tilde),
            b'.' => self.read_dot(),
            b'-' => self.read_two(b'=', TokenKind::MinusEqual, b'>', TokenKind::Arrow, TokenKind::Minus),
            b'+' => self.read_two(b'=', TokenKind::PlusEqual, 0, TokenKind::Eof, TokenKind::Plus),
            b'*' => self.read_star(),
            b'/' => self.read_two(b'=', TokenKind::SlashEqual, 0, TokenKind::Eof, TokenKind::Slash),
            b'%' => self.read_percent(),
            b'=' => self.read_two(b'=', TokenKind::EqualEqual, 0, TokenKind::Eof, TokenKind::Equal),
            b'!' => self.read_two(b'=', TokenKind::BangEqual, 0, TokenKind::Eof, TokenKind::Bang),
            b'<' => self.read_shift(b'<', TokenKind::Shl, TokenKind::ShlEqual, TokenKind::Less, TokenKind::LessEqual),
            b'>' => {
                self.read_shift(b'>', TokenKind::Shr, TokenKind::ShrEqual, TokenKind::Greater, TokenKind::GreaterEqual)
            }
            b'&' => self.read_repeat_or_equal(b'&', TokenKind::AmpAmp, TokenKind::AmpEqual, TokenKind::Amp),
            b'|' => self.read_repeat_or_equal(b'|', TokenKind::PipePipe, TokenKind::PipeEqual, TokenKind::Pipe),
            b'^' => self.read_two(b'=', TokenKind::CaretEqual, 0, TokenKind::Eof, TokenKind::Caret),
            _ => None,
        };
        match kind {
            Some(kind) => {
                self.mode = if matches!(kind, TokenKind::RightParen | TokenKind::RightBracket | TokenKind::RightBrace)
                {
                    LexMode::ExpectOperator
                } else {
                    LexMode::ExpectTerm
                };
                self.emit(kind, start)
            }
            None => self.read_invalid(start),
        }
    }

    fn advance_one(&mut self, kind: TokenKind) -> Option<TokenKind> {
        self.pos += 1;
        Some(kind)
    }

    fn read_dot(&mut self) -> Option<TokenKind> {
        self.pos += 1;
        if self.peek() == b'.' {
            self.pos += 1;
            Some(TokenKind::DotDot)
        } else {
            Some(TokenKind::Dot)
        }
    }

    fn read_star(&mut self) -> Option<TokenKind> {
        self.pos += 1;
        if self.peek() == b'*' {
            self.pos += 1;
            if self.peek() == b'=' {
                self.pos += 1;
                return Some(TokenKind::PowerEqual);
            }
            return Some(TokenKind::Power);
        }
        if self.peek() == b'=' {
            self.pos += 1;
            return Some(TokenKind::StarEqual);
        }
        Some(TokenKind::Star)
    }

    fn read_percent(&mut self) -> Option<TokenKind> {
        if self.mode == LexMode::ExpectTerm && (is_ident_start(self.peek_at(1)) || self.peek_at(1) == b'"') {
            self.pos += 1;
            return Some(TokenKind::PercentPrefix);
        }
        self.pos += 1;
        if self.peek() == b'=' {
            self.pos += 1;
            return Some(TokenKind::PercentEqual);
        }
        Some(TokenKind::Percent)
    }

    /// `base` followed optionally by `second` (→ `second_kind`) or by a
    /// bare `=` (→ `eq_kind`); otherwise just `base` (→ `plain_kind`).
    fn read_two(
        &mut self,
        eq: u8,
        eq_kind: TokenKind,
        second: u8,
        second_kind: TokenKind,
        plain_kind: TokenKind,
    ) -> Option<TokenKind> {
        self.pos += 1;
        if self.peek() == eq {
            self.pos += 1;
            return Some(eq_kind);
        }
        if second != 0 && self.peek() == second {
            self.pos += 1;
            return Some(second_kind);
        }
        Some(plain_kind)
    }

    /// `<` / `>`: doubled (`<<`, `>>`) optionally followed by `=`, or
    /// single optionally followed by `=`.
    fn read_shift(
        &mut self,
        repeat: u8,
        repeat_kind: TokenKind,
        repeat_eq_kind: TokenKind,
        single_kind: TokenKind,
        single_eq_kind: TokenKind,
    ) -> Option<TokenKind> {
        self.pos += 1;
        if self.peek() == repeat {
            self.pos += 1;
            if self.peek() == b'=' {
                self.pos += 1;
                return Some(repeat_eq_kind);
            }
            return Some(repeat_kind);
        }
        if self.peek() == b'=' {
            self.pos += 1;
            return Some(single_eq_kind);
        }
        Some(single_kind)
    }

    /// `&` / `|`: doubled (`&&`, `||`) or followed by `=`, or bare.
    fn read_repeat_or_equal(
        &mut self,
        repeat: u8,
        repeat_kind: TokenKind,
        eq_kind: TokenKind,
        plain_kind: TokenKind,
    ) -> Option<TokenKind> {
        self.pos += 1;
        if self.peek() == repeat {
            self.pos += 1;
            return Some(repeat_kind);
        }
        if self.peek() == b'=' {
            self.pos += 1;
            return Some(eq_kind);
        }
        Some(plain_kind)
    }

    fn read_invalid(&mut self, start: usize) -> Token {
        // Consume the largest contiguous run of bytes that none of the
        // other branches would accept as the start of a token.
        loop {
            self.pos += 1;
            if self.pos >= self.bytes.len() {
                break;
            }
            let c = self.peek();
            if matches!(c, b' ' | b'\t' | b'\r' | b'\n') || is_ident_start(c) || c.is_ascii_digit() {
                break;
            }
            if b"()[]{},:;@$~.+-*/%=!<>&|^#\"'".contains(&c) {
                break;
            }
        }
        self.emit(TokenKind::Invalid, start)
    }
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c >= 0x80
}

fn is_ident_continue(c: u8) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

/// Tokenizes `source`, producing the flat stream (trivia and `Invalid`
/// runs included) the parser consumes.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

/// Splits off annotation names: called by the parser after seeing `@`,
/// since whether the following identifier is an `AnnotationName` or a
/// plain `Identifier` is a parser-level concern (an `@` can only be
/// followed by an annotation), not a lexer-level one.
pub fn reclassify_as_annotation_name(token: &Token) -> Token {
    if token.kind == TokenKind::Identifier {
        Token::new(TokenKind::AnnotationName, Arc::clone(&token.text), token.span)
    } else {
        token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn tokenizes_simple_assignment() {
        let tokens = tokenize("var x = 1\n");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Indentation,
                TokenKind::Var,
                TokenKind::Whitespace,
                TokenKind::Identifier,
                TokenKind::Whitespace,
                TokenKind::Equal,
                TokenKind::Whitespace,
                TokenKind::IntLiteral,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn tokens_concatenate_back_to_source() {
        let source = "func _ready() -> void:\n\tpass\n";
        let tokens = tokenize(source);
        let rebuilt: String = tokens.iter().map(|t| t.text.as_ref()).collect();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn float_literal_requires_digit_after_dot() {
        let tokens = tokenize("1.5");
        assert_eq!(kinds(&tokens), vec![TokenKind::Indentation, TokenKind::FloatLiteral, TokenKind::Eof]);
    }

    #[test]
    fn range_operator_is_not_confused_with_float() {
        let tokens = tokenize("0..5");
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Indentation, TokenKind::IntLiteral, TokenKind::DotDot, TokenKind::IntLiteral, TokenKind::Eof]
        );
    }

    #[test]
    fn percent_prefix_recognized_after_operator_context() {
        let tokens = tokenize("%Label");
        assert_eq!(kinds(&tokens), vec![TokenKind::Indentation, TokenKind::PercentPrefix, TokenKind::Identifier, TokenKind::Eof]);
    }

    #[test]
    fn percent_is_modulo_after_a_value() {
        let tokens = tokenize("a % b");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Indentation,
                TokenKind::Identifier,
                TokenKind::Whitespace,
                TokenKind::Percent,
                TokenKind::Whitespace,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn invalid_bytes_become_invalid_token_not_a_parse_failure() {
        let tokens = tokenize("var x = `\n");
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Invalid));
    }

    #[test]
    fn triple_quoted_string_spans_multiple_lines() {
        let tokens = tokenize("\"\"\"a\nb\"\"\"");
        assert_eq!(kinds(&tokens), vec![TokenKind::Indentation, TokenKind::StringLiteral, TokenKind::Eof]);
    }

    #[test]
    fn node_path_literal_is_tokenized_whole() {
        let tokens = tokenize("^\"Path/To/Node\"");
        assert_eq!(kinds(&tokens), vec![TokenKind::Indentation, TokenKind::NodePathLiteral, TokenKind::Eof]);
    }
}
