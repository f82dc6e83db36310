use crate::{
    common::Span,
    token::{Token, TokenKind},
};

use unicode_xid::UnicodeXID;

fn is_letter(c: char) -> bool {
    c == '_' || c.is_xid_start()
}

/// Pull-based lexer. Tokens are produced one at a time by `next_token`, so a
/// parser never needs the whole token stream in memory.
#[derive(Debug, Clone)]
pub struct Lexer {
    source: Vec<char>,

    start: usize,
    current: usize,
    finished: bool,
}

impl Lexer {
    pub fn from_str(source: &str) -> Self {
        Lexer::from_chars(source.chars().collect())
    }

    pub fn from_chars(chars: Vec<char>) -> Self {
        Lexer {
            source: chars,
            start: 0,
            current: 0,
            finished: false,
        }
    }

    fn advance(&mut self) {
        self.current += 1;
    }

    fn get_span(&self) -> Span {
        self.start..self.current
    }

    fn create_token(&self, kind: TokenKind) -> Token {
        Token {
            kind,
            literal: self.source[self.get_span()].iter().collect(),
            span: self.get_span(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.current).copied()
    }

    /// Emits `long` when the next character is `second` (consuming it),
    /// otherwise `short`.
    fn one_or_two(&mut self, second: char, long: TokenKind, short: TokenKind) -> Token {
        if self.peek() == Some(second) {
            self.advance();
            self.create_token(long)
        } else {
            self.create_token(short)
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn lex_number(&mut self) -> Token {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }

        self.create_token(TokenKind::Integer)
    }

    fn lex_ident(&mut self) -> Token {
        while matches!(self.peek(), Some(c) if is_letter(c)) {
            self.advance();
        }

        let lexeme = self.source[self.get_span()].iter().collect::<String>();
        let kind = TokenKind::from_keyword_str(&lexeme).unwrap_or(TokenKind::Identifier);

        Token {
            kind,
            literal: lexeme,
            span: self.get_span(),
        }
    }

    /// Returns the next token. Once the input is exhausted every call returns
    /// an `Eof` token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.start = self.current;

        let c = match self.peek() {
            Some(c) => c,
            None => return self.create_token(TokenKind::Eof),
        };
        self.advance();

        match c {
            '(' => self.create_token(TokenKind::LeftParen),
            ')' => self.create_token(TokenKind::RightParen),
            '{' => self.create_token(TokenKind::LeftBrace),
            '}' => self.create_token(TokenKind::RightBrace),
            ',' => self.create_token(TokenKind::Comma),
            ';' => self.create_token(TokenKind::Semicolon),

            '=' => self.one_or_two('=', TokenKind::Equal, TokenKind::Assign),
            '!' => self.one_or_two('=', TokenKind::Different, TokenKind::Negation),
            '<' => self.one_or_two('=', TokenKind::LesserEqual, TokenKind::Lesser),
            '>' => self.one_or_two('=', TokenKind::GreaterEqual, TokenKind::Greater),

            '+' => self.create_token(TokenKind::Plus),
            '-' => self.create_token(TokenKind::Minus),
            '*' => self.create_token(TokenKind::Multiplication),
            '/' => self.create_token(TokenKind::Division),

            _ if c.is_ascii_digit() => self.lex_number(),
            _ if is_letter(c) => self.lex_ident(),
            _ => self.create_token(TokenKind::Illegal),
        }
    }
}

/// Yields every token up to and including the first `Eof`.
impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }

        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_literals(source: &str) -> Vec<(TokenKind, String)> {
        Lexer::from_str(source)
            .map(|token| (token.kind, token.literal))
            .collect()
    }

    fn expected(pairs: &[(TokenKind, &str)]) -> Vec<(TokenKind, String)> {
        pairs
            .iter()
            .map(|(kind, literal)| (*kind, literal.to_string()))
            .collect()
    }

    #[test]
    fn let_statement() {
        assert_eq!(
            kinds_and_literals("let five = 5;"),
            expected(&[
                (TokenKind::Let, "let"),
                (TokenKind::Identifier, "five"),
                (TokenKind::Assign, "="),
                (TokenKind::Integer, "5"),
                (TokenKind::Semicolon, ";"),
                (TokenKind::Eof, ""),
            ])
        );
    }

    #[test]
    fn one_and_two_character_operators() {
        assert_eq!(
            kinds_and_literals("= == ! != < <= > >="),
            expected(&[
                (TokenKind::Assign, "="),
                (TokenKind::Equal, "=="),
                (TokenKind::Negation, "!"),
                (TokenKind::Different, "!="),
                (TokenKind::Lesser, "<"),
                (TokenKind::LesserEqual, "<="),
                (TokenKind::Greater, ">"),
                (TokenKind::GreaterEqual, ">="),
                (TokenKind::Eof, ""),
            ])
        );
    }

    #[test]
    fn two_character_operators_without_spaces() {
        assert_eq!(
            kinds_and_literals("a<=b!=c"),
            expected(&[
                (TokenKind::Identifier, "a"),
                (TokenKind::LesserEqual, "<="),
                (TokenKind::Identifier, "b"),
                (TokenKind::Different, "!="),
                (TokenKind::Identifier, "c"),
                (TokenKind::Eof, ""),
            ])
        );
    }

    #[test]
    fn delimiters_and_arithmetic() {
        assert_eq!(
            kinds_and_literals("+-*/(){},;"),
            expected(&[
                (TokenKind::Plus, "+"),
                (TokenKind::Minus, "-"),
                (TokenKind::Multiplication, "*"),
                (TokenKind::Division, "/"),
                (TokenKind::LeftParen, "("),
                (TokenKind::RightParen, ")"),
                (TokenKind::LeftBrace, "{"),
                (TokenKind::RightBrace, "}"),
                (TokenKind::Comma, ","),
                (TokenKind::Semicolon, ";"),
                (TokenKind::Eof, ""),
            ])
        );
    }

    #[test]
    fn function_declaration() {
        let kinds = Lexer::from_str("variable suma = function(x, y) { return x + y; };")
            .map(|token| token.kind)
            .collect::<Vec<_>>();

        assert_eq!(
            kinds,
            vec![
                TokenKind::Let,
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::Function,
                TokenKind::LeftParen,
                TokenKind::Identifier,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::RightParen,
                TokenKind::LeftBrace,
                TokenKind::Return,
                TokenKind::Identifier,
                TokenKind::Plus,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::RightBrace,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn accented_identifiers_and_underscores() {
        assert_eq!(
            kinds_and_literals("año _valor Ñandú"),
            expected(&[
                (TokenKind::Identifier, "año"),
                (TokenKind::Identifier, "_valor"),
                (TokenKind::Identifier, "Ñandú"),
                (TokenKind::Eof, ""),
            ])
        );
    }

    #[test]
    fn numbers_stop_at_non_digits() {
        assert_eq!(
            kinds_and_literals("-12.5"),
            expected(&[
                (TokenKind::Minus, "-"),
                (TokenKind::Integer, "12"),
                (TokenKind::Illegal, "."),
                (TokenKind::Integer, "5"),
                (TokenKind::Eof, ""),
            ])
        );
    }

    #[test]
    fn identifiers_are_runs_of_letters() {
        assert_eq!(
            kinds_and_literals("x1"),
            expected(&[
                (TokenKind::Identifier, "x"),
                (TokenKind::Integer, "1"),
                (TokenKind::Eof, ""),
            ])
        );
    }

    #[test]
    fn illegal_characters() {
        assert_eq!(
            kinds_and_literals("¿@"),
            expected(&[
                (TokenKind::Illegal, "¿"),
                (TokenKind::Illegal, "@"),
                (TokenKind::Eof, ""),
            ])
        );
    }

    #[test]
    fn eof_is_idempotent() {
        let mut lexer = Lexer::from_str("1");
        assert_eq!(lexer.next_token().kind, TokenKind::Integer);
        for _ in 0..3 {
            let token = lexer.next_token();
            assert_eq!(token.kind, TokenKind::Eof);
            assert_eq!(token.span, 1..1);
        }
    }

    #[test]
    fn spans_index_characters() {
        let tokens = Lexer::from_str("ñ == 10").collect::<Vec<_>>();
        assert_eq!(tokens[0].span, 0..1);
        assert_eq!(tokens[1].span, 2..4);
        assert_eq!(tokens[2].span, 5..7);
    }

    #[test]
    fn empty_and_blank_input() {
        assert_eq!(kinds_and_literals(""), expected(&[(TokenKind::Eof, "")]));
        assert_eq!(
            kinds_and_literals(" \t\r\n "),
            expected(&[(TokenKind::Eof, "")])
        );
    }
}
