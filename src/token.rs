use derive_more::Display;

use crate::common::{Error, Span};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[display(fmt = "IDENTIFIER")]
    Identifier,
    #[display(fmt = "INTEGER")]
    Integer,
    #[display(fmt = "EOF")]
    Eof,
    #[display(fmt = "ILLEGAL")]
    Illegal,

    // keywords
    #[display(fmt = "FUNCTION")]
    Function,
    #[display(fmt = "LET")]
    Let,
    #[display(fmt = "IF")]
    If,
    #[display(fmt = "ELSE")]
    Else,
    #[display(fmt = "RETURN")]
    Return,
    #[display(fmt = "TRUE")]
    True,
    #[display(fmt = "FALSE")]
    False,

    // symbols
    #[display(fmt = "LPAREN")]
    LeftParen,
    #[display(fmt = "RPAREN")]
    RightParen,
    #[display(fmt = "LBRACE")]
    LeftBrace,
    #[display(fmt = "RBRACE")]
    RightBrace,
    #[display(fmt = "COMMA")]
    Comma,
    #[display(fmt = "SEMICOLON")]
    Semicolon,
    #[display(fmt = "ASSIGN")]
    Assign,
    #[display(fmt = "NEGATION")]
    Negation,

    // binary operators
    #[display(fmt = "PLUS")]
    Plus,
    #[display(fmt = "MINUS")]
    Minus,
    #[display(fmt = "MULTIPLICATION")]
    Multiplication,
    #[display(fmt = "DIVISION")]
    Division,

    #[display(fmt = "LT")]
    Lesser,
    #[display(fmt = "LTE")]
    LesserEqual,
    #[display(fmt = "GT")]
    Greater,
    #[display(fmt = "GTE")]
    GreaterEqual,
    #[display(fmt = "EQ")]
    Equal,
    #[display(fmt = "DIF")]
    Different,
}

impl TokenKind {
    /// Keyword table. `variable` and `function` are accepted as spellings of
    /// `let` and `fn`.
    pub fn from_keyword_str(name: &str) -> Option<TokenKind> {
        match name {
            "let" | "variable" => Some(TokenKind::Let),
            "fn" | "function" => Some(TokenKind::Function),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "return" => Some(TokenKind::Return),
            "true" => Some(TokenKind::True),
            "false" => Some(TokenKind::False),
            _ => None,
        }
    }

    pub fn is_prefix_op(&self) -> bool {
        matches!(*self, Self::Minus | Self::Negation)
    }

    pub fn is_binary_op(&self) -> bool {
        matches!(
            *self,
            Self::Plus
                | Self::Minus
                | Self::Multiplication
                | Self::Division
                | Self::Lesser
                | Self::LesserEqual
                | Self::Greater
                | Self::GreaterEqual
                | Self::Equal
                | Self::Different
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            literal: literal.into(),
            span,
        }
    }

    pub fn error_at(&self, message: &str) -> Error {
        Error {
            span: self.span.clone(),
            message: message.into(),
        }
    }
}
