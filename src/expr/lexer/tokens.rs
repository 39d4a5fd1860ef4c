//! Token definitions for arithmetic expressions
//!
//! [`RawToken`] is the logos pattern table. [`TokenKind`] is the closed set of
//! kinds the parser dispatches on, including the synthetic `EOF` that logos never
//! produces.

use logos::{Lexer, Logos};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Tokens recognized by the logos lexer
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum RawToken {
    // Digits, optionally followed by `.` and more digits (the fraction is only
    // taken when at least one digit follows the dot)
    #[regex(r"[0-9]+", number_fraction)]
    Number,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Multiply,
    #[token("/")]
    Divide,
    #[token("^")]
    Caret,
    #[token("!")]
    Factorial,
    #[token("sin")]
    Sin,
    #[token("cos")]
    Cos,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    // Not part of the grammar; kept so the lexer can skip or reject it
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,
}

/// Extends an integer match with `.digits` when the dot is followed by a digit.
fn number_fraction(lex: &mut Lexer<RawToken>) {
    let rest = lex.remainder().as_bytes();
    if rest.len() >= 2 && rest[0] == b'.' && rest[1].is_ascii_digit() {
        let digits = rest[1..].iter().take_while(|b| b.is_ascii_digit()).count();
        lex.bump(1 + digits);
    }
}

impl RawToken {
    /// The grammar kind of this raw token, or `None` for whitespace
    pub fn kind(self) -> Option<TokenKind> {
        let kind = match self {
            RawToken::Number => TokenKind::Number,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Multiply => TokenKind::Multiply,
            RawToken::Divide => TokenKind::Divide,
            RawToken::Caret => TokenKind::Caret,
            RawToken::Factorial => TokenKind::Factorial,
            RawToken::Sin => TokenKind::Sin,
            RawToken::Cos => TokenKind::Cos,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::Whitespace => return None,
        };
        Some(kind)
    }
}

/// Every kind of token the parser can see
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Number,
    Plus,
    Minus,
    Multiply,
    Divide,
    Caret,
    Factorial,
    Sin,
    Cos,
    #[serde(rename = "LPAREN")]
    LParen,
    #[serde(rename = "RPAREN")]
    RParen,
    Eof,
}

impl TokenKind {
    /// Upper-case name used in token listings and error messages
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Number => "NUMBER",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Caret => "CARET",
            TokenKind::Factorial => "FACTORIAL",
            TokenKind::Sin => "SIN",
            TokenKind::Cos => "COS",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified fragment of the source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact matched text; `"EOF"` for the terminal token
    pub lexeme: String,
    /// Byte range in the source; empty at the end of input for `EOF`
    pub span: Range<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Range<usize>) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// The terminal token for a source of `len` bytes
    pub fn eof(len: usize) -> Self {
        Token::new(TokenKind::Eof, "EOF", len..len)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// The `(kind, lexeme)` pair handed to renderers
    pub fn pair(&self) -> (&'static str, &str) {
        (self.kind.name(), &self.lexeme)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "<EOF>"),
            kind => write!(f, "<{}:{}>", kind, self.lexeme),
        }
    }
}
