//! Error types for lexing and parsing
//!
//! Both kinds abort the current call; nothing partial is returned.

use crate::expr::lexer::TokenKind;
use std::fmt;
use thiserror::Error;

/// No token pattern matched at `position`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexical error: unexpected character {character:?} at position {position}")]
pub struct LexError {
    /// Byte offset of the offending character
    pub position: usize,
    pub character: char,
}

/// What the grammar required where the parse failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A specific token, as in `( E )` needing its `)`
    Token(TokenKind),
    /// Anything that can start `F`: `(`, NUMBER, `sin` or `cos`
    Factor,
    /// A complete expression was parsed but input remains
    EndOfInput,
    /// A factor starting here would nest deeper than the parser allows
    NestingWithin(usize),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{}", kind),
            Expected::Factor => write!(f, "a factor (LPAREN, NUMBER, SIN or COS)"),
            Expected::EndOfInput => write!(f, "EOF"),
            Expected::NestingWithin(limit) => write!(f, "at most {} nested factors", limit),
        }
    }
}

/// The current token does not fit the production being applied
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Syntax error: expected {expected}, found {found}{} at position {position}",
    lexeme_suffix(.found, .lexeme)
)]
pub struct SyntaxError {
    pub expected: Expected,
    pub found: TokenKind,
    pub lexeme: String,
    /// Byte offset where the offending token starts
    pub position: usize,
}

fn lexeme_suffix(found: &TokenKind, lexeme: &str) -> String {
    match found {
        TokenKind::Eof => String::new(),
        _ => format!(" ('{}')", lexeme),
    }
}

/// Any failure of a single analysis call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl AnalysisError {
    pub fn is_lexical(&self) -> bool {
        matches!(self, AnalysisError::Lex(_))
    }

    pub fn is_syntactic(&self) -> bool {
        matches!(self, AnalysisError::Syntax(_))
    }
}
