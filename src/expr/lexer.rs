//! Lexer module for arithmetic expressions
//!
//! Tokenization happens in two layers:
//!
//!     Raw Tokens:
//!         Produced by the logos lexer from the fixed pattern table. Whitespace is
//!         recognized here only so that it can be reported (or skipped) precisely.
//!
//!     Tokens:
//!         What the parser consumes: a [`TokenKind`], the exact lexeme and its byte
//!         span. The stream always ends with exactly one `EOF` token.
//!
//! Patterns are tried in a fixed priority order (NUMBER, PLUS, MINUS, MULTIPLY,
//! DIVIDE, CARET, FACTORIAL, SIN, COS, LPAREN, RPAREN). No two patterns can start
//! with the same character, so the first match and the longest match coincide.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::{tokenize, tokenize_with, LexOptions};
pub use tokens::{RawToken, Token, TokenKind};
