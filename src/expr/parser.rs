//! Recursive-descent parser for arithmetic expressions
//!
//! Grammar (left recursion removed from `E` and `T`):
//!
//!     E   -> T E'
//!     E'  -> + T E' | - T E' | ε
//!     T   -> F T'
//!     T'  -> * F T' | / F T' | ε
//!     F   -> ( E ) | NUMBER | sin F | cos F | F ^ F | F !
//!
//! `F -> F ^ F` and `F -> F !` never start with their own operator. The parser
//! first builds a factor from its leading token, then looks at the next token:
//! every `!` wraps the factor built so far, and a `^` takes one complete factor
//! as its right operand and ends the factor. So `5!!` is `!(!(5))` and `2^3^4`
//! is `^(2, ^(3, 4))`.
//!
//! Each production applied is recorded in a [`Derivation`] log.
//!
//! Factors nested inside one another (through parentheses, `sin`, `cos` or the
//! right operand of `^`) recurse, so their depth is capped at [`MAX_NESTING`];
//! deeper input is a syntax error. Operator chains like `1+1+...` and `5!!!`
//! loop instead and have no limit.

pub mod derivation;
#[allow(clippy::module_inception)]
pub mod parser;


pub use derivation::{Derivation, DerivationOrder, Production};
pub use parser::{ParseOutput, Parser, MAX_NESTING};

use crate::expr::error::SyntaxError;
use crate::expr::lexer::Token;

/// Parse a token sequence with the default (leftmost) derivation order
pub fn parse(tokens: &[Token]) -> Result<ParseOutput, SyntaxError> {
    Parser::new(tokens).parse()
}

/// Parse a token sequence recording steps in `order`
pub fn parse_with(tokens: &[Token], order: DerivationOrder) -> Result<ParseOutput, SyntaxError> {
    Parser::with_order(tokens, order).parse()
}
