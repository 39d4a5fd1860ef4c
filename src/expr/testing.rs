//! Helpers shared by the unit tests
//!
//! Tests compare trees through their prefix form (`+(2, *(3, 4))`) and
//! derivations through their labels, so expected values read like the grammar.

use crate::expr::error::{AnalysisError, SyntaxError};
use crate::expr::lexer::tokenize;
use crate::expr::parser::{parse, parse_with, DerivationOrder, ParseOutput};

/// Tokenize and parse `source`, panicking with the error message on failure
pub fn parse_ok(source: &str) -> ParseOutput {
    let tokens = tokenize(source).unwrap_or_else(|e| panic!("{source:?}: {e}"));
    parse(&tokens).unwrap_or_else(|e| panic!("{source:?}: {e}"))
}

/// Like [`parse_ok`] with an explicit derivation order
pub fn parse_ok_with(source: &str, order: DerivationOrder) -> ParseOutput {
    let tokens = tokenize(source).unwrap_or_else(|e| panic!("{source:?}: {e}"));
    parse_with(&tokens, order).unwrap_or_else(|e| panic!("{source:?}: {e}"))
}

/// Tokenize `source` and return the syntax error its parse must produce
pub fn syntax_error(source: &str) -> SyntaxError {
    let tokens = tokenize(source).unwrap_or_else(|e| panic!("{source:?}: {e}"));
    match parse(&tokens) {
        Ok(output) => panic!("{source:?} parsed as {}", output.tree),
        Err(err) => err,
    }
}

/// Prefix form of the tree for `source`
pub fn tree_of(source: &str) -> String {
    parse_ok(source).tree.to_string()
}

/// Derivation labels for `source`
pub fn steps_of(source: &str) -> Vec<&'static str> {
    parse_ok(source).labels()
}

/// Assert that an analysis failed lexically
pub fn assert_lexical(err: &AnalysisError) {
    assert!(err.is_lexical(), "expected a lexical error, got {err}");
}
