//! Implementation of the expression lexer
//!
//! Matching is handled entirely by logos; this module turns the raw stream into
//! [`Token`]s, stops at the first unmatched character and appends `EOF`.

use crate::expr::error::LexError;
use crate::expr::lexer::tokens::{RawToken, Token};
use logos::Logos;

/// Knobs that change what the lexer accepts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexOptions {
    /// Skip runs of whitespace instead of rejecting them
    pub skip_whitespace: bool,
}

/// Tokenize `source` with the reference behavior (whitespace is an error)
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    tokenize_with(source, &LexOptions::default())
}

/// Tokenize `source`, returning the token sequence terminated by exactly one `EOF`
pub fn tokenize_with(source: &str, options: &LexOptions) -> Result<Vec<Token>, LexError> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let kind = match result {
            Ok(raw) => raw.kind(),
            Err(()) => None,
        };

        match kind {
            Some(kind) => tokens.push(Token::new(kind, lexer.slice(), span)),
            None if result == Ok(RawToken::Whitespace) && options.skip_whitespace => continue,
            None => {
                // The unmatched character is always the first one of the failed span
                let character = lexer.slice().chars().next().unwrap_or_default();
                return Err(LexError {
                    position: span.start,
                    character,
                });
            }
        }
    }

    tokens.push(Token::eof(source.len()));
    log::debug!("tokenized {} bytes into {} tokens", source.len(), tokens.len());
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::lexer::tokens::TokenKind;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let tokens = tokenize("").unwrap();
        assert_eq!(tokens, vec![Token::eof(0)]);
    }

    #[test]
    fn test_simple_sum() {
        let tokens = tokenize("2+3").unwrap();
        let pairs: Vec<_> = tokens.iter().map(Token::pair).collect();
        assert_eq!(
            pairs,
            vec![("NUMBER", "2"), ("PLUS", "+"), ("NUMBER", "3"), ("EOF", "EOF")]
        );
    }

    #[test]
    fn test_spans_follow_the_source() {
        let tokens = tokenize("sin(1.5)").unwrap();
        let spans: Vec<_> = tokens.iter().map(|t| t.span.clone()).collect();
        assert_eq!(spans, vec![0..3, 3..4, 4..7, 7..8, 8..8]);
    }

    #[test]
    fn test_every_kind() {
        use TokenKind::*;
        assert_eq!(
            kinds("1+2-3*4/5^6!sincos()"),
            vec![
                Number, Plus, Number, Minus, Number, Multiply, Number, Divide, Number, Caret,
                Number, Factorial, Sin, Cos, LParen, RParen, Eof
            ]
        );
    }

    #[test]
    fn test_unknown_character() {
        let err = tokenize("2@3").unwrap_err();
        assert_eq!(err.position, 1);
        assert_eq!(err.character, '@');
    }

    #[test]
    fn test_whitespace_rejected_by_default() {
        let err = tokenize("2 + 3").unwrap_err();
        assert_eq!(err.position, 1);
        assert_eq!(err.character, ' ');
    }

    #[test]
    fn test_whitespace_skipped_when_enabled() {
        let options = LexOptions {
            skip_whitespace: true,
        };
        let tokens = tokenize_with(" 2 +\t3 ", &options).unwrap();
        let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["2", "+", "3", "EOF"]);
        assert_eq!(tokens[1].span, 3..4);
        assert_eq!(tokens[3].span, 7..7);
    }

    #[test]
    fn test_partial_function_name() {
        let err = tokenize("si2").unwrap_err();
        assert_eq!(err.position, 0);
        assert_eq!(err.character, 's');
    }

    #[test]
    fn test_number_then_dot() {
        let err = tokenize("3.x").unwrap_err();
        assert_eq!(err.position, 1);
        assert_eq!(err.character, '.');
    }
}
