//! One-call analysis: text to tokens, derivation steps and tree
//!
//! This is the read-only surface renderers consume. Every call works on private
//! state, so independent analyses can run on any number of threads.

use crate::expr::ast::Node;
use crate::expr::config::ExparseConfig;
use crate::expr::error::AnalysisError;
use crate::expr::lexer::{tokenize_with, Token};
use crate::expr::parser::{parse_with, Production};
use serde::Serialize;

/// Everything produced for one expression
#[derive(Debug, Serialize)]
pub struct Analysis {
    pub source: String,
    pub tokens: Vec<Token>,
    pub steps: Vec<Production>,
    pub tree: Node,
}

impl Analysis {
    pub fn token_pairs(&self) -> Vec<(&'static str, &str)> {
        self.tokens.iter().map(Token::pair).collect()
    }

    pub fn step_labels(&self) -> Vec<&'static str> {
        self.steps.iter().map(|p| p.label()).collect()
    }
}

/// Lex and parse `source`; the first error aborts the whole analysis
pub fn analyze(source: &str, config: &ExparseConfig) -> Result<Analysis, AnalysisError> {
    let tokens = tokenize_with(source, &config.lex_options())?;
    let output = parse_with(&tokens, config.parser.derivation_order)?;
    Ok(Analysis {
        source: source.to_string(),
        tokens,
        steps: output.steps,
        tree: output.tree,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::testing::assert_lexical;

    #[test]
    fn test_analyze_collects_all_outputs() {
        let analysis = analyze("2+3", &ExparseConfig::default()).unwrap();
        assert_eq!(
            analysis.token_pairs(),
            vec![("NUMBER", "2"), ("PLUS", "+"), ("NUMBER", "3"), ("EOF", "EOF")]
        );
        assert_eq!(analysis.step_labels().len(), 9);
        assert_eq!(analysis.tree.to_string(), "+(2, 3)");
    }

    #[test]
    fn test_lexical_failure_wins_over_syntax() {
        let err = analyze("2+@", &ExparseConfig::default()).unwrap_err();
        assert_lexical(&err);
        assert!(err.to_string().contains("'@'"));
    }

    #[test]
    fn test_syntax_failure() {
        let err = analyze("2+", &ExparseConfig::default()).unwrap_err();
        assert!(err.is_syntactic());
        assert!(err.to_string().contains("found EOF"));
    }

    #[test]
    fn test_whitespace_follows_config() {
        let mut config = ExparseConfig::default();
        assert_lexical(&analyze("1 + 2", &config).unwrap_err());

        config.lexer.skip_whitespace = true;
        let analysis = analyze("1 + 2", &config).unwrap();
        assert_eq!(analysis.tree.to_string(), "+(1, 2)");
    }

    #[test]
    fn test_failed_call_leaves_no_state_behind() {
        let config = ExparseConfig::default();
        assert!(analyze("(1", &config).is_err());
        assert_eq!(analyze("(1)", &config).unwrap().tree.to_string(), "1");
    }

    #[test]
    fn test_independent_analyses_in_parallel() {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let source = format!("{}*{}!", i, i + 1);
                    analyze(&source, &ExparseConfig::default())
                        .unwrap()
                        .tree
                        .to_string()
                })
            })
            .collect();
        let trees: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(trees[2], "*(2, !(3))");
    }
}
