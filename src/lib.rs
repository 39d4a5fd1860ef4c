//! # exparse
//!
//! A lexer and recursive-descent parser for arithmetic expressions
//! (`+ - * / ^ !`, `sin`, `cos`, parentheses) that records the grammar
//! productions applied while building the tree.
//!
//! ## Testing
//!
//! Grammar behavior is pinned by the integration tests under `tests/`. Unit tests
//! share the helpers in `expr::testing`.

pub mod expr;

pub use expr::analysis::{analyze, Analysis};
pub use expr::ast::{Node, NodeId};
pub use expr::config::ExparseConfig;
pub use expr::error::{AnalysisError, LexError, SyntaxError};
pub use expr::lexer::{tokenize, Token, TokenKind};
pub use expr::parser::{parse, Parser};
