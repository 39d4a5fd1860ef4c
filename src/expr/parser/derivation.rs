//! Derivation steps: the grammar productions applied during a parse

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// One production of the expression grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    Expr,
    ExprAdd,
    ExprSubtract,
    ExprEmpty,
    Term,
    TermMultiply,
    TermDivide,
    TermEmpty,
    FactorParen,
    FactorNumber,
    FactorSin,
    FactorCos,
    FactorPower,
    FactorFactorial,
}

impl Production {
    pub const ALL: [Production; 14] = [
        Production::Expr,
        Production::ExprAdd,
        Production::ExprSubtract,
        Production::ExprEmpty,
        Production::Term,
        Production::TermMultiply,
        Production::TermDivide,
        Production::TermEmpty,
        Production::FactorParen,
        Production::FactorNumber,
        Production::FactorSin,
        Production::FactorCos,
        Production::FactorPower,
        Production::FactorFactorial,
    ];

    /// Human-readable rule, e.g. `E -> T E'`
    pub fn label(self) -> &'static str {
        match self {
            Production::Expr => "E -> T E'",
            Production::ExprAdd => "E' -> + T E'",
            Production::ExprSubtract => "E' -> - T E'",
            Production::ExprEmpty => "E' -> ε",
            Production::Term => "T -> F T'",
            Production::TermMultiply => "T' -> * F T'",
            Production::TermDivide => "T' -> / F T'",
            Production::TermEmpty => "T' -> ε",
            Production::FactorParen => "F -> ( E )",
            Production::FactorNumber => "F -> NUMBER",
            Production::FactorSin => "F -> sin F",
            Production::FactorCos => "F -> cos F",
            Production::FactorPower => "F -> F ^ F",
            Production::FactorFactorial => "F -> F !",
        }
    }

    /// The non-terminal on the left-hand side
    pub fn head(self) -> &'static str {
        match self {
            Production::Expr => "E",
            Production::ExprAdd | Production::ExprSubtract | Production::ExprEmpty => "E'",
            Production::Term => "T",
            Production::TermMultiply | Production::TermDivide | Production::TermEmpty => "T'",
            Production::FactorParen
            | Production::FactorNumber
            | Production::FactorSin
            | Production::FactorCos
            | Production::FactorPower
            | Production::FactorFactorial => "F",
        }
    }

    /// Right-hand side symbols, terminals spelled as token kind names
    pub fn body(self) -> &'static [&'static str] {
        match self {
            Production::Expr => &["T", "E'"],
            Production::ExprAdd => &["PLUS", "T", "E'"],
            Production::ExprSubtract => &["MINUS", "T", "E'"],
            Production::Term => &["F", "T'"],
            Production::TermMultiply => &["MULTIPLY", "F", "T'"],
            Production::TermDivide => &["DIVIDE", "F", "T'"],
            Production::ExprEmpty | Production::TermEmpty => &[],
            Production::FactorParen => &["LPAREN", "E", "RPAREN"],
            Production::FactorNumber => &["NUMBER"],
            Production::FactorSin => &["SIN", "F"],
            Production::FactorCos => &["COS", "F"],
            Production::FactorPower => &["F", "CARET", "F"],
            Production::FactorFactorial => &["F", "FACTORIAL"],
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Production {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Where wrap productions (`F -> F ^ F`, `F -> F !`) land in the log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DerivationOrder {
    /// Before the steps of the operand they wrap, giving a leftmost derivation
    #[default]
    Leftmost,
    /// Appended when the parser sees the operator
    Decision,
}

/// Ordered log of applied productions
///
/// Entries are never removed or reordered once placed. In leftmost order a wrap
/// production is spliced in at the mark taken when its factor began.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Derivation {
    steps: Vec<Production>,
    order: DerivationOrder,
}

impl Derivation {
    pub fn new(order: DerivationOrder) -> Self {
        Derivation {
            steps: Vec::new(),
            order,
        }
    }

    /// Position at which a factor's steps begin
    pub fn mark(&self) -> usize {
        self.steps.len()
    }

    pub fn record(&mut self, production: Production) {
        log::trace!("apply {}", production);
        self.steps.push(production);
    }

    /// Record the productions that wrapped the factor begun at `mark`, innermost
    /// first
    ///
    /// In leftmost order they land at `mark` outermost first, in one splice per
    /// factor.
    pub fn record_wraps(&mut self, mark: usize, wraps: &[Production]) {
        if wraps.is_empty() {
            return;
        }
        for production in wraps {
            log::trace!("apply {} (wrapping step {})", production, mark);
        }
        match self.order {
            DerivationOrder::Leftmost => {
                let operand = self.steps.split_off(mark.min(self.steps.len()));
                self.steps.extend(wraps.iter().rev());
                self.steps.extend(operand);
            }
            DerivationOrder::Decision => self.steps.extend_from_slice(wraps),
        }
    }

    pub fn into_steps(self) -> Vec<Production> {
        self.steps
    }
}
