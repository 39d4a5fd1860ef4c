//! The recursive-descent engine
//!
//! One method per non-terminal. `E'` and `T'` are tail-recursive in the grammar
//! and run as loops here; each iteration records the production it applies and
//! extends a left-leaning chain of binary nodes.

use crate::expr::ast::{BinaryOp, Node, UnaryOp};
use crate::expr::error::{Expected, SyntaxError};
use crate::expr::lexer::{Token, TokenKind};
use crate::expr::parser::derivation::{Derivation, DerivationOrder, Production};

/// Deepest chain of factors nested inside one another through `( E )`, `sin F`,
/// `cos F` or the right operand of `^`
pub const MAX_NESTING: usize = 128;

/// Result of a completed parse: the tree root and the derivation log
#[derive(Debug)]
pub struct ParseOutput {
    pub tree: Node,
    pub steps: Vec<Production>,
}

impl ParseOutput {
    pub fn labels(&self) -> Vec<&'static str> {
        self.steps.iter().map(|p| p.label()).collect()
    }
}

/// Parser state for a single parse of one token sequence
pub struct Parser<'t> {
    tokens: &'t [Token],
    index: usize,
    // Stands in for a missing terminal token so `current` never fails
    eof: Token,
    derivation: Derivation,
    // Factors currently being parsed, outermost included
    nesting: usize,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Parser::with_order(tokens, DerivationOrder::default())
    }

    pub fn with_order(tokens: &'t [Token], order: DerivationOrder) -> Self {
        let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
        Parser {
            tokens,
            index: 0,
            eof: Token::eof(end),
            derivation: Derivation::new(order),
            nesting: 0,
        }
    }

    /// Parse one `E` and require `EOF` after it
    pub fn parse(mut self) -> Result<ParseOutput, SyntaxError> {
        let tree = self.parse_expr()?;
        if !self.current().is_eof() {
            return Err(self.error(Expected::EndOfInput));
        }
        log::debug!(
            "parsed {} tokens into {} nodes with {} derivation steps",
            self.tokens.len(),
            tree.size(),
            self.derivation.mark()
        );
        Ok(ParseOutput {
            tree,
            steps: self.derivation.into_steps(),
        })
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.index).unwrap_or(&self.eof)
    }

    fn advance(&mut self) {
        if self.index < self.tokens.len() {
            self.index += 1;
        }
    }

    /// Consume the current token if it is `kind` and return its lexeme
    fn expect(&mut self, kind: TokenKind) -> Result<String, SyntaxError> {
        let token = self.current();
        if token.kind != kind {
            return Err(self.error(Expected::Token(kind)));
        }
        let lexeme = token.lexeme.clone();
        self.advance();
        Ok(lexeme)
    }

    fn error(&self, expected: Expected) -> SyntaxError {
        let token = self.current();
        SyntaxError {
            expected,
            found: token.kind,
            lexeme: token.lexeme.clone(),
            position: token.span.start,
        }
    }

    /// E -> T E'
    fn parse_expr(&mut self) -> Result<Node, SyntaxError> {
        self.derivation.record(Production::Expr);
        let mut left = self.parse_term()?;

        // E' -> + T E' | - T E' | ε
        loop {
            let (op, production, kind) = match self.current().kind {
                TokenKind::Plus => (BinaryOp::Add, Production::ExprAdd, TokenKind::Plus),
                TokenKind::Minus => (
                    BinaryOp::Subtract,
                    Production::ExprSubtract,
                    TokenKind::Minus,
                ),
                TokenKind::Number
                | TokenKind::Multiply
                | TokenKind::Divide
                | TokenKind::Caret
                | TokenKind::Factorial
                | TokenKind::Sin
                | TokenKind::Cos
                | TokenKind::LParen
                | TokenKind::RParen
                | TokenKind::Eof => {
                    self.derivation.record(Production::ExprEmpty);
                    return Ok(left);
                }
            };
            self.derivation.record(production);
            self.expect(kind)?;
            let right = self.parse_term()?;
            left = Node::binary(op, left, right);
        }
    }

    /// T -> F T'
    fn parse_term(&mut self) -> Result<Node, SyntaxError> {
        self.derivation.record(Production::Term);
        let mut left = self.parse_factor()?;

        // T' -> * F T' | / F T' | ε
        loop {
            let (op, production, kind) = match self.current().kind {
                TokenKind::Multiply => (
                    BinaryOp::Multiply,
                    Production::TermMultiply,
                    TokenKind::Multiply,
                ),
                TokenKind::Divide => (BinaryOp::Divide, Production::TermDivide, TokenKind::Divide),
                TokenKind::Number
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Caret
                | TokenKind::Factorial
                | TokenKind::Sin
                | TokenKind::Cos
                | TokenKind::LParen
                | TokenKind::RParen
                | TokenKind::Eof => {
                    self.derivation.record(Production::TermEmpty);
                    return Ok(left);
                }
            };
            self.derivation.record(production);
            self.expect(kind)?;
            let right = self.parse_factor()?;
            left = Node::binary(op, left, right);
        }
    }

    /// F -> ( E ) | NUMBER | sin F | cos F | F ^ F | F !
    fn parse_factor(&mut self) -> Result<Node, SyntaxError> {
        if self.nesting == MAX_NESTING {
            log::debug!("factor nesting limit reached at {}", self.current().span.start);
            return Err(self.error(Expected::NestingWithin(MAX_NESTING)));
        }
        self.nesting += 1;
        let result = self.parse_nested_factor();
        self.nesting -= 1;
        result
    }

    fn parse_nested_factor(&mut self) -> Result<Node, SyntaxError> {
        let mark = self.derivation.mark();
        let mut node = self.parse_leading_factor()?;
        // Wraps applied to this factor so far, innermost first
        let mut wraps = Vec::new();

        loop {
            match self.current().kind {
                TokenKind::Factorial => {
                    wraps.push(Production::FactorFactorial);
                    self.expect(TokenKind::Factorial)?;
                    node = Node::unary(UnaryOp::Factorial, node);
                }
                TokenKind::Caret => {
                    wraps.push(Production::FactorPower);
                    self.derivation.record_wraps(mark, &wraps);
                    self.expect(TokenKind::Caret)?;
                    let right = self.parse_factor()?;
                    return Ok(Node::binary(BinaryOp::Power, node, right));
                }
                TokenKind::Number
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Multiply
                | TokenKind::Divide
                | TokenKind::Sin
                | TokenKind::Cos
                | TokenKind::LParen
                | TokenKind::RParen
                | TokenKind::Eof => {
                    self.derivation.record_wraps(mark, &wraps);
                    return Ok(node);
                }
            }
        }
    }

    /// The alternatives of `F` selected by their first token
    fn parse_leading_factor(&mut self) -> Result<Node, SyntaxError> {
        match self.current().kind {
            TokenKind::LParen => {
                self.derivation.record(Production::FactorParen);
                self.expect(TokenKind::LParen)?;
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Number => {
                self.derivation.record(Production::FactorNumber);
                let text = self.expect(TokenKind::Number)?;
                Ok(Node::literal(text))
            }
            TokenKind::Sin => {
                self.derivation.record(Production::FactorSin);
                self.expect(TokenKind::Sin)?;
                let operand = self.parse_factor()?;
                Ok(Node::unary(UnaryOp::Sin, operand))
            }
            TokenKind::Cos => {
                self.derivation.record(Production::FactorCos);
                self.expect(TokenKind::Cos)?;
                let operand = self.parse_factor()?;
                Ok(Node::unary(UnaryOp::Cos, operand))
            }
            // `^` and `!` only follow a factor; they never start one
            TokenKind::Caret
            | TokenKind::Factorial
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Multiply
            | TokenKind::Divide
            | TokenKind::RParen
            | TokenKind::Eof => Err(self.error(Expected::Factor)),
        }
    }
}
