//! Abstract syntax tree for arithmetic expressions
//!
//! Nodes own their children exclusively and are immutable once built. Arity is
//! part of the type: literals have no children, `sin`/`cos`/`!` have one, and the
//! binary operators have two.

pub mod node;
pub mod visit;

pub use node::{BinaryOp, Node, NodeId, NodeKind, UnaryOp};
pub use visit::{walk, Visitor};
