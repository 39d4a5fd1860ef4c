//! Tree node types

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(0);

/// Minimum stack space to reserve before serializing a child (32 KB).
const MIN_STACK_RED_ZONE: usize = 32 * 1024;

/// Stack size to grow to when running low (1 MB).
const STACK_GROWTH_SIZE: usize = 1024 * 1024;

/// Identity of a node, unique for the lifetime of the process
///
/// Two nodes with the same value (say, two `2` literals) still get different ids,
/// so a renderer can map every node to its own vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Operators taking a single operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Sin,
    Cos,
    Factorial,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Sin => "sin",
            UnaryOp::Cos => "cos",
            UnaryOp::Factorial => "!",
        }
    }
}

/// Operators taking a left and a right operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Power => "^",
        }
    }
}

#[derive(Debug)]
pub enum NodeKind {
    /// Numeric literal, kept in its source form
    Literal(String),
    Unary {
        op: UnaryOp,
        operand: Box<Node>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// A node of the expression tree
///
/// Not `Clone`: every node in a tree carries its own id.
///
/// Trees can be far deeper than the call stack allows (`1+1+...+1` leans left
/// one level per operator), so every walk over a tree uses an explicit stack.
pub struct Node {
    id: NodeId,
    kind: NodeKind,
}

impl Node {
    fn with_kind(kind: NodeKind) -> Self {
        Node {
            id: NodeId::next(),
            kind,
        }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Node::with_kind(NodeKind::Literal(text.into()))
    }

    pub fn unary(op: UnaryOp, operand: Node) -> Self {
        Node::with_kind(NodeKind::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    pub fn binary(op: BinaryOp, left: Node, right: Node) -> Self {
        Node::with_kind(NodeKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Operator symbol, or the literal's text
    pub fn value(&self) -> &str {
        match &self.kind {
            NodeKind::Literal(text) => text,
            NodeKind::Unary { op, .. } => op.symbol(),
            NodeKind::Binary { op, .. } => op.symbol(),
        }
    }

    /// Children in order: none, the operand, or left then right
    pub fn children(&self) -> Vec<&Node> {
        match &self.kind {
            NodeKind::Literal(_) => Vec::new(),
            NodeKind::Unary { operand, .. } => vec![operand.as_ref()],
            NodeKind::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
        }
    }

    pub fn arity(&self) -> usize {
        match &self.kind {
            NodeKind::Literal(_) => 0,
            NodeKind::Unary { .. } => 1,
            NodeKind::Binary { .. } => 2,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.arity() == 0
    }

    /// Short type name used by the tree formatters
    pub fn node_type(&self) -> &'static str {
        match &self.kind {
            NodeKind::Literal(_) => "Number",
            NodeKind::Unary { .. } => "Unary",
            NodeKind::Binary { .. } => "Binary",
        }
    }

    /// Structural equality: same values in the same shape, identity ignored
    pub fn shape_eq(&self, other: &Node) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            let same = match (&a.kind, &b.kind) {
                (NodeKind::Literal(x), NodeKind::Literal(y)) => x == y,
                (NodeKind::Unary { op: x, .. }, NodeKind::Unary { op: y, .. }) => x == y,
                (NodeKind::Binary { op: x, .. }, NodeKind::Binary { op: y, .. }) => x == y,
                _ => false,
            };
            if !same {
                return false;
            }
            pending.extend(a.children().into_iter().zip(b.children()));
        }
        true
    }

    /// Number of nodes in this subtree
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children());
        }
        count
    }

    /// Height of this subtree; a leaf has depth 1
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            pending.extend(node.children().into_iter().map(|child| (child, depth + 1)));
        }
        deepest
    }

    /// Move the boxed children out, leaving this node an empty literal
    fn detach_children(&mut self, into: &mut Vec<Box<Node>>) {
        if self.is_leaf() {
            return;
        }
        match std::mem::replace(&mut self.kind, NodeKind::Literal(String::new())) {
            NodeKind::Literal(_) => {}
            NodeKind::Unary { operand, .. } => into.push(operand),
            NodeKind::Binary { left, right, .. } => {
                into.push(left);
                into.push(right);
            }
        }
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        // Each popped box has no children left when it goes out of scope
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

enum Piece<'a> {
    Node(&'a Node),
    Text(&'static str),
}

/// Prefix form: `+(2, *(3, 4))`, `sin(2)`, `!(5)`
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = vec![Piece::Node(self)];
        while let Some(piece) = pending.pop() {
            let node = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Node(node) => node,
            };
            match &node.kind {
                NodeKind::Literal(text) => f.write_str(text)?,
                NodeKind::Unary { op, operand } => {
                    write!(f, "{}(", op.symbol())?;
                    pending.push(Piece::Text(")"));
                    pending.push(Piece::Node(operand));
                }
                NodeKind::Binary { op, left, right } => {
                    write!(f, "{}(", op.symbol())?;
                    pending.push(Piece::Text(")"));
                    pending.push(Piece::Node(right));
                    pending.push(Piece::Text(", "));
                    pending.push(Piece::Node(left));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({}: {})", self.id, self)
    }
}

/// Serialized as `{"id", "value", "children"}` so renderers never see the Rust enum
impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        stacker::maybe_grow(MIN_STACK_RED_ZONE, STACK_GROWTH_SIZE, || {
            let mut state = serializer.serialize_struct("Node", 3)?;
            state.serialize_field("id", &self.id.as_u64())?;
            state.serialize_field("value", self.value())?;
            state.serialize_field("children", &self.children())?;
            state.end()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::binary(
            BinaryOp::Add,
            Node::literal("2"),
            Node::binary(BinaryOp::Multiply, Node::literal("3"), Node::literal("4")),
        )
    }

    #[test]
    fn test_value_and_children() {
        let tree = sample();
        assert_eq!(tree.value(), "+");
        let children = tree.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].value(), "2");
        assert_eq!(children[1].value(), "*");
        assert!(children[0].is_leaf());
    }

    #[test]
    fn test_display_prefix_form() {
        assert_eq!(sample().to_string(), "+(2, *(3, 4))");
        let fact = Node::unary(UnaryOp::Factorial, Node::literal("5"));
        assert_eq!(fact.to_string(), "!(5)");
    }

    #[test]
    fn test_identity_differs_for_equal_values() {
        let a = Node::literal("2");
        let b = Node::literal("2");
        assert_ne!(a.id(), b.id());
        assert!(a.shape_eq(&b));
    }

    #[test]
    fn test_shape_eq_detects_differences() {
        let sin = Node::unary(UnaryOp::Sin, Node::literal("1"));
        let cos = Node::unary(UnaryOp::Cos, Node::literal("1"));
        assert!(!sin.shape_eq(&cos));
        assert!(!sample().shape_eq(&sin));
        assert!(sample().shape_eq(&sample()));
    }

    #[test]
    fn test_size_and_depth() {
        let tree = sample();
        assert_eq!(tree.size(), 5);
        assert_eq!(tree.depth(), 3);
        assert_eq!(Node::literal("1").depth(), 1);
    }

    #[test]
    fn test_serialize_shape() {
        let tree = Node::unary(UnaryOp::Cos, Node::literal("0"));
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["value"], "cos");
        assert_eq!(json["children"][0]["value"], "0");
        assert_eq!(json["children"][0]["children"].as_array().unwrap().len(), 0);
        assert_eq!(json["id"], tree.id().as_u64());
    }

    fn factorial_chain(length: usize) -> Node {
        let mut tree = Node::literal("1");
        for _ in 0..length {
            tree = Node::unary(UnaryOp::Factorial, tree);
        }
        tree
    }

    fn left_sum_chain(terms: usize) -> Node {
        let mut tree = Node::literal("1");
        for _ in 1..terms {
            tree = Node::binary(BinaryOp::Add, tree, Node::literal("1"));
        }
        tree
    }

    #[test]
    fn test_deep_trees_drop_and_measure() {
        let tree = left_sum_chain(200_000);
        assert_eq!(tree.size(), 399_999);
        assert_eq!(tree.depth(), 200_000);
        drop(tree);

        let tree = factorial_chain(200_000);
        assert_eq!(tree.depth(), 200_001);
        assert!(tree.shape_eq(&factorial_chain(200_000)));
        assert!(!tree.shape_eq(&factorial_chain(199_999)));
    }

    #[test]
    fn test_deep_tree_display() {
        let text = left_sum_chain(100_000).to_string();
        assert!(text.starts_with(&format!("{}1, 1), 1)", "+(".repeat(99_999))));
        assert!(text.ends_with("), 1), 1)"));
        assert_eq!(text.matches('+').count(), 99_999);

        let debug = format!("{:?}", factorial_chain(3));
        assert!(debug.ends_with(": !(!(!(1))))"));
    }

    #[test]
    fn test_deep_tree_serializes() {
        let tree = factorial_chain(50_000);
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json.matches("\"value\":\"!\"").count(), 50_000);
        assert!(json.ends_with(&"]}".repeat(50_001)));
    }
}
