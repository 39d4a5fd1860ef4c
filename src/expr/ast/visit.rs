//! Depth-first traversal for renderers

use super::node::Node;

/// Callbacks for a depth-first walk over a tree
///
/// `enter` runs before a node's children (pre-order), `leave` after them.
/// `depth` is 0 at the root.
pub trait Visitor {
    fn enter(&mut self, _node: &Node, _parent: Option<&Node>, _depth: usize) {}

    fn leave(&mut self, _node: &Node, _depth: usize) {}
}

enum Step<'a> {
    Enter(&'a Node, Option<&'a Node>, usize),
    Leave(&'a Node, usize),
}

/// Walk `root` depth-first, children left to right
pub fn walk<V: Visitor + ?Sized>(root: &Node, visitor: &mut V) {
    let mut pending = vec![Step::Enter(root, None, 0)];
    while let Some(step) = pending.pop() {
        match step {
            Step::Enter(node, parent, depth) => {
                visitor.enter(node, parent, depth);
                pending.push(Step::Leave(node, depth));
                for child in node.children().into_iter().rev() {
                    pending.push(Step::Enter(child, Some(node), depth + 1));
                }
            }
            Step::Leave(node, depth) => visitor.leave(node, depth),
        }
    }
}
