//! Graphviz DOT output
//!
//! One vertex per node, keyed by node identity so equal values stay distinct, and
//! one edge per parent → child relation.

use crate::expr::ast::{walk, Node, Visitor};

struct DotWriter {
    out: String,
}

impl Visitor for DotWriter {
    fn enter(&mut self, node: &Node, parent: Option<&Node>, _depth: usize) {
        self.out.push_str(&format!(
            "    {} [label=\"{}\"];\n",
            node.id(),
            node.value().replace('"', "\\\"")
        ));
        if let Some(parent) = parent {
            self.out
                .push_str(&format!("    {} -> {};\n", parent.id(), node.id()));
        }
    }
}

pub fn to_dot(root: &Node) -> String {
    let mut writer = DotWriter {
        out: String::from("digraph ast {\n"),
    };
    walk(root, &mut writer);
    writer.out.push_str("}\n");
    writer.out
}
