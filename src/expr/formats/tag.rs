//! XML-like AST tag serialization
//!
//! Serializes the tree to an XML-like format that mirrors its structure.
//!
//! ## Format
//!
//! - Node type → tag name (`number`, `unary`, `binary`)
//! - Value (operator symbol or literal text) → text content
//! - Children → nested in a `<children>` tag
//!
//! ## Example
//!
//! ```text
//! <expression>
//!   <binary>+<children>
//!     <number>2</number>
//!     <number>3</number>
//!   </children></binary>
//! </expression>
//! ```

use crate::expr::ast::Node;

/// Serialize a tree to AST tag format
pub fn serialize_ast_tag(root: &Node) -> String {
    let mut result = String::new();
    result.push_str("<expression>\n");
    serialize_tree(root, &mut result);
    result.push_str("</expression>");
    result
}

enum Tag<'a> {
    Open(&'a Node, usize),
    Close(&'static str, usize),
}

fn serialize_tree(root: &Node, output: &mut String) {
    let mut pending = vec![Tag::Open(root, 1)];
    while let Some(tag) = pending.pop() {
        match tag {
            Tag::Open(node, level) => {
                let indent = "  ".repeat(level);
                let name = tag_name(node);
                let value = escape_xml(node.value());

                if node.is_leaf() {
                    output.push_str(&format!("{}<{}>{}</{}>\n", indent, name, value, name));
                    continue;
                }

                output.push_str(&format!("{}<{}>{}<children>\n", indent, name, value));
                pending.push(Tag::Close(name, level));
                for child in node.children().into_iter().rev() {
                    pending.push(Tag::Open(child, level + 1));
                }
            }
            Tag::Close(name, level) => {
                output.push_str(&format!("{}</children></{}>\n", "  ".repeat(level), name));
            }
        }
    }
}

fn tag_name(node: &Node) -> &'static str {
    match node.node_type() {
        "Number" => "number",
        "Unary" => "unary",
        _ => "binary",
    }
}

/// Escape XML special characters
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
