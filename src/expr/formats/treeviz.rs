//! Treeviz formatter for expression trees

use crate::expr::ast::Node;

const DEFAULT_LABEL_WIDTH: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(root: &Node) -> String {
    to_treeviz_str_with_width(root, DEFAULT_LABEL_WIDTH)
}

/// Render with node labels cut to `label_width` characters
pub fn to_treeviz_str_with_width(root: &Node, label_width: usize) -> String {
    let mut result = String::new();
    let mut pending = vec![(root, String::new(), true)];

    while let Some((node, prefix, is_last)) = pending.pop() {
        let connector = if is_last { "└─" } else { "├─" };
        result.push_str(&format!(
            "{}{} {}: {}\n",
            prefix,
            connector,
            node.node_type(),
            truncate(node.value(), label_width)
        ));

        let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        let children = node.children();
        let last = children.len().saturating_sub(1);
        for (i, child) in children.into_iter().enumerate().rev() {
            pending.push((child, child_prefix.clone(), i == last));
        }
    }
    result
}
