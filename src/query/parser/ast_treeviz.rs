//! Treeviz formatter for parsed queries

use crate::query::parser::ast::Node;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

/// Recurses once per nesting level; front ends check
/// [`MAX_AST_DEPTH`](crate::query::processor::MAX_AST_DEPTH) first.
pub fn to_treeviz_str(node: &Node) -> String {
    let mut result = String::new();
    append_node(&mut result, node, "", true);
    result
}

fn append_node(result: &mut String, node: &Node, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    let node_type = node.node_type();
    let display_label = truncate(&node.display_label(), 30);

    if display_label.is_empty() {
        result.push_str(&format!("{}{} {}\n", prefix, connector, node_type));
    } else {
        result.push_str(&format!(
            "{}{} {}: {}\n",
            prefix, connector, node_type, display_label
        ));
    }

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let children = node.children();
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        append_node(result, child, &new_prefix, is_last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::lexer::tokenize;
    use crate::query::parser::parse;
    use crate::query::Dialect;

    fn treeviz(source: &str) -> String {
        to_treeviz_str(&parse(&tokenize(source, Dialect::Fielded), Dialect::Fielded))
    }

    #[test]
    fn test_single_term() {
        assert_eq!(treeviz("gold"), "└─ Term: gold\n");
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(treeviz(""), "└─ Sequence: 0 items\n");
    }

    #[test]
    fn test_nested_query() {
        insta::assert_snapshot!(treeviz("type:denarius AND NOT (silver OR bronze) rome"), @r###"
        └─ Sequence: 3 items
          ├─ Term: type:denarius
          ├─ Operator: AND
          └─ Not
            └─ Sequence: 2 items
              ├─ Sequence: 3 items
              │ ├─ Term: silver
              │ ├─ Operator: OR
              │ └─ Term: bronze
              └─ Term: rome
        "###);
    }

    #[test]
    fn test_long_labels_truncated() {
        let label = "x".repeat(40);
        assert_eq!(treeviz(&label), format!("└─ Term: {}...\n", "x".repeat(30)));
    }
}
