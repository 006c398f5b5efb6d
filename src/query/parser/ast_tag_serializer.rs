//! XML-like AST tag serialization
//!
//! Serializes a parsed query to an XML-like format that directly reflects the
//! tree, useful for seeing how a query was grouped.
//!
//! ## Format
//!
//! - Node type → tag name
//! - Term value / operator → text content
//! - Term field → `field` attribute
//! - Children → nested tags
//!
//! ## Example
//!
//! ```text
//! <query>
//!   <sequence>
//!     <term field="type">denarius</term>
//!     <operator>AND</operator>
//!     <not>
//!       <term>silver</term>
//!     </not>
//!   </sequence>
//! </query>
//! ```

use crate::query::parser::ast::Node;

/// Serialize a parsed query to AST tag format.
///
/// Recurses once per nesting level; front ends check
/// [`MAX_AST_DEPTH`](crate::query::processor::MAX_AST_DEPTH) first.
pub fn serialize_node(node: &Node) -> String {
    let mut result = String::new();
    result.push_str("<query>\n");
    serialize_item(node, 1, &mut result);
    result.push_str("</query>");
    result
}

fn serialize_item(node: &Node, indent_level: usize, output: &mut String) {
    let indent = "  ".repeat(indent_level);

    match node {
        Node::Term(term) => match &term.field {
            Some(field) => output.push_str(&format!(
                "{}<term field=\"{}\">{}</term>\n",
                indent,
                escape_xml(field),
                escape_xml(&term.value)
            )),
            None => output.push_str(&format!(
                "{}<term>{}</term>\n",
                indent,
                escape_xml(&term.value)
            )),
        },
        Node::Operator(op) => {
            output.push_str(&format!("{}<operator>{}</operator>\n", indent, op.as_str()));
        }
        Node::Not(child) => {
            output.push_str(&format!("{}<not>\n", indent));
            serialize_item(child, indent_level + 1, output);
            output.push_str(&format!("{}</not>\n", indent));
        }
        Node::Sequence(items) if items.is_empty() => {
            output.push_str(&format!("{}<sequence></sequence>\n", indent));
        }
        Node::Sequence(items) => {
            output.push_str(&format!("{}<sequence>\n", indent));
            for item in items {
                serialize_item(item, indent_level + 1, output);
            }
            output.push_str(&format!("{}</sequence>\n", indent));
        }
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
