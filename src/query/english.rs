//! English rendering of parsed queries
//!
//! Rules, tried in order for each node:
//!
//! 1. Sequence: markers become `and`/`or`, everything else renders by
//!    these same rules; parts are joined with single spaces and wrapped in
//!    parentheses only when the sequence itself holds a marker.
//! 2. Not: `excluding ` followed by the child.
//! 3. Fielded term: `<label> "<value>"`, the label coming from the resolver.
//! 4. Bare term: `"<value>"`.
//! 5. Anything else (a marker outside a sequence, an empty value): nothing.
//!
//! Values are quoted as-is. The tokenizer never lets a `"` into a word, so no
//! escaping is needed.

use crate::query::fields::FieldResolver;
use crate::query::parser::ast::{Node, Operator, Term};

/// A pending piece of output
enum Piece<'a> {
    Node(&'a Node),
    Text(&'static str),
}

/// Render a node, walking the tree with an explicit stack of pending pieces.
pub fn to_english(node: &Node, fields: &dyn FieldResolver) -> String {
    let mut out = String::new();
    let mut pending = vec![Piece::Node(node)];

    while let Some(piece) = pending.pop() {
        match piece {
            Piece::Text(text) => out.push_str(text),
            Piece::Node(sequence @ Node::Sequence(items)) => {
                let wrap = sequence.has_operator();
                if wrap {
                    pending.push(Piece::Text(")"));
                }
                for (i, item) in items.iter().enumerate().rev() {
                    pending.push(match item {
                        Node::Operator(Operator::And) => Piece::Text("and"),
                        Node::Operator(Operator::Or) => Piece::Text("or"),
                        other => Piece::Node(other),
                    });
                    if i > 0 {
                        pending.push(Piece::Text(" "));
                    }
                }
                if wrap {
                    pending.push(Piece::Text("("));
                }
            }
            Piece::Node(Node::Not(child)) => {
                pending.push(Piece::Node(child));
                pending.push(Piece::Text("excluding "));
            }
            Piece::Node(Node::Term(term)) => push_term(&mut out, term, fields),
            Piece::Node(Node::Operator(_)) => {}
        }
    }

    out
}

fn push_term(out: &mut String, term: &Term, fields: &dyn FieldResolver) {
    if term.value.is_empty() {
        return;
    }
    if let Some(field) = term.field.as_deref().filter(|field| !field.is_empty()) {
        out.push_str(fields.label(field));
        out.push(' ');
    }
    out.push('"');
    out.push_str(&term.value);
    out.push('"');
}

/// Remove one outer pair of parentheses left by rule 1.
///
/// Purely textual: `(a) or (b)` loses its first and last characters too.
pub fn strip_outer_parens(english: &str) -> &str {
    if english.len() >= 2 && english.starts_with('(') && english.ends_with(')') {
        &english[1..english.len() - 1]
    } else {
        english
    }
}
