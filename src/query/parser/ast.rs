//! AST node definitions for boolean queries

use serde::Serialize;

use crate::query::Dialect;

/// A parsed query, or any part of one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    /// Terms, groups and operator markers at one nesting level, in source order
    Sequence(Vec<Node>),
    /// An `AND`/`OR` marker. Lives inside a sequence unless a group held
    /// nothing else.
    Operator(Operator),
    /// Negation of the whole child subexpression
    Not(Box<Node>),
    Term(Term),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    And,
    Or,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
        }
    }
}

/// A leaf: a bare value, or a value qualified by a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub value: String,
}

impl Term {
    pub fn bare(value: impl Into<String>) -> Self {
        Term {
            field: None,
            value: value.into(),
        }
    }

    pub fn fielded(field: impl Into<String>, value: impl Into<String>) -> Self {
        Term {
            field: Some(field.into()),
            value: value.into(),
        }
    }

    /// Build a term from a word token.
    ///
    /// Fielded words split on the first colon only, so `a:b:c` has field `a`
    /// and value `b:c`.
    pub fn from_word(word: &str, dialect: Dialect) -> Self {
        match dialect {
            Dialect::Plain => Term::bare(word),
            Dialect::Fielded => match word.split_once(':') {
                Some((field, value)) => Term::fielded(field, value),
                None => Term::bare(word),
            },
        }
    }

    /// The term as it reads in a query
    pub fn source_text(&self) -> String {
        match &self.field {
            Some(field) => format!("{}:{}", field, self.value),
            None => self.value.clone(),
        }
    }
}

impl Node {
    /// An empty sequence, what a query without tokens parses to
    pub fn empty() -> Self {
        Node::Sequence(Vec::new())
    }

    pub fn term(value: impl Into<String>) -> Self {
        Node::Term(Term::bare(value))
    }

    pub fn not(child: Node) -> Self {
        Node::Not(Box::new(child))
    }

    /// Whether this is a sequence holding an operator marker directly
    pub fn has_operator(&self) -> bool {
        match self {
            Node::Sequence(items) => items.iter().any(|item| matches!(item, Node::Operator(_))),
            _ => false,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Sequence(items) => items,
            Node::Not(child) => std::slice::from_ref(child.as_ref()),
            Node::Operator(_) | Node::Term(_) => &[],
        }
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            pending.extend(node.children().iter().map(|child| (child, depth + 1)));
        }
        deepest
    }

    /// Move this node's children onto `out`, leaving it a leaf
    fn detach_children(&mut self, out: &mut Vec<Node>) {
        match self {
            Node::Sequence(items) => out.append(items),
            Node::Not(child) => out.push(std::mem::replace(child.as_mut(), Node::empty())),
            Node::Operator(_) | Node::Term(_) => {}
        }
    }

    pub fn node_type(&self) -> &'static str {
        match self {
            Node::Sequence(_) => "Sequence",
            Node::Operator(_) => "Operator",
            Node::Not(_) => "Not",
            Node::Term(_) => "Term",
        }
    }

    pub fn display_label(&self) -> String {
        match self {
            Node::Sequence(items) => format!("{} items", items.len()),
            Node::Operator(op) => op.as_str().to_string(),
            Node::Not(_) => String::new(),
            Node::Term(term) => term.source_text(),
        }
    }
}

// Torn down with an explicit stack: nesting depth is unbounded.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}
