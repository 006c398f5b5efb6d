//! Parser module for boolean queries
//!
//! Turns the token stream into a [`Node`] tree and offers two debugging views
//! of that tree: an XML-like tag dump and a treeviz outline.
//!
//! Grouping is strictly left to right. There is no precedence between `AND`
//! and `OR`: operators are kept as markers inside the sequence they appear in,
//! and only parentheses (or a `NOT`) open a new level.

pub mod ast;
pub mod ast_tag_serializer;
pub mod ast_treeviz;
#[allow(clippy::module_inception)]
pub mod parser;

pub use ast::{Node, Operator, Term};
pub use ast_tag_serializer::serialize_node as serialize_ast_tag;
pub use ast_treeviz::to_treeviz_str;
pub use parser::parse;
