//! Main module for boolq library functionality
//!
//! The conversion is a straight pipeline, built fresh on every call:
//!
//! ```text
//! text -> tokenize -> parse -> to_english -> strip outer parens -> display
//! ```
//!
//! Two dialects share one tokenizer, parser and renderer. The plain dialect
//! treats every word as a bare term. The fielded dialect splits `field:value`
//! words and renders the field through a [`fields::FieldResolver`].

pub mod english;
pub mod fields;
pub mod lexer;
pub mod parser;
pub mod processor;

use tracing::debug;

use crate::query::english::{strip_outer_parens, to_english};
use crate::query::fields::{FieldLabels, FieldResolver, FieldSource, FieldsError};
use crate::query::lexer::{tokenize, Token};
use crate::query::parser::{parse, Node};

/// How words are read into terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Every word is a bare term, colons included
    #[default]
    Plain,
    /// `field:value` words become field-qualified terms and words may carry
    /// inner hyphens (`date:100-200`)
    Fielded,
}

/// Translate a query in the plain dialect.
pub fn boolean_to_english(query: &str) -> String {
    translate(query, Dialect::Plain, &FieldLabels::default())
}

/// Translate a query in the fielded dialect, labelling fields through `fields`.
pub fn boolean_to_english_with(query: &str, fields: &dyn FieldResolver) -> String {
    translate(query, Dialect::Fielded, fields)
}

fn translate(query: &str, dialect: Dialect, fields: &dyn FieldResolver) -> String {
    let tokens = tokenize(query, dialect);
    debug!(tokens = tokens.len(), ?dialect, "tokenized query");

    let ast = parse(&tokens, dialect);
    strip_outer_parens(&to_english(&ast, fields)).to_string()
}

/// A configured query translator.
///
/// Holds the dialect and the field table, both read-only once built, so one
/// translator can serve every keystroke of a live session.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    dialect: Dialect,
    labels: FieldLabels,
}

impl Translator {
    /// Plain dialect, no field support
    pub fn plain() -> Self {
        Self::default()
    }

    /// Fielded dialect with the given label table
    pub fn fielded(labels: FieldLabels) -> Self {
        Translator {
            dialect: Dialect::Fielded,
            labels,
        }
    }

    /// Build a translator from a front end's field option
    pub fn from_field_source(source: &FieldSource) -> Result<Self, FieldsError> {
        Ok(match source.load()? {
            Some(labels) => Translator::fielded(labels),
            None => Translator::plain(),
        })
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn tokenize(&self, query: &str) -> Vec<Token> {
        tokenize(query, self.dialect)
    }

    pub fn parse(&self, query: &str) -> Node {
        parse(&self.tokenize(query), self.dialect)
    }

    /// Full pipeline: tokenize, parse, render and strip one redundant outer
    /// pair of parentheses.
    pub fn translate(&self, query: &str) -> String {
        translate(query, self.dialect, &self.labels)
    }

    /// What a front end shows for the raw contents of an input box.
    ///
    /// Blank input shows nothing; anything else is trimmed and translated.
    pub fn display(&self, input: &str) -> String {
        let query = input.trim();
        if query.is_empty() {
            String::new()
        } else {
            self.translate(query)
        }
    }
}
