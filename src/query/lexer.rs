//! Lexer module for boolean queries
//!
//! This module contains the tokenization logic, split into the token
//! definitions and the regex-driven scanner.
//!
//! Keywords
//!
//!     `AND`, `OR` and `NOT` are not special at this stage: they come out as
//!     ordinary words and the parser decides what they mean. This keeps the
//!     scanner a single pattern and lets keyword case be normalized in one place.
//!
//! Dropped input
//!
//!     Whitespace and any punctuation outside the word pattern never produce a
//!     token. That is how whitespace separates terms, and also why `"a b"` is
//!     two terms: quoting is not part of the language.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::{tokenize, tokenize_with_spans};
pub use tokens::{Keyword, Token};
