//! # boolq
//!
//! Turns Boolean search queries into plain English.
//!
//! ```text
//! a AND (b OR c)                  ->  "a" and ("b" or "c")
//! type:denarius AND NOT date:100  ->  coin type "denarius" and excluding date "100"
//! ```
//!
//! The work happens in [`query`]: a regex tokenizer, a lenient recursive-descent
//! parser and an English renderer. The `boolq` and `boolqv` binaries are thin
//! front ends over [`query::Translator`].

pub mod query;

pub use query::{boolean_to_english, boolean_to_english_with, Dialect, Translator};
