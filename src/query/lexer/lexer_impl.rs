//! Implementation of the query lexer
//!
//! One compiled pattern per dialect, matched left to right over the input.
//! Everything between matches is dropped.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

use crate::query::lexer::tokens::Token;
use crate::query::Dialect;

// `\w` is spelled out so that only ASCII word characters count.
static PLAIN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9A-Za-z_:]+|[()]").unwrap());

// Fielded words may carry inner hyphens so range values stay whole.
static FIELDED_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9A-Za-z_:]+(?:-[0-9A-Za-z_:]+)*|[()]").unwrap());

fn pattern(dialect: Dialect) -> &'static Regex {
    match dialect {
        Dialect::Plain => &*PLAIN_PATTERN,
        Dialect::Fielded => &*FIELDED_PATTERN,
    }
}

fn to_token(text: &str) -> Token {
    match text {
        "(" => Token::OpenParen,
        ")" => Token::CloseParen,
        word => Token::Word(word.to_string()),
    }
}

/// Tokenize a query and collect all tokens
pub fn tokenize(source: &str, dialect: Dialect) -> Vec<Token> {
    pattern(dialect)
        .find_iter(source)
        .map(|m| to_token(m.as_str()))
        .collect()
}

/// Tokenize a query and collect tokens with their byte spans
pub fn tokenize_with_spans(source: &str, dialect: Dialect) -> Vec<(Token, Range<usize>)> {
    pattern(dialect)
        .find_iter(source)
        .map(|m| (to_token(m.as_str()), m.range()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Token {
        Token::Word(s.to_string())
    }

    fn plain(source: &str) -> Vec<Token> {
        tokenize(source, Dialect::Plain)
    }

    #[test]
    fn test_simple_tokenization() {
        assert_eq!(plain("a AND b"), vec![word("a"), word("AND"), word("b")]);
    }

    #[test]
    fn test_parens_split_from_words() {
        assert_eq!(
            plain("(a OR b)c"),
            vec![
                Token::OpenParen,
                word("a"),
                word("OR"),
                word("b"),
                Token::CloseParen,
                word("c")
            ]
        );
    }

    #[test]
    fn test_keyword_case_preserved() {
        assert_eq!(plain("a and NoT b"), vec![word("a"), word("and"), word("NoT"), word("b")]);
    }

    #[test]
    fn test_colons_are_word_characters() {
        assert_eq!(plain("type:denarius a:b:c :x"), vec![word("type:denarius"), word("a:b:c"), word(":x")]);
    }

    #[test]
    fn test_punctuation_dropped() {
        assert_eq!(plain("\"gold\", silver; -bronze!"), vec![word("gold"), word("silver"), word("bronze")]);
    }

    #[test]
    fn test_non_ascii_letters_dropped() {
        assert_eq!(plain("café"), vec![word("caf")]);
    }

    #[test]
    fn test_plain_hyphen_splits_words() {
        assert_eq!(plain("date:100-200"), vec![word("date:100"), word("200")]);
    }

    #[test]
    fn test_fielded_hyphen_joins_words() {
        assert_eq!(tokenize("date:100-200", Dialect::Fielded), vec![word("date:100-200")]);
    }

    #[test]
    fn test_fielded_stray_hyphens_dropped() {
        assert_eq!(
            tokenize("- a- -b a--b", Dialect::Fielded),
            vec![word("a"), word("b"), word("a"), word("b")]
        );
    }

    #[test]
    fn test_whitespace_variants() {
        assert_eq!(plain("a\t\n  b"), plain("a b"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(plain(""), vec![]);
        assert_eq!(plain("   "), vec![]);
        assert_eq!(plain("&&& |||"), vec![]);
    }

    #[test]
    fn test_tokenize_with_spans() {
        let tokens = tokenize_with_spans("  (ab) c", Dialect::Plain);
        assert_eq!(
            tokens,
            vec![
                (Token::OpenParen, 2..3),
                (word("ab"), 3..5),
                (Token::CloseParen, 5..6),
                (word("c"), 7..8),
            ]
        );
    }
}
