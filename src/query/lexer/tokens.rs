//! Token definitions for boolean queries

use serde::Serialize;
use std::fmt;

/// All possible tokens in a query
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Token {
    OpenParen,
    CloseParen,
    /// A run of word characters and colons, keywords included
    Word(String),
}

impl Token {
    /// The source text this token was scanned from
    pub fn text(&self) -> &str {
        match self {
            Token::OpenParen => "(",
            Token::CloseParen => ")",
            Token::Word(word) => word,
        }
    }

    pub fn is_paren(&self) -> bool {
        matches!(self, Token::OpenParen | Token::CloseParen)
    }

    /// The keyword this token spells, in any letter case
    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            Token::Word(word) => Keyword::from_word(word),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::OpenParen => write!(f, "<open-paren>"),
            Token::CloseParen => write!(f, "<close-paren>"),
            Token::Word(word) => match Keyword::from_word(word) {
                Some(keyword) => write!(f, "<{}>", keyword.as_str().to_lowercase()),
                None => write!(f, "<word:{}>", word),
            },
        }
    }
}

/// Reserved words of the query language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    And,
    Or,
    Not,
}

impl Keyword {
    pub fn from_word(word: &str) -> Option<Keyword> {
        if word.eq_ignore_ascii_case("AND") {
            Some(Keyword::And)
        } else if word.eq_ignore_ascii_case("OR") {
            Some(Keyword::Or)
        } else if word.eq_ignore_ascii_case("NOT") {
            Some(Keyword::Not)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::And => "AND",
            Keyword::Or => "OR",
            Keyword::Not => "NOT",
        }
    }
}
