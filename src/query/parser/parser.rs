//! Parser for boolean queries
//!
//! The parser never fails. Each `(` and each `NOT` opens a frame that
//! collects nodes until a `)` or the end of input, then collapses a
//! one-element result to that element. Open frames live on an explicit
//! stack, so arbitrarily deep nesting is accepted. Malformed input degrades as follows:
//!
//! - an unclosed `(` runs to the end of input
//! - a `)` ends whichever frame is open, including a `NOT` frame and the
//!   outermost one (everything after a stray outermost `)` is ignored)
//! - a dangling `AND`/`OR` stays in the tree as a marker
//! - a trailing `NOT` wraps an empty sequence
//!
//! `NOT` opens a frame of its own, so it negates everything up to the end of
//! the enclosing group: `NOT a AND b` negates `a AND b`.

use tracing::trace;

use crate::query::lexer::{Keyword, Token};
use crate::query::parser::ast::{Node, Operator, Term};
use crate::query::Dialect;

/// Parse a token stream into a single node.
///
/// An empty stream gives an empty sequence.
pub fn parse(tokens: &[Token], dialect: Dialect) -> Node {
    let mut parser = Parser::new(tokens, dialect);
    parser.expression(Frame::Root)
}

/// What opened the frame being parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Root,
    Group,
    Negation,
}

/// Parser state: the token stream and a cursor into it
pub struct Parser<'t> {
    tokens: &'t [Token],
    current: usize,
    dialect: Dialect,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token], dialect: Dialect) -> Self {
        Parser {
            tokens,
            current: 0,
            dialect,
        }
    }

    /// Index of the next unconsumed token
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.current)?;
        self.current += 1;
        Some(token)
    }

    /// Parse one frame, consuming up to and including its closing `)`.
    ///
    /// Nested groups and negations are kept on an explicit stack of open
    /// frames, so nesting depth is bounded by memory rather than by the call
    /// stack.
    pub fn expression(&mut self, frame: Frame) -> Node {
        let mut frame = frame;
        let mut nodes = Vec::new();
        let mut enclosing: Vec<(Frame, Vec<Node>)> = Vec::new();

        while let Some(token) = self.advance() {
            match token {
                Token::CloseParen => match enclosing.pop() {
                    Some((outer, outer_nodes)) => {
                        let closed = close(frame, std::mem::replace(&mut nodes, outer_nodes));
                        nodes.push(closed);
                        frame = outer;
                    }
                    None => {
                        if frame == Frame::Root && !self.is_at_end() {
                            trace!(
                                position = self.current - 1,
                                ignored = self.tokens.len() - self.current,
                                "stray ')' ends the query"
                            );
                        }
                        return collapse(nodes);
                    }
                },
                Token::OpenParen => {
                    enclosing.push((frame, std::mem::take(&mut nodes)));
                    frame = Frame::Group;
                }
                Token::Word(word) => match Keyword::from_word(word) {
                    Some(Keyword::And) => nodes.push(Node::Operator(Operator::And)),
                    Some(Keyword::Or) => nodes.push(Node::Operator(Operator::Or)),
                    Some(Keyword::Not) => {
                        enclosing.push((frame, std::mem::take(&mut nodes)));
                        frame = Frame::Negation;
                    }
                    None => nodes.push(Node::Term(Term::from_word(word, self.dialect))),
                },
            }
        }

        let unclosed = enclosing
            .iter()
            .map(|(open, _)| *open)
            .chain(std::iter::once(frame))
            .filter(|open| *open == Frame::Group)
            .count();
        if unclosed > 0 {
            trace!(unclosed, "unclosed '(' runs to end of input");
        }

        while let Some((outer, outer_nodes)) = enclosing.pop() {
            let closed = close(frame, std::mem::replace(&mut nodes, outer_nodes));
            nodes.push(closed);
            frame = outer;
        }
        collapse(nodes)
    }
}

/// Turn a finished inner frame into the node its parent receives
fn close(frame: Frame, nodes: Vec<Node>) -> Node {
    let node = collapse(nodes);
    match frame {
        Frame::Negation => Node::not(node),
        Frame::Root | Frame::Group => node,
    }
}

fn collapse(nodes: Vec<Node>) -> Node {
    match <[Node; 1]>::try_from(nodes) {
        Ok([node]) => node,
        Err(nodes) => Node::Sequence(nodes),
    }
}
