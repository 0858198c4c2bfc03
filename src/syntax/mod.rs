//! # Syntax Trees
//!
//! The annotator needs four things from a syntax node: its kind, its byte
//! span, its parent and its children. [`SyntaxNode`] is that capability set.
//! It is implemented for tree-sitter nodes ([`grammar`]) and for the
//! in-memory [`owned::OwnedTree`], which is what tests and callers with their
//! own parser use.
//!
//! A [`SyntaxExtractor`] turns a buffer into a [`SyntaxTree`]. Extractors are
//! called once per buffer and hold no per-buffer state, so one extractor can
//! serve concurrent callers.

pub mod grammar;
pub mod owned;

use thiserror::Error;

pub use grammar::TreeSitterExtractor;
pub use owned::{FnExtractor, NodeId, OwnedNode, OwnedTree};

/// Byte range covered by a syntax node: `[start, start + len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Exclusive end offset, saturating at `usize::MAX`.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.len)
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end()
    }
}

pub trait SyntaxNode: Sized {
    fn kind(&self) -> &str;

    fn span(&self) -> Span;

    /// `None` for the root.
    fn parent(&self) -> Option<Self>;

    /// Children in source order.
    fn children(&self) -> Vec<Self>;
}

pub trait SyntaxTree {
    type Node<'a>: SyntaxNode
    where
        Self: 'a;

    fn root(&self) -> Self::Node<'_>;
}

/// Parses a buffer into a syntax tree.
///
/// Implementations that keep per-buffer parser state in `self` must not be
/// shared between concurrent calls.
pub trait SyntaxExtractor: Send + Sync {
    type Tree: SyntaxTree;

    fn parse(&self, code: &str) -> Result<Self::Tree, SyntaxError>;
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    #[error("Failed to load the {language} grammar: {message}")]
    Grammar { language: String, message: String },
    #[error("The {language} parser stopped without producing a tree")]
    Aborted { language: String },
    #[error("Invalid {language} syntax at line {line}, column {column} (offset {offset})")]
    Rejected {
        language: String,
        line: usize,
        column: usize,
        offset: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span() {
        let span = Span::new(4, 2);
        assert_eq!(span.end(), 6);
        assert!(span.contains(4));
        assert!(span.contains(5));
        assert!(!span.contains(6));
        assert!(!Span::new(3, 0).contains(3));
        assert!(Span::new(3, 0).is_empty());
        assert_eq!(Span::new(usize::MAX - 1, 10).end(), usize::MAX);
    }

    #[test]
    fn test_error_messages() {
        let error = SyntaxError::Rejected {
            language: "java".to_string(),
            line: 3,
            column: 7,
            offset: 41,
        };
        assert_eq!(
            error.to_string(),
            "Invalid java syntax at line 3, column 7 (offset 41)"
        );
    }
}
