//! tree-sitter backed syntax extraction.
//!
//! Only named nodes take part in annotation. Anonymous nodes are the
//! punctuation and keyword leaves of a concrete syntax tree; skipping them
//! gives the shape of an abstract syntax tree, so `;` in `int x;` is
//! annotated with the declaration it ends.

use tree_sitter::{Node, Parser, Tree};

use super::{Span, SyntaxError, SyntaxExtractor, SyntaxNode, SyntaxTree};
use crate::{config::ConfigError, language::Language};

impl<'tree> SyntaxNode for Node<'tree> {
    fn kind(&self) -> &str {
        Node::kind(self)
    }

    fn span(&self) -> Span {
        let start = self.start_byte();
        Span::new(start, self.end_byte().saturating_sub(start))
    }

    fn parent(&self) -> Option<Self> {
        Node::parent(self)
    }

    fn children(&self) -> Vec<Self> {
        let mut cursor = self.walk();
        let children = self.named_children(&mut cursor).collect::<Vec<_>>();
        children
    }
}

impl SyntaxTree for Tree {
    type Node<'a> = Node<'a>;

    fn root(&self) -> Self::Node<'_> {
        self.root_node()
    }
}

/// Parses with the tree-sitter grammar of a [`Language`].
#[derive(Debug, Clone)]
pub struct TreeSitterExtractor {
    language: Language,
    grammar: tree_sitter::Language,
    recover_errors: bool,
}

impl TreeSitterExtractor {
    /// Loads the grammar once up front so an incompatible grammar is reported
    /// at construction rather than on the first buffer.
    pub fn new(language: Language) -> Result<Self, ConfigError> {
        let extractor = Self {
            language,
            grammar: language.grammar(),
            recover_errors: false,
        };
        extractor.parser()?;
        Ok(extractor)
    }

    /// Accept trees containing `ERROR` or missing nodes instead of rejecting
    /// the buffer.
    pub fn recover_errors(mut self, recover_errors: bool) -> Self {
        self.recover_errors = recover_errors;
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn parser(&self) -> Result<Parser, SyntaxError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.grammar)
            .map_err(|e| SyntaxError::Grammar {
                language: self.language.to_string(),
                message: e.to_string(),
            })?;
        Ok(parser)
    }
}

impl SyntaxExtractor for TreeSitterExtractor {
    type Tree = Tree;

    #[tracing::instrument(level = "debug", skip(self, code), fields(language = %self.language))]
    fn parse(&self, code: &str) -> Result<Tree, SyntaxError> {
        let tree = self
            .parser()?
            .parse(code, None)
            .ok_or_else(|| SyntaxError::Aborted {
                language: self.language.to_string(),
            })?;

        if !self.recover_errors {
            if let Some(node) = first_error(tree.root_node()) {
                let point = node.start_position();
                return Err(SyntaxError::Rejected {
                    language: self.language.to_string(),
                    line: point.row + 1,
                    column: point.column + 1,
                    offset: node.start_byte(),
                });
            }
        }

        tracing::debug!("parsed {} bytes", code.len());
        Ok(tree)
    }
}

/// First `ERROR` or missing node in pre-order, anonymous nodes included.
fn first_error(root: Node<'_>) -> Option<Node<'_>> {
    if !root.has_error() {
        return None;
    }
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        let mut cursor = node.walk();
        let children = node.children(&mut cursor).collect::<Vec<_>>();
        stack.extend(children.into_iter().rev().filter(|child| child.has_error()));
    }
    None
}
