//! # Span Overlay Annotation
//!
//! Merges a positioned token stream with a syntax tree of the same buffer.
//! Every token that is not ignorable has its text rewritten to carry the kind
//! of the innermost node containing it and that node's parent kind.
//!
//! ## Algorithm
//!
//! The tree is walked depth first in pre-order, parent before children and
//! children left to right, using an explicit stack. For a node spanning
//! `[s, s + len)` the affected tokens are the contiguous map range
//! `Offset(s)..Offset(s + len)`, and each of them is rewritten from the
//! *baseline* token. Because descendants are visited after their ancestors,
//! the last write for a token comes from the innermost node containing it;
//! among overlapping siblings the later one wins.
//!
//! ```text
//! baseline:  ^  0:int  4:x  5:;  $
//! tree:      declaration[0,6) > primitive_type[0,3), identifier[4,5)
//! result:    ^  int_i:primitive_type_p:declaration
//!               x_i:identifier_p:declaration
//!               ;_i:declaration_p:translation_unit  $
//! ```
//!
//! The sentinels live at `Position::Start` and `Position::End`, which sort
//! outside every `Offset` range, so no node ever reaches them.
//!
//! The baseline and the tree must come from the same buffer. That is not
//! checked: a mismatched pair yields wrong annotations, not an error.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::{
    language::Language,
    syntax::SyntaxNode,
    token::{Position, Token, TokenKind, TokenStream},
};

/// Parent kind reported for the root node.
pub const NO_PARENT: &str = "NONE";

/// How node and parent kinds are spliced into a token's text.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContextFormat {
    /// `text_i:Kind_p:Parent`
    Infix,
    /// `text->{in:Kind,parent:Parent}`
    Arrow,
}

impl ContextFormat {
    pub fn render(&self, text: &str, kind: &str, parent: &str) -> String {
        match self {
            ContextFormat::Infix => format!("{}_i:{}_p:{}", text, kind, parent),
            ContextFormat::Arrow => format!("{}->{{in:{},parent:{}}}", text, kind, parent),
        }
    }
}

/// Whitespace tokens produced by whitespace-preserving tokenizers.
pub fn is_whitespace_token(token: &Token) -> bool {
    token.kind == TokenKind::Whitespace.name()
}

/// Whitespace plus Python's layout tokens: logical line breaks and docstrings.
pub fn is_python_layout_token(token: &Token) -> bool {
    token.kind == TokenKind::Newline.name()
        || token.kind == TokenKind::Docstring.name()
        || is_whitespace_token(token)
}

/// Per-language annotation settings.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationStyle {
    /// Tokens for which this returns `true` are copied through unchanged.
    pub ignorable: fn(&Token) -> bool,
    pub format: ContextFormat,
}

impl AnnotationStyle {
    pub fn new(format: ContextFormat, ignorable: fn(&Token) -> bool) -> Self {
        Self { ignorable, format }
    }

    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Java => Self::new(ContextFormat::Arrow, is_whitespace_token),
            Language::Cpp => Self::new(ContextFormat::Infix, is_whitespace_token),
            Language::Python => Self::new(ContextFormat::Infix, is_python_layout_token),
        }
    }

    pub fn with_format(mut self, format: ContextFormat) -> Self {
        self.format = format;
        self
    }

    pub fn is_ignorable(&self, token: &Token) -> bool {
        (self.ignorable)(token)
    }
}

/// Annotates `baseline` with the tree rooted at `root`.
///
/// The result has exactly the keys of `baseline`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn annotate<N: SyntaxNode>(baseline: &TokenStream, root: N, style: &AnnotationStyle) -> TokenStream {
    let mut annotated = baseline.clone();
    let mut stack = vec![root];
    let mut visited = 0usize;

    while let Some(node) = stack.pop() {
        visited += 1;
        let span = node.span();
        if !span.is_empty() {
            let parent = node.parent();
            let parent_kind = parent.as_ref().map_or(NO_PARENT, |parent| parent.kind());
            let range = Position::Offset(span.start)..Position::Offset(span.end());
            for ((_, token), (_, original)) in annotated
                .range_mut(range.clone())
                .zip(baseline.range(range))
            {
                if !style.is_ignorable(original) {
                    *token = original.with_text(style.format.render(
                        &original.text,
                        node.kind(),
                        parent_kind,
                    ));
                }
            }
        }

        let mut children = node.children();
        children.reverse();
        stack.extend(children);
    }

    debug_assert!(annotated.keys().eq(baseline.keys()));
    tracing::debug!("annotated {} tokens over {} nodes", baseline.len(), visited);
    annotated
}
