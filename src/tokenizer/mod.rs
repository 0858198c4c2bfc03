//! # Tokenizer Component
//!
//! Base tokenizers turn a source buffer into a positioned [`TokenStream`]:
//! one [`Token`] per lexeme keyed by the byte offset of its first byte, plus
//! the start and end sentinels.
//!
//! ## Contract
//!
//! Every tokenizer, including the annotated one in [`crate::annotated`],
//! implements [`Tokenizer`]. Only [`Tokenizer::full_tokens_with_pos`] has to be
//! written; the list and text projections are derived from it so they can't
//! drift apart.
//!
//! ## Component Structure
//!
//! * [`scanner`]: the driver loop, position tracking and [`TokenizerError`]
//! * [`whitespace`], [`comment`], [`literal`], [`symbol`]: shared nom lexeme parsers
//! * [`java`], [`cpp`], [`python`]: the language tokenizers
//!
//! ## Offsets
//!
//! Offsets are byte offsets into the UTF-8 buffer. That is the offset space
//! tree-sitter reports node spans in, so base streams and syntax trees line up
//! without a reconciliation step.
//!
//! ## Concurrency
//!
//! The built-in tokenizers keep all scanning state on the stack of a single
//! call and can be shared freely. Implementations that keep per-buffer
//! scanner state in `self` must not be shared between concurrent calls; give
//! each call its own instance.

pub mod comment;
pub mod cpp;
pub mod java;
pub mod literal;
pub mod python;
pub mod scanner;
pub mod symbol;
pub mod whitespace;

use std::{collections::BTreeMap, path::Path};

use regex::Regex;

pub use cpp::CppTokenizer;
pub use java::JavaTokenizer;
pub use python::PythonTokenizer;
pub use scanner::{Span, TokenizerError};

use crate::{
    error::Result,
    token::{empty_stream, Position, Token, TokenStream, SENTENCE_END, SENTENCE_START},
};

/// Decides which files a tokenizer is meant for, by file name.
#[derive(Debug, Clone)]
pub struct FileFilter {
    pattern: Regex,
}

impl FileFilter {
    pub fn new(pattern: &str) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.pattern.is_match(name))
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

pub trait Tokenizer: Send + Sync {
    /// Tokens keyed by position, sentinels included.
    fn full_tokens_with_pos(&self, code: &str) -> Result<TokenStream>;

    fn full_tokens(&self, code: &str) -> Result<Vec<Token>> {
        Ok(self.full_tokens_with_pos(code)?.into_values().collect())
    }

    fn tokens_with_pos(&self, code: &str) -> Result<BTreeMap<Position, String>> {
        Ok(self
            .full_tokens_with_pos(code)?
            .into_iter()
            .map(|(position, token)| (position, token.text))
            .collect())
    }

    fn tokens(&self, code: &str) -> Result<Vec<String>> {
        Ok(self
            .full_tokens_with_pos(code)?
            .into_values()
            .map(|token| token.text)
            .collect())
    }

    /// Tokenizes a standalone fragment and returns its first token.
    ///
    /// Sentinel texts map back to the sentinel tokens.
    fn token_from_str(&self, fragment: &str) -> Result<Token> {
        if fragment == SENTENCE_START {
            return Ok(Token::sentence_start());
        }
        if fragment == SENTENCE_END {
            return Ok(Token::sentence_end());
        }
        self.full_tokens_with_pos(fragment)?
            .into_iter()
            .find_map(|(position, token)| position.offset().map(|_| token))
            .ok_or_else(|| {
                TokenizerError::NoToken {
                    input: fragment.to_string(),
                }
                .into()
            })
    }

    fn file_filter(&self) -> &FileFilter;

    /// The [`Token::kind`] value used for identifiers.
    fn identifier_kind(&self) -> &str;
}

/// Builds a stream from `(offset, token)` pairs and adds the sentinels.
pub(crate) fn stream_from<I>(tokens: I) -> TokenStream
where
    I: IntoIterator<Item = (usize, Token)>,
{
    let mut stream = empty_stream();
    stream.extend(
        tokens
            .into_iter()
            .map(|(offset, token)| (Position::Offset(offset), token)),
    );
    stream
}
