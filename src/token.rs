//! # Tokens and positioned token streams
//!
//! A [`Token`] is the smallest lexical unit handed to consumers: the text as it
//! should appear in a token sequence plus an opaque kind tag. Tokenizers key
//! their output by [`Position`], giving a [`TokenStream`] that is ordered by
//! byte offset and bracketed by the two sentinel tokens.
//!
//! ## Positions
//!
//! `Position` derives `Ord`, so variant order defines the stream order:
//!
//! ```text
//! Start < Offset(0) < Offset(1) < ... < Offset(usize::MAX) < End
//! ```
//!
//! The sentinels therefore sit outside every `Offset(a)..Offset(b)` range, which
//! is what keeps them out of reach of span-based annotation.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Text and kind of the synthetic token opening every stream.
pub const SENTENCE_START: &str = "<SENTENCE_START>";
/// Text and kind of the synthetic token closing every stream.
pub const SENTENCE_END: &str = "<SENTENCE_END>";

/// Key of a positioned token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Before the first byte of the buffer.
    Start,
    /// Byte offset of the first byte of a token.
    Offset(usize),
    /// Past the last byte of the buffer.
    End,
}

impl Position {
    pub fn offset(&self) -> Option<usize> {
        match self {
            Position::Offset(offset) => Some(*offset),
            Position::Start | Position::End => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Start => write!(f, "^"),
            Position::Offset(offset) => write!(f, "{}", offset),
            Position::End => write!(f, "$"),
        }
    }
}

/// A token: display text plus an opaque kind tag.
///
/// Tokens are values. Annotation produces new tokens rather than mutating the
/// ones a tokenizer returned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub kind: String,
}

impl Token {
    pub fn new(text: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: kind.into(),
        }
    }

    pub fn sentence_start() -> Self {
        Self::new(SENTENCE_START, SENTENCE_START)
    }

    pub fn sentence_end() -> Self {
        Self::new(SENTENCE_END, SENTENCE_END)
    }

    pub fn is_sentinel(&self) -> bool {
        self.kind == SENTENCE_START || self.kind == SENTENCE_END
    }

    /// Same kind, different text.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: self.kind.clone(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Ordered mapping from position to token, sentinels included.
pub type TokenStream = BTreeMap<Position, Token>;

/// Creates a stream holding only the two sentinels.
pub fn empty_stream() -> TokenStream {
    let mut stream = TokenStream::new();
    stream.insert(Position::Start, Token::sentence_start());
    stream.insert(Position::End, Token::sentence_end());
    stream
}

/// Token categories produced by the built-in scanners.
///
/// The rendered name (`IDENTIFIER`, `KEYWORD`, ...) is what ends up in
/// [`Token::kind`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Identifier,
    Keyword,
    Literal,
    Comment,
    Operator,
    Delimiter,
    Whitespace,
    Newline,
    Docstring,
    Preprocessor,
    Unknown,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

impl From<TokenKind> for String {
    fn from(kind: TokenKind) -> Self {
        kind.as_ref().to_string()
    }
}
