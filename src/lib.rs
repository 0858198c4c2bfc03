//! # annotok: syntax-annotated token streams
//!
//! annotok turns source code into token sequences for statistical and
//! machine-learning tools. Besides plain lexical tokens it can overlay
//! syntactic context: every token's text is extended with the kind of the
//! innermost syntax-tree node containing it and that node's parent kind.
//!
//! ```text
//! int x;   →   int_i:primitive_type_p:declaration
//!              x_i:identifier_p:declaration
//!              ;_i:declaration_p:translation_unit
//! ```
//!
//! ## Processing Pipeline
//!
//! ```text
//!          ┌──────────────► Base Tokenizer ──► baseline stream ─┐
//! buffer ──┤                                                     ├─► Annotator ──► annotated stream
//!          └──────────────► Syntax Extractor ──► syntax tree ────┘
//! ```
//!
//! * [`tokenizer`]: base tokenizers for Java, C/C++ and Python built on nom
//! * [`syntax`]: the syntax tree capability traits and the tree-sitter extractor
//! * [`annotator`]: the span overlay algorithm
//! * [`annotated`]: the facade presenting the annotated stream as a tokenizer
//! * [`config`]: JSON configuration and the tokenizer registry
//!
//! ## Streams
//!
//! All tokenizers return a [`TokenStream`]: tokens keyed by the byte offset of
//! their first byte, bracketed by `<SENTENCE_START>` and `<SENTENCE_END>`
//! sentinels. A buffer that yields no tokens still produces the two
//! sentinels; a buffer that cannot be parsed produces an [`Error`].

pub mod annotated;
pub mod annotator;
pub mod config;
pub mod error;
pub mod language;
pub mod syntax;
pub mod token;
pub mod tokenizer;

// Re-exports
pub use annotated::AnnotatedTokenizer;
pub use annotator::{annotate, AnnotationStyle, ContextFormat};
pub use config::{ConfigError, LanguageConfig, TokenizerConfig, TokenizerRegistry};
pub use error::*;
pub use language::Language;
pub use token::*;
pub use tokenizer::{FileFilter, Tokenizer};
