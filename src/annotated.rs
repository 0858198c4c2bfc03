//! # Annotated Tokenizer
//!
//! [`AnnotatedTokenizer`] wraps a base tokenizer and a syntax extractor and
//! exposes the annotated stream through the plain [`Tokenizer`] contract, so
//! consumers can swap it in for the base tokenizer without other changes.
//!
//! Every call is independent: the buffer is parsed, tokenized and annotated,
//! and nothing survives the call.

use crate::{
    annotator::{annotate, AnnotationStyle},
    error::{Error, Result},
    language::Language,
    syntax::{SyntaxExtractor, SyntaxTree, TreeSitterExtractor},
    token::{Token, TokenStream},
    tokenizer::{FileFilter, Tokenizer},
};

pub struct AnnotatedTokenizer<E: SyntaxExtractor = TreeSitterExtractor> {
    base: Box<dyn Tokenizer>,
    extractor: E,
    style: AnnotationStyle,
}

impl AnnotatedTokenizer<TreeSitterExtractor> {
    /// Built-in tokenizer and grammar of `language` with its default style.
    pub fn for_language(language: Language, base: Box<dyn Tokenizer>) -> Result<Self> {
        Ok(Self::new(
            base,
            TreeSitterExtractor::new(language)?,
            AnnotationStyle::for_language(language),
        ))
    }
}

impl<E: SyntaxExtractor> AnnotatedTokenizer<E> {
    pub fn new(base: Box<dyn Tokenizer>, extractor: E, style: AnnotationStyle) -> Self {
        Self {
            base,
            extractor,
            style,
        }
    }

    pub fn style(&self) -> &AnnotationStyle {
        &self.style
    }

    pub fn base(&self) -> &dyn Tokenizer {
        self.base.as_ref()
    }

    /// Annotates each buffer on its own; a failing buffer doesn't affect the
    /// others.
    pub fn annotate_all<S: AsRef<str>>(&self, buffers: &[S]) -> Vec<Result<TokenStream>> {
        buffers
            .iter()
            .map(|buffer| self.compute(buffer.as_ref()))
            .collect()
    }

    #[tracing::instrument(level = "debug", skip_all, fields(bytes = code.len()))]
    fn compute(&self, code: &str) -> Result<TokenStream> {
        let tree = self.extractor.parse(code).map_err(|e| {
            tracing::warn!("syntax extraction failed: {}", e);
            Error::from(e)
        })?;
        let baseline = self.base.full_tokens_with_pos(code)?;
        Ok(annotate(&baseline, tree.root(), &self.style))
    }
}

impl<E: SyntaxExtractor> Tokenizer for AnnotatedTokenizer<E> {
    fn full_tokens_with_pos(&self, code: &str) -> Result<TokenStream> {
        self.compute(code)
    }

    /// A fragment has no syntax tree to annotate against.
    fn token_from_str(&self, _fragment: &str) -> Result<Token> {
        Err(Error::unsupported(
            "token_from_str is not available on an annotated tokenizer",
        ))
    }

    fn file_filter(&self) -> &FileFilter {
        self.base.file_filter()
    }

    fn identifier_kind(&self) -> &str {
        self.base.identifier_kind()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        syntax::{FnExtractor, OwnedTree, Span, SyntaxError},
        token::Position,
        tokenizer::{CppTokenizer, JavaTokenizer},
    };

    fn declaration_tree(code: &str) -> std::result::Result<OwnedTree, SyntaxError> {
        if code.contains('@') {
            return Err(SyntaxError::Rejected {
                language: "toy".to_string(),
                line: 1,
                column: code.find('@').unwrap_or(0) + 1,
                offset: code.find('@').unwrap_or(0),
            });
        }
        let mut tree = OwnedTree::new("Declaration", Span::new(0, code.len()));
        if code.len() >= 5 {
            tree.add_child(tree.root_id(), "Declarator", Span::new(4, 1));
        }
        Ok(tree)
    }

    fn toy() -> AnnotatedTokenizer<FnExtractor<fn(&str) -> std::result::Result<OwnedTree, SyntaxError>>> {
        AnnotatedTokenizer::new(
            Box::new(CppTokenizer::new()),
            FnExtractor(declaration_tree as fn(&str) -> _),
            AnnotationStyle::for_language(Language::Cpp),
        )
    }

    #[test]
    fn test_projections_agree() {
        let tokenizer = toy();
        let stream = tokenizer.full_tokens_with_pos("int x;").unwrap();
        let tokens = tokenizer.full_tokens("int x;").unwrap();
        let texts = tokenizer.tokens("int x;").unwrap();
        let with_pos = tokenizer.tokens_with_pos("int x;").unwrap();

        assert_eq!(tokens, stream.values().cloned().collect::<Vec<_>>());
        assert_eq!(
            texts,
            vec![
                "<SENTENCE_START>",
                "int_i:Declaration_p:NONE",
                "x_i:Declarator_p:Declaration",
                ";_i:Declaration_p:NONE",
                "<SENTENCE_END>",
            ]
        );
        assert_eq!(with_pos[&Position::Offset(4)], "x_i:Declarator_p:Declaration");
    }

    #[test]
    fn test_token_from_str_is_unsupported() {
        let result = toy().token_from_str("int");
        assert!(matches!(result, Err(Error::UnsupportedOperation(_))));
    }

    #[test]
    fn test_annotate_all_isolates_failures() {
        let results = toy().annotate_all(&["int x;", "int @;", ""]);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(Error::Parse(_))));
        assert_eq!(results[2].as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_forwards_base_metadata() {
        let tokenizer = AnnotatedTokenizer::for_language(Language::Java, Box::new(JavaTokenizer::new())).unwrap();
        assert_eq!(tokenizer.identifier_kind(), "IDENTIFIER");
        assert_eq!(tokenizer.file_filter().as_str(), r".*\.java$");
    }
}
