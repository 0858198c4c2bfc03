//! # Java Tokenizer
//!
//! Java source to a positioned stream. Comments are dropped unless
//! requested, and whitespace is dropped unless the tokenizer is built in
//! whitespace mode. Token text is flattened to a single line: line breaks and
//! tabs become spaces and backslashes become `|`, so a stream can be written
//! one token per line without escaping.

use lazy_static::lazy_static;
use nom::{branch::alt, error::context};

use super::{
    comment::parse_c_comment,
    literal::{parse_java_literal, parse_number},
    scanner::{ParserResult, Scanner},
    stream_from,
    symbol::{parse_punctuator, parse_word, Vocabulary},
    whitespace::{parse_blank, whitespace_text},
    FileFilter, Tokenizer,
};
use crate::{
    error::Result,
    token::{Token, TokenKind, TokenStream},
};

lazy_static! {
    static ref JAVA_FILES: FileFilter = FileFilter::new(r".*\.java$").unwrap();
}

const JAVA: Vocabulary = Vocabulary {
    keywords: &[
        "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
        "const", "continue", "default", "do", "double", "else", "enum", "extends", "final",
        "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
        "interface", "long", "native", "new", "package", "private", "protected", "public",
        "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this",
        "throw", "throws", "transient", "try", "void", "volatile", "while", "var", "record",
        "yield",
    ],
    literals: &["true", "false", "null"],
    extra: &['$'],
};

const OPERATORS: &[&str] = &[
    ">>>=", "<<=", ">>=", ">>>", "...", "->", "::", "++", "--", "&&", "||", "==", "!=", "<=",
    ">=", "+=", "-=", "*=", "/=", "&=", "|=", "^=", "%=", "<<", ">>", "(", ")", "{", "}", "[",
    "]", ";", ",", ".", "@", "=", ">", "<", "!", "~", "?", ":", "+", "-", "*", "/", "&", "|",
    "^", "%",
];

fn java_word(input: &str) -> ParserResult<TokenKind> {
    parse_word(input, &JAVA)
}

fn java_operator(input: &str) -> ParserResult<TokenKind> {
    parse_punctuator(input, OPERATORS)
}

fn lexeme(input: &str) -> ParserResult<TokenKind> {
    context(
        "java token",
        alt((
            parse_blank,
            parse_c_comment,
            parse_java_literal,
            parse_number,
            java_word,
            java_operator,
        )),
    )(input)
}

/// Flattens token text to one line. Backslashes become `|`, and the char
/// literal `'\\'` becomes `'|'` rather than `'||'`.
pub fn sanitize(text: &str) -> String {
    text.replace("'\\\\'", "'|'")
        .replace(['\n', '\t', '\r'], " ")
        .replace('\\', "|")
}

#[derive(Debug, Clone, Default)]
pub struct JavaTokenizer {
    tokenize_comments: bool,
    preserve_whitespace: bool,
}

impl JavaTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps whitespace runs as `WS_...` tokens.
    pub fn whitespace() -> Self {
        Self {
            preserve_whitespace: true,
            ..Self::default()
        }
    }

    pub fn with_comments(mut self, tokenize_comments: bool) -> Self {
        self.tokenize_comments = tokenize_comments;
        self
    }
}

impl Tokenizer for JavaTokenizer {
    fn full_tokens_with_pos(&self, code: &str) -> Result<TokenStream> {
        let spans = Scanner::new().scan(code, lexeme)?;
        Ok(stream_from(spans.into_iter().filter_map(|span| {
            let token = match span.kind {
                TokenKind::Whitespace if self.preserve_whitespace => {
                    Token::new(whitespace_text(span.text), span.kind)
                }
                TokenKind::Whitespace => return None,
                TokenKind::Comment if !self.tokenize_comments => return None,
                kind => Token::new(sanitize(span.text), kind),
            };
            Some((span.start, token))
        })))
    }

    fn file_filter(&self) -> &FileFilter {
        &JAVA_FILES
    }

    fn identifier_kind(&self) -> &str {
        TokenKind::Identifier.name()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::token::Position;

    fn texts(tokenizer: &JavaTokenizer, code: &str) -> Vec<String> {
        tokenizer.tokens(code).unwrap()
    }

    #[test]
    fn test_simple_class() {
        let stream = JavaTokenizer::new()
            .full_tokens_with_pos("class A { int x = 1; }")
            .unwrap();
        let tokens: Vec<_> = stream
            .iter()
            .map(|(position, token)| (position.to_string(), token.text.as_str(), token.kind.as_str()))
            .collect();
        assert_eq!(
            tokens,
            vec![
                ("^".to_string(), "<SENTENCE_START>", "<SENTENCE_START>"),
                ("0".to_string(), "class", "KEYWORD"),
                ("6".to_string(), "A", "IDENTIFIER"),
                ("8".to_string(), "{", "DELIMITER"),
                ("10".to_string(), "int", "KEYWORD"),
                ("14".to_string(), "x", "IDENTIFIER"),
                ("16".to_string(), "=", "OPERATOR"),
                ("18".to_string(), "1", "LITERAL"),
                ("19".to_string(), ";", "DELIMITER"),
                ("21".to_string(), "}", "DELIMITER"),
                ("$".to_string(), "<SENTENCE_END>", "<SENTENCE_END>"),
            ]
        );
    }

    #[test]
    fn test_longest_operator() {
        assert_eq!(
            texts(&JavaTokenizer::new(), "a >>>= b -> c::d"),
            vec!["<SENTENCE_START>", "a", ">>>=", "b", "->", "c", "::", "d", "<SENTENCE_END>"]
        );
    }

    #[test]
    fn test_hex_literal_followed_by_sign() {
        assert_eq!(
            texts(&JavaTokenizer::new(), "y = 0xE-1 + 2e-3;"),
            vec!["<SENTENCE_START>", "y", "=", "0xE", "-", "1", "+", "2e-3", ";", "<SENTENCE_END>"]
        );
    }

    #[test]
    fn test_literal_words_and_dollar() {
        let stream = JavaTokenizer::new().full_tokens_with_pos("$a = null;").unwrap();
        assert_eq!(stream[&Position::Offset(0)], Token::new("$a", "IDENTIFIER"));
        assert_eq!(stream[&Position::Offset(5)], Token::new("null", "LITERAL"));
    }

    #[test]
    fn test_comments_dropped_by_default() {
        let code = "int a; // trailing\n/* block */ int b;";
        assert!(!texts(&JavaTokenizer::new(), code)
            .iter()
            .any(|t| t.contains("trailing")));
        let with_comments = texts(&JavaTokenizer::new().with_comments(true), code);
        assert!(with_comments.contains(&"// trailing".to_string()));
        assert!(with_comments.contains(&"/* block */".to_string()));
    }

    #[test]
    fn test_sanitized_text() {
        assert_eq!(sanitize("'\\\\'"), "'|'");
        assert_eq!(sanitize("\"a\\nb\""), "\"a|nb\"");
        assert_eq!(sanitize("/* a\n\tb */"), "/* a  b */");

        let tokens = texts(&JavaTokenizer::new(), "s = \"\"\"\n  x\n\"\"\";");
        assert_eq!(tokens[3], "\"\"\"   x \"\"\"");
    }

    #[test]
    fn test_whitespace_mode() {
        let stream = JavaTokenizer::whitespace()
            .full_tokens_with_pos("a \t\nb")
            .unwrap();
        assert_eq!(stream[&Position::Offset(1)], Token::new("WS_stn", "WHITESPACE"));
        assert_eq!(stream[&Position::Offset(4)], Token::new("b", "IDENTIFIER"));
    }

    #[test]
    fn test_empty_buffer_has_only_sentinels() {
        let stream = JavaTokenizer::new().full_tokens_with_pos("").unwrap();
        assert_eq!(stream.len(), 2);
        let stream = JavaTokenizer::new().full_tokens_with_pos("  \n ").unwrap();
        assert_eq!(stream.len(), 2);
    }

    #[test]
    fn test_unterminated_string_fails() {
        assert!(JavaTokenizer::new()
            .full_tokens_with_pos("String s = \"open;\n")
            .is_err());
    }

    #[test]
    fn test_token_from_str() {
        let tokenizer = JavaTokenizer::new();
        assert_eq!(
            tokenizer.token_from_str("  foo bar").unwrap(),
            Token::new("foo", "IDENTIFIER")
        );
        assert_eq!(
            tokenizer.token_from_str("<SENTENCE_END>").unwrap(),
            Token::sentence_end()
        );
        assert!(tokenizer.token_from_str("   ").is_err());
    }

    #[test]
    fn test_file_filter() {
        let tokenizer = JavaTokenizer::new();
        assert!(tokenizer.file_filter().matches(std::path::Path::new("a/B.java")));
        assert!(!tokenizer.file_filter().matches(std::path::Path::new("a/B.javax")));
        assert_eq!(tokenizer.identifier_kind(), "IDENTIFIER");
    }
}
