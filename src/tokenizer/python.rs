//! # Python Tokenizer
//!
//! Python layout is significant at line ends, so the stream keeps one
//! `NEWLINE` token (text `<NEWLINE>`) for every line break that ends a logical
//! line. A break inside brackets, after a backslash continuation, or after a
//! line holding nothing but blanks and comments produces no token, and there is
//! no synthetic break at end of input.
//!
//! Indentation is not represented: `INDENT`/`DEDENT` markers would have to
//! share the position of the first token on the line.
//!
//! A triple-quoted string that opens a logical line is reported as
//! `DOCSTRING`; anywhere else it is an ordinary `LITERAL`.

use lazy_static::lazy_static;
use nom::{
    branch::alt,
    character::complete::char,
    combinator::{map, recognize, value},
    error::context,
    sequence::pair,
};

use super::{
    comment::parse_hash_comment,
    literal::{parse_number, parse_python_string},
    scanner::{ParserResult, Scanner, TokenSpan},
    stream_from,
    symbol::{parse_punctuator, parse_word, Vocabulary},
    whitespace::{parse_newline, parse_whitespace},
    FileFilter, Tokenizer,
};
use crate::{
    error::Result,
    token::{Token, TokenKind, TokenStream},
};

lazy_static! {
    static ref PYTHON_FILES: FileFilter = FileFilter::new(r".*\.py$").unwrap();
}

/// Text of the logical line break token.
pub const NEWLINE_TEXT: &str = "<NEWLINE>";

const PYTHON: Vocabulary = Vocabulary {
    keywords: &[
        "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
        "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in",
        "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while",
        "with", "yield",
    ],
    literals: &["False", "None", "True"],
    extra: &[],
};

const OPERATORS: &[&str] = &[
    "**=", "//=", ">>=", "<<=", "...", "->", ":=", "**", "//", "<<", ">>", "<=", ">=", "==",
    "!=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "@=", "(", ")", "{", "}", "[", "]",
    ";", ",", ".", "+", "-", "*", "/", "%", "@", "&", "|", "^", "~", "<", ">", "=", ":",
];

fn python_word(input: &str) -> ParserResult<TokenKind> {
    parse_word(input, &PYTHON)
}

fn python_operator(input: &str) -> ParserResult<TokenKind> {
    parse_punctuator(input, OPERATORS)
}

/// A backslash joining two physical lines.
fn parse_continuation(input: &str) -> ParserResult<TokenKind> {
    value(
        TokenKind::Whitespace,
        recognize(pair(char('\\'), parse_newline)),
    )(input)
}

/// Triple-quoted strings come back as [`TokenKind::Docstring`]; the caller
/// demotes them when they don't open a logical line.
fn parse_string(input: &str) -> ParserResult<TokenKind> {
    map(parse_python_string, |(_, triple)| {
        if triple {
            TokenKind::Docstring
        } else {
            TokenKind::Literal
        }
    })(input)
}

fn lexeme(input: &str) -> ParserResult<TokenKind> {
    context(
        "python token",
        alt((
            parse_whitespace,
            parse_newline,
            parse_continuation,
            parse_hash_comment,
            parse_string,
            parse_number,
            python_word,
            python_operator,
        )),
    )(input)
}

/// Tracks bracket depth and whether the current logical line has produced
/// a token yet.
#[derive(Debug, Default)]
struct LineState {
    depth: usize,
    has_content: bool,
}

impl LineState {
    fn layout(&mut self, span: &TokenSpan<'_>, tokenize_comments: bool) -> Option<Token> {
        match span.kind {
            TokenKind::Whitespace => None,
            TokenKind::Comment => {
                tokenize_comments.then(|| Token::new(span.text, span.kind))
            }
            TokenKind::Newline => {
                if self.depth == 0 && self.has_content {
                    self.has_content = false;
                    Some(Token::new(NEWLINE_TEXT, TokenKind::Newline))
                } else {
                    None
                }
            }
            kind => {
                match span.text {
                    "(" | "[" | "{" => self.depth += 1,
                    ")" | "]" | "}" => self.depth = self.depth.saturating_sub(1),
                    _ => {}
                }
                let kind = if kind == TokenKind::Docstring && self.has_content {
                    TokenKind::Literal
                } else {
                    kind
                };
                self.has_content = true;
                Some(Token::new(span.text, kind))
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PythonTokenizer {
    tokenize_comments: bool,
}

impl PythonTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comments(mut self, tokenize_comments: bool) -> Self {
        self.tokenize_comments = tokenize_comments;
        self
    }
}

impl Tokenizer for PythonTokenizer {
    fn full_tokens_with_pos(&self, code: &str) -> Result<TokenStream> {
        let spans = Scanner::new().scan(code, lexeme)?;
        let mut state = LineState::default();
        Ok(stream_from(spans.iter().filter_map(|span| {
            state
                .layout(span, self.tokenize_comments)
                .map(|token| (span.start, token))
        })))
    }

    fn file_filter(&self) -> &FileFilter {
        &PYTHON_FILES
    }

    fn identifier_kind(&self) -> &str {
        TokenKind::Identifier.name()
    }
}
