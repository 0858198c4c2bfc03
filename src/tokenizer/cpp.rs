//! # C/C++ Tokenizer
//!
//! Handles C and C++ alike. A preprocessor directive is one token from its
//! `#` to the end of the logical line (backslash continuations included), but
//! only when the `#` is the first non-blank character of a line; elsewhere `#`
//! and `##` are operators.
//!
//! Besides the plain stream the tokenizer has two alternate renderings:
//!
//! * whitespace mode keeps blank runs as `WS_...` tokens,
//! * type mode replaces identifiers, literals, comments and directives by
//!   their kind (`%IDENTIFIER%`, `%LITERAL%`, ...), keeping keywords and
//!   punctuation as written.

use lazy_static::lazy_static;
use nom::{
    branch::alt,
    error::{context, ErrorKind, ParseError, VerboseError},
};

use super::{
    comment::parse_c_comment,
    literal::{parse_cpp_literal, parse_number},
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
    static ref CPP_FILES: FileFilter =
        FileFilter::new(r".*\.(c|cc|cpp|cxx|h|hh|hpp)$").unwrap();
}

const CPP: Vocabulary = Vocabulary {
    keywords: &[
        "alignas", "alignof", "asm", "auto", "bool", "break", "case", "catch", "char",
        "char8_t", "char16_t", "char32_t", "class", "concept", "const", "consteval",
        "constexpr", "constinit", "const_cast", "continue", "co_await", "co_return",
        "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast", "else",
        "enum", "explicit", "export", "extern", "float", "for", "friend", "goto", "if",
        "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "operator",
        "private", "protected", "public", "register", "reinterpret_cast", "requires",
        "restrict", "return", "short", "signed", "sizeof", "static", "static_assert",
        "static_cast", "struct", "switch", "template", "this", "thread_local", "throw", "try",
        "typedef", "typeid", "typename", "union", "unsigned", "using", "virtual", "void",
        "volatile", "wchar_t", "while",
    ],
    literals: &["true", "false", "nullptr"],
    extra: &[],
};

const OPERATORS: &[&str] = &[
    "<<=", ">>=", "->*", "<=>", "...", "->", "::", ".*", "##", "++", "--", "&&", "||", "==",
    "!=", "<=", ">=", "+=", "-=", "*=", "/=", "&=", "|=", "^=", "%=", "<<", ">>", "(", ")",
    "{", "}", "[", "]", ";", ",", ".", "#", "=", ">", "<", "!", "~", "?", ":", "+", "-", "*",
    "/", "&", "|", "^", "%",
];

fn cpp_word(input: &str) -> ParserResult<TokenKind> {
    parse_word(input, &CPP)
}

fn cpp_operator(input: &str) -> ParserResult<TokenKind> {
    parse_punctuator(input, OPERATORS)
}

/// `#...` up to the first line break not escaped by a backslash.
pub fn parse_directive(input: &str) -> ParserResult<TokenKind> {
    if !input.starts_with('#') {
        return Err(nom::Err::Error(VerboseError::from_error_kind(
            input,
            ErrorKind::Char,
        )));
    }
    let mut end = input.len();
    let mut continued = false;
    for (index, c) in input.char_indices() {
        match c {
            '\n' if !continued => {
                end = index;
                break;
            }
            '\\' => continued = true,
            '\r' => {}
            _ => continued = false,
        }
    }
    let end = input[..end].trim_end_matches('\r').len();
    Ok((&input[end..], TokenKind::Preprocessor))
}

fn lexeme<'a>(code: &str, input: &'a str) -> ParserResult<'a, TokenKind> {
    let offset = code.len() - input.len();
    if input.starts_with('#') && at_line_start(code, offset) {
        return parse_directive(input);
    }
    context(
        "c++ token",
        alt((
            parse_blank,
            parse_c_comment,
            parse_cpp_literal,
            parse_number,
            cpp_word,
            cpp_operator,
        )),
    )(input)
}

/// True when only blanks precede `offset` on its line.
fn at_line_start(code: &str, offset: usize) -> bool {
    code[..offset]
        .chars()
        .rev()
        .take_while(|c| *c != '\n')
        .all(|c| c == ' ' || c == '\t')
}

#[derive(Debug, Clone, Default)]
pub struct CppTokenizer {
    tokenize_comments: bool,
    preserve_whitespace: bool,
    type_tokens: bool,
}

impl CppTokenizer {
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

    /// Renders identifiers, literals, comments and directives by kind.
    pub fn typed() -> Self {
        Self {
            type_tokens: true,
            ..Self::default()
        }
    }

    pub fn with_comments(mut self, tokenize_comments: bool) -> Self {
        self.tokenize_comments = tokenize_comments;
        self
    }

    fn render(&self, text: &str, kind: TokenKind) -> String {
        match kind {
            TokenKind::Identifier
            | TokenKind::Literal
            | TokenKind::Comment
            | TokenKind::Preprocessor
                if self.type_tokens =>
            {
                format!("%{}%", kind)
            }
            _ => text.to_string(),
        }
    }
}

impl Tokenizer for CppTokenizer {
    fn full_tokens_with_pos(&self, code: &str) -> Result<TokenStream> {
        let spans = Scanner::new().scan(code, |input| lexeme(code, input))?;
        Ok(stream_from(spans.into_iter().filter_map(|span| {
            let token = match span.kind {
                TokenKind::Whitespace if self.preserve_whitespace => {
                    Token::new(whitespace_text(span.text), span.kind)
                }
                TokenKind::Whitespace => return None,
                TokenKind::Comment if !self.tokenize_comments => return None,
                kind => Token::new(self.render(span.text, kind), kind),
            };
            Some((span.start, token))
        })))
    }

    fn file_filter(&self) -> &FileFilter {
        &CPP_FILES
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

    fn texts(tokenizer: &CppTokenizer, code: &str) -> Vec<String> {
        tokenizer.tokens(code).unwrap()[1..]
            .iter()
            .take_while(|t| t.as_str() != "<SENTENCE_END>")
            .cloned()
            .collect()
    }

    #[test]
    fn test_declaration() {
        let stream = CppTokenizer::new().full_tokens_with_pos("int x;").unwrap();
        assert_eq!(stream.len(), 5);
        assert_eq!(stream[&Position::Offset(0)], Token::new("int", "KEYWORD"));
        assert_eq!(stream[&Position::Offset(4)], Token::new("x", "IDENTIFIER"));
        assert_eq!(stream[&Position::Offset(5)], Token::new(";", "DELIMITER"));
    }

    #[test]
    fn test_directive_at_line_start() {
        let code = "#include <vector>\n  #define TWICE(x) \\\n  ((x) * 2)\nint y = a # b;";
        let stream = CppTokenizer::new().full_tokens_with_pos(code).unwrap();
        assert_eq!(
            stream[&Position::Offset(0)],
            Token::new("#include <vector>", "PREPROCESSOR")
        );
        assert_eq!(
            stream[&Position::Offset(20)],
            Token::new("#define TWICE(x) \\\n  ((x) * 2)", "PREPROCESSOR")
        );
        let hash = code.rfind('#').unwrap();
        assert_eq!(stream[&Position::Offset(hash)], Token::new("#", "OPERATOR"));
    }

    #[test]
    fn test_directive_stops_before_crlf() {
        let (rest, kind) = parse_directive("#pragma once\r\nint").unwrap();
        assert_eq!(kind, TokenKind::Preprocessor);
        assert_eq!(rest, "\r\nint");
    }

    #[test]
    fn test_operators_and_literals() {
        assert_eq!(
            texts(&CppTokenizer::new(), "p->*m <=> u8\"s\" + L'c' + nullptr"),
            vec!["p", "->*", "m", "<=>", "u8\"s\"", "+", "L'c'", "+", "nullptr"]
        );
        assert_eq!(
            texts(&CppTokenizer::new(), "auto s = R\"(a\\b)\";"),
            vec!["auto", "s", "=", "R\"(a\\b)\"", ";"]
        );
    }

    #[test]
    fn test_type_mode() {
        let code = "#include <a.h>\nint count = 42; // note\n";
        assert_eq!(
            texts(&CppTokenizer::typed().with_comments(true), code),
            vec!["%PREPROCESSOR%", "int", "%IDENTIFIER%", "=", "%LITERAL%", ";", "%COMMENT%"]
        );
    }

    #[test]
    fn test_whitespace_mode() {
        assert_eq!(
            texts(&CppTokenizer::whitespace(), "a\t=\r\n1"),
            vec!["a", "WS_t", "=", "WS_rn", "1"]
        );
    }

    #[test]
    fn test_unterminated_comment_fails() {
        assert!(CppTokenizer::new()
            .full_tokens_with_pos("int a; /* open")
            .is_err());
    }

    #[test]
    fn test_file_filter() {
        let filter = CppTokenizer::new().file_filter().clone();
        for name in ["a.c", "a.cc", "a.cpp", "a.cxx", "a.h", "a.hh", "a.hpp"] {
            assert!(filter.matches(std::path::Path::new(name)), "{}", name);
        }
        assert!(!filter.matches(std::path::Path::new("a.cs")));
    }
}
