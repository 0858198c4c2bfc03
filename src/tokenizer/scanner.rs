//! # Scanner driver
//!
//! Runs a language's lexeme parser repeatedly over a buffer and records the
//! byte span, line and column of every lexeme.
//!
//! ## Failure modes
//!
//! * A lexeme parser returning `nom::Err::Error` means "nothing matches here".
//!   The scanner emits the offending character as an [`TokenKind::Unknown`]
//!   lexeme, logs a warning and carries on.
//! * A lexeme parser returning `nom::Err::Failure` (produced by `cut` after an
//!   opening quote or `/*`) means the construct started but never ended. That
//!   aborts the scan with [`TokenizerError::ParseError`].

use std::fmt;

use nom::{error::VerboseError, IResult};
use thiserror::Error;

use crate::token::TokenKind;

pub type ParserResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

pub type TokenizerResult<T> = Result<T, TokenizerError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenizerError {
    #[error("Parse error: {message} at position {span}")]
    ParseError {
        message: String,
        found: String,
        span: Span,
    },
    #[error("No token found in {input:?}")]
    NoToken { input: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line: {}, column: {}, start: {}, end: {}",
            self.line, self.column, self.start, self.end
        )
    }
}

/// One lexeme as seen by the scanner, borrowing its text from the buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSpan<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone)]
pub struct Scanner {
    current_position: usize,
    current_line: usize,
    current_column: usize,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            current_position: 0,
            current_line: 1,   // 1-based
            current_column: 1, // 1-based
        }
    }

    #[tracing::instrument(level = "debug", skip(self, input, lexeme))]
    pub fn scan<'a, F>(&mut self, input: &'a str, mut lexeme: F) -> TokenizerResult<Vec<TokenSpan<'a>>>
    where
        F: FnMut(&'a str) -> ParserResult<'a, TokenKind>,
    {
        let mut tokens = Vec::new();
        let mut remaining = input;

        while !remaining.is_empty() {
            let start_position = self.current_position;
            let start_line = self.current_line;
            let start_column = self.current_column;

            let (kind, new_remaining) = match lexeme(remaining) {
                Ok((rest, kind)) if rest.len() < remaining.len() => (kind, rest),
                Ok(_) | Err(nom::Err::Error(_)) => {
                    // Nothing matched: keep the character as an unknown token.
                    let width = remaining.chars().next().map_or(1, char::len_utf8);
                    tracing::warn!(
                        "skipping unexpected character {:?} at line {}, column {}",
                        &remaining[..width],
                        start_line,
                        start_column
                    );
                    (TokenKind::Unknown, &remaining[width..])
                }
                Err(e) => {
                    let found = remaining.chars().take(20).collect::<String>();
                    let span = Span {
                        start: self.current_position,
                        end: self.current_position + 1,
                        line: self.current_line,
                        column: self.current_column,
                    };
                    let error = match e {
                        nom::Err::Incomplete(e) => TokenizerError::ParseError {
                            message: format!("Incomplete input, {:?}", e),
                            found,
                            span,
                        },
                        nom::Err::Error(e) | nom::Err::Failure(e) => TokenizerError::ParseError {
                            message: nom::error::convert_error(remaining, e),
                            found,
                            span,
                        },
                    };
                    tracing::error!("{}", error);
                    return Err(error);
                }
            };

            let consumed = &remaining[..(remaining.len() - new_remaining.len())];
            self.update_position(consumed);
            tokens.push(TokenSpan {
                kind,
                text: consumed,
                start: start_position,
                end: self.current_position,
                line: start_line,
                column: start_column,
            });
            remaining = new_remaining;
        }

        tracing::debug!("scanned {} lexemes", tokens.len());
        Ok(tokens)
    }

    fn update_position(&mut self, text: &str) {
        for c in text.chars() {
            self.current_position += c.len_utf8();
            if c == '\n' {
                self.current_line += 1;
                self.current_column = 1;
            } else {
                self.current_column += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use nom::{
        branch::alt,
        bytes::complete::{tag, take_until, take_while1},
        combinator::{cut, value},
        sequence::{preceded, terminated},
    };

    use super::*;

    fn toy_lexeme(input: &str) -> ParserResult<TokenKind> {
        alt((
            value(TokenKind::Whitespace, take_while1(|c: char| c.is_whitespace())),
            value(TokenKind::Identifier, take_while1(|c: char| c.is_alphabetic())),
            value(
                TokenKind::Comment,
                preceded(tag("/*"), cut(terminated(take_until("*/"), tag("*/")))),
            ),
        ))(input)
    }

    #[test]
    fn test_scan_with_position() {
        let tokens = Scanner::new().scan("ab\ncd", toy_lexeme).unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "ab");
        assert_eq!((tokens[0].start, tokens[0].end), (0, 2));
        assert_eq!(tokens[2].text, "cd");
        assert_eq!(tokens[2].line, 2);
        assert_eq!(tokens[2].column, 1);
        assert_eq!(tokens[2].start, 3);
    }

    #[test]
    fn test_unknown_character_is_kept() {
        let tokens = Scanner::new().scan("a€b", toy_lexeme).unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].kind, TokenKind::Unknown);
        assert_eq!(tokens[1].text, "€");
        assert_eq!(tokens[2].start, 1 + '€'.len_utf8());
    }

    #[test]
    fn test_unterminated_comment_fails() {
        let result = Scanner::new().scan("ab /* never closed", toy_lexeme);
        match result {
            Err(TokenizerError::ParseError { span, found, .. }) => {
                assert_eq!(span.start, 3);
                assert_eq!(span.column, 4);
                assert!(found.starts_with("/*"));
            }
            other => panic!("Expected ParseError, got {:?}", other),
        }
    }
}
