//! # Whitespace Token Handling
//!
//! Most streams drop whitespace, but whitespace-preserving tokenizers keep every
//! whitespace run as a token whose text encodes the run character by
//! character (see [`whitespace_text`]). Those tokens are ignorable: annotation
//! copies them through unchanged.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    combinator::value,
    error::context,
};

use super::scanner::ParserResult;
use crate::token::TokenKind;

/// Prefix of every whitespace token text.
pub const WHITESPACE_PREFIX: &str = "WS_";

/// Parses spaces, tabs and form feeds.
pub fn parse_whitespace(input: &str) -> ParserResult<TokenKind> {
    context(
        "whitespace expected",
        value(
            TokenKind::Whitespace,
            take_while1(|c: char| c == ' ' || c == '\t' || c == '\x0c'),
        ),
    )(input)
}

/// Parses a single line break (`\r\n`, `\n` or a lone `\r`).
pub fn parse_newline(input: &str) -> ParserResult<TokenKind> {
    context(
        "newline expected",
        value(TokenKind::Newline, alt((tag("\r\n"), tag("\n"), tag("\r")))),
    )(input)
}

/// Parses any run of whitespace, line breaks included.
///
/// C-family languages don't care where lines end, so a whole blank region
/// becomes one token.
pub fn parse_blank(input: &str) -> ParserResult<TokenKind> {
    context(
        "blank expected",
        value(TokenKind::Whitespace, take_while1(char::is_whitespace)),
    )(input)
}

/// Renders a whitespace run as `WS_` followed by one letter per character:
/// `s` space, `t` tab, `n` line feed, `r` carriage return, `f` anything else.
pub fn whitespace_text(ws: &str) -> String {
    let mut text = String::with_capacity(WHITESPACE_PREFIX.len() + ws.len());
    text.push_str(WHITESPACE_PREFIX);
    text.extend(ws.chars().map(|c| match c {
        ' ' => 's',
        '\t' => 't',
        '\n' => 'n',
        '\r' => 'r',
        _ => 'f',
    }));
    text
}
