//! # Symbol Token Handling
//!
//! Operators, delimiters, identifiers and keywords.
//!
//! ## Parsing Strategy
//!
//! Punctuators are matched longest-first against a per-language table, so
//! `>>>=` wins over `>>=`, `>>`, and `>`. Tables are listed longest entry first;
//! [`parse_punctuator`] returns the first entry the input starts with.

use nom::{
    bytes::complete::{take_while, take_while1},
    combinator::recognize,
    error::{context, ErrorKind, ParseError, VerboseError},
    sequence::pair,
};

use super::scanner::ParserResult;
use crate::token::TokenKind;

/// Structural punctuation shared by every supported language.
pub const DELIMITERS: &[&str] = &["(", ")", "{", "}", "[", "]", ";", ",", "."];

pub fn parse_punctuator<'a>(input: &'a str, table: &[&str]) -> ParserResult<'a, TokenKind> {
    match table.iter().find(|symbol| input.starts_with(**symbol)) {
        Some(symbol) => {
            let kind = if DELIMITERS.contains(symbol) {
                TokenKind::Delimiter
            } else {
                TokenKind::Operator
            };
            Ok((&input[symbol.len()..], kind))
        }
        None => Err(nom::Err::Error(VerboseError::from_error_kind(
            input,
            ErrorKind::Tag,
        ))),
    }
}

fn is_identifier_start(c: char, extra: &[char]) -> bool {
    c.is_alphabetic() || c == '_' || extra.contains(&c)
}

fn is_identifier_continue(c: char, extra: &[char]) -> bool {
    c.is_alphanumeric() || c == '_' || extra.contains(&c)
}

/// Words a language reserves, split by how they are reported.
pub struct Vocabulary {
    pub keywords: &'static [&'static str],
    /// Reserved words that denote values (`true`, `null`, `None`).
    pub literals: &'static [&'static str],
    /// Characters allowed in identifiers beyond letters, digits and `_`.
    pub extra: &'static [char],
}

/// Parses an identifier and classifies it against `vocabulary`.
pub fn parse_word<'a>(input: &'a str, vocabulary: &Vocabulary) -> ParserResult<'a, TokenKind> {
    let extra = vocabulary.extra;
    let word: ParserResult<&str> = context(
        "identifier",
        recognize(pair(
            take_while1(|c: char| is_identifier_start(c, extra)),
            take_while(|c: char| is_identifier_continue(c, extra)),
        )),
    )(input);
    let (rest, word) = word?;

    if vocabulary.literals.contains(&word) {
        return Ok((rest, TokenKind::Literal));
    }
    if vocabulary.keywords.contains(&word) {
        return Ok((rest, TokenKind::Keyword));
    }
    Ok((rest, TokenKind::Identifier))
}
