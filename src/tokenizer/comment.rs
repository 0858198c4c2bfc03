use nom::{
    branch::alt,
    bytes::complete::{tag, take_until},
    character::complete::not_line_ending,
    combinator::{cut, recognize, value},
    error::context,
    sequence::{pair, preceded, terminated},
};

use super::scanner::ParserResult;
use crate::token::TokenKind;

pub fn parse_line_comment(input: &str) -> ParserResult<TokenKind> {
    context(
        "line comment",
        value(TokenKind::Comment, recognize(pair(tag("//"), not_line_ending))),
    )(input)
}

/// `/* ... */`, including `/** ... */` doc comments. Once `/*` is seen a
/// missing `*/` is a hard failure.
pub fn parse_block_comment(input: &str) -> ParserResult<TokenKind> {
    context(
        "block comment",
        value(
            TokenKind::Comment,
            recognize(preceded(tag("/*"), cut(terminated(take_until("*/"), tag("*/"))))),
        ),
    )(input)
}

pub fn parse_c_comment(input: &str) -> ParserResult<TokenKind> {
    context("comment", alt((parse_block_comment, parse_line_comment)))(input)
}

pub fn parse_hash_comment(input: &str) -> ParserResult<TokenKind> {
    context(
        "hash comment",
        value(TokenKind::Comment, recognize(pair(tag("#"), not_line_ending))),
    )(input)
}
