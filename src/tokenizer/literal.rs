//! # Literal Token Handling
//!
//! Numeric and quoted literals shared by the language scanners.
//!
//! Numbers follow the preprocessing-number rule of C: a digit (or a dot
//! followed by a digit) and then any run of letters, digits, `_`, `'`, `.`,
//! with a sign allowed right after an exponent letter (`p`/`P` only in hex
//! literals). That single rule covers `0x1F`, `1_000L`, `3.5e-2f`, `0b1010`
//! and `1j` without a grammar per language.
//!
//! Once an opening quote has been consumed, a missing closing quote is a
//! `Failure`: the scanner reports it instead of backtracking into operators.

use nom::{
    branch::alt,
    bytes::complete::{escaped, is_not, tag, take_while_m_n},
    character::complete::{anychar, char},
    combinator::{cut, opt, recognize, value},
    error::{context, ErrorKind, ParseError, VerboseError},
    sequence::{pair, preceded, terminated},
};

use super::scanner::ParserResult;
use crate::token::TokenKind;

fn failure(input: &str, kind: ErrorKind) -> nom::Err<VerboseError<&str>> {
    nom::Err::Failure(VerboseError::from_error_kind(input, kind))
}

pub fn parse_number(input: &str) -> ParserResult<TokenKind> {
    let mut chars = input.char_indices().peekable();
    match chars.next() {
        Some((_, c)) if c.is_ascii_digit() => {}
        Some((_, '.')) if matches!(chars.peek(), Some((_, d)) if d.is_ascii_digit()) => {}
        _ => {
            return Err(nom::Err::Error(VerboseError::from_error_kind(
                input,
                ErrorKind::Digit,
            )))
        }
    }

    // `e` is a hex digit, so hex literals take a signed exponent only after `p`
    let hex = input.starts_with("0x") || input.starts_with("0X");
    let mut end = input.len();
    let mut previous = '\0';
    for (index, c) in input.char_indices().skip(1) {
        let exponent_sign = (c == '+' || c == '-')
            && match previous {
                'p' | 'P' => true,
                'e' | 'E' => !hex,
                _ => false,
            };
        if !(c.is_alphanumeric() || c == '_' || c == '\'' || c == '.' || exponent_sign) {
            end = index;
            break;
        }
        previous = c;
    }
    Ok((&input[end..], TokenKind::Literal))
}

pub fn parse_double_quoted(input: &str) -> ParserResult<&str> {
    context(
        "string literal",
        recognize(preceded(
            char('"'),
            cut(terminated(
                opt(escaped(is_not("\\\"\n\r"), '\\', anychar)),
                char('"'),
            )),
        )),
    )(input)
}

pub fn parse_single_quoted(input: &str) -> ParserResult<&str> {
    context(
        "character literal",
        recognize(preceded(
            char('\''),
            cut(terminated(
                opt(escaped(is_not("\\'\n\r"), '\\', anychar)),
                char('\''),
            )),
        )),
    )(input)
}

/// Parses a literal opened and closed by `delimiter` (`"""` or `'''`) that may
/// span lines. Backslash escapes are honoured so `\"""` does not close it.
pub fn parse_triple_quoted<'a>(
    delimiter: &'static str,
) -> impl FnMut(&'a str) -> ParserResult<'a, &'a str> {
    move |input: &'a str| {
        let (body, _) = tag::<_, _, VerboseError<&'a str>>(delimiter)(input)?;
        let mut escaped = false;
        for (index, c) in body.char_indices() {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if body[index..].starts_with(delimiter) {
                let end = input.len() - body.len() + index + delimiter.len();
                return Ok((&input[end..], &input[..end]));
            }
        }
        Err(failure(input, ErrorKind::TakeUntil))
    }
}

/// C++11 raw string body: `"delim( ... )delim"`, the `R` prefix already
/// consumed by the caller.
pub fn parse_raw_string_body(input: &str) -> ParserResult<&str> {
    let (after_quote, _) = char::<_, VerboseError<&str>>('"')(input)?;
    let open = match after_quote.find('(') {
        Some(open) if open <= 16 && !after_quote[..open].contains(['"', ' ', '\n']) => open,
        _ => return Err(failure(input, ErrorKind::Char)),
    };
    let closing = format!("){}\"", &after_quote[..open]);
    match after_quote[open + 1..].find(&closing) {
        Some(close) => {
            let end = 1 + open + 1 + close + closing.len();
            Ok((&input[end..], &input[..end]))
        }
        None => Err(failure(input, ErrorKind::TakeUntil)),
    }
}

/// Java text block `"""..."""`, string literal or character literal.
pub fn parse_java_literal(input: &str) -> ParserResult<TokenKind> {
    context(
        "java literal",
        value(
            TokenKind::Literal,
            alt((
                parse_triple_quoted("\"\"\""),
                parse_double_quoted,
                parse_single_quoted,
            )),
        ),
    )(input)
}

fn parse_encoding_prefix(input: &str) -> ParserResult<Option<&str>> {
    opt(alt((tag("u8"), tag("u"), tag("U"), tag("L"))))(input)
}

/// String and character literals with optional `u8`, `u`, `U`, `L` encoding
/// prefixes, and raw strings `R"(...)"` with the same prefixes.
pub fn parse_cpp_literal(input: &str) -> ParserResult<TokenKind> {
    context(
        "c++ literal",
        value(
            TokenKind::Literal,
            alt((
                recognize(pair(pair(parse_encoding_prefix, char('R')), parse_raw_string_body)),
                recognize(pair(
                    parse_encoding_prefix,
                    alt((parse_double_quoted, parse_single_quoted)),
                )),
            )),
        ),
    )(input)
}

fn is_python_prefix(c: char) -> bool {
    matches!(c, 'r' | 'R' | 'b' | 'B' | 'u' | 'U' | 'f' | 'F')
}

/// Python string literal with up to two prefix letters (`rb"..."`, `f'...'`).
/// Triple-quoted strings are reported through `triple` so callers can tell
/// docstring candidates apart.
pub fn parse_python_string(input: &str) -> ParserResult<(&str, bool)> {
    let (body, prefix) =
        take_while_m_n::<_, _, VerboseError<&str>>(0, 2, is_python_prefix)(input)?;
    let (rest, quoted) = alt((
        value(true, parse_triple_quoted("\"\"\"")),
        value(true, parse_triple_quoted("'''")),
        value(false, parse_double_quoted),
        value(false, parse_single_quoted),
    ))(body)?;
    let consumed = prefix.len() + (body.len() - rest.len());
    Ok((rest, (&input[..consumed], quoted)))
}
