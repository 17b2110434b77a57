//! Common parser combinators for expected-value grammar

use rust_decimal::Decimal;
use std::str::FromStr;
use winnow::ascii::{Caseless, digit1, space0, space1};
use winnow::combinator::opt;
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::literal;

/// Parser input
pub(crate) type Input<'a> = &'a str;

/// Parser result
pub(crate) type PResult<T> = Result<T, ErrMode<ContextError>>;

/// Recoverable failure: lets the caller try the next rule
pub(crate) fn backtrack<T>() -> PResult<T> {
    Err(ErrMode::Backtrack(ContextError::new()))
}

/// Optional horizontal whitespace
pub(crate) fn ws<'a>(input: &mut Input<'a>) -> PResult<&'a str> {
    space0.parse_next(input)
}

/// Mandatory horizontal whitespace
pub(crate) fn ws1<'a>(input: &mut Input<'a>) -> PResult<&'a str> {
    space1.parse_next(input)
}

/// Case-insensitive keyword
pub(crate) fn keyword<'a>(
    word: &'static str,
) -> impl Parser<Input<'a>, &'a str, ErrMode<ContextError>> {
    literal(Caseless(word))
}

/// Exact punctuation or operator text
pub(crate) fn lit<'a>(text: &'static str) -> impl Parser<Input<'a>, &'a str, ErrMode<ContextError>> {
    literal(text)
}

fn digits<'a>(input: &mut Input<'a>) -> PResult<&'a str> {
    digit1.parse_next(input)
}

fn sign(input: &mut Input<'_>) -> PResult<Option<char>> {
    opt('-').parse_next(input)
}

fn fraction<'a>(input: &mut Input<'a>) -> PResult<Option<(char, &'a str)>> {
    opt(('.', digits)).parse_next(input)
}

/// Parse an unsigned whole number
pub(crate) fn unsigned(input: &mut Input<'_>) -> PResult<u32> {
    let text = digits(input)?;
    match text.parse() {
        Ok(n) => Ok(n),
        Err(_) => backtrack(),
    }
}

/// Parse a decimal number with optional sign and fraction: `-12`, `60`, `27.5`
pub(crate) fn decimal(input: &mut Input<'_>) -> PResult<Decimal> {
    let start: &str = *input;
    sign(input)?;
    digits(input)?;
    fraction(input)?;
    let consumed = &start[..start.len() - input.len()];
    match Decimal::from_str(consumed) {
        Ok(d) => Ok(d),
        Err(_) => backtrack(),
    }
}

/// Succeed only if nothing but whitespace remains
pub(crate) fn at_end(input: &mut Input<'_>) -> bool {
    ws(input).is_ok() && input.is_empty()
}
