use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralValue},
    error::ParseError,
    interpreter::{
        lexer::{ClockTime, Token},
        parser::core::ParseResult,
        value::{
            number::Number,
            period::{Period, PeriodUnit},
            time::{Time, month_from_name},
        },
    },
};

/// Multiplier of a byte size suffix such as `kb`.
fn size_multiplier(unit: &str) -> Option<i64> {
    match unit.to_ascii_lowercase().as_str() {
        "kb" => Some(1 << 10),
        "mb" => Some(1 << 20),
        "gb" => Some(1 << 30),
        "tb" => Some(1 << 40),
        "pb" => Some(1 << 50),
        _ => None,
    }
}

/// Parses what may follow a number literal.
///
/// The number has already been consumed. The next identifier decides the
/// meaning:
/// - a period unit: `3 days`
/// - a byte size unit: `2 mb` (powers of 1024)
/// - a month name followed by a year: `3 june 2010`, optionally followed by
///   `, 10:11` or `, 10:11:12`
///
/// Anything else leaves the plain number.
///
/// # Errors
/// Returns `InvalidLiteral` for fractional periods, impossible dates or a month
/// name without a year, and `LiteralTooLarge` when a size overflows.
pub fn parse_number_literal<'a, I>(tokens: &mut Peekable<I>,
                                   number: Number,
                                   line: usize)
                                   -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let literal = |value| Ok(Expr::Literal { value, line });

    let Some((Token::Identifier(word), _)) = tokens.peek() else {
        return literal(LiteralValue::Number(number));
    };

    if let Some(unit) = PeriodUnit::from_name(word) {
        tokens.next();
        let Number::Integer(amount) = number else {
            return Err(ParseError::InvalidLiteral { details: "periods need whole numbers".to_string(),
                                                    line });
        };
        return literal(LiteralValue::Period(Period::of(amount, unit)));
    }

    if let Some(multiplier) = size_multiplier(word) {
        tokens.next();
        let size = match number {
            Number::Integer(n) => {
                Number::Integer(n.checked_mul(multiplier)
                                 .ok_or(ParseError::LiteralTooLarge { line })?)
            },
            Number::Real(r) => Number::integral(r * Number::Integer(multiplier).as_f64()),
        };
        return literal(LiteralValue::Number(size));
    }

    if let Some(month) = month_from_name(word) {
        let Number::Integer(day) = number else {
            return literal(LiteralValue::Number(number));
        };
        tokens.next();
        let time = parse_date_rest(tokens, day, month, line)?;
        return literal(LiteralValue::Time(time));
    }

    literal(LiteralValue::Number(number))
}

/// Parses the year and optional clock of `D Month Y[, H:MM[:SS]]`.
fn parse_date_rest<'a, I>(tokens: &mut Peekable<I>,
                          day: i64,
                          month: u32,
                          line: usize)
                          -> ParseResult<Time>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::Integer(year), _)) = tokens.next() else {
        return Err(ParseError::InvalidLiteral { details: "a date needs a year".to_string(),
                                                line });
    };

    let date = u32::try_from(day).ok()
                                 .and_then(|day| Time::from_date_exact(*year, month, day))
                                 .ok_or_else(|| ParseError::InvalidLiteral {
                                     details: format!("{day} is not a day of that month"),
                                     line,
                                 })?;

    let mut lookahead = tokens.clone();
    if let Some((Token::Comma, _)) = lookahead.next()
       && let Some((Token::Clock(ClockTime { hour, minute, second }), _)) = lookahead.next()
    {
        tokens.next();
        tokens.next();
        return date.with_clock(*hour, *minute, *second)
                   .ok_or_else(|| ParseError::InvalidLiteral { details: "invalid clock".to_string(),
                                                               line });
    }

    Ok(date)
}

/// Parses `Month Y` when `name` is a month directly followed by a year.
///
/// Returns `None`, consuming nothing, when `name` is an ordinary identifier.
pub fn parse_month_year<'a, I>(tokens: &mut Peekable<I>,
                               name: &str,
                               line: usize)
                               -> ParseResult<Option<Expr>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some(month) = month_from_name(name) else {
        return Ok(None);
    };
    let Some((Token::Integer(year), _)) = tokens.peek() else {
        return Ok(None);
    };

    tokens.next();
    let time = Time::year_month(*year, month).ok_or_else(|| {
                                                 ParseError::InvalidLiteral { details: format!("year {year} is out of range"),
                                                                              line }
                                             })?;
    Ok(Some(Expr::Literal { value: LiteralValue::Time(time),
                            line }))
}
