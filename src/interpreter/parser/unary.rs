use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_logical_or,
            core::{ParseResult, parse_piped},
            literal::{parse_month_year, parse_number_literal},
            utils::{current_line, expect_token, parse_comma_separated},
        },
        value::{number::Number, time::TimeField},
    },
};

/// Parses prefix negation.
///
/// The rule is: `unary := "-" unary | postfix`
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Minus, line)) = tokens.peek() {
        tokens.next();
        let expr = parse_unary(tokens)?;
        return Ok(Expr::UnaryOp { op:   UnaryOperator::Negate,
                                  expr: Box::new(expr),
                                  line: *line, });
    }
    parse_postfix(tokens)
}

/// Parses indexing `[i]` and field access `.field` after a primary.
///
/// The rule is: `postfix := primary ("[" logical_or "]" | "." identifier)*`
pub fn parse_postfix<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut expr = parse_primary(tokens)?;
    loop {
        match tokens.peek() {
            Some((Token::LBracket, line)) => {
                let line = *line;
                tokens.next();
                let index = parse_logical_or(tokens)?;
                expect_token(tokens,
                             &Token::RBracket,
                             |line| ParseError::ExpectedClosingBracket { line },
                             line)?;
                expr = Expr::Index { target: Box::new(expr),
                                     index: Box::new(index),
                                     line };
            },
            Some((Token::Dot, line)) => {
                let line = *line;
                tokens.next();
                let field = parse_field_name(tokens, line)?;
                expr = Expr::Field { target: Box::new(expr),
                                     field,
                                     line };
            },
            _ => break,
        }
    }
    Ok(expr)
}

/// Parses the identifier after `.` as a time field.
pub(in crate::interpreter::parser) fn parse_field_name<'a, I>(tokens: &mut Peekable<I>,
                                                              line: usize)
                                                              -> ParseResult<TimeField>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Identifier(name), line)) => {
            TimeField::from_name(name).ok_or_else(|| ParseError::UnknownField { name: name.clone(),
                                                                                line: *line, })
        },
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected field name, found {tok:?}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line }),
    }
}

/// Parses a primary expression.
///
/// Primary expressions are literals, names, function calls and parenthesized
/// groups. A parenthesized group containing commas becomes a tuple.
///
/// The rule is:
/// ```text
/// primary := number_literal | string | bool | month_year
///          | identifier ("(" (piped ("," piped)*)? ")")?
///          | "(" piped ("," piped)* ")"
/// ```
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Integer(value), line)) => {
            parse_number_literal(tokens, Number::Integer(*value), *line)
        },
        Some((Token::Real(value), line)) => parse_number_literal(tokens, Number::Real(*value), *line),
        Some((Token::Str(text), line)) => Ok(Expr::Literal { value: LiteralValue::Str(text.clone()),
                                                             line:  *line, }),
        Some((Token::Bool(b), line)) => Ok(Expr::Literal { value: LiteralValue::Bool(*b),
                                                           line:  *line, }),
        Some((Token::Identifier(name), line)) => {
            if let Some(expr) = parse_month_year(tokens, name, *line)? {
                return Ok(expr);
            }
            if let Some((Token::LParen, _)) = tokens.peek() {
                tokens.next();
                let arguments = parse_comma_separated(tokens, parse_piped, &Token::RParen, *line)?;
                return Ok(Expr::FunctionCall { name: name.clone(),
                                               arguments,
                                               line: *line });
            }
            Ok(Expr::Variable { name: name.clone(),
                                line: *line, })
        },
        Some((Token::LParen, line)) => parse_grouping(tokens, *line),
        Some((tok, line)) => Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                               line:  *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { line: current_line(tokens) }),
    }
}

/// Parses the contents of `( ... )` after the opening parenthesis.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut elements = Vec::new();
    loop {
        elements.push(parse_piped(tokens)?);
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((Token::RParen, _)) => break,
            Some((_, line)) => return Err(ParseError::ExpectedClosingParen { line: *line }),
            None => return Err(ParseError::ExpectedClosingParen { line }),
        }
    }

    if elements.len() == 1 {
        return Ok(elements.remove(0));
    }
    Ok(Expr::Tuple { elements, line })
}
