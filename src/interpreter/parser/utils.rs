use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by function argument lists and parenthesized
/// groups. It repeatedly calls `parse_item` to parse one element, expecting
/// either a comma, to continue the list, or the closing token, to end it. An
/// immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, an unexpected token is
/// encountered or the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token,
    line: usize)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    if let Some((tok, _)) = tokens.peek()
       && tok == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((tok, _)) if tok == closing => {
                tokens.next();
                break;
            },
            Some((tok, line)) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected ',' or {closing:?}, found {tok:?}"),
                                                         line:  *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }
    Ok(items)
}

/// Consumes the next token if it equals `expected`.
///
/// # Errors
/// Returns the error built by `error` with the offending line otherwise.
pub(in crate::interpreter::parser) fn expect_token<'a, I>(tokens: &mut Peekable<I>,
                                                          expected: &Token,
                                                          error: impl FnOnce(usize) -> ParseError,
                                                          line: usize)
                                                          -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((tok, _)) if tok == expected => Ok(()),
        Some((_, line)) => Err(error(*line)),
        None => Err(error(line)),
    }
}

/// Skips newlines and semicolons between statements.
pub(in crate::interpreter::parser) fn skip_separators<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, usize)>
{
    while let Some((Token::NewLine | Token::Semicolon, _)) = tokens.peek() {
        tokens.next();
    }
}

/// Skips newlines only.
pub(in crate::interpreter::parser) fn skip_newlines<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, usize)>
{
    while let Some((Token::NewLine, _)) = tokens.peek() {
        tokens.next();
    }
}

/// Line of the next token.
///
/// At the end of input this is `0`, which [`parse_program_tokens`] replaces
/// with the line of the last token.
///
/// [`parse_program_tokens`]: crate::interpreter::parser::core::parse_program_tokens
pub(in crate::interpreter::parser) fn current_line<'a, I>(tokens: &mut Peekable<I>) -> usize
    where I: Iterator<Item = &'a (Token, usize)>
{
    tokens.peek().map_or(0, |(_, l)| *l)
}

/// Whether `token` can begin an expression.
pub(in crate::interpreter::parser) const fn starts_expression(token: &Token) -> bool {
    matches!(token,
             Token::Integer(_)
             | Token::Real(_)
             | Token::Str(_)
             | Token::Bool(_)
             | Token::Identifier(_)
             | Token::LParen
             | Token::Minus
             | Token::Not)
}
