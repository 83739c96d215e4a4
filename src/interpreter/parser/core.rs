use std::iter::Peekable;

use crate::{
    ast::{Expr, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_logical_or, pipeline::parse_stages, statement::parse_statement,
            utils::{current_line, skip_separators},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses every statement of a program.
///
/// Statements are separated by newlines or `;`. A statement that ends with a
/// closing brace may be followed directly by the next one, as in
/// `3 times { print 'a' } print 'b'`. Errors caused by a program that stops
/// too early are reported on the line of its last token.
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The statements in source order.
pub fn parse_program_tokens<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let end = tokens.clone().last().map_or(1, |(_, line)| *line);
    let mut statements = Vec::new();
    loop {
        skip_separators(tokens);
        if tokens.peek().is_none() {
            break;
        }
        statements.push(parse_statement(tokens).map_err(|error| error.at_end(end))?);
    }
    Ok(statements)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. A full expression is one or
/// more comma separated terms forming a list, optionally followed by pipeline
/// stages that apply to the whole list.
///
/// Grammar: `expression := logical_or ("," logical_or)* stage*`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = current_line(tokens);
    let mut elements = vec![parse_logical_or(tokens)?];

    while let Some((Token::Comma, _)) = tokens.peek() {
        tokens.next();
        elements.push(parse_logical_or(tokens)?);
    }

    let source = if elements.len() == 1 {
        elements.remove(0)
    } else {
        Expr::List { elements, line }
    };

    parse_stages(tokens, source)
}

/// Parses a single term with optional pipeline stages.
///
/// Used where commas belong to the surrounding construct, such as function
/// arguments: `count(files where size > 0)`.
///
/// Grammar: `piped := logical_or stage*`
pub fn parse_piped<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let source = parse_logical_or(tokens)?;
    parse_stages(tokens, source)
}
