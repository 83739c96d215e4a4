use std::iter::Peekable;

use crate::{
    ast::Statement,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            statement::parse_statement,
            utils::{current_line, skip_newlines, skip_separators},
        },
    },
};

/// Parses a braced block of statements.
///
/// Newlines before the opening brace are allowed, so a block may start on
/// the line after its header.
///
/// Grammar: `block := "{" (statement (";" | newline)*)* "}"`
///
/// # Errors
/// Returns `ExpectedBlock` when the opening brace is missing and
/// `UnexpectedEndOfInput` when the block is never closed.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    skip_newlines(tokens);
    let line = current_line(tokens);

    match tokens.next() {
        Some((Token::LBrace, _)) => {},
        Some((_, line)) => return Err(ParseError::ExpectedBlock { line: *line }),
        None => return Err(ParseError::ExpectedBlock { line }),
    }

    let mut body = Vec::new();
    loop {
        skip_separators(tokens);
        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                break;
            },
            Some(_) => body.push(parse_statement(tokens)?),
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }
    Ok(body)
}
