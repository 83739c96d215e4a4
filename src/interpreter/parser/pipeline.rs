use std::iter::Peekable;

use crate::{
    ast::{Expr, Stage},
    interpreter::{
        lexer::Token,
        parser::{
            binary::{parse_additive, parse_logical_or},
            core::ParseResult,
        },
    },
};

/// Parses the pipeline stages following `source`.
///
/// Stages apply left to right. When no stage follows, `source` is returned
/// unchanged.
///
/// Grammar:
/// ```text
/// stage := "where" logical_or
///        | "order" ("by" logical_or)? ("asc" | "desc")?
///        | ("skip" | "every" | "limit" | "final") additive
/// ```
pub fn parse_stages<'a, I>(tokens: &mut Peekable<I>, source: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = source.line();
    let mut stages = Vec::new();

    while let Some((token, _)) = tokens.peek() {
        let stage = match token {
            Token::Where => {
                tokens.next();
                Stage::Where(parse_logical_or(tokens)?)
            },
            Token::Order => {
                tokens.next();
                let key = if let Some((Token::By, _)) = tokens.peek() {
                    tokens.next();
                    Some(parse_logical_or(tokens)?)
                } else {
                    None
                };
                let descending = match tokens.peek() {
                    Some((Token::Desc, _)) => {
                        tokens.next();
                        true
                    },
                    Some((Token::Asc, _)) => {
                        tokens.next();
                        false
                    },
                    _ => false,
                };
                Stage::Order { key, descending }
            },
            Token::Skip => {
                tokens.next();
                Stage::Skip(parse_additive(tokens)?)
            },
            Token::Every => {
                tokens.next();
                Stage::Every(parse_additive(tokens)?)
            },
            Token::Limit => {
                tokens.next();
                Stage::Limit(parse_additive(tokens)?)
            },
            Token::Final => {
                tokens.next();
                Stage::Final(parse_additive(tokens)?)
            },
            _ => break,
        };
        stages.push(stage);
    }

    if stages.is_empty() {
        return Ok(source);
    }

    Ok(Expr::Pipeline { source: Box::new(source),
                        stages,
                        line })
}
