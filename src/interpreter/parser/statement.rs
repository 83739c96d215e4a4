use std::iter::Peekable;

use crate::{
    ast::{AssignTarget, BinaryOperator, OnConflict, Statement, Verb},
    error::ParseError,
    interpreter::{
        evaluator::utils::is_reserved_identifier,
        lexer::Token,
        parser::{
            binary::parse_logical_or,
            block::parse_block,
            core::{ParseResult, parse_expression},
            unary::parse_field_name,
            utils::{current_line, expect_token, skip_newlines, starts_expression},
        },
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - `print` with an optional expression.
/// - `if`, `while` or `inside` with their blocks.
/// - a bare block `{ ... }`.
/// - a filesystem command, optionally preceded by `force` or `stack`.
/// - `break`, `continue`, `exit` or `error`.
/// - an assignment, compound assignment or increment.
/// - an expression, optionally followed by `times { ... }` or by a block that
///   is applied to each of its elements.
///
/// The statement's source line is taken from the next available token.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = current_line(tokens);

    match tokens.peek() {
        Some((Token::Print, _)) => {
            tokens.next();
            let value = match tokens.peek() {
                Some((token, _)) if starts_expression(token) => Some(parse_expression(tokens)?),
                _ => None,
            };
            Ok(Statement::Print { value, line })
        },
        Some((Token::If, _)) => parse_if(tokens, line),
        Some((Token::While, _)) => {
            tokens.next();
            let condition = parse_logical_or(tokens)?;
            let body = parse_block(tokens)?;
            Ok(Statement::While { condition,
                                  body,
                                  line })
        },
        Some((Token::Inside, _)) => {
            tokens.next();
            let target = parse_expression(tokens)?;
            let body = parse_block(tokens)?;
            Ok(Statement::Inside { target,
                                   body,
                                   line })
        },
        Some((Token::LBrace, _)) => {
            let body = parse_block(tokens)?;
            Ok(Statement::Block { body, line })
        },
        Some((Token::Break, _)) => {
            tokens.next();
            Ok(Statement::Break { line })
        },
        Some((Token::Continue, _)) => {
            tokens.next();
            Ok(Statement::Continue { line })
        },
        Some((Token::Exit, _)) => {
            tokens.next();
            Ok(Statement::Exit { line })
        },
        Some((Token::Fail, _)) => {
            tokens.next();
            Ok(Statement::Error { line })
        },
        Some((prefix @ (Token::Force | Token::Stack), _)) => {
            let conflict = if *prefix == Token::Force {
                OnConflict::Overwrite
            } else {
                OnConflict::Stack
            };
            tokens.next();
            match tokens.peek() {
                Some((token, _)) if command_verb(token).is_some_and(Verb::resolves_conflicts) => {
                    parse_command(tokens, conflict, line)
                },
                Some((token, line)) => Err(ParseError::UnexpectedToken { token: format!("{token:?}"),
                                                                         line:  *line, }),
                None => Err(ParseError::UnexpectedEndOfInput { line }),
            }
        },
        Some((token, _)) if command_verb(token).is_some() => {
            parse_command(tokens, OnConflict::Refuse, line)
        },
        _ => {
            if let Some(statement) = parse_assignment(tokens, line)? {
                return Ok(statement);
            }
            parse_expression_statement(tokens, line)
        },
    }
}

/// Parses an expression statement and what may follow it.
///
/// `expr times { ... }` repeats a block, `expr { ... }` applies a block to
/// every element of `expr`; otherwise the value is printed when executed.
fn parse_expression_statement<'a, I>(tokens: &mut Peekable<I>,
                                     line: usize)
                                     -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let expr = parse_expression(tokens)?;

    match tokens.peek() {
        Some((Token::Times, _)) => {
            tokens.next();
            let body = parse_block(tokens)?;
            Ok(Statement::Times { count: expr,
                                  body,
                                  line })
        },
        Some((Token::LBrace, _)) => {
            let body = parse_block(tokens)?;
            Ok(Statement::Apply { target: expr,
                                  body,
                                  line })
        },
        _ => Ok(Statement::Expression { expr, line }),
    }
}

/// Parses `if` with any number of `else if` branches and an optional `else`.
///
/// Syntax:
/// ```text
///     if <condition> { ... }
///     else if <condition> { ... }
///     else { ... }
/// ```
/// `else` may start on a later line than the closing brace before it.
fn parse_if<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();
    let condition = parse_logical_or(tokens)?;
    let body = parse_block(tokens)?;

    let mut branches = vec![(condition, body)];
    let mut otherwise = None;

    loop {
        let mut lookahead = tokens.clone();
        skip_newlines(&mut lookahead);
        if !matches!(lookahead.peek(), Some((Token::Else, _))) {
            break;
        }

        skip_newlines(tokens);
        tokens.next();

        if let Some((Token::If, _)) = tokens.peek() {
            tokens.next();
            let condition = parse_logical_or(tokens)?;
            let body = parse_block(tokens)?;
            branches.push((condition, body));
        } else {
            otherwise = Some(parse_block(tokens)?);
            break;
        }
    }

    Ok(Statement::If { branches,
                       otherwise,
                       line })
}

/// Maps a command keyword token to its verb.
const fn command_verb(token: &Token) -> Option<Verb> {
    match token {
        Token::Create => Some(Verb::Create),
        Token::CreateFile | Token::CreateFiles => Some(Verb::CreateFile),
        Token::CreateDirectory | Token::CreateDirectories => Some(Verb::CreateDirectory),
        Token::Delete => Some(Verb::Delete),
        Token::Drop => Some(Verb::Drop),
        Token::Hide => Some(Verb::Hide),
        Token::Unhide => Some(Verb::Unhide),
        Token::Lock => Some(Verb::Lock),
        Token::Unlock => Some(Verb::Unlock),
        Token::Recreate => Some(Verb::Recreate),
        Token::Reaccess => Some(Verb::Reaccess),
        Token::Remodify => Some(Verb::Remodify),
        Token::Rechange => Some(Verb::Rechange),
        Token::Rename => Some(Verb::Rename),
        Token::Move => Some(Verb::Move),
        Token::Copy => Some(Verb::Copy),
        _ => None,
    }
}

/// Parses a filesystem command starting at its keyword.
///
/// Syntax, where `force` may also be `stack`:
/// ```text
///     [force] create|createFile|createDirectory [target]
///     delete|drop|hide|unhide|lock|unlock [target]
///     recreate|reaccess|remodify|rechange [target] to <time>
///     [force] rename [target] to <name>
///     [force] move|copy [target] to <directory> [as <name>]
/// ```
/// Without a target the command acts on `this`.
fn parse_command<'a, I>(tokens: &mut Peekable<I>,
                        conflict: OnConflict,
                        line: usize)
                        -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some(verb) = tokens.next().and_then(|(token, _)| command_verb(token)) else {
        return Err(ParseError::UnexpectedEndOfInput { line });
    };

    let target = match tokens.peek() {
        Some((token, _)) if starts_expression(token) => Some(parse_expression(tokens)?),
        _ => None,
    };

    let destination = if verb.takes_destination() {
        expect_token(tokens,
                     &Token::To,
                     |line| ParseError::ExpectedTo { verb: verb.keyword().to_string(),
                                                     line },
                     line)?;
        Some(parse_expression(tokens)?)
    } else {
        None
    };

    let new_name = match tokens.peek() {
        Some((Token::As, _)) if verb.takes_new_name() => {
            tokens.next();
            Some(parse_expression(tokens)?)
        },
        _ => None,
    };

    Ok(Statement::Command { verb,
                            target,
                            destination,
                            new_name,
                            conflict,
                            line })
}

/// Parses assignments, compound assignments and increments.
///
/// Recognized forms, where `a` is a variable:
/// ```text
///     a = expr        a += expr   a -= expr   a *= expr   a /= expr
///     a[i] = expr     a.field = expr          a.field += expr
///     a++   a--       a.field++   a.field--
/// ```
/// Returns `Ok(None)` without consuming anything when the statement is not
/// an assignment.
///
/// # Errors
/// Returns `IdentifierReserved` when assigning to a built-in name such as
/// `this` or `files`.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::Identifier(name), _)) = tokens.peek() else {
        return Ok(None);
    };

    let mut lookahead = tokens.clone();
    lookahead.next();

    let target = match lookahead.peek() {
        Some((Token::Equals
              | Token::PlusAssign
              | Token::MinusAssign
              | Token::MulAssign
              | Token::DivAssign
              | Token::PlusPlus
              | Token::MinusMinus,
              _)) => {
            tokens.next();
            AssignTarget::Variable(name.clone())
        },
        Some((Token::LBracket, _)) => {
            if !index_is_assigned(&mut lookahead) {
                return Ok(None);
            }
            tokens.next();
            tokens.next();
            let index = parse_logical_or(tokens)?;
            expect_token(tokens,
                         &Token::RBracket,
                         |line| ParseError::ExpectedClosingBracket { line },
                         line)?;
            AssignTarget::Index { name: name.clone(),
                                  index }
        },
        Some((Token::Dot, _)) => {
            lookahead.next();
            lookahead.next();
            if !matches!(lookahead.peek(),
                         Some((Token::Equals
                               | Token::PlusAssign
                               | Token::MinusAssign
                               | Token::PlusPlus
                               | Token::MinusMinus,
                               _)))
            {
                return Ok(None);
            }
            tokens.next();
            tokens.next();
            let field = parse_field_name(tokens, line)?;
            AssignTarget::Field { name: name.clone(),
                                  field }
        },
        _ => return Ok(None),
    };

    if is_reserved_identifier(name) {
        return Err(ParseError::IdentifierReserved { name: name.clone(),
                                                    line });
    }

    let statement = match tokens.next() {
        Some((Token::Equals, _)) => {
            let value = parse_expression(tokens)?;
            Statement::Assignment { target,
                                    value,
                                    line }
        },
        Some((Token::PlusPlus, _)) => Statement::Increment { target,
                                                             delta: 1,
                                                             line },
        Some((Token::MinusMinus, _)) => Statement::Increment { target,
                                                               delta: -1,
                                                               line },
        Some((token, token_line)) => {
            let op = match token {
                Token::PlusAssign => BinaryOperator::Add,
                Token::MinusAssign => BinaryOperator::Sub,
                Token::MulAssign => BinaryOperator::Mul,
                Token::DivAssign => BinaryOperator::Div,
                _ => {
                    return Err(ParseError::UnexpectedToken { token: format!("{token:?}"),
                                                             line:  *token_line, });
                },
            };
            let value = parse_expression(tokens)?;
            Statement::CompoundAssignment { target,
                                            op,
                                            value,
                                            line }
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    };

    Ok(Some(statement))
}

/// Scans past a bracketed index and reports whether `=` follows it.
fn index_is_assigned<'a, I>(lookahead: &mut Peekable<I>) -> bool
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut depth = 0usize;
    for (token, _) in lookahead.by_ref() {
        match token {
            Token::LBracket => depth += 1,
            Token::RBracket => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    break;
                }
            },
            Token::NewLine | Token::Semicolon => return false,
            _ => {},
        }
    }
    matches!(lookahead.peek(), Some((Token::Equals, _)))
}

