use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Parses `or` and `xor` expressions, which share the lowest precedence.
///
/// Both operators are left-associative: `a or b xor c` is `(a or b) xor c`.
///
/// The rule is: `logical_or := logical_and (("or" | "xor") logical_and)*`
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_logical_and(tokens)?;
    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op @ (BinaryOperator::Or | BinaryOperator::Xor)) =
               token_to_binary_operator(token)
        {
            tokens.next();
            let right = parse_logical_and(tokens)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    line: *line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses `and` expressions.
///
/// The rule is: `logical_and := logical_not ("and" logical_not)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_logical_not(tokens)?;
    while let Some((Token::And, line)) = tokens.peek() {
        tokens.next();
        let right = parse_logical_not(tokens)?;
        left = Expr::BinaryOp { left: Box::new(left),
                                op: BinaryOperator::And,
                                right: Box::new(right),
                                line: *line };
    }
    Ok(left)
}

/// Parses prefix `not`, which binds looser than comparisons:
/// `not a = b` is `not (a = b)`.
///
/// The rule is: `logical_not := "not" logical_not | comparison`
pub fn parse_logical_not<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Not, line)) = tokens.peek() {
        tokens.next();
        let expr = parse_logical_not(tokens)?;
        return Ok(Expr::UnaryOp { op:   UnaryOperator::Not,
                                  expr: Box::new(expr),
                                  line: *line, });
    }
    parse_comparison(tokens)
}

/// Parses comparisons, `in` and `like`.
///
/// Comparisons do not chain. The right side of `in` may be a comma list of
/// additive terms: `name in 'a', 'b', 'c'`.
///
/// The rule is:
/// ```text
/// comparison := additive (("=" | "!=" | "<" | "<=" | ">" | ">=" | "like") additive)?
///             | additive "in" additive ("," additive)*
/// ```
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_additive(tokens)?;

    if let Some((token, line)) = tokens.peek()
       && let Some(op) = token_to_binary_operator(token)
    {
        let right = match op {
            BinaryOperator::In => {
                tokens.next();
                parse_membership_list(tokens, *line)?
            },
            BinaryOperator::Equal
            | BinaryOperator::NotEqual
            | BinaryOperator::Less
            | BinaryOperator::LessEqual
            | BinaryOperator::Greater
            | BinaryOperator::GreaterEqual
            | BinaryOperator::Like => {
                tokens.next();
                parse_additive(tokens)?
            },
            _ => return Ok(left),
        };
        return Ok(Expr::BinaryOp { left: Box::new(left),
                                   op,
                                   right: Box::new(right),
                                   line: *line });
    }

    Ok(left)
}

/// Parses the candidates after `in`.
fn parse_membership_list<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut elements = vec![parse_additive(tokens)?];
    while let Some((Token::Comma, _)) = tokens.peek() {
        tokens.next();
        elements.push(parse_additive(tokens)?);
    }

    if elements.len() == 1 {
        return Ok(elements.remove(0));
    }
    Ok(Expr::List { elements, line })
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_multiplicative(tokens)?;
    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op @ (BinaryOperator::Add | BinaryOperator::Sub)) =
               token_to_binary_operator(token)
        {
            tokens.next();
            let right = parse_multiplicative(tokens)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    line: *line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions: `*`, `/` and `%`.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "%") unary)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_unary(tokens)?;
    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op @ (BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod)) =
               token_to_binary_operator(token)
        {
            tokens.next();
            let right = parse_unary(tokens)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    line: *line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Maps a token to the binary operator it spells, if any.
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::Equals => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::Less => Some(BinaryOperator::Less),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::In => Some(BinaryOperator::In),
        Token::Like => Some(BinaryOperator::Like),
        Token::And => Some(BinaryOperator::And),
        Token::Or => Some(BinaryOperator::Or),
        Token::Xor => Some(BinaryOperator::Xor),
        _ => None,
    }
}
