use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{access::char_count, core::EvalResult, utils::flatten_arguments},
        value::core::Value,
    },
    util::num::{count_from_i64, usize_to_i64},
};

fn text(args: &[Value], position: usize, line: usize) -> EvalResult<String> {
    args[position].as_text(line)
}

/// Number of characters in the text form of a value.
pub fn length(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::from(char_count(&text(args, 0, line)?)))
}

/// The first `n` characters.
pub fn left(args: &[Value], line: usize) -> EvalResult<Value> {
    let s = text(args, 0, line)?;
    let n = count_from_i64(args[1].as_integer(line)?);
    Ok(Value::Str(s.chars().take(n).collect()))
}

/// The last `n` characters.
pub fn right(args: &[Value], line: usize) -> EvalResult<Value> {
    let s = text(args, 0, line)?;
    let n = count_from_i64(args[1].as_integer(line)?);
    let skip = s.chars().count().saturating_sub(n);
    Ok(Value::Str(s.chars().skip(skip).collect()))
}

pub fn lower(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Str(text(args, 0, line)?.to_lowercase()))
}

pub fn upper(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Str(text(args, 0, line)?.to_uppercase()))
}

pub fn reverse(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Str(text(args, 0, line)?.chars().rev().collect()))
}

pub fn trim(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Str(text(args, 0, line)?.trim().to_string()))
}

/// Longest text, in bytes, that `repeat` builds.
const MAX_REPEATED_LENGTH: usize = 1 << 26;

/// The text repeated `n` times; nothing for `n <= 0`.
///
/// # Errors
/// Fails with `InvalidArgument` when the result would exceed 64 MiB.
pub fn repeat(args: &[Value], line: usize) -> EvalResult<Value> {
    let s = text(args, 0, line)?;
    let n = count_from_i64(args[1].as_integer(line)?);
    match s.len().checked_mul(n) {
        Some(total) if total <= MAX_REPEATED_LENGTH => Ok(Value::Str(s.repeat(n))),
        _ => Err(RuntimeError::InvalidArgument { details: format!("repeating '{s}' {n} times is too long"),
                                                 line }),
    }
}

/// `substring(s, start)` or `substring(s, start, length)`.
///
/// Positions are 0-based. A negative start counts from the end of the text.
/// Parts of the range outside the text are ignored.
///
/// # Example
/// ```
/// use uro::interpreter::{evaluator::function::string::substring, value::core::Value};
///
/// assert_eq!(substring(&["abcdef".into(), 2.into()], 1).unwrap(), Value::from("cdef"));
/// assert_eq!(substring(&["abcdef".into(), (-2).into()], 1).unwrap(), Value::from("ef"));
/// assert_eq!(substring(&["abcdef".into(), 1.into(), 3.into()], 1).unwrap(), Value::from("bcd"));
/// ```
pub fn substring(args: &[Value], line: usize) -> EvalResult<Value> {
    let chars = text(args, 0, line)?.chars().collect::<Vec<_>>();
    let length = usize_to_i64(chars.len());

    let start = args[1].as_integer(line)?;
    let start = if start < 0 { length.saturating_add(start) } else { start };
    let end = match args.get(2) {
        Some(n) => start.saturating_add(n.as_integer(line)?.max(0)),
        None => length,
    };

    let clamp = |i: i64| count_from_i64(i.clamp(0, length));
    Ok(Value::Str(chars[clamp(start)..clamp(end).max(clamp(start))].iter().collect()))
}

/// Upper-cases the first letter of every word and lower-cases the rest.
///
/// # Example
/// ```
/// use uro::interpreter::{evaluator::function::string::capitalize, value::core::Value};
///
/// assert_eq!(capitalize(&["hELLO wORLD-42x".into()], 1).unwrap(),
///            Value::from("Hello World-42X"));
/// ```
pub fn capitalize(args: &[Value], line: usize) -> EvalResult<Value> {
    let mut capitalized = String::new();
    let mut previous_letter = false;

    for c in text(args, 0, line)?.chars() {
        let letter = c.is_alphabetic();
        match (letter, previous_letter) {
            (false, _) => capitalized.push(c),
            (true, true) => capitalized.extend(c.to_lowercase()),
            (true, false) => capitalized.extend(c.to_uppercase()),
        }
        previous_letter = letter;
    }
    Ok(Value::Str(capitalized))
}

/// Joins the text of every argument; collections contribute every element.
pub fn concatenate(args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::Str(flatten_arguments(args).iter().map(ToString::to_string).collect()))
}

/// The part of the text before the first occurrence of `x`, or nothing.
pub fn before(args: &[Value], line: usize) -> EvalResult<Value> {
    let s = text(args, 0, line)?;
    let x = text(args, 1, line)?;
    let part = if x.is_empty() { "" } else { s.split_once(&x).map_or("", |(head, _)| head) };
    Ok(Value::from(part))
}

/// The part of the text after the first occurrence of `x`, or nothing.
pub fn after(args: &[Value], line: usize) -> EvalResult<Value> {
    let s = text(args, 0, line)?;
    let x = text(args, 1, line)?;
    let part = if x.is_empty() { "" } else { s.split_once(&x).map_or("", |(_, tail)| tail) };
    Ok(Value::from(part))
}

/// Only the decimal digits of the text.
pub fn digits(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Str(text(args, 0, line)?.chars().filter(char::is_ascii_digit).collect()))
}

/// Only the letters of the text.
pub fn letters(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Str(text(args, 0, line)?.chars().filter(|c| c.is_alphabetic()).collect()))
}

/// The text a value prints as.
pub fn string(args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::Str(args[0].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_and_right_clamp() {
        assert_eq!(left(&["ex_12".into(), 2.into()], 1).unwrap(), Value::from("ex"));
        assert_eq!(right(&["ex_12".into(), 1.into()], 1).unwrap(), Value::from("2"));
        assert_eq!(right(&["ab".into(), 9.into()], 1).unwrap(), Value::from("ab"));
        assert_eq!(left(&["ab".into(), (-1).into()], 1).unwrap(), Value::from(""));
    }

    #[test]
    fn splits_around_the_first_match() {
        let args = ["key=value=x".into(), "=".into()];
        assert_eq!(before(&args, 1).unwrap(), Value::from("key"));
        assert_eq!(after(&args, 1).unwrap(), Value::from("value=x"));
        assert_eq!(after(&["abc".into(), "z".into()], 1).unwrap(), Value::from(""));
    }

    #[test]
    fn substring_ignores_out_of_range_parts() {
        assert_eq!(substring(&["abc".into(), 5.into()], 1).unwrap(), Value::from(""));
        assert_eq!(substring(&["abc".into(), (-9).into(), 2.into()], 1).unwrap(), Value::from(""));
    }

    #[test]
    fn repeat_refuses_huge_results() {
        assert_eq!(repeat(&["ab".into(), 3.into()], 1).unwrap(), Value::from("ababab"));
        assert_eq!(repeat(&["ab".into(), (-3).into()], 1).unwrap(), Value::from(""));
        assert!(matches!(repeat(&["a".into(), 99_999_999_999_i64.into()], 1),
                         Err(RuntimeError::InvalidArgument { line: 1, .. })));
        assert_eq!(repeat(&["".into(), 99_999_999_999_i64.into()], 1).unwrap(), Value::from(""));
    }

    #[test]
    fn filters_characters() {
        assert_eq!(digits(&["a1b22".into()], 1).unwrap(), Value::from("122"));
        assert_eq!(letters(&["a1b22".into()], 1).unwrap(), Value::from("ab"));
    }
}
