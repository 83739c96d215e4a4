use crate::interpreter::{
    evaluator::{binary::membership::contains_value, core::EvalResult},
    value::{core::Value, number::Number},
};

/// Builds a predicate over the text of its single argument.
macro_rules! text_predicate {
    ($(#[$doc:meta])* $name:ident, $test:expr) => {
        $(#[$doc])*
        pub fn $name(args: &[Value], line: usize) -> EvalResult<Value> {
            let text = args[0].as_text(line)?;
            let test: fn(&str) -> bool = $test;
            Ok(Value::Bool(test(&text)))
        }
    };
}

/// `contains(collection, x)` tests membership; `contains(text, sub)` tests
/// for a substring.
///
/// Every text contains the empty string, and the empty string contains
/// nothing else.
///
/// # Example
/// ```
/// use uro::interpreter::{evaluator::function::predicate::contains, value::core::Value};
///
/// assert_eq!(contains(&["abc".into(), "".into()], 1).unwrap(), Value::Bool(true));
/// assert_eq!(contains(&["".into(), "a".into()], 1).unwrap(), Value::Bool(false));
///
/// let list = Value::list(vec![1.into(), 2.into()]);
/// assert_eq!(contains(&[list, 2.into()], 1).unwrap(), Value::Bool(true));
/// ```
pub fn contains(args: &[Value], line: usize) -> EvalResult<Value> {
    if args[0].is_collection() {
        return Ok(Value::Bool(contains_value(&args[0], &args[1])));
    }
    let text = args[0].as_text(line)?;
    let sub = args[1].as_text(line)?;
    Ok(Value::Bool(text.contains(&sub)))
}

pub fn starts_with(args: &[Value], line: usize) -> EvalResult<Value> {
    let text = args[0].as_text(line)?;
    Ok(Value::Bool(text.starts_with(&args[1].as_text(line)?)))
}

pub fn ends_with(args: &[Value], line: usize) -> EvalResult<Value> {
    let text = args[0].as_text(line)?;
    Ok(Value::Bool(text.ends_with(&args[1].as_text(line)?)))
}

text_predicate!(
    /// Non-empty text of `0` and `1` only.
    is_binary,
    |s| !s.is_empty() && s.chars().all(|c| matches!(c, '0' | '1'))
);
text_predicate!(
    /// Non-empty text of decimal digits only.
    is_digit,
    |s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
);
text_predicate!(
    /// Non-empty text of hexadecimal digits only, in either case.
    is_hex,
    |s| !s.is_empty() && s.chars().all(|c| c.is_ascii_hexdigit())
);
text_predicate!(
    /// Non-empty text of letters only.
    is_letter,
    |s| !s.is_empty() && s.chars().all(char::is_alphabetic)
);
text_predicate!(
    /// Text that reads as a number, such as `-2.5`.
    is_number,
    |s| Number::parse(s).is_some()
);
text_predicate!(
    /// Text with at least one letter and no upper-case letters.
    is_lower,
    |s| s.chars().any(char::is_alphabetic) && !s.chars().any(char::is_uppercase)
);
text_predicate!(
    /// Text with at least one letter and no lower-case letters.
    is_upper,
    |s| s.chars().any(char::is_alphabetic) && !s.chars().any(char::is_lowercase)
);

#[cfg(test)]
mod tests {
    use super::*;

    fn check(predicate: fn(&[Value], usize) -> EvalResult<Value>, text: &str) -> bool {
        predicate(&[text.into()], 1).unwrap() == Value::Bool(true)
    }

    #[test]
    fn character_classes() {
        assert!(check(is_binary, "1010"));
        assert!(!check(is_binary, "102"));
        assert!(check(is_hex, "Ff09"));
        assert!(!check(is_digit, ""));
        assert!(check(is_letter, "abc"));
        assert!(check(is_number, "-2.5"));
    }

    #[test]
    fn letter_case() {
        assert!(check(is_lower, "abc 1"));
        assert!(!check(is_lower, "aBc"));
        assert!(check(is_upper, "ABC"));
        assert!(!check(is_upper, "123"));
    }

    #[test]
    fn prefixes_are_case_sensitive() {
        assert_eq!(starts_with(&["Hello".into(), "He".into()], 1).unwrap(), Value::Bool(true));
        assert_eq!(ends_with(&["Hello".into(), "LO".into()], 1).unwrap(), Value::Bool(false));
    }
}
