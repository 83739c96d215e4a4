use regex::Regex;
use tracing::trace;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::comparison::values_equal,
            core::{Context, EvalResult},
        },
        value::core::Value,
    },
};

/// Whether `needle` equals any element of `haystack`. A scalar haystack is a
/// one-element sequence.
#[must_use]
pub fn contains_value(haystack: &Value, needle: &Value) -> bool {
    match haystack.elements() {
        Some(elements) => elements.iter().any(|element| values_equal(element, needle)),
        None => values_equal(haystack, needle),
    }
}

/// Translates a `like` pattern into an anchored regular expression.
///
/// - `%` matches any run of characters.
/// - `_` matches exactly one character.
/// - `#` matches one decimal digit.
/// - `[abc]` matches one listed character and `[^abc]` any other one.
///
/// Every other character matches itself.
///
/// # Example
/// ```
/// use uro::interpreter::evaluator::binary::membership::like_to_regex;
///
/// assert_eq!(like_to_regex("a%.txt"), r"(?s)^a.*\.txt$");
/// assert_eq!(like_to_regex("[^ab]_#"), r"(?s)^[^ab].[0-9]$");
/// ```
#[must_use]
pub fn like_to_regex(pattern: &str) -> String {
    let chars = pattern.chars().collect::<Vec<_>>();
    let mut regex = String::from("(?s)^");
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '%' => regex.push_str(".*"),
            '_' => regex.push('.'),
            '#' => regex.push_str("[0-9]"),
            '[' => {
                if let Some(offset) = chars[i + 1..].iter().skip(1).position(|&c| c == ']') {
                    let close = i + 2 + offset;
                    regex.push('[');
                    for (j, &c) in chars[i + 1..close].iter().enumerate() {
                        if matches!(c, '\\' | '[' | '&' | '~') || (c == '^' && j > 0) {
                            regex.push('\\');
                        }
                        regex.push(c);
                    }
                    regex.push(']');
                    i = close;
                } else {
                    regex.push_str(r"\[");
                }
            },
            c => regex.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
        i += 1;
    }

    regex.push('$');
    regex
}

impl Context<'_> {
    /// Evaluates `text like pattern`.
    ///
    /// Compiled patterns are kept for the rest of the program, so a pattern
    /// inside a loop or a `where` stage is compiled once.
    ///
    /// # Errors
    /// `InvalidArgument` when the pattern cannot be compiled.
    pub(crate) fn eval_like(&mut self, text: &Value, pattern: &Value, line: usize) -> EvalResult<bool> {
        let text = text.as_text(line)?;
        let pattern = pattern.as_text(line)?;

        if let Some(regex) = self.patterns.get(&pattern) {
            return Ok(regex.is_match(&text));
        }

        let source = like_to_regex(&pattern);
        trace!(%pattern, regex = %source, "compiling like pattern");
        let regex = Regex::new(&source).map_err(|e| {
                                            RuntimeError::InvalidArgument {
                                                details: format!("bad pattern '{pattern}': {e}"),
                                                line,
                                            }
                                        })?;
        let matched = regex.is_match(&text);
        self.patterns.insert(pattern, regex);
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn like(text: &str, pattern: &str) -> bool {
        Regex::new(&like_to_regex(pattern)).unwrap().is_match(text)
    }

    #[test]
    fn wildcards_match() {
        assert!(like("ex_12.txt", "ex%"));
        assert!(like("ex_12.txt", "ex___.txt"));
        assert!(like("ex_12.txt", "ex_##.txt"));
        assert!(!like("ex_1a.txt", "ex_##.txt"));
    }

    #[test]
    fn classes_match_one_character() {
        assert!(like("cat", "[bc]at"));
        assert!(!like("rat", "[bc]at"));
        assert!(like("rat", "[^bc]at"));
    }

    #[test]
    fn regex_characters_are_literal() {
        assert!(like("a.b", "a.b"));
        assert!(!like("axb", "a.b"));
        assert!(like("(x)", "(_)"));
        assert!(like("[", "["));
    }

    #[test]
    fn membership_checks_every_element() {
        let list = Value::list(vec![1.into(), 2.into()]);
        assert!(contains_value(&list, &Value::from("2")));
        assert!(!contains_value(&list, &Value::from(3)));
    }
}
