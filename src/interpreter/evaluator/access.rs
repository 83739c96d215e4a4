use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, Scope},
        value::{core::Value, time::TimeField},
    },
    util::num::usize_to_i64,
};

/// The character at a 0-based position, or `None` when out of range.
pub(crate) fn char_at(text: &str, index: i64) -> Option<String> {
    let index = usize::try_from(index).ok()?;
    text.chars().nth(index).map(String::from)
}

/// Replaces the character at a 0-based position with `replacement`.
///
/// The replacement may be empty or longer than one character. An
/// out-of-range position leaves the text unchanged.
///
/// # Example
/// ```
/// use uro::interpreter::evaluator::access::replace_char;
///
/// assert_eq!(replace_char("true", 1, "234"), "t234ue");
/// assert_eq!(replace_char("true", 1, ""), "tue");
/// assert_eq!(replace_char("true", 9, "x"), "true");
/// ```
#[must_use]
pub fn replace_char(text: &str, index: i64, replacement: &str) -> String {
    let Ok(position) = usize::try_from(index) else {
        return text.to_string();
    };
    if position >= text.chars().count() {
        return text.to_string();
    }

    text.chars()
        .enumerate()
        .fold(String::with_capacity(text.len() + replacement.len()), |mut out, (i, c)| {
            if i == position {
                out.push_str(replacement);
            } else {
                out.push(c);
            }
            out
        })
}

impl Context<'_> {
    /// Evaluates `target[index]`.
    ///
    /// Strings and file entries yield one character, or the empty string when
    /// the position is out of range. Collections yield one element.
    ///
    /// # Errors
    /// - `ExpectedNumber` if the index is not a number.
    /// - `IndexOutOfBounds` for a collection position outside the elements.
    /// - `TypeError` for other targets.
    pub(crate) fn eval_index(&mut self,
                             target: &Expr,
                             index: &Expr,
                             scope: &Scope,
                             line: usize)
                             -> EvalResult<Value> {
        let target = self.eval(target, scope)?;
        let index = self.eval(index, scope)?.as_integer(line)?;

        if let Some(elements) = target.elements() {
            return usize::try_from(index).ok()
                                         .and_then(|i| elements.get(i))
                                         .cloned()
                                         .ok_or(RuntimeError::IndexOutOfBounds { length: elements.len(),
                                                                                 found: index,
                                                                                 line });
        }

        match &target {
            Value::Str(_) | Value::File(_) => {
                Ok(Value::Str(char_at(&target.to_string(), index).unwrap_or_default()))
            },
            other => Err(RuntimeError::TypeError { details: format!("cannot index a {}",
                                                                    other.type_name()),
                                                   line }),
        }
    }

    /// Evaluates `target.field` on a time.
    ///
    /// # Errors
    /// `ExpectedTime` when the target is not a time.
    pub(crate) fn eval_field(&mut self,
                             target: &Expr,
                             field: TimeField,
                             scope: &Scope,
                             line: usize)
                             -> EvalResult<Value> {
        let time = self.eval(target, scope)?.as_time(line)?;

        Ok(match time.field(field) {
            Some(value) => Value::from(value),
            None => Value::Time(time.date_only()),
        })
    }
}

/// Length of a text in characters.
pub(crate) fn char_count(text: &str) -> i64 {
    usize_to_i64(text.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_characters_by_position() {
        assert_eq!(char_at("ex_12", 3).as_deref(), Some("1"));
        assert_eq!(char_at("ex_12", 5), None);
        assert_eq!(char_at("ex_12", -1), None);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(char_count("żółw"), 4);
    }
}
