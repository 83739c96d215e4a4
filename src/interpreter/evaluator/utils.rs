use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Names the language defines itself. They can be read anywhere but never
/// assigned to.
const RESERVED_IDENTIFIERS: &[&str] = &["this",
                                        "index",
                                        "location",
                                        "success",
                                        "files",
                                        "directories",
                                        "recursivefiles",
                                        "recursivedirectories",
                                        "now",
                                        "today",
                                        "yesterday",
                                        "tomorrow"];

/// Checks whether an identifier is a built-in variable.
///
/// The comparison ignores case, like every name lookup in the language.
///
/// # Example
/// ```
/// use uro::interpreter::evaluator::utils::is_reserved_identifier;
///
/// assert!(is_reserved_identifier("Files"));
/// assert!(!is_reserved_identifier("total"));
/// ```
#[must_use]
pub fn is_reserved_identifier(name: &str) -> bool {
    let lower = name.to_lowercase();
    RESERVED_IDENTIFIERS.contains(&lower.as_str())
}

/// Checks the number of arguments passed to a built-in.
///
/// # Errors
/// Returns `ArgumentCountMismatch` naming `name` when the count differs.
pub fn check_arity(name: &str, args: &[Value], expected: usize, line: usize) -> EvalResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                  line })
    }
}

/// Flattens the arguments of an aggregate into one sequence of elements.
///
/// Each argument may be a scalar or a collection; collections contribute their
/// elements in order.
#[must_use]
pub fn flatten_arguments(args: &[Value]) -> Vec<Value> {
    args.iter()
        .flat_map(|arg| match arg.elements() {
            Some(elements) => elements.to_vec(),
            None => vec![arg.clone()],
        })
        .collect()
}

/// The elements of an argument that must be a collection.
///
/// # Errors
/// Returns `ExpectedCollection` for scalars.
pub fn collection_argument(value: &Value, line: usize) -> EvalResult<&[Value]> {
    value.elements()
         .ok_or(RuntimeError::ExpectedCollection { line })
}

/// Text of an argument that must be a string or a file entry.
///
/// # Errors
/// Returns a `TypeError` for any other value.
pub fn text_argument(value: &Value, line: usize) -> EvalResult<String> {
    if value.is_text() {
        Ok(value.to_string())
    } else {
        Err(RuntimeError::TypeError { details: format!("expected text, found {}",
                                                       value.type_name()),
                                      line })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_collections_and_scalars() {
        let args = [Value::list(vec![1.into(), 2.into()]), 3.into()];
        assert_eq!(flatten_arguments(&args), vec![1.into(), 2.into(), 3.into()]);
    }

    #[test]
    fn rejects_wrong_arity() {
        let err = check_arity("first", &[], 1, 4).unwrap_err();
        assert!(matches!(err, RuntimeError::ArgumentCountMismatch { line: 4, .. }));
    }
}
