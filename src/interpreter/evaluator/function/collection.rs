use crate::interpreter::{
    evaluator::{
        core::EvalResult,
        utils::{collection_argument, text_argument},
    },
    value::core::Value,
};

/// First element of a collection, or the empty string when it has none.
pub fn first(args: &[Value], line: usize) -> EvalResult<Value> {
    let elements = collection_argument(&args[0], line)?;
    Ok(elements.first().cloned().unwrap_or_else(|| Value::Str(String::new())))
}

/// Last element of a collection, or the empty string when it has none.
pub fn last(args: &[Value], line: usize) -> EvalResult<Value> {
    let elements = collection_argument(&args[0], line)?;
    Ok(elements.last().cloned().unwrap_or_else(|| Value::Str(String::new())))
}

/// Whether a collection has any elements at all. The values of the elements
/// do not matter.
///
/// # Example
/// ```
/// use uro::interpreter::{evaluator::function::collection::any, value::core::Value};
///
/// let falses = Value::list(vec![false.into()]);
/// assert_eq!(any(&[falses], 1).unwrap(), Value::Bool(true));
/// assert_eq!(any(&[Value::list(Vec::new())], 1).unwrap(), Value::Bool(false));
/// ```
pub fn any(args: &[Value], line: usize) -> EvalResult<Value> {
    let elements = collection_argument(&args[0], line)?;
    Ok(Value::Bool(!elements.is_empty()))
}

/// Renders the elements of a collection joined by a separator.
pub fn join(args: &[Value], line: usize) -> EvalResult<Value> {
    let separator = args[1].as_text(line)?;
    let joined = args[0].clone()
                        .into_elements()
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(&separator);
    Ok(Value::Str(joined))
}

/// Splits text at every occurrence of a separator.
///
/// An empty separator splits the text into characters.
pub fn split(args: &[Value], line: usize) -> EvalResult<Value> {
    let text = text_argument(&args[0], line)?;
    let separator = args[1].as_text(line)?;

    let parts = if separator.is_empty() {
        text.chars().map(|c| Value::Str(c.to_string())).collect()
    } else {
        text.split(separator.as_str())
            .map(|part| Value::Str(part.to_string()))
            .collect()
    };
    Ok(Value::list(parts))
}
