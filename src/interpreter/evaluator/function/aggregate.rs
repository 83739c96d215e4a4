use std::cmp::Ordering;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::comparison::compare_values,
            core::EvalResult,
            utils::{collection_argument, flatten_arguments},
        },
        value::{core::Value, number::Number, period::Period},
    },
    util::num::usize_to_i64,
};

/// Number of elements in all collection arguments.
///
/// # Errors
/// `ExpectedCollection` when an argument is a single value, as in
/// `count('hey')`.
///
/// # Example
/// ```
/// use uro::interpreter::{evaluator::function::aggregate::count, value::core::Value};
///
/// let a = Value::list(vec![1.into(), 2.into()]);
/// let b = Value::list(vec![3.into()]);
/// assert_eq!(count(&[a, b], 1).unwrap(), Value::from(3));
/// ```
pub fn count(args: &[Value], line: usize) -> EvalResult<Value> {
    let mut total = 0;
    for arg in args {
        total += collection_argument(arg, line)?.len();
    }
    Ok(Value::from(usize_to_i64(total)))
}

/// Sum of numbers, or of periods. An empty input sums to 0.
pub fn sum(args: &[Value], line: usize) -> EvalResult<Value> {
    let elements = flatten_arguments(args);

    let periods = elements.iter()
                          .map(|v| match v {
                              Value::Period(p) => Some(*p),
                              _ => None,
                          })
                          .collect::<Option<Vec<_>>>();
    if let Some(periods) = periods
       && !periods.is_empty()
    {
        let total = periods.into_iter()
                           .try_fold(Period::default(), Period::checked_add)
                           .ok_or_else(|| {
                               RuntimeError::InvalidArgument { details: "period is too long".into(),
                                                               line }
                           })?;
        return Ok(Value::Period(total));
    }

    let numbers = numbers(&elements, line)?;
    Ok(Value::Number(total(&numbers)))
}

/// Arithmetic mean. An empty input yields 0.
pub fn average(args: &[Value], line: usize) -> EvalResult<Value> {
    let numbers = numbers(&flatten_arguments(args), line)?;
    Ok(Value::Number(mean(&numbers)))
}

/// Middle value after sorting; the mean of the two middle values for an even
/// count. An empty input yields 0.
pub fn median(args: &[Value], line: usize) -> EvalResult<Value> {
    let mut numbers = numbers(&flatten_arguments(args), line)?;
    numbers.sort_by(|a, b| a.total_cmp(*b));

    let middle = numbers.len() / 2;
    let median = match numbers.len() {
        0 => Number::Integer(0),
        n if n % 2 == 1 => numbers[middle],
        _ => mean(&numbers[middle - 1..=middle]),
    };
    Ok(Value::Number(median))
}

/// Smallest element. Numbers, times, periods and strings all qualify.
pub fn min(args: &[Value], line: usize) -> EvalResult<Value> {
    extreme(args, Ordering::Less, line)
}

/// Largest element.
pub fn max(args: &[Value], line: usize) -> EvalResult<Value> {
    extreme(args, Ordering::Greater, line)
}

fn extreme(args: &[Value], wanted: Ordering, line: usize) -> EvalResult<Value> {
    let mut elements = flatten_arguments(args).into_iter();
    let Some(mut best) = elements.next() else {
        return Ok(Value::from(0));
    };

    for element in elements {
        match compare_values(&element, &best) {
            Some(ordering) if ordering == wanted => best = element,
            Some(_) => {},
            None => {
                let details = format!("cannot compare a {} and a {}",
                                      element.type_name(),
                                      best.type_name());
                return Err(RuntimeError::TypeError { details, line });
            },
        }
    }
    Ok(best)
}

/// Numeric values of the elements. Strings holding a number count as that
/// number.
fn numbers(elements: &[Value], line: usize) -> EvalResult<Vec<Number>> {
    elements.iter()
            .map(|element| match element {
                Value::Number(n) => Ok(*n),
                Value::Str(s) => Number::parse(s).ok_or(RuntimeError::ExpectedNumber { line }),
                _ => Err(RuntimeError::ExpectedNumber { line }),
            })
            .collect()
}

fn total(numbers: &[Number]) -> Number {
    numbers.iter().copied().fold(Number::Integer(0), Number::plus)
}

fn mean(numbers: &[Number]) -> Number {
    let count = Number::Integer(usize_to_i64(numbers.len()));
    total(numbers).divide(count).unwrap_or(Number::Integer(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(values: &[i64]) -> Value {
        Value::list(values.iter().map(|&v| v.into()).collect())
    }

    #[test]
    fn aggregates_span_every_argument() {
        let args = [list(&[1, 2]), list(&[3, 4, 5])];
        assert_eq!(sum(&args, 1).unwrap(), Value::from(15));
        assert_eq!(average(&args, 1).unwrap(), Value::from(3));
        assert_eq!(median(&args, 1).unwrap(), Value::from(3));
        assert_eq!(max(&args, 1).unwrap(), Value::from(5));
    }

    #[test]
    fn even_medians_average_the_middle() {
        assert_eq!(median(&[list(&[4, 1, 2, 3])], 1).unwrap(), Value::from(2.5));
    }

    #[test]
    fn empty_inputs_yield_zero() {
        let empty = Value::list(Vec::new());
        assert_eq!(sum(&[empty.clone()], 1).unwrap(), Value::from(0));
        assert_eq!(average(&[empty.clone()], 1).unwrap(), Value::from(0));
        assert_eq!(min(&[empty], 1).unwrap(), Value::from(0));
    }

    #[test]
    fn count_needs_collections() {
        assert!(matches!(count(&["hey".into()], 2),
                         Err(RuntimeError::ExpectedCollection { line: 2 })));
    }

    #[test]
    fn min_compares_text() {
        let words = Value::list(vec!["pear".into(), "apple".into()]);
        assert_eq!(min(&[words], 1).unwrap(), Value::from("apple"));
    }
}
