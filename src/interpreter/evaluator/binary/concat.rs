use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{core::Value, period::Period, time::Time},
    },
};

/// Accumulator of an additive chain such as `'2' + 75 days + 2 days + 5`.
///
/// Until text enters the chain every step is arithmetic. Afterwards the chain
/// keeps the text built so far as `prefix` and a pending `tail` that later
/// operands may still combine with arithmetically. An operand that cannot
/// combine with the tail flushes it into the prefix and becomes the new tail.
#[derive(Debug, Clone, PartialEq)]
enum Chain {
    Plain(Value),
    Text {
        prefix: String,
        tail:   Option<Value>,
    },
}

impl Chain {
    fn start(first: Value) -> Self {
        if first.is_text() {
            Self::Text { prefix: first.to_string(),
                         tail:   None, }
        } else {
            Self::Plain(first)
        }
    }

    fn push(self, op: BinaryOperator, rhs: Value, line: usize) -> EvalResult<Self> {
        match self {
            Self::Plain(acc) => {
                if rhs.is_text() {
                    if op == BinaryOperator::Sub {
                        return Err(mismatch(op, &acc, &rhs, line));
                    }
                    return Ok(Self::Text { prefix: format!("{acc}{rhs}"),
                                           tail:   None, });
                }
                match arith(&acc, op, &rhs, line)? {
                    Some(result) => Ok(Self::Plain(result)),
                    None if op == BinaryOperator::Add => Ok(Self::Text { prefix: acc.to_string(),
                                                                         tail:   Some(rhs), }),
                    None => Err(mismatch(op, &acc, &rhs, line)),
                }
            },
            Self::Text { mut prefix, tail } => {
                if rhs.is_text() {
                    if op == BinaryOperator::Sub {
                        return Err(RuntimeError::TypeError { details: "cannot subtract from text"
                                                                          .to_string(),
                                                             line });
                    }
                    if let Some(tail) = tail {
                        prefix.push_str(&tail.to_string());
                    }
                    prefix.push_str(&rhs.to_string());
                    return Ok(Self::Text { prefix, tail: None });
                }

                match tail {
                    None if op == BinaryOperator::Add => Ok(Self::Text { prefix,
                                                                         tail: Some(rhs) }),
                    None => Err(RuntimeError::TypeError { details: "cannot subtract from text"
                                                                       .to_string(),
                                                          line }),
                    Some(tail) => match arith(&tail, op, &rhs, line)? {
                        Some(result) => Ok(Self::Text { prefix,
                                                        tail: Some(result) }),
                        None if op == BinaryOperator::Add => {
                            prefix.push_str(&tail.to_string());
                            Ok(Self::Text { prefix,
                                            tail: Some(rhs) })
                        },
                        None => Err(mismatch(op, &tail, &rhs, line)),
                    },
                }
            },
        }
    }

    fn finish(self) -> Value {
        match self {
            Self::Plain(value) => value,
            Self::Text { mut prefix, tail } => {
                if let Some(tail) = tail {
                    prefix.push_str(&tail.to_string());
                }
                Value::Str(prefix)
            },
        }
    }
}

fn mismatch(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> RuntimeError {
    let verb = if op == BinaryOperator::Sub { "subtract" } else { "add" };
    RuntimeError::TypeError { details: format!("cannot {verb} a {} and a {}",
                                               left.type_name(),
                                               right.type_name()),
                              line }
}

/// Adds or subtracts two values that have an arithmetic meaning together.
///
/// Returns `Ok(None)` when the pair has none, such as a period and a number.
///
/// # Errors
/// `TimeOutOfRange` when a time leaves the calendar, `InvalidArgument` when a
/// period overflows.
fn arith(left: &Value, op: BinaryOperator, right: &Value, line: usize) -> EvalResult<Option<Value>> {
    use BinaryOperator::{Add, Sub};

    let overflow = || RuntimeError::InvalidArgument { details: "period is too long".to_string(),
                                                      line };

    let result = match (left, op, right) {
        (Value::Number(a), Add, Value::Number(b)) => Value::Number(a.plus(*b)),
        (Value::Number(a), Sub, Value::Number(b)) => Value::Number(a.minus(*b)),
        (Value::Period(a), Add, Value::Period(b)) => {
            Value::Period(a.checked_add(*b).ok_or_else(overflow)?)
        },
        (Value::Period(a), Sub, Value::Period(b)) => {
            Value::Period(a.checked_sub(*b).ok_or_else(overflow)?)
        },
        (Value::Time(t), Add, Value::Period(p)) | (Value::Period(p), Add, Value::Time(t)) => {
            Value::Time(shifted(*t, *p, line)?)
        },
        (Value::Time(t), Sub, Value::Period(p)) => Value::Time(shifted(*t, p.negated(), line)?),
        (Value::Time(a), Sub, Value::Time(b)) => Value::Period(a.since(*b)),
        (a, Add, b) if a.is_collection() && b.is_collection() => {
            let mut elements = a.clone().into_elements();
            elements.extend(b.clone().into_elements());
            Value::list(elements)
        },
        _ => return Ok(None),
    };
    Ok(Some(result))
}

fn shifted(time: Time, period: Period, line: usize) -> EvalResult<Time> {
    time.add_period(period)
        .ok_or(RuntimeError::TimeOutOfRange { line })
}

/// Folds an additive chain from left to right.
///
/// # Example
/// ```
/// use uro::{
///     ast::BinaryOperator::Add,
///     interpreter::{evaluator::binary::concat::fold_chain, value::core::Value},
/// };
///
/// let steps = vec![(Add, Value::from(75)), (Add, Value::from(5))];
/// let result = fold_chain(Value::from("2"), steps, 1).unwrap();
/// assert_eq!(result, Value::from("280"));
/// ```
pub fn fold_chain(first: Value,
                  steps: impl IntoIterator<Item = (BinaryOperator, Value)>,
                  line: usize)
                  -> EvalResult<Value> {
    steps.into_iter()
         .try_fold(Chain::start(first), |chain, (op, rhs)| chain.push(op, rhs, line))
         .map(Chain::finish)
}

/// Sum of the elements of a collection under `+`, or `None` when the elements
/// cannot be added. An empty collection sums to `0`.
#[must_use]
pub fn fold_sum(elements: &[Value]) -> Option<Value> {
    let Some((first, rest)) = elements.split_first() else {
        return Some(Value::from(0));
    };
    fold_chain(first.clone(),
               rest.iter().map(|v| (BinaryOperator::Add, v.clone())),
               0).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::value::period::PeriodUnit;

    fn days(n: i64) -> Value {
        Value::Period(Period::of(n, PeriodUnit::Day))
    }

    fn add_all(first: Value, rest: Vec<Value>) -> Value {
        fold_chain(first, rest.into_iter().map(|v| (BinaryOperator::Add, v)), 1).unwrap()
    }

    #[test]
    fn periods_keep_combining_after_text() {
        assert_eq!(add_all("2".into(), vec![days(75), days(2), 5.into()]),
                   Value::from("277 days5"));
        assert_eq!(add_all("2".into(), vec![days(75), 5.into()]), Value::from("275 days5"));
    }

    #[test]
    fn period_and_number_concatenate() {
        assert_eq!(add_all(days(3), vec![4.into()]), Value::from("3 days4"));
    }

    #[test]
    fn text_joins_text() {
        assert_eq!(add_all("ab".into(), vec!["c".into()]), Value::from("abc"));
        assert_eq!(add_all(1.into(), vec!["a".into(), 2.into(), 3.into()]), Value::from("1a5"));
    }

    #[test]
    fn subtracting_text_fails() {
        let err = fold_chain("a".into(), vec![(BinaryOperator::Sub, Value::from("b"))], 3);
        assert!(matches!(err, Err(RuntimeError::TypeError { line: 3, .. })));
    }

    #[test]
    fn sums_collections() {
        assert_eq!(fold_sum(&[1.into(), 2.into(), 3.into()]), Some(Value::from(6)));
        assert_eq!(fold_sum(&[]), Some(Value::from(0)));
    }

    #[test]
    fn subtracting_times_yields_a_period() {
        let a = Value::Time(Time::from_calendar(2010, 6, 3).unwrap());
        let b = Value::Time(Time::from_calendar(2010, 6, 3).unwrap());
        let result = fold_chain(a, vec![(BinaryOperator::Sub, b)], 1).unwrap();
        assert_eq!(result.to_string(), "no period");
    }
}
