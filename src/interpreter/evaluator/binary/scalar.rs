use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{core::Value, number::Number, period::Period},
    },
};

/// Evaluates `*`, `/` and `%`.
///
/// Numbers follow the usual arithmetic; an exact integer division stays an
/// integer. A period can be multiplied by a whole number.
///
/// # Errors
/// - `DivisionByZero` for `/` or `%` with a zero divisor.
/// - `TypeError` for operands without a product or quotient.
///
/// # Example
/// ```
/// use uro::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::scalar::eval_scalar, value::core::Value},
/// };
///
/// let q = eval_scalar(BinaryOperator::Div, &Value::from(7), &Value::from(2), 1).unwrap();
/// assert_eq!(q, Value::from(3.5));
/// ```
pub fn eval_scalar(op: BinaryOperator,
                   left: &Value,
                   right: &Value,
                   line: usize)
                   -> EvalResult<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => numeric(op, *a, *b, line).map(Value::Number),
        (Value::Period(p), Value::Number(n)) | (Value::Number(n), Value::Period(p))
            if op == BinaryOperator::Mul =>
        {
            scale(*p, *n, line).map(Value::Period)
        },
        _ => Err(RuntimeError::TypeError { details: format!("cannot use {} on a {} and a {}",
                                                            symbol(op),
                                                            left.type_name(),
                                                            right.type_name()),
                                           line }),
    }
}

fn numeric(op: BinaryOperator, a: Number, b: Number, line: usize) -> EvalResult<Number> {
    match op {
        BinaryOperator::Mul => Ok(a.times(b)),
        BinaryOperator::Div => a.divide(b).ok_or(RuntimeError::DivisionByZero { line }),
        _ => a.remainder(b).ok_or(RuntimeError::DivisionByZero { line }),
    }
}

fn scale(period: Period, factor: Number, line: usize) -> EvalResult<Period> {
    let invalid = |details: &str| RuntimeError::InvalidArgument { details: details.to_string(),
                                                                  line };

    let factor = factor.as_integer()
                       .ok_or_else(|| invalid("a period can only be scaled by a whole number"))?;
    period.checked_scale(factor)
          .ok_or_else(|| invalid("period is too long"))
}

const fn symbol(op: BinaryOperator) -> &'static str {
    match op {
        BinaryOperator::Mul => "*",
        BinaryOperator::Div => "/",
        _ => "%",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::value::period::PeriodUnit;

    #[test]
    fn scales_periods() {
        let week = Value::Period(Period::of(1, PeriodUnit::Week));
        let result = eval_scalar(BinaryOperator::Mul, &Value::from(3), &week, 1).unwrap();
        assert_eq!(result.to_string(), "3 weeks");
    }

    #[test]
    fn rejects_division_by_zero() {
        let err = eval_scalar(BinaryOperator::Mod, &Value::from(3), &Value::from(0), 2);
        assert!(matches!(err, Err(RuntimeError::DivisionByZero { line: 2 })));
    }

    #[test]
    fn rejects_text_operands() {
        let err = eval_scalar(BinaryOperator::Mul, &Value::from("a"), &Value::from(2), 1);
        assert!(matches!(err, Err(RuntimeError::TypeError { .. })));
    }
}
