use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{core::Value, number::Number},
    },
};

/// Applies a rounding function to a number. Integers are returned unchanged.
///
/// `f64::round` rounds half away from zero, so `round(-2.5)` is `-3`.
///
/// # Example
/// ```
/// use uro::interpreter::{evaluator::function::number::rounded, value::core::Value};
///
/// assert_eq!(rounded(&[Value::from(-0.2)], 1, f64::floor).unwrap(), Value::from(-1));
/// assert_eq!(rounded(&[Value::from(-0.2)], 1, f64::ceil).unwrap(), Value::from(0));
/// ```
pub fn rounded(args: &[Value], line: usize, round: fn(f64) -> f64) -> EvalResult<Value> {
    Ok(Value::Number(match args[0].as_number(line)? {
        Number::Integer(i) => Number::Integer(i),
        Number::Real(r) => Number::integral(round(r)),
    }))
}

/// Absolute value.
pub fn absolute(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Number(match args[0].as_number(line)? {
        Number::Integer(i) => i.checked_abs()
                               .map_or_else(|| Number::Real(-Number::Integer(i).as_f64()),
                                            Number::Integer),
        Number::Real(r) => Number::Real(r.abs()),
    }))
}

/// `-1`, `0` or `1` depending on the sign.
pub fn sign(args: &[Value], line: usize) -> EvalResult<Value> {
    let n = args[0].as_number(line)?;
    let sign = match n {
        Number::Integer(i) => i.signum(),
        Number::Real(r) if r > 0.0 => 1,
        Number::Real(r) if r < 0.0 => -1,
        Number::Real(_) => 0,
    };
    Ok(Value::from(sign))
}

/// Square root.
///
/// # Errors
/// `InvalidArgument` for negative numbers.
pub fn sqrt(args: &[Value], line: usize) -> EvalResult<Value> {
    let x = args[0].as_number(line)?.as_f64();
    if x < 0.0 {
        return Err(RuntimeError::InvalidArgument { details: "square root of a negative number"
                                                                .to_string(),
                                                   line });
    }
    Ok(Value::Number(Number::integral(x.sqrt())))
}

/// `base` raised to `exponent`.
///
/// Integer powers with a non-negative integer exponent stay exact while they
/// fit; everything else is computed in floating point.
///
/// # Errors
/// `ExpectedNumber` when either argument is not a number, as in
/// `power(2, '4')`.
pub fn power(args: &[Value], line: usize) -> EvalResult<Value> {
    let base = args[0].as_number(line)?;
    let exponent = args[1].as_number(line)?;

    if let (Number::Integer(b), Number::Integer(e)) = (base, exponent)
       && let Ok(e) = u32::try_from(e)
       && let Some(result) = b.checked_pow(e)
    {
        return Ok(Value::from(result));
    }
    Ok(Value::Number(Number::integral(base.as_f64().powf(exponent.as_f64()))))
}

/// Converts a value to a number.
///
/// Text holding a number is parsed, booleans become `1` or `0`. Anything else
/// yields `0`.
pub fn number(args: &[Value], _line: usize) -> EvalResult<Value> {
    let n = match &args[0] {
        Value::Number(n) => *n,
        Value::Bool(b) => Number::Integer(i64::from(*b)),
        Value::Str(s) => Number::parse(s).unwrap_or(Number::Integer(0)),
        _ => Number::Integer(0),
    };
    Ok(Value::Number(n))
}

/// Parses text of digits in `radix`. Malformed or empty text yields `0`.
///
/// # Example
/// ```
/// use uro::interpreter::{evaluator::function::number::from_radix, value::core::Value};
///
/// assert_eq!(from_radix(&["1011".into()], 1, 2).unwrap(), Value::from(11));
/// assert_eq!(from_radix(&["12".into()], 1, 2).unwrap(), Value::from(0));
/// assert_eq!(from_radix(&["fF".into()], 1, 16).unwrap(), Value::from(255));
/// ```
pub fn from_radix(args: &[Value], line: usize, radix: u32) -> EvalResult<Value> {
    let text = args[0].as_text(line)?;
    let digits_only = !text.is_empty() && text.chars().all(|c| c.is_digit(radix));
    let value = if digits_only { i64::from_str_radix(&text, radix).unwrap_or(0) } else { 0 };
    Ok(Value::from(value))
}

/// Binary digits of an integer.
pub fn binary(args: &[Value], line: usize) -> EvalResult<Value> {
    let n = integer(&args[0], line)?;
    let digits = format!("{:b}", n.unsigned_abs());
    Ok(Value::Str(if n < 0 { format!("-{digits}") } else { digits }))
}

/// Lower-case hexadecimal digits of an integer.
pub fn hex(args: &[Value], line: usize) -> EvalResult<Value> {
    let n = integer(&args[0], line)?;
    let digits = format!("{:x}", n.unsigned_abs());
    Ok(Value::Str(if n < 0 { format!("-{digits}") } else { digits }))
}

fn integer(value: &Value, line: usize) -> EvalResult<i64> {
    value.as_number(line)?
         .as_integer()
         .ok_or_else(|| RuntimeError::InvalidArgument { details: "expected a whole number"
                                                                     .to_string(),
                                                        line })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(rounded(&[Value::from(2.5)], 1, f64::round).unwrap(), Value::from(3));
        assert_eq!(rounded(&[Value::from(-2.5)], 1, f64::round).unwrap(), Value::from(-3));
        assert_eq!(rounded(&[Value::from(-2.7)], 1, f64::trunc).unwrap(), Value::from(-2));
    }

    #[test]
    fn power_rejects_text() {
        assert!(matches!(power(&[2.into(), "4".into()], 3),
                         Err(RuntimeError::ExpectedNumber { line: 3 })));
        assert_eq!(power(&[2.into(), 10.into()], 1).unwrap(), Value::from(1024));
        assert_eq!(power(&[4.into(), 0.5.into()], 1).unwrap(), Value::from(2));
    }

    #[test]
    fn formats_radix_digits() {
        assert_eq!(binary(&[10.into()], 1).unwrap(), Value::from("1010"));
        assert_eq!(hex(&[(-255).into()], 1).unwrap(), Value::from("-ff"));
    }

    #[test]
    fn converts_text_to_numbers() {
        assert_eq!(number(&["12.5".into()], 1).unwrap(), Value::from(12.5));
        assert_eq!(number(&["abc".into()], 1).unwrap(), Value::from(0));
    }
}
