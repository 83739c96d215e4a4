use std::{
    cmp::Ordering,
    fmt::{self, Display},
    ops::Neg,
};

use ordered_float::OrderedFloat;

use crate::util::num::{f64_to_i64_exact, format_real, i64_to_f64};

/// A numeric value.
///
/// Integers stay exact as long as the result fits in an `i64`; any overflow,
/// fractional division or real operand produces a [`Number::Real`].
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// An exact integer.
    Integer(i64),
    /// A 64-bit floating-point number.
    Real(f64),
}

impl Number {
    /// Returns the value as `f64`.
    #[must_use]
    pub const fn as_f64(self) -> f64 {
        match self {
            Self::Integer(i) => i64_to_f64(i),
            Self::Real(r) => r,
        }
    }

    /// Builds an integer from a real when it has no fractional part.
    ///
    /// # Example
    /// ```
    /// use uro::interpreter::value::number::Number;
    ///
    /// assert!(matches!(Number::integral(4.0), Number::Integer(4)));
    /// assert!(matches!(Number::integral(4.5), Number::Real(_)));
    /// ```
    #[must_use]
    pub fn integral(value: f64) -> Self {
        f64_to_i64_exact(value).map_or(Self::Real(value), Self::Integer)
    }

    /// Returns the integer value, or `None` for fractional reals.
    #[must_use]
    pub fn as_integer(self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(i),
            Self::Real(r) => f64_to_i64_exact(r),
        }
    }

    /// Truncates toward zero, saturating at the `i64` bounds.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn truncated(self) -> i64 {
        match self {
            Self::Integer(i) => i,
            Self::Real(r) if r.is_nan() => 0,
            Self::Real(r) => r.trunc() as i64,
        }
    }

    #[must_use]
    pub fn plus(self, other: Self) -> Self {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => {
                a.checked_add(b)
                 .map_or_else(|| Self::Real(i64_to_f64(a) + i64_to_f64(b)), Self::Integer)
            },
            _ => Self::Real(self.as_f64() + other.as_f64()),
        }
    }

    #[must_use]
    pub fn minus(self, other: Self) -> Self {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => {
                a.checked_sub(b)
                 .map_or_else(|| Self::Real(i64_to_f64(a) - i64_to_f64(b)), Self::Integer)
            },
            _ => Self::Real(self.as_f64() - other.as_f64()),
        }
    }

    #[must_use]
    pub fn times(self, other: Self) -> Self {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => {
                a.checked_mul(b)
                 .map_or_else(|| Self::Real(i64_to_f64(a) * i64_to_f64(b)), Self::Integer)
            },
            _ => Self::Real(self.as_f64() * other.as_f64()),
        }
    }

    /// Divides two numbers.
    ///
    /// Integer division stays an integer only when it is exact.
    ///
    /// # Returns
    /// `None` when `other` is zero.
    ///
    /// # Example
    /// ```
    /// use uro::interpreter::value::number::Number;
    ///
    /// assert_eq!(Number::Integer(6).divide(Number::Integer(3)).unwrap().to_string(), "2");
    /// assert_eq!(Number::Integer(7).divide(Number::Integer(2)).unwrap().to_string(), "3.5");
    /// assert!(Number::Integer(7).divide(Number::Integer(0)).is_none());
    /// ```
    #[must_use]
    pub fn divide(self, other: Self) -> Option<Self> {
        if other.is_zero() {
            return None;
        }
        if let (Self::Integer(a), Self::Integer(b)) = (self, other)
           && let Some(0) = a.checked_rem(b)
           && let Some(q) = a.checked_div(b)
        {
            return Some(Self::Integer(q));
        }
        Some(Self::Real(self.as_f64() / other.as_f64()))
    }

    /// Remainder with the sign of the dividend; `None` when `other` is zero.
    #[must_use]
    pub fn remainder(self, other: Self) -> Option<Self> {
        if other.is_zero() {
            return None;
        }
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => {
                Some(a.checked_rem(b).map_or(Self::Integer(0), Self::Integer))
            },
            _ => Some(Self::Real(self.as_f64() % other.as_f64())),
        }
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        match self {
            Self::Integer(i) => i == 0,
            Self::Real(r) => r == 0.0,
        }
    }

    /// Total order over all numbers, with NaN sorting last.
    #[must_use]
    pub fn total_cmp(self, other: Self) -> Ordering {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a.cmp(&b),
            _ => OrderedFloat(self.as_f64()).cmp(&OrderedFloat(other.as_f64())),
        }
    }

    /// Parses program text such as `'42'`, `' 3.5 '` or `'-7'` as a number.
    ///
    /// # Example
    /// ```
    /// use uro::interpreter::value::number::Number;
    ///
    /// assert!(matches!(Number::parse(" 42 "), Some(Number::Integer(42))));
    /// assert!(matches!(Number::parse("2.5"), Some(Number::Real(_))));
    /// assert!(Number::parse("abc").is_none());
    /// assert!(Number::parse("").is_none());
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if let Ok(i) = text.parse::<i64>() {
            return Some(Self::Integer(i));
        }
        let is_numeric = text.chars()
                             .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
        if !is_numeric {
            return None;
        }
        text.parse::<f64>().ok().map(Self::Real)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl Neg for Number {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Self::Integer(i) => i.checked_neg()
                                 .map_or_else(|| Self::Real(-i64_to_f64(i)), Self::Integer),
            Self::Real(r) => Self::Real(-r),
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Real(r) => write!(f, "{}", format_real(*r)),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_promotes_to_real() {
        let n = Number::Integer(i64::MAX).plus(Number::Integer(1));
        assert!(matches!(n, Number::Real(_)));
    }

    #[test]
    fn integers_and_reals_compare_by_value() {
        assert_eq!(Number::Integer(2), Number::Real(2.0));
        assert_eq!(Number::Integer(2).total_cmp(Number::Real(2.5)), Ordering::Less);
        assert_eq!(Number::Real(f64::NAN).total_cmp(Number::Integer(1)), Ordering::Greater);
    }

    #[test]
    fn remainder_keeps_dividend_sign() {
        assert_eq!(Number::Integer(-7).remainder(Number::Integer(3)), Some(Number::Integer(-1)));
        assert!(Number::Real(1.5).remainder(Number::Integer(0)).is_none());
    }

    #[test]
    fn reals_display_rounded() {
        assert_eq!(Number::Real(0.1 + 0.2).to_string(), "0.3");
        assert_eq!((-Number::Real(0.0)).to_string(), "0");
    }
}
