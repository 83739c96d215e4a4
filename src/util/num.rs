/// Largest signed integer exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_I64_INT: i64 = 9_007_199_254_740_991;

/// Number of decimal places kept when printing real numbers.
pub const DISPLAY_PRECISION: usize = 10;

/// Renders a real number the way programs print it.
///
/// The value is rounded to [`DISPLAY_PRECISION`] decimal places, then trailing
/// zeros and a trailing decimal point are removed. Negative zero prints as
/// `0`.
///
/// ## Example
/// ```
/// use uro::util::num::format_real;
///
/// assert_eq!(format_real(2.5), "2.5");
/// assert_eq!(format_real(0.1 + 0.2), "0.3");
/// assert_eq!(format_real(4.0), "4");
/// assert_eq!(format_real(-0.000_000_000_01), "0");
/// assert_eq!(format_real(f64::NAN), "NaN");
/// ```
#[must_use]
pub fn format_real(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let mut text = format!("{value:.precision$}", precision = DISPLAY_PRECISION);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

/// Converts an integral `f64` into an `i64` when it fits exactly.
///
/// ## Example
/// ```
/// use uro::util::num::f64_to_i64_exact;
///
/// assert_eq!(f64_to_i64_exact(3.0), Some(3));
/// assert_eq!(f64_to_i64_exact(3.5), None);
/// assert_eq!(f64_to_i64_exact(f64::INFINITY), None);
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
#[must_use]
pub fn f64_to_i64_exact(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value.abs() > MAX_SAFE_I64_INT as f64 {
        return None;
    }
    Some(value as i64)
}

/// Converts an `i64` into an `f64`.
///
/// Integers beyond `2^53` lose precision; callers use this only where a real
/// result is already expected.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Converts a `usize` into an `i64`, saturating at `i64::MAX`.
#[must_use]
pub fn usize_to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Converts a `u64` into an `i64`, saturating at `i64::MAX`.
#[must_use]
pub fn u64_to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Converts a count given as `i64` into a `usize`.
///
/// Negative counts become `0`.
///
/// ## Example
/// ```
/// use uro::util::num::count_from_i64;
///
/// assert_eq!(count_from_i64(4), 4);
/// assert_eq!(count_from_i64(-2), 0);
/// ```
#[must_use]
pub fn count_from_i64(value: i64) -> usize {
    usize::try_from(value.max(0)).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_ten_places() {
        assert_eq!(format_real(1.0 / 3.0), "0.3333333333");
        assert_eq!(format_real(2.000_000_000_04), "2");
        assert_eq!(format_real(-1.25), "-1.25");
    }

    #[test]
    fn renders_large_reals_without_exponent() {
        assert_eq!(format_real(1e20), "100000000000000000000");
    }
}
