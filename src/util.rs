/// Numeric conversion and rendering helpers.
///
/// This module provides the functions that turn `f64` values into their
/// printed form and that convert between `i64`, `usize` and `f64` without
/// silent data loss.
pub mod num;
