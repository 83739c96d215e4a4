use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::binary::concat::fold_sum,
        value::{core::Value, number::Number},
    },
};

/// Checks two values for equality.
///
/// Numbers compare numerically, times by moment and periods by their
/// approximate length. Collections are equal when they have the same length
/// and are equal element by element. Any other pair of scalars is equal when
/// both render to the same text, so `'3' = 3` holds.
///
/// # Example
/// ```
/// use uro::interpreter::{evaluator::binary::comparison::values_equal, value::core::Value};
///
/// assert!(values_equal(&Value::from("3"), &Value::from(3)));
/// assert!(!values_equal(&Value::tuple(vec![1.into()]), &Value::tuple(vec![1.into(), 1.into()])));
/// ```
#[must_use]
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::Time(a), Value::Time(b)) => a.moment() == b.moment(),
        (Value::Period(a), Value::Period(b)) => a.approximate_seconds() == b.approximate_seconds(),
        _ => match (left.elements(), right.elements()) {
            (Some(a), Some(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
            },
            (None, None) => left.to_string() == right.to_string(),
            _ => false,
        },
    }
}

/// Orders two values, or returns `None` when they are not comparable.
///
/// Collections are ordered by the sum of their elements. A number and a
/// string compare numerically when the string holds a number and as text
/// otherwise. Text compares by character codes.
#[must_use]
pub fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Some(a.total_cmp(*b)),
        (Value::Time(a), Value::Time(b)) => Some(a.moment().cmp(&b.moment())),
        (Value::Period(a), Value::Period(b)) => {
            Some(a.approximate_seconds().cmp(&b.approximate_seconds()))
        },
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Number(n), text) if text.is_text() => Some(number_against_text(*n, text)),
        (text, Value::Number(n)) if text.is_text() => {
            Some(number_against_text(*n, text).reverse())
        },
        _ if left.is_collection() || right.is_collection() => {
            let left = collapse(left)?;
            let right = collapse(right)?;
            if left.is_collection() || right.is_collection() {
                return None;
            }
            compare_values(&left, &right)
        },
        _ if left.is_text() || right.is_text() => Some(left.to_string().cmp(&right.to_string())),
        _ => None,
    }
}

fn collapse(value: &Value) -> Option<Value> {
    match value.elements() {
        Some(elements) => fold_sum(elements),
        None => Some(value.clone()),
    }
}

fn number_against_text(number: Number, text: &Value) -> Ordering {
    let rendered = text.to_string();
    Number::parse(rendered.trim()).map_or_else(|| number.to_string().cmp(&rendered),
                                               |parsed| number.total_cmp(parsed))
}

/// Orders two values totally, for sorting.
///
/// Collections are first replaced by the sum of their elements. Values are
/// then grouped by kind: booleans, numbers together with text that holds a
/// number, other text, times, periods and finally collections without a
/// scalar sum, ordered by length. Within a group the natural order applies.
///
/// # Example
/// ```
/// use std::cmp::Ordering;
///
/// use uro::interpreter::{evaluator::binary::comparison::sort_order, value::core::Value};
///
/// assert_eq!(sort_order(&Value::from("10"), &Value::from(9)), Ordering::Greater);
/// assert_eq!(sort_order(&Value::from("10a"), &Value::from(9)), Ordering::Greater);
/// assert_eq!(sort_order(&Value::from(10), &Value::from("10a")), Ordering::Less);
/// ```
#[must_use]
pub fn sort_order(left: &Value, right: &Value) -> Ordering {
    let (left, right) = (SortKey::of(left), SortKey::of(right));
    match (&left, &right) {
        (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
        (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(*b),
        (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
        (SortKey::Time(a), SortKey::Time(b)) => a.cmp(b),
        (SortKey::Period(a), SortKey::Period(b)) => a.cmp(b),
        (SortKey::Collection(a), SortKey::Collection(b)) => a.cmp(b),
        _ => left.rank().cmp(&right.rank()),
    }
}

/// What a value is sorted by.
enum SortKey {
    Bool(bool),
    Number(Number),
    Text(String),
    Time(NaiveDateTime),
    Period(i128),
    Collection(usize),
}

impl SortKey {
    fn of(value: &Value) -> Self {
        let value = match value.elements() {
            Some(elements) => match fold_sum(elements) {
                Some(sum) if !sum.is_collection() => sum,
                _ => return Self::Collection(elements.len()),
            },
            None => value.clone(),
        };

        match value {
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::Time(t) => Self::Time(t.moment()),
            Value::Period(p) => Self::Period(p.approximate_seconds()),
            Value::Tuple(elements) | Value::List(elements) => Self::Collection(elements.len()),
            text @ (Value::Str(_) | Value::File(_)) => {
                let rendered = text.to_string();
                Number::parse(&rendered).map_or(Self::Text(rendered), Self::Number)
            },
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Number(_) => 1,
            Self::Text(_) => 2,
            Self::Time(_) => 3,
            Self::Period(_) => 4,
            Self::Collection(_) => 5,
        }
    }
}

/// Applies a comparison operator to two values.
///
/// Values that cannot be ordered make every ordering operator false.
///
/// # Example
/// ```
/// use uro::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::comparison::compare, value::core::Value},
/// };
///
/// let a = Value::tuple(vec![1.into(), 2.into(), 3.into()]);
/// let b = Value::tuple(vec![2.into(), 3.into(), 1.into()]);
/// assert!(compare(BinaryOperator::LessEqual, &a, &b));
/// assert!(compare(BinaryOperator::GreaterEqual, &a, &b));
/// assert!(compare(BinaryOperator::NotEqual, &a, &b));
/// ```
#[must_use]
pub fn compare(op: BinaryOperator, left: &Value, right: &Value) -> bool {
    use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

    match op {
        Equal => values_equal(left, right),
        NotEqual => !values_equal(left, right),
        Less => compare_values(left, right).is_some_and(Ordering::is_lt),
        LessEqual => compare_values(left, right).is_some_and(Ordering::is_le),
        Greater => compare_values(left, right).is_some_and(Ordering::is_gt),
        GreaterEqual => compare_values(left, right).is_some_and(Ordering::is_ge),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_ordered_by_prefix() {
        assert_eq!(compare_values(&"a".into(), &"abc".into()), Some(Ordering::Less));
        assert_eq!(compare_values(&"B".into(), &"a".into()), Some(Ordering::Less));
    }

    #[test]
    fn numeric_text_compares_as_a_number() {
        assert_eq!(compare_values(&Value::from(10), &Value::from("9")), Some(Ordering::Greater));
        assert_eq!(compare_values(&Value::from("9"), &Value::from(10)), Some(Ordering::Less));
    }

    #[test]
    fn integers_equal_reals() {
        assert!(values_equal(&Value::from(2), &Value::from(2.0)));
    }

    #[test]
    fn booleans_and_numbers_are_unordered() {
        assert_eq!(compare_values(&Value::Bool(true), &Value::from(1)), None);
        assert!(!compare(BinaryOperator::Less, &Value::Bool(true), &Value::from(1)));
    }

    #[test]
    fn sort_order_groups_kinds() {
        let mut values = vec![Value::from("10a"),
                              Value::from(10),
                              Value::Bool(true),
                              Value::from(9),
                              Value::tuple(vec![3.into(), "x".into()]),
                              Value::from("2")];
        values.sort_by(sort_order);
        let rendered: Vec<String> = values.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["1", "2", "9", "10", "10a", "3, x"]);
    }
}
