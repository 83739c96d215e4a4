use std::{
    fmt::{self, Display},
    mem::discriminant,
    rc::Rc,
};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{file::FileEntry, number::Number, period::Period, time::Time},
    },
};

/// A runtime value.
///
/// Collections are reference counted so that `this`, pipeline stages and
/// variables can share them without copying.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An integer or real number.
    Number(Number),
    /// `true` or `false`; prints as `1` or `0`.
    Bool(bool),
    /// A string of text.
    Str(String),
    /// A calendar time.
    Time(Time),
    /// A calendar period such as `3 days`.
    Period(Period),
    /// A parenthesized group whose elements keep their own types.
    Tuple(Rc<Vec<Self>>),
    /// A comma separated sequence whose elements share one type.
    List(Rc<Vec<Self>>),
    /// An entry from a directory listing.
    File(Rc<FileEntry>),
}

impl Value {
    /// Builds a list, flattening nested lists and unifying element types.
    ///
    /// When the elements do not all share one type, every element is rendered
    /// into a string.
    ///
    /// # Example
    /// ```
    /// use uro::interpreter::value::core::Value;
    ///
    /// let mixed = Value::list(vec![2.into(), "3".into(), 4.into()]);
    /// assert_eq!(mixed.elements().unwrap()[0], Value::Str("2".to_string()));
    ///
    /// let nested = Value::list(vec![Value::list(vec![1.into(), 2.into()]), 3.into()]);
    /// assert_eq!(nested.elements().unwrap().len(), 3);
    /// ```
    #[must_use]
    pub fn list(elements: Vec<Self>) -> Self {
        let mut flat = Vec::with_capacity(elements.len());
        for element in elements {
            match element {
                Self::List(inner) => flat.extend(inner.iter().cloned()),
                other => flat.push(other),
            }
        }

        let uniform = flat.windows(2)
                          .all(|pair| discriminant(&pair[0]) == discriminant(&pair[1]));
        if !uniform {
            flat = flat.into_iter()
                       .map(|element| Self::Str(element.to_string()))
                       .collect();
        }

        Self::List(Rc::new(flat))
    }

    #[must_use]
    pub fn tuple(elements: Vec<Self>) -> Self {
        Self::Tuple(Rc::new(elements))
    }

    /// Name of the value's type, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Bool(_) => "bool",
            Self::Str(_) => "string",
            Self::Time(_) => "time",
            Self::Period(_) => "period",
            Self::Tuple(_) => "tuple",
            Self::List(_) => "list",
            Self::File(_) => "file",
        }
    }

    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::Tuple(_) | Self::List(_))
    }

    /// Strings and file entries take part in text concatenation.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Str(_) | Self::File(_))
    }

    /// The elements of a tuple or list.
    #[must_use]
    pub fn elements(&self) -> Option<&[Self]> {
        match self {
            Self::Tuple(elements) | Self::List(elements) => Some(elements.as_slice()),
            _ => None,
        }
    }

    /// The elements of a collection, or the value itself as a one-element
    /// sequence.
    #[must_use]
    pub fn into_elements(self) -> Vec<Self> {
        match self {
            Self::Tuple(elements) | Self::List(elements) => {
                Rc::try_unwrap(elements).unwrap_or_else(|shared| shared.as_ref().clone())
            },
            other => vec![other],
        }
    }

    pub fn as_bool(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(RuntimeError::ExpectedBoolean { line }),
        }
    }

    pub fn as_number(&self, line: usize) -> EvalResult<Number> {
        match self {
            Self::Number(n) => Ok(*n),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }

    /// Integer value of a number; fractional numbers are truncated.
    pub fn as_integer(&self, line: usize) -> EvalResult<i64> {
        self.as_number(line).map(Number::truncated)
    }

    pub fn as_time(&self, line: usize) -> EvalResult<Time> {
        match self {
            Self::Time(t) => Ok(*t),
            _ => Err(RuntimeError::ExpectedTime { line }),
        }
    }

    /// Text of a scalar value. Collections are rejected.
    pub fn as_text(&self, line: usize) -> EvalResult<String> {
        if self.is_collection() {
            return Err(RuntimeError::TypeError { details: format!("expected text, found {}",
                                                                  self.type_name()),
                                                 line });
        }
        Ok(self.to_string())
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{}", u8::from(*b)),
            Self::Str(s) => write!(f, "{s}"),
            Self::Time(t) => write!(f, "{t}"),
            Self::Period(p) => write!(f, "{p}"),
            Self::Tuple(elements) | Self::List(elements) => {
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                Ok(())
            },
            Self::File(entry) => write!(f, "{entry}"),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(Number::Integer(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(Number::Real(value))
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<Time> for Value {
    fn from(value: Time) -> Self {
        Self::Time(value)
    }
}

impl From<Period> for Value {
    fn from(value: Period) -> Self {
        Self::Period(value)
    }
}

impl From<FileEntry> for Value {
    fn from(value: FileEntry) -> Self {
        Self::File(Rc::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_lists_keep_their_types() {
        let list = Value::list(vec![1.into(), 2.5.into()]);
        assert_eq!(list.elements().unwrap()[1], Value::Number(Number::Real(2.5)));
    }

    #[test]
    fn tuples_are_not_flattened_into_lists() {
        let tuple = Value::tuple(vec![1.into(), 2.into()]);
        let list = Value::list(vec![tuple, Value::tuple(vec![3.into()])]);
        assert_eq!(list.elements().unwrap().len(), 2);
    }

    #[test]
    fn displays_collections_comma_separated() {
        let list = Value::list(vec![true.into(), false.into()]);
        assert_eq!(list.to_string(), "1, 0");
    }

    #[test]
    fn scalars_become_single_element_sequences() {
        assert_eq!(Value::from("x").into_elements(), vec![Value::from("x")]);
    }
}
