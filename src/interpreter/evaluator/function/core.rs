use std::path::PathBuf;

use tracing::trace;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Scope},
            function::{aggregate, collection, number, predicate, string, time},
        },
        filesystem::{self, Attribute, normalize},
        value::{core::Value, number::Number},
    },
    util::num::usize_to_i64,
};

/// Type alias for builtin function handlers.
///
/// A builtin receives a slice of evaluated argument values and the line number.
type BuiltinFn = fn(&[Value], usize) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
/// - `AtLeast(n)` means the builtin takes `n` or more arguments.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
    AtLeast(usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::OneOf(counts) => counts.contains(&n),
            Self::AtLeast(m) => n >= m,
        }
    }
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Names are written in lower case; calls match them ignoring case.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of the builtins that work on evaluated arguments alone.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "count"       => { arity: Arity::AtLeast(1), func: aggregate::count },
    "sum"         => { arity: Arity::AtLeast(1), func: aggregate::sum },
    "average"     => { arity: Arity::AtLeast(1), func: aggregate::average },
    "median"      => { arity: Arity::AtLeast(1), func: aggregate::median },
    "min"         => { arity: Arity::AtLeast(1), func: aggregate::min },
    "max"         => { arity: Arity::AtLeast(1), func: aggregate::max },
    "first"       => { arity: Arity::Exact(1), func: collection::first },
    "last"        => { arity: Arity::Exact(1), func: collection::last },
    "any"         => { arity: Arity::Exact(1), func: collection::any },
    "join"        => { arity: Arity::Exact(2), func: collection::join },
    "split"       => { arity: Arity::Exact(2), func: collection::split },
    "absolute"    => { arity: Arity::Exact(1), func: number::absolute },
    "ceil"        => { arity: Arity::Exact(1), func: |args, line| number::rounded(args, line, f64::ceil) },
    "floor"       => { arity: Arity::Exact(1), func: |args, line| number::rounded(args, line, f64::floor) },
    "round"       => { arity: Arity::Exact(1), func: |args, line| number::rounded(args, line, f64::round) },
    "truncate"    => { arity: Arity::Exact(1), func: |args, line| number::rounded(args, line, f64::trunc) },
    "sign"        => { arity: Arity::Exact(1), func: number::sign },
    "sqrt"        => { arity: Arity::Exact(1), func: number::sqrt },
    "power"       => { arity: Arity::Exact(2), func: number::power },
    "number"      => { arity: Arity::Exact(1), func: number::number },
    "frombinary"  => { arity: Arity::Exact(1), func: |args, line| number::from_radix(args, line, 2) },
    "fromhex"     => { arity: Arity::Exact(1), func: |args, line| number::from_radix(args, line, 16) },
    "binary"      => { arity: Arity::Exact(1), func: number::binary },
    "hex"         => { arity: Arity::Exact(1), func: number::hex },
    "length"      => { arity: Arity::Exact(1), func: string::length },
    "left"        => { arity: Arity::Exact(2), func: string::left },
    "right"       => { arity: Arity::Exact(2), func: string::right },
    "lower"       => { arity: Arity::Exact(1), func: string::lower },
    "upper"       => { arity: Arity::Exact(1), func: string::upper },
    "reverse"     => { arity: Arity::Exact(1), func: string::reverse },
    "repeat"      => { arity: Arity::Exact(2), func: string::repeat },
    "substring"   => { arity: Arity::OneOf(&[2, 3]), func: string::substring },
    "trim"        => { arity: Arity::Exact(1), func: string::trim },
    "capitalize"  => { arity: Arity::Exact(1), func: string::capitalize },
    "concatenate" => { arity: Arity::AtLeast(1), func: string::concatenate },
    "before"      => { arity: Arity::Exact(2), func: string::before },
    "after"       => { arity: Arity::Exact(2), func: string::after },
    "digits"      => { arity: Arity::Exact(1), func: string::digits },
    "letters"     => { arity: Arity::Exact(1), func: string::letters },
    "string"      => { arity: Arity::Exact(1), func: string::string },
    "contains"    => { arity: Arity::Exact(2), func: predicate::contains },
    "startswith"  => { arity: Arity::Exact(2), func: predicate::starts_with },
    "endswith"    => { arity: Arity::Exact(2), func: predicate::ends_with },
    "isbinary"    => { arity: Arity::Exact(1), func: predicate::is_binary },
    "isdigit"     => { arity: Arity::Exact(1), func: predicate::is_digit },
    "ishex"       => { arity: Arity::Exact(1), func: predicate::is_hex },
    "isletter"    => { arity: Arity::Exact(1), func: predicate::is_letter },
    "isnumber"    => { arity: Arity::Exact(1), func: predicate::is_number },
    "islower"     => { arity: Arity::Exact(1), func: predicate::is_lower },
    "isupper"     => { arity: Arity::Exact(1), func: predicate::is_upper },
    "date"        => { arity: Arity::Exact(3), func: time::date },
    "monthname"   => { arity: Arity::Exact(1), func: time::month_name },
    "weekdayname" => { arity: Arity::Exact(1), func: time::weekday_name },
    "newyear"     => { arity: Arity::Exact(1), func: time::new_year },
    "christmas"   => { arity: Arity::Exact(1), func: time::christmas },
    "easter"      => { arity: Arity::Exact(1), func: time::easter },
}

/// A function that evaluates its first argument at another location.
#[derive(Clone, Copy)]
enum InsideFunction {
    Count,
    Any,
    Exists,
}

impl InsideFunction {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "countinside" => Some(Self::Count),
            "anyinside" => Some(Self::Any),
            "existsinside" | "existinside" => Some(Self::Exists),
            _ => None,
        }
    }
}

impl Context<'_> {
    /// Evaluates a function call.
    ///
    /// Lookup order:
    /// 1. `countInside`, `anyInside`, `existsInside` and `existInside`,
    ///    whose first argument is evaluated at another location.
    /// 2. File attributes such as `size` or `name`, and `path`.
    /// 3. The builtin table.
    ///
    /// Names are case-insensitive.
    ///
    /// # Errors
    /// - `UnknownFunction` when nothing matches.
    /// - `ArgumentCountMismatch` for a wrong number of arguments.
    /// - Whatever the function itself reports for bad arguments.
    pub(crate) fn eval_function_call(&mut self,
                                     name: &str,
                                     arguments: &[Expr],
                                     scope: &Scope,
                                     line: usize)
                                     -> EvalResult<Value> {
        let key = name.to_lowercase();
        let arity_error = || RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                                   line };

        if let Some(function) = InsideFunction::from_name(&key) {
            let [target, directory] = arguments else {
                return Err(arity_error());
            };
            return self.eval_inside_function(function, target, directory, scope);
        }

        if key == "path" && arguments.len() > 1 {
            let segments = self.eval_all(arguments, scope)?;
            return join_path(&segments, scope, line);
        }

        if let Some(attribute) = Attribute::from_name(&key) {
            let [argument] = arguments else {
                return Err(arity_error());
            };
            let value = self.eval(argument, scope)?;
            return attribute_of(&value, attribute, scope, line);
        }

        let Some(builtin) = BUILTIN_TABLE.iter().find(|b| b.name == key) else {
            return Err(RuntimeError::UnknownFunction { name: name.to_string(),
                                                       line });
        };
        if !builtin.arity.check(arguments.len()) {
            return Err(arity_error());
        }
        let values = self.eval_all(arguments, scope)?;
        (builtin.func)(&values, line)
    }

    fn eval_inside_function(&mut self,
                            function: InsideFunction,
                            target: &Expr,
                            directory: &Expr,
                            scope: &Scope)
                            -> EvalResult<Value> {
        let directory = self.eval(directory, scope)?;
        let location = filesystem::entry_of(&directory, &scope.location)
                           .map(|entry| normalize(&entry.absolute()))
                           .filter(|path| path.is_dir());

        let Some(location) = location else {
            trace!(directory = %directory, "not a directory");
            return Ok(match function {
                InsideFunction::Count => Value::from(0),
                InsideFunction::Any | InsideFunction::Exists => Value::Bool(false),
            });
        };

        let inner = scope.with_location(location);
        let value = self.eval(target, &inner)?;
        Ok(match function {
            InsideFunction::Count => Value::from(usize_to_i64(value.into_elements().len())),
            InsideFunction::Any => Value::Bool(!value.into_elements().is_empty()),
            InsideFunction::Exists => {
                let mut all = true;
                for element in value.into_elements() {
                    let entry = filesystem::entry_of(&element, &inner.location);
                    all &= filesystem::attribute(entry.as_ref(), Attribute::Exists)
                           == Value::Bool(true);
                }
                Value::Bool(all)
            },
        })
    }
}

/// Reads an attribute of a path, or of every path in a collection.
///
/// `size` of a collection is the total size of its elements.
fn attribute_of(value: &Value, attribute: Attribute, scope: &Scope, line: usize) -> EvalResult<Value> {
    if let Some(elements) = value.elements() {
        let values = elements.iter()
                             .map(|element| attribute_of(element, attribute, scope, line))
                             .collect::<EvalResult<Vec<_>>>()?;
        if attribute == Attribute::Size {
            let total = values.iter()
                              .filter_map(|v| match v {
                                  Value::Number(n) => Some(*n),
                                  _ => None,
                              })
                              .fold(Number::Integer(0), Number::plus);
            return Ok(Value::Number(total));
        }
        return Ok(Value::list(values));
    }

    if !value.is_text() {
        return Err(RuntimeError::TypeError { details: format!("expected a path, found {}",
                                                              value.type_name()),
                                             line });
    }
    let entry = filesystem::entry_of(value, &scope.location);
    Ok(filesystem::attribute(entry.as_ref(), attribute))
}

/// Joins path segments into one absolute path. Relative segments start at the
/// current location; an absolute segment starts over.
fn join_path(segments: &[Value], scope: &Scope, line: usize) -> EvalResult<Value> {
    let mut path = PathBuf::from(scope.location.as_path());
    for segment in segments {
        let text = segment.as_text(line)?;
        path.push(text);
    }
    Ok(Value::Str(filesystem::display(&normalize(&path))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_are_lower_case_and_unique() {
        for (i, name) in BUILTIN_FUNCTIONS.iter().enumerate() {
            assert_eq!(name.to_lowercase(), *name);
            assert!(!BUILTIN_FUNCTIONS[i + 1..].contains(name), "duplicate builtin {name}");
        }
    }

    #[test]
    fn arity_accepts_listed_counts() {
        assert!(Arity::OneOf(&[2, 3]).check(3));
        assert!(!Arity::OneOf(&[2, 3]).check(1));
        assert!(Arity::AtLeast(1).check(4));
        assert!(!Arity::AtLeast(1).check(0));
    }
}
