use tracing::trace;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, Scope},
        filesystem::{self, Attribute, EntryKind},
        value::{
            core::Value,
            period::{Period, PeriodUnit},
            time::Time,
        },
    },
    util::num::usize_to_i64,
};

impl Context<'_> {
    /// Resolves a name.
    ///
    /// Lookup order:
    /// 1. `this` and `index`.
    /// 2. Attributes such as `size` or `name`, when `this` is a path.
    /// 3. Program variables.
    /// 4. Built-in variables such as `files`, `location` or `today`.
    ///
    /// All names are case-insensitive.
    ///
    /// # Errors
    /// Returns `UnknownVariable` when nothing matches.
    pub(crate) fn eval_variable(&self, name: &str, scope: &Scope, line: usize) -> EvalResult<Value> {
        let key = name.to_lowercase();

        match key.as_str() {
            "this" => return self.this_value(scope, line),
            "index" => {
                return scope.index
                            .map(|i| Value::from(usize_to_i64(i)))
                            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                                          line });
            },
            _ => {},
        }

        if let Some(attribute) = Attribute::from_name(&key)
           && let Some(this) = &scope.this
           && this.is_text()
        {
            let entry = filesystem::entry_of(this, &scope.location);
            return Ok(filesystem::attribute(entry.as_ref(), attribute));
        }

        if let Some(value) = self.variable(&key) {
            return Ok(value.clone());
        }

        self.builtin_variable(&key, scope)
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           line })
    }

    /// The value of `this`.
    ///
    /// # Errors
    /// Returns `UnknownVariable` outside of an applied block.
    pub(crate) fn this_value(&self, scope: &Scope, line: usize) -> EvalResult<Value> {
        scope.this
             .clone()
             .ok_or_else(|| RuntimeError::UnknownVariable { name: "this".to_string(),
                                                            line })
    }

    fn builtin_variable(&self, key: &str, scope: &Scope) -> Option<Value> {
        let location = scope.location.as_path();
        let listing = |kind, recursive| {
            trace!(location = %location.display(), recursive, "listing directory");
            let entries = filesystem::list(location, kind, recursive);
            Value::list(entries.into_iter().map(Value::from).collect())
        };

        let value = match key {
            "location" => Value::Str(filesystem::display(location)),
            "success" => Value::Bool(self.success),
            "files" => listing(EntryKind::Files, false),
            "directories" => listing(EntryKind::Directories, false),
            "recursivefiles" => listing(EntryKind::Files, true),
            "recursivedirectories" => listing(EntryKind::Directories, true),
            "now" => Value::Time(Time::now()),
            "today" => Value::Time(Time::today()),
            "yesterday" => Value::Time(Time::today().sub_period(Period::of(1, PeriodUnit::Day))?),
            "tomorrow" => Value::Time(Time::today().add_period(Period::of(1, PeriodUnit::Day))?),
            _ => return None,
        };
        Some(value)
    }
}
