use crate::{
    ast::{AssignTarget, BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            access::{char_at, replace_char},
            binary::{concat::fold_chain, scalar::eval_scalar},
            core::{Context, EvalResult, Scope},
        },
        value::{
            core::Value,
            number::Number,
            time::{Precision, Time, TimeField},
        },
    },
};

/// An assignment target with its index already evaluated.
enum Place {
    Variable(String),
    Char { name: String, index: i64 },
    Field { name: String, field: TimeField },
}

impl Context<'_> {
    /// Executes `target = value`.
    ///
    /// - A variable is created or replaced.
    /// - `s[i] = r` replaces one character of a string with the text of `r`.
    /// - `t.field = n` sets one part of a time and renormalizes it.
    pub(crate) fn exec_assignment(&mut self,
                                  target: &AssignTarget,
                                  value: &Expr,
                                  scope: &Scope,
                                  line: usize)
                                  -> EvalResult<()> {
        let place = self.resolve(target, scope, line)?;
        let value = self.eval(value, scope)?;
        self.store(&place, value, line)
    }

    /// Executes `target op= value`, reading the target, combining it with the
    /// value and writing it back.
    ///
    /// `+=` and `-=` follow the rules of `+` and `-`, so `a += 'tu'`
    /// concatenates onto a string.
    pub(crate) fn exec_compound_assignment(&mut self,
                                           target: &AssignTarget,
                                           op: BinaryOperator,
                                           value: &Expr,
                                           scope: &Scope,
                                           line: usize)
                                           -> EvalResult<()> {
        let place = self.resolve(target, scope, line)?;
        let current = self.load(&place, line)?;
        let rhs = self.eval(value, scope)?;

        let updated = match op {
            BinaryOperator::Add | BinaryOperator::Sub => fold_chain(current, [(op, rhs)], line)?,
            _ => eval_scalar(op, &current, &rhs, line)?,
        };
        self.store(&place, updated, line)
    }

    /// Executes `target++` or `target--`.
    ///
    /// Numbers change by one and keep their kind, so `10.2++` gives `11.2`.
    /// A time moves by one day and a time field by one of its own units.
    pub(crate) fn exec_increment(&mut self,
                                 target: &AssignTarget,
                                 delta: i64,
                                 scope: &Scope,
                                 line: usize)
                                 -> EvalResult<()> {
        let place = self.resolve(target, scope, line)?;

        let updated = match &place {
            Place::Variable(name) => match self.stored(name, line)? {
                Value::Number(n) => Value::Number(n.plus(Number::Integer(delta))),
                Value::Time(t) => Value::Time(t.shift_field(TimeField::Day, delta)
                                               .ok_or(RuntimeError::TimeOutOfRange { line })?),
                other => {
                    return Err(RuntimeError::TypeError { details: format!("cannot increment a {}",
                                                                          other.type_name()),
                                                         line });
                },
            },
            Place::Field { name, field } => {
                let time = self.stored(name, line)?.as_time(line)?;
                Value::Time(time.shift_field(*field, delta)
                                .ok_or(RuntimeError::TimeOutOfRange { line })?)
            },
            Place::Char { .. } => {
                return Err(RuntimeError::TypeError { details: "cannot increment a character"
                                                                  .to_string(),
                                                     line });
            },
        };

        match place {
            Place::Variable(name) | Place::Field { name, .. } => self.set_variable(&name, updated),
            Place::Char { .. } => {},
        }
        Ok(())
    }

    fn resolve(&mut self, target: &AssignTarget, scope: &Scope, line: usize) -> EvalResult<Place> {
        Ok(match target {
            AssignTarget::Variable(name) => Place::Variable(name.clone()),
            AssignTarget::Index { name, index } => {
                Place::Char { name:  name.clone(),
                              index: self.eval(index, scope)?.as_integer(line)?, }
            },
            AssignTarget::Field { name, field } => Place::Field { name:  name.clone(),
                                                                  field: *field, },
        })
    }

    fn stored(&self, name: &str, line: usize) -> EvalResult<Value> {
        self.variable(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           line })
    }

    fn load(&self, place: &Place, line: usize) -> EvalResult<Value> {
        match place {
            Place::Variable(name) => self.stored(name, line),
            Place::Char { name, index } => {
                let text = self.stored(name, line)?.as_text(line)?;
                Ok(Value::Str(char_at(&text, *index).unwrap_or_default()))
            },
            Place::Field { name, field } => {
                let time = self.stored(name, line)?.as_time(line)?;
                Ok(time.field(*field)
                       .map_or(Value::Time(time.date_only()), Value::from))
            },
        }
    }

    fn store(&mut self, place: &Place, value: Value, line: usize) -> EvalResult<()> {
        match place {
            Place::Variable(name) => self.set_variable(name, value),
            Place::Char { name, index } => {
                let Value::Str(text) = self.stored(name, line)? else {
                    let details = format!("'{name}' does not hold a string");
                    return Err(RuntimeError::TypeError { details, line });
                };
                let replacement = value.as_text(line)?;
                self.set_variable(name, Value::Str(replace_char(&text, *index, &replacement)));
            },
            Place::Field { name, field } => {
                let time = self.stored(name, line)?.as_time(line)?;
                let updated = match field {
                    TimeField::Date => with_date_of(time, value.as_time(line)?),
                    _ => time.set_field(*field, value.as_integer(line)?)
                             .ok_or(RuntimeError::TimeOutOfRange { line })?,
                };
                self.set_variable(name, Value::Time(updated));
            },
        }
        Ok(())
    }
}

/// Takes the calendar day from `date` and keeps the clock of `time`.
fn with_date_of(time: Time, date: Time) -> Time {
    let moment = date.moment().date().and_time(time.moment().time());
    Time::new(moment, time.precision().max(Precision::Date))
}
