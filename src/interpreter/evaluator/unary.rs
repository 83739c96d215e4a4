use crate::{
    ast::{Expr, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, Scope},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a unary operation.
    ///
    /// - `-` negates numbers and periods.
    /// - `not` inverts a boolean.
    ///
    /// # Errors
    /// `TypeError` for `-` on anything else, `ExpectedBoolean` for `not` on a
    /// non-boolean.
    pub(crate) fn eval_unary_op(&mut self,
                                op: UnaryOperator,
                                expr: &Expr,
                                scope: &Scope,
                                line: usize)
                                -> EvalResult<Value> {
        let value = self.eval(expr, scope)?;

        match op {
            UnaryOperator::Negate => match value {
                Value::Number(n) => Ok(Value::Number(-n)),
                Value::Period(p) => Ok(Value::Period(p.negated())),
                other => Err(RuntimeError::TypeError { details: format!("cannot negate a {}",
                                                                        other.type_name()),
                                                       line }),
            },
            UnaryOperator::Not => Ok(Value::Bool(!value.as_bool(line)?)),
        }
    }
}
