use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        evaluator::core::{Context, EvalResult, Scope},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates `and`, `or` or `xor`.
    ///
    /// `and` and `or` skip their right operand when the left one already
    /// decides the result. Both operands must be booleans.
    ///
    /// # Example
    /// ```
    /// use std::path::Path;
    ///
    /// let mut out = Vec::new();
    /// uro::run("print false and unknown; print true xor true", Path::new("/"), &mut out).unwrap();
    /// assert_eq!(String::from_utf8(out).unwrap(), "0\n0\n");
    /// ```
    pub(crate) fn eval_logic(&mut self,
                             left: &Expr,
                             op: BinaryOperator,
                             right: &Expr,
                             scope: &Scope,
                             line: usize)
                             -> EvalResult<Value> {
        let left = self.eval(left, scope)?.as_bool(line)?;

        let result = match op {
            BinaryOperator::And => left && self.eval(right, scope)?.as_bool(line)?,
            BinaryOperator::Or => left || self.eval(right, scope)?.as_bool(line)?,
            _ => left ^ self.eval(right, scope)?.as_bool(line)?,
        };
        Ok(Value::Bool(result))
    }
}
