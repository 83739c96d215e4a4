use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        evaluator::{
            binary::{
                comparison::compare,
                concat::fold_chain,
                membership::contains_value,
                scalar::eval_scalar,
            },
            core::{Context, EvalResult, Scope},
        },
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a binary operation.
    ///
    /// Operands are evaluated left to right. The work is routed by operator:
    /// - `+` and `-` fold the whole left-leaning chain at once, so that text
    ///   met halfway through changes how later operands combine.
    /// - `*`, `/` and `%` go to [`eval_scalar`].
    /// - Comparisons go to [`compare`].
    /// - `in` tests membership and `like` matches a pattern.
    /// - `and`, `or` and `xor` short-circuit in `eval_logic`.
    ///
    /// # Parameters
    /// - `left`: Left operand.
    /// - `op`: The operator.
    /// - `right`: Right operand.
    /// - `scope`: Binding of `this`, `index` and the current location.
    /// - `line`: Line number for error reporting.
    ///
    /// # Example
    /// ```
    /// use std::path::Path;
    ///
    /// let mut out = Vec::new();
    /// uro::run("print '2' + 75 days + 2 days + 5", Path::new("/"), &mut out).unwrap();
    /// assert_eq!(String::from_utf8(out).unwrap(), "277 days5\n");
    /// ```
    pub(crate) fn eval_binary_op(&mut self,
                                 left: &Expr,
                                 op: BinaryOperator,
                                 right: &Expr,
                                 scope: &Scope,
                                 line: usize)
                                 -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, In, Less, LessEqual, Like, Mod, Mul,
            NotEqual, Or, Sub, Xor,
        };

        match op {
            Add | Sub => self.eval_additive_chain(left, op, right, scope, line),
            And | Or | Xor => self.eval_logic(left, op, right, scope, line),
            Mul | Div | Mod => {
                let left = self.eval(left, scope)?;
                let right = self.eval(right, scope)?;
                eval_scalar(op, &left, &right, line)
            },
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => {
                let left = self.eval(left, scope)?;
                let right = self.eval(right, scope)?;
                Ok(Value::Bool(compare(op, &left, &right)))
            },
            In => {
                let needle = self.eval(left, scope)?;
                let haystack = self.eval(right, scope)?;
                Ok(Value::Bool(contains_value(&haystack, &needle)))
            },
            Like => {
                let text = self.eval(left, scope)?;
                let pattern = self.eval(right, scope)?;
                self.eval_like(&text, &pattern, line).map(Value::Bool)
            },
        }
    }

    /// Collects the operands of `a + b - c + d` and folds them in order.
    fn eval_additive_chain(&mut self,
                           left: &Expr,
                           op: BinaryOperator,
                           right: &Expr,
                           scope: &Scope,
                           line: usize)
                           -> EvalResult<Value> {
        let mut steps = vec![(op, right)];
        let mut first = left;
        while let Expr::BinaryOp { left: inner_left,
                                   op: inner_op @ (BinaryOperator::Add | BinaryOperator::Sub),
                                   right: inner_right,
                                   .. } = first
        {
            steps.push((*inner_op, inner_right.as_ref()));
            first = inner_left.as_ref();
        }
        steps.reverse();

        let first = self.eval(first, scope)?;
        let mut evaluated = Vec::with_capacity(steps.len());
        for (op, expr) in steps {
            evaluated.push((op, self.eval(expr, scope)?));
        }
        fold_chain(first, evaluated, line)
    }
}
