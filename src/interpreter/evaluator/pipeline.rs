use crate::{
    ast::{Expr, Stage},
    interpreter::{
        evaluator::{
            binary::comparison::sort_order,
            core::{Context, EvalResult, Scope},
        },
        value::core::Value,
    },
    util::num::count_from_i64,
};

impl Context<'_> {
    /// Evaluates a collection followed by its stages.
    ///
    /// Stages apply in the order they are written, each one to what the
    /// previous stages left, so `every 4 limit 5 skip 1` differs from
    /// `skip 1 every 4 limit 5`. A scalar source is a one-element sequence.
    ///
    /// # Example
    /// ```
    /// use std::path::Path;
    ///
    /// let mut out = Vec::new();
    /// uro::run("print 1,2,3,4,5,6,7,8 skip 1 every 2 limit 3", Path::new("/"), &mut out).unwrap();
    /// assert_eq!(String::from_utf8(out).unwrap(), "2\n4\n6\n");
    /// ```
    pub(crate) fn eval_pipeline(&mut self,
                                source: &Expr,
                                stages: &[Stage],
                                scope: &Scope,
                                line: usize)
                                -> EvalResult<Value> {
        let mut elements = self.eval(source, scope)?.into_elements();

        for stage in stages {
            elements = match stage {
                Stage::Where(predicate) => self.filter(elements, predicate, scope, line)?,
                Stage::Order { key, descending } => {
                    let mut sorted = self.sort(elements, key.as_ref(), scope)?;
                    if *descending {
                        sorted.reverse();
                    }
                    sorted
                },
                Stage::Skip(n) => {
                    let n = self.count(n, scope, line)?.min(elements.len());
                    elements.drain(..n);
                    elements
                },
                Stage::Every(n) => {
                    let step = self.count(n, scope, line)?.max(1);
                    elements.into_iter().step_by(step).collect()
                },
                Stage::Limit(n) => {
                    elements.truncate(self.count(n, scope, line)?);
                    elements
                },
                Stage::Final(n) => {
                    let keep = self.count(n, scope, line)?.min(elements.len());
                    elements.split_off(elements.len() - keep)
                },
            };
        }

        Ok(Value::list(elements))
    }

    fn count(&mut self, expr: &Expr, scope: &Scope, line: usize) -> EvalResult<usize> {
        Ok(count_from_i64(self.eval(expr, scope)?.as_integer(line)?))
    }

    fn filter(&mut self,
              elements: Vec<Value>,
              predicate: &Expr,
              scope: &Scope,
              line: usize)
              -> EvalResult<Vec<Value>> {
        let mut kept = Vec::with_capacity(elements.len());
        for (i, element) in elements.into_iter().enumerate() {
            let inner = scope.with_this(element.clone(), Some(i));
            if self.eval(predicate, &inner)?.as_bool(line)? {
                kept.push(element);
            }
        }
        Ok(kept)
    }

    /// Stable sort by a key evaluated once per element.
    fn sort(&mut self,
            elements: Vec<Value>,
            key: Option<&Expr>,
            scope: &Scope)
            -> EvalResult<Vec<Value>> {
        let mut keyed = Vec::with_capacity(elements.len());
        for (i, element) in elements.into_iter().enumerate() {
            let key = match key {
                Some(expr) => self.eval(expr, &scope.with_this(element.clone(), Some(i)))?,
                None => element.clone(),
            };
            keyed.push((key, element));
        }

        keyed.sort_by(|(a, _), (b, _)| sort_order(a, b));
        Ok(keyed.into_iter().map(|(_, element)| element).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::run;

    fn output(source: &str) -> String {
        let mut out = Vec::new();
        run(source, Path::new("/"), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn stages_apply_in_written_order() {
        let numbers = "a = 30,29,28,27,26,25,24,23,22,21,20,19,18,17,16,15,14,13,12,11;";
        assert_eq!(output(&format!("{numbers} print a every 4 limit 5 skip 1")),
                   "26\n22\n18\n14\n");
        assert_eq!(output(&format!("{numbers} print a skip 1 every 4 limit 5")),
                   "29\n25\n21\n17\n13\n");
    }

    #[test]
    fn orders_by_a_key() {
        assert_eq!(output("print 'ccc','a','bb' order by length(this) desc"), "ccc\nbb\na\n");
        assert_eq!(output("print 3,1,2 order"), "1\n2\n3\n");
    }

    #[test]
    fn keeps_the_final_elements() {
        assert_eq!(output("print 1,2,3,4 where this > 1 final 2"), "3\n4\n");
    }
}
