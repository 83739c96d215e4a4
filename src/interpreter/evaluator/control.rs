use tracing::debug;

use crate::{
    ast::{Expr, Statement},
    interpreter::{
        evaluator::core::{Context, EvalResult, Flow, Scope},
        filesystem::{self, normalize},
        value::core::Value,
    },
    util::num::count_from_i64,
};

impl Context<'_> {
    /// Runs a block against a value.
    ///
    /// For a collection the block runs once per element, with `this` bound
    /// to the element and `index` to its position. Any other value runs the
    /// block once with `index` 0. Either way the block is a loop for `break`
    /// and `continue`.
    pub(crate) fn apply_block(&mut self,
                              value: &Value,
                              body: &[Statement],
                              scope: &Scope)
                              -> EvalResult<Flow> {
        match value.elements() {
            Some(elements) => {
                for (i, element) in elements.iter().enumerate() {
                    let flow = self.exec_block(body, &scope.with_this(element.clone(), Some(i)))?;
                    if let Some(end) = flow.after_iteration() {
                        return Ok(end);
                    }
                }
                Ok(Flow::Next)
            },
            None => {
                let flow = self.exec_block(body, &scope.with_this(value.clone(), Some(0)))?;
                Ok(flow.after_iteration().unwrap_or(Flow::Next))
            },
        }
    }

    /// Runs the block of the first branch whose condition holds, or the
    /// `else` block when none does.
    pub(crate) fn exec_if(&mut self,
                          branches: &[(Expr, Vec<Statement>)],
                          otherwise: Option<&[Statement]>,
                          scope: &Scope,
                          line: usize)
                          -> EvalResult<Flow> {
        for (condition, body) in branches {
            if self.eval(condition, scope)?.as_bool(line)? {
                return self.exec_block(body, scope);
            }
        }
        match otherwise {
            Some(body) => self.exec_block(body, scope),
            None => Ok(Flow::Next),
        }
    }

    /// Runs a block a fixed number of times. A negative count runs it never.
    pub(crate) fn exec_times(&mut self,
                             count: &Expr,
                             body: &[Statement],
                             scope: &Scope,
                             line: usize)
                             -> EvalResult<Flow> {
        let count = count_from_i64(self.eval(count, scope)?.as_integer(line)?);
        for _ in 0..count {
            if let Some(end) = self.exec_block(body, scope)?.after_iteration() {
                return Ok(end);
            }
        }
        Ok(Flow::Next)
    }

    /// Runs a block while its condition holds.
    pub(crate) fn exec_while(&mut self,
                             condition: &Expr,
                             body: &[Statement],
                             scope: &Scope,
                             line: usize)
                             -> EvalResult<Flow> {
        while self.eval(condition, scope)?.as_bool(line)? {
            if let Some(end) = self.exec_block(body, scope)?.after_iteration() {
                return Ok(end);
            }
        }
        Ok(Flow::Next)
    }

    /// Runs a block with the location moved into a directory.
    ///
    /// A collection of directories runs the block once in each, with `this`
    /// bound to the directory. Targets that are not existing directories are
    /// skipped. `break` leaves the remaining directories unvisited.
    pub(crate) fn exec_inside(&mut self,
                              target: &Expr,
                              body: &[Statement],
                              scope: &Scope)
                              -> EvalResult<Flow> {
        let target = self.eval(target, scope)?;
        let collection = target.is_collection();

        for (i, element) in target.into_elements().into_iter().enumerate() {
            let Some(entry) = filesystem::entry_of(&element, &scope.location) else {
                debug!(target = %element, "skipping inside: not a path");
                continue;
            };
            let location = normalize(&entry.absolute());
            if !location.is_dir() {
                debug!(location = %location.display(), "skipping inside: not a directory");
                continue;
            }

            debug!(location = %location.display(), "entering directory");
            let inner = if collection {
                scope.with_this(element, Some(i)).with_location(location)
            } else {
                scope.with_location(location)
            };
            if let Some(end) = self.exec_block(body, &inner)?.after_iteration() {
                return Ok(end);
            }
        }
        Ok(Flow::Next)
    }
}
