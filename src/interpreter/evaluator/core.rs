use std::{collections::HashMap, io::Write, path::PathBuf, rc::Rc};

use regex::Regex;
use tracing::{debug, trace};

use crate::{
    ast::{Expr, LiteralValue, Statement},
    error::RuntimeError,
    interpreter::{evaluator::command::CommandOperands, value::core::Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How execution continues after a statement.
///
/// Loops consume `Break` and `Continue`; `Exit` unwinds to the top of the
/// program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Run the next statement.
    Next,
    /// Leave the innermost loop. Holds the line of the `break`.
    Break(usize),
    /// Skip to the next iteration. Holds the line of the `continue`.
    Continue(usize),
    /// Stop the program successfully.
    Exit,
}

impl Flow {
    /// What a loop does after one iteration ended with `self`.
    ///
    /// Returns `None` to keep looping, or the flow the loop itself ends with.
    #[must_use]
    pub const fn after_iteration(self) -> Option<Self> {
        match self {
            Self::Next | Self::Continue(_) => None,
            Self::Break(_) => Some(Self::Next),
            Self::Exit => Some(Self::Exit),
        }
    }
}

/// What a statement sees besides the global variables.
///
/// Scopes are created when a block is applied to a value (binding `this` and
/// `index`) or when `inside` changes the location. They are cheap to clone.
#[derive(Debug, Clone)]
pub struct Scope {
    /// The element a block is applied to.
    pub this:     Option<Value>,
    /// Position of `this` in the collection the block is applied to.
    pub index:    Option<usize>,
    /// Absolute directory that relative paths resolve against.
    pub location: Rc<PathBuf>,
}

impl Scope {
    /// The scope a program starts in.
    #[must_use]
    pub fn root(location: PathBuf) -> Self {
        Self { this:     None,
               index:    None,
               location: Rc::new(location), }
    }

    /// The same scope with `this` and `index` rebound.
    #[must_use]
    pub fn with_this(&self, this: Value, index: Option<usize>) -> Self {
        Self { this: Some(this),
               index,
               location: Rc::clone(&self.location) }
    }

    /// The same scope at another location.
    #[must_use]
    pub fn with_location(&self, location: PathBuf) -> Self {
        Self { this:     self.this.clone(),
               index:    self.index,
               location: Rc::new(location), }
    }
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state shared by every statement: the
/// variables, the outcome of the last filesystem command, compiled `like`
/// patterns and the sink that printed lines are written to.
///
/// ## Usage
///
/// `Context` is created once per program. Statements are executed in order
/// with [`Context::exec`], each against a [`Scope`].
pub struct Context<'out> {
    /// Variables keyed by their lower-case name.
    variables:           HashMap<String, Value>,
    /// Whether the last filesystem command succeeded.
    pub(crate) success:  bool,
    /// Compiled `like` patterns keyed by their source text.
    pub(crate) patterns: HashMap<String, Regex>,
    out:                 &'out mut dyn Write,
}

impl<'out> Context<'out> {
    /// Creates a context that writes printed lines to `out`.
    pub fn new(out: &'out mut dyn Write) -> Self {
        Self { variables: HashMap::new(),
               success:   true,
               patterns:  HashMap::new(),
               out }
    }
}

impl Context<'_> {
    /// Looks up a variable. Names are case-insensitive.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(&name.to_lowercase())
    }

    /// Creates or overwrites a variable. Names are case-insensitive.
    pub fn set_variable(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_lowercase(), value);
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches based on expression variant.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `scope`: Binding of `this`, `index` and the current location.
    ///
    /// # Example
    /// ```
    /// use std::path::PathBuf;
    ///
    /// use uro::{
    ///     ast::Expr,
    ///     interpreter::{
    ///         evaluator::core::{Context, Scope},
    ///         value::core::Value,
    ///     },
    /// };
    ///
    /// let mut out = Vec::new();
    /// let mut ctx = Context::new(&mut out);
    /// let expr = Expr::Literal { value: 10.into(),
    ///                            line:  1, };
    ///
    /// let v = ctx.eval(&expr, &Scope::root(PathBuf::from("/"))).unwrap();
    /// assert_eq!(v, Value::from(10));
    /// ```
    pub fn eval(&mut self, expr: &Expr, scope: &Scope) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Self::eval_literal(value)),
            Expr::Variable { name, line } => self.eval_variable(name, scope, *line),
            Expr::UnaryOp { op, expr, line } => self.eval_unary_op(*op, expr, scope, *line),
            Expr::BinaryOp { left,
                             op,
                             right,
                             line, } => self.eval_binary_op(left, *op, right, scope, *line),
            Expr::FunctionCall { name,
                                 arguments,
                                 line, } => self.eval_function_call(name, arguments, scope, *line),
            Expr::Index { target,
                          index,
                          line, } => self.eval_index(target, index, scope, *line),
            Expr::Field { target,
                          field,
                          line, } => self.eval_field(target, *field, scope, *line),
            Expr::Tuple { elements, .. } => {
                let values = self.eval_all(elements, scope)?;
                Ok(Value::tuple(values))
            },
            Expr::List { elements, .. } => {
                let values = self.eval_all(elements, scope)?;
                Ok(Value::list(values))
            },
            Expr::Pipeline { source,
                             stages,
                             line, } => self.eval_pipeline(source, stages, scope, *line),
        }
    }

    /// Evaluates expressions in order.
    pub(crate) fn eval_all(&mut self, exprs: &[Expr], scope: &Scope) -> EvalResult<Vec<Value>> {
        exprs.iter().map(|expr| self.eval(expr, scope)).collect()
    }

    fn eval_literal(value: &LiteralValue) -> Value {
        match value {
            LiteralValue::Number(n) => Value::Number(*n),
            LiteralValue::Bool(b) => Value::Bool(*b),
            LiteralValue::Str(s) => Value::Str(s.clone()),
            LiteralValue::Time(t) => Value::Time(*t),
            LiteralValue::Period(p) => Value::Period(*p),
        }
    }

    /// Executes a single statement.
    ///
    /// Expression statements print their value, one line per element for
    /// collections. Other statements change variables, control the flow or
    /// act on the filesystem.
    ///
    /// # Returns
    /// How execution continues; [`Flow::Next`] unless the statement is, or
    /// contains, `break`, `continue` or `exit`.
    pub fn exec(&mut self, statement: &Statement, scope: &Scope) -> EvalResult<Flow> {
        trace!(line = statement.line(), "executing statement");

        match statement {
            Statement::Expression { expr, .. } => {
                let value = self.eval(expr, scope)?;
                self.emit(&value)?;
            },
            Statement::Print { value, line } => {
                let value = match value {
                    Some(expr) => self.eval(expr, scope)?,
                    None => self.this_value(scope, *line)?,
                };
                self.emit(&value)?;
            },
            Statement::Apply { target, body, .. } => {
                let value = self.eval(target, scope)?;
                return self.apply_block(&value, body, scope);
            },
            Statement::Block { body, .. } => return self.exec_block(body, scope),
            Statement::Assignment { target,
                                    value,
                                    line, } => self.exec_assignment(target, value, scope, *line)?,
            Statement::CompoundAssignment { target,
                                            op,
                                            value,
                                            line, } => {
                self.exec_compound_assignment(target, *op, value, scope, *line)?;
            },
            Statement::Increment { target,
                                   delta,
                                   line, } => self.exec_increment(target, *delta, scope, *line)?,
            Statement::If { branches,
                            otherwise,
                            line, } => {
                return self.exec_if(branches, otherwise.as_deref(), scope, *line);
            },
            Statement::Times { count,
                               body,
                               line, } => return self.exec_times(count, body, scope, *line),
            Statement::While { condition,
                               body,
                               line, } => return self.exec_while(condition, body, scope, *line),
            Statement::Inside { target, body, .. } => return self.exec_inside(target, body, scope),
            Statement::Command { verb,
                                 target,
                                 destination,
                                 new_name,
                                 conflict,
                                 line, } => {
                let operands = CommandOperands { target:      target.as_ref(),
                                                 destination: destination.as_ref(),
                                                 new_name:    new_name.as_ref(),
                                                 conflict:    *conflict, };
                self.exec_command(*verb, &operands, scope, *line)?;
            },
            Statement::Break { line } => return Ok(Flow::Break(*line)),
            Statement::Continue { line } => return Ok(Flow::Continue(*line)),
            Statement::Exit { line } => {
                debug!(line, "exit");
                return Ok(Flow::Exit);
            },
            Statement::Error { line } => return Err(RuntimeError::Stopped { line: *line }),
        }
        Ok(Flow::Next)
    }

    /// Executes the statements of a block in order, stopping early at
    /// `break`, `continue` or `exit`.
    pub(crate) fn exec_block(&mut self, body: &[Statement], scope: &Scope) -> EvalResult<Flow> {
        for statement in body {
            let flow = self.exec(statement, scope)?;
            if flow != Flow::Next {
                return Ok(flow);
            }
        }
        Ok(Flow::Next)
    }

    /// Prints a value: collections one element per line, anything else on a
    /// single line.
    pub(crate) fn emit(&mut self, value: &Value) -> EvalResult<()> {
        match value.elements() {
            Some(elements) => {
                for element in elements {
                    writeln!(self.out, "{element}")?;
                }
            },
            None => writeln!(self.out, "{value}")?,
        }
        self.out.flush()?;
        Ok(())
    }

    /// Prints one line of text, such as the report of a filesystem command.
    pub(crate) fn report(&mut self, line: &str) -> EvalResult<()> {
        writeln!(self.out, "{line}")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variables_ignore_case() {
        let mut out = Vec::new();
        let mut ctx = Context::new(&mut out);
        ctx.set_variable("Total", Value::from(3));
        assert_eq!(ctx.variable("TOTAL"), Some(&Value::from(3)));
    }

    #[test]
    fn loops_keep_going_after_continue_only() {
        assert_eq!(Flow::Next.after_iteration(), None);
        assert_eq!(Flow::Continue(3).after_iteration(), None);
        assert_eq!(Flow::Break(3).after_iteration(), Some(Flow::Next));
        assert_eq!(Flow::Exit.after_iteration(), Some(Flow::Exit));
    }

    #[test]
    fn collections_print_one_element_per_line() {
        let mut out = Vec::new();
        {
            let mut ctx = Context::new(&mut out);
            ctx.emit(&Value::list(vec![1.into(), 2.into()])).unwrap();
            ctx.emit(&Value::from("x")).unwrap();
        }
        assert_eq!(String::from_utf8(out).unwrap(), "1\n2\nx\n");
    }
}
