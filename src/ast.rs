use crate::interpreter::value::{number::Number, period::Period, time::Time, time::TimeField};

/// Represents a literal value in the language.
///
/// Time, period and byte size literals are folded by the parser, so
/// `3 june 2010`, `2 days` and `1 kb` all arrive here as constants.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Number(Number),
    Bool(bool),
    Str(String),
    Time(Time),
    Period(Period),
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Number(Number::Integer(value))
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(Number::Real(value))
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// An abstract syntax tree (AST) node representing an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string, boolean, time or period).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable, attribute or built-in collection by name.
    Variable {
        /// Name as written in the source.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A unary operation (negation or `not`).
    UnaryOp {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Function call expression (e.g. `length(name)`).
    FunctionCall {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// Indexing, `name[3]`. Positions start at zero.
    Index {
        /// The indexed value.
        target: Box<Self>,
        /// The position.
        index:  Box<Self>,
        /// Line number in the source code.
        line:   usize,
    },
    /// Reading a part of a time, `t.day`.
    Field {
        /// The time expression.
        target: Box<Self>,
        /// The part to read.
        field:  TimeField,
        /// Line number in the source code.
        line:   usize,
    },
    /// A parenthesized, comma separated group `(a, b)`.
    Tuple {
        /// The grouped expressions.
        elements: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// A comma separated list `a, b, c`.
    List {
        /// The listed expressions.
        elements: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// A source followed by one or more filtering stages.
    Pipeline {
        /// The expression producing the elements.
        source: Box<Self>,
        /// Stages applied in order.
        stages: Vec<Stage>,
        /// Line number in the source code.
        line:   usize,
    },
}

impl Expr {
    /// The source line of the expression.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Variable { line, .. }
            | Self::UnaryOp { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::FunctionCall { line, .. }
            | Self::Index { line, .. }
            | Self::Field { line, .. }
            | Self::Tuple { line, .. }
            | Self::List { line, .. }
            | Self::Pipeline { line, .. } => *line,
        }
    }
}

/// One stage of a pipeline such as `where size > 0` or `limit 5`.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    /// Keeps the elements for which the predicate holds.
    Where(Expr),
    /// Sorts by a key (the element itself when absent).
    Order {
        /// Sort key evaluated with `this` bound to each element.
        key:        Option<Expr>,
        /// Whether the sorted sequence is reversed.
        descending: bool,
    },
    /// Drops the first N elements.
    Skip(Expr),
    /// Keeps every N-th element, starting with the first.
    Every(Expr),
    /// Keeps at most the first N elements.
    Limit(Expr),
    /// Keeps at most the last N elements.
    Final(Expr),
}

/// Represents unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (`-`).
    Negate,
    /// Logical negation (`not`).
    Not,
}

/// Represents all binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or text concatenation (`+`).
    Add,
    /// Subtraction (`-`).
    Sub,
    /// Multiplication (`*`).
    Mul,
    /// Division (`/`).
    Div,
    /// Remainder (`%`).
    Mod,
    /// Equality (`=`).
    Equal,
    /// Inequality (`!=`).
    NotEqual,
    /// Less than (`<`).
    Less,
    /// Less than or equal (`<=`).
    LessEqual,
    /// Greater than (`>`).
    Greater,
    /// Greater than or equal (`>=`).
    GreaterEqual,
    /// Membership (`in`).
    In,
    /// Pattern match (`like`).
    Like,
    /// Logical and.
    And,
    /// Logical or.
    Or,
    /// Logical exclusive or.
    Xor,
}

/// A filesystem command keyword.
///
/// `createFiles` and `createDirectories` parse to [`Verb::CreateFile`] and
/// [`Verb::CreateDirectory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Create,
    CreateFile,
    CreateDirectory,
    Delete,
    Drop,
    Hide,
    Unhide,
    Lock,
    Unlock,
    Recreate,
    Reaccess,
    Remodify,
    Rechange,
    Rename,
    Move,
    Copy,
}

impl Verb {
    /// Keyword as written in programs.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::CreateFile => "createFile",
            Self::CreateDirectory => "createDirectory",
            Self::Delete => "delete",
            Self::Drop => "drop",
            Self::Hide => "hide",
            Self::Unhide => "unhide",
            Self::Lock => "lock",
            Self::Unlock => "unlock",
            Self::Recreate => "recreate",
            Self::Reaccess => "reaccess",
            Self::Remodify => "remodify",
            Self::Rechange => "rechange",
            Self::Rename => "rename",
            Self::Move => "move",
            Self::Copy => "copy",
        }
    }

    /// What the command does, as used in `Failed to <action> '<name>'`.
    #[must_use]
    pub const fn action(self) -> &'static str {
        match self {
            Self::CreateFile => "create file",
            Self::CreateDirectory => "create directory",
            _ => self.keyword(),
        }
    }

    /// Capitalized action, used in success messages.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::CreateFile => "Create file",
            Self::CreateDirectory => "Create directory",
            Self::Delete => "Delete",
            Self::Drop => "Drop",
            Self::Hide => "Hide",
            Self::Unhide => "Unhide",
            Self::Lock => "Lock",
            Self::Unlock => "Unlock",
            Self::Recreate => "Recreate",
            Self::Reaccess => "Reaccess",
            Self::Remodify => "Remodify",
            Self::Rechange => "Rechange",
            Self::Rename => "Rename",
            Self::Move => "Move",
            Self::Copy => "Copy",
        }
    }

    /// Whether the command is followed by `to <destination>`.
    #[must_use]
    pub const fn takes_destination(self) -> bool {
        matches!(self,
                 Self::Recreate
                 | Self::Reaccess
                 | Self::Remodify
                 | Self::Rechange
                 | Self::Rename
                 | Self::Move
                 | Self::Copy)
    }

    /// Whether the command may be preceded by `force` or `stack`.
    #[must_use]
    pub const fn resolves_conflicts(self) -> bool {
        matches!(self,
                 Self::Create
                 | Self::CreateFile
                 | Self::CreateDirectory
                 | Self::Rename
                 | Self::Move
                 | Self::Copy)
    }

    /// Whether the destination may be followed by `as <name>`.
    #[must_use]
    pub const fn takes_new_name(self) -> bool {
        matches!(self, Self::Move | Self::Copy)
    }
}

/// What a command does when the path it creates is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnConflict {
    /// The command fails.
    #[default]
    Refuse,
    /// `force`: the existing entry is removed first.
    Overwrite,
    /// `stack`: the first free name of the form `name(2).ext` is used.
    Stack,
}

/// The place a value is stored by an assignment or increment.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    /// `a = ...`
    Variable(String),
    /// `a[2] = ...`, replacing one character of a string.
    Index {
        /// The variable holding the string.
        name:  String,
        /// The character position.
        index: Expr,
    },
    /// `t.month = ...`
    Field {
        /// The variable holding the time.
        name:  String,
        /// The part of the time to change.
        field: TimeField,
    },
}

/// A statement: the unit of execution.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// An expression whose value is printed.
    Expression {
        /// The expression.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// `expr { ... }`, running the block once per element of `expr`.
    Apply {
        /// The value the block is applied to.
        target: Expr,
        /// The block.
        body:   Vec<Self>,
        /// Line number in the source code.
        line:   usize,
    },
    /// A bare `{ ... }` block.
    Block {
        /// The statements.
        body: Vec<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// `print` with an optional value; prints `this` when empty.
    Print {
        /// The printed expression, if any.
        value: Option<Expr>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `target = value`
    Assignment {
        /// Where the value goes.
        target: AssignTarget,
        /// The assigned expression.
        value:  Expr,
        /// Line number in the source code.
        line:   usize,
    },
    /// `target += value` and friends.
    CompoundAssignment {
        /// Where the value goes.
        target: AssignTarget,
        /// The arithmetic operator applied.
        op:     BinaryOperator,
        /// The right-hand side.
        value:  Expr,
        /// Line number in the source code.
        line:   usize,
    },
    /// `target++` or `target--`.
    Increment {
        /// The changed variable or field.
        target: AssignTarget,
        /// `1` or `-1`.
        delta:  i64,
        /// Line number in the source code.
        line:   usize,
    },
    /// `if c { ... } else if c { ... } else { ... }`
    If {
        /// Conditions and their blocks, tried in order.
        branches:  Vec<(Expr, Vec<Self>)>,
        /// Block run when no condition holds.
        otherwise: Option<Vec<Self>>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `n times { ... }`
    Times {
        /// The repetition count.
        count: Expr,
        /// The repeated block.
        body:  Vec<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `while c { ... }`
    While {
        /// The loop condition.
        condition: Expr,
        /// The repeated block.
        body:      Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `inside dir { ... }`, running the block with another location.
    Inside {
        /// The directory or directories.
        target: Expr,
        /// The block.
        body:   Vec<Self>,
        /// Line number in the source code.
        line:   usize,
    },
    /// A filesystem command such as `force copy 'a.txt' to 'backup'`.
    Command {
        /// The command.
        verb:        Verb,
        /// The changed entries; `this` when absent.
        target:      Option<Expr>,
        /// What follows `to`.
        destination: Option<Expr>,
        /// What follows `as`.
        new_name:    Option<Expr>,
        /// Set by a leading `force` or `stack`.
        conflict:    OnConflict,
        /// Line number in the source code.
        line:        usize,
    },
    /// `break`, leaving the innermost loop.
    Break {
        /// Line number in the source code.
        line: usize,
    },
    /// `continue`, skipping to the next iteration of the innermost loop.
    Continue {
        /// Line number in the source code.
        line: usize,
    },
    /// `exit`, ending the program successfully.
    Exit {
        /// Line number in the source code.
        line: usize,
    },
    /// `error`, ending the program with a runtime failure.
    Error {
        /// Line number in the source code.
        line: usize,
    },
}

impl Statement {
    /// The source line of the statement.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Expression { line, .. }
            | Self::Apply { line, .. }
            | Self::Block { line, .. }
            | Self::Print { line, .. }
            | Self::Assignment { line, .. }
            | Self::CompoundAssignment { line, .. }
            | Self::Increment { line, .. }
            | Self::If { line, .. }
            | Self::Times { line, .. }
            | Self::While { line, .. }
            | Self::Inside { line, .. }
            | Self::Command { line, .. }
            | Self::Break { line }
            | Self::Continue { line }
            | Self::Exit { line }
            | Self::Error { line } => *line,
        }
    }
}
