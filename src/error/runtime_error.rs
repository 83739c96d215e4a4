use std::io;

use thiserror::Error;

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Tried to use an undefined variable.
    #[error("Error on line {line}: Unknown variable '{name}'.")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called an unknown function.
    #[error("Error on line {line}: Unknown function '{name}'.")]
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value had an unexpected or incompatible type.
    #[error("Error on line {line}: Type error: {details}.")]
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A boolean value was expected, but not found.
    #[error("Error on line {line}: Expected boolean.")]
    ExpectedBoolean {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A numeric value was expected, but not found.
    #[error("Error on line {line}: Expected number.")]
    ExpectedNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A collection was expected, but a single value was found.
    #[error("Error on line {line}: Expected a collection.")]
    ExpectedCollection {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A time value was expected, but not found.
    #[error("Error on line {line}: Expected time.")]
    ExpectedTime {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An argument was invalid or out of range.
    #[error("Error on line {line}: Invalid argument: {details}.")]
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Error on line {line}: Argument count mismatch in call to '{name}'.")]
    ArgumentCountMismatch {
        /// The function that was called.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to access a list element outside the allowed bounds.
    #[error("Error on line {line}: Index out of bounds. Length is {length}, but found {found} \
             instead.")]
    IndexOutOfBounds {
        /// Number of elements.
        length: usize,
        /// The index that was actually requested.
        found:  i64,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// Attempted division by zero.
    #[error("Error on line {line}: Division by zero.")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A time computation left the supported calendar range.
    #[error("Error on line {line}: Time is out of range.")]
    TimeOutOfRange {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `break` or `continue` was reached outside of any loop.
    #[error("Error on line {line}: '{keyword}' used outside of a loop.")]
    OutsideLoop {
        /// The keyword as written in lower case.
        keyword: &'static str,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The program ran an `error` statement.
    #[error("Error on line {line}: Program stopped with 'error'.")]
    Stopped {
        /// The source line of the statement.
        line: usize,
    },
    /// Program output could not be written.
    #[error("Failed to write program output: {0}")]
    Output(#[from] io::Error),
}
