use std::io;

use thiserror::Error;

/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code: unexpected tokens, invalid literals and misuse of reserved names.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while a program executes, such
/// as type mismatches, wrong argument counts or division by zero.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any failure that stops a program.
#[derive(Debug, Error)]
pub enum Error {
    /// The program could not be parsed; nothing was executed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A statement failed while executing.
    #[error(transparent)]
    Runtime(RuntimeError),
    /// Program output could not be written.
    #[error("Failed to write program output: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Process exit status for this error.
    ///
    /// Syntax and evaluation failures use `2`, output failures use `1`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Parse(_) | Self::Runtime(_) => 2,
            Self::Io(_) => 1,
        }
    }
}

impl From<RuntimeError> for Error {
    fn from(error: RuntimeError) -> Self {
        match error {
            RuntimeError::Output(source) => Self::Io(source),
            other => Self::Runtime(other),
        }
    }
}
