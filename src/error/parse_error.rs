use thiserror::Error;

/// Represents all errors that can occur during lexing or parsing.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    /// Found an unexpected token while parsing.
    #[error("Error on line {line}: Unexpected token: {token}.")]
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    #[error("Error on line {line}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("Error on line {line}: Expected closing parenthesis ')' but none found.")]
    ExpectedClosingParen {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A closing bracket `]` was expected but not found.
    #[error("Error on line {line}: Expected closing bracket ']' but none found.")]
    ExpectedClosingBracket {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A block was not opened with `{` or never closed with `}`.
    #[error("Error on line {line}: Expected a block in braces '{{ ... }}'.")]
    ExpectedBlock {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A command that needs a destination was written without `to`.
    #[error("Error on line {line}: Expected 'to' after '{verb}'.")]
    ExpectedTo {
        /// The command keyword.
        verb: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to assign to a reserved identifier name.
    #[error("Error on line {line}: Identifier {name} is reserved.")]
    IdentifierReserved {
        /// The reserved identifier name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A time, period or size literal was malformed.
    #[error("Error on line {line}: Invalid literal: {details}.")]
    InvalidLiteral {
        /// What is wrong with the literal.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A literal value was too large to be represented safely.
    #[error("Error on line {line}: Literal is too large.")]
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `.name` used a field that times do not have.
    #[error("Error on line {line}: Unknown time field '{name}'.")]
    UnknownField {
        /// The field name as written.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
}

impl ParseError {
    /// Places an error raised after the last token on `end`, the line of that
    /// token.
    #[must_use]
    pub(crate) fn at_end(mut self, end: usize) -> Self {
        if let Self::UnexpectedEndOfInput { line }
               | Self::ExpectedBlock { line }
               | Self::ExpectedClosingParen { line }
               | Self::ExpectedClosingBracket { line }
               | Self::ExpectedTo { line, .. } = &mut self
           && *line == 0
        {
            *line = end;
        }
        self
    }
}
