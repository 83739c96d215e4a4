//! # uro
//!
//! uro is a small scripting language for querying and manipulating files and
//! directories. Programs mix ordinary expressions (numbers, strings, times and
//! periods) with lazily filtered collections such as
//! `files where size > 1 mb order by modification desc limit 5`.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use std::{
    io::{self, Write},
    path::Path,
};

use logos::Logos;
use tracing::debug;

use crate::{
    ast::Statement,
    error::{Error, ParseError, RuntimeError},
    interpreter::{
        evaluator::core::{Context, Flow, Scope},
        lexer::{LexerExtras, Token},
        parser::core::parse_program_tokens,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums that represent the
/// syntactic structure of a program as a tree. The AST is built by the parser
/// and walked by the evaluator.
///
/// # Responsibilities
/// - Defines expression, pipeline stage and statement types.
/// - Attaches source lines to every node for error reporting.
pub mod ast;
/// Resolved run configuration.
///
/// Turns command line arguments into an absolute working location and the
/// program text, and names the environment variable that controls logging.
pub mod config;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing or
/// evaluating a program, together with the crate level [`Error`] that the
/// command line front end maps to an exit status.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and the filesystem layer to provide a complete runtime.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for numeric conversion and number rendering.
pub mod util;

/// Tokenizes and parses a complete program.
///
/// Parsing always covers the whole source before anything is executed, so a
/// syntax error anywhere in the program means no statement runs.
///
/// # Errors
/// Returns a [`ParseError`] for unknown characters or malformed syntax.
///
/// # Examples
/// ```
/// use uro::parse_program;
///
/// let program = parse_program("a = 2; print a + 3").unwrap();
/// assert_eq!(program.len(), 2);
///
/// assert!(parse_program("print (1 + ").is_err());
/// ```
pub fn parse_program(source: &str) -> Result<Vec<Statement>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            // A line break belongs to the line it ends.
            let line = if tok == Token::NewLine {
                lexer.extras.line - 1
            } else {
                lexer.extras.line
            };
            tokens.push((tok, line));
        } else {
            let slice = lexer.slice();
            return Err(ParseError::UnexpectedToken { token: slice.to_string(),
                                                     line:  lexer.extras.line, });
        }
    }

    let mut iter = tokens.iter().peekable();
    parse_program_tokens(&mut iter)
}

/// Parses and executes a program, writing every printed line to `out`.
///
/// `location` is the initial working directory of the program. Relative paths
/// in the program are resolved against it.
///
/// # Errors
/// Returns [`Error::Parse`] for malformed programs, [`Error::Runtime`] when a
/// statement fails and [`Error::Io`] when `out` cannot be written. Lines
/// printed before a runtime error stay in `out`. `exit` ends the program
/// early with `Ok`; `break` or `continue` outside of a loop is an error.
///
/// # Examples
/// ```
/// use std::path::Path;
///
/// use uro::run;
///
/// let mut out = Vec::new();
/// run("a = 2, 3; print sum(a), a", Path::new("."), &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "5\n2\n3\n");
/// ```
pub fn run(source: &str, location: &Path, out: &mut dyn Write) -> Result<(), Error> {
    let program = parse_program(source)?;
    debug!(statements = program.len(), "parsed program");

    let mut context = Context::new(out);
    let scope = Scope::root(location.to_path_buf());

    for statement in &program {
        match context.exec(statement, &scope)? {
            Flow::Next => {},
            Flow::Exit => break,
            Flow::Break(line) => {
                return Err(RuntimeError::OutsideLoop { keyword: "break",
                                                       line }.into());
            },
            Flow::Continue(line) => {
                return Err(RuntimeError::OutsideLoop { keyword: "continue",
                                                       line }.into());
            },
        }
    }

    Ok(())
}

/// Runs a program against the process's standard output.
///
/// # Errors
/// See [`run`].
pub fn get_result(source: &str, location: &Path) -> Result<(), Error> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    run(source, location, &mut handle)
}
