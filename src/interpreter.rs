/// The evaluator module executes statements and computes values.
///
/// The evaluator walks the AST, evaluates expressions and pipelines, applies
/// blocks to collections, runs filesystem commands and writes printed output.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Tracks variables, `this`, `index` and the current location.
/// - Reports runtime errors such as type mismatches or division by zero.
pub mod evaluator;
/// Filesystem access shared by the evaluator.
///
/// Resolves paths against the current location, lists directory contents and
/// reads entry attributes such as size, timestamps or visibility.
pub mod filesystem;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// tagged with its line. Keywords are matched case-insensitively.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source lines.
/// - Recognizes numbers, strings, clock times, identifiers and operators.
/// - Reports lexical errors for unknown characters.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// statements, expressions and pipelines.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes.
/// - Folds unit suffixes and month names into time, period and size literals.
/// - Validates grammar, reporting errors with line information.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Numbers, booleans, strings, times, periods, tuples, lists and file entries,
/// together with the conversions between them.
pub mod value;
