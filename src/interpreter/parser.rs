/// Operator precedence levels from `or`/`xor` down to `*`, `/` and `%`.
pub mod binary;
/// Braced statement blocks.
pub mod block;
/// Entry points and the result type shared by all parsing functions.
pub mod core;
/// Number literals with unit suffixes: periods, byte sizes and dates.
pub mod literal;
/// Pipeline stages: `where`, `order by`, `skip`, `every`, `limit`, `final`.
pub mod pipeline;
/// Statements: assignments, control flow, `print` and filesystem commands.
pub mod statement;
/// Unary operators, postfix access and primary expressions.
pub mod unary;
/// Small helpers for token handling.
pub mod utils;
