/// Reading characters of strings, elements of collections and parts of times.
pub mod access;
/// Assignments, compound assignments and increments.
pub mod assignment;
/// Binary operators: concatenation chains, arithmetic, comparisons and logic.
pub mod binary;
/// Blocks and control flow: `if`, `times`, `while`, `inside` and applied
/// blocks.
pub mod control;
/// Filesystem commands such as `create`, `delete` or `copy`.
pub mod command;
/// The evaluation context, scopes and the expression and statement dispatch.
pub mod core;
/// Built-in functions.
pub mod function;
/// Lazy filtering stages: `where`, `order`, `skip`, `every`, `limit` and
/// `final`.
pub mod pipeline;
/// Negation and `not`.
pub mod unary;
/// Argument helpers and reserved names.
pub mod utils;
/// Name resolution for variables, `this`, attributes and built-in
/// collections.
pub mod variable;
