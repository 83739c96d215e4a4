/// Aggregates over one or more collections: `count`, `sum`, `average`,
/// `median`, `min` and `max`.
pub mod aggregate;
/// Functions over whole collections: `first`, `last`, `any`, `join`,
/// `split`.
pub mod collection;
/// The builtin table, arity checks and the functions that need the
/// evaluation context, such as file attributes and `countInside`.
pub mod core;
/// Rounding, roots, powers and number conversions.
pub mod number;
/// Predicates over text such as `startsWith` or `isDigit`.
pub mod predicate;
/// Text manipulation such as `left`, `substring` or `capitalize`.
pub mod string;
/// Calendar functions: `date`, `monthName`, `easter` and friends.
pub mod time;
