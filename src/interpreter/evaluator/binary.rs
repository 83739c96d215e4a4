/// Comparison of values across types.
pub mod comparison;
/// Left-to-right folding of `+` and `-` chains, including text concatenation.
pub mod concat;
/// Dispatch of binary operators.
pub mod core;
/// Short-circuiting `and`, `or` and `xor`.
pub mod logic;
/// `in` and `like`.
pub mod membership;
/// Multiplication, division and remainder.
pub mod scalar;
