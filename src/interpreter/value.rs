/// The `Value` enum and its conversions.
pub mod core;
/// File entries produced by directory listings.
pub mod file;
/// Integer and real numbers.
pub mod number;
/// Calendar periods.
pub mod period;
/// Calendar times with a display precision.
pub mod time;
