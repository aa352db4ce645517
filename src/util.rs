/// Numeric conversion and formatting helpers.
///
/// This module provides checked conversions between integer and
/// floating-point types, sequence index resolution, and the textual form of
/// reals used by the renderer. All conversions return a `Result` instead of
/// silently losing precision.
pub mod num;
