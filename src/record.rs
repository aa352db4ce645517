use crate::interpreter::value::core::Value;

/// Coercion of a single text token to an integer, a real or a string.
pub mod segment;

/// Splitting of stream lines into rows with a separator policy.
///
/// Provides `LineParser`, a single-pass iterator over `(line, row)` pairs
/// read from any `BufRead`.
pub mod lines;

/// Whole-stream aggregation into lines, rows and columns.
pub mod buffer;

/// The coerced tokens of one line, in order.
pub type Row = Vec<Value>;
