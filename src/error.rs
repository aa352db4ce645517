/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of
/// commands and scripts: unexpected tokens, unbalanced brackets, malformed
/// literals and trailing input.
pub mod parse_error;
/// Top-level errors.
///
/// Combines interpreter errors with usage and I/O failures of the stream
/// layer. This is the error type returned by [`crate::run`].
pub mod puf_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: unknown
/// names, type mismatches, bad arguments, overflow and division by zero.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use puf_error::PufError;
pub use runtime_error::RuntimeError;
