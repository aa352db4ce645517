/// Numeric builtins: `abs` and `round`.
pub mod builtin;
/// Type conversions: `int`, `float`, `str`, `bool`, `repr`, `list`, `tuple`
/// and `dict`.
pub mod convert;
/// `min` and `max` function implementations.
///
/// Returns the minimum or maximum of an iterable or of several arguments.
pub mod min_max;
/// The `print` function implementation.
///
/// Writes its arguments to standard output.
pub mod print;
/// Builtins over iterables: `len`, `sum`, `sorted`, `reversed`, `range`,
/// `enumerate`, `zip`, `any` and `all`.
pub mod sequence;

/// The builtin table, arity checking and function calls.
pub mod core;
