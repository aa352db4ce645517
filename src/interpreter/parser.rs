/// Parser entry points and the expression root.
///
/// Contains `parse_command`, `parse_program`, the conditional expression
/// rules and the shared `ParseResult` alias.
pub mod core;

/// Prefix operators and primary expressions.
///
/// Handles unary minus and plus, literals, displays, comprehensions,
/// postfix subscripts, calls and attribute access.
pub mod unary;

/// Binary operator parsing.
///
/// Implements the precedence levels from `or` down to `**`, including
/// chained comparisons, `not in` and `is not`.
pub mod binary;

/// Block parsing.
///
/// Parses sequences of statements grouped in `do { ... }` blocks.
pub mod block;

/// Utility functions for the parser.
///
/// Provides comma-separated lists, identifiers and mapping literals.
pub mod utils;

/// Statement parsing.
///
/// Implements imports, assignments, compound assignments and function
/// definitions.
pub mod statement;
