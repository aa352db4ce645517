/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions, including
/// arithmetic, sequence operators, comparisons, membership and identity.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation, unary plus and logical NOT.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the main evaluation engine, the runtime context and the name
/// resolution rules.
pub mod core;

/// Evaluation of for-loop expressions and list comprehensions.
pub mod for_loop;

/// Utility functions for evaluation.
///
/// Provides helpers and reusable routines shared by evaluation logic:
/// variable lookup, subscripts, ordering and membership.
pub mod utils;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, argument checking, and
/// return value computation.
pub mod function;

/// Method calls on strings, sequences, mappings and modules.
pub mod method;

/// Entry points that evaluate a command or a script against a pair of
/// namespaces, including the auto-import retry loop.
pub mod dispatch;
