/// Operator routing.
pub mod core;

/// Numeric `+ - * / // %` on integers, reals and booleans.
pub mod scalar;

/// Exponentiation.
pub mod power;

/// Relational operators, equality, membership and identity.
pub mod comparison;

/// Short-circuit `and` / `or`.
pub mod logic;

/// Concatenation and repetition of strings, lists and tuples.
pub mod sequence;
