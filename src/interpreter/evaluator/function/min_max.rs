use std::cmp::Ordering;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, utils::compare_values},
        value::core::Value,
    },
};

/// Computes the minimum or maximum of the arguments.
///
/// A single argument is iterated over; several arguments are compared with
/// each other. Values are ordered like the relational operators order them,
/// so numbers mix freely while a number and a string cannot be compared.
/// Among equal candidates the first one wins.
///
/// The operation is selected by the `name` parameter, which must be `"min"` or
/// `"max"`.
///
/// # Parameters
/// - `name`: Either `"min"` or `"max"`.
/// - `args`: One iterable, or at least two values.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// The selected element, unchanged.
///
/// # Errors
/// - `InvalidArgument` for an empty iterable.
/// - `TypeError` for elements that cannot be ordered.
///
/// # Example
/// ```
/// use puf::interpreter::{evaluator::function::min_max::min_max, value::core::Value};
///
/// let r = min_max("min", &[Value::Integer(3), Value::Real(2.5)], 1).unwrap();
/// assert_eq!(r, 2.5.into());
///
/// let row = Value::from(vec![Value::Integer(4), Value::Integer(9), Value::Integer(1)]);
/// let r = min_max("max", &[row], 1).unwrap();
/// assert_eq!(r, 9.into());
/// ```
pub fn min_max(name: &str, args: &[Value], line: usize) -> EvalResult<Value> {
    let candidates = match args {
        [single] => single.to_items(line)?,
        _ => args.to_vec(),
    };
    let wanted = if name == "min" { Ordering::Less } else { Ordering::Greater };

    let mut candidates = candidates.into_iter();
    let Some(mut best) = candidates.next() else {
        return Err(RuntimeError::InvalidArgument { details: format!("{name}() arg is an empty sequence"),
                                                   line });
    };

    for candidate in candidates {
        if compare_values(&candidate, &best, line)? == Some(wanted) {
            best = candidate;
        }
    }

    Ok(best)
}
