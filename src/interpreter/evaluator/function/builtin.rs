use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::f64_to_i64_checked,
};

/// Returns the absolute value of a number.
///
/// Integers stay integers (booleans count as `0`/`1`); reals stay reals.
/// Non-numeric values cause an `ExpectedNumber` error.
///
/// # Parameters
/// - `args`: Slice containing one argument.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// `Value::Integer` or `Value::Real` depending on input type.
///
/// # Example
/// ```
/// use puf::interpreter::{evaluator::function::builtin::abs, value::core::Value};
///
/// assert_eq!(abs(&[Value::Integer(-42)], 1).unwrap(), Value::Integer(42));
/// assert_eq!(abs(&[Value::Real(-0.5)], 1).unwrap(), Value::Real(0.5));
/// ```
pub fn abs(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::Integer(_) | Value::Bool(_) => args[0].as_integer(line)?
                                                     .checked_abs()
                                                     .map(Value::Integer)
                                                     .ok_or(RuntimeError::Overflow { line }),
        Value::Real(r) => Ok(Value::Real(r.abs())),
        _ => Err(RuntimeError::ExpectedNumber { line }),
    }
}

/// Rounds a number, with halves going to the nearest even digit.
///
/// Without `ndigits` the result is an integer. With `ndigits` a real stays
/// real and is rounded to that many decimal places, while an integer is
/// returned rounded to a multiple of `10^-ndigits`.
///
/// # Parameters
/// - `args`: The number and an optional digit count.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// `Value::Integer` or `Value::Real` as described above.
///
/// # Example
/// ```
/// use puf::interpreter::{evaluator::function::builtin::round, value::core::Value};
///
/// assert_eq!(round(&[Value::Real(2.5)], 1).unwrap(), Value::Integer(2));
/// assert_eq!(round(&[Value::Real(3.5)], 1).unwrap(), Value::Integer(4));
/// assert_eq!(round(&[Value::Real(3.14159), Value::Integer(2)], 1).unwrap(), Value::Real(3.14));
/// assert_eq!(round(&[Value::Integer(1234), Value::Integer(-2)], 1).unwrap(), Value::Integer(1200));
/// ```
pub fn round(args: &[Value], line: usize) -> EvalResult<Value> {
    if !args[0].is_numeric() {
        return Err(RuntimeError::ExpectedNumber { line });
    }

    let Some(ndigits) = args.get(1).filter(|d| !matches!(d, Value::None)) else {
        return match &args[0] {
            Value::Real(r) => Ok(Value::Integer(f64_to_i64_checked(r.round_ties_even(), line)?)),
            other => Ok(Value::Integer(other.as_integer(line)?)),
        };
    };

    let ndigits = i32::try_from(ndigits.as_integer(line)?).map_err(|_| RuntimeError::Overflow { line })?;
    let scale = 10f64.powi(ndigits.abs());
    let value = args[0].as_real(line)?;
    let rounded = if ndigits >= 0 {
        (value * scale).round_ties_even() / scale
    } else {
        (value / scale).round_ties_even() * scale
    };

    match &args[0] {
        Value::Real(_) => Ok(Value::Real(rounded)),
        _ => Ok(Value::Integer(f64_to_i64_checked(rounded, line)?)),
    }
}
