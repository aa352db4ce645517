use crate::interpreter::value::core::Value;

/// Coerces a token to the most specific value it parses as.
///
/// Integer parsing is tried first, then real parsing; surrounding whitespace
/// is ignored by both. A token that is neither is kept unchanged as a
/// string, so this never fails. Integers outside the `i64` range parse as
/// reals.
///
/// # Parameters
/// - `token`: Text between two separators.
///
/// # Returns
/// `Value::Integer`, `Value::Real` or `Value::Str`.
///
/// # Example
/// ```
/// use puf::{interpreter::value::core::Value, record::segment::interpret_segment};
///
/// assert_eq!(interpret_segment("42"), Value::Integer(42));
/// assert_eq!(interpret_segment("007"), Value::Integer(7));
/// assert_eq!(interpret_segment(" -3 "), Value::Integer(-3));
/// assert_eq!(interpret_segment("3.14"), Value::Real(3.14));
/// assert_eq!(interpret_segment("1e3"), Value::Real(1000.0));
/// assert_eq!(interpret_segment("abc"), Value::from("abc"));
/// assert_eq!(interpret_segment(""), Value::from(""));
/// ```
#[must_use]
pub fn interpret_segment(token: &str) -> Value {
    let trimmed = token.trim();

    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::Integer(n);
    }
    if let Ok(r) = trimmed.parse::<f64>() {
        return Value::Real(r);
    }

    Value::from(token)
}
