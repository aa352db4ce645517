use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{core::Value, mapping::Mapping},
    },
    util::num::f64_to_i64_truncated,
};

/// Converts a value to an integer.
///
/// Reals are truncated toward zero and strings are parsed as base-10
/// integers, ignoring surrounding whitespace. Without an argument the result
/// is `0`.
///
/// # Example
/// ```
/// use puf::interpreter::{evaluator::function::convert::int, value::core::Value};
///
/// assert_eq!(int(&[Value::Real(-3.9)], 1).unwrap(), Value::Integer(-3));
/// assert_eq!(int(&[Value::from(" 42 ")], 1).unwrap(), Value::Integer(42));
/// assert!(int(&[Value::from("4.2")], 1).is_err());
/// ```
pub fn int(args: &[Value], line: usize) -> EvalResult<Value> {
    let Some(value) = args.first() else {
        return Ok(Value::Integer(0));
    };

    match value {
        Value::Integer(_) | Value::Bool(_) => Ok(Value::Integer(value.as_integer(line)?)),
        Value::Real(r) => Ok(Value::Integer(f64_to_i64_truncated(*r, line)?)),
        Value::Str(s) => s.trim()
                          .parse::<i64>()
                          .map(Value::Integer)
                          .map_err(|_| RuntimeError::InvalidArgument { details: format!("invalid literal for int(): {}",
                                                                                        value.repr()),
                                                                       line }),
        other => Err(RuntimeError::TypeError { details: format!("int() argument must be a string or a number, not '{}'",
                                                                other.type_name()),
                                               line }),
    }
}

/// Converts a value to a real.
///
/// Strings are parsed with the usual float grammar, including `inf` and
/// `nan`. Without an argument the result is `0.0`.
///
/// # Example
/// ```
/// use puf::interpreter::{evaluator::function::convert::float, value::core::Value};
///
/// assert_eq!(float(&[Value::Integer(2)], 1).unwrap(), Value::Real(2.0));
/// assert_eq!(float(&[Value::from("1e3")], 1).unwrap(), Value::Real(1000.0));
/// ```
pub fn float(args: &[Value], line: usize) -> EvalResult<Value> {
    let Some(value) = args.first() else {
        return Ok(Value::Real(0.0));
    };

    match value {
        Value::Integer(_) | Value::Bool(_) | Value::Real(_) => Ok(Value::Real(value.as_real(line)?)),
        Value::Str(s) => s.trim()
                          .parse::<f64>()
                          .map(Value::Real)
                          .map_err(|_| RuntimeError::InvalidArgument { details: format!("could not convert string to float: {}",
                                                                                        value.repr()),
                                                                       line }),
        other => Err(RuntimeError::TypeError { details: format!("float() argument must be a string or a number, not '{}'",
                                                                other.type_name()),
                                               line }),
    }
}

/// Returns the display text of a value.
pub fn str(args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(args.first().map_or_else(String::new, ToString::to_string).into())
}

/// Returns the truth value of the argument, `False` without one.
pub fn bool(args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::Bool(args.first().is_some_and(Value::is_truthy)))
}

/// Returns the quoted representation of a value.
///
/// # Example
/// ```
/// use puf::interpreter::{evaluator::function::convert::repr, value::core::Value};
///
/// assert_eq!(repr(&[Value::from("a")], 1).unwrap(), Value::from("'a'"));
/// ```
pub fn repr(args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(args[0].repr().into())
}

/// Collects an iterable into a list.
pub fn list(args: &[Value], line: usize) -> EvalResult<Value> {
    match args.first() {
        Some(value) => Ok(Value::from(value.to_items(line)?)),
        None => Ok(Value::from(Vec::new())),
    }
}

/// Collects an iterable into a tuple.
///
/// # Example
/// ```
/// use puf::interpreter::{evaluator::function::convert::tuple, value::core::Value};
///
/// let t = tuple(&[Value::from("ab")], 1).unwrap();
/// assert_eq!(t.to_string(), "('a', 'b')");
/// ```
pub fn tuple(args: &[Value], line: usize) -> EvalResult<Value> {
    match args.first() {
        Some(value) => Ok(Value::tuple(value.to_items(line)?)),
        None => Ok(Value::tuple(Vec::new())),
    }
}

/// Builds a mapping from another mapping or from an iterable of key/value
/// pairs.
///
/// # Errors
/// `TypeError` if an item is not a pair or a key is not a string.
///
/// # Example
/// ```
/// use puf::interpreter::{evaluator::function::convert::dict, value::core::Value};
///
/// let pairs = Value::from(vec![Value::tuple(vec![Value::from("a"), Value::Integer(1)])]);
/// let map = dict(&[pairs], 1).unwrap();
///
/// assert_eq!(map.to_string(), "{'a': 1}");
/// ```
pub fn dict(args: &[Value], line: usize) -> EvalResult<Value> {
    let Some(source) = args.first() else {
        return Ok(Mapping::new().into());
    };
    if let Value::Map(map) = source {
        return Ok(Mapping::clone(map).into());
    }

    let mut mapping = Mapping::new();
    for item in source.to_items(line)? {
        let pair = item.to_items(line)?;
        let [key, value] = pair.as_slice() else {
            return Err(RuntimeError::TypeError { details: format!("dictionary update element has length {}; 2 is required",
                                                                  pair.len()),
                                                 line });
        };
        mapping.insert(key.as_str(line)?, value.clone());
    }

    Ok(mapping.into())
}
