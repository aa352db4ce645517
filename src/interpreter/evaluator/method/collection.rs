use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::core::Arity,
            method::core::{check_method_arity, unknown_attribute},
        },
        value::{core::Value, mapping::Mapping},
    },
    util::num::usize_to_i64_checked,
};

/// Calls `index` or `count` on a list or tuple.
///
/// # Errors
/// `InvalidArgument` when `index` does not find the value.
///
/// # Example
/// ```
/// use puf::interpreter::{evaluator::method::collection::call_sequence, value::core::Value};
///
/// let row = vec![Value::Integer(4), Value::Integer(2), Value::Integer(4)];
/// let list = Value::from(row.clone());
///
/// let found = call_sequence(&list, &row, "index", &[Value::Integer(2)], 1).unwrap();
/// assert_eq!(found, Value::Integer(1));
///
/// let count = call_sequence(&list, &row, "count", &[Value::Real(4.0)], 1).unwrap();
/// assert_eq!(count, Value::Integer(2));
/// ```
pub fn call_sequence(receiver: &Value,
                     items: &[Value],
                     name: &str,
                     args: &[Value],
                     line: usize)
                     -> EvalResult<Value> {
    match name {
        "index" => {
            check_method_arity(name, args, Arity::Exact(1), line)?;
            let position = items.iter().position(|item| *item == args[0]).ok_or_else(|| {
                               RuntimeError::InvalidArgument { details: format!("{} is not in {}",
                                                                                args[0].repr(),
                                                                                receiver.type_name()),
                                                               line }
                           })?;
            Ok(Value::Integer(usize_to_i64_checked(position, line)?))
        },
        "count" => {
            check_method_arity(name, args, Arity::Exact(1), line)?;
            let count = items.iter().filter(|item| **item == args[0]).count();
            Ok(Value::Integer(usize_to_i64_checked(count, line)?))
        },
        _ => Err(unknown_attribute(receiver, name, line)),
    }
}

/// Calls `keys`, `values`, `items` or `get` on a mapping.
///
/// `get(key[, default])` returns `default` (or `None`) for a missing key
/// instead of failing.
///
/// # Example
/// ```
/// use puf::interpreter::{
///     evaluator::method::collection::call_mapping,
///     value::{core::Value, mapping::Mapping},
/// };
///
/// let map: Mapping = [("a", Value::Integer(1))].into_iter().collect();
///
/// let items = call_mapping(&map, "items", &[], 1).unwrap();
/// assert_eq!(items.to_string(), "[('a', 1)]");
///
/// let missing = call_mapping(&map, "get", &[Value::from("b"), Value::Integer(0)], 1).unwrap();
/// assert_eq!(missing, Value::Integer(0));
/// ```
pub fn call_mapping(map: &Mapping, name: &str, args: &[Value], line: usize) -> EvalResult<Value> {
    match name {
        "keys" => {
            check_method_arity(name, args, Arity::Exact(0), line)?;
            Ok(Value::from(map.keys().map(Value::from).collect::<Vec<_>>()))
        },
        "values" => {
            check_method_arity(name, args, Arity::Exact(0), line)?;
            Ok(Value::from(map.values().cloned().collect::<Vec<_>>()))
        },
        "items" => {
            check_method_arity(name, args, Arity::Exact(0), line)?;
            let pairs = map.iter()
                           .map(|(key, value)| Value::tuple(vec![Value::from(key), value.clone()]))
                           .collect::<Vec<_>>();
            Ok(Value::from(pairs))
        },
        "get" => {
            check_method_arity(name, args, Arity::OneOf(&[1, 2]), line)?;
            let found = match &args[0] {
                Value::Str(key) => map.get(key).cloned(),
                _ => None,
            };
            Ok(found.or_else(|| args.get(1).cloned()).unwrap_or(Value::None))
        },
        _ => Err(RuntimeError::UnknownAttribute { type_name: "dict",
                                                  name: name.to_string(),
                                                  line }),
    }
}
