use std::io;

use serde::Serialize;
use serde_json::{Map, Number, ser::Formatter};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::core::{Arity, builtin_functions},
        },
        module::{Module, lookup_function},
        value::{core::Value, mapping::Mapping},
    },
};

pub static MODULE: Module = Module { name: "json",
                                     member };

builtin_functions! {
    JSON_TABLE, JSON_FUNCTIONS;
    "dumps" => { arity: Arity::Exact(1), func: dumps },
    "loads" => { arity: Arity::Exact(1), func: loads },
}

fn member(name: &str) -> Option<Value> {
    lookup_function(JSON_TABLE, name)
}

/// Writes `", "` between items and `": "` after keys, on a single line.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
        where W: ?Sized + io::Write
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
        where W: ?Sized + io::Write
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
        where W: ?Sized + io::Write
    {
        writer.write_all(b": ")
    }
}

/// Serializes a value as JSON text.
///
/// Lists and tuples become arrays, mappings objects in insertion order.
///
/// # Errors
/// `TypeError` for functions and modules, `InvalidArgument` for NaN and
/// infinities.
///
/// # Example
/// ```
/// use puf::interpreter::{module::json::dumps, value::{core::Value, mapping::Mapping}};
///
/// let map: Mapping = [("b", Value::Integer(1)),
///                     ("a", Value::tuple(vec![Value::None, Value::Real(2.5)]))].into_iter()
///                                                                               .collect();
///
/// assert_eq!(dumps(&[map.into()], 1).unwrap(), Value::from(r#"{"b": 1, "a": [null, 2.5]}"#));
/// ```
pub fn dumps(args: &[Value], line: usize) -> EvalResult<Value> {
    let json = to_json(&args[0], line)?;

    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, SpacedFormatter);
    json.serialize(&mut serializer)
        .map_err(|e| RuntimeError::InvalidArgument { details: e.to_string(),
                                                     line })?;

    Ok(String::from_utf8_lossy(&buffer).into_owned().into())
}

/// Parses JSON text into a value.
///
/// Objects become mappings, arrays lists; numbers without a fraction or
/// exponent that fit in `i64` become integers.
///
/// # Errors
/// `InvalidArgument` with the parser's message for malformed input.
///
/// # Example
/// ```
/// use puf::interpreter::{module::json::loads, value::core::Value};
///
/// let value = loads(&[Value::from(r#"{"n": [1, 2.0, true, null]}"#)], 1).unwrap();
/// assert_eq!(value.to_string(), "{'n': [1, 2.0, True, None]}");
/// ```
pub fn loads(args: &[Value], line: usize) -> EvalResult<Value> {
    let text = args[0].as_str(line)?;
    let json: serde_json::Value =
        serde_json::from_str(text).map_err(|e| RuntimeError::InvalidArgument { details: format!("invalid JSON: {e}"),
                                                                               line })?;
    Ok(from_json(json))
}

fn to_json(value: &Value, line: usize) -> EvalResult<serde_json::Value> {
    Ok(match value {
        Value::None => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Integer(n) => serde_json::Value::Number((*n).into()),
        Value::Real(r) => {
            let number = Number::from_f64(*r).ok_or_else(|| RuntimeError::InvalidArgument { details: format!("{value} is not JSON compliant"),
                                                                                              line })?;
            serde_json::Value::Number(number)
        },
        Value::Str(s) => serde_json::Value::String(s.to_string()),
        Value::List(items) | Value::Tuple(items) => {
            serde_json::Value::Array(items.iter()
                                          .map(|item| to_json(item, line))
                                          .collect::<EvalResult<_>>()?)
        },
        Value::Map(map) => {
            let mut object = Map::new();
            for (key, item) in map.iter() {
                object.insert(key.to_string(), to_json(item, line)?);
            }
            serde_json::Value::Object(object)
        },
        other => {
            return Err(RuntimeError::TypeError { details: format!("object of type '{}' is not JSON serializable",
                                                                  other.type_name()),
                                                 line });
        },
    })
}

fn from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::None,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => n.as_f64().map_or(Value::None, Value::Real),
        },
        serde_json::Value::String(s) => s.into(),
        serde_json::Value::Array(items) => Value::from(items.into_iter().map(from_json).collect::<Vec<_>>()),
        serde_json::Value::Object(object) => {
            object.into_iter()
                  .map(|(key, item)| (key, from_json(item)))
                  .collect::<Mapping>()
                  .into()
        },
    }
}
