use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::core::Arity,
            method::core::{check_method_arity, unknown_attribute},
        },
        value::core::Value,
    },
    util::num::usize_to_i64_checked,
};

/// Calls the string method `name` on `s`.
///
/// # Errors
/// `UnknownAttribute` for an unknown method, `ArgumentCountMismatch` for a
/// wrong number of arguments and `TypeError` for non-string arguments.
///
/// # Example
/// ```
/// use puf::interpreter::{evaluator::method::string::call, value::core::Value};
///
/// let parts = call("a,b,,c", "split", &[Value::from(",")], 1).unwrap();
/// assert_eq!(parts.to_string(), "['a', 'b', '', 'c']");
///
/// let joined = call("-", "join", &[Value::from("abc")], 1).unwrap();
/// assert_eq!(joined, Value::from("a-b-c"));
/// ```
pub fn call(s: &str, name: &str, args: &[Value], line: usize) -> EvalResult<Value> {
    let arity = match name {
        "upper" | "lower" | "isdigit" => Arity::Exact(0),
        "strip" | "lstrip" | "rstrip" => Arity::OneOf(&[0, 1]),
        "split" => Arity::OneOf(&[0, 1, 2]),
        "startswith" | "endswith" | "join" | "find" | "count" => Arity::Exact(1),
        "replace" => Arity::OneOf(&[2, 3]),
        _ => return Err(unknown_attribute(&Value::from(s), name, line)),
    };
    check_method_arity(name, args, arity, line)?;

    match name {
        "upper" => Ok(s.to_uppercase().into()),
        "lower" => Ok(s.to_lowercase().into()),
        "isdigit" => Ok(Value::Bool(!s.is_empty() && s.chars().all(char::is_numeric))),
        "strip" | "lstrip" | "rstrip" => strip(s, name, args.first(), line),
        "split" => split(s, args, line),
        "startswith" | "endswith" => affix(s, name, &args[0], line),
        "join" => join(s, &args[0], line),
        "find" => find(s, args[0].as_str(line)?, line),
        "count" => count(s, args[0].as_str(line)?, line),
        _ => replace(s, args, line),
    }
}

/// Strips whitespace, or any of the given characters, from one or both ends.
fn strip(s: &str, name: &str, chars: Option<&Value>, line: usize) -> EvalResult<Value> {
    let stripped = match chars {
        None | Some(Value::None) => match name {
            "lstrip" => s.trim_start(),
            "rstrip" => s.trim_end(),
            _ => s.trim(),
        },
        Some(chars) => {
            let set: Vec<char> = chars.as_str(line)?.chars().collect();
            let pattern = |c: char| set.contains(&c);
            match name {
                "lstrip" => s.trim_start_matches(pattern),
                "rstrip" => s.trim_end_matches(pattern),
                _ => s.trim_matches(pattern),
            }
        },
    };

    Ok(stripped.into())
}

/// Splits on runs of whitespace, or literally on a separator, at most
/// `maxsplit` times when that is non-negative.
fn split(s: &str, args: &[Value], line: usize) -> EvalResult<Value> {
    let separator = match args.first() {
        None | Some(Value::None) => None,
        Some(sep) => Some(sep.as_str(line)?),
    };
    let maxsplit = args.get(1).map_or(Ok(-1), |m| m.as_integer(line))?;
    let limit = usize::try_from(maxsplit).ok();

    let parts: Vec<Value> = match separator {
        Some("") => {
            return Err(RuntimeError::InvalidArgument { details: "empty separator".to_string(),
                                                       line });
        },
        Some(sep) => match limit {
            Some(limit) => s.splitn(limit + 1, sep).map(Value::from).collect(),
            None => s.split(sep).map(Value::from).collect(),
        },
        None => split_whitespace(s, limit).into_iter().map(Value::from).collect(),
    };

    Ok(Value::from(parts))
}

/// Whitespace splitting with an optional split limit; the remainder after
/// the last split keeps its inner whitespace.
fn split_whitespace(s: &str, limit: Option<usize>) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = s.trim_start();

    while !rest.is_empty() {
        if limit.is_some_and(|limit| parts.len() == limit) {
            parts.push(rest.trim_end());
            break;
        }
        match rest.find(char::is_whitespace) {
            Some(end) => {
                parts.push(&rest[..end]);
                rest = rest[end..].trim_start();
            },
            None => {
                parts.push(rest);
                break;
            },
        }
    }

    parts
}

/// `startswith` / `endswith`, accepting a string or a tuple of candidates.
fn affix(s: &str, name: &str, affix: &Value, line: usize) -> EvalResult<Value> {
    let candidates = match affix {
        Value::Tuple(items) => items.to_vec(),
        other => vec![other.clone()],
    };

    for candidate in &candidates {
        let candidate = candidate.as_str(line)?;
        let hit = if name == "startswith" {
            s.starts_with(candidate)
        } else {
            s.ends_with(candidate)
        };
        if hit {
            return Ok(Value::Bool(true));
        }
    }

    Ok(Value::Bool(false))
}

/// Joins the string items of an iterable with `s` as separator.
fn join(s: &str, items: &Value, line: usize) -> EvalResult<Value> {
    let items = items.to_items(line)?;
    let mut parts = Vec::with_capacity(items.len());

    for item in &items {
        match item {
            Value::Str(text) => parts.push(&**text),
            other => {
                return Err(RuntimeError::TypeError { details: format!("join() expected str items, found {}",
                                                                      other.type_name()),
                                                     line });
            },
        }
    }

    Ok(parts.join(s).into())
}

/// Character index of the first occurrence of `needle`, or `-1`.
fn find(s: &str, needle: &str, line: usize) -> EvalResult<Value> {
    match s.find(needle) {
        Some(byte_index) => Ok(Value::Integer(usize_to_i64_checked(s[..byte_index].chars().count(), line)?)),
        None => Ok(Value::Integer(-1)),
    }
}

/// Number of non-overlapping occurrences of `needle`.
fn count(s: &str, needle: &str, line: usize) -> EvalResult<Value> {
    let occurrences = if needle.is_empty() {
        s.chars().count() + 1
    } else {
        s.matches(needle).count()
    };

    Ok(Value::Integer(usize_to_i64_checked(occurrences, line)?))
}

/// Replaces occurrences of the first argument with the second, at most
/// `count` times when a non-negative count is given.
fn replace(s: &str, args: &[Value], line: usize) -> EvalResult<Value> {
    let from = args[0].as_str(line)?;
    let to = args[1].as_str(line)?;

    let replaced = match args.get(2).map(|c| c.as_integer(line)).transpose()? {
        Some(count) if count >= 0 => {
            let count = usize::try_from(count).map_err(|_| RuntimeError::Overflow { line })?;
            s.replacen(from, to, count)
        },
        _ => s.replace(from, to),
    };

    Ok(replaced.into())
}
