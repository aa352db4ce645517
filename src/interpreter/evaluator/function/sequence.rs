use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::compare_values,
        },
        value::core::Value,
    },
    util::num::usize_to_i64_checked,
};

/// Returns the number of elements of a container or characters of a string.
///
/// # Example
/// ```
/// use puf::interpreter::{evaluator::function::sequence::len, value::core::Value};
///
/// assert_eq!(len(&[Value::from("héllo")], 1).unwrap(), Value::Integer(5));
/// assert!(len(&[Value::Integer(5)], 1).is_err());
/// ```
pub fn len(args: &[Value], line: usize) -> EvalResult<Value> {
    let count = match &args[0] {
        Value::Str(s) => s.chars().count(),
        Value::List(items) | Value::Tuple(items) => items.len(),
        Value::Map(map) => map.len(),
        other => {
            return Err(RuntimeError::TypeError { details: format!("object of type '{}' has no len()",
                                                                  other.type_name()),
                                                 line });
        },
    };

    Ok(Value::Integer(usize_to_i64_checked(count, line)?))
}

/// Adds up the items of an iterable, starting from `start` (default `0`).
///
/// Items are combined with `+`, so mixed integers and reals promote to a
/// real and overflow is reported.
///
/// # Example
/// ```
/// use puf::interpreter::{evaluator::function::sequence::sum, value::core::Value};
///
/// let col = Value::tuple(vec![Value::Integer(1), Value::Integer(3)]);
/// assert_eq!(sum(&[col.clone()], 1).unwrap(), Value::Integer(4));
/// assert_eq!(sum(&[col, Value::Real(0.5)], 1).unwrap(), Value::Real(4.5));
/// ```
pub fn sum(args: &[Value], line: usize) -> EvalResult<Value> {
    let start = args.get(1).cloned().unwrap_or(Value::Integer(0));

    args[0].to_items(line)?
           .iter()
           .try_fold(start, |total, item| Context::eval_binary(BinaryOperator::Add, &total, item, line))
}

/// Returns the items of an iterable as a new list in ascending order.
///
/// The sort is stable. Items that cannot be ordered against each other
/// produce a `TypeError`.
///
/// # Example
/// ```
/// use puf::interpreter::{evaluator::function::sequence::sorted, value::core::Value};
///
/// let row = Value::from(vec![Value::Integer(3), Value::Real(1.5), Value::Integer(2)]);
/// assert_eq!(sorted(&[row], 1).unwrap().to_string(), "[1.5, 2, 3]");
/// ```
pub fn sorted(args: &[Value], line: usize) -> EvalResult<Value> {
    let mut items = args[0].to_items(line)?;
    let mut failure = None;

    items.sort_by(|a, b| match compare_values(a, b, line) {
                      Ok(ordering) => ordering.unwrap_or(Ordering::Equal),
                      Err(e) => {
                          failure.get_or_insert(e);
                          Ordering::Equal
                      },
                  });

    match failure {
        Some(e) => Err(e),
        None => Ok(Value::from(items)),
    }
}

/// Returns the items of an iterable as a list in reverse order.
pub fn reversed(args: &[Value], line: usize) -> EvalResult<Value> {
    let mut items = args[0].to_items(line)?;
    items.reverse();
    Ok(Value::from(items))
}

/// Builds the list of integers `range(stop)`, `range(start, stop)` or
/// `range(start, stop, step)`.
///
/// # Errors
/// - `ExpectedInteger` for non-integer bounds.
/// - `InvalidArgument` for a zero step.
///
/// # Example
/// ```
/// use puf::interpreter::{evaluator::function::sequence::range, value::core::Value};
///
/// let r = range(&[Value::Integer(5), Value::Integer(0), Value::Integer(-2)], 1).unwrap();
/// assert_eq!(r.to_string(), "[5, 3, 1]");
/// ```
pub fn range(args: &[Value], line: usize) -> EvalResult<Value> {
    let bounds = args.iter()
                     .map(|arg| arg.as_integer(line))
                     .collect::<EvalResult<Vec<_>>>()?;
    let (start, stop, step) = match bounds.as_slice() {
        [stop] => (0, *stop, 1),
        [start, stop] => (*start, *stop, 1),
        [start, stop, step, ..] => (*start, *stop, *step),
        [] => {
            return Err(RuntimeError::ArgumentCountMismatch { name: "range".to_string(),
                                                             found: 0,
                                                             line });
        },
    };

    if step == 0 {
        return Err(RuntimeError::InvalidArgument { details: "range() arg 3 must not be zero".to_string(),
                                                   line });
    }

    let mut values = Vec::new();
    let mut current = start;
    while (step > 0 && current < stop) || (step < 0 && current > stop) {
        values.push(Value::Integer(current));
        match current.checked_add(step) {
            Some(next) => current = next,
            None => break,
        }
    }

    Ok(Value::from(values))
}

/// Pairs every item with its position as `(index, item)` tuples, counting
/// from `start` (default `0`).
///
/// # Example
/// ```
/// use puf::interpreter::{evaluator::function::sequence::enumerate, value::core::Value};
///
/// let e = enumerate(&[Value::from("ab"), Value::Integer(1)], 1).unwrap();
/// assert_eq!(e.to_string(), "[(1, 'a'), (2, 'b')]");
/// ```
pub fn enumerate(args: &[Value], line: usize) -> EvalResult<Value> {
    let start = args.get(1).map_or(Ok(0), |s| s.as_integer(line))?;

    let mut index = start;
    let mut pairs = Vec::new();
    for item in args[0].to_items(line)? {
        pairs.push(Value::tuple(vec![Value::Integer(index), item]));
        index = index.checked_add(1).ok_or(RuntimeError::Overflow { line })?;
    }

    Ok(Value::from(pairs))
}

/// Combines several iterables element-wise into tuples, stopping at the
/// shortest.
///
/// # Example
/// ```
/// use puf::interpreter::{evaluator::function::sequence::zip, value::core::Value};
///
/// let names = Value::from(vec![Value::from("a"), Value::from("b"), Value::from("c")]);
/// let counts = Value::from(vec![Value::Integer(1), Value::Integer(2)]);
///
/// assert_eq!(zip(&[names, counts], 1).unwrap().to_string(), "[('a', 1), ('b', 2)]");
/// ```
pub fn zip(args: &[Value], line: usize) -> EvalResult<Value> {
    let columns = args.iter()
                      .map(|arg| arg.to_items(line))
                      .collect::<EvalResult<Vec<_>>>()?;
    let shortest = columns.iter().map(Vec::len).min().unwrap_or(0);

    let rows = (0..shortest).map(|i| Value::tuple(columns.iter().map(|column| column[i].clone()).collect()))
                            .collect::<Vec<_>>();

    Ok(Value::from(rows))
}

/// Implements `any` (`require_all == false`) and `all` (`require_all ==
/// true`) over the truthiness of the items of an iterable.
///
/// # Example
/// ```
/// use puf::interpreter::{evaluator::function::sequence::any_all, value::core::Value};
///
/// let row = Value::from(vec![Value::Integer(0), Value::from("x")]);
///
/// assert_eq!(any_all(false, &[row.clone()], 1).unwrap(), Value::Bool(true));
/// assert_eq!(any_all(true, &[row], 1).unwrap(), Value::Bool(false));
/// ```
pub fn any_all(require_all: bool, args: &[Value], line: usize) -> EvalResult<Value> {
    let items = args[0].to_items(line)?;

    let result = if require_all {
        items.iter().all(Value::is_truthy)
    } else {
        items.iter().any(Value::is_truthy)
    };

    Ok(Value::Bool(result))
}
