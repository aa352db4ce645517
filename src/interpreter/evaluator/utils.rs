use std::cmp::Ordering;

use crate::{
    ast::{Expr, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::core::{BUILTIN_FUNCTIONS, lookup_builtin},
        },
        value::{core::Value, mapping::Mapping},
    },
    util::num::{resolve_index, usize_to_i64_checked},
};

impl Context<'_> {
    /// Resolves a variable by name.
    ///
    /// Lookup proceeds through the active frames from innermost outward, then
    /// the locals, then the globals and finally the builtin functions.
    ///
    /// # Parameters
    /// - `name`: Variable name.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// A clone of the bound value.
    ///
    /// # Errors
    /// `UnknownVariable` if the name is bound nowhere. This is the error the
    /// auto-import loop recovers from.
    ///
    /// # Example
    /// ```
    /// use puf::interpreter::{
    ///     evaluator::core::{Context, Namespace},
    ///     module::StandardLibrary,
    ///     value::core::Value,
    /// };
    ///
    /// let mut locals = Namespace::from([("x".to_string(), Value::Integer(5))]);
    /// let mut globals = Namespace::new();
    /// let context = Context::new(&mut locals, &mut globals, &StandardLibrary);
    ///
    /// assert_eq!(context.eval_variable("x", 1).unwrap(), Value::Integer(5));
    /// assert!(context.eval_variable("len", 1).is_ok());
    /// assert!(context.eval_variable("y", 1).is_err());
    /// ```
    pub fn eval_variable(&self, name: &str, line: usize) -> EvalResult<Value> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name))
            .or_else(|| self.locals.get(name))
            .or_else(|| self.globals.get(name))
            .cloned()
            .or_else(|| lookup_builtin(name).map(Value::Builtin))
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           line })
    }

    /// Reads a variable for a compound assignment.
    ///
    /// Same lookup as [`Context::eval_variable`].
    pub fn get_variable(&self, name: &str, line: usize) -> EvalResult<Value> {
        self.eval_variable(name, line)
    }

    /// Binds `name` in the innermost frame, or in the locals when no frame is
    /// active.
    pub fn assign(&mut self, name: &str, value: Value) {
        match self.frames.last_mut() {
            Some(frame) => frame.insert(name.to_string(), value),
            None => self.locals.insert(name.to_string(), value),
        };
    }

    /// Evaluates a conditional expression.
    ///
    /// The condition is tested for truthiness. A missing `else` branch yields
    /// `Value::None` when the condition is false.
    ///
    /// # Parameters
    /// - `condition`: Condition expression.
    /// - `then_branch`: Evaluated when the condition is truthy.
    /// - `else_branch`: Optional alternative.
    ///
    /// # Returns
    /// The value of the branch taken.
    pub fn eval_if_expr(&mut self,
                        condition: &Expr,
                        then_branch: &Expr,
                        else_branch: Option<&Expr>)
                        -> EvalResult<Value> {
        if self.eval(condition)?.is_truthy() {
            self.eval(then_branch)
        } else if let Some(else_expr) = else_branch {
            self.eval(else_expr)
        } else {
            Ok(Value::None)
        }
    }

    /// Evaluates a sequence of statements as a block.
    ///
    /// Blocks do not open a scope: assignments inside a block are visible
    /// after it. The value of the final statement is returned, or
    /// `Value::None` if the block is empty.
    ///
    /// # Parameters
    /// - `statements`: Statements inside the block.
    ///
    /// # Returns
    /// The value of the last executed statement.
    pub fn eval_block(&mut self, statements: &[Statement]) -> EvalResult<Value> {
        self.eval_toplevel(statements)
    }

    /// Evaluates a list of element expressions into concrete values.
    ///
    /// Each element expression is evaluated in order. This helper is used by
    /// list and tuple displays and by call arguments.
    ///
    /// # Parameters
    /// - `elements`: Expressions to evaluate.
    ///
    /// # Returns
    /// A vector of fully evaluated `Value`s.
    pub fn eval_elements(&mut self, elements: &[Expr]) -> EvalResult<Vec<Value>> {
        let mut values = Vec::with_capacity(elements.len());

        for element in elements {
            values.push(self.eval(element)?);
        }

        Ok(values)
    }

    /// Evaluates a mapping literal.
    ///
    /// Entries are evaluated key first, in source order. A repeated key keeps
    /// its first position and its last value.
    ///
    /// # Errors
    /// `TypeError` if a key is not a string.
    pub fn eval_map_literal(&mut self, entries: &[(Expr, Expr)], line: usize) -> EvalResult<Value> {
        let mut mapping = Mapping::new();

        for (key, value) in entries {
            let key = self.eval(key)?;
            let Value::Str(key) = key else {
                return Err(RuntimeError::TypeError { details: format!("mapping keys must be str, not {}",
                                                                      key.type_name()),
                                                     line });
            };
            let value = self.eval(value)?;
            mapping.insert(&key, value);
        }

        Ok(mapping.into())
    }

    /// Evaluates a subscript `target[index]`.
    ///
    /// Lists, tuples and strings take integer indices, negative ones counting
    /// from the end. Mappings take string keys.
    ///
    /// # Errors
    /// - `IndexOutOfBounds` for an index outside the sequence.
    /// - `KeyNotFound` for a missing mapping key.
    /// - `TypeError` for values that cannot be indexed or a wrong index type.
    ///
    /// # Example
    /// ```
    /// use puf::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let row = Value::from(vec![Value::Integer(1), Value::Integer(2)]);
    /// let last = Context::eval_index(&row, &Value::Integer(-1), 1).unwrap();
    ///
    /// assert_eq!(last, Value::Integer(2));
    /// ```
    pub fn eval_index(target: &Value, index: &Value, line: usize) -> EvalResult<Value> {
        match target {
            Value::List(items) | Value::Tuple(items) => {
                let index = sequence_index(index, line)?;
                Ok(items[resolve_index(index, items.len(), line)?].clone())
            },
            Value::Str(s) => {
                let index = sequence_index(index, line)?;
                let chars: Vec<char> = s.chars().collect();
                Ok(chars[resolve_index(index, chars.len(), line)?].to_string()
                                                                   .into())
            },
            Value::Map(map) => {
                let key = index.as_str(line)?;
                map.get(key)
                   .cloned()
                   .ok_or_else(|| RuntimeError::KeyNotFound { key: index.repr(),
                                                              line })
            },
            other => Err(RuntimeError::TypeError { details: format!("'{}' object is not subscriptable",
                                                                    other.type_name()),
                                                   line }),
        }
    }

    /// Evaluates a slice `target[start:stop:step]` of a list, tuple or
    /// string. The result has the same type as the target.
    ///
    /// # Errors
    /// - `InvalidArgument` for a zero step.
    /// - `TypeError` for non-integer bounds or an unsliceable target.
    pub fn eval_slice(&mut self,
                      target: &Expr,
                      start: Option<&Expr>,
                      stop: Option<&Expr>,
                      step: Option<&Expr>,
                      line: usize)
                      -> EvalResult<Value> {
        let target = self.eval(target)?;
        let mut bound = |expr: Option<&Expr>| -> EvalResult<Option<i64>> {
            match expr {
                None => Ok(None),
                Some(expr) => match self.eval(expr)? {
                    Value::None => Ok(None),
                    value => Ok(Some(sequence_index(&value, line)?)),
                },
            }
        };
        let start = bound(start)?;
        let stop = bound(stop)?;
        let step = bound(step)?;

        match &target {
            Value::List(items) => {
                let picked = slice_indices(items.len(), start, stop, step, line)?;
                Ok(picked.into_iter().map(|i| items[i].clone()).collect::<Vec<_>>().into())
            },
            Value::Tuple(items) => {
                let picked = slice_indices(items.len(), start, stop, step, line)?;
                Ok(Value::tuple(picked.into_iter().map(|i| items[i].clone()).collect()))
            },
            Value::Str(s) => {
                let chars: Vec<char> = s.chars().collect();
                let picked = slice_indices(chars.len(), start, stop, step, line)?;
                Ok(picked.into_iter().map(|i| chars[i]).collect::<String>().into())
            },
            other => Err(RuntimeError::TypeError { details: format!("'{}' object cannot be sliced",
                                                                    other.type_name()),
                                                   line }),
        }
    }
}

/// Extracts an integer sequence index.
fn sequence_index(index: &Value, line: usize) -> EvalResult<i64> {
    match index {
        Value::Integer(_) | Value::Bool(_) => index.as_integer(line),
        other => Err(RuntimeError::TypeError { details: format!("indices must be integers, not {}",
                                                                other.type_name()),
                                               line }),
    }
}

/// Computes the positions selected by a slice over a sequence of `len`
/// elements.
///
/// Omitted bounds default to the whole sequence in the direction of the
/// step; out-of-range bounds are clamped rather than rejected.
///
/// # Errors
/// `InvalidArgument` if `step` is zero.
///
/// # Example
/// ```
/// use puf::interpreter::evaluator::utils::slice_indices;
///
/// assert_eq!(slice_indices(5, Some(1), None, None, 1).unwrap(), [1, 2, 3, 4]);
/// assert_eq!(slice_indices(5, None, Some(-1), None, 1).unwrap(), [0, 1, 2, 3]);
/// assert_eq!(slice_indices(5, None, None, Some(-2), 1).unwrap(), [4, 2, 0]);
/// assert!(slice_indices(5, None, None, Some(0), 1).is_err());
/// ```
pub fn slice_indices(len: usize,
                     start: Option<i64>,
                     stop: Option<i64>,
                     step: Option<i64>,
                     line: usize)
                     -> EvalResult<Vec<usize>> {
    let length = usize_to_i64_checked(len, line)?;
    let step = step.unwrap_or(1);
    if step == 0 {
        return Err(RuntimeError::InvalidArgument { details: "slice step cannot be zero".to_string(),
                                                   line });
    }

    let clamp = |bound: i64, low: i64, high: i64| {
        let bound = if bound < 0 { bound + length } else { bound };
        bound.clamp(low, high)
    };

    let mut picked = Vec::new();
    if step > 0 {
        let mut i = start.map_or(0, |s| clamp(s, 0, length));
        let end = stop.map_or(length, |s| clamp(s, 0, length));
        while i < end {
            picked.push(usize::try_from(i).map_err(|_| RuntimeError::Overflow { line })?);
            i += step;
        }
    } else {
        let mut i = start.map_or(length - 1, |s| clamp(s, -1, length - 1));
        let end = stop.map_or(-1, |s| clamp(s, -1, length - 1));
        while i > end {
            picked.push(usize::try_from(i).map_err(|_| RuntimeError::Overflow { line })?);
            i += step;
        }
    }

    Ok(picked)
}

/// Checks if the argument list matches the expected count.
/// Returns an error if the argument count does not match.
///
/// ## Example
/// ```
/// use puf::interpreter::{evaluator::utils::check_arity, value::core::Value};
///
/// let arg_vals = vec![Value::Integer(2), Value::Integer(1)];
/// let line = 15;
///
/// assert!(check_arity("pow", &arg_vals, 2, line).is_ok()); // Requires exactly 2 arguments.
/// assert!(check_arity("pow", &arg_vals, 1, line).is_err());
/// ```
pub fn check_arity<T>(name: &str, args: &[T], expected: usize, line: usize) -> EvalResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                  found: args.len(),
                                                  line })
    }
}

/// Returns `true` if `name` may not be rebound because it names a builtin
/// function.
///
/// # Example
/// ```
/// use puf::interpreter::evaluator::utils::is_reserved_identifier;
///
/// assert!(is_reserved_identifier("len"));
/// assert!(!is_reserved_identifier("total"));
/// ```
#[must_use]
pub fn is_reserved_identifier(name: &str) -> bool {
    BUILTIN_FUNCTIONS.contains(&name)
}

/// Orders two values.
///
/// Numbers compare across `int`, `float` and `bool`; strings, lists and
/// tuples compare lexicographically. `None` is returned when the values are
/// unordered, which only happens for NaN.
///
/// # Errors
/// `TypeError` if the two types cannot be ordered against each other.
///
/// # Example
/// ```
/// use std::cmp::Ordering;
///
/// use puf::interpreter::{evaluator::utils::compare_values, value::core::Value};
///
/// let order = compare_values(&Value::Integer(2), &Value::Real(2.5), 1).unwrap();
/// assert_eq!(order, Some(Ordering::Less));
///
/// assert!(compare_values(&Value::Integer(2), &Value::from("2"), 1).is_err());
/// ```
pub fn compare_values(left: &Value, right: &Value, line: usize) -> EvalResult<Option<Ordering>> {
    use Value::{Bool, Integer, List, Real, Str, Tuple};

    match (left, right) {
        (Integer(_) | Bool(_), Integer(_) | Bool(_)) => {
            Ok(Some(left.as_integer(line)?.cmp(&right.as_integer(line)?)))
        },
        (Integer(_) | Bool(_) | Real(_), Integer(_) | Bool(_) | Real(_)) => {
            Ok(left.as_real(line)?.partial_cmp(&right.as_real(line)?))
        },
        (Str(a), Str(b)) => Ok(Some(a.cmp(b))),
        (List(a), List(b)) | (Tuple(a), Tuple(b)) => {
            for (x, y) in a.iter().zip(b.iter()) {
                if x != y {
                    return compare_values(x, y, line);
                }
            }
            Ok(Some(a.len().cmp(&b.len())))
        },
        _ => Err(RuntimeError::TypeError { details: format!("ordering not supported between '{}' and '{}'",
                                                            left.type_name(),
                                                            right.type_name()),
                                           line }),
    }
}

/// Tests membership for `item in container`.
///
/// Strings test for a substring, lists and tuples for an equal element and
/// mappings for a key.
///
/// # Errors
/// `TypeError` for a non-container, or a non-string item tested against a
/// string.
///
/// # Example
/// ```
/// use puf::interpreter::{evaluator::utils::contains, value::core::Value};
///
/// assert!(contains(&Value::from("a,b"), &Value::from(","), 1).unwrap());
/// assert!(contains(&Value::from(vec![Value::Integer(1)]), &Value::Real(1.0), 1).unwrap());
/// ```
pub fn contains(container: &Value, item: &Value, line: usize) -> EvalResult<bool> {
    match container {
        Value::Str(haystack) => Ok(haystack.contains(item.as_str(line)?)),
        Value::List(items) | Value::Tuple(items) => Ok(items.iter().any(|x| x == item)),
        Value::Map(map) => Ok(matches!(item, Value::Str(key) if map.contains_key(key))),
        other => Err(RuntimeError::TypeError { details: format!("argument of type '{}' is not iterable",
                                                                other.type_name()),
                                               line }),
    }
}
