use std::{iter, rc::Rc};

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::core::unsupported_operands,
            core::{Context, EvalResult},
        },
        value::core::Value,
    },
};

impl Context<'_> {
    /// Concatenates two sequences of the same kind.
    ///
    /// # Errors
    /// `TypeError` when the operands are not both strings, lists or tuples.
    ///
    /// # Example
    /// ```
    /// use puf::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let a = Value::tuple(vec![Value::Integer(1)]);
    /// let b = Value::tuple(vec![Value::Integer(2)]);
    ///
    /// let joined = Context::eval_concat(&a, &b, 1).unwrap();
    /// assert_eq!(joined, Value::tuple(vec![Value::Integer(1), Value::Integer(2)]));
    ///
    /// assert!(Context::eval_concat(&Value::from("a"), &Value::Integer(1), 1).is_err());
    /// ```
    pub fn eval_concat(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
        match (left, right) {
            (Value::Str(a), Value::Str(b)) => Ok(format!("{a}{b}").into()),
            (Value::List(a), Value::List(b)) => Ok(Value::from(joined(a, b))),
            (Value::Tuple(a), Value::Tuple(b)) => Ok(Value::tuple(joined(a, b))),
            _ => Err(unsupported_operands(BinaryOperator::Add, left, right, line)),
        }
    }

    /// Repeats a sequence `count` times. Non-positive counts give an empty
    /// sequence of the same kind.
    ///
    /// # Errors
    /// `Overflow` when the result length does not fit in memory limits of
    /// `usize`.
    pub fn eval_repeat(sequence: &Value, count: i64, line: usize) -> EvalResult<Value> {
        let count = usize::try_from(count.max(0)).map_err(|_| RuntimeError::Overflow { line })?;
        let overflow = |len: usize| len.checked_mul(count).ok_or(RuntimeError::Overflow { line });

        match sequence {
            Value::Str(s) => {
                overflow(s.len())?;
                Ok(s.repeat(count).into())
            },
            Value::List(items) => {
                overflow(items.len())?;
                Ok(Value::from(repeated(items, count)))
            },
            Value::Tuple(items) => {
                overflow(items.len())?;
                Ok(Value::tuple(repeated(items, count)))
            },
            other => Err(unsupported_operands(BinaryOperator::Mul, other, &Value::Integer(0), line)),
        }
    }
}

fn joined(a: &Rc<Vec<Value>>, b: &Rc<Vec<Value>>) -> Vec<Value> {
    a.iter().chain(b.iter()).cloned().collect()
}

fn repeated(items: &[Value], count: usize) -> Vec<Value> {
    iter::repeat_n(items, count).flatten().cloned().collect()
}
