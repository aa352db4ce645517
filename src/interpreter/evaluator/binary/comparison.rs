use std::{cmp::Ordering, rc::Rc};

use crate::{
    ast::BinaryOperator::{self},
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::{compare_values, contains},
        },
        value::core::Value::{self},
    },
};

impl Context<'_> {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// `==` and `!=` use structural equality and never fail. The relational
    /// operators order numbers across `int` and `float`, and strings, lists
    /// and tuples lexicographically; a NaN operand makes every relation
    /// false.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    /// - `line`: Current line number used for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean result.
    ///
    /// # Example
    /// ```
    /// use puf::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let a = Value::Integer(3);
    /// let b = Value::Real(5.0);
    /// let line = 1;
    ///
    /// let result = Context::eval_comparison(BinaryOperator::Less, &a, &b, line);
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    ///
    /// let result = Context::eval_comparison(BinaryOperator::Equal, &a, &Value::from("3"), line);
    /// assert_eq!(result.unwrap(), Value::Bool(false));
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

        let result = match op {
            Equal => left == right,
            NotEqual => left != right,
            _ => compare_values(left, right, line)?.is_some_and(|ordering| match op {
                                                       Less => ordering == Ordering::Less,
                                                       Greater => ordering == Ordering::Greater,
                                                       LessEqual => ordering != Ordering::Greater,
                                                       GreaterEqual => ordering != Ordering::Less,
                                                       _ => false,
                                                   }),
        };

        Ok(Value::Bool(result))
    }

    /// Evaluates `item in container` or `item not in container`.
    pub fn eval_membership(op: BinaryOperator,
                           item: &Value,
                           container: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        let found = contains(container, item, line)?;
        Ok(Value::Bool(if op == BinaryOperator::NotIn { !found } else { found }))
    }

    /// Returns `true` if both operands are the same object.
    ///
    /// Scalars are identical when equal and of the same type; containers and
    /// functions only when they share storage.
    ///
    /// # Example
    /// ```
    /// use puf::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let list = Value::from(vec![Value::Integer(1)]);
    ///
    /// assert!(Context::is_identical(&Value::None, &Value::None));
    /// assert!(Context::is_identical(&list, &list.clone()));
    /// assert!(!Context::is_identical(&list, &Value::from(vec![Value::Integer(1)])));
    /// ```
    #[must_use]
    pub fn is_identical(left: &Value, right: &Value) -> bool {
        use Value::{Bool, Builtin, Function, Integer, List, Map, Module, None, Real, Str, Tuple};

        match (left, right) {
            (None, None) => true,
            (Bool(a), Bool(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (Real(a), Real(b)) => a.to_bits() == b.to_bits(),
            (Str(a), Str(b)) => Rc::ptr_eq(a, b),
            (List(a), List(b)) | (Tuple(a), Tuple(b)) => Rc::ptr_eq(a, b),
            (Map(a), Map(b)) => Rc::ptr_eq(a, b),
            (Function(a), Function(b)) => Rc::ptr_eq(a, b),
            (Builtin(a), Builtin(b)) => std::ptr::eq(*a, *b),
            (Module(a), Module(b)) => a.name == b.name,
            _ => false,
        }
    }
}
