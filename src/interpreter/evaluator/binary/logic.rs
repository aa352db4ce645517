use crate::{
    ast::{Expr, LogicalOperator},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a short-circuit logical operation.
    ///
    /// `and` yields the left operand if it is falsy, otherwise the right one;
    /// `or` yields the left operand if it is truthy, otherwise the right one.
    /// The right operand is only evaluated when it decides the result.
    ///
    /// # Parameters
    /// - `left`: Left operand expression.
    /// - `op`: The logical operator.
    /// - `right`: Right operand expression.
    ///
    /// # Returns
    /// One of the two operand values, not necessarily a boolean.
    ///
    /// # Example
    /// ```
    /// use puf::{
    ///     ast::{Expr, LogicalOperator},
    ///     interpreter::{
    ///         evaluator::core::{Context, Namespace},
    ///         module::StandardLibrary,
    ///         value::core::Value,
    ///     },
    /// };
    ///
    /// let mut locals = Namespace::new();
    /// let mut globals = Namespace::new();
    /// let mut context = Context::new(&mut locals, &mut globals, &StandardLibrary);
    ///
    /// let empty = Expr::Literal { value: "".into(), line: 1 };
    /// let fallback = Expr::Literal { value: "n/a".into(), line: 1 };
    ///
    /// let result = context.eval_logical(&empty, LogicalOperator::Or, &fallback).unwrap();
    /// assert_eq!(result, Value::from("n/a"));
    /// ```
    pub fn eval_logical(&mut self,
                        left: &Expr,
                        op: LogicalOperator,
                        right: &Expr)
                        -> EvalResult<Value> {
        let left = self.eval(left)?;

        match op {
            LogicalOperator::And if !left.is_truthy() => Ok(left),
            LogicalOperator::Or if left.is_truthy() => Ok(left),
            _ => self.eval(right),
        }
    }
}
