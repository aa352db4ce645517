use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates both operand expressions, left first, and applies `op`.
    pub fn eval_binary_op(&mut self,
                          left: &Expr,
                          op: BinaryOperator,
                          right: &Expr,
                          line: usize)
                          -> EvalResult<Value> {
        let left = self.eval(left)?;
        let right = self.eval(right)?;
        Self::eval_binary(op, &left, &right, line)
    }

    /// Evaluates a binary operation between two values.
    ///
    /// This function routes the operation to specialized handlers depending on
    /// the operator and operand types. `+` and `*` on strings, lists and
    /// tuples go to the sequence handlers, the remaining arithmetic to
    /// `eval_scalar_op`. Power calls `eval_pow`. Relational and equality
    /// operators use `eval_comparison`; `in` and `is` have their own
    /// handlers.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use puf::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let result = Context::eval_binary(BinaryOperator::Add,
    ///                                   &Value::Integer(3),
    ///                                   &Value::Integer(4),
    ///                                   1);
    /// assert_eq!(result.unwrap(), Value::Integer(7));
    ///
    /// let joined = Context::eval_binary(BinaryOperator::Add,
    ///                                   &Value::from("a"),
    ///                                   &Value::from("b"),
    ///                                   1);
    /// assert_eq!(joined.unwrap(), Value::from("ab"));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, Div, Equal, FloorDiv, Greater, GreaterEqual, In, Is, IsNot, Less, LessEqual, Mod,
            Mul, NotEqual, NotIn, Pow, Sub,
        };
        use Value::{Integer, List, Str, Tuple};

        match op {
            Add => match (left, right) {
                (Str(_) | List(_) | Tuple(_), _) | (_, Str(_) | List(_) | Tuple(_)) => {
                    Self::eval_concat(left, right, line)
                },
                _ => Self::eval_scalar_op(op, left, right, line),
            },

            Mul => match (left, right) {
                (Str(_) | List(_) | Tuple(_), Integer(_) | Value::Bool(_)) => {
                    Self::eval_repeat(left, right.as_integer(line)?, line)
                },
                (Integer(_) | Value::Bool(_), Str(_) | List(_) | Tuple(_)) => {
                    Self::eval_repeat(right, left.as_integer(line)?, line)
                },
                _ => Self::eval_scalar_op(op, left, right, line),
            },

            Sub | Div | FloorDiv | Mod => Self::eval_scalar_op(op, left, right, line),

            Pow => Self::eval_pow(left, right, line),

            Less | Greater | LessEqual | GreaterEqual | Equal | NotEqual => {
                Self::eval_comparison(op, left, right, line)
            },

            In | NotIn => Self::eval_membership(op, left, right, line),

            Is | IsNot => Ok(Value::Bool(Self::is_identical(left, right) == (op == Is))),
        }
    }
}

/// Builds the error for an operator applied to unsupported operand types.
pub(super) fn unsupported_operands(op: BinaryOperator,
                                   left: &Value,
                                   right: &Value,
                                   line: usize)
                                   -> RuntimeError {
    RuntimeError::TypeError { details: format!("unsupported operand type(s) for {op}: '{}' and '{}'",
                                               left.type_name(),
                                               right.type_name()),
                              line }
}
