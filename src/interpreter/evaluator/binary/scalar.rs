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
    /// Evaluates a scalar arithmetic operation.
    ///
    /// Integer and boolean operands use checked `i64` arithmetic; as soon as
    /// one operand is real both are promoted to `f64`. True division `/`
    /// always produces a real. Floor division and modulo round towards
    /// negative infinity, so the remainder takes the sign of the divisor.
    ///
    /// # Parameters
    /// - `op`: One of `Add`, `Sub`, `Mul`, `Div`, `FloorDiv` or `Mod`.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the computed scalar.
    ///
    /// # Errors
    /// `DivisionByZero`, `Overflow`, or `TypeError` for non-numeric
    /// operands.
    ///
    /// # Example
    /// ```
    /// use puf::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let floor = Context::eval_scalar_op(BinaryOperator::FloorDiv,
    ///                                     &Value::Integer(-7),
    ///                                     &Value::Integer(2),
    ///                                     1).unwrap();
    /// assert_eq!(floor, Value::Integer(-4));
    ///
    /// let rem = Context::eval_scalar_op(BinaryOperator::Mod,
    ///                                   &Value::Integer(-7),
    ///                                   &Value::Integer(3),
    ///                                   1).unwrap();
    /// assert_eq!(rem, Value::Integer(2));
    ///
    /// let div = Context::eval_scalar_op(BinaryOperator::Div,
    ///                                   &Value::Integer(6),
    ///                                   &Value::Integer(4),
    ///                                   1).unwrap();
    /// assert_eq!(div, Value::Real(1.5));
    /// ```
    pub fn eval_scalar_op(op: BinaryOperator,
                          left: &Value,
                          right: &Value,
                          line: usize)
                          -> EvalResult<Value> {
        use Value::{Bool, Integer, Real};

        match (left, right) {
            (Integer(_) | Bool(_), Integer(_) | Bool(_)) if op != BinaryOperator::Div => {
                integer_op(op, left.as_integer(line)?, right.as_integer(line)?, line)
            },
            (Integer(_) | Bool(_) | Real(_), Integer(_) | Bool(_) | Real(_)) => {
                real_op(op, left.as_real(line)?, right.as_real(line)?, line)
            },
            _ => Err(unsupported_operands(op, left, right, line)),
        }
    }
}

fn integer_op(op: BinaryOperator, a: i64, b: i64, line: usize) -> EvalResult<Value> {
    use BinaryOperator::{Add, FloorDiv, Mod, Mul, Sub};

    let result = match op {
        Add => a.checked_add(b),
        Sub => a.checked_sub(b),
        Mul => a.checked_mul(b),
        FloorDiv | Mod => {
            if b == 0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            let rem = a.wrapping_rem(b);
            let adjust = rem != 0 && (rem < 0) != (b < 0);
            if op == Mod {
                Some(if adjust { rem + b } else { rem })
            } else {
                a.checked_div(b).map(|q| if adjust { q - 1 } else { q })
            }
        },
        _ => {
            return Err(RuntimeError::TypeError { details: format!("'{op}' is not an integer operator"),
                                                 line });
        },
    };

    result.map(Value::Integer).ok_or(RuntimeError::Overflow { line })
}

fn real_op(op: BinaryOperator, a: f64, b: f64, line: usize) -> EvalResult<Value> {
    use BinaryOperator::{Add, Div, FloorDiv, Mod, Mul, Sub};

    if matches!(op, Div | FloorDiv | Mod) && b == 0.0 {
        return Err(RuntimeError::DivisionByZero { line });
    }

    Ok(Value::Real(match op {
                       Add => a + b,
                       Sub => a - b,
                       Mul => a * b,
                       Div => a / b,
                       FloorDiv => (a / b).floor(),
                       Mod => {
                           let rem = a % b;
                           if rem != 0.0 && (rem < 0.0) != (b < 0.0) { rem + b } else { rem }
                       },
                       _ => {
                           return Err(RuntimeError::TypeError { details: format!("'{op}' is not an arithmetic operator"),
                                                                line });
                       },
                   }))
}
