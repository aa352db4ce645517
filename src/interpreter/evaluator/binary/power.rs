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
    /// Evaluates an exponentiation operation.
    ///
    /// Integer–integer exponentiation with a non-negative exponent uses checked
    /// arithmetic and stays integer. Negative integer exponents, and any real
    /// operand, are computed in floating-point form with `powf`.
    ///
    /// # Parameters
    /// - `base`: The base value.
    /// - `exponent`: The exponent value.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the result of `base ** exponent`.
    ///
    /// # Errors
    /// - `Overflow` when the integer result does not fit in `i64`, or a real
    ///   result from finite operands is not finite.
    /// - `DivisionByZero` for zero raised to a negative power.
    /// - `InvalidArgument` for a negative base with a fractional exponent.
    ///
    /// # Example
    /// ```
    /// use puf::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let b = Value::Integer(2);
    /// let line = 1;
    ///
    /// let result = Context::eval_pow(&b, &Value::Integer(10), line).unwrap();
    /// assert_eq!(result, Value::Integer(1024));
    ///
    /// let result = Context::eval_pow(&b, &Value::Integer(-1), line).unwrap();
    /// assert_eq!(result, Value::Real(0.5));
    ///
    /// assert!(Context::eval_pow(&Value::Real(1.5), &Value::Real(1e308), line).is_err());
    /// ```
    pub fn eval_pow(base: &Value, exponent: &Value, line: usize) -> EvalResult<Value> {
        use Value::{Bool, Integer, Real};

        match (base, exponent) {
            (Integer(_) | Bool(_), Integer(e)) if *e >= 0 => {
                let e = u32::try_from(*e).map_err(|_| RuntimeError::Overflow { line })?;
                base.as_integer(line)?
                    .checked_pow(e)
                    .map(Integer)
                    .ok_or(RuntimeError::Overflow { line })
            },
            (Integer(_) | Bool(_) | Real(_), Integer(_) | Bool(_) | Real(_)) => {
                let b = base.as_real(line)?;
                let e = exponent.as_real(line)?;

                if b == 0.0 && e < 0.0 {
                    return Err(RuntimeError::DivisionByZero { line });
                }
                if b < 0.0 && e.fract() != 0.0 {
                    return Err(RuntimeError::InvalidArgument { details: format!("negative base {b} cannot be raised to the fractional power {e}"),
                                                               line });
                }

                let result = b.powf(e);
                if !result.is_finite() && b.is_finite() && e.is_finite() {
                    return Err(RuntimeError::Overflow { line });
                }
                Ok(Real(result))
            },
            _ => Err(unsupported_operands(BinaryOperator::Pow, base, exponent, line)),
        }
    }
}
