use std::f64::consts;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::core::{Arity, builtin_functions},
        },
        module::{Module, lookup_function},
        value::core::Value,
    },
    util::num::{f64_to_i64_checked, f64_to_i64_truncated},
};

pub static MODULE: Module = Module { name: "math",
                                     member };

/// Generates a one-argument function applying an `f64` method to a number.
///
/// Integers are converted to real numbers before applying the function.
/// Non-numeric values cause an `ExpectedNumber` error.
macro_rules! real_builtin {
    ($fname:ident, $real_fn:ident) => {
        pub fn $fname(args: &[Value], line: usize) -> EvalResult<Value> {
            Ok(Value::Real(args[0].as_real(line)?.$real_fn()))
        }
    };
}

real_builtin!(exp, exp);
real_builtin!(sin, sin);
real_builtin!(cos, cos);
real_builtin!(tan, tan);
real_builtin!(fabs, abs);

builtin_functions! {
    MATH_TABLE, MATH_FUNCTIONS;
    "sqrt"  => { arity: Arity::Exact(1), func: sqrt },
    "exp"   => { arity: Arity::Exact(1), func: exp },
    "log"   => { arity: Arity::OneOf(&[1, 2]), func: log },
    "log10" => { arity: Arity::Exact(1), func: |args, line| log(&[args[0].clone(), Value::Real(10.0)], line) },
    "log2"  => { arity: Arity::Exact(1), func: |args, line| log(&[args[0].clone(), Value::Real(2.0)], line) },
    "sin"   => { arity: Arity::Exact(1), func: sin },
    "cos"   => { arity: Arity::Exact(1), func: cos },
    "tan"   => { arity: Arity::Exact(1), func: tan },
    "floor" => { arity: Arity::Exact(1), func: |args, line| to_integer("floor", args, line) },
    "ceil"  => { arity: Arity::Exact(1), func: |args, line| to_integer("ceil", args, line) },
    "trunc" => { arity: Arity::Exact(1), func: |args, line| to_integer("trunc", args, line) },
    "fabs"  => { arity: Arity::Exact(1), func: fabs },
    "pow"   => { arity: Arity::Exact(2), func: pow },
    "hypot" => { arity: Arity::Exact(2), func: hypot },
    "isnan" => { arity: Arity::Exact(1), func: isnan },
}

fn member(name: &str) -> Option<Value> {
    match name {
        "pi" => Some(Value::Real(consts::PI)),
        "e" => Some(Value::Real(consts::E)),
        "tau" => Some(Value::Real(consts::TAU)),
        "inf" => Some(Value::Real(f64::INFINITY)),
        "nan" => Some(Value::Real(f64::NAN)),
        _ => lookup_function(MATH_TABLE, name),
    }
}

fn domain_error(line: usize) -> RuntimeError {
    RuntimeError::InvalidArgument { details: "math domain error".to_string(),
                                    line }
}

/// Computes the square root of a non-negative number.
///
/// # Example
/// ```
/// use puf::interpreter::{module::math::sqrt, value::core::Value};
///
/// assert_eq!(sqrt(&[Value::Integer(16)], 1).unwrap(), Value::Real(4.0));
/// assert!(sqrt(&[Value::Integer(-1)], 1).is_err());
/// ```
pub fn sqrt(args: &[Value], line: usize) -> EvalResult<Value> {
    let x = args[0].as_real(line)?;
    if x < 0.0 {
        return Err(domain_error(line));
    }
    Ok(Value::Real(x.sqrt()))
}

/// Computes the natural logarithm, or the logarithm to `base` when a second
/// argument is given.
///
/// # Example
/// ```
/// use puf::interpreter::{module::math::log, value::core::Value};
///
/// assert_eq!(log(&[Value::Integer(8), Value::Integer(2)], 1).unwrap(), Value::Real(3.0));
/// assert!(log(&[Value::Integer(0)], 1).is_err());
/// ```
pub fn log(args: &[Value], line: usize) -> EvalResult<Value> {
    let x = args[0].as_real(line)?;
    if x <= 0.0 {
        return Err(domain_error(line));
    }

    match args.get(1) {
        None => Ok(Value::Real(x.ln())),
        Some(base) => {
            let base = base.as_real(line)?;
            if base <= 0.0 || base == 1.0 {
                return Err(domain_error(line));
            }
            if base == 10.0 {
                Ok(Value::Real(x.log10()))
            } else if base == 2.0 {
                Ok(Value::Real(x.log2()))
            } else {
                Ok(Value::Real(x.ln() / base.ln()))
            }
        },
    }
}

/// Applies `floor`, `ceil` or `trunc` and returns an integer. Integers are
/// returned unchanged.
///
/// # Example
/// ```
/// use puf::interpreter::{module::math::to_integer, value::core::Value};
///
/// assert_eq!(to_integer("floor", &[Value::Real(-1.5)], 1).unwrap(), Value::Integer(-2));
/// assert_eq!(to_integer("ceil", &[Value::Real(1.2)], 1).unwrap(), Value::Integer(2));
/// ```
pub fn to_integer(name: &str, args: &[Value], line: usize) -> EvalResult<Value> {
    let x = match &args[0] {
        Value::Integer(_) | Value::Bool(_) => return Ok(Value::Integer(args[0].as_integer(line)?)),
        Value::Real(x) => *x,
        _ => return Err(RuntimeError::ExpectedNumber { line }),
    };

    let result = match name {
        "floor" => f64_to_i64_checked(x.floor(), line)?,
        "ceil" => f64_to_i64_checked(x.ceil(), line)?,
        _ => f64_to_i64_truncated(x, line)?,
    };

    Ok(Value::Integer(result))
}

/// Raises `x` to the power `y`, always as reals.
pub fn pow(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Real(args[0].as_real(line)?.powf(args[1].as_real(line)?)))
}

/// Euclidean distance `sqrt(x*x + y*y)`.
pub fn hypot(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Real(args[0].as_real(line)?.hypot(args[1].as_real(line)?)))
}

/// Tests a number for NaN.
pub fn isnan(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Bool(args[0].as_real(line)?.is_nan()))
}
