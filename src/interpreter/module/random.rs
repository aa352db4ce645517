use rand::{Rng, seq::SliceRandom};

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
};

pub static MODULE: Module = Module { name: "random",
                                     member };

builtin_functions! {
    RANDOM_TABLE, RANDOM_FUNCTIONS;
    "random"  => { arity: Arity::Exact(0), func: random },
    "randint" => { arity: Arity::Exact(2), func: randint },
    "choice"  => { arity: Arity::Exact(1), func: choice },
    "uniform" => { arity: Arity::Exact(2), func: uniform },
}

fn member(name: &str) -> Option<Value> {
    lookup_function(RANDOM_TABLE, name)
}

/// A real in `[0, 1)`.
pub fn random(_args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::Real(rand::thread_rng().r#gen::<f64>()))
}

/// An integer in `[a, b]`, both ends included.
///
/// # Example
/// ```
/// use puf::interpreter::{module::random::randint, value::core::Value};
///
/// let n = randint(&[Value::Integer(1), Value::Integer(6)], 1).unwrap();
/// assert!(matches!(n, Value::Integer(1..=6)));
/// assert!(randint(&[Value::Integer(6), Value::Integer(1)], 1).is_err());
/// ```
pub fn randint(args: &[Value], line: usize) -> EvalResult<Value> {
    let low = args[0].as_integer(line)?;
    let high = args[1].as_integer(line)?;
    if low > high {
        return Err(RuntimeError::InvalidArgument { details: format!("empty range for randint({low}, {high})"),
                                                   line });
    }
    Ok(Value::Integer(rand::thread_rng().gen_range(low..=high)))
}

/// A uniformly chosen item of a non-empty iterable.
pub fn choice(args: &[Value], line: usize) -> EvalResult<Value> {
    let items = args[0].to_items(line)?;
    items.choose(&mut rand::thread_rng())
         .cloned()
         .ok_or_else(|| RuntimeError::InvalidArgument { details: "cannot choose from an empty sequence".to_string(),
                                                        line })
}

/// A real between `a` and `b`.
pub fn uniform(args: &[Value], line: usize) -> EvalResult<Value> {
    let a = args[0].as_real(line)?;
    let b = args[1].as_real(line)?;
    Ok(Value::Real(a + (b - a) * rand::thread_rng().r#gen::<f64>()))
}
