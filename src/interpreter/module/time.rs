use std::time::{SystemTime, UNIX_EPOCH};

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

pub static MODULE: Module = Module { name: "time",
                                     member };

builtin_functions! {
    TIME_TABLE, TIME_FUNCTIONS;
    "time" => { arity: Arity::Exact(0), func: time },
}

fn member(name: &str) -> Option<Value> {
    lookup_function(TIME_TABLE, name)
}

/// Seconds since the Unix epoch as a real.
pub fn time(_args: &[Value], line: usize) -> EvalResult<Value> {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH)
                                   .map_err(|e| RuntimeError::OsError { details: e.to_string(),
                                                                        line })?;
    Ok(Value::Real(elapsed.as_secs_f64()))
}
