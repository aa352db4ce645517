use std::{env, path::MAIN_SEPARATOR_STR, process};

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

pub static MODULE: Module = Module { name: "os",
                                     member };

builtin_functions! {
    OS_TABLE, OS_FUNCTIONS;
    "getcwd" => { arity: Arity::Exact(0), func: getcwd },
    "getenv" => { arity: Arity::OneOf(&[1, 2]), func: getenv },
    "getpid" => { arity: Arity::Exact(0), func: getpid },
}

fn member(name: &str) -> Option<Value> {
    match name {
        "sep" => Some(MAIN_SEPARATOR_STR.into()),
        "linesep" => Some(if cfg!(windows) { "\r\n" } else { "\n" }.into()),
        _ => lookup_function(OS_TABLE, name),
    }
}

/// Returns the current working directory.
///
/// # Example
/// ```
/// use puf::interpreter::{module::os::getcwd, value::core::Value};
///
/// assert!(matches!(getcwd(&[], 1).unwrap(), Value::Str(_)));
/// ```
pub fn getcwd(_args: &[Value], line: usize) -> EvalResult<Value> {
    let cwd = env::current_dir().map_err(|e| RuntimeError::OsError { details: e.to_string(),
                                                                     line })?;
    Ok(cwd.to_string_lossy().into_owned().into())
}

/// Returns an environment variable, or the default (`None` if omitted) when
/// it is unset or not valid Unicode.
pub fn getenv(args: &[Value], line: usize) -> EvalResult<Value> {
    let name = args[0].as_str(line)?;
    match env::var(name) {
        Ok(value) => Ok(value.into()),
        Err(_) => Ok(args.get(1).cloned().unwrap_or(Value::None)),
    }
}

/// Returns the id of the current process.
pub fn getpid(_args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::Integer(i64::from(process::id())))
}
