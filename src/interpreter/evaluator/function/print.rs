use crate::interpreter::{evaluator::core::EvalResult, value::core::Value};

/// Prints the arguments to standard output, separated by single spaces and
/// followed by a newline.
///
/// Strings are printed without quotes; every other value uses its display
/// form. The call itself evaluates to `None`, so a command consisting of a
/// bare `print(...)` renders nothing further.
///
/// # Parameters
/// - `args`: Values to print, possibly none.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// `Value::None`.
///
/// # Example
/// ```
/// use puf::interpreter::{evaluator::function::print::print, value::core::Value};
///
/// // The function prints to stdout, but the doctest only checks the result.
/// let result = print(&[Value::from("total"), Value::Integer(42)], 1).unwrap();
///
/// assert_eq!(result, Value::None);
/// ```
pub fn print(args: &[Value], _line: usize) -> EvalResult<Value> {
    let text = args.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");

    println!("{text}");
    Ok(Value::None)
}
