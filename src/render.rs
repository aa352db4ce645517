use std::io::{self, Write};

use crate::interpreter::value::core::Value;

/// Writes an evaluation result to `out`.
///
/// The first matching rule applies:
/// 1. `None` writes nothing at all.
/// 2. A string is written verbatim.
/// 3. A mapping writes one `key=value` line per entry, skipping entries
///    whose value is `None`.
/// 4. A list or tuple writes one line per element, skipping `None`
///    elements.
/// 5. Anything else writes its textual form.
///
/// Every non-`None` result ends with exactly one newline.
///
/// # Errors
/// Failures of the underlying writer.
///
/// # Example
/// ```
/// use puf::{
///     interpreter::value::{core::Value, mapping::Mapping},
///     render::display,
/// };
///
/// let map: Mapping = [("a", Value::Integer(1)), ("b", Value::None), ("c", Value::Integer(3))].into_iter()
///                                                                                            .collect();
/// let mut out = Vec::new();
/// display(&map.into(), &mut out).unwrap();
/// assert_eq!(out, b"a=1\nc=3\n");
///
/// let mut out = Vec::new();
/// display(&Value::None, &mut out).unwrap();
/// assert!(out.is_empty());
/// ```
pub fn display(value: &Value, out: &mut impl Write) -> io::Result<()> {
    match value {
        Value::None => return Ok(()),
        Value::Str(s) => write!(out, "{s}")?,
        Value::Map(map) => {
            let entries = map.iter()
                             .filter(|(_, value)| !matches!(value, Value::None))
                             .map(|(key, value)| format!("{key}={value}"))
                             .collect::<Vec<_>>();
            write!(out, "{}", entries.join("\n"))?;
        },
        Value::List(items) | Value::Tuple(items) => {
            let elements = items.iter()
                                .filter(|item| !matches!(item, Value::None))
                                .map(ToString::to_string)
                                .collect::<Vec<_>>();
            write!(out, "{}", elements.join("\n"))?;
        },
        other => write!(out, "{other}")?,
    }

    writeln!(out)
}

/// Writes the textual form of a value and a newline, whatever its type.
///
/// Used for interactive input, where the result is echoed rather than
/// streamed.
///
/// # Example
/// ```
/// use puf::{interpreter::value::core::Value, render::display_raw};
///
/// let mut out = Vec::new();
/// display_raw(&Value::from(vec![Value::from("a"), Value::Integer(1)]), &mut out).unwrap();
/// assert_eq!(out, b"['a', 1]\n");
/// ```
pub fn display_raw(value: &Value, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{value}")
}
