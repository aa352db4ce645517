use std::io;

use crate::{
    interpreter::{evaluator::core::Namespace, value::core::Value},
    record::Row,
};

/// A whole stream held in memory: the raw lines, their rows and the columns
/// of those rows.
///
/// `cols[i]` holds the `i`-th element of every row that has one, in row
/// order. Ragged input therefore shortens the later columns rather than
/// padding them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Buffer {
    pub lines: Vec<String>,
    pub rows:  Vec<Row>,
    pub cols:  Vec<Vec<Value>>,
}

impl Buffer {
    /// Drains a line parser into a buffer.
    ///
    /// # Errors
    /// The first read error of the underlying stream.
    ///
    /// # Example
    /// ```
    /// use std::io::Cursor;
    ///
    /// use puf::{
    ///     interpreter::value::core::Value,
    ///     record::{
    ///         buffer::Buffer,
    ///         lines::{LineParser, Separator},
    ///     },
    /// };
    ///
    /// let parser = LineParser::new(Cursor::new("1 2\n3 4\n"), Separator::Whitespace);
    /// let buffer = Buffer::from_lines(parser).unwrap();
    ///
    /// assert_eq!(buffer.lines, ["1 2", "3 4"]);
    /// assert_eq!(buffer.cols[0], [Value::Integer(1), Value::Integer(3)]);
    /// ```
    pub fn from_lines<I>(parser: I) -> io::Result<Self>
        where I: Iterator<Item = io::Result<(String, Row)>>
    {
        let mut lines = Vec::new();
        let mut rows = Vec::new();

        for entry in parser {
            let (line, row) = entry?;
            lines.push(line);
            rows.push(row);
        }

        let cols = transpose(&rows);
        Ok(Self { lines, rows, cols })
    }

    /// Builds the whole-buffer environment: `lines` (list of str), `rows`
    /// (list of lists) and `cols` (list of tuples).
    #[must_use]
    pub fn into_environment(self) -> Namespace {
        let lines = self.lines.into_iter().map(Value::from).collect::<Vec<_>>();
        let rows = self.rows.into_iter().map(Value::from).collect::<Vec<_>>();
        let cols = self.cols.into_iter().map(Value::tuple).collect::<Vec<_>>();

        Namespace::from([("lines".to_string(), Value::from(lines)),
                         ("rows".to_string(), Value::from(rows)),
                         ("cols".to_string(), Value::from(cols))])
    }
}

/// Transposes rows into columns.
///
/// There are as many columns as the longest row has elements; column `i`
/// only contains the rows that reach index `i`.
///
/// # Example
/// ```
/// use puf::{interpreter::value::core::Value, record::buffer::transpose};
///
/// let rows = vec![vec![Value::Integer(1), Value::Integer(2)],
///                 vec![Value::Integer(3), Value::Integer(4)],
///                 vec![Value::Integer(5)]];
/// let cols = transpose(&rows);
///
/// assert_eq!(cols, vec![vec![Value::Integer(1), Value::Integer(3), Value::Integer(5)],
///                       vec![Value::Integer(2), Value::Integer(4)]]);
/// ```
#[must_use]
pub fn transpose(rows: &[Row]) -> Vec<Vec<Value>> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);

    (0..width).map(|i| rows.iter().filter_map(|row| row.get(i).cloned()).collect())
              .collect()
}
