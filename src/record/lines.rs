use std::io::{self, BufRead};

use tracing::trace;

use crate::record::{Row, segment::interpret_segment};

/// How a line is cut into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Separator {
    /// Runs of whitespace; no empty tokens are produced.
    #[default]
    Whitespace,
    /// A literal separator string; empty tokens are preserved.
    Literal(String),
}

impl Separator {
    /// Chooses the policy for an optional separator argument. Unset and
    /// empty separators both mean whitespace.
    ///
    /// # Example
    /// ```
    /// use puf::record::lines::Separator;
    ///
    /// assert_eq!(Separator::from_option(None), Separator::Whitespace);
    /// assert_eq!(Separator::from_option(Some("")), Separator::Whitespace);
    /// assert_eq!(Separator::from_option(Some(",")), Separator::Literal(",".into()));
    /// ```
    #[must_use]
    pub fn from_option(separator: Option<&str>) -> Self {
        match separator {
            None | Some("") => Self::Whitespace,
            Some(literal) => Self::Literal(literal.to_string()),
        }
    }

    /// Splits a line into its raw tokens.
    ///
    /// # Example
    /// ```
    /// use puf::record::lines::Separator;
    ///
    /// assert_eq!(Separator::Whitespace.split("  a  b "), ["a", "b"]);
    /// assert_eq!(Separator::Literal(",".into()).split("a,,b"), ["a", "", "b"]);
    /// ```
    #[must_use]
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            Self::Whitespace => line.split_whitespace().collect(),
            Self::Literal(separator) => line.split(separator.as_str()).collect(),
        }
    }
}

/// Splits a line and coerces every token.
///
/// # Example
/// ```
/// use puf::{
///     interpreter::value::core::Value,
///     record::lines::{Separator, parse_row},
/// };
///
/// let row = parse_row("1 2.5 x", &Separator::Whitespace);
/// assert_eq!(row, vec![Value::Integer(1), Value::Real(2.5), Value::from("x")]);
/// ```
#[must_use]
pub fn parse_row(line: &str, separator: &Separator) -> Row {
    separator.split(line).into_iter().map(interpret_segment).collect()
}

/// A single-pass iterator over the lines of a reader, yielding each line
/// with trailing `\r` and `\n` removed together with its parsed row.
///
/// A read failure, including invalid UTF-8, is yielded once as `Err` and
/// ends the sequence.
///
/// # Example
/// ```
/// use std::io::Cursor;
///
/// use puf::record::lines::{LineParser, Separator};
///
/// let parser = LineParser::new(Cursor::new("a,1\r\nb,2\n"), Separator::Literal(",".into()));
/// let lines: Vec<String> = parser.map(|entry| entry.unwrap().0).collect();
///
/// assert_eq!(lines, ["a,1", "b,2"]);
/// ```
#[derive(Debug)]
pub struct LineParser<R> {
    reader:    R,
    separator: Separator,
    finished:  bool,
}

impl<R: BufRead> LineParser<R> {
    pub const fn new(reader: R, separator: Separator) -> Self {
        Self { reader,
               separator,
               finished: false }
    }
}

impl<R: BufRead> Iterator for LineParser<R> {
    type Item = io::Result<(String, Row)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => {
                self.finished = true;
                None
            },
            Ok(_) => {
                let end = line.trim_end_matches(['\r', '\n']).len();
                line.truncate(end);
                let row = parse_row(&line, &self.separator);
                trace!(line = %line, fields = row.len(), "parsed line");
                Some(Ok((line, row)))
            },
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            },
        }
    }
}
