use std::{
    io::{self, BufRead},
    mem,
};

use tracing::debug;

use crate::{
    interpreter::{evaluator::core::Namespace, value::core::Value},
    record::{
        Row,
        buffer::Buffer,
        lines::{LineParser, Separator},
    },
};

/// How a non-interactive stream is exposed to the program.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StreamOptions {
    /// One environment per line (`line`, `row`) instead of one for the whole
    /// stream (`lines`, `rows`, `cols`).
    pub line_mode:   bool,
    /// Discard the first line before parsing.
    pub skip_header: bool,
    pub separator:   Separator,
}

/// The lazy sequence of environments produced by [`interpret_stream`].
#[derive(Debug)]
pub struct Environments<R> {
    state: State<R>,
}

#[derive(Debug)]
enum State<R> {
    Interactive,
    Pending { reader: R, options: StreamOptions },
    Lines(LineParser<R>),
    Done,
}

/// Builds the environments for one input stream.
///
/// - Interactive input yields exactly one empty environment and is never
///   read.
/// - Otherwise, with `skip_header`, one line is read and discarded first.
/// - In line mode every line yields an environment binding `line` (str)
///   and `row` (list).
/// - Otherwise the whole stream is buffered into a single environment
///   binding `lines`, `rows` and `cols`.
///
/// Nothing is read until the first call to `next`. A read error is yielded
/// once and ends the sequence.
///
/// # Example
/// ```
/// use std::io::Cursor;
///
/// use puf::{
///     interpreter::value::core::Value,
///     stream::orchestrator::{StreamOptions, interpret_stream},
/// };
///
/// let options = StreamOptions { line_mode: true,
///                               skip_header: true,
///                               ..StreamOptions::default() };
/// let environments = interpret_stream(Cursor::new("name n\na 1\nb 2\n"), false, &options).collect::<Result<Vec<_>, _>>()
///                                                                                     .unwrap();
///
/// assert_eq!(environments.len(), 2);
/// assert_eq!(environments[0]["line"], Value::from("a 1"));
/// ```
pub fn interpret_stream<R: BufRead>(input: R, interactive: bool, options: &StreamOptions) -> Environments<R> {
    let state = if interactive {
        State::Interactive
    } else {
        State::Pending { reader:  input,
                         options: options.clone(), }
    };

    Environments { state }
}

impl<R: BufRead> Iterator for Environments<R> {
    type Item = io::Result<Namespace>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match mem::replace(&mut self.state, State::Done) {
                State::Done => return None,
                State::Interactive => {
                    debug!("interactive input, evaluating once without data");
                    return Some(Ok(Namespace::new()));
                },
                State::Pending { mut reader, options } => {
                    if options.skip_header
                       && let Err(e) = skip_line(&mut reader)
                    {
                        return Some(Err(e));
                    }

                    let parser = LineParser::new(reader, options.separator);
                    if options.line_mode {
                        debug!("evaluating once per line");
                        self.state = State::Lines(parser);
                        continue;
                    }

                    debug!("evaluating once over the buffered stream");
                    return Some(Buffer::from_lines(parser).map(Buffer::into_environment));
                },
                State::Lines(mut parser) => {
                    let entry = parser.next()?;
                    self.state = State::Lines(parser);
                    return Some(entry.map(|(line, row)| line_environment(line, row)));
                },
            }
        }
    }
}

/// Discards one line, whatever its encoding.
fn skip_line(reader: &mut impl BufRead) -> io::Result<()> {
    let mut header = Vec::new();
    reader.read_until(b'\n', &mut header)?;
    Ok(())
}

fn line_environment(line: String, row: Row) -> Namespace {
    Namespace::from([("line".to_string(), Value::from(line)), ("row".to_string(), Value::from(row))])
}
