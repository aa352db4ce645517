use std::{io, path::PathBuf};

use thiserror::Error;

use crate::error::{ParseError, RuntimeError};

/// Top-level error for a `puf` invocation.
///
/// Wraps the interpreter's parse and runtime errors together with the
/// configuration and I/O failures of the stream layer.
#[derive(Debug, Error)]
pub enum PufError {
    /// Neither a command nor a script was supplied.
    #[error("Must supply either command or file.")]
    Usage,
    /// The command or script did not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    /// Reading a script or input file failed.
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        /// The file that could not be read.
        path:   PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// Any other stream I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
