use std::{
    ffi::OsString,
    fs::{self, File},
    io::{self, BufRead, BufReader, BufWriter, IsTerminal, Read, StdinLock, StdoutLock, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::cli::Args;

/// Where records are read from.
#[derive(Debug)]
pub enum InputStream {
    Stdin(StdinLock<'static>),
    File {
        path:   PathBuf,
        reader: BufReader<File>,
    },
}

impl InputStream {
    /// Opens a file for reading.
    ///
    /// # Errors
    /// The open failure, with the path in its message.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path).map_err(|e| with_path(path, &e))?;
        Ok(Self::File { path:   path.to_path_buf(),
                        reader: BufReader::new(file), })
    }

    /// Returns `true` for standard input attached to a terminal.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        match self {
            Self::Stdin(_) => io::stdin().is_terminal(),
            Self::File { .. } => false,
        }
    }

    /// The path of a file-backed input.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Stdin(_) => None,
            Self::File { path, .. } => Some(path),
        }
    }
}

impl Read for InputStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Stdin(stdin) => stdin.read(buf),
            Self::File { reader, .. } => reader.read(buf),
        }
    }
}

impl BufRead for InputStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            Self::Stdin(stdin) => stdin.fill_buf(),
            Self::File { reader, .. } => reader.fill_buf(),
        }
    }

    fn consume(&mut self, amount: usize) {
        match self {
            Self::Stdin(stdin) => stdin.consume(amount),
            Self::File { reader, .. } => reader.consume(amount),
        }
    }
}

/// Where rendered results are written.
#[derive(Debug)]
pub enum OutputStream {
    Stdout(StdoutLock<'static>),
    /// A temporary file that replaces the input once the stream is done.
    Temp(BufWriter<NamedTempFile>),
}

impl OutputStream {
    /// Creates an empty temporary file in the directory of `path`, so it can
    /// later be moved over `path` without crossing file systems.
    ///
    /// # Errors
    /// Failure to create the file.
    pub fn temp_beside(path: &Path) -> io::Result<Self> {
        let directory = path.parent()
                            .filter(|parent| !parent.as_os_str().is_empty())
                            .unwrap_or_else(|| Path::new("."));
        let temp = NamedTempFile::new_in(directory).map_err(|e| with_path(directory, &e))?;
        Ok(Self::Temp(BufWriter::new(temp)))
    }
}

impl Write for OutputStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(stdout) => stdout.write(buf),
            Self::Temp(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(stdout) => stdout.flush(),
            Self::Temp(writer) => writer.flush(),
        }
    }
}

/// Pairs every input with its output.
///
/// Without files there is a single standard input / standard output pair.
/// Otherwise each file is opened in turn when the pair is requested; its
/// output is standard output, or a fresh temporary file next to it in
/// in-place mode.
pub fn determine_streams(args: &Args) -> impl Iterator<Item = io::Result<(InputStream, OutputStream)>> + '_ {
    let standard = args.file
                       .is_empty()
                       .then(|| Ok((InputStream::Stdin(io::stdin().lock()), OutputStream::Stdout(io::stdout().lock()))));

    standard.into_iter()
            .chain(args.file.iter().map(|path| open_pair(path, args.in_place.is_some())))
}

fn open_pair(path: &Path, in_place: bool) -> io::Result<(InputStream, OutputStream)> {
    let input = InputStream::open(path)?;
    let output = if in_place {
        OutputStream::temp_beside(path)?
    } else {
        OutputStream::Stdout(io::stdout().lock())
    };

    Ok((input, output))
}

/// Finishes a stream pair.
///
/// The output is flushed. A temporary output then replaces its input file:
/// with a non-empty suffix the original is first renamed to `path + suffix`,
/// and the temporary file always ends up at the original path with the
/// original permissions.
///
/// # Errors
/// Failed flush, rename or persist. In-place output for standard input is
/// an error.
pub fn post_process(args: &Args, input: InputStream, output: OutputStream) -> io::Result<()> {
    let writer = match output {
        OutputStream::Stdout(mut stdout) => return stdout.flush(),
        OutputStream::Temp(writer) => writer,
    };

    let temp = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
    let Some(path) = input.path().map(Path::to_path_buf) else {
        return Err(io::Error::other("cannot edit standard input in place"));
    };
    drop(input);

    fs::set_permissions(temp.path(), fs::metadata(&path)?.permissions())?;

    let suffix = args.in_place.as_deref().unwrap_or_default();
    if !suffix.is_empty() {
        let backup = backup_path(&path, suffix);
        fs::rename(&path, &backup)?;
        debug!(from = %path.display(), to = %backup.display(), "kept backup");
    }

    temp.persist(&path).map_err(|e| e.error)?;
    debug!(path = %path.display(), "replaced in place");
    Ok(())
}

/// `path` with `suffix` appended to its last component.
fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

fn with_path(path: &Path, e: &io::Error) -> io::Error {
    io::Error::new(e.kind(), format!("'{}': {e}", path.display()))
}
