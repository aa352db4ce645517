use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::{record::lines::Separator, stream::orchestrator::StreamOptions};

/// puf evaluates an expression against the lines, rows and columns of text
/// streams and prints the result.
///
/// Without `--line`, the whole input is exposed as `lines`, `rows` and
/// `cols`; with it, every line is exposed as `line` and `row`. Fields are
/// integers, reals or strings, whichever they parse as.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The expression to evaluate. With --script, the first input file.
    pub command: Option<String>,

    /// Input files. Standard input is read when none are given.
    pub file: Vec<PathBuf>,

    /// Replace each input file with the output, keeping a backup when a
    /// suffix is given (`-i=.bak`).
    #[arg(short = 'i',
          long,
          value_name = "SUFFIX",
          num_args = 0..=1,
          default_missing_value = "",
          require_equals = true)]
    pub in_place: Option<String>,

    /// Evaluate once per line instead of once per stream.
    #[arg(short, long)]
    pub line: bool,

    /// Discard the first line of every input.
    #[arg(short, long)]
    pub skip_header: bool,

    /// Field separator. Runs of whitespace when unset or empty.
    #[arg(short = 'F', long, env = "PUF_SEPARATOR")]
    pub separator: Option<String>,

    /// Execute a script file instead of evaluating an expression.
    #[arg(short = 'x', long, value_name = "PATH")]
    pub script: Option<PathBuf>,

    /// Log more; repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Resolves the positional arguments.
    ///
    /// With `--script` there is no command, so a positional in the command
    /// slot is the first input file.
    ///
    /// # Example
    /// ```
    /// use clap::Parser;
    /// use puf::cli::Args;
    ///
    /// let args = Args::parse_from(["puf", "-x", "report.puf", "a.txt", "b.txt"]).finalize();
    ///
    /// assert_eq!(args.command, None);
    /// assert_eq!(args.file.len(), 2);
    /// ```
    #[must_use]
    pub fn finalize(mut self) -> Self {
        if self.script.is_some()
           && let Some(first) = self.command.take()
        {
            self.file.insert(0, PathBuf::from(first));
        }

        self
    }

    /// The log filter selected by the verbosity flags.
    ///
    /// # Example
    /// ```
    /// use clap::Parser;
    /// use puf::cli::Args;
    ///
    /// assert_eq!(Args::parse_from(["puf", "1"]).log_filter(), "warn");
    /// assert_eq!(Args::parse_from(["puf", "-vv", "1"]).log_filter(), "debug");
    /// ```
    #[must_use]
    pub const fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// How every input stream is to be exposed.
    #[must_use]
    pub fn stream_options(&self) -> StreamOptions {
        StreamOptions { line_mode:   self.line,
                        skip_header: self.skip_header,
                        separator:   Separator::from_option(self.separator.as_deref()), }
    }
}
