//! # puf
//!
//! puf evaluates a small expression language against text streams. Every
//! line is split into typed fields; the raw lines, the rows of fields and
//! the columns of those rows are exposed as variables, and the result of the
//! expression or script is printed once per line or once per stream.
//!
//! Unknown names that match a standard module (`os`, `math`, `re`, `json`,
//! `random`, `time`) are imported on demand, so `re.findall(...)` works
//! without an explicit import.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

use crate::{
    cli::Args,
    error::PufError,
    interpreter::{
        evaluator::{core::Namespace, dispatch::Program},
        module::StandardLibrary,
    },
    render::{display, display_raw},
    stream::{
        files::{determine_streams, post_process},
        orchestrator::interpret_stream,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` types that represent the
/// syntactic structure of commands and scripts as a tree. The AST is built by
/// the parser and traversed by the evaluator.
pub mod ast;
/// Command line arguments and the configuration derived from them.
pub mod cli;
/// Provides unified error types for parsing, evaluation and stream handling.
///
/// Every error carries enough context to be printed as is: parse and runtime
/// errors are tagged with the source line, I/O errors with the file path.
pub mod error;
/// Orchestrates the evaluation of commands and scripts.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and the capability modules behind auto-import.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
/// - Resolves unknown names to standard modules.
pub mod interpreter;
/// Parsing of text streams into lines, rows and columns.
///
/// # Responsibilities
/// - Coerces every field to an integer, a real or a string.
/// - Splits lines on whitespace or a literal separator.
/// - Aggregates a whole stream and transposes its rows.
pub mod record;
/// Printing of evaluation results.
pub mod render;
/// Stream selection, per-stream evaluation contexts and in-place editing.
pub mod stream;
/// General utilities for safe numeric conversion and helpers.
///
/// This module provides reusable helpers and conversion routines that are used
/// throughout the interpreter. These include safe conversions between integer
/// and floating-point types and the formatting of reals.
pub mod util;

/// Runs a complete invocation.
///
/// The command or script is parsed once. Each input stream then gets a fresh
/// global namespace, is turned into its environments, and every environment
/// is evaluated and rendered to the stream's output before the stream is
/// finished (flushed, or moved over its input in in-place mode). Streams are
/// handled strictly one after the other.
///
/// Interactive input evaluates the command once and echoes its value
/// whatever its type.
///
/// # Errors
/// The first parse, runtime or I/O error. Output already written for
/// earlier streams is kept.
pub fn run(args: &Args) -> Result<(), PufError> {
    let program = Program::load(args.command.as_deref(), args.script.as_deref())?;
    let options = args.stream_options();

    for pair in determine_streams(args) {
        let (mut input, mut output) = pair?;
        let interactive = input.is_interactive();
        let echo = interactive && matches!(program, Program::Command(_));
        debug!(input = ?input.path(), interactive, "processing stream");

        let mut globals = Namespace::new();
        for environment in interpret_stream(&mut input, interactive, &options) {
            let mut locals = environment?;
            let value = program.run(&mut globals, &mut locals, &StandardLibrary)?;

            if echo {
                display_raw(&value, &mut output)?;
            } else {
                display(&value, &mut output)?;
            }
        }

        post_process(args, input, output)?;
    }

    Ok(())
}
