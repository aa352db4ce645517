use std::{io, process::ExitCode};

use clap::Parser;
use puf::{cli::Args, run};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse().finalize();

    let filter = if args.verbose > 0 {
        EnvFilter::new(args.log_filter())
    } else {
        EnvFilter::try_from_env("PUF_LOG").unwrap_or_else(|_| EnvFilter::new(args.log_filter()))
    };
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(io::stderr)
                             .init();

    if let Err(e) = run(&args) {
        eprintln!("puf: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
