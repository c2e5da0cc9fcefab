//! questions - browse a Q&A forum database from the command line.

use clap::Parser;
use questions::cli::{self, Cli};
use std::process;

fn main() {
    // Logs go to stderr so stdout stays machine-readable with --json
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = cli::run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
