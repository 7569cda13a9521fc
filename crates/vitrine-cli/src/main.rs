//! CLI entrypoint for the Vitrine plugin integrity checker.
//!
//! The binary delegates to [`vitrine_cli::run`], which parses arguments,
//! drives the batch check, and renders the report to the provided streams.

use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    vitrine_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
