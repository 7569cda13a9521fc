//! Command-line runtime for the Vitrine plugin integrity checker.
//!
//! The runtime is exercised both from the binary entrypoint and from tests:
//! [`run`] takes the argument iterator and the output streams, so tests can
//! substitute in-memory writers and inspect the rendered report directly.
//!
//! Exit codes: `0` when every candidate passed, `1` when at least one
//! candidate failed or could not be loaded, `2` for usage errors or when the
//! target directory cannot be enumerated.

use std::env;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use vitrine_plugins::BatchRunner;

mod cli;
pub mod output;
mod telemetry;


use cli::Cli;
pub use cli::OutputFormat;

/// Exit status for a clean batch.
const EXIT_CLEAN: u8 = 0;
/// Exit status when at least one candidate produced a violation.
const EXIT_DIRTY: u8 = 1;
/// Exit status for usage or environment errors.
const EXIT_USAGE: u8 = 2;

/// Parses arguments, runs the batch check, and renders the report.
pub fn run<I, T, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
    E: Write,
{
    ExitCode::from(execute(args, stdout, stderr))
}

/// [`run`] with a plain numeric status, for direct assertion in tests.
fn execute<I, T, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
    E: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version render on stdout and exit cleanly.
            return if err.use_stderr() {
                let _ = write!(stderr, "{err}");
                EXIT_USAGE
            } else {
                let _ = write!(stdout, "{err}");
                EXIT_CLEAN
            };
        }
    };

    if let Err(err) = telemetry::initialise() {
        let _ = writeln!(stderr, "vitrine: telemetry disabled: {err}");
    }

    let directory = match resolve_directory(cli.directory) {
        Ok(directory) => directory,
        Err(message) => {
            let _ = writeln!(stderr, "vitrine: {message}");
            return EXIT_USAGE;
        }
    };

    let report = match BatchRunner::new().run(&directory) {
        Ok(report) => report,
        Err(err) => {
            let _ = writeln!(stderr, "vitrine: {err}");
            return EXIT_USAGE;
        }
    };

    let rendered = match cli.output {
        OutputFormat::Human => output::render_human(&report, stdout),
        OutputFormat::Json => output::render_json(&report, stdout),
    };
    if let Err(err) = rendered {
        let _ = writeln!(stderr, "vitrine: failed to write report: {err}");
        return EXIT_USAGE;
    }

    if report.is_clean() { EXIT_CLEAN } else { EXIT_DIRTY }
}

/// Resolves the target directory, defaulting to the working directory.
fn resolve_directory(argument: Option<PathBuf>) -> Result<PathBuf, String> {
    match argument {
        Some(directory) => Ok(directory),
        None => env::current_dir()
            .map_err(|err| format!("cannot determine working directory: {err}")),
    }
}
