//! Batch report rendering.
//!
//! The human format is line-oriented and stable: one `<file>: OK` or
//! `<file>: FAILED` row per candidate in reporting order, violations
//! indented beneath their file, and the all-clean banner only when the batch
//! is clean. Repeated runs over an unchanged directory render byte-identical
//! output. The JSON format emits the serialised
//! [`BatchReport`] for CI consumers.

use std::io::{self, Write};

use vitrine_plugins::BatchReport;

/// Final banner printed when every candidate passed.
pub const ALL_CLEAN_BANNER: &str = "All plugins passed integrity check.";

/// Renders the line-oriented human report.
///
/// # Errors
///
/// Returns any I/O error raised by the output stream.
pub fn render_human<W: Write>(report: &BatchReport, out: &mut W) -> io::Result<()> {
    writeln!(out, "Checking plugins in {}...", report.directory().display())?;
    writeln!(out)?;

    for outcome in report.outcomes() {
        if outcome.is_pass() {
            writeln!(out, "{}: OK", outcome.file())?;
        } else {
            writeln!(out, "{}: FAILED", outcome.file())?;
            for violation in outcome.violations() {
                writeln!(out, "    - {violation}")?;
            }
        }
    }

    if report.is_clean() {
        writeln!(out)?;
        writeln!(out, "{ALL_CLEAN_BANNER}")?;
    }
    Ok(())
}

/// Renders the batch report as pretty-printed JSON.
///
/// # Errors
///
/// Returns any I/O error raised by the output stream.
pub fn render_json<W: Write>(report: &BatchReport, out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report).map_err(io::Error::from)?;
    writeln!(out)
}
