//! Aggregated check results for humans and CI consumers.
//!
//! A [`FileOutcome`] pairs one candidate's file name with the ordered
//! violations it produced; a [`BatchReport`] collects the outcomes of a whole
//! directory run plus the single "all clean" verdict the process exit status
//! is derived from. Both types serialise to JSON for machine consumption.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::violation::Violation;

/// Check result for one candidate file.
///
/// # Example
///
/// ```
/// use vitrine_plugins::FileOutcome;
///
/// let outcome = FileOutcome::pass("calc.rhai");
/// assert!(outcome.is_pass());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    file: String,
    violations: Vec<Violation>,
}

impl FileOutcome {
    /// Creates an outcome from the violations a candidate produced.
    #[must_use]
    pub fn new(file: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            file: file.into(),
            violations,
        }
    }

    /// Creates a passing outcome with no violations.
    #[must_use]
    pub fn pass(file: impl Into<String>) -> Self {
        Self::new(file, Vec::new())
    }

    /// Returns the candidate's file name.
    #[must_use]
    pub const fn file(&self) -> &str {
        self.file.as_str()
    }

    /// Returns the ordered violations, empty for a pass.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns `true` when the candidate produced no violations.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Aggregate result of one batch run over a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    directory: PathBuf,
    outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    /// Creates a report from per-file outcomes in reporting order.
    #[must_use]
    pub fn new(directory: PathBuf, outcomes: Vec<FileOutcome>) -> Self {
        Self {
            directory,
            outcomes,
        }
    }

    /// Returns the directory that was checked.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Returns the per-file outcomes in reporting order.
    #[must_use]
    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    /// Returns `true` when every candidate passed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.outcomes.iter().all(FileOutcome::is_pass)
    }

    /// Returns how many candidates produced at least one violation.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_pass()).count()
    }
}
