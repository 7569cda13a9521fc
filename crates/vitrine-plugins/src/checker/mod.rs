//! Per-file orchestration and the directory batch runner.
//!
//! [`IntegrityChecker::check_file`] is the unit of work: build a fresh
//! [`HostEnvironment`], load the candidate, verify the lifecycle contract,
//! and fold any load failure into the single file-level violation. The
//! [`BatchRunner`] applies it to every candidate in a directory, sorted by
//! file name so repeated runs over an unchanged directory produce identical
//! reports.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::environment::HostEnvironment;
use crate::error::CheckError;
use crate::loader::PluginLoader;
use crate::report::{BatchReport, FileOutcome};
use crate::verifier::ContractVerifier;
use crate::violation::Violation;

/// Tracing target for batch operations.
const CHECKER_TARGET: &str = "vitrine_plugins::checker";

/// File extension candidate plugin scripts must carry.
pub const CANDIDATE_EXTENSION: &str = "rhai";

/// Checks a single candidate file end to end.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
/// use vitrine_plugins::IntegrityChecker;
///
/// let outcome = IntegrityChecker::new().check_file(Path::new("plugins/calc.rhai"));
/// assert!(outcome.is_pass());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegrityChecker {
    loader: PluginLoader,
}

impl IntegrityChecker {
    /// Creates a checker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            loader: PluginLoader::new(),
        }
    }

    /// Checks one candidate file, never propagating plugin faults.
    ///
    /// A load failure becomes the candidate's single file-level violation;
    /// otherwise the outcome carries whatever the verifier collected.
    #[must_use]
    pub fn check_file(&self, path: &Path) -> FileOutcome {
        let file_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        let env = HostEnvironment::new();
        match self.loader.load(&env, path) {
            Ok(loaded) => {
                let violations = ContractVerifier::new(&env).verify(&loaded);
                FileOutcome::new(file_name, violations)
            }
            Err(err) => {
                warn!(
                    target: CHECKER_TARGET,
                    file = %file_name,
                    error = %err,
                    "candidate failed to load"
                );
                FileOutcome::new(file_name, vec![Violation::fatal(&err)])
            }
        }
    }
}

/// Runs the integrity check over every candidate in a directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchRunner {
    checker: IntegrityChecker,
}

impl BatchRunner {
    /// Creates a batch runner.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            checker: IntegrityChecker::new(),
        }
    }

    /// Checks every `.rhai` file directly inside `directory`.
    ///
    /// Candidates are processed sequentially in lexicographic file-name
    /// order, regardless of filesystem enumeration order. Non-candidate
    /// entries (other extensions, subdirectories) are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Directory`] when the directory itself cannot be
    /// enumerated. Per-candidate failures never surface here; they are
    /// folded into the report.
    pub fn run(&self, directory: &Path) -> Result<BatchReport, CheckError> {
        let entries = std::fs::read_dir(directory).map_err(|err| CheckError::Directory {
            path: directory.to_path_buf(),
            source: Arc::new(err),
        })?;

        let mut candidates: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| CheckError::Directory {
                path: directory.to_path_buf(),
                source: Arc::new(err),
            })?;
            let path = entry.path();
            if is_candidate(&path) {
                candidates.push(path);
            }
        }
        candidates.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        debug!(
            target: CHECKER_TARGET,
            directory = %directory.display(),
            candidates = candidates.len(),
            "starting batch check"
        );

        let outcomes = candidates
            .iter()
            .map(|path| self.checker.check_file(path))
            .collect();
        Ok(BatchReport::new(directory.to_path_buf(), outcomes))
    }
}

/// Returns `true` for regular files carrying the candidate extension.
fn is_candidate(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext == CANDIDATE_EXTENSION)
}
