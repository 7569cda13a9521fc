//! Domain errors raised while loading candidates and walking directories.
//!
//! All errors use `thiserror`-derived enums with structured context. I/O
//! sources are wrapped in `Arc` so the error type stays cheap to clone and
//! small to return. Faults raised by plugin code itself are never surfaced
//! here; the verifier converts those into [`Violation`](crate::Violation)
//! values instead.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors arising from candidate loading and batch enumeration.
#[derive(Debug, Clone, Error)]
pub enum CheckError {
    /// The candidate file could not be read from disk.
    #[error("failed to read candidate file '{path}': {source}")]
    Read {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The candidate source failed to compile.
    #[error("parse error in module '{module}': {message}")]
    Parse {
        /// Synthetic module identity of the candidate.
        module: String,
        /// Human-readable description of the parse failure.
        message: String,
    },

    /// The candidate's top-level code raised a fault while executing.
    #[error("top-level code of module '{module}' failed: {message}")]
    Eval {
        /// Synthetic module identity of the candidate.
        module: String,
        /// Human-readable description of the evaluation fault.
        message: String,
    },

    /// The target directory could not be enumerated.
    #[error("failed to enumerate plugin directory '{path}': {source}")]
    Directory {
        /// Directory that was being enumerated.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },
}
