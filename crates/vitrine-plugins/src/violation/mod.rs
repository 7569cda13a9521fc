//! Contract violation records produced by the verifier.
//!
//! A [`Violation`] is one human-readable deviation from the plugin lifecycle
//! contract, tagged with the [`LifecycleStage`] that produced it. A candidate
//! file's check result is the ordered (possibly empty) list of violations it
//! produced; an empty list means the file passed.

use serde::{Deserialize, Serialize};

/// The lifecycle operation (or pre-step) a violation was recorded against.
///
/// # Example
///
/// ```
/// use vitrine_plugins::LifecycleStage;
///
/// assert_eq!(LifecycleStage::Load.as_str(), "load");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStage {
    /// Locating the conventional `Plugin` constructor in the loaded script.
    Resolve,
    /// Constructing the plugin instance.
    Construct,
    /// The `name()` identity check.
    Name,
    /// The `api_version()` check.
    ApiVersion,
    /// The `load()` run-through and registration observation.
    Load,
    /// The `get_widget()` accessor check.
    Widget,
    /// The `unload()` teardown check.
    Unload,
    /// The candidate file could not be loaded at all.
    File,
}

impl LifecycleStage {
    /// Returns the canonical snake_case string for this stage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resolve => "resolve",
            Self::Construct => "construct",
            Self::Name => "name",
            Self::ApiVersion => "api_version",
            Self::Load => "load",
            Self::Widget => "widget",
            Self::Unload => "unload",
            Self::File => "file",
        }
    }
}

impl std::fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded deviation from the plugin lifecycle contract.
///
/// Violations are never fatal to the overall check run; the verifier collects
/// every violation a candidate produces.
///
/// # Example
///
/// ```
/// use vitrine_plugins::{LifecycleStage, Violation};
///
/// let violation = Violation::new(LifecycleStage::Resolve, "Missing class Plugin");
/// assert_eq!(violation.to_string(), "Missing class Plugin");
/// assert_eq!(violation.stage(), LifecycleStage::Resolve);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    stage: LifecycleStage,
    message: String,
}

impl Violation {
    /// Creates a violation for the given stage.
    #[must_use]
    pub fn new(stage: LifecycleStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }

    /// Creates the single file-level violation reported when a candidate
    /// cannot be loaded at all.
    #[must_use]
    pub fn fatal(detail: impl std::fmt::Display) -> Self {
        Self::new(
            LifecycleStage::File,
            format!("Fatal error during verification: {detail}"),
        )
    }

    /// Returns the lifecycle stage that produced this violation.
    #[must_use]
    pub const fn stage(&self) -> LifecycleStage {
        self.stage
    }

    /// Returns the human-readable violation message.
    #[must_use]
    pub const fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
