//! Plugin integrity checking for the Vitrine plugin host.
//!
//! The `vitrine-plugins` crate verifies that candidate plugin scripts honour
//! the five-operation lifecycle contract the Vitrine host expects before it
//! will load them: `name()`, `api_version()`, `load(window, container)`,
//! `get_widget()`, and `unload()`.
//!
//! Candidate plugins are Rhai scripts. Each check builds a fresh, disposable
//! [`HostEnvironment`] that stands in for the real host window and widget
//! toolkit, loads the script under a collision-resistant module identity,
//! instantiates the conventional `Plugin()` constructor, and drives every
//! lifecycle operation while collecting each deviation as a [`Violation`]
//! rather than aborting on the first one. Faults raised by plugin code never
//! escape the verifier.
//!
//! # Architecture
//!
//! The [`checker::BatchRunner`] walks a directory of candidates in
//! lexicographic order and produces a [`BatchReport`]. Per file the flow is
//! [`PluginLoader`] → [`ContractVerifier`] → [`FileOutcome`]. The container
//! stand-in handed to `load()` observes whether the plugin registered its
//! surface via `add_plugin_widget`, which is a contract requirement.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use vitrine_plugins::BatchRunner;
//!
//! let report = BatchRunner::new()
//!     .run(Path::new("./plugins"))
//!     .expect("directory is readable");
//! for outcome in report.outcomes() {
//!     println!("{}: {}", outcome.file(), if outcome.is_pass() { "OK" } else { "FAILED" });
//! }
//! ```
//!
//! # Scope
//!
//! A passing check asserts only the lifecycle contract. The widget toolkit
//! stand-in accepts the documented stub surface and nothing more; it makes no
//! claim about how the plugin behaves against the real toolkit. There is no
//! timeout: a lifecycle method that never returns blocks the whole batch.

pub mod checker;
pub mod environment;
pub mod error;
pub mod loader;
pub mod report;
pub mod verifier;
pub mod violation;

#[cfg(test)]
mod tests;

pub use self::checker::{BatchRunner, IntegrityChecker};
pub use self::environment::{ContainerStub, HostEnvironment, HostHandle, HOST_API_VERSION};
pub use self::error::CheckError;
pub use self::loader::{LoadedPlugin, ModuleId, PluginLoader};
pub use self::report::{BatchReport, FileOutcome};
pub use self::verifier::ContractVerifier;
pub use self::violation::{LifecycleStage, Violation};
