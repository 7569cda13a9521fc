//! Candidate loading under synthetic, collision-resistant module identities.
//!
//! The [`PluginLoader`] turns one candidate file into a [`LoadedPlugin`]: it
//! reads the source, compiles it against a [`HostEnvironment`]'s engine, tags
//! the compiled unit with a [`ModuleId`], and executes the file's top-level
//! code. Any fault on that path — unreadable file, parse error, top-level
//! fault — is a [`CheckError`]; the checker reports it as the single
//! file-level violation for the candidate and skips lifecycle checks.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rhai::AST;
use tracing::debug;

use crate::environment::HostEnvironment;
use crate::error::CheckError;

/// Tracing target for loader operations.
const LOADER_TARGET: &str = "vitrine_plugins::loader";

/// Process-wide counter feeding [`ModuleId`] derivation.
static NEXT_MODULE_INDEX: AtomicU64 = AtomicU64::new(1);

/// Synthetic module identity for one load of one candidate file.
///
/// Derived from the candidate's file stem plus a process-wide counter, so
/// repeated or concurrent loads of files sharing a base name never alias
/// each other.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use vitrine_plugins::ModuleId;
///
/// let first = ModuleId::derive(Path::new("/plugins/calc.rhai"));
/// let second = ModuleId::derive(Path::new("/plugins/calc.rhai"));
/// assert!(first.as_str().starts_with("calc#"));
/// assert_ne!(first.as_str(), second.as_str());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleId(String);

impl ModuleId {
    /// Derives a fresh identity for the given candidate path.
    #[must_use]
    pub fn derive(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .map_or_else(|| String::from("candidate"), |s| s.to_string_lossy().into_owned());
        let index = NEXT_MODULE_INDEX.fetch_add(1, Ordering::Relaxed);
        Self(format!("{stem}#{index}"))
    }

    /// Returns the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One candidate file, compiled and with its top-level code executed.
///
/// Owned by the loader's caller and handed by reference to the verifier.
#[derive(Debug)]
pub struct LoadedPlugin {
    module_id: ModuleId,
    ast: AST,
}

impl LoadedPlugin {
    /// Returns the synthetic module identity of this load.
    #[must_use]
    pub const fn module_id(&self) -> &ModuleId {
        &self.module_id
    }

    /// Returns the compiled unit.
    #[must_use]
    pub const fn ast(&self) -> &AST {
        &self.ast
    }

    /// Returns `true` when the script defines a function with this name.
    #[must_use]
    pub fn defines_function(&self, name: &str) -> bool {
        self.ast.iter_functions().any(|f| f.name == name)
    }
}

/// Loads candidate files in isolation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PluginLoader;

impl PluginLoader {
    /// Creates a loader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads one candidate file against the given environment.
    ///
    /// Compiles the source, tags it with a fresh [`ModuleId`], and runs the
    /// file's top-level statements in the environment's base scope.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Read`] when the file cannot be read,
    /// [`CheckError::Parse`] when it fails to compile, and
    /// [`CheckError::Eval`] when its top-level code raises a fault.
    pub fn load(
        &self,
        env: &HostEnvironment,
        path: &Path,
    ) -> Result<LoadedPlugin, CheckError> {
        let source = std::fs::read_to_string(path).map_err(|err| CheckError::Read {
            path: path.to_path_buf(),
            source: Arc::new(err),
        })?;

        let module_id = ModuleId::derive(path);
        debug!(
            target: LOADER_TARGET,
            module = %module_id,
            path = %path.display(),
            "loading candidate"
        );

        let mut ast = env
            .engine()
            .compile(&source)
            .map_err(|err| CheckError::Parse {
                module: module_id.as_str().to_owned(),
                message: err.to_string(),
            })?;
        ast.set_source(module_id.as_str());

        let mut scope = env.base_scope();
        env.engine()
            .run_ast_with_scope(&mut scope, &ast)
            .map_err(|err| CheckError::Eval {
                module: module_id.as_str().to_owned(),
                message: err.to_string(),
            })?;

        Ok(LoadedPlugin { module_id, ast })
    }
}

#[cfg(test)]
mod tests;
