//! Lifecycle contract verification for loaded candidates.
//!
//! The [`ContractVerifier`] drives a loaded candidate through the full
//! five-operation lifecycle contract and records every deviation as a
//! [`Violation`]. Two checks short-circuit — a missing `Plugin` constructor
//! and a failed instantiation leave nothing to call methods on — but every
//! later step is independent: a fault in `name()` never suppresses the
//! `load()` run-through, and no fault raised by plugin code propagates past
//! the verifier.
//!
//! Each step is a small helper returning `Option<Violation>`; the results
//! are combined, in lifecycle order, into the candidate's violation list.

use rhai::{AST, Dynamic, Engine, FnPtr, ImmutableString, Map, Scope};
use tracing::debug;

use crate::environment::HostEnvironment;
use crate::loader::LoadedPlugin;
use crate::violation::{LifecycleStage, Violation};

/// Tracing target for verifier operations.
const VERIFIER_TARGET: &str = "vitrine_plugins::verifier";

/// Conventional name of the plugin constructor a candidate must define.
pub const PLUGIN_TYPE_NAME: &str = "Plugin";

/// Violation message for a `load()` that never registered its surface.
const MISSING_REGISTRATION: &str =
    "Plugin did not call plugin_container.add_plugin_widget during load()";

/// Verifies one loaded candidate against the lifecycle contract.
///
/// # Example
///
/// ```
/// use vitrine_plugins::{ContractVerifier, HostEnvironment, PluginLoader};
///
/// # fn main() -> Result<(), vitrine_plugins::CheckError> {
/// # let dir = tempfile::tempdir().unwrap();
/// # let path = dir.path().join("empty.rhai");
/// # std::fs::write(&path, "let x = 1;").unwrap();
/// let env = HostEnvironment::new();
/// let loaded = PluginLoader::new().load(&env, &path)?;
/// let violations = ContractVerifier::new(&env).verify(&loaded);
/// assert_eq!(violations.len(), 1);
/// assert_eq!(violations[0].message(), "Missing class Plugin");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ContractVerifier<'env> {
    env: &'env HostEnvironment,
}

impl<'env> ContractVerifier<'env> {
    /// Creates a verifier bound to the environment the candidate was loaded
    /// against.
    #[must_use]
    pub const fn new(env: &'env HostEnvironment) -> Self {
        Self { env }
    }

    /// Drives the candidate through the lifecycle contract.
    ///
    /// Returns the ordered list of violations; an empty list means the
    /// candidate passed.
    #[must_use]
    pub fn verify(&self, loaded: &LoadedPlugin) -> Vec<Violation> {
        if !loaded.defines_function(PLUGIN_TYPE_NAME) {
            return vec![Violation::new(
                LifecycleStage::Resolve,
                "Missing class Plugin",
            )];
        }

        // Instantiation and method calls only need the candidate's function
        // definitions; dropping the top-level statements keeps load-time side
        // effects from re-running.
        let ast = loaded.ast().clone_functions_only();
        let engine = self.env.engine();

        let mut scope = Scope::new();
        let constructed =
            match engine.call_fn::<Dynamic>(&mut scope, &ast, PLUGIN_TYPE_NAME, ()) {
                Ok(value) => value,
                Err(err) => {
                    return vec![Violation::new(
                        LifecycleStage::Construct,
                        format!("Failed to instantiate Plugin class: {err}"),
                    )];
                }
            };

        let type_name = constructed.type_name();
        let Some(instance) = constructed.try_cast::<Map>() else {
            return vec![Violation::new(
                LifecycleStage::Construct,
                format!(
                    "Failed to instantiate Plugin class: constructor returned {type_name}, \
                     expected an object map of lifecycle methods"
                ),
            )];
        };

        let mut violations = Vec::new();
        violations.extend(self.check_name(engine, &ast, &instance));
        violations.extend(self.check_api_version(engine, &ast, &instance));
        violations.extend(self.check_load(engine, &ast, &instance));
        violations.extend(self.check_widget_accessor(engine, &ast, &instance));
        violations.extend(self.check_unload(engine, &ast, &instance));

        debug!(
            target: VERIFIER_TARGET,
            module = %loaded.module_id(),
            violations = violations.len(),
            registrations = self.env.container().registration_count(),
            "lifecycle verification complete"
        );
        violations
    }

    /// Step 3: `name()` must return a non-empty, non-whitespace string.
    fn check_name(&self, engine: &Engine, ast: &AST, instance: &Map) -> Option<Violation> {
        let Some(method) = lifecycle_method(instance, "name") else {
            return Some(missing_method(LifecycleStage::Name, "name"));
        };
        match method.call::<Dynamic>(engine, ast, ()) {
            Err(err) => Some(Violation::new(
                LifecycleStage::Name,
                format!("Method name() raised an error: {err}"),
            )),
            Ok(value) => {
                let type_name = value.type_name();
                match value.try_cast::<ImmutableString>() {
                    None => Some(Violation::new(
                        LifecycleStage::Name,
                        format!("Method name() returned {type_name}, expected a string"),
                    )),
                    Some(name) if name.trim().is_empty() => Some(Violation::new(
                        LifecycleStage::Name,
                        "Method name() returned an empty string",
                    )),
                    Some(name) => {
                        debug!(target: VERIFIER_TARGET, plugin = %name, "identity check passed");
                        None
                    }
                }
            }
        }
    }

    /// Step 4: `api_version()` must return a non-unit value.
    fn check_api_version(&self, engine: &Engine, ast: &AST, instance: &Map) -> Option<Violation> {
        let Some(method) = lifecycle_method(instance, "api_version") else {
            return Some(missing_method(LifecycleStage::ApiVersion, "api_version"));
        };
        match method.call::<Dynamic>(engine, ast, ()) {
            Err(err) => Some(Violation::new(
                LifecycleStage::ApiVersion,
                format!("Method api_version() raised an error: {err}"),
            )),
            Ok(value) if value.is_unit() => Some(Violation::new(
                LifecycleStage::ApiVersion,
                "Method api_version() returned (), expected a version value",
            )),
            Ok(_) => None,
        }
    }

    /// Step 5: `load()` must complete and register the plugin's surface on
    /// the container stand-in.
    fn check_load(&self, engine: &Engine, ast: &AST, instance: &Map) -> Option<Violation> {
        let Some(method) = lifecycle_method(instance, "load") else {
            return Some(missing_method(LifecycleStage::Load, "load"));
        };
        let window = self.env.host();
        let container = self.env.container().clone();
        match method.call::<Dynamic>(engine, ast, (window, container)) {
            Err(err) => Some(Violation::new(
                LifecycleStage::Load,
                format!("Method load() crashed: {err}"),
            )),
            Ok(_) if !self.env.container().was_called() => {
                Some(Violation::new(LifecycleStage::Load, MISSING_REGISTRATION))
            }
            Ok(_) => None,
        }
    }

    /// Step 6: `get_widget()` must not fault. A unit return is tolerated.
    fn check_widget_accessor(
        &self,
        engine: &Engine,
        ast: &AST,
        instance: &Map,
    ) -> Option<Violation> {
        let Some(method) = lifecycle_method(instance, "get_widget") else {
            return Some(missing_method(LifecycleStage::Widget, "get_widget"));
        };
        match method.call::<Dynamic>(engine, ast, ()) {
            Err(err) => Some(Violation::new(
                LifecycleStage::Widget,
                format!("Method get_widget() raised an error: {err}"),
            )),
            Ok(_) => None,
        }
    }

    /// Step 7: `unload()` must not fault.
    fn check_unload(&self, engine: &Engine, ast: &AST, instance: &Map) -> Option<Violation> {
        let Some(method) = lifecycle_method(instance, "unload") else {
            return Some(missing_method(LifecycleStage::Unload, "unload"));
        };
        match method.call::<Dynamic>(engine, ast, ()) {
            Err(err) => Some(Violation::new(
                LifecycleStage::Unload,
                format!("Method unload() crashed: {err}"),
            )),
            Ok(_) => None,
        }
    }
}

/// Resolves a lifecycle method from the instance map.
fn lifecycle_method(instance: &Map, name: &str) -> Option<FnPtr> {
    instance
        .get(name)
        .and_then(|value| value.clone().try_cast::<FnPtr>())
}

/// Violation for a lifecycle method the instance does not define.
fn missing_method(stage: LifecycleStage, name: &str) -> Violation {
    Violation::new(
        stage,
        format!("Method {name}() is not defined on the Plugin instance"),
    )
}

#[cfg(test)]
mod tests;
