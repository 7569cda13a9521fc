//! Crate-level test helpers and end-to-end scenarios.

use crate::environment::HostEnvironment;
use crate::loader::{LoadedPlugin, PluginLoader};


/// A candidate that satisfies every lifecycle requirement.
pub(crate) const CONFORMANT_PLUGIN: &str = r#"
fn Plugin() {
    let panel = ();
    #{
        name: || "Calculator",
        api_version: || host_api_version(),
        load: |window, container| {
            panel = new_widget("panel");
            let display = new_line_edit();
            display.set_read_only(true);
            display.set_fixed_height(40);
            panel.add_child(display);
            container.add_plugin_widget("Calculator", panel);
        },
        get_widget: || panel,
        unload: || { panel = (); },
    }
}
"#;

/// Writes `source` to a scratch file and loads it against `env`.
///
/// Panics on load failure; tests exercising loader failures call the loader
/// directly.
pub(crate) fn load_source(env: &HostEnvironment, source: &str) -> LoadedPlugin {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("candidate.rhai");
    std::fs::write(&path, source).expect("write candidate");
    PluginLoader::new().load(env, &path).expect("load candidate")
}
