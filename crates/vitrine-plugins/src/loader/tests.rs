//! Unit tests for candidate loading.

use std::collections::HashSet;
use std::path::PathBuf;

use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::{ModuleId, PluginLoader};
use crate::environment::HostEnvironment;
use crate::error::CheckError;

#[fixture]
fn env() -> HostEnvironment {
    HostEnvironment::new()
}

fn write_candidate(dir: &TempDir, name: &str, source: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, source).expect("write candidate");
    path
}

#[rstest]
fn load_compiles_and_runs_top_level_code(env: HostEnvironment) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_candidate(
        &dir,
        "calc.rhai",
        r#"
            let banner = "calculator loading";
            fn Plugin() { #{} }
        "#,
    );

    let loaded = PluginLoader::new().load(&env, &path).expect("load");
    assert!(loaded.defines_function("Plugin"));
    assert!(loaded.module_id().as_str().starts_with("calc#"));
}

#[rstest]
fn module_identities_never_collide_for_the_same_base_name(env: HostEnvironment) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_candidate(&dir, "calc.rhai", "fn Plugin() { #{} }");

    let loader = PluginLoader::new();
    let ids: HashSet<String> = (0..3)
        .map(|_| {
            loader
                .load(&env, &path)
                .expect("load")
                .module_id()
                .as_str()
                .to_owned()
        })
        .collect();
    assert_eq!(ids.len(), 3, "each load must get a distinct identity");
}

#[rstest]
fn module_id_derives_from_the_file_stem() {
    let id = ModuleId::derive(std::path::Path::new("/plugins/tabs.rhai"));
    assert!(id.as_str().starts_with("tabs#"), "got: {id}");
}

#[rstest]
fn missing_file_is_a_read_error(env: HostEnvironment) {
    let err = PluginLoader::new()
        .load(&env, std::path::Path::new("/nonexistent/ghost.rhai"))
        .expect_err("must fail");
    assert!(matches!(err, CheckError::Read { .. }), "got: {err}");
}

#[rstest]
fn syntax_error_is_a_parse_error(env: HostEnvironment) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_candidate(&dir, "broken.rhai", "fn Plugin( {");

    let err = PluginLoader::new().load(&env, &path).expect_err("must fail");
    assert!(matches!(err, CheckError::Parse { .. }), "got: {err}");
}

#[rstest]
fn top_level_fault_is_an_eval_error(env: HostEnvironment) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_candidate(
        &dir,
        "exploding.rhai",
        r#"
            throw "import-time failure";
            fn Plugin() { #{} }
        "#,
    );

    let err = PluginLoader::new().load(&env, &path).expect_err("must fail");
    match err {
        CheckError::Eval { module, message } => {
            assert!(module.starts_with("exploding#"));
            assert!(message.contains("import-time failure"), "got: {message}");
        }
        other => panic!("expected eval error, got: {other}"),
    }
}

#[rstest]
fn top_level_code_may_use_the_contract_and_toolkit_stubs(env: HostEnvironment) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_candidate(
        &dir,
        "uses_stubs.rhai",
        r#"
            let marker = API_VERSION + host_api_version();
            let probe = new_label("probe");
            fn Plugin() { #{} }
        "#,
    );

    PluginLoader::new()
        .load(&env, &path)
        .expect("stub-dependent top-level code loads");
}
