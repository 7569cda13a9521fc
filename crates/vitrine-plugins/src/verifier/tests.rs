//! Unit tests for the lifecycle contract verifier.

use rstest::{fixture, rstest};

use super::ContractVerifier;
use crate::environment::HostEnvironment;
use crate::tests::{CONFORMANT_PLUGIN, load_source};
use crate::violation::{LifecycleStage, Violation};

#[fixture]
fn env() -> HostEnvironment {
    HostEnvironment::new()
}

fn verify(env: &HostEnvironment, source: &str) -> Vec<Violation> {
    let loaded = load_source(env, source);
    ContractVerifier::new(env).verify(&loaded)
}

/// Builds a candidate that is conformant except for the given method body
/// overrides, so each test isolates exactly one deviation.
fn plugin_with(name: &str, api_version: &str, load: &str, get_widget: &str, unload: &str) -> String {
    format!(
        r#"
        fn Plugin() {{
            #{{
                name: {name},
                api_version: {api_version},
                load: {load},
                get_widget: {get_widget},
                unload: {unload},
            }}
        }}
        "#
    )
}

fn registering_load() -> &'static str {
    r#"|window, container| container.add_plugin_widget("Probe", new_widget("panel"))"#
}

// ---------------------------------------------------------------------------
// Short-circuit steps
// ---------------------------------------------------------------------------

#[rstest]
fn missing_plugin_type_is_the_only_violation(env: HostEnvironment) {
    let violations = verify(&env, "let helper = 1;\nfn assist() { 2 }");
    assert_eq!(violations.len(), 1, "got: {violations:?}");
    assert_eq!(violations[0].message(), "Missing class Plugin");
    assert_eq!(violations[0].stage(), LifecycleStage::Resolve);
}

#[rstest]
fn faulting_constructor_short_circuits(env: HostEnvironment) {
    let violations = verify(&env, r#"fn Plugin() { throw "ctor exploded"; }"#);
    assert_eq!(violations.len(), 1, "got: {violations:?}");
    assert!(
        violations[0]
            .message()
            .starts_with("Failed to instantiate Plugin class:"),
        "got: {}",
        violations[0].message()
    );
    assert!(violations[0].message().contains("ctor exploded"));
}

#[rstest]
fn non_instance_constructor_short_circuits(env: HostEnvironment) {
    let violations = verify(&env, "fn Plugin() { 42 }");
    assert_eq!(violations.len(), 1, "got: {violations:?}");
    assert!(
        violations[0]
            .message()
            .starts_with("Failed to instantiate Plugin class:"),
    );
    assert!(violations[0].message().contains("i64"));
}

// ---------------------------------------------------------------------------
// Identity check
// ---------------------------------------------------------------------------

#[rstest]
fn non_string_name_reports_the_observed_type(env: HostEnvironment) {
    let source = plugin_with(
        "|| 42",
        "|| host_api_version()",
        registering_load(),
        "|| ()",
        "|| ()",
    );
    let violations = verify(&env, &source);
    assert_eq!(violations.len(), 1, "got: {violations:?}");
    assert_eq!(
        violations[0].message(),
        "Method name() returned i64, expected a string"
    );
}

#[rstest]
#[case(r#"|| """#)]
#[case(r#"|| "   ""#)]
fn blank_name_is_reported_as_empty(env: HostEnvironment, #[case] name: &str) {
    let source = plugin_with(
        name,
        "|| host_api_version()",
        registering_load(),
        "|| ()",
        "|| ()",
    );
    let violations = verify(&env, &source);
    assert_eq!(violations.len(), 1, "got: {violations:?}");
    assert_eq!(
        violations[0].message(),
        "Method name() returned an empty string"
    );
}

#[rstest]
fn faulting_name_is_isolated(env: HostEnvironment) {
    let source = plugin_with(
        r#"|| { throw "no name today" }"#,
        "|| host_api_version()",
        registering_load(),
        "|| ()",
        "|| ()",
    );
    let violations = verify(&env, &source);
    assert_eq!(violations.len(), 1, "got: {violations:?}");
    assert!(violations[0].message().starts_with("Method name() raised an error:"));
    assert!(violations[0].message().contains("no name today"));
}

// ---------------------------------------------------------------------------
// Version check
// ---------------------------------------------------------------------------

#[rstest]
fn unit_api_version_is_a_violation(env: HostEnvironment) {
    let source = plugin_with(
        r#"|| "Probe""#,
        "|| ()",
        registering_load(),
        "|| ()",
        "|| ()",
    );
    let violations = verify(&env, &source);
    assert_eq!(violations.len(), 1, "got: {violations:?}");
    assert_eq!(
        violations[0].message(),
        "Method api_version() returned (), expected a version value"
    );
}

// ---------------------------------------------------------------------------
// Load run-through
// ---------------------------------------------------------------------------

#[rstest]
fn load_without_registration_is_a_violation(env: HostEnvironment) {
    let source = plugin_with(
        r#"|| "Probe""#,
        "|| host_api_version()",
        "|window, container| {}",
        "|| ()",
        "|| ()",
    );
    let violations = verify(&env, &source);
    assert_eq!(violations.len(), 1, "got: {violations:?}");
    assert_eq!(
        violations[0].message(),
        "Plugin did not call plugin_container.add_plugin_widget during load()"
    );
}

#[rstest]
fn crashing_load_reports_the_crash_not_the_registration(env: HostEnvironment) {
    let source = plugin_with(
        r#"|| "Probe""#,
        "|| host_api_version()",
        r#"|window, container| { throw "load kaput" }"#,
        "|| ()",
        "|| ()",
    );
    let violations = verify(&env, &source);
    assert_eq!(violations.len(), 1, "got: {violations:?}");
    assert!(violations[0].message().starts_with("Method load() crashed:"));
    assert!(violations[0].message().contains("load kaput"));
}

#[rstest]
fn load_may_use_the_window_stub(env: HostEnvironment) {
    let source = plugin_with(
        r#"|| "Probe""#,
        "|| host_api_version()",
        r#"|window, container| {
            window.set_title("probe loaded");
            container.add_plugin_widget("Probe", new_widget("panel"));
        }"#,
        "|| ()",
        "|| ()",
    );
    assert!(verify(&env, &source).is_empty());
    assert_eq!(env.container().registration_count(), 1);
}

// ---------------------------------------------------------------------------
// Accessor and teardown checks
// ---------------------------------------------------------------------------

#[rstest]
fn unit_widget_return_is_tolerated(env: HostEnvironment) {
    let source = plugin_with(
        r#"|| "Probe""#,
        "|| host_api_version()",
        registering_load(),
        "|| ()",
        "|| ()",
    );
    assert!(verify(&env, &source).is_empty());
}

#[rstest]
fn faulting_widget_accessor_is_isolated(env: HostEnvironment) {
    let source = plugin_with(
        r#"|| "Probe""#,
        "|| host_api_version()",
        registering_load(),
        r#"|| { throw "widget gone" }"#,
        "|| ()",
    );
    let violations = verify(&env, &source);
    assert_eq!(violations.len(), 1, "got: {violations:?}");
    assert!(
        violations[0]
            .message()
            .starts_with("Method get_widget() raised an error:")
    );
}

#[rstest]
fn faulting_unload_is_isolated(env: HostEnvironment) {
    let source = plugin_with(
        r#"|| "Probe""#,
        "|| host_api_version()",
        registering_load(),
        "|| ()",
        r#"|| { throw "teardown kaput" }"#,
    );
    let violations = verify(&env, &source);
    assert_eq!(violations.len(), 1, "got: {violations:?}");
    assert!(violations[0].message().starts_with("Method unload() crashed:"));
}

#[rstest]
fn missing_lifecycle_method_is_reported_per_step(env: HostEnvironment) {
    // An instance map without unload: the other steps still run.
    let violations = verify(
        &env,
        r#"
        fn Plugin() {
            #{
                name: || "Probe",
                api_version: || host_api_version(),
                load: |window, container| container.add_plugin_widget("Probe", new_widget("panel")),
                get_widget: || (),
            }
        }
        "#,
    );
    assert_eq!(violations.len(), 1, "got: {violations:?}");
    assert_eq!(
        violations[0].message(),
        "Method unload() is not defined on the Plugin instance"
    );
    assert_eq!(violations[0].stage(), LifecycleStage::Unload);
}

// ---------------------------------------------------------------------------
// Whole-contract outcomes
// ---------------------------------------------------------------------------

#[rstest]
fn conformant_plugin_yields_no_violations(env: HostEnvironment) {
    assert!(verify(&env, CONFORMANT_PLUGIN).is_empty());
}

#[rstest]
fn violations_preserve_lifecycle_order(env: HostEnvironment) {
    let source = plugin_with(
        "|| ()",
        "|| ()",
        "|window, container| {}",
        r#"|| { throw "widget gone" }"#,
        r#"|| { throw "teardown kaput" }"#,
    );
    let stages: Vec<LifecycleStage> =
        verify(&env, &source).iter().map(Violation::stage).collect();
    assert_eq!(
        stages,
        vec![
            LifecycleStage::Name,
            LifecycleStage::ApiVersion,
            LifecycleStage::Load,
            LifecycleStage::Widget,
            LifecycleStage::Unload,
        ]
    );
}
