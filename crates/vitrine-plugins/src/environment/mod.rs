//! Scoped stand-in environment for the host and its widget toolkit.
//!
//! Real Vitrine plugins run against the host window and a widget toolkit.
//! Neither is available (or wanted) while checking plugin integrity, so each
//! check builds a fresh [`HostEnvironment`]: a disposable script engine
//! pre-registered with stand-ins for everything a plugin touches at load
//! time. Constructing the environment per candidate file keeps observations
//! (notably container registrations) from leaking between files.
//!
//! Three surfaces are installed:
//!
//! - the host plugin-contract stubs: a [`PluginBase`] type whose lifecycle
//!   operations raise "not implemented" (it exists so scripts can exercise
//!   the abstract surface, not to be useful), and the version marker exposed
//!   both as the `host_api_version()` function and the `API_VERSION` scope
//!   constant;
//! - the widget toolkit stubs: [`Widget`] constructors and chainable layout
//!   methods that always succeed without rendering anything;
//! - the observing [`ContainerStub`] whose `add_plugin_widget` method records
//!   every registration made during `load()`.
//!
//! The toolkit stub validates nothing about real GUI behaviour. A passing
//! check asserts the lifecycle contract only.

use std::cell::RefCell;
use std::rc::Rc;

use rhai::{Dynamic, Engine, EvalAltResult, FnPtr, ImmutableString, Position, Scope};

/// Version marker exposed to plugin scripts by the contract stand-in.
pub const HOST_API_VERSION: i64 = 1;

/// Script-facing name of the container type.
const CONTAINER_TYPE_NAME: &str = "PluginContainer";

/// Stand-in for the host main window.
///
/// Plugins receive this as the first argument to `load()`. Every method is a
/// no-op; the type exists so window calls made during load do not fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostHandle;

/// Stand-in for the host's plugin container, observing registrations.
///
/// The container records each `add_plugin_widget(name, widget)` call made by
/// plugin code. Clones share the same observation log, so the copy handed to
/// `load()` reports back through the instance retained by the verifier.
///
/// # Example
///
/// ```
/// use vitrine_plugins::HostEnvironment;
///
/// let env = HostEnvironment::new();
/// assert!(!env.container().was_called());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContainerStub {
    registered: Rc<RefCell<Vec<String>>>,
}

impl ContainerStub {
    /// Records one registration call.
    fn record(&self, name: &str) {
        self.registered.borrow_mut().push(name.to_owned());
    }

    /// Returns `true` when `add_plugin_widget` was invoked at least once.
    #[must_use]
    pub fn was_called(&self) -> bool {
        !self.registered.borrow().is_empty()
    }

    /// Returns how many times `add_plugin_widget` was invoked.
    #[must_use]
    pub fn registration_count(&self) -> usize {
        self.registered.borrow().len()
    }

    /// Returns the widget names registered so far, in call order.
    #[must_use]
    pub fn registered_names(&self) -> Vec<String> {
        self.registered.borrow().clone()
    }
}

/// Abstract lifecycle surface stand-in.
///
/// Mirrors the host's abstract plugin base: every operation raises a
/// "not implemented" fault when invoked without an override.
#[derive(Debug, Clone, Copy, Default)]
pub struct PluginBase;

/// Inert widget stand-in returned by every toolkit constructor.
///
/// Widgets carry only their kind string so diagnostics and tests can tell
/// them apart; nothing is rendered.
#[derive(Debug, Clone)]
pub struct Widget {
    kind: ImmutableString,
}

impl Widget {
    fn new(kind: impl Into<ImmutableString>) -> Self {
        Self { kind: kind.into() }
    }

    /// Returns the widget kind, e.g. `"label"`.
    #[must_use]
    pub fn kind(&self) -> &str {
        self.kind.as_str()
    }
}

fn not_implemented(operation: &str) -> Box<EvalAltResult> {
    EvalAltResult::ErrorRuntime(
        Dynamic::from(format!("PluginBase::{operation} is not implemented")),
        Position::NONE,
    )
    .into()
}

/// Disposable per-check environment wrapping a pre-configured script engine.
///
/// # Example
///
/// ```
/// use vitrine_plugins::HostEnvironment;
///
/// let env = HostEnvironment::new();
/// let height: i64 = env
///     .engine()
///     .eval(r#"let w = new_line_edit(); w.set_fixed_height(40); 40"#)
///     .expect("stub toolkit accepts widget calls");
/// assert_eq!(height, 40);
/// ```
#[derive(Debug)]
pub struct HostEnvironment {
    engine: Engine,
    container: ContainerStub,
}

impl HostEnvironment {
    /// Builds a fresh environment with all stand-ins registered.
    #[must_use]
    pub fn new() -> Self {
        let container = ContainerStub::default();
        let mut engine = Engine::new();
        // A Plugin() body is a map literal of nested closures, which blows
        // through the engine's default expression-depth cap.
        engine.set_max_expr_depths(0, 0);
        register_contract_stubs(&mut engine);
        register_window_stub(&mut engine);
        register_toolkit_stubs(&mut engine);
        register_container_stub(&mut engine);
        Self { engine, container }
    }

    /// Returns the configured script engine.
    #[must_use]
    pub const fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Returns the observing container stand-in for this environment.
    ///
    /// The verifier passes a clone of it to `load()`; observations made by
    /// the clone are visible through this instance.
    #[must_use]
    pub const fn container(&self) -> &ContainerStub {
        &self.container
    }

    /// Returns a fresh host window stand-in.
    #[must_use]
    pub const fn host(&self) -> HostHandle {
        HostHandle
    }

    /// Returns the scope candidate top-level code executes in.
    ///
    /// Carries the `API_VERSION` constant so scripts depending on the
    /// contract package's version marker import cleanly.
    #[must_use]
    pub fn base_scope(&self) -> Scope<'static> {
        let mut scope = Scope::new();
        scope.push_constant("API_VERSION", HOST_API_VERSION);
        scope
    }
}

impl Default for HostEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

/// Registers the abstract plugin-contract surface and the version marker.
fn register_contract_stubs(engine: &mut Engine) {
    engine.register_fn("host_api_version", || HOST_API_VERSION);

    engine.register_type_with_name::<PluginBase>("PluginBase");
    engine.register_fn("plugin_base", PluginBase::default);
    engine.register_fn(
        "name",
        |_: &mut PluginBase| -> Result<ImmutableString, Box<EvalAltResult>> {
            Err(not_implemented("name"))
        },
    );
    engine.register_fn(
        "api_version",
        |_: &mut PluginBase| -> Result<i64, Box<EvalAltResult>> {
            Err(not_implemented("api_version"))
        },
    );
    engine.register_fn(
        "load",
        |_: &mut PluginBase, _: Dynamic, _: Dynamic| -> Result<(), Box<EvalAltResult>> {
            Err(not_implemented("load"))
        },
    );
    engine.register_fn(
        "get_widget",
        |_: &mut PluginBase| -> Result<Dynamic, Box<EvalAltResult>> {
            Err(not_implemented("get_widget"))
        },
    );
    engine.register_fn(
        "unload",
        |_: &mut PluginBase| -> Result<(), Box<EvalAltResult>> {
            Err(not_implemented("unload"))
        },
    );
}

/// Registers the no-op host window stand-in.
fn register_window_stub(engine: &mut Engine) {
    engine.register_type_with_name::<HostHandle>("HostWindow");
    engine.register_fn("set_title", |_: &mut HostHandle, _title: &str| {});
    engine.register_fn("status_message", |_: &mut HostHandle, _message: &str| {});
}

/// Registers the widget toolkit stand-ins.
///
/// The surface mirrors what the demonstration plugins use: a handful of
/// constructors plus chainable layout and property setters. Everything
/// succeeds and renders nothing.
fn register_toolkit_stubs(engine: &mut Engine) {
    engine.register_type_with_name::<Widget>("Widget");
    engine.register_get("kind", |w: &mut Widget| w.kind.clone());
    engine.register_fn("to_string", |w: &mut Widget| format!("<{}>", w.kind));

    engine.register_fn("new_widget", |kind: &str| Widget::new(kind));
    engine.register_fn("new_label", |_text: &str| Widget::new("label"));
    engine.register_fn("new_button", |_text: &str| Widget::new("button"));
    engine.register_fn("new_line_edit", || Widget::new("line_edit"));
    engine.register_fn("new_layout", |kind: &str| Widget::new(kind));
    engine.register_fn("new_tab_view", || Widget::new("tab_view"));
    engine.register_fn("new_chart", |_kind: &str| Widget::new("chart"));

    engine.register_fn("add_child", |_: &mut Widget, _child: Widget| {});
    engine.register_fn("add_widget", |_: &mut Widget, _child: Widget| {});
    engine.register_fn("add_tab", |_: &mut Widget, _child: Widget, _title: &str| {});
    engine.register_fn("set_layout", |_: &mut Widget, _layout: Widget| {});
    engine.register_fn("set_text", |_: &mut Widget, _text: &str| {});
    engine.register_fn("set_read_only", |_: &mut Widget, _read_only: bool| {});
    engine.register_fn("set_fixed_height", |_: &mut Widget, _height: i64| {});
    engine.register_fn("set_style", |_: &mut Widget, _style: &str| {});
    engine.register_fn("plot", |_: &mut Widget, _series: Dynamic| {});
    engine.register_fn("on_event", |_: &mut Widget, _event: &str, _handler: FnPtr| {});
}

/// Registers the observing container stand-in.
fn register_container_stub(engine: &mut Engine) {
    engine.register_type_with_name::<ContainerStub>(CONTAINER_TYPE_NAME);
    engine.register_fn(
        "add_plugin_widget",
        |container: &mut ContainerStub, name: &str, _widget: Dynamic| {
            container.record(name);
        },
    );
}
