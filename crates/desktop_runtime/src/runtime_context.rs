//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the [`WindowStore`], mirrors it into a reactive signal through a store
//! subscription, and exposes the dispatch callback components feed [`WindowCommand`]s into. UI
//! composition stays in [`crate::components`].
#![allow(clippy::clone_on_copy)]

use leptos::*;
use window_manager::{
    activate_group, launch_entry, open_app_request, parse_query, resolve, sync_query,
    AppDescriptor, AppType, ContentEntry, ContentLibrary, LaunchOutcome, Size, SubscriptionId,
    Viewport, WindowCommand, WindowManagerConfig, WindowRecord, WindowStore, WindowStoreState,
};

use crate::host::DesktopHostContext;

#[derive(Clone, Copy)]
/// Leptos context for reading window state and dispatching [`WindowCommand`] values.
pub struct DesktopRuntimeContext {
    /// Browser environment queries and side effects.
    pub host: StoredValue<DesktopHostContext>,
    /// Window-manager tuning loaded by the entry layer.
    pub config: StoredValue<WindowManagerConfig>,
    /// Content tree behind desktop icons and deep links.
    pub content: StoredValue<ContentLibrary>,
    /// Reactive mirror of the store's state, refreshed by its change subscription.
    pub state: RwSignal<WindowStoreState>,
    /// Reactive browser viewport, refreshed on resize.
    pub viewport: RwSignal<Viewport>,
    pub start_menu_open: RwSignal<bool>,
    /// Content renderer supplied by the entry layer, switched on the window's app type.
    pub render_window: Callback<WindowRecord, View>,
    /// Applies a batch of commands and publishes the new state once.
    pub dispatch: Callback<Vec<WindowCommand>>,
}

impl DesktopRuntimeContext {
    /// Dispatches a single command through the runtime context callback.
    pub fn dispatch_command(&self, command: WindowCommand) {
        self.dispatch.call(vec![command]);
    }

    pub fn dispatch_all(&self, commands: Vec<WindowCommand>) {
        if !commands.is_empty() {
            self.dispatch.call(commands);
        }
    }

    /// Minimum window size for the current viewport.
    pub fn min_size(&self) -> Size {
        let viewport = self.viewport.get_untracked();
        self.config.with_value(|config| config.min_size_for(viewport))
    }

    /// Tracked: re-runs dependants when the viewport crosses the compact breakpoint.
    pub fn is_compact(&self) -> bool {
        let viewport = self.viewport.get();
        self.config.with_value(|config| config.is_compact(viewport))
    }

    /// Opens whatever a double-click on `entry` should open.
    pub fn launch(&self, entry: &ContentEntry) {
        let viewport = self.viewport.get_untracked();
        let outcome = self
            .config
            .with_value(|config| launch_entry(entry, viewport, config));
        match outcome {
            LaunchOutcome::Open(request) => self.dispatch_command(WindowCommand::Open(request)),
            LaunchOutcome::External(url) => self.host.get_value().open_external_url(&url),
            LaunchOutcome::Ignored => {}
        }
    }

    /// Starts a fresh window for an installed app and closes the start menu.
    pub fn open_app(&self, app: &AppDescriptor) {
        let viewport = self.viewport.get_untracked();
        let timestamp = self.host.get_value().now_ms() as u64;
        let request = self
            .config
            .with_value(|config| open_app_request(app, viewport, config, timestamp));
        self.start_menu_open.set(false);
        self.dispatch_command(WindowCommand::Open(request));
    }

    /// Click on a taskbar group button.
    pub fn activate_taskbar_group(&self, app_type: &AppType) {
        let viewport = self.viewport.get_untracked();
        let timestamp = self.host.get_value().now_ms() as u64;
        let commands = self.state.with_untracked(|state| {
            self.config.with_value(|config| {
                activate_group(state, app_type, viewport, config, timestamp)
            })
        });
        self.dispatch_all(commands);
    }
}

fn install_viewport_tracking(runtime: DesktopRuntimeContext) {
    let resize_listener = window_event_listener(ev::resize, move |_| {
        let viewport = runtime.host.get_value().viewport();
        if runtime.viewport.get_untracked() != viewport {
            runtime.viewport.set(viewport);
        }
    });
    on_cleanup(move || resize_listener.remove());
}

/// Opens the window named by `?project=`/`?folder=`, then keeps the query in step with the
/// active window.
fn install_deep_link_sync(runtime: DesktopRuntimeContext) {
    let host = runtime.host.get_value();
    if let Some(link) = parse_query(&host.location_query()) {
        let viewport = runtime.viewport.get_untracked();
        let resolved = runtime.content.with_value(|content| {
            runtime
                .config
                .with_value(|config| resolve(&link, content, viewport, config))
        });
        match resolved {
            Ok(request) => runtime.dispatch_command(WindowCommand::Open(request)),
            Err(err) => logging::warn!("ignoring deep link: {err}"),
        }
    }

    create_effect(move |_| {
        let replacement = runtime.state.with(|state| {
            runtime
                .config
                .with_value(|config| sync_query(&host.location_query(), state, config))
        });
        if let Some(query) = replacement {
            host.replace_query(&query);
        }
    });
}

/// Publishes every state change of `store` into `state`.
fn connect_store(
    store: StoredValue<WindowStore>,
    state: RwSignal<WindowStoreState>,
) -> Option<SubscriptionId> {
    store.try_update_value(|store| {
        state.set(store.state().clone());
        store.subscribe(move |next| state.set(next.clone()))
    })
}

/// Applies `commands` as one batch. Dependants re-run once, after the store borrow is released.
fn dispatch_to_store(store: StoredValue<WindowStore>, commands: Vec<WindowCommand>) -> bool {
    batch(|| {
        store
            .try_update_value(|store| store.dispatch_all(commands))
            .unwrap_or(false)
    })
}

/// Keeps the store's size floor in step with the compact breakpoint.
fn install_min_size_tracking(
    store: StoredValue<WindowStore>,
    viewport: RwSignal<Viewport>,
    config: StoredValue<WindowManagerConfig>,
) {
    let min_size = create_memo(move |_| {
        let viewport = viewport.get();
        config.with_value(|config| config.min_size_for(viewport))
    });
    create_effect(move |_| {
        let min_size: Size = min_size.get();
        store.try_update_value(|store| store.set_min_size(min_size));
    });
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and opens any deep-linked window.
pub fn DesktopProvider(
    /// Window-manager tuning, usually parsed from the site's TOML config.
    config: WindowManagerConfig,
    /// Content tree for desktop icons and deep links.
    content: ContentLibrary,
    /// Produces the view shown inside a window.
    render_window: Callback<WindowRecord, View>,
    children: Children,
) -> impl IntoView {
    let host = store_value(DesktopHostContext);
    let viewport = create_rw_signal(host.get_value().viewport());
    let min_size = config.min_size_for(viewport.get_untracked());
    let config = store_value(config);
    let content = store_value(content);
    let store = store_value(WindowStore::new(min_size));
    let state = create_rw_signal(WindowStoreState::default());
    let start_menu_open = create_rw_signal(false);

    if let Some(subscription) = connect_store(store, state) {
        on_cleanup(move || {
            store.try_update_value(|store| store.unsubscribe(subscription));
        });
    }
    install_min_size_tracking(store, viewport, config);

    let dispatch = Callback::new(move |commands: Vec<WindowCommand>| {
        dispatch_to_store(store, commands);
    });

    let runtime = DesktopRuntimeContext {
        host,
        config,
        content,
        state,
        viewport,
        start_menu_open,
        render_window,
        dispatch,
    };

    provide_context(runtime.clone());

    install_viewport_tracking(runtime);
    install_deep_link_sync(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
