//! Window management core for the web desktop shell.
//!
//! Everything here is framework-free: the store reduces [`WindowCommand`]s, the gesture
//! interpreter turns pointer and touch events into commands, and the taskbar and launcher modules
//! project state into buttons and launch requests. The Leptos adapter lives in `desktop_runtime`.

pub mod config;
pub mod deep_link;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod launcher;
pub mod model;
pub mod store;
pub mod taskbar;

pub use config::{WindowManagerConfig, DOUBLE_TAP_WINDOW_MS};
pub use deep_link::{desired_link, parse_query, resolve, sync_query, ContentIndex, DeepLink};
pub use error::{ConfigError, DeepLinkError};
pub use geometry::{
    apply_resize_delta, maximized_rect, pinch_transform, sanitize_size, tear_off_offset,
    touch_distance, ResizeDirection,
};
pub use gesture::{GesturePhase, ShellContext, ShellEvent, ShellTarget, WindowShell};
pub use launcher::{
    app_descriptor, default_geometry, installed_apps, is_external_target, launch_entry,
    open_app_request, pinned_apps, search_apps, AppDescriptor, ContentEntry, ContentLibrary,
    DocumentFormat, EntryKind, LaunchOutcome,
};
pub use model::{
    AppType, OpenWindowRequest, Point, Rect, Size, Viewport, WindowId, WindowRecord,
    WindowStoreState,
};
pub use store::{reduce_windows, SubscriptionId, WindowCommand, WindowStore};
pub use taskbar::{
    activate_group, activate_window, group_windows, preview_close, preview_layout,
    preview_select, taskbar_buttons, PreviewController, PreviewLayout, PreviewTimerKind,
    TaskbarButton, TaskbarGroup, TaskbarWindowButton, TimerRequest,
};
