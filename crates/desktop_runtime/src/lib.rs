//! Leptos adapter for the window manager: reactive state, the desktop shell, and browser hooks.

pub mod components;
pub mod host;
mod runtime_context;

pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use host::DesktopHostContext;
