use leptos::logging;
use window_manager::WindowManagerConfig;

const DESKTOP_CONFIG: &str = include_str!("../config/desktop.toml");

/// Window-manager config bundled with the site, or the built-in defaults if it does not parse.
pub fn site_config() -> WindowManagerConfig {
    parse_or_default(DESKTOP_CONFIG)
}

fn parse_or_default(raw: &str) -> WindowManagerConfig {
    WindowManagerConfig::from_toml_str(raw).unwrap_or_else(|err| {
        logging::warn!("desktop config rejected, using defaults: {err}");
        WindowManagerConfig::default()
    })
}
