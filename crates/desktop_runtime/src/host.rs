//! Browser-facing host helpers.
//!
//! Everything that touches `web_sys` directly lives behind [`DesktopHostContext`] so components
//! stay free of raw DOM calls. Off-wasm builds get inert fallbacks, which keeps the crate's unit
//! tests runnable on the host toolchain.

mod host_ui;

use window_manager::Viewport;

#[derive(Debug, Clone, Copy, Default)]
/// Browser environment queries and side effects used by the desktop shell.
pub struct DesktopHostContext;

impl DesktopHostContext {
    /// Current browser viewport, including the area behind the taskbar.
    pub fn viewport(&self) -> Viewport {
        host_ui::viewport()
    }

    /// Wall-clock milliseconds, used for launch ids and double-tap timing.
    pub fn now_ms(&self) -> f64 {
        host_ui::now_ms()
    }

    /// Hands a URL to the browser instead of opening a desktop window.
    pub fn open_external_url(&self, url: &str) {
        host_ui::open_external_url(url);
    }

    /// `location.search`, including the leading `?` when non-empty.
    pub fn location_query(&self) -> String {
        host_ui::location_query()
    }

    /// Rewrites the query string in place without adding a history entry.
    pub fn replace_query(&self, query: &str) {
        host_ui::replace_query(query);
    }
}

/// Target URL for a query replacement; an empty query leaves only the path.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn url_with_query(pathname: &str, query: &str) -> String {
    let pathname = if pathname.is_empty() { "/" } else { pathname };
    format!("{pathname}{query}")
}

/// `mailto:` links hand off to the mail client in place; everything else opens a new tab.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn opens_in_new_tab(url: &str) -> bool {
    !url.starts_with("mailto:")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn query_replacement_keeps_path() {
        assert_eq!(url_with_query("/portfolio", "?project=os"), "/portfolio?project=os");
        assert_eq!(url_with_query("/portfolio", ""), "/portfolio");
        assert_eq!(url_with_query("", "?folder=x"), "/?folder=x");
    }

    #[test]
    fn mail_links_stay_in_place() {
        assert!(!opens_in_new_tab("mailto:me@example.com"));
        assert!(opens_in_new_tab("https://github.com"));
    }

    #[test]
    fn host_fallbacks_are_usable_off_wasm() {
        let host = DesktopHostContext;
        assert_eq!(host.viewport(), Viewport::default());
        assert_eq!(host.location_query(), "");
    }
}
