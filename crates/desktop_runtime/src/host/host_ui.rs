#[cfg(target_arch = "wasm32")]
use leptos::logging;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;
use window_manager::Viewport;

#[cfg(target_arch = "wasm32")]
use super::{opens_in_new_tab, url_with_query};

pub(super) fn viewport() -> Viewport {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let fallback = Viewport::default();
            let width = window
                .inner_width()
                .ok()
                .and_then(|value| value.as_f64())
                .unwrap_or(fallback.width);
            let height = window
                .inner_height()
                .ok()
                .and_then(|value| value.as_f64())
                .unwrap_or(fallback.height);
            return Viewport::new(width, height);
        }
    }

    Viewport::default()
}

pub(super) fn now_ms() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        return js_sys::Date::now();
    }

    #[cfg(not(target_arch = "wasm32"))]
    0.0
}

pub(super) fn open_external_url(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let result = if opens_in_new_tab(url) {
            window
                .open_with_url_and_target(url, "_blank")
                .map(|_| ())
        } else {
            window.location().set_href(url)
        };
        if let Err(err) = result {
            logging::warn!("open external url failed for `{url}`: {err:?}");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = url;
}

pub(super) fn location_query() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            return window.location().search().unwrap_or_default();
        }
    }

    String::new()
}

pub(super) fn replace_query(query: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let pathname = window.location().pathname().unwrap_or_default();
        let url = url_with_query(&pathname, query);
        let Ok(history) = window.history() else {
            return;
        };
        let state = history.state().unwrap_or(JsValue::NULL);
        if let Err(err) = history.replace_state_with_url(&state, "", Some(&url)) {
            logging::warn!("history.replaceState failed for `{url}`: {err:?}");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = query;
}
