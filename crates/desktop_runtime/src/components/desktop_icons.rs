use window_manager::{ContentEntry, DocumentFormat, EntryKind, DOUBLE_TAP_WINDOW_MS};

use super::*;

/// Glyph for an entry without an explicit icon.
fn entry_glyph(entry: &ContentEntry) -> String {
    if let Some(icon) = &entry.icon {
        return icon.clone();
    }
    match &entry.kind {
        EntryKind::Folder => "📁",
        EntryKind::Executable => "💼",
        EntryKind::Shortcut { .. } => "🔗",
        EntryKind::Document { format } => match format {
            DocumentFormat::Text | DocumentFormat::Markdown => "📝",
            DocumentFormat::Json => "🗂️",
            DocumentFormat::Pdf => "📄",
            DocumentFormat::Image => "🖼️",
        },
    }
    .to_string()
}

/// Explicit grid cell from `metadata.gridPosition = { col, row }`, if any.
fn grid_style(entry: &ContentEntry) -> Option<String> {
    let position = entry.metadata.get("gridPosition")?;
    let col = position.get("col")?.as_u64()?;
    let row = position.get("row")?.as_u64()?;
    Some(format!("grid-column:{col};grid-row:{row};"))
}

/// Second tap on the same icon inside the double-tap window.
fn is_double_tap(previous: Option<&(String, f64)>, id: &str, now_ms: f64) -> bool {
    previous.is_some_and(|(last_id, at)| last_id == id && now_ms - at <= DOUBLE_TAP_WINDOW_MS)
}

#[component]
pub(super) fn DesktopIcons() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let selected = create_rw_signal(None::<String>);
    let last_tap = store_value(None::<(String, f64)>);
    let entries = runtime.content.with_value(|content| content.entries.clone());

    let icons = entries
        .into_iter()
        .map(|entry| {
            let id = entry.id.clone();
            let select_id = entry.id.clone();
            let glyph = entry_glyph(&entry);
            let style = grid_style(&entry).unwrap_or_default();
            let name = entry.name.clone();
            let decorative = !entry.interactive;
            let entry = store_value(entry);

            view! {
                <div
                    class="desktop-icon"
                    class:selected=move || selected.with(|selected| selected.as_deref() == Some(id.as_str()))
                    class:decorative=decorative
                    style=style
                    tabindex="0"
                    on:click=move |ev: web_sys::MouseEvent| {
                        ev.stop_propagation();
                        selected.set(Some(select_id.clone()));
                        if !runtime.is_compact() {
                            return;
                        }
                        let now = runtime.host.get_value().now_ms();
                        let double = last_tap.with_value(|previous| {
                            is_double_tap(previous.as_ref(), &select_id, now)
                        });
                        if double {
                            last_tap.set_value(None);
                            entry.with_value(|entry| runtime.launch(entry));
                        } else {
                            last_tap.set_value(Some((select_id.clone(), now)));
                        }
                    }
                    on:dblclick=move |ev: web_sys::MouseEvent| {
                        stop_mouse_event(&ev);
                        entry.with_value(|entry| runtime.launch(entry));
                    }
                >
                    <div class="desktop-icon-glyph" aria-hidden="true">{glyph}</div>
                    <span class="desktop-icon-label">{name}</span>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="desktop-icon-grid" on:click=move |_| selected.set(None)>
            {icons}
        </div>
    }
}
