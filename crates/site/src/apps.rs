//! Content renderer: the view shown inside each window, switched on its app type.
//!
//! Apps are deliberately small. The window manager only forwards the record; everything here reads
//! the record's `content` payload or `path` and nothing else.

use desktop_runtime::use_desktop_runtime;
use leptos::*;
use serde_json::Value;
use window_manager::{
    is_external_target, AppType, ContentEntry, ContentLibrary, EntryKind, WindowRecord,
};

/// Renders the body of `win`.
pub fn render_window(win: WindowRecord) -> View {
    match win.app_type {
        AppType::FileExplorer => view! { <FileExplorer path=win.path /> }.into_view(),
        AppType::Notepad => notepad(&win.content),
        AppType::ProjectViewer => project_viewer(&win.content),
        AppType::PdfViewer => document_frame(win.path.unwrap_or_default(), win.title),
        AppType::ImageViewer => view! {
            <div class="app-shell app-image-viewer">
                <img src=win.path.unwrap_or_default() alt=win.title />
            </div>
        }
        .into_view(),
        AppType::Calculator => view! { <Calculator /> }.into_view(),
        AppType::Browser => placeholder("Browser", "Browsing is not available in this build."),
        AppType::Settings => placeholder("Settings", "Nothing to configure yet."),
        AppType::About => placeholder(
            "About Me",
            "Open the About Me folder on the desktop for the full story.",
        ),
        AppType::Other(kind) => placeholder("Unknown app", &format!("No viewer for `{kind}`.")),
    }
}

fn placeholder(title: &str, body: &str) -> View {
    view! {
        <div class="app-shell app-placeholder">
            <p><strong>{title.to_string()}</strong></p>
            <p>{body.to_string()}</p>
        </div>
    }
    .into_view()
}

/// Text carried in a document entry's metadata.
fn document_text(payload: &Value) -> String {
    payload
        .pointer("/metadata/text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn notepad(payload: &Value) -> View {
    let text = document_text(payload);
    view! {
        <div class="app-shell app-notepad">
            <textarea class="app-notepad-text" readonly=true spellcheck="false">{text}</textarea>
        </div>
    }
    .into_view()
}

fn project_viewer(payload: &Value) -> View {
    let name = payload
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim_end_matches(".exe")
        .to_string();
    let summary = payload
        .pointer("/metadata/summary")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let stack: Vec<String> = payload
        .pointer("/metadata/stack")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    let repository = payload
        .pointer("/metadata/repository")
        .and_then(Value::as_str)
        .map(str::to_string);

    view! {
        <article class="app-shell app-project-viewer">
            <h1>{name}</h1>
            <p>{summary}</p>
            <ul class="app-project-stack">
                {stack.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}
            </ul>
            {repository.map(|url| view! {
                <a href=url.clone() target="_blank" rel="noopener noreferrer">{url}</a>
            })}
        </article>
    }
    .into_view()
}

fn document_frame(src: String, title: String) -> View {
    view! {
        <div class="app-shell app-pdf-viewer">
            <iframe src=src title=title></iframe>
        </div>
    }
    .into_view()
}

/// Folder path that lists the desktop itself.
const DESKTOP_ROOT: &str = "/Desktop";

/// Entries listed by a file browser opened at `path`; the desktop root when `path` is unset.
fn folder_listing(library: &ContentLibrary, path: Option<&str>) -> Vec<ContentEntry> {
    match path.filter(|path| *path != "/" && *path != DESKTOP_ROOT) {
        None => library.entries.clone(),
        Some(path) => library
            .find_by_path(path)
            .map(|folder| folder.children.clone())
            .unwrap_or_default(),
    }
}

/// Visited folder paths with a cursor; navigating after going back drops the forward entries.
#[derive(Debug, Clone, PartialEq)]
struct ExplorerHistory {
    paths: Vec<String>,
    index: usize,
}

impl ExplorerHistory {
    fn new(start: impl Into<String>) -> Self {
        Self {
            paths: vec![start.into()],
            index: 0,
        }
    }

    fn current(&self) -> &str {
        &self.paths[self.index]
    }

    fn can_go_back(&self) -> bool {
        self.index > 0
    }

    fn navigate(&mut self, path: impl Into<String>) {
        self.paths.truncate(self.index + 1);
        self.paths.push(path.into());
        self.index = self.paths.len() - 1;
    }

    fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.index -= 1;
        true
    }
}

/// `(label, path)` for each segment of `path`.
fn breadcrumbs(path: &str) -> Vec<(String, String)> {
    let mut prefix = String::new();
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            prefix.push('/');
            prefix.push_str(segment);
            (segment.to_string(), prefix.clone())
        })
        .collect()
}

/// Folder an entry navigates to inside the explorer, if it does not open a window.
fn navigation_target(entry: &ContentEntry) -> Option<String> {
    match &entry.kind {
        EntryKind::Folder => Some(entry.path.clone()),
        EntryKind::Shortcut { target } if !is_external_target(target) => Some(target.clone()),
        _ => None,
    }
}

fn kind_label(kind: &EntryKind) -> String {
    match kind {
        EntryKind::Folder => "Folder".to_string(),
        EntryKind::Executable => "Application".to_string(),
        EntryKind::Shortcut { .. } => "Shortcut".to_string(),
        EntryKind::Document { format } => format!("{format:?} document"),
    }
}

#[component]
fn FileExplorer(path: Option<String>) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let history = create_rw_signal(ExplorerHistory::new(
        path.unwrap_or_else(|| DESKTOP_ROOT.to_string()),
    ));
    let selected = create_rw_signal(None::<ContentEntry>);

    let navigate = move |path: String| {
        history.update(|history| history.navigate(path));
        selected.set(None);
    };
    let open = move |entry: &ContentEntry| match navigation_target(entry) {
        Some(path) => navigate(path),
        None => runtime.launch(entry),
    };

    let listing = move || {
        let current = history.with(|history| history.current().to_string());
        runtime
            .content
            .with_value(|content| folder_listing(content, Some(&current)))
    };

    view! {
        <div class="app-shell app-explorer">
            <nav class="app-explorer-nav">
                <button
                    type="button"
                    aria-label="Back"
                    disabled=move || !history.with(ExplorerHistory::can_go_back)
                    on:click=move |_| {
                        history.update(|history| {
                            history.back();
                        });
                        selected.set(None);
                    }
                >
                    "‹"
                </button>
                <div class="app-explorer-breadcrumb">
                    {move || {
                        breadcrumbs(history.with(|history| history.current().to_string()).as_str())
                            .into_iter()
                            .map(|(label, path)| view! {
                                <button type="button" on:click=move |_| navigate(path.clone())>
                                    {label}
                                </button>
                            })
                            .collect_view()
                    }}
                </div>
            </nav>
            <ul class="app-explorer-list">
                {move || {
                    listing()
                        .into_iter()
                        .map(|entry| {
                            let id = entry.id.clone();
                            let name = entry.name.clone();
                            let entry = store_value(entry);
                            view! {
                                <li
                                    class="app-explorer-item"
                                    class:selected=move || {
                                        selected.with(|selected| {
                                            selected.as_ref().is_some_and(|item| item.id == id)
                                        })
                                    }
                                    on:click=move |_| selected.set(Some(entry.get_value()))
                                    on:dblclick=move |_| entry.with_value(|entry| open(entry))
                                >
                                    {name}
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
            {move || {
                selected.get().map(|item| {
                    let description = item
                        .metadata
                        .get("summary")
                        .or_else(|| item.metadata.get("description"))
                        .and_then(Value::as_str)
                        .map(str::to_string);
                    view! {
                        <aside class="app-explorer-preview">
                            <h3>{item.name.clone()}</h3>
                            <p>{format!("Type: {}", kind_label(&item.kind))}</p>
                            {description.map(|text| view! { <p>{text}</p> })}
                        </aside>
                    }
                })
            }}
            <div class="app-statusbar">
                {move || format!("{} items", listing().len())}
            </div>
        </div>
    }
}

#[component]
fn Calculator() -> impl IntoView {
    let display = create_rw_signal(String::from("0"));
    let pending = create_rw_signal(None::<(f64, char)>);

    let current = move || display.get_untracked().parse::<f64>().unwrap_or_default();
    let press_digit = move |digit: char| {
        display.update(|text| {
            if text == "0" {
                text.clear();
            }
            text.push(digit);
        });
    };
    let press_operator = move |op: char| {
        let value = current();
        let result = pending
            .get_untracked()
            .map(|(left, pending_op)| apply_operator(left, pending_op, value))
            .unwrap_or(value);
        pending.set(Some((result, op)));
        display.set("0".to_string());
    };
    let press_equals = move || {
        if let Some((left, op)) = pending.get_untracked() {
            display.set(apply_operator(left, op, current()).to_string());
            pending.set(None);
        }
    };

    view! {
        <div class="app-shell app-calculator">
            <output class="app-calculator-display">{move || display.get()}</output>
            <div class="app-calculator-keys">
                {"789456123".chars()
                    .map(|digit| view! {
                        <button type="button" on:click=move |_| press_digit(digit)>{digit.to_string()}</button>
                    })
                    .collect_view()}
                <button type="button" on:click=move |_| press_digit('0')>"0"</button>
                {['+', '-', '*', '/']
                    .into_iter()
                    .map(|op| view! {
                        <button type="button" on:click=move |_| press_operator(op)>{op.to_string()}</button>
                    })
                    .collect_view()}
                <button type="button" on:click=move |_| press_equals()>"="</button>
                <button
                    type="button"
                    on:click=move |_| {
                        display.set("0".to_string());
                        pending.set(None);
                    }
                >
                    "C"
                </button>
            </div>
        </div>
    }
}

fn apply_operator(left: f64, op: char, right: f64) -> f64 {
    match op {
        '+' => left + right,
        '-' => left - right,
        '*' => left * right,
        '/' if right != 0.0 => left / right,
        _ => 0.0,
    }
}
