//! Launch paths: desktop/file-browser content entries and start-menu apps become
//! [`OpenWindowRequest`]s with shared default geometry.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::config::WindowManagerConfig;
use crate::model::{AppType, OpenWindowRequest, Point, Size, Viewport};

const DESKTOP_MARGIN: f64 = 40.0;
const COMPACT_MARGIN: f64 = 8.0;

/// Installed application shown in the start menu and, when pinned, on the taskbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDescriptor {
    pub app_type: AppType,
    pub name: &'static str,
    pub icon: &'static str,
    pub pinned: bool,
    pub category: &'static str,
}

static INSTALLED_APPS: [AppDescriptor; 6] = [
    AppDescriptor {
        app_type: AppType::FileExplorer,
        name: "File Explorer",
        icon: "📁",
        pinned: true,
        category: "System",
    },
    AppDescriptor {
        app_type: AppType::Browser,
        name: "Browser",
        icon: "🌐",
        pinned: true,
        category: "Internet",
    },
    AppDescriptor {
        app_type: AppType::Notepad,
        name: "Notepad",
        icon: "📝",
        pinned: true,
        category: "Accessories",
    },
    AppDescriptor {
        app_type: AppType::Calculator,
        name: "Calculator",
        icon: "🔢",
        pinned: true,
        category: "Accessories",
    },
    AppDescriptor {
        app_type: AppType::Settings,
        name: "Settings",
        icon: "⚙️",
        pinned: false,
        category: "System",
    },
    AppDescriptor {
        app_type: AppType::About,
        name: "About Me",
        icon: "👤",
        pinned: true,
        category: "Personal",
    },
];

/// Installed apps in start-menu order.
pub fn installed_apps() -> &'static [AppDescriptor] {
    &INSTALLED_APPS
}

pub fn pinned_apps() -> impl Iterator<Item = &'static AppDescriptor> {
    INSTALLED_APPS.iter().filter(|app| app.pinned)
}

pub fn app_descriptor(app_type: &AppType) -> Option<&'static AppDescriptor> {
    INSTALLED_APPS.iter().find(|app| &app.app_type == app_type)
}

/// Case-insensitive name filter used by the start-menu search box.
pub fn search_apps(query: &str) -> Vec<&'static AppDescriptor> {
    let needle = query.trim().to_lowercase();
    INSTALLED_APPS
        .iter()
        .filter(|app| app.name.to_lowercase().contains(&needle))
        .collect()
}

/// Fresh window for an installed app, as launched from the start menu or an empty pinned
/// taskbar button. Each launch gets its own `{app_type}-{timestamp}` id.
pub fn open_app_request(
    app: &AppDescriptor,
    viewport: Viewport,
    config: &WindowManagerConfig,
    timestamp_ms: u64,
) -> OpenWindowRequest {
    let (position, size) = default_geometry(&app.app_type, viewport, config);
    OpenWindowRequest::new(
        format!("{}-{timestamp_ms}", app.app_type.slug()),
        app.app_type.clone(),
        app.name,
    )
    .with_icon(app.icon)
    .with_geometry(position, size)
}

fn preferred_size(app_type: &AppType) -> Size {
    match app_type {
        AppType::FileExplorer => Size::new(900.0, 600.0),
        AppType::ProjectViewer | AppType::PdfViewer => Size::new(850.0, 650.0),
        AppType::Notepad => Size::new(700.0, 500.0),
        _ => Size::new(800.0, 600.0),
    }
}

/// Default position and size for a newly opened window.
///
/// Shared by every launch path so a window opens the same way from the desktop, the start menu,
/// or a file browser. Compact viewports get a near-full-width window.
pub fn default_geometry(
    app_type: &AppType,
    viewport: Viewport,
    config: &WindowManagerConfig,
) -> (Point, Size) {
    let preferred = preferred_size(app_type);
    let min = config.min_size_for(viewport);
    let usable_height = (viewport.height - config.taskbar_height).max(0.0);

    if config.is_compact(viewport) {
        let size = Size::new(
            viewport.width - 2.0 * COMPACT_MARGIN,
            preferred.height.min(usable_height - 2.0 * COMPACT_MARGIN),
        )
        .at_least(min);
        let position = Point::new(
            ((viewport.width - size.width) / 2.0).max(0.0),
            ((usable_height - size.height) / 2.0).max(0.0),
        );
        return (position, size);
    }

    let size = Size::new(
        preferred.width.min(viewport.width - 2.0 * DESKTOP_MARGIN),
        preferred.height.min(usable_height - 2.0 * DESKTOP_MARGIN),
    )
    .at_least(min);
    let position = Point::new(
        ((viewport.width - size.width) / 2.0).max(0.0),
        ((usable_height - size.height) / 2.0).max(0.0),
    );
    (position, size)
}

/// Document flavour, which decides the viewer a document opens in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Text,
    Markdown,
    Json,
    Pdf,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EntryKind {
    Folder,
    Executable,
    Shortcut { target: String },
    Document { format: DocumentFormat },
}

/// One node of the content tree shown on the desktop and in file browsers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntry {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: EntryKind,
    pub path: String,
    #[serde(default)]
    pub icon: Option<String>,
    /// Decorative entries ignore double-click.
    #[serde(default = "default_interactive")]
    pub interactive: bool,
    #[serde(default)]
    pub metadata: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContentEntry>,
}

fn default_interactive() -> bool {
    true
}

impl ContentEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: EntryKind, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            path: path.into(),
            icon: None,
            interactive: true,
            metadata: Value::Null,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<ContentEntry>) -> Self {
        self.children = children;
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn decorative(mut self) -> Self {
        self.interactive = false;
        self
    }

    /// Depth-first search of this entry and its descendants.
    pub fn find(&self, id: &str) -> Option<&ContentEntry> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    fn as_payload(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|err| {
            warn!(entry = %self.id, "content payload serialize failed: {err}");
            Value::Null
        })
    }
}

/// Root of the content tree; top-level entries are the desktop icons.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentLibrary {
    pub entries: Vec<ContentEntry>,
}

impl ContentLibrary {
    pub fn new(entries: Vec<ContentEntry>) -> Self {
        Self { entries }
    }

    pub fn find(&self, id: &str) -> Option<&ContentEntry> {
        self.entries.iter().find_map(|entry| entry.find(id))
    }

    /// Entry whose `path` equals `path`.
    pub fn find_by_path(&self, path: &str) -> Option<&ContentEntry> {
        fn walk<'a>(entry: &'a ContentEntry, path: &str) -> Option<&'a ContentEntry> {
            if entry.path == path {
                return Some(entry);
            }
            entry.children.iter().find_map(|child| walk(child, path))
        }
        self.entries.iter().find_map(|entry| walk(entry, path))
    }
}

/// Result of double-clicking a content entry.
#[derive(Debug, Clone, PartialEq)]
pub enum LaunchOutcome {
    Open(OpenWindowRequest),
    /// Hand the URL to the host's external-open facility.
    External(String),
    Ignored,
}

/// Translates a double-click on `entry` into a launch.
pub fn launch_entry(
    entry: &ContentEntry,
    viewport: Viewport,
    config: &WindowManagerConfig,
) -> LaunchOutcome {
    if !entry.interactive {
        return LaunchOutcome::Ignored;
    }

    let request = match &entry.kind {
        EntryKind::Folder => folder_request(&entry.id, &entry.name, &entry.path),
        EntryKind::Executable => OpenWindowRequest::new(
            format!("project-{}", entry.id),
            AppType::ProjectViewer,
            entry.name.trim_end_matches(".exe"),
        )
        .with_icon("💼")
        .with_content(entry.as_payload()),
        EntryKind::Shortcut { target } => {
            if is_external_target(target) {
                return LaunchOutcome::External(target.clone());
            }
            folder_request(&entry.id, target, target)
        }
        EntryKind::Document { format } => document_request(entry, *format),
    };

    let (position, size) = default_geometry(&request.app_type, viewport, config);
    LaunchOutcome::Open(request.with_geometry(position, size))
}

fn folder_request(id: &str, title: &str, path: &str) -> OpenWindowRequest {
    OpenWindowRequest::new(format!("file-explorer-{id}"), AppType::FileExplorer, title)
        .with_icon("📁")
        .with_path(path)
}

fn document_request(entry: &ContentEntry, format: DocumentFormat) -> OpenWindowRequest {
    let (app_type, id, title, icon) = match format {
        DocumentFormat::Text | DocumentFormat::Markdown | DocumentFormat::Json => (
            AppType::Notepad,
            format!("notepad-{}", entry.id),
            format!("{} - Notepad", entry.name),
            "📝",
        ),
        DocumentFormat::Pdf => (
            AppType::PdfViewer,
            format!("pdf-{}", entry.id),
            entry.name.clone(),
            "📄",
        ),
        DocumentFormat::Image => (
            AppType::ImageViewer,
            format!("image-{}", entry.id),
            entry.name.clone(),
            "🖼️",
        ),
    };
    OpenWindowRequest::new(id, app_type, title)
        .with_icon(icon)
        .with_content(entry.as_payload())
        .with_path(entry.path.clone())
}

/// Targets that leave the shell instead of opening a window.
pub fn is_external_target(target: &str) -> bool {
    target.starts_with("http") || target.starts_with("mailto:")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const DESKTOP: Viewport = Viewport::new(1280.0, 800.0);

    fn open(outcome: LaunchOutcome) -> OpenWindowRequest {
        match outcome {
            LaunchOutcome::Open(request) => request,
            other => panic!("expected window launch, got {other:?}"),
        }
    }

    #[test]
    fn folder_opens_scoped_file_explorer() {
        let entry = ContentEntry::new("desktop-projects", "Projects", EntryKind::Folder, "/Desktop/Projects");
        let request = open(launch_entry(&entry, DESKTOP, &WindowManagerConfig::default()));

        assert_eq!(request.id.as_str(), "file-explorer-desktop-projects");
        assert_eq!(request.app_type, AppType::FileExplorer);
        assert_eq!(request.path.as_deref(), Some("/Desktop/Projects"));
        assert_eq!(request.size, Size::new(900.0, 600.0));
        assert_eq!(request.position, Point::new(190.0, 76.0));
    }

    #[test]
    fn executable_opens_project_viewer_with_payload() {
        let entry = ContentEntry::new("on-track", "OnTrack.exe", EntryKind::Executable, "/Desktop/Projects/OnTrack.exe");
        let request = open(launch_entry(&entry, DESKTOP, &WindowManagerConfig::default()));

        assert_eq!(request.id.as_str(), "project-on-track");
        assert_eq!(request.title, "OnTrack");
        assert_eq!(request.app_type, AppType::ProjectViewer);
        assert_eq!(request.content["id"], "on-track");
    }

    #[test]
    fn external_shortcuts_delegate_to_host() {
        let config = WindowManagerConfig::default();
        for target in ["https://github.com/example", "mailto:someone@example.com"] {
            let entry = ContentEntry::new(
                "link",
                "Link",
                EntryKind::Shortcut {
                    target: target.to_string(),
                },
                "/Desktop/Link",
            );
            assert_eq!(
                launch_entry(&entry, DESKTOP, &config),
                LaunchOutcome::External(target.to_string())
            );
        }
    }

    #[test]
    fn internal_shortcut_opens_explorer_at_target() {
        let entry = ContentEntry::new(
            "this-pc",
            "This PC",
            EntryKind::Shortcut {
                target: "/".to_string(),
            },
            "/Desktop/This PC",
        );
        let request = open(launch_entry(&entry, DESKTOP, &WindowManagerConfig::default()));

        assert_eq!(request.id.as_str(), "file-explorer-this-pc");
        assert_eq!(request.path.as_deref(), Some("/"));
        assert_eq!(request.title, "/");
    }

    #[test]
    fn decorative_entries_are_ignored() {
        let entry = ContentEntry::new("game", "Game", EntryKind::Executable, "/Desktop/Game").decorative();
        assert_eq!(
            launch_entry(&entry, DESKTOP, &WindowManagerConfig::default()),
            LaunchOutcome::Ignored
        );
    }

    #[test]
    fn text_documents_open_in_notepad() {
        let entry = ContentEntry::new(
            "interests-txt",
            "Interests.txt",
            EntryKind::Document {
                format: DocumentFormat::Text,
            },
            "/Desktop/About Me/Interests.txt",
        );
        let request = open(launch_entry(&entry, DESKTOP, &WindowManagerConfig::default()));

        assert_eq!(request.id.as_str(), "notepad-interests-txt");
        assert_eq!(request.title, "Interests.txt - Notepad");
        assert_eq!(request.size, Size::new(700.0, 500.0));
    }

    #[test]
    fn compact_viewport_uses_near_full_width() {
        let config = WindowManagerConfig::default();
        let (position, size) =
            default_geometry(&AppType::FileExplorer, Viewport::new(390.0, 844.0), &config);

        assert_eq!(size, Size::new(374.0, 600.0));
        assert_eq!(position, Point::new(8.0, 98.0));
    }

    #[test]
    fn tiny_viewport_never_goes_below_minimum() {
        let config = WindowManagerConfig::default();
        let (position, size) =
            default_geometry(&AppType::Notepad, Viewport::new(200.0, 180.0), &config);

        assert_eq!(size, config.compact_min_size);
        assert_eq!(position, Point::ORIGIN);
    }

    #[test]
    fn start_menu_launch_uses_timestamp_id() {
        let app = app_descriptor(&AppType::Calculator).expect("calculator installed");
        let request = open_app_request(app, DESKTOP, &WindowManagerConfig::default(), 1_700_000);

        assert_eq!(request.id.as_str(), "calculator-1700000");
        assert_eq!(request.title, "Calculator");
        assert_eq!(request.icon, "🔢");
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let names: Vec<&str> = search_apps("NOTE").iter().map(|app| app.name).collect();
        assert_eq!(names, vec!["Notepad"]);
        assert_eq!(search_apps("").len(), installed_apps().len());
    }

    #[test]
    fn settings_is_installed_but_not_pinned() {
        assert!(app_descriptor(&AppType::Settings).is_some());
        assert!(pinned_apps().all(|app| app.app_type != AppType::Settings));
    }

    #[test]
    fn library_lookup_descends_into_children() {
        let library = ContentLibrary::new(vec![ContentEntry::new(
            "desktop-aboutme",
            "About Me",
            EntryKind::Folder,
            "/Desktop/About Me",
        )
        .with_children(vec![ContentEntry::new(
            "resume-pdf",
            "Resume.pdf",
            EntryKind::Document {
                format: DocumentFormat::Pdf,
            },
            "/Desktop/About Me/Resume.pdf",
        )])]);

        assert_eq!(library.find("resume-pdf").map(|e| e.name.as_str()), Some("Resume.pdf"));
        assert_eq!(
            library.find_by_path("/Desktop/About Me").map(|e| e.id.as_str()),
            Some("desktop-aboutme")
        );
        assert!(library.find("missing").is_none());
    }
}
