//! `?project=` / `?folder=` query parameters.
//!
//! On startup the query is parsed and resolved into a window to open. Afterwards the query
//! follows the active window; [`sync_query`] computes the replacement and the host writes it
//! without adding a history entry.

use tracing::debug;

use crate::config::WindowManagerConfig;
use crate::error::DeepLinkError;
use crate::launcher::{launch_entry, ContentEntry, ContentLibrary, EntryKind, LaunchOutcome};
use crate::model::{AppType, OpenWindowRequest, Viewport, WindowStoreState};

const FOLDER_WINDOW_PREFIX: &str = "file-explorer-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeepLink {
    Project(String),
    Folder(String),
}

impl DeepLink {
    pub fn id(&self) -> &str {
        match self {
            Self::Project(id) | Self::Folder(id) => id,
        }
    }

    /// Query string including the leading `?`.
    pub fn to_query(&self) -> String {
        match self {
            Self::Project(id) => format!("?project={}", encode_component(id)),
            Self::Folder(id) => format!("?folder={}", encode_component(id)),
        }
    }
}

/// Lookup of content entries by id.
pub trait ContentIndex {
    fn entry(&self, id: &str) -> Option<&ContentEntry>;
}

impl ContentIndex for ContentLibrary {
    fn entry(&self, id: &str) -> Option<&ContentEntry> {
        self.find(id)
    }
}

/// Reads the deep link from a query string (with or without the leading `?`).
/// `project` wins when both parameters are present; empty values are ignored.
pub fn parse_query(query: &str) -> Option<DeepLink> {
    let mut project = None;
    let mut folder = None;
    for pair in query.trim_start_matches('?').split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = decode_component(value);
        if value.is_empty() {
            continue;
        }
        match decode_component(key).as_str() {
            "project" if project.is_none() => project = Some(value),
            "folder" if folder.is_none() => folder = Some(value),
            _ => {}
        }
    }
    project.map(DeepLink::Project).or(folder.map(DeepLink::Folder))
}

/// Window to open for `link`, or why it cannot be opened.
pub fn resolve(
    link: &DeepLink,
    index: &impl ContentIndex,
    viewport: Viewport,
    config: &WindowManagerConfig,
) -> Result<OpenWindowRequest, DeepLinkError> {
    let entry = index
        .entry(link.id())
        .ok_or_else(|| DeepLinkError::UnknownEntry(link.id().to_string()))?;

    let expected = match link {
        DeepLink::Project(_) => "project",
        DeepLink::Folder(_) => "folder",
    };
    let kind_matches = matches!(
        (link, &entry.kind),
        (DeepLink::Project(_), EntryKind::Executable) | (DeepLink::Folder(_), EntryKind::Folder)
    );
    if !kind_matches {
        return Err(DeepLinkError::KindMismatch {
            id: entry.id.clone(),
            expected,
        });
    }

    // Deep links bypass the decorative flag; only the kind matters here.
    let entry = ContentEntry {
        interactive: true,
        ..entry.clone()
    };
    match launch_entry(&entry, viewport, config) {
        LaunchOutcome::Open(request) => Ok(request),
        LaunchOutcome::External(_) | LaunchOutcome::Ignored => Err(DeepLinkError::KindMismatch {
            id: entry.id,
            expected,
        }),
    }
}

/// Deep link describing the active window, if it has one.
pub fn desired_link(state: &WindowStoreState, config: &WindowManagerConfig) -> Option<DeepLink> {
    let active = state.active_window()?;
    match active.app_type {
        AppType::ProjectViewer => active
            .content
            .get("id")
            .and_then(|id| id.as_str())
            .map(|id| DeepLink::Project(id.to_string())),
        AppType::FileExplorer => active
            .id
            .as_str()
            .strip_prefix(FOLDER_WINDOW_PREFIX)
            .filter(|folder| config.main_folders.iter().any(|main| main == folder))
            .map(|folder| DeepLink::Folder(folder.to_string())),
        _ => None,
    }
}

/// Replacement query for the current URL, or `None` when it is already in sync.
///
/// An empty string means both parameters should be cleared.
pub fn sync_query(
    current_query: &str,
    state: &WindowStoreState,
    config: &WindowManagerConfig,
) -> Option<String> {
    let current = parse_query(current_query);
    let desired = desired_link(state, config);
    if current == desired {
        return None;
    }
    debug!(?current, ?desired, "deep link out of sync");
    Some(desired.map(|link| link.to_query()).unwrap_or_default())
}

fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => match raw.get(i + 1..i + 3).and_then(|hex| u8::from_str_radix(hex, 16).ok()) {
                Some(decoded) => {
                    out.push(decoded);
                    i += 2;
                }
                None => out.push(b'%'),
            },
            other => out.push(other),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::launcher::DocumentFormat;
    use crate::model::WindowId;
    use crate::store::WindowStore;

    const DESKTOP: Viewport = Viewport::new(1280.0, 800.0);

    fn library() -> ContentLibrary {
        ContentLibrary::new(vec![
            ContentEntry::new("desktop-projects", "Projects", EntryKind::Folder, "/Projects")
                .with_children(vec![ContentEntry::new(
                    "on-track",
                    "OnTrack.exe",
                    EntryKind::Executable,
                    "/Projects/OnTrack.exe",
                )]),
            ContentEntry::new("desktop-archive", "Archive", EntryKind::Folder, "/Archive"),
            ContentEntry::new(
                "resume",
                "resume.pdf",
                EntryKind::Document {
                    format: DocumentFormat::Pdf,
                },
                "/resume.pdf",
            ),
        ])
    }

    #[test]
    fn project_takes_precedence_over_folder() {
        assert_eq!(
            parse_query("?folder=desktop-projects&project=on-track"),
            Some(DeepLink::Project("on-track".to_string()))
        );
        assert_eq!(
            parse_query("folder=desktop-projects"),
            Some(DeepLink::Folder("desktop-projects".to_string()))
        );
        assert_eq!(parse_query("?project=&theme=dark"), None);
        assert_eq!(parse_query(""), None);
    }

    #[test]
    fn query_values_are_percent_decoded() {
        assert_eq!(
            parse_query("?project=my%20app+x"),
            Some(DeepLink::Project("my app x".to_string()))
        );
        assert_eq!(DeepLink::Project("my app".into()).to_query(), "?project=my%20app");
    }

    #[test]
    fn project_link_opens_project_window() {
        let link = DeepLink::Project("on-track".to_string());
        let request =
            resolve(&link, &library(), DESKTOP, &WindowManagerConfig::default()).expect("resolves");
        assert_eq!(request.id, WindowId::from("project-on-track"));
        assert_eq!(request.title, "OnTrack");
        assert_eq!(request.app_type, AppType::ProjectViewer);
        assert_eq!(request.content["id"], json!("on-track"));
    }

    #[test]
    fn folder_link_opens_file_explorer() {
        let link = DeepLink::Folder("desktop-projects".to_string());
        let request =
            resolve(&link, &library(), DESKTOP, &WindowManagerConfig::default()).expect("resolves");
        assert_eq!(request.id, WindowId::from("file-explorer-desktop-projects"));
        assert_eq!(request.path.as_deref(), Some("/Projects"));
    }

    #[test]
    fn unknown_or_mismatched_links_are_rejected() {
        let config = WindowManagerConfig::default();
        assert_eq!(
            resolve(&DeepLink::Project("nope".into()), &library(), DESKTOP, &config),
            Err(DeepLinkError::UnknownEntry("nope".to_string()))
        );
        assert_eq!(
            resolve(&DeepLink::Project("resume".into()), &library(), DESKTOP, &config),
            Err(DeepLinkError::KindMismatch {
                id: "resume".to_string(),
                expected: "project",
            })
        );
        assert!(matches!(
            resolve(&DeepLink::Folder("on-track".into()), &library(), DESKTOP, &config),
            Err(DeepLinkError::KindMismatch { .. })
        ));
    }

    fn open_link(store: &mut WindowStore, link: DeepLink) {
        let request = resolve(&link, &library(), DESKTOP, &WindowManagerConfig::default())
            .expect("resolves");
        store.open(request);
    }

    #[test]
    fn sync_follows_active_window() {
        let config = WindowManagerConfig::default();
        let mut store = WindowStore::new(config.min_size);

        open_link(&mut store, DeepLink::Project("on-track".into()));
        assert_eq!(
            sync_query("", store.state(), &config),
            Some("?project=on-track".to_string())
        );
        assert_eq!(sync_query("?project=on-track", store.state(), &config), None);

        open_link(&mut store, DeepLink::Folder("desktop-projects".into()));
        assert_eq!(
            sync_query("?project=on-track", store.state(), &config),
            Some("?folder=desktop-projects".to_string())
        );
    }

    #[test]
    fn sync_clears_for_other_windows() {
        let config = WindowManagerConfig::default();
        let mut store = WindowStore::new(config.min_size);

        open_link(&mut store, DeepLink::Folder("desktop-archive".into()));
        assert_eq!(
            sync_query("?folder=desktop-projects", store.state(), &config),
            Some(String::new())
        );

        store.open(OpenWindowRequest::new("calculator-1", AppType::Calculator, "Calculator"));
        assert_eq!(sync_query("?project=x", store.state(), &config), Some(String::new()));
        assert_eq!(sync_query("", store.state(), &config), None);

        store.close(&WindowId::from("calculator-1"));
        assert_eq!(store.active_window_id(), None);
        assert_eq!(sync_query("", store.state(), &config), None);
    }
}
