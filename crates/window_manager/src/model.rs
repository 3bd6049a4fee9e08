use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Caller-supplied window identity, stable for the window's lifetime.
///
/// Launch paths use `{app_type}-{content_id}` or `{app_type}-{timestamp}`, but the store only
/// relies on uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Tag selecting the content renderer for a window.
///
/// The set is open: renderers unknown to the shell travel as [`AppType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppType {
    FileExplorer,
    Notepad,
    Calculator,
    Browser,
    Settings,
    About,
    ProjectViewer,
    PdfViewer,
    ImageViewer,
    Other(String),
}

impl AppType {
    /// Stable slug used in window ids and DOM attributes.
    pub fn slug(&self) -> &str {
        match self {
            Self::FileExplorer => "file-explorer",
            Self::Notepad => "notepad",
            Self::Calculator => "calculator",
            Self::Browser => "browser",
            Self::Settings => "settings",
            Self::About => "about",
            Self::ProjectViewer => "project-viewer",
            Self::PdfViewer => "pdf-viewer",
            Self::ImageViewer => "image-viewer",
            Self::Other(slug) => slug,
        }
    }
}

impl fmt::Display for AppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset_from(self, origin: Point) -> Point {
        Point {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Componentwise maximum against `min`.
    pub fn at_least(self, min: Size) -> Size {
        Size {
            width: self.width.max(min.width),
            height: self.height.max(min.height),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x < self.origin.x + self.size.width
            && point.y < self.origin.y + self.size.height
    }
}

/// Browser viewport dimensions in CSS pixels, taskbar included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Narrow or portrait viewports use the compact window defaults.
    pub fn is_compact(&self, breakpoint: f64) -> bool {
        self.width < breakpoint || self.height > self.width
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// One open application window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_type: AppType,
    pub title: String,
    pub icon: String,
    /// Top-left in viewport pixels; ignored for layout while maximized.
    pub position: Point,
    /// Ignored for layout while maximized.
    pub size: Size,
    pub is_maximized: bool,
    pub is_minimized: bool,
    pub z_index: u64,
    /// Opaque payload forwarded to the content renderer.
    #[serde(default)]
    pub content: Value,
    #[serde(default)]
    pub path: Option<String>,
}

impl WindowRecord {
    /// Geometry the window actually occupies.
    ///
    /// A maximized window fills the viewport above the taskbar; the stored position and size
    /// are kept untouched so restoring returns to them.
    pub fn effective_rect(&self, viewport: Viewport, taskbar_height: f64) -> Rect {
        if self.is_maximized {
            crate::geometry::maximized_rect(viewport, taskbar_height)
        } else {
            Rect::new(self.position, self.size)
        }
    }
}

/// Everything needed to open a window; the store assigns the z-index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenWindowRequest {
    pub id: WindowId,
    pub app_type: AppType,
    pub title: String,
    pub icon: String,
    pub position: Point,
    pub size: Size,
    #[serde(default)]
    pub is_maximized: bool,
    #[serde(default)]
    pub is_minimized: bool,
    #[serde(default)]
    pub content: Value,
    #[serde(default)]
    pub path: Option<String>,
}

impl OpenWindowRequest {
    pub fn new(id: impl Into<String>, app_type: AppType, title: impl Into<String>) -> Self {
        Self {
            id: WindowId::new(id),
            app_type,
            title: title.into(),
            icon: String::new(),
            position: Point::new(100.0, 50.0),
            size: Size::new(800.0, 600.0),
            is_maximized: false,
            is_minimized: false,
            content: Value::Null,
            path: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_geometry(mut self, position: Point, size: Size) -> Self {
        self.position = position;
        self.size = size;
        self
    }

    pub fn with_content(mut self, content: Value) -> Self {
        self.content = content;
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub(crate) fn into_record(self, z_index: u64) -> WindowRecord {
        WindowRecord {
            id: self.id,
            app_type: self.app_type,
            title: self.title,
            icon: self.icon,
            position: self.position,
            size: self.size,
            is_maximized: self.is_maximized,
            is_minimized: self.is_minimized,
            z_index,
            content: self.content,
            path: self.path,
        }
    }
}

/// Authoritative window-manager state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowStoreState {
    /// Windows in creation order.
    pub windows: Vec<WindowRecord>,
    pub active_window_id: Option<WindowId>,
    pub next_z_index: u64,
}

impl Default for WindowStoreState {
    fn default() -> Self {
        Self {
            windows: Vec::new(),
            active_window_id: None,
            next_z_index: 1,
        }
    }
}

impl WindowStoreState {
    pub fn window(&self, id: &WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| &w.id == id)
    }

    pub(crate) fn window_mut(&mut self, id: &WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| &w.id == id)
    }

    pub fn active_window(&self) -> Option<&WindowRecord> {
        self.active_window_id
            .as_ref()
            .and_then(|id| self.window(id))
    }

    pub fn is_active(&self, id: &WindowId) -> bool {
        self.active_window_id.as_ref() == Some(id)
    }

    /// Visible windows ordered bottom to top.
    pub fn stacking_order(&self) -> Vec<&WindowRecord> {
        let mut visible: Vec<&WindowRecord> =
            self.windows.iter().filter(|w| !w.is_minimized).collect();
        visible.sort_by_key(|w| w.z_index);
        visible
    }

    /// Topmost visible window under `point`.
    pub fn topmost_at(
        &self,
        point: Point,
        viewport: Viewport,
        taskbar_height: f64,
    ) -> Option<&WindowRecord> {
        self.stacking_order()
            .into_iter()
            .rev()
            .find(|w| w.effective_rect(viewport, taskbar_height).contains(point))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(id: &str, z_index: u64, minimized: bool) -> WindowRecord {
        let mut record = OpenWindowRequest::new(id, AppType::Notepad, id)
            .with_geometry(Point::new(0.0, 0.0), Size::new(400.0, 300.0))
            .into_record(z_index);
        record.is_minimized = minimized;
        record
    }

    #[test]
    fn stacking_order_skips_minimized_and_sorts_by_z() {
        let state = WindowStoreState {
            windows: vec![record("a", 5, false), record("b", 2, false), record("c", 9, true)],
            active_window_id: None,
            next_z_index: 10,
        };

        let ids: Vec<&str> = state.stacking_order().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn topmost_at_prefers_highest_visible_window() {
        let state = WindowStoreState {
            windows: vec![record("a", 5, false), record("b", 7, false), record("c", 9, true)],
            active_window_id: None,
            next_z_index: 10,
        };
        let viewport = Viewport::new(1280.0, 800.0);

        let hit = state.topmost_at(Point::new(10.0, 10.0), viewport, 48.0);
        assert_eq!(hit.map(|w| w.id.as_str()), Some("b"));
        assert!(state
            .topmost_at(Point::new(900.0, 10.0), viewport, 48.0)
            .is_none());
    }

    #[test]
    fn maximized_effective_rect_fills_viewport_above_taskbar() {
        let mut win = record("a", 1, false);
        win.is_maximized = true;

        let rect = win.effective_rect(Viewport::new(1000.0, 700.0), 48.0);
        assert_eq!(rect, Rect::new(Point::ORIGIN, Size::new(1000.0, 652.0)));
        assert_eq!(win.size, Size::new(400.0, 300.0));
    }

    #[test]
    fn app_type_serializes_as_kebab_slug() {
        let json = serde_json::to_string(&AppType::ProjectViewer).expect("serialize");
        assert_eq!(json, "\"project-viewer\"");
        assert_eq!(AppType::Other("paint".into()).slug(), "paint");
    }

    #[test]
    fn compact_viewport_covers_narrow_and_portrait() {
        assert!(Viewport::new(600.0, 400.0).is_compact(768.0));
        assert!(Viewport::new(900.0, 1200.0).is_compact(768.0));
        assert!(!Viewport::new(1280.0, 800.0).is_compact(768.0));
    }
}
