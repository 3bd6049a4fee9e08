//! Taskbar projection and click routing.
//!
//! Button state is a pure function of the window collection, recomputed on every render; nothing
//! here is stored alongside the windows. Clicks are translated into [`WindowCommand`]s with the
//! tri-state toggle rules of a Windows-style taskbar.

use std::time::Duration;

use tracing::debug;

use crate::config::WindowManagerConfig;
use crate::launcher::{app_descriptor, open_app_request, pinned_apps, AppDescriptor};
use crate::model::{AppType, Viewport, WindowId, WindowRecord, WindowStoreState};
use crate::store::WindowCommand;

const PREVIEW_THUMB_WIDTH: f64 = 180.0;
const PREVIEW_GAP: f64 = 8.0;
const PREVIEW_MAX_WIDTH: f64 = 600.0;
const PREVIEW_EDGE_MARGIN: f64 = 8.0;

/// Aggregate display state for one app type.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskbarGroup {
    pub app_type: AppType,
    pub name: String,
    pub icon: String,
    pub pinned: bool,
    /// Member windows in creation order.
    pub window_ids: Vec<WindowId>,
    /// Some member is the active window and not minimized.
    pub is_any_active: bool,
    pub is_running: bool,
    pub has_minimized: bool,
}

impl TaskbarGroup {
    fn from_windows(
        app_type: AppType,
        name: String,
        icon: String,
        pinned: bool,
        state: &WindowStoreState,
    ) -> Self {
        let members: Vec<&WindowRecord> = state
            .windows
            .iter()
            .filter(|w| w.app_type == app_type)
            .collect();
        Self {
            is_any_active: members
                .iter()
                .any(|w| state.is_active(&w.id) && !w.is_minimized),
            is_running: !members.is_empty(),
            has_minimized: members.iter().any(|w| w.is_minimized),
            window_ids: members.iter().map(|w| w.id.clone()).collect(),
            app_type,
            name,
            icon,
            pinned,
        }
    }

    /// Groups with more than one window show the secondary indicator and a hover preview.
    pub fn has_multiple(&self) -> bool {
        self.window_ids.len() > 1
    }

    /// Every member is minimized.
    pub fn all_minimized(&self, state: &WindowStoreState) -> bool {
        self.is_running
            && self
                .window_ids
                .iter()
                .filter_map(|id| state.window(id))
                .all(|w| w.is_minimized)
    }

    pub fn label(&self, state: &WindowStoreState) -> String {
        if self.all_minimized(state) {
            format!("{} (Minimized)", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Single window of an app that has no pinned button.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskbarWindowButton {
    pub window_id: WindowId,
    pub title: String,
    pub icon: String,
    pub is_active: bool,
    pub is_minimized: bool,
}

impl TaskbarWindowButton {
    pub fn label(&self) -> String {
        if self.is_minimized {
            format!("{} (Minimized)", self.title)
        } else {
            self.title.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskbarButton {
    Pinned(TaskbarGroup),
    Window(TaskbarWindowButton),
}

/// Groups every app type present in `state` plus every pinned app, pinned apps first in catalog
/// order, then unpinned app types in order of first appearance.
pub fn group_windows(state: &WindowStoreState) -> Vec<TaskbarGroup> {
    let mut groups: Vec<TaskbarGroup> = pinned_apps()
        .map(|app| group_for_app(app, state))
        .collect();

    for window in &state.windows {
        if groups.iter().any(|g| g.app_type == window.app_type) {
            continue;
        }
        let (name, icon) = match app_descriptor(&window.app_type) {
            Some(app) => (app.name.to_string(), app.icon.to_string()),
            None => (window.title.clone(), window.icon.clone()),
        };
        groups.push(TaskbarGroup::from_windows(
            window.app_type.clone(),
            name,
            icon,
            false,
            state,
        ));
    }
    groups
}

fn group_for_app(app: &AppDescriptor, state: &WindowStoreState) -> TaskbarGroup {
    TaskbarGroup::from_windows(
        app.app_type.clone(),
        app.name.to_string(),
        app.icon.to_string(),
        app.pinned,
        state,
    )
}

/// Taskbar buttons left to right: one per pinned app, then one per window of unpinned apps.
pub fn taskbar_buttons(state: &WindowStoreState) -> Vec<TaskbarButton> {
    let mut buttons: Vec<TaskbarButton> = pinned_apps()
        .map(|app| TaskbarButton::Pinned(group_for_app(app, state)))
        .collect();
    buttons.extend(
        state
            .windows
            .iter()
            .filter(|w| !pinned_apps().any(|app| app.app_type == w.app_type))
            .map(|w| {
                TaskbarButton::Window(TaskbarWindowButton {
                    window_id: w.id.clone(),
                    title: w.title.clone(),
                    icon: w.icon.clone(),
                    is_active: state.is_active(&w.id) && !w.is_minimized,
                    is_minimized: w.is_minimized,
                })
            }),
    );
    buttons
}

/// Single-window toggle: restore a minimized window, minimize the active one, otherwise raise.
pub fn activate_window(state: &WindowStoreState, id: &WindowId) -> Vec<WindowCommand> {
    let Some(window) = state.window(id) else {
        return Vec::new();
    };
    if window.is_minimized {
        vec![
            WindowCommand::ToggleMinimize(id.clone()),
            WindowCommand::Focus(id.clone()),
        ]
    } else if state.is_active(id) {
        vec![WindowCommand::ToggleMinimize(id.clone())]
    } else {
        vec![WindowCommand::Focus(id.clone())]
    }
}

/// Click on a group's taskbar button.
///
/// An empty pinned group launches the app; a single window uses [`activate_window`]; several
/// windows minimize the active member, else raise the first visible member, else restore the
/// first member.
pub fn activate_group(
    state: &WindowStoreState,
    app_type: &AppType,
    viewport: Viewport,
    config: &WindowManagerConfig,
    timestamp_ms: u64,
) -> Vec<WindowCommand> {
    let members: Vec<&WindowRecord> = state
        .windows
        .iter()
        .filter(|w| &w.app_type == app_type)
        .collect();

    match members.as_slice() {
        [] => match app_descriptor(app_type).filter(|app| app.pinned) {
            Some(app) => vec![WindowCommand::Open(open_app_request(
                app,
                viewport,
                config,
                timestamp_ms,
            ))],
            None => {
                debug!(%app_type, "taskbar click on empty unpinned group");
                Vec::new()
            }
        },
        [only] => activate_window(state, &only.id),
        [first, ..] => {
            if let Some(active) = members
                .iter()
                .find(|w| state.is_active(&w.id) && !w.is_minimized)
            {
                return vec![WindowCommand::ToggleMinimize(active.id.clone())];
            }
            if let Some(visible) = members.iter().find(|w| !w.is_minimized) {
                return vec![WindowCommand::Focus(visible.id.clone())];
            }
            vec![
                WindowCommand::ToggleMinimize(first.id.clone()),
                WindowCommand::Focus(first.id.clone()),
            ]
        }
    }
}

/// Click on a preview thumbnail: restore if needed, then raise.
pub fn preview_select(state: &WindowStoreState, id: &WindowId) -> Vec<WindowCommand> {
    match state.window(id) {
        Some(window) if window.is_minimized => vec![
            WindowCommand::ToggleMinimize(id.clone()),
            WindowCommand::Focus(id.clone()),
        ],
        Some(_) => vec![WindowCommand::Focus(id.clone())],
        None => Vec::new(),
    }
}

/// Close button on a preview thumbnail.
pub fn preview_close(id: &WindowId) -> Vec<WindowCommand> {
    vec![WindowCommand::Close(id.clone())]
}

/// Horizontal placement of the preview strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewLayout {
    pub left: f64,
    pub width: f64,
}

/// Centres a strip of `count` thumbnails over `anchor_x`, kept inside the viewport.
pub fn preview_layout(count: usize, anchor_x: f64, viewport_width: f64) -> PreviewLayout {
    let n = count.max(1) as f64;
    let width = (n * PREVIEW_THUMB_WIDTH + (n - 1.0) * PREVIEW_GAP).min(PREVIEW_MAX_WIDTH);
    let max_left = viewport_width - width - PREVIEW_EDGE_MARGIN;
    let left = (anchor_x - width / 2.0)
        .min(max_left)
        .max(PREVIEW_EDGE_MARGIN);
    PreviewLayout { left, width }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewTimerKind {
    Show,
    Hide,
}

/// Delayed action the host must schedule and later report back through
/// [`PreviewController::fire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRequest {
    pub kind: PreviewTimerKind,
    pub token: u64,
    pub delay: Duration,
}

/// Hover-preview visibility with cancellable show and hide delays.
///
/// Scheduling one action cancels the pending opposite one. Cancellation is by token: a timer
/// that fires with a superseded token is ignored, so hosts need not clear their timeouts.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewController {
    show_delay: Duration,
    hide_delay: Duration,
    hover_enabled: bool,
    visible: Option<AppType>,
    pending_show: Option<(u64, AppType)>,
    pending_hide: Option<u64>,
    next_token: u64,
}

impl PreviewController {
    pub fn new(config: &WindowManagerConfig) -> Self {
        Self {
            show_delay: config.preview_show_delay(),
            hide_delay: config.preview_hide_delay(),
            hover_enabled: true,
            visible: None,
            pending_show: None,
            pending_hide: None,
            next_token: 1,
        }
    }

    /// Hover previews are a desktop affordance; disabling hides any open preview.
    pub fn set_hover_enabled(&mut self, enabled: bool) {
        self.hover_enabled = enabled;
        if !enabled {
            self.dismiss();
        }
    }

    pub fn visible_group(&self) -> Option<&AppType> {
        self.visible.as_ref()
    }

    pub fn is_visible_for(&self, app_type: &AppType) -> bool {
        self.visible.as_ref() == Some(app_type)
    }

    /// Pointer entered a taskbar button.
    pub fn enter_button(&mut self, group: &TaskbarGroup) -> Option<TimerRequest> {
        self.pending_hide = None;
        if !self.hover_enabled || !group.has_multiple() {
            return None;
        }
        if self.is_visible_for(&group.app_type) {
            self.pending_show = None;
            return None;
        }
        let token = self.take_token();
        self.pending_show = Some((token, group.app_type.clone()));
        Some(TimerRequest {
            kind: PreviewTimerKind::Show,
            token,
            delay: self.show_delay,
        })
    }

    /// Pointer left the button.
    pub fn leave_button(&mut self) -> Option<TimerRequest> {
        self.pending_show = None;
        self.schedule_hide()
    }

    /// Pointer entered the preview strip or the bridge below it.
    pub fn enter_preview(&mut self) {
        self.pending_hide = None;
    }

    pub fn leave_preview(&mut self) -> Option<TimerRequest> {
        self.schedule_hide()
    }

    /// A scheduled timer elapsed. Returns `true` if visibility changed.
    pub fn fire(&mut self, kind: PreviewTimerKind, token: u64) -> bool {
        match kind {
            PreviewTimerKind::Show => match self.pending_show.take() {
                Some((pending, app_type)) if pending == token => {
                    let changed = self.visible.as_ref() != Some(&app_type);
                    self.visible = Some(app_type);
                    changed
                }
                other => {
                    self.pending_show = other;
                    false
                }
            },
            PreviewTimerKind::Hide => {
                if self.pending_hide != Some(token) {
                    return false;
                }
                self.pending_hide = None;
                self.visible.take().is_some()
            }
        }
    }

    /// Closes immediately and drops pending actions.
    pub fn dismiss(&mut self) {
        self.visible = None;
        self.pending_show = None;
        self.pending_hide = None;
    }

    /// Hides the preview when its group no longer has several windows.
    pub fn reconcile(&mut self, state: &WindowStoreState) {
        let Some(app_type) = self.visible.as_ref() else {
            return;
        };
        let count = state
            .windows
            .iter()
            .filter(|w| &w.app_type == app_type)
            .count();
        if count < 2 {
            self.dismiss();
        }
    }

    fn schedule_hide(&mut self) -> Option<TimerRequest> {
        self.visible.as_ref()?;
        let token = self.take_token();
        self.pending_hide = Some(token);
        Some(TimerRequest {
            kind: PreviewTimerKind::Hide,
            token,
            delay: self.hide_delay,
        })
    }

    fn take_token(&mut self) -> u64 {
        let token = self.next_token;
        self.next_token += 1;
        token
    }
}
