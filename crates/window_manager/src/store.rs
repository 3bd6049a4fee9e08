//! Window store commands and the transition function that applies them.
//!
//! Every command referencing an unknown window id is a silent no-op: pointer and touch events
//! can still arrive for a window that was closed from the taskbar mid-gesture.

use std::fmt;

use tracing::{debug, trace};

use crate::geometry::sanitize_size;
use crate::model::{OpenWindowRequest, Point, Size, WindowId, WindowRecord, WindowStoreState};

#[derive(Debug, Clone, PartialEq)]
/// Commands accepted by [`reduce_windows`].
pub enum WindowCommand {
    /// Open a window, or raise and restore the existing one with the same id.
    Open(OpenWindowRequest),
    /// Remove a window.
    Close(WindowId),
    /// Raise a window and make it active.
    Focus(WindowId),
    /// Flip the minimized flag.
    ToggleMinimize(WindowId),
    /// Flip the maximized flag, keeping the stored geometry.
    ToggleMaximize(WindowId),
    /// Replace the stored position.
    Move {
        /// Window to move.
        id: WindowId,
        /// New top-left corner.
        position: Point,
    },
    /// Replace the stored size.
    Resize {
        /// Window to resize.
        id: WindowId,
        /// New size.
        size: Size,
    },
}

impl WindowCommand {
    /// Window the command targets.
    pub fn window_id(&self) -> &WindowId {
        match self {
            Self::Open(request) => &request.id,
            Self::Close(id)
            | Self::Focus(id)
            | Self::ToggleMinimize(id)
            | Self::ToggleMaximize(id)
            | Self::Move { id, .. }
            | Self::Resize { id, .. } => id,
        }
    }
}

/// Applies `command` to `state`.
///
/// `min_size` is only used to sanitize malformed sizes (non-finite or below the minimum);
/// gesture callers clamp before they get here. Returns `true` when the state changed.
pub fn reduce_windows(state: &mut WindowStoreState, command: WindowCommand, min_size: Size) -> bool {
    match command {
        WindowCommand::Open(request) => {
            let z_index = take_z_index(state);
            let id = request.id.clone();
            match state.window_mut(&id) {
                Some(existing) => {
                    existing.z_index = z_index;
                    existing.is_minimized = false;
                }
                None => {
                    let mut record = request.into_record(z_index);
                    record.size = sanitize_size(record.size, min_size);
                    if !record.position.is_finite() {
                        debug!(window = %id, "replacing non-finite open position");
                        record.position = Point::ORIGIN;
                    }
                    record.is_minimized = false;
                    state.windows.push(record);
                }
            }
            debug!(window = %id, z_index, "window opened");
            state.active_window_id = Some(id);
            true
        }
        WindowCommand::Close(id) => {
            let before = state.windows.len();
            state.windows.retain(|w| w.id != id);
            if state.windows.len() == before {
                return ignore("close", &id);
            }
            if state.active_window_id.as_ref() == Some(&id) {
                state.active_window_id = None;
            }
            debug!(window = %id, "window closed");
            true
        }
        WindowCommand::Focus(id) => {
            if state.window(&id).is_none() {
                return ignore("focus", &id);
            }
            let z_index = take_z_index(state);
            if let Some(window) = state.window_mut(&id) {
                window.z_index = z_index;
                // An active window is never minimized.
                window.is_minimized = false;
            }
            state.active_window_id = Some(id);
            true
        }
        WindowCommand::ToggleMinimize(id) => {
            let Some(window) = state.window_mut(&id) else {
                return ignore("toggle_minimize", &id);
            };
            window.is_minimized = !window.is_minimized;
            let minimized = window.is_minimized;
            if minimized && state.active_window_id.as_ref() == Some(&id) {
                state.active_window_id = None;
            }
            debug!(window = %id, minimized, "minimize toggled");
            true
        }
        WindowCommand::ToggleMaximize(id) => {
            let Some(window) = state.window_mut(&id) else {
                return ignore("toggle_maximize", &id);
            };
            window.is_maximized = !window.is_maximized;
            debug!(window = %id, maximized = window.is_maximized, "maximize toggled");
            true
        }
        WindowCommand::Move { id, position } => {
            if !position.is_finite() {
                debug!(window = %id, "dropping non-finite move");
                return false;
            }
            let Some(window) = state.window_mut(&id) else {
                return ignore("move", &id);
            };
            trace!(window = %id, x = position.x, y = position.y, "move");
            let changed = window.position != position;
            window.position = position;
            changed
        }
        WindowCommand::Resize { id, size } => {
            let Some(window) = state.window_mut(&id) else {
                return ignore("resize", &id);
            };
            let size = sanitize_size(size, min_size);
            trace!(window = %id, width = size.width, height = size.height, "resize");
            let changed = window.size != size;
            window.size = size;
            changed
        }
    }
}

fn take_z_index(state: &mut WindowStoreState) -> u64 {
    let z_index = state.next_z_index;
    state.next_z_index = state.next_z_index.saturating_add(1);
    z_index
}

fn ignore(command: &'static str, id: &WindowId) -> bool {
    debug!(window = %id, command, "ignoring command for unknown window");
    false
}

/// Handle returned by [`WindowStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&WindowStoreState)>;

/// Owned window state plus change listeners.
///
/// Listeners run synchronously after each command that changed the state, never for no-ops.
pub struct WindowStore {
    state: WindowStoreState,
    min_size: Size,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for WindowStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowStore")
            .field("state", &self.state)
            .field("min_size", &self.min_size)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl WindowStore {
    pub fn new(min_size: Size) -> Self {
        Self {
            state: WindowStoreState::default(),
            min_size,
            listeners: Vec::new(),
            next_subscription: 1,
        }
    }

    pub fn state(&self) -> &WindowStoreState {
        &self.state
    }

    pub fn windows(&self) -> &[WindowRecord] {
        &self.state.windows
    }

    pub fn active_window_id(&self) -> Option<&WindowId> {
        self.state.active_window_id.as_ref()
    }

    pub fn window(&self, id: &WindowId) -> Option<&WindowRecord> {
        self.state.window(id)
    }

    /// Updates the minimum used to sanitize malformed sizes, e.g. after a viewport change.
    pub fn set_min_size(&mut self, min_size: Size) {
        self.min_size = min_size;
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&WindowStoreState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the subscription was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    /// Applies a command and notifies listeners if anything changed.
    pub fn dispatch(&mut self, command: WindowCommand) -> bool {
        let changed = reduce_windows(&mut self.state, command, self.min_size);
        if changed {
            self.notify();
        }
        changed
    }

    /// Applies commands in order; listeners are notified once at the end.
    pub fn dispatch_all(&mut self, commands: impl IntoIterator<Item = WindowCommand>) -> bool {
        let mut changed = false;
        for command in commands {
            changed |= reduce_windows(&mut self.state, command, self.min_size);
        }
        if changed {
            self.notify();
        }
        changed
    }

    pub fn open(&mut self, request: OpenWindowRequest) -> bool {
        self.dispatch(WindowCommand::Open(request))
    }

    pub fn close(&mut self, id: &WindowId) -> bool {
        self.dispatch(WindowCommand::Close(id.clone()))
    }

    pub fn focus(&mut self, id: &WindowId) -> bool {
        self.dispatch(WindowCommand::Focus(id.clone()))
    }

    pub fn toggle_minimize(&mut self, id: &WindowId) -> bool {
        self.dispatch(WindowCommand::ToggleMinimize(id.clone()))
    }

    pub fn toggle_maximize(&mut self, id: &WindowId) -> bool {
        self.dispatch(WindowCommand::ToggleMaximize(id.clone()))
    }

    pub fn move_to(&mut self, id: &WindowId, position: Point) -> bool {
        self.dispatch(WindowCommand::Move {
            id: id.clone(),
            position,
        })
    }

    pub fn resize(&mut self, id: &WindowId, size: Size) -> bool {
        self.dispatch(WindowCommand::Resize {
            id: id.clone(),
            size,
        })
    }

    fn notify(&mut self) {
        let state = &self.state;
        for (_, listener) in &mut self.listeners {
            listener(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::AppType;

    const MIN: Size = Size::new(300.0, 200.0);

    fn request(id: &str) -> OpenWindowRequest {
        OpenWindowRequest::new(id, AppType::FileExplorer, id)
            .with_geometry(Point::new(100.0, 50.0), Size::new(900.0, 600.0))
    }

    fn store_with(ids: &[&str]) -> WindowStore {
        let mut store = WindowStore::new(MIN);
        for id in ids {
            store.open(request(id));
        }
        store
    }

    fn z(store: &WindowStore, id: &str) -> u64 {
        store.window(&WindowId::from(id)).expect("window").z_index
    }

    #[test]
    fn open_appends_and_activates() {
        let store = store_with(&["a1", "b1"]);

        assert_eq!(store.windows().len(), 2);
        assert_eq!(store.active_window_id(), Some(&WindowId::from("b1")));
        assert!(z(&store, "b1") > z(&store, "a1"));
        assert_eq!(store.state().next_z_index, 3);
    }

    #[test]
    fn reopening_existing_id_restores_without_duplicating() {
        let mut store = store_with(&["p1", "other"]);
        store.toggle_minimize(&WindowId::from("p1"));
        store.move_to(&WindowId::from("p1"), Point::new(5.0, 6.0));

        let mut again = request("p1");
        again.title = "ignored".to_string();
        store.open(again);

        let p1 = store.window(&WindowId::from("p1")).expect("p1");
        assert_eq!(store.windows().len(), 2);
        assert!(!p1.is_minimized);
        assert_eq!(p1.title, "p1");
        assert_eq!(p1.position, Point::new(5.0, 6.0));
        assert!(p1.z_index > z(&store, "other"));
        assert_eq!(store.active_window_id(), Some(&WindowId::from("p1")));
    }

    #[test]
    fn closing_active_window_leaves_no_active_window() {
        let mut store = store_with(&["a", "b"]);
        store.close(&WindowId::from("b"));

        assert_eq!(store.active_window_id(), None);
        assert_eq!(store.windows().len(), 1);
    }

    #[test]
    fn closing_background_window_keeps_active() {
        let mut store = store_with(&["a", "b"]);
        store.close(&WindowId::from("a"));
        assert_eq!(store.active_window_id(), Some(&WindowId::from("b")));
    }

    #[test]
    fn focus_raises_and_activates() {
        let mut store = store_with(&["a", "b"]);
        store.focus(&WindowId::from("a"));

        assert_eq!(store.active_window_id(), Some(&WindowId::from("a")));
        assert!(z(&store, "a") > z(&store, "b"));
    }

    #[test]
    fn minimizing_active_window_clears_active() {
        let mut store = store_with(&["a"]);
        store.toggle_minimize(&WindowId::from("a"));

        assert!(store.window(&WindowId::from("a")).expect("a").is_minimized);
        assert_eq!(store.active_window_id(), None);
    }

    #[test]
    fn minimizing_background_window_keeps_active() {
        let mut store = store_with(&["a", "b"]);
        store.toggle_minimize(&WindowId::from("a"));
        assert_eq!(store.active_window_id(), Some(&WindowId::from("b")));
    }

    #[test]
    fn focusing_minimized_window_unminimizes_it() {
        let mut store = store_with(&["a"]);
        store.toggle_minimize(&WindowId::from("a"));
        store.focus(&WindowId::from("a"));

        assert!(!store.window(&WindowId::from("a")).expect("a").is_minimized);
        assert_eq!(store.active_window_id(), Some(&WindowId::from("a")));
    }

    #[test]
    fn maximize_round_trip_keeps_geometry() {
        let mut store = store_with(&["a"]);
        let id = WindowId::from("a");
        let before = store.window(&id).cloned().expect("a");

        store.toggle_maximize(&id);
        assert!(store.window(&id).expect("a").is_maximized);
        store.toggle_maximize(&id);

        let after = store.window(&id).expect("a");
        assert_eq!(after.position, before.position);
        assert_eq!(after.size, before.size);
        assert!(!after.is_maximized);
    }

    #[test]
    fn unknown_ids_are_noops() {
        let mut store = store_with(&["a"]);
        let snapshot = store.state().clone();
        let ghost = WindowId::from("ghost");

        assert!(!store.close(&ghost));
        assert!(!store.focus(&ghost));
        assert!(!store.toggle_minimize(&ghost));
        assert!(!store.toggle_maximize(&ghost));
        assert!(!store.move_to(&ghost, Point::new(1.0, 1.0)));
        assert!(!store.resize(&ghost, Size::new(500.0, 500.0)));
        assert_eq!(store.state(), &snapshot);
    }

    #[test]
    fn resize_sanitizes_malformed_sizes() {
        let mut store = store_with(&["a"]);
        let id = WindowId::from("a");
        store.resize(&id, Size::new(f64::NAN, -4.0));
        assert_eq!(store.window(&id).expect("a").size, MIN);
    }

    #[test]
    fn non_finite_move_is_dropped() {
        let mut store = store_with(&["a"]);
        let id = WindowId::from("a");
        assert!(!store.move_to(&id, Point::new(f64::INFINITY, 0.0)));
        assert_eq!(store.window(&id).expect("a").position, Point::new(100.0, 50.0));
    }

    #[test]
    fn open_sanitizes_non_finite_geometry() {
        let mut store = WindowStore::new(MIN);
        store.open(
            OpenWindowRequest::new("a", AppType::Notepad, "Notes")
                .with_geometry(Point::new(f64::NAN, 40.0), Size::new(f64::INFINITY, 120.0)),
        );

        let window = store.window(&WindowId::from("a")).expect("a");
        assert_eq!(window.position, Point::ORIGIN);
        assert_eq!(window.size, MIN);
    }

    #[test]
    fn listeners_fire_on_change_only_and_can_unsubscribe() {
        let mut store = WindowStore::new(MIN);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = store.subscribe(move |state| sink.borrow_mut().push(state.windows.len()));

        store.open(request("a"));
        store.focus(&WindowId::from("missing"));
        store.open(request("b"));
        assert!(store.unsubscribe(sub));
        store.close(&WindowId::from("a"));

        assert_eq!(*seen.borrow(), vec![1, 2]);
        assert!(!store.unsubscribe(sub));
    }

    #[test]
    fn dispatch_all_notifies_once() {
        let mut store = store_with(&["a"]);
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        store.subscribe(move |_| *sink.borrow_mut() += 1);

        let id = WindowId::from("a");
        store.dispatch_all([
            WindowCommand::ToggleMinimize(id.clone()),
            WindowCommand::Focus(id),
        ]);
        assert_eq!(*count.borrow(), 1);
    }
}
