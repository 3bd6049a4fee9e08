//! Per-window gesture interpreter.
//!
//! A [`WindowShell`] turns one continuous pointer or touch session into store commands:
//! title-bar drag moves the window, handle drag resizes it, a two-finger pinch scales it, and a
//! double-click or double-tap on the title bar toggles maximize. The shell never touches the
//! store itself; it returns the commands for the caller to dispatch, which keeps it testable with
//! synthetic event sequences.

use tracing::{debug, trace};

use crate::config::{WindowManagerConfig, DOUBLE_TAP_WINDOW_MS};
use crate::geometry::{
    apply_resize_delta, pinch_transform, tear_off_offset, touch_distance, ResizeDirection,
};
use crate::model::{Point, Rect, Size, Viewport, WindowId, WindowRecord};
use crate::store::WindowCommand;

/// Hit region a press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellTarget {
    /// Draggable title-bar area.
    TitleBar,
    /// Minimize/maximize/close buttons inside the title bar.
    Controls,
    /// Window content.
    Body,
    /// One of the eight resize hit regions.
    ResizeHandle(ResizeDirection),
}

/// Input delivered to a [`WindowShell`].
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    /// Primary mouse/pen press.
    PointerDown { target: ShellTarget, pointer: Point },
    PointerMove { pointer: Point },
    PointerUp,
    /// Touch press; `touches` lists every active touch point. `time_ms` feeds double-tap
    /// detection.
    TouchStart {
        target: ShellTarget,
        touches: Vec<Point>,
        time_ms: f64,
    },
    TouchMove { touches: Vec<Point> },
    /// Touch release; `remaining` lists the touches still down.
    TouchEnd { remaining: Vec<Point> },
    DoubleClick { target: ShellTarget },
}

/// Transient state of the current gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum GesturePhase {
    Idle,
    Dragging(DragSession),
    Resizing(ResizeSession),
    Pinching(PinchSession),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub pointer_start: Point,
    /// Pointer position relative to the window's top-left.
    pub offset: Point,
    /// Set once the pointer travelled past the drag threshold.
    pub engaged: bool,
    pub started_by_touch: bool,
    pub started_at_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    pub direction: ResizeDirection,
    pub pointer_start: Point,
    pub rect_start: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PinchSession {
    pub distance_start: f64,
    pub rect_start: Rect,
}

/// Environment a shell interprets events against.
#[derive(Debug, Clone, Copy)]
pub struct ShellContext<'a> {
    /// Current record for the shell's window, or `None` if it was closed.
    pub window: Option<&'a WindowRecord>,
    pub viewport: Viewport,
    pub min_size: Size,
    pub taskbar_height: f64,
    pub drag_threshold: f64,
}

impl<'a> ShellContext<'a> {
    pub fn new(
        window: Option<&'a WindowRecord>,
        viewport: Viewport,
        config: &WindowManagerConfig,
    ) -> Self {
        Self {
            window,
            viewport,
            min_size: config.min_size_for(viewport),
            taskbar_height: config.taskbar_height,
            drag_threshold: config.drag_threshold,
        }
    }
}

/// Gesture state machine for a single window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowShell {
    window_id: WindowId,
    phase: GesturePhase,
    /// Start of the last title-bar tap, cleared by any other gesture in between.
    last_title_tap_ms: Option<f64>,
    /// At least one finger is down. Focus is issued once per touch sequence.
    touch_active: bool,
}

impl WindowShell {
    pub fn new(window_id: WindowId) -> Self {
        Self {
            window_id,
            phase: GesturePhase::Idle,
            last_title_tap_ms: None,
            touch_active: false,
        }
    }

    pub fn window_id(&self) -> &WindowId {
        &self.window_id
    }

    pub fn phase(&self) -> &GesturePhase {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, GesturePhase::Idle)
    }

    /// Feeds one event and returns the store commands it produces.
    pub fn handle(&mut self, event: ShellEvent, ctx: &ShellContext<'_>) -> Vec<WindowCommand> {
        let Some(window) = ctx.window else {
            // Closed mid-gesture.
            self.reset();
            self.touch_active = false;
            return Vec::new();
        };

        match event {
            ShellEvent::PointerDown { target, pointer } => {
                let focus = self.is_idle();
                self.begin(target, pointer, focus, false, 0.0, window, ctx)
            }
            ShellEvent::PointerMove { pointer } => self.track(pointer, window, ctx),
            ShellEvent::PointerUp => {
                self.reset();
                Vec::new()
            }
            ShellEvent::TouchStart {
                target,
                touches,
                time_ms,
            } => self.touch_start(target, &touches, time_ms, window, ctx),
            ShellEvent::TouchMove { touches } => self.touch_move(&touches, window, ctx),
            ShellEvent::TouchEnd { remaining } => {
                self.touch_end(&remaining);
                Vec::new()
            }
            ShellEvent::DoubleClick { target } => {
                if target != ShellTarget::TitleBar {
                    return Vec::new();
                }
                self.reset();
                vec![WindowCommand::ToggleMaximize(self.window_id.clone())]
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn begin(
        &mut self,
        target: ShellTarget,
        pointer: Point,
        focus: bool,
        by_touch: bool,
        time_ms: f64,
        window: &WindowRecord,
        ctx: &ShellContext<'_>,
    ) -> Vec<WindowCommand> {
        let mut commands = Vec::new();
        if focus {
            commands.push(WindowCommand::Focus(self.window_id.clone()));
        }
        if target != ShellTarget::TitleBar {
            self.last_title_tap_ms = None;
        }

        self.phase = match target {
            ShellTarget::TitleBar => {
                let rect = window.effective_rect(ctx.viewport, ctx.taskbar_height);
                GesturePhase::Dragging(DragSession {
                    pointer_start: pointer,
                    offset: pointer.offset_from(rect.origin),
                    engaged: false,
                    started_by_touch: by_touch,
                    started_at_ms: time_ms,
                })
            }
            ShellTarget::ResizeHandle(direction) if !window.is_maximized => {
                GesturePhase::Resizing(ResizeSession {
                    direction,
                    pointer_start: pointer,
                    rect_start: Rect::new(window.position, window.size),
                })
            }
            ShellTarget::ResizeHandle(_) | ShellTarget::Controls | ShellTarget::Body => {
                GesturePhase::Idle
            }
        };
        debug!(window = %self.window_id, ?target, phase = ?self.phase, "gesture start");
        commands
    }

    fn track(
        &mut self,
        pointer: Point,
        window: &WindowRecord,
        ctx: &ShellContext<'_>,
    ) -> Vec<WindowCommand> {
        let id = self.window_id.clone();
        match &mut self.phase {
            GesturePhase::Idle | GesturePhase::Pinching(_) => Vec::new(),
            GesturePhase::Dragging(session) => {
                let mut commands = Vec::new();
                if !session.engaged {
                    if pointer.distance_to(session.pointer_start) < ctx.drag_threshold {
                        return commands;
                    }
                    session.engaged = true;
                    if window.is_maximized {
                        session.offset =
                            tear_off_offset(session.pointer_start, ctx.viewport, window.size);
                        commands.push(WindowCommand::ToggleMaximize(id.clone()));
                        debug!(window = %id, "torn off maximized layout");
                    }
                }
                let position = Point {
                    x: pointer.x - session.offset.x,
                    y: (pointer.y - session.offset.y).max(0.0),
                };
                trace!(window = %id, x = position.x, y = position.y, "drag");
                commands.push(WindowCommand::Move { id, position });
                commands
            }
            GesturePhase::Resizing(session) => {
                let delta = pointer.offset_from(session.pointer_start);
                let rect = apply_resize_delta(session.rect_start, session.direction, delta, ctx.min_size);
                resize_commands(id, window, rect)
            }
        }
    }

    fn touch_start(
        &mut self,
        target: ShellTarget,
        touches: &[Point],
        time_ms: f64,
        window: &WindowRecord,
        ctx: &ShellContext<'_>,
    ) -> Vec<WindowCommand> {
        if touches.is_empty() {
            return Vec::new();
        }
        let focus = !self.touch_active;
        self.touch_active = true;

        match touches {
            [] => Vec::new(),
            [first] => {
                if target == ShellTarget::TitleBar && self.is_double_tap(time_ms) {
                    self.last_title_tap_ms = None;
                    self.reset();
                    let mut commands = Vec::with_capacity(2);
                    if focus {
                        commands.push(WindowCommand::Focus(self.window_id.clone()));
                    }
                    commands.push(WindowCommand::ToggleMaximize(self.window_id.clone()));
                    return commands;
                }
                self.begin(target, *first, focus, true, time_ms, window, ctx)
            }
            [a, b, ..] => {
                let mut commands = Vec::new();
                if focus {
                    commands.push(WindowCommand::Focus(self.window_id.clone()));
                }
                self.last_title_tap_ms = None;
                if window.is_maximized {
                    self.reset();
                    return commands;
                }
                self.phase = GesturePhase::Pinching(PinchSession {
                    distance_start: touch_distance(*a, *b),
                    rect_start: Rect::new(window.position, window.size),
                });
                debug!(window = %self.window_id, "pinch start");
                commands
            }
        }
    }

    fn touch_move(
        &mut self,
        touches: &[Point],
        window: &WindowRecord,
        ctx: &ShellContext<'_>,
    ) -> Vec<WindowCommand> {
        if let GesturePhase::Pinching(session) = &self.phase {
            let [a, b, ..] = touches else {
                return Vec::new();
            };
            let Some(rect) = pinch_transform(
                session.rect_start,
                session.distance_start,
                touch_distance(*a, *b),
                ctx.min_size,
            ) else {
                return Vec::new();
            };
            return resize_commands(self.window_id.clone(), window, rect);
        }
        match touches.first() {
            Some(pointer) => self.track(*pointer, window, ctx),
            None => Vec::new(),
        }
    }

    fn touch_end(&mut self, remaining: &[Point]) {
        if remaining.is_empty() {
            self.touch_active = false;
        }
        match &self.phase {
            GesturePhase::Dragging(session) if remaining.is_empty() => {
                self.last_title_tap_ms = (session.started_by_touch && !session.engaged)
                    .then_some(session.started_at_ms);
                self.phase = GesturePhase::Idle;
            }
            GesturePhase::Dragging(_) => {}
            GesturePhase::Pinching(_) if remaining.len() < 2 => {
                self.last_title_tap_ms = None;
                self.reset();
            }
            GesturePhase::Resizing(_) if remaining.is_empty() => {
                self.last_title_tap_ms = None;
                self.reset();
            }
            _ => {
                if remaining.is_empty() {
                    self.last_title_tap_ms = None;
                }
            }
        }
    }

    fn is_double_tap(&self, time_ms: f64) -> bool {
        self.last_title_tap_ms
            .is_some_and(|previous| time_ms - previous <= DOUBLE_TAP_WINDOW_MS)
    }

    /// Drops any in-flight gesture.
    pub fn reset(&mut self) {
        if !self.is_idle() {
            debug!(window = %self.window_id, "gesture end");
        }
        self.phase = GesturePhase::Idle;
    }
}

fn resize_commands(id: WindowId, window: &WindowRecord, rect: Rect) -> Vec<WindowCommand> {
    let mut commands = Vec::with_capacity(2);
    if rect.origin != window.position {
        commands.push(WindowCommand::Move {
            id: id.clone(),
            position: rect.origin,
        });
    }
    commands.push(WindowCommand::Resize {
        id,
        size: rect.size,
    });
    commands
}
