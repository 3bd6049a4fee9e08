//! Rectangle math shared by the gesture interpreter and the store.

use serde::{Deserialize, Serialize};

use crate::model::{Point, Rect, Size, Viewport};

/// Edge or corner a resize handle is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeDirection {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl ResizeDirection {
    pub const ALL: [ResizeDirection; 8] = [
        Self::N,
        Self::S,
        Self::E,
        Self::W,
        Self::Ne,
        Self::Nw,
        Self::Se,
        Self::Sw,
    ];

    pub fn moves_north(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    pub fn moves_south(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    pub fn moves_east(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    pub fn moves_west(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    /// CSS-style tag (`n`, `se`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::S => "s",
            Self::E => "e",
            Self::W => "w",
            Self::Ne => "ne",
            Self::Nw => "nw",
            Self::Se => "se",
            Self::Sw => "sw",
        }
    }
}

/// Applies a pointer delta to a start rect for the given handle.
///
/// East/south edges grow the size only. West/north edges grow the size and shift the origin by
/// the same delta; once the size hits `min` the far edge stays where it was instead of the
/// origin drifting on.
pub fn apply_resize_delta(start: Rect, direction: ResizeDirection, delta: Point, min: Size) -> Rect {
    let mut rect = start;

    if direction.moves_east() {
        rect.size.width = clamp_extent(start.size.width + delta.x, min.width);
    }
    if direction.moves_south() {
        rect.size.height = clamp_extent(start.size.height + delta.y, min.height);
    }
    if direction.moves_west() {
        let (origin, extent) =
            shift_leading_edge(start.origin.x, start.size.width, delta.x, min.width);
        rect.origin.x = origin;
        rect.size.width = extent;
    }
    if direction.moves_north() {
        let (origin, extent) =
            shift_leading_edge(start.origin.y, start.size.height, delta.y, min.height);
        rect.origin.y = origin;
        rect.size.height = extent;
    }

    rect
}

fn shift_leading_edge(origin: f64, extent: f64, delta: f64, min: f64) -> (f64, f64) {
    let grown = extent - delta;
    if grown.is_finite() && grown >= min {
        (origin + delta, grown)
    } else {
        // Pin the trailing edge at its start position.
        let far_edge = if extent.is_finite() { origin + extent } else { origin + min };
        (far_edge - min, min)
    }
}

fn clamp_extent(value: f64, min: f64) -> f64 {
    if value.is_finite() {
        value.max(min)
    } else {
        min
    }
}

/// Distance between two touch points.
pub fn touch_distance(a: Point, b: Point) -> f64 {
    a.distance_to(b)
}

/// Scales `start` uniformly by `current_distance / start_distance` around its center.
///
/// Returns `None` when the scale is not computable (zero or non-finite start distance).
pub fn pinch_transform(
    start: Rect,
    start_distance: f64,
    current_distance: f64,
    min: Size,
) -> Option<Rect> {
    if !(start_distance.is_finite() && start_distance > 0.0 && current_distance.is_finite()) {
        return None;
    }
    let scale = current_distance / start_distance;
    let size = Size {
        width: clamp_extent(start.size.width * scale, min.width),
        height: clamp_extent(start.size.height * scale, min.height),
    };
    let origin = Point {
        x: start.origin.x - (size.width - start.size.width) / 2.0,
        y: start.origin.y - (size.height - start.size.height) / 2.0,
    };
    Some(Rect::new(origin, size))
}

/// Replaces non-finite or below-minimum components with the minimum.
pub fn sanitize_size(size: Size, min: Size) -> Size {
    Size {
        width: clamp_extent(size.width, min.width),
        height: clamp_extent(size.height, min.height),
    }
}

/// Full-viewport rect a maximized window occupies.
pub fn maximized_rect(viewport: Viewport, taskbar_height: f64) -> Rect {
    Rect::new(
        Point::ORIGIN,
        Size::new(viewport.width, (viewport.height - taskbar_height).max(0.0)),
    )
}

/// Pointer offset for a window torn off a maximized layout.
///
/// Keeps the pointer at the same horizontal fraction across the restored width and at the same
/// height within the title bar.
pub fn tear_off_offset(pointer: Point, viewport: Viewport, restored: Size) -> Point {
    let fraction = if viewport.width > 0.0 {
        (pointer.x / viewport.width).clamp(0.0, 1.0)
    } else {
        0.5
    };
    Point {
        x: fraction * restored.width,
        y: pointer.y.max(0.0),
    }
}
