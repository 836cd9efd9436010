//! Drag and resize geometry

use serde::{Deserialize, Serialize};

use super::InteractionMode;
use crate::math::{Geometry, Margin, Size, Vec2};

/// Geometry and pointer position captured when a gesture starts.
///
/// `pointer` is in the coordinate space of the surface that tracks movement,
/// not the control, so the control moving under the pointer does not feed
/// back into the delta.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragSnapshot {
    pub geometry: Geometry,
    pub pointer: Vec2,
}

impl DragSnapshot {
    pub fn new(geometry: Geometry, pointer: Vec2) -> Self {
        Self { geometry, pointer }
    }

    /// Pointer delta from the gesture start
    pub fn delta_to(&self, pointer: Vec2) -> Vec2 {
        pointer - self.pointer
    }
}

/// What a gesture does along one axis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    /// Unchanged
    Fixed,
    /// Whole control translates
    Move,
    /// Leading edge (left/top) follows the pointer, far edge stays
    Leading,
    /// Trailing edge (right/bottom) follows the pointer
    Trailing,
}

fn axes(mode: InteractionMode) -> (Axis, Axis) {
    match mode {
        InteractionMode::DragHeader => (Axis::Move, Axis::Move),
        InteractionMode::ResizeLeft => (Axis::Leading, Axis::Fixed),
        InteractionMode::ResizeRight => (Axis::Trailing, Axis::Fixed),
        InteractionMode::ResizeTop => (Axis::Fixed, Axis::Leading),
        InteractionMode::ResizeBottom => (Axis::Fixed, Axis::Trailing),
        InteractionMode::ResizeTopLeft => (Axis::Leading, Axis::Leading),
        InteractionMode::ResizeTopRight => (Axis::Trailing, Axis::Leading),
        InteractionMode::ResizeBottomLeft => (Axis::Leading, Axis::Trailing),
        InteractionMode::ResizeBottomRight => (Axis::Trailing, Axis::Trailing),
    }
}

/// Returns (position, length) along one axis
fn apply_axis(axis: Axis, pos: f32, len: f32, delta: f32, surface: f32, min: f32) -> (f32, f32) {
    match axis {
        Axis::Fixed => (pos, len),
        // Upper bound first so a control larger than the surface pins to 0
        Axis::Move => ((pos + delta).min(surface - len).max(0.0), len),
        Axis::Trailing => (pos, (len + delta).max(min)),
        Axis::Leading => {
            let new_len = (len - delta).max(min);
            (pos + (len - new_len), new_len)
        }
    }
}

/// Geometry for a pointer `delta` from the gesture start.
///
/// Resizes never shrink below `min_size`; a leading-edge resize shifts the
/// margin jointly with the floor so the far edge stays put. Header drags keep
/// the control inside `surface`.
pub fn apply_drag(
    mode: InteractionMode,
    snapshot: &DragSnapshot,
    delta: Vec2,
    surface: Size,
    min_size: f32,
) -> Geometry {
    let start = snapshot.geometry;
    let (h, v) = axes(mode);

    let (left, width) = apply_axis(
        h,
        start.margin.left,
        start.width,
        delta.x,
        surface.width,
        min_size,
    );
    let (top, height) = apply_axis(
        v,
        start.margin.top,
        start.height,
        delta.y,
        surface.height,
        min_size,
    );

    Geometry::new(Margin::new(left, top), width, height)
}
