//! An in-progress drag or resize

use super::{apply_drag, CaptureLease, DragSnapshot, InteractionMode};
use crate::math::{Geometry, Size, Vec2};

/// Outcome of feeding one pointer position to a [`Gesture`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureStep {
    /// Pointer has not travelled far enough yet; nothing to apply
    BelowThreshold,
    /// First move past the threshold
    Crossed(Geometry),
    /// Regular move
    Moved(Geometry),
}

impl GestureStep {
    /// Geometry to apply, if any
    pub fn geometry(self) -> Option<Geometry> {
        match self {
            GestureStep::BelowThreshold => None,
            GestureStep::Crossed(g) | GestureStep::Moved(g) => Some(g),
        }
    }
}

/// Mode, start snapshot and capture lease of one gesture.
///
/// Dropping the gesture releases the capture surface.
#[derive(Debug)]
pub struct Gesture {
    mode: InteractionMode,
    snapshot: DragSnapshot,
    lease: Option<CaptureLease>,
    threshold: Option<f32>,
}

impl Gesture {
    pub fn new(mode: InteractionMode, snapshot: DragSnapshot, lease: Option<CaptureLease>) -> Self {
        Self {
            mode,
            snapshot,
            lease,
            threshold: None,
        }
    }

    /// Ignore moves until the pointer travels `distance` from the start
    pub fn with_threshold(mut self, distance: f32) -> Self {
        self.threshold = Some(distance);
        self
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn snapshot(&self) -> &DragSnapshot {
        &self.snapshot
    }

    /// Whether this gesture holds the shared capture surface
    pub fn is_captured(&self) -> bool {
        self.lease.is_some()
    }

    /// Feed a pointer position (in capture-surface coordinates)
    pub fn track(&mut self, pointer: Vec2, surface: Size, min_size: f32) -> GestureStep {
        let crossed = match self.threshold {
            Some(t) if pointer.distance(self.snapshot.pointer) < t => {
                return GestureStep::BelowThreshold;
            }
            Some(_) => {
                self.threshold = None;
                true
            }
            None => false,
        };

        let delta = self.snapshot.delta_to(pointer);
        let geometry = apply_drag(self.mode, &self.snapshot, delta, surface, min_size);
        if crossed {
            GestureStep::Crossed(geometry)
        } else {
            GestureStep::Moved(geometry)
        }
    }
}
