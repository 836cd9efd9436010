//! Pointer interaction state machine
//!
//! Turns raw pointer-down / move / up sequences into drag and resize
//! operations:
//!
//! - [`classify`] maps a pointer-down position to an [`InteractionMode`]
//! - [`DragSnapshot`] + [`apply_drag`] compute geometry for every move
//! - [`CaptureSurface`] lends a shared hit-testable region for the length of
//!   a gesture, released through the [`CaptureLease`] guard
//! - [`Gesture`] bundles the snapshot with its lease
//!
//! Everything here is pure state; the window chrome and modal overlay decide
//! when to start and end gestures.

mod capture;
mod drag;
mod gesture;
mod mode;
mod result;

pub use capture::{
    CaptureHolder, CaptureLease, CaptureProvider, CaptureRequest, CaptureSurface, NoCapture,
};
pub use drag::{apply_drag, DragSnapshot};
pub use gesture::{Gesture, GestureStep};
pub use mode::{classify, CursorShape, InteractionMode, ZoneMetrics};
pub use result::InputResult;
