//! Shared pointer-capture surface
//!
//! A control being dragged or resized must keep receiving pointer moves once
//! the pointer leaves its own bounds. The owner of the control lends it a
//! desktop-wide surface for the duration of the gesture: the surface becomes
//! hit-testable, routes move/up/leave to the holder, and reverts when the
//! [`CaptureLease`] is dropped.
//!
//! Exactly one lease exists at a time. Because release happens in `Drop`,
//! every way a gesture can end (pointer-up, pointer-leave, forced detach,
//! the window being closed mid-drag) gives the surface back.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use super::CursorShape;
use crate::types::WindowId;

/// Who currently owns the capture surface
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureHolder {
    /// A window chrome on the desktop
    Window(WindowId),
    /// A modal overlay on its own backdrop
    Modal,
}

/// Parameters of a capture request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureRequest {
    pub holder: CaptureHolder,
    /// Cursor the surface shows while captured
    pub cursor: CursorShape,
}

#[derive(Debug, Default)]
struct CaptureState {
    holder: Option<CaptureHolder>,
    cursor: CursorShape,
    grants: u64,
}

/// Cloneable handle to a capture surface
#[derive(Clone, Default)]
pub struct CaptureSurface {
    state: Rc<RefCell<CaptureState>>,
}

impl fmt::Debug for CaptureSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("CaptureSurface")
            .field("holder", &state.holder)
            .field("cursor", &state.cursor)
            .finish()
    }
}

impl CaptureSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lease the surface. Returns `None` while another lease is alive.
    pub fn try_acquire(&self, request: CaptureRequest) -> Option<CaptureLease> {
        let mut state = self.state.borrow_mut();
        if state.holder.is_some() {
            return None;
        }
        state.holder = Some(request.holder);
        state.cursor = request.cursor;
        state.grants += 1;
        debug!(holder = ?request.holder, "capture acquired");

        Some(CaptureLease {
            state: Rc::clone(&self.state),
            holder: request.holder,
        })
    }

    /// Whether the surface currently intercepts pointer input
    pub fn is_hit_testable(&self) -> bool {
        self.state.borrow().holder.is_some()
    }

    /// Current lease holder, if any
    pub fn holder(&self) -> Option<CaptureHolder> {
        self.state.borrow().holder
    }

    /// Cursor to display over the surface
    pub fn cursor(&self) -> CursorShape {
        let state = self.state.borrow();
        if state.holder.is_some() {
            state.cursor
        } else {
            CursorShape::Default
        }
    }

    /// Number of leases ever granted
    pub fn grant_count(&self) -> u64 {
        self.state.borrow().grants
    }
}

/// Exclusive use of a [`CaptureSurface`]; releases it on drop
pub struct CaptureLease {
    state: Rc<RefCell<CaptureState>>,
    holder: CaptureHolder,
}

impl fmt::Debug for CaptureLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureLease")
            .field("holder", &self.holder)
            .finish()
    }
}

impl CaptureLease {
    pub fn holder(&self) -> CaptureHolder {
        self.holder
    }

    /// Change the cursor shown while the lease is held
    pub fn set_cursor(&self, cursor: CursorShape) {
        self.state.borrow_mut().cursor = cursor;
    }
}

impl Drop for CaptureLease {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        state.holder = None;
        state.cursor = CursorShape::Default;
        debug!(holder = ?self.holder, "capture released");
    }
}

/// Owner side of the capture handoff.
///
/// A control asks its owner for a capture region; the owner either grants a
/// lease or refuses (another gesture is in progress, or capture is not
/// supported in this context).
pub trait CaptureProvider {
    fn request_capture(&mut self, request: CaptureRequest) -> Option<CaptureLease>;
}

impl CaptureProvider for CaptureSurface {
    fn request_capture(&mut self, request: CaptureRequest) -> Option<CaptureLease> {
        self.try_acquire(request)
    }
}

/// Provider that always refuses; gestures then stay inside the control
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCapture;

impl CaptureProvider for NoCapture {
    fn request_capture(&mut self, _request: CaptureRequest) -> Option<CaptureLease> {
        None
    }
}
