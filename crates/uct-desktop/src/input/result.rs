use serde::{Deserialize, Serialize};

use crate::types::WindowId;

/// What the desktop did with a pointer event
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum InputResult {
    /// Consumed by the desktop (chrome, shell, or an active gesture)
    Handled,
    /// Nothing under the pointer
    Unhandled,
    /// Landed on a window's content; the host delivers it to the app
    Forward {
        window_id: WindowId,
        local_x: f32,
        local_y: f32,
    },
}
