//! Margin + size of a control inside its container

use serde::{Deserialize, Serialize};

use super::{Margin, Rect, Size};

/// Placement of a control: offset from the container plus its size.
///
/// This is what the pointer state machine reads at gesture start and
/// produces on every move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub margin: Margin,
    pub width: f32,
    pub height: f32,
}

impl Geometry {
    /// Create a new geometry
    pub const fn new(margin: Margin, width: f32, height: f32) -> Self {
        Self {
            margin,
            width,
            height,
        }
    }

    /// Size component
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Bounds in container coordinates
    pub fn rect(&self) -> Rect {
        Rect::new(self.margin.left, self.margin.top, self.width, self.height)
    }
}
