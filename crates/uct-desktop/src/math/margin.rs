//! Left/top offset of a control inside its containing surface

use serde::{Deserialize, Serialize};

use super::Vec2;

/// Offset of a control's top-left corner from its container's top-left.
///
/// Only the leading edges are meaningful: controls are always laid out
/// left/top aligned, so right and bottom are implicitly zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub left: f32,
    pub top: f32,
}

impl Margin {
    /// Zero margin (top-left corner of the container)
    pub const ZERO: Margin = Margin { left: 0.0, top: 0.0 };

    /// Create a new margin
    pub const fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }

    /// Margin as a position vector
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    /// Margin shifted by a delta
    pub fn offset(self, delta: Vec2) -> Margin {
        Margin::new(self.left + delta.x, self.top + delta.y)
    }
}

impl From<Vec2> for Margin {
    fn from(v: Vec2) -> Self {
        Margin::new(v.x, v.y)
    }
}
