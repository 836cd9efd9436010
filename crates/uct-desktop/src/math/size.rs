//! 2D size

use serde::{Deserialize, Serialize};

use super::Vec2;

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Convert to Vec2
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Whether both dimensions are strictly positive
    pub fn is_positive(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Scale both dimensions
    pub fn scale(self, ratio: f32) -> Size {
        Size::new(self.width * ratio, self.height * ratio)
    }
}
