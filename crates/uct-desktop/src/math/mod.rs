//! Core geometry types for the desktop environment
//!
//! All values are logical units (`f32`). Positions inside the desktop are
//! expressed as margins from the top-left of the containing surface, the
//! same way the hosted controls are laid out.

mod geometry;
mod margin;
mod rect;
mod size;
mod vec2;

pub use geometry::Geometry;
pub use margin::Margin;
pub use rect::Rect;
pub use size::Size;
pub use vec2::Vec2;
