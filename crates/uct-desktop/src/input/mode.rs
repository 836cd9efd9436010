//! Hit-zone classification

use serde::{Deserialize, Serialize};

use crate::math::{Size, Vec2};

/// Drag or resize operation selected by a pointer-down
///
/// "No operation" is expressed as `Option::None` by [`classify`], so every
/// variant here is an active gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionMode {
    DragHeader,
    ResizeLeft,
    ResizeTopLeft,
    ResizeTop,
    ResizeTopRight,
    ResizeRight,
    ResizeBottomRight,
    ResizeBottom,
    ResizeBottomLeft,
}

/// Cursor the host should display for a zone
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorShape {
    #[default]
    Default,
    /// Horizontal resize
    SizeWE,
    /// Vertical resize
    SizeNS,
    /// Diagonal resize, top-left to bottom-right
    SizeNWSE,
    /// Diagonal resize, top-right to bottom-left
    SizeNESW,
}

impl InteractionMode {
    /// Whether the operation changes size (as opposed to moving)
    pub fn is_resize(self) -> bool {
        !matches!(self, InteractionMode::DragHeader)
    }

    /// Cursor shown while hovering or performing this operation
    pub fn cursor(self) -> CursorShape {
        match self {
            InteractionMode::DragHeader => CursorShape::Default,
            InteractionMode::ResizeLeft | InteractionMode::ResizeRight => CursorShape::SizeWE,
            InteractionMode::ResizeTop | InteractionMode::ResizeBottom => CursorShape::SizeNS,
            InteractionMode::ResizeTopLeft | InteractionMode::ResizeBottomRight => {
                CursorShape::SizeNWSE
            }
            InteractionMode::ResizeTopRight | InteractionMode::ResizeBottomLeft => {
                CursorShape::SizeNESW
            }
        }
    }
}

/// Geometry of the hit zones of one control
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneMetrics {
    /// Width of the edge band (M)
    pub edge_margin: f32,
    /// Height of the header band (T), measured from the control's top
    pub header_band: f32,
    /// Whether edge bands are active (false for maximized windows)
    pub resizable: bool,
}

/// Classify a position in control-local coordinates.
///
/// Edges win over the header; corners win over single edges. Returns `None`
/// when the position belongs to the content (the click passes through).
pub fn classify(local: Vec2, size: Size, metrics: ZoneMetrics) -> Option<InteractionMode> {
    if metrics.resizable {
        let m = metrics.edge_margin;
        let left = local.x <= m;
        let right = !left && local.x >= size.width - m;
        let top = local.y <= m;
        let bottom = !top && local.y >= size.height - m;

        let mode = match (left, right, top, bottom) {
            (true, _, true, _) => Some(InteractionMode::ResizeTopLeft),
            (_, true, true, _) => Some(InteractionMode::ResizeTopRight),
            (true, _, _, true) => Some(InteractionMode::ResizeBottomLeft),
            (_, true, _, true) => Some(InteractionMode::ResizeBottomRight),
            (true, _, _, _) => Some(InteractionMode::ResizeLeft),
            (_, true, _, _) => Some(InteractionMode::ResizeRight),
            (_, _, true, _) => Some(InteractionMode::ResizeTop),
            (_, _, _, true) => Some(InteractionMode::ResizeBottom),
            _ => None,
        };
        if mode.is_some() {
            return mode;
        }
    }

    if local.y < metrics.header_band {
        return Some(InteractionMode::DragHeader);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const METRICS: ZoneMetrics = ZoneMetrics {
        edge_margin: 5.0,
        header_band: 37.0,
        resizable: true,
    };

    fn at(x: f32, y: f32) -> Option<InteractionMode> {
        classify(Vec2::new(x, y), Size::new(400.0, 300.0), METRICS)
    }

    #[test]
    fn test_edges() {
        assert_eq!(at(2.0, 150.0), Some(InteractionMode::ResizeLeft));
        assert_eq!(at(398.0, 150.0), Some(InteractionMode::ResizeRight));
        assert_eq!(at(200.0, 2.0), Some(InteractionMode::ResizeTop));
        assert_eq!(at(200.0, 298.0), Some(InteractionMode::ResizeBottom));
    }

    #[test]
    fn test_corners() {
        assert_eq!(at(1.0, 1.0), Some(InteractionMode::ResizeTopLeft));
        assert_eq!(at(399.0, 1.0), Some(InteractionMode::ResizeTopRight));
        assert_eq!(at(1.0, 299.0), Some(InteractionMode::ResizeBottomLeft));
        assert_eq!(at(399.0, 299.0), Some(InteractionMode::ResizeBottomRight));
    }

    #[test]
    fn test_header_and_content() {
        assert_eq!(at(200.0, 20.0), Some(InteractionMode::DragHeader));
        assert_eq!(at(200.0, 36.9), Some(InteractionMode::DragHeader));
        assert_eq!(at(200.0, 37.0), None);
        assert_eq!(at(200.0, 150.0), None);
    }

    #[test]
    fn test_not_resizable_only_drags() {
        let metrics = ZoneMetrics {
            resizable: false,
            header_band: 32.0,
            ..METRICS
        };
        let size = Size::new(400.0, 300.0);
        assert_eq!(
            classify(Vec2::new(1.0, 1.0), size, metrics),
            Some(InteractionMode::DragHeader)
        );
        assert_eq!(classify(Vec2::new(1.0, 150.0), size, metrics), None);
    }

    #[test]
    fn test_cursor_shapes() {
        assert_eq!(InteractionMode::ResizeLeft.cursor(), CursorShape::SizeWE);
        assert_eq!(InteractionMode::ResizeBottom.cursor(), CursorShape::SizeNS);
        assert_eq!(InteractionMode::ResizeTopLeft.cursor(), CursorShape::SizeNWSE);
        assert_eq!(InteractionMode::ResizeBottomLeft.cursor(), CursorShape::SizeNESW);
        assert_eq!(InteractionMode::DragHeader.cursor(), CursorShape::Default);
    }
}
