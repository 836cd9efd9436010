//! Hit regions of a window chrome

use serde::{Deserialize, Serialize};

use crate::config::ChromeMetrics;
use crate::input::{classify, InteractionMode, ZoneMetrics};
use crate::math::{Rect, Size, Vec2};

/// Caption buttons, right-aligned in the header
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderButton {
    Minimize,
    Maximize,
    Close,
}

impl HeaderButton {
    /// Buttons in right-to-left order
    pub const RIGHT_TO_LEFT: [HeaderButton; 3] =
        [HeaderButton::Close, HeaderButton::Maximize, HeaderButton::Minimize];

    /// Bounds in chrome-local coordinates
    pub fn rect(self, size: Size, metrics: &ChromeMetrics, maximized: bool) -> Rect {
        let slot = match self {
            HeaderButton::Close => 1.0,
            HeaderButton::Maximize => 2.0,
            HeaderButton::Minimize => 3.0,
        };
        let top = if maximized { 0.0 } else { metrics.header_inset };
        Rect::new(
            size.width - slot * metrics.button_size,
            top,
            metrics.button_size,
            metrics.header_height.min(metrics.button_size),
        )
    }
}

/// What a chrome-local position hits
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChromeRegion {
    Button(HeaderButton),
    Zone(InteractionMode),
    /// Application content (or empty header space past the band)
    Content,
}

impl ChromeRegion {
    /// Classify a chrome-local position. Buttons win over edge zones.
    pub fn at(local: Vec2, size: Size, metrics: &ChromeMetrics, maximized: bool) -> Self {
        for button in HeaderButton::RIGHT_TO_LEFT {
            if button.rect(size, metrics, maximized).contains(local) {
                return ChromeRegion::Button(button);
            }
        }

        let zones = ZoneMetrics {
            edge_margin: metrics.edge_margin,
            header_band: metrics.header_band(maximized),
            resizable: !maximized,
        };
        match classify(local, size, zones) {
            Some(mode) => ChromeRegion::Zone(mode),
            None => ChromeRegion::Content,
        }
    }
}
