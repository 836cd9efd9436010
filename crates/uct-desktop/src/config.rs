//! Desktop configuration
//!
//! Every constant the interaction code depends on lives here so hosts can
//! tune them. Defaults reproduce the stock toolkit look. All structs use
//! `#[serde(default)]`, so a partial JSON document only overrides what it
//! names.

use serde::{Deserialize, Serialize};

use crate::error::DesktopResult;
use crate::math::Size;
use crate::shell::TaskbarPlacement;
use crate::transition::FADE_DURATION_MS;

/// Frame metrics for window chrome controls
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeMetrics {
    /// Width of the edge band that starts a resize
    pub edge_margin: f32,
    /// Height of the header row (icon, title, buttons)
    pub header_height: f32,
    /// Gap above the header while the window is not maximized
    pub header_inset: f32,
    /// Side length of the square minimize/maximize/close buttons
    pub button_size: f32,
    /// Smallest width/height a resize can produce
    pub min_size: f32,
    /// Pointer travel before a maximized window starts following a drag
    pub drag_threshold: f32,
    /// Size given to windows whose module declares no desired size
    pub default_size: Size,
    /// Offset between successively opened windows without a desired margin
    pub cascade_step: f32,
    /// Number of cascade steps before wrapping back to the origin
    pub cascade_cycle: u32,
}

impl Default for ChromeMetrics {
    fn default() -> Self {
        Self {
            edge_margin: 5.0,
            header_height: 32.0,
            header_inset: 5.0,
            button_size: 32.0,
            min_size: 100.0,
            drag_threshold: 3.0,
            default_size: Size::new(640.0, 480.0),
            cascade_step: 30.0,
            cascade_cycle: 8,
        }
    }
}

impl ChromeMetrics {
    /// Height of the band that counts as header for drag and double-click
    pub fn header_band(&self, maximized: bool) -> f32 {
        if maximized {
            self.header_height
        } else {
            self.header_height + self.header_inset
        }
    }
}

/// Metrics for modal overlays
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalMetrics {
    /// Width of the edge band that starts a resize
    pub edge_margin: f32,
    /// Height of the title row that starts a drag
    pub header_height: f32,
    /// Smallest width/height a resize can produce
    pub min_size: f32,
    /// Fraction of the container used when no explicit size is set
    pub size_ratio: f32,
    /// Length of the fade-in and fade-out animations
    pub fade_duration_ms: f32,
}

impl Default for ModalMetrics {
    fn default() -> Self {
        Self {
            edge_margin: 5.0,
            header_height: 25.0,
            min_size: 100.0,
            size_ratio: 0.75,
            fade_duration_ms: FADE_DURATION_MS,
        }
    }
}

/// Metrics for the taskbar and start menu
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellMetrics {
    /// Thickness of the taskbar (also the start/app button side length)
    pub taskbar_size: f32,
    /// Screen edge the taskbar docks to
    pub taskbar_placement: TaskbarPlacement,
    /// Gap between the start button and the first application button
    pub button_padding: f32,
    /// Width of the start menu
    pub menu_width: f32,
    /// Upper bound for the start menu height
    pub menu_max_height: f32,
    /// Height of one menu row
    pub menu_row_height: f32,
    /// Horizontal indent per submenu level
    pub submenu_inset: f32,
}

impl Default for ShellMetrics {
    fn default() -> Self {
        Self {
            taskbar_size: 48.0,
            taskbar_placement: TaskbarPlacement::Bottom,
            button_padding: 15.0,
            menu_width: 350.0,
            menu_max_height: 650.0,
            menu_row_height: 32.0,
            submenu_inset: 16.0,
        }
    }
}

/// Complete desktop configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    pub chrome: ChromeMetrics,
    pub modal: ModalMetrics,
    pub shell: ShellMetrics,
}

impl DesktopConfig {
    /// Parse a (possibly partial) JSON configuration document
    pub fn from_json(json: &str) -> DesktopResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration to pretty JSON
    pub fn to_json(&self) -> DesktopResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
