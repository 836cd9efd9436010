//! Window creation parameters

use serde::{Deserialize, Serialize};

use crate::math::Margin;

/// Configuration for creating a new window
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Icon template key, resolved by the host
    pub icon: Option<String>,
    /// Desired width; `None` lets the desktop pick its default size
    pub width: Option<f32>,
    /// Desired height; `None` lets the desktop pick its default size
    pub height: Option<f32>,
    /// Desired margin; `None` cascades from previously opened windows
    pub margin: Option<Margin>,
    /// Start maximized
    pub maximized: bool,
}

impl WindowConfig {
    /// Configuration with only a title set
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}
