//! Error types for the virtual desktop
//!
//! This module provides structured error types for all fallible operations
//! in the desktop crate. Geometry never fails: out-of-range sizes and
//! margins are clamped instead of reported.

use crate::types::{InstanceId, MenuItemId, ModuleId, WindowId};

/// Errors that can occur in desktop operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopError {
    /// Window with the given ID was not found
    WindowNotFound(WindowId),

    /// Running application instance with the given ID was not found
    InstanceNotFound(InstanceId),

    /// Module definition with the given ID was never registered
    ModuleNotFound(ModuleId),

    /// Menu item with the given ID does not exist
    MenuItemNotFound(MenuItemId),

    /// An operation was attempted that is not valid in the current state
    InvalidOperation {
        /// The operation that was attempted
        op: &'static str,
        /// Why the operation failed
        reason: &'static str,
    },

    /// Configuration could not be parsed
    Config(String),
}

impl std::fmt::Display for DesktopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WindowNotFound(id) => write!(f, "window not found: {}", id),
            Self::InstanceNotFound(id) => write!(f, "application instance not found: {}", id),
            Self::ModuleNotFound(id) => write!(f, "module not found: {}", id),
            Self::MenuItemNotFound(id) => write!(f, "menu item not found: {}", id),
            Self::InvalidOperation { op, reason } => {
                write!(f, "invalid operation '{}': {}", op, reason)
            }
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for DesktopError {}

impl From<serde_json::Error> for DesktopError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for desktop operations
pub type DesktopResult<T> = Result<T, DesktopError>;
