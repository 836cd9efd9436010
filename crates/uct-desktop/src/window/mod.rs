//! Window chrome and window stacking
//!
//! A [`WindowChrome`] is the movable, resizable frame around one piece of
//! application content: header with icon, title and the three caption
//! buttons, plus the content region. It keeps *desired* geometry separate
//! from what is laid out, so maximize can be toggled without losing the
//! restored size.
//!
//! [`WindowStack`] owns every chrome on the desktop and tracks z-order and
//! focus.

mod chrome;
mod config;
mod region;
mod stack;

pub use chrome::{ChromeEvent, ChromeProperty, WindowChrome};
pub use config::WindowConfig;
pub use region::{ChromeRegion, HeaderButton};
pub use stack::WindowStack;
