//! Application registry and lifecycle
//!
//! Module definitions describe what can be launched; the [`AppManager`]
//! tracks what is running. Each running instance owns one window chrome and
//! one taskbar button for its whole life.

mod content;
mod manager;
mod module;

pub use content::{Content, ContentFactory};
pub use manager::{AppManager, Launch, RunningApp};
pub use module::{DesiredGeometry, ModuleCatalog, ModuleDefinition};
