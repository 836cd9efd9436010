//! Core type definitions for the desktop
//!
//! This module centralizes the id aliases used throughout the crate
//! for consistency and discoverability.

/// Unique window identifier
///
/// Windows are identified by a monotonically increasing 64-bit integer.
/// Window IDs are never reused within a `WindowStack`.
pub type WindowId = u64;

/// Unique running application instance identifier
///
/// Allocated by the `AppManager` at launch; a relaunch after close always
/// receives a fresh id.
pub type InstanceId = u64;

/// Registered module definition identifier (index into the `ModuleCatalog`)
pub type ModuleId = u32;

/// Menu item identifier (index into the `MenuTree` arena)
pub type MenuItemId = u32;

/// Taskbar button identifier
pub type ButtonId = u64;
