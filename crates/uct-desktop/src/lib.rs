//! Headless virtual desktop for embedded application windows
//!
//! This crate provides the state core of a desktop shell toolkit:
//! - Window chrome (drag, resize, maximize, caption buttons)
//! - Application registry (launch, instance caps, activate, minimize, close)
//! - Taskbar and hierarchical start menu
//! - Draggable, resizable, fading modal overlays
//! - Combined style resolution
//!
//! ## Architecture
//!
//! The crate is organized into focused modules:
//!
//! - [`math`]: Geometry types (`Vec2`, `Size`, `Rect`, `Margin`, `Geometry`)
//! - [`input`]: Hit-zone classification, drag/resize math, pointer capture
//! - [`window`]: Window chrome and the window stack
//! - [`modal`]: Modal overlay
//! - [`registry`]: Module definitions and running instances
//! - [`shell`]: Taskbar, start menu, shell layout
//! - [`style`]: Combined style context
//! - [`transition`]: Easing and fades
//! - [`notify`]: Publish-on-change signals
//!
//! ## Example
//!
//! ```rust
//! use uct_desktop::{Content, DesktopEngine, ModuleDefinition};
//!
//! let mut engine = DesktopEngine::default();
//! engine.init(1920.0, 1080.0);
//!
//! let notes = engine.register_module(
//!     ModuleDefinition::new("Notes", || Some(Content::new(String::from("hello"))))
//!         .with_max_instances(1),
//! );
//! engine.menu_mut().add_leaf(None, "Notes", None, notes).unwrap();
//!
//! let instance = engine.launch(notes).unwrap().instance();
//! assert_eq!(engine.launch(notes).unwrap().instance(), instance);
//! ```
//!
//! ## Design Principles
//!
//! 1. **Headless**: nothing here renders; hosts feed pointer events and read
//!    back geometry
//! 2. **Time Abstraction**: animations take `now_ms` from the host for
//!    deterministic testing
//! 3. **Single-threaded**: state is shared through `Rc`, never across threads

pub mod config;
pub mod error;
pub mod input;
pub mod math;
pub mod modal;
pub mod notify;
pub mod registry;
pub mod shell;
pub mod style;
pub mod transition;
pub mod types;
pub mod window;

mod engine;

// Re-export core types for convenience
pub use config::{ChromeMetrics, DesktopConfig, ModalMetrics, ShellMetrics};
pub use error::{DesktopError, DesktopResult};
pub use input::{CaptureSurface, CursorShape, InputResult, InteractionMode};
pub use math::{Geometry, Margin, Rect, Size, Vec2};
pub use modal::{ModalEvent, ModalOverlay};
pub use notify::{Signal, SubscriptionId};
pub use registry::{
    AppManager, Content, ContentFactory, DesiredGeometry, Launch, ModuleCatalog, ModuleDefinition,
    RunningApp,
};
pub use shell::{MenuClick, MenuTree, Shell, ShellLayout, TaskbarPlacement};
pub use style::StyleContext;
pub use types::{ButtonId, InstanceId, MenuItemId, ModuleId, WindowId};
pub use window::{ChromeEvent, WindowChrome, WindowConfig, WindowStack};

pub use engine::{DesktopEngine, DesktopEvent, WindowScreenRect};
