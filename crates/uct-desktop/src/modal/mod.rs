//! Modal overlay
//!
//! A centered, draggable, resizable panel over a backdrop that covers its
//! parent surface. Showing and hiding fade; a hide keeps the overlay present
//! until the fade-out has finished, then collapses it exactly once.

mod overlay;

pub use overlay::{ModalEvent, ModalOverlay, ModalState};
