//! Opacity animations
//!
//! Animations are driven by a host-supplied clock (`now_ms`), so they are
//! deterministic in tests and never schedule work of their own.

mod easing;
mod fade;

pub use easing::ease_in_out_quad;
pub use fade::{Fade, FadeDirection};

/// Default duration of modal fade animations in milliseconds
pub const FADE_DURATION_MS: f32 = 500.0;
