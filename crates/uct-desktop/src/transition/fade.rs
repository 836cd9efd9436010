//! Fade-in / fade-out opacity animation

use super::easing::ease_in_out_quad;

/// Which way a fade runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeDirection {
    /// Opacity 0.0 -> 1.0
    In,
    /// Opacity 1.0 -> 0.0
    Out,
}

/// A running opacity animation
#[derive(Clone, Debug, PartialEq)]
pub struct Fade {
    /// Direction of the fade
    pub direction: FadeDirection,
    /// Start time (ms)
    pub start_time: f64,
    /// Duration (ms)
    pub duration_ms: f32,
}

impl Fade {
    /// Start a fade-in at `now`
    pub fn fade_in(now: f64, duration_ms: f32) -> Self {
        Self {
            direction: FadeDirection::In,
            start_time: now,
            duration_ms,
        }
    }

    /// Start a fade-out at `now`
    pub fn fade_out(now: f64, duration_ms: f32) -> Self {
        Self {
            direction: FadeDirection::Out,
            start_time: now,
            duration_ms,
        }
    }

    /// Get progress (0.0 to 1.0)
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        let elapsed = (now - self.start_time) as f32;
        (elapsed / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Check if the fade has finished
    pub fn is_complete(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }

    /// Eased opacity at `now`
    pub fn opacity(&self, now: f64) -> f32 {
        let t = ease_in_out_quad(self.progress(now));
        match self.direction {
            FadeDirection::In => t,
            FadeDirection::Out => 1.0 - t,
        }
    }
}
