use tracing::{debug, trace};

use crate::config::ModalMetrics;
use crate::input::{
    classify, CaptureHolder, CaptureRequest, CaptureSurface, CursorShape, DragSnapshot, Gesture,
    ZoneMetrics,
};
use crate::math::{Geometry, Margin, Rect, Size, Vec2};
use crate::registry::Content;
use crate::transition::{Fade, FadeDirection};

/// Presence of the overlay
#[derive(Clone, Debug, PartialEq)]
pub enum ModalState {
    /// Collapsed, takes no space and no input
    Hidden,
    FadingIn(Fade),
    Shown,
    /// Logically closing but still present until the fade completes
    FadingOut(Fade),
}

/// Notifications produced by the overlay
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalEvent {
    /// Fade-in finished
    Shown,
    /// Fade-out finished and the overlay collapsed
    Hidden,
    /// The header close button was pressed
    CloseRequested,
    CaptureStarted,
    CaptureFinished,
}

/// Modal dialog over a parent surface
#[derive(Debug)]
pub struct ModalOverlay {
    title: String,
    content: Option<Content>,
    desired_width: Option<f32>,
    desired_height: Option<f32>,
    geometry: Geometry,
    container: Size,
    metrics: ModalMetrics,
    state: ModalState,
    /// Set once the user moved or resized the overlay; container resizes
    /// then stop re-centering it
    user_placed: bool,
    /// Layout was requested while the container had no size
    layout_pending: bool,
    surface: CaptureSurface,
    gesture: Option<Gesture>,
}

impl ModalOverlay {
    pub fn new(metrics: ModalMetrics) -> Self {
        Self {
            title: String::new(),
            content: None,
            desired_width: None,
            desired_height: None,
            geometry: Geometry::default(),
            container: Size::default(),
            metrics,
            state: ModalState::Hidden,
            user_placed: false,
            layout_pending: false,
            surface: CaptureSurface::new(),
            gesture: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    pub fn set_content(&mut self, content: Option<Content>) {
        self.content = content;
    }

    /// Explicit size; `None` on an axis uses the container ratio
    pub fn set_desired_size(&mut self, width: Option<f32>, height: Option<f32>) {
        self.desired_width = width;
        self.desired_height = height;
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    /// Whether the overlay is present (including while fading out)
    pub fn is_visible(&self) -> bool {
        !matches!(self.state, ModalState::Hidden)
    }

    /// Whether the overlay is open from the caller's point of view
    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Shown | ModalState::FadingIn(_))
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn rect(&self) -> Rect {
        self.geometry.rect()
    }

    /// Surface that tracks the overlay's own drag and resize gestures
    pub fn capture_surface(&self) -> &CaptureSurface {
        &self.surface
    }

    pub fn opacity(&self, now: f64) -> f32 {
        match &self.state {
            ModalState::Hidden => 0.0,
            ModalState::Shown => 1.0,
            ModalState::FadingIn(fade) | ModalState::FadingOut(fade) => fade.opacity(now),
        }
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Start fading in. A show during a fade-out reverses it from the
    /// current opacity.
    pub fn show(&mut self, now: f64) {
        match &self.state {
            ModalState::Hidden => {
                self.user_placed = false;
                self.layout();
                self.state =
                    ModalState::FadingIn(Fade::fade_in(now, self.metrics.fade_duration_ms));
                debug!("modal shown");
            }
            ModalState::FadingOut(fade) => {
                self.state = ModalState::FadingIn(reversed(fade, now));
            }
            ModalState::FadingIn(_) | ModalState::Shown => {}
        }
    }

    /// Start fading out. The overlay stays present until [`tick`] observes
    /// the end of the fade. Repeated hides do not restart the fade.
    ///
    /// A gesture in progress is aborted; the returned event reports the
    /// capture it gave back.
    ///
    /// [`tick`]: ModalOverlay::tick
    pub fn hide(&mut self, now: f64) -> Option<ModalEvent> {
        let finished = self.end_gesture();
        let duration = self.metrics.fade_duration_ms;
        let next = match &self.state {
            ModalState::Shown => ModalState::FadingOut(Fade::fade_out(now, duration)),
            ModalState::FadingIn(fade) => ModalState::FadingOut(reversed(fade, now)),
            ModalState::FadingOut(_) | ModalState::Hidden => return finished,
        };
        self.state = next;
        debug!("modal hiding");
        finished
    }

    /// Advance fades. Returns the transition that completed, if any.
    pub fn tick(&mut self, now: f64) -> Option<ModalEvent> {
        match &self.state {
            ModalState::FadingIn(fade) if fade.is_complete(now) => {
                self.state = ModalState::Shown;
                Some(ModalEvent::Shown)
            }
            ModalState::FadingOut(fade) if fade.is_complete(now) => {
                self.state = ModalState::Hidden;
                debug!("modal hidden");
                Some(ModalEvent::Hidden)
            }
            _ => None,
        }
    }

    // =========================================================================
    // Layout
    // =========================================================================

    pub fn container(&self) -> Size {
        self.container
    }

    /// Parent surface resized. Re-centers unless the user placed the overlay.
    pub fn set_container(&mut self, size: Size) {
        self.container = size;
        if self.layout_pending || (self.is_visible() && !self.user_placed) {
            self.layout();
        }
    }

    fn layout(&mut self) {
        if !self.container.is_positive() {
            self.layout_pending = true;
            return;
        }
        self.layout_pending = false;

        let ratio = self.metrics.size_ratio;
        let width = self.desired_width.unwrap_or(self.container.width * ratio);
        let height = self.desired_height.unwrap_or(self.container.height * ratio);
        let margin = Margin::new(
            ((self.container.width - width) / 2.0).max(0.0),
            ((self.container.height - height) / 2.0).max(0.0),
        );
        self.geometry = Geometry::new(margin, width, height);
    }

    // =========================================================================
    // Pointer input (container coordinates)
    // =========================================================================

    fn close_button(&self) -> Rect {
        let side = self.metrics.header_height;
        Rect::new(self.geometry.width - side, 0.0, side, side)
    }

    /// Pointer pressed on the overlay's surface. Presses on the backdrop are
    /// swallowed.
    pub fn pointer_down(&mut self, point: Vec2, now: f64) -> Vec<ModalEvent> {
        let mut events = Vec::new();
        if !self.is_open() || !self.rect().contains(point) {
            return events;
        }
        events.extend(self.end_gesture());

        let local = self.rect().to_local(point);
        if self.close_button().contains(local) {
            events.push(ModalEvent::CloseRequested);
            events.extend(self.hide(now));
            return events;
        }

        let zones = ZoneMetrics {
            edge_margin: self.metrics.edge_margin,
            header_band: self.metrics.header_height,
            resizable: true,
        };
        let Some(mode) = classify(local, self.geometry.size(), zones) else {
            return events;
        };

        let lease = self.surface.try_acquire(CaptureRequest {
            holder: CaptureHolder::Modal,
            cursor: mode.cursor(),
        });
        if lease.is_some() {
            events.push(ModalEvent::CaptureStarted);
        }
        self.gesture = Some(Gesture::new(
            mode,
            DragSnapshot::new(self.geometry, point),
            lease,
        ));
        events
    }

    pub fn pointer_move(&mut self, point: Vec2) -> bool {
        let Some(gesture) = self.gesture.as_mut() else {
            return false;
        };
        let Some(geometry) = gesture
            .track(point, self.container, self.metrics.min_size)
            .geometry()
        else {
            return false;
        };
        trace!(?geometry, "modal gesture move");
        self.geometry = geometry;
        self.user_placed = true;
        true
    }

    pub fn pointer_up(&mut self) -> Option<ModalEvent> {
        self.end_gesture()
    }

    pub fn pointer_leave(&mut self) -> Option<ModalEvent> {
        self.end_gesture()
    }

    fn end_gesture(&mut self) -> Option<ModalEvent> {
        let gesture = self.gesture.take()?;
        gesture
            .is_captured()
            .then_some(ModalEvent::CaptureFinished)
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Cursor for a hover at `point`
    pub fn hover(&self, point: Vec2) -> CursorShape {
        if let Some(gesture) = &self.gesture {
            return gesture.mode().cursor();
        }
        let zones = ZoneMetrics {
            edge_margin: self.metrics.edge_margin,
            header_band: self.metrics.header_height,
            resizable: true,
        };
        let rect = self.rect();
        if !rect.contains(point) {
            return CursorShape::Default;
        }
        classify(rect.to_local(point), self.geometry.size(), zones)
            .map_or(CursorShape::Default, |mode| mode.cursor())
    }
}

/// Fade in the opposite direction continuing from the current opacity.
///
/// Relies on the easing curve being symmetric: eased(1 - t) == 1 - eased(t).
fn reversed(fade: &Fade, now: f64) -> Fade {
    let elapsed = fade.progress(now);
    let start = now - f64::from((1.0 - elapsed) * fade.duration_ms);
    match fade.direction {
        FadeDirection::In => Fade::fade_out(start, fade.duration_ms),
        FadeDirection::Out => Fade::fade_in(start, fade.duration_ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.001
    }

    fn overlay() -> ModalOverlay {
        let mut m = ModalOverlay::new(ModalMetrics::default());
        m.set_container(Size::new(800.0, 600.0));
        m
    }

    #[test]
    fn test_show_centers_with_ratio() {
        let mut m = overlay();
        m.show(0.0);
        assert_eq!(m.geometry(), Geometry::new(Margin::new(100.0, 75.0), 600.0, 450.0));
        assert!(m.is_visible());
        assert!(approx_eq(m.opacity(0.0), 0.0));
        assert_eq!(m.tick(500.0), Some(ModalEvent::Shown));
        assert!(approx_eq(m.opacity(600.0), 1.0));
    }

    #[test]
    fn test_explicit_size() {
        let mut m = overlay();
        m.set_desired_size(Some(200.0), Some(100.0));
        m.show(0.0);
        assert_eq!(m.geometry(), Geometry::new(Margin::new(300.0, 250.0), 200.0, 100.0));
    }

    #[test]
    fn test_hide_during_fade_in_collapses_once() {
        let mut m = overlay();
        m.show(0.0);
        assert_eq!(m.tick(100.0), None);
        m.hide(200.0);
        assert!(m.is_visible());
        assert!(!m.is_open());

        // Repeated hide does not restart the fade
        m.hide(300.0);
        assert_eq!(m.tick(398.0), None);
        assert!(m.is_visible());
        assert_eq!(m.tick(402.0), Some(ModalEvent::Hidden));
        assert!(!m.is_visible());
        assert_eq!(m.tick(900.0), None);
    }

    #[test]
    fn test_hide_from_shown_takes_full_fade() {
        let mut m = overlay();
        m.show(0.0);
        m.tick(500.0);
        m.hide(1000.0);
        assert_eq!(m.tick(1499.0), None);
        assert_eq!(m.tick(1500.0), Some(ModalEvent::Hidden));
    }

    #[test]
    fn test_reverse_keeps_opacity_continuous() {
        let mut m = overlay();
        m.show(0.0);
        m.tick(500.0);
        m.hide(1000.0);
        let before = m.opacity(1100.0);
        m.show(1100.0);
        assert!(approx_eq(m.opacity(1100.0), before));
        assert!(m.is_open());
    }

    #[test]
    fn test_container_resize_recenters_until_user_moves() {
        let mut m = overlay();
        m.show(0.0);
        m.set_container(Size::new(1000.0, 800.0));
        assert_eq!(m.geometry(), Geometry::new(Margin::new(125.0, 100.0), 750.0, 600.0));

        // Drag the header
        let events = m.pointer_down(Vec2::new(300.0, 110.0), 0.0);
        assert_eq!(events, vec![ModalEvent::CaptureStarted]);
        assert!(m.pointer_move(Vec2::new(310.0, 120.0)));
        assert_eq!(m.pointer_up(), Some(ModalEvent::CaptureFinished));
        assert_eq!(m.geometry().margin, Margin::new(135.0, 110.0));

        m.set_container(Size::new(1200.0, 900.0));
        assert_eq!(m.geometry().margin, Margin::new(135.0, 110.0));
    }

    #[test]
    fn test_zero_container_defers_layout() {
        let mut m = ModalOverlay::new(ModalMetrics::default());
        m.show(0.0);
        assert_eq!(m.geometry(), Geometry::default());
        m.set_container(Size::new(400.0, 400.0));
        assert_eq!(m.geometry(), Geometry::new(Margin::new(50.0, 50.0), 300.0, 300.0));
    }

    #[test]
    fn test_resize_floor_and_backdrop() {
        let mut m = overlay();
        m.show(0.0);
        // Backdrop click does nothing
        assert!(m.pointer_down(Vec2::new(10.0, 10.0), 0.0).is_empty());
        assert!(!m.is_dragging());

        // Right edge, inclusive margin
        let right = 100.0 + 600.0 - 5.0;
        m.pointer_down(Vec2::new(right, 300.0), 0.0);
        m.pointer_move(Vec2::new(right - 2000.0, 300.0));
        assert!(approx_eq(m.geometry().width, 100.0));
        assert!(approx_eq(m.geometry().height, 450.0));
        m.pointer_leave();
        assert!(!m.capture_surface().is_hit_testable());
    }

    #[test]
    fn test_forced_detach_reports_release() {
        let mut m = overlay();
        m.show(0.0);
        m.tick(500.0);

        // Header press without a release, then a second press
        assert_eq!(m.pointer_down(Vec2::new(300.0, 90.0), 600.0), vec![ModalEvent::CaptureStarted]);
        let events = m.pointer_down(Vec2::new(400.0, 90.0), 700.0);
        assert_eq!(events, vec![ModalEvent::CaptureFinished, ModalEvent::CaptureStarted]);

        assert_eq!(m.hide(800.0), Some(ModalEvent::CaptureFinished));
        assert!(!m.capture_surface().is_hit_testable());
        assert_eq!(m.hide(900.0), None);
    }

    #[test]
    fn test_close_button_requests_hide() {
        let mut m = overlay();
        m.show(0.0);
        m.tick(500.0);
        let events = m.pointer_down(Vec2::new(690.0, 80.0), 600.0);
        assert_eq!(events, vec![ModalEvent::CloseRequested]);
        assert!(matches!(m.state(), ModalState::FadingOut(_)));
    }
}
