//! Movable, resizable window frame

use tracing::{debug, trace};

use super::{ChromeRegion, HeaderButton, WindowConfig};
use crate::config::ChromeMetrics;
use crate::input::{
    CaptureHolder, CaptureProvider, CaptureRequest, CursorShape, DragSnapshot, Gesture,
    GestureStep, InteractionMode,
};
use crate::math::{Geometry, Margin, Rect, Size, Vec2};
use crate::notify::Signal;
use crate::registry::Content;
use crate::types::WindowId;

/// Observable chrome properties
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChromeProperty {
    Title,
    Icon,
    Content,
    DesiredWidth,
    DesiredHeight,
    DesiredMargin,
    Maximized,
    Visible,
}

/// Notifications a chrome hands back to its owner.
///
/// The chrome never acts on its own requests: minimize, maximize and close
/// are decided by whoever owns the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChromeEvent {
    /// Any pointer-down inside the chrome
    Activated,
    MinimizeRequested,
    MaximizeRequested,
    CloseRequested,
    /// A gesture obtained the shared capture surface
    CaptureStarted,
    /// The gesture ended and returned the capture surface
    CaptureFinished,
}

/// Window frame hosting one piece of content
#[derive(Debug)]
pub struct WindowChrome {
    id: WindowId,
    title: String,
    icon: Option<String>,
    content: Option<Content>,
    desired_width: Option<f32>,
    desired_height: Option<f32>,
    desired_margin: Margin,
    maximized: bool,
    visible: bool,
    metrics: ChromeMetrics,
    gesture: Option<Gesture>,
    changed: Signal<ChromeProperty>,
}

impl WindowChrome {
    pub fn new(id: WindowId, config: WindowConfig, metrics: ChromeMetrics) -> Self {
        Self {
            id,
            title: config.title,
            icon: config.icon,
            content: None,
            desired_width: config.width,
            desired_height: config.height,
            desired_margin: config.margin.unwrap_or(Margin::ZERO),
            maximized: config.maximized,
            visible: true,
            metrics,
            gesture: None,
            changed: Signal::new(),
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    /// Property change notifications
    pub fn changed_mut(&mut self) -> &mut Signal<ChromeProperty> {
        &mut self.changed
    }

    // =========================================================================
    // Properties
    // =========================================================================

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        if self.title != title {
            self.title = title;
            self.changed.emit(&ChromeProperty::Title);
        }
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn set_icon(&mut self, icon: Option<String>) {
        if self.icon != icon {
            self.icon = icon;
            self.changed.emit(&ChromeProperty::Icon);
        }
    }

    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    pub fn set_content(&mut self, content: Option<Content>) {
        let same = match (&self.content, &content) {
            (Some(a), Some(b)) => a.ptr_eq(b),
            (None, None) => true,
            _ => false,
        };
        if !same {
            self.content = content;
            self.changed.emit(&ChromeProperty::Content);
        }
    }

    pub fn desired_width(&self) -> Option<f32> {
        self.desired_width
    }

    pub fn set_desired_width(&mut self, width: Option<f32>) {
        if self.desired_width != width {
            self.desired_width = width;
            self.changed.emit(&ChromeProperty::DesiredWidth);
        }
    }

    pub fn desired_height(&self) -> Option<f32> {
        self.desired_height
    }

    pub fn set_desired_height(&mut self, height: Option<f32>) {
        if self.desired_height != height {
            self.desired_height = height;
            self.changed.emit(&ChromeProperty::DesiredHeight);
        }
    }

    pub fn desired_margin(&self) -> Margin {
        self.desired_margin
    }

    pub fn set_desired_margin(&mut self, margin: Margin) {
        if self.desired_margin != margin {
            self.desired_margin = margin;
            self.changed.emit(&ChromeProperty::DesiredMargin);
        }
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    /// Switch between stretched and desired layout. Desired geometry is
    /// left untouched either way.
    pub fn set_maximized(&mut self, maximized: bool) {
        if self.maximized != maximized {
            self.maximized = maximized;
            self.changed.emit(&ChromeProperty::Maximized);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the chrome. Hiding aborts any gesture; the returned
    /// event reports the capture it gave back.
    pub fn set_visible(&mut self, visible: bool) -> Option<ChromeEvent> {
        if self.visible == visible {
            return None;
        }
        self.visible = visible;
        let finished = if visible { None } else { self.force_detach() };
        self.changed.emit(&ChromeProperty::Visible);
        finished
    }

    pub fn metrics(&self) -> &ChromeMetrics {
        &self.metrics
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Geometry as laid out inside a container of the given size
    pub fn actual_geometry(&self, container: Size) -> Geometry {
        if self.maximized {
            return Geometry::new(Margin::ZERO, container.width, container.height);
        }
        Geometry::new(
            self.desired_margin,
            self.desired_width.unwrap_or(self.metrics.default_size.width),
            self.desired_height.unwrap_or(self.metrics.default_size.height),
        )
    }

    /// Height of the header band at the top of the chrome
    pub fn header_band(&self) -> f32 {
        self.metrics.header_band(self.maximized)
    }

    /// Content region in container coordinates
    pub fn content_rect(&self, container: Size) -> Rect {
        let rect = self.actual_geometry(container).rect();
        let band = self.header_band().min(rect.height);
        Rect::new(rect.x, rect.y + band, rect.width, rect.height - band)
    }

    /// Region under a chrome-local position
    pub fn region_at(&self, local: Vec2, container: Size) -> ChromeRegion {
        let size = self.actual_geometry(container).size();
        ChromeRegion::at(local, size, &self.metrics, self.maximized)
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    /// Whether a drag or resize is in progress
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn gesture_mode(&self) -> Option<InteractionMode> {
        self.gesture.as_ref().map(Gesture::mode)
    }

    /// Pointer pressed at `local` (chrome coordinates); `pointer` is the same
    /// position in the coordinate space of the capture surface.
    pub fn pointer_down(
        &mut self,
        local: Vec2,
        pointer: Vec2,
        container: Size,
        provider: &mut dyn CaptureProvider,
    ) -> Vec<ChromeEvent> {
        let mut events = vec![ChromeEvent::Activated];
        if let Some(event) = self.end_gesture() {
            events.push(event);
        }

        let mode = match self.region_at(local, container) {
            ChromeRegion::Button(button) => {
                events.push(match button {
                    HeaderButton::Minimize => ChromeEvent::MinimizeRequested,
                    HeaderButton::Maximize => ChromeEvent::MaximizeRequested,
                    HeaderButton::Close => ChromeEvent::CloseRequested,
                });
                return events;
            }
            ChromeRegion::Content => return events,
            ChromeRegion::Zone(mode) => mode,
        };

        let actual = self.actual_geometry(container);
        let snapshot = DragSnapshot::new(
            Geometry::new(
                actual.margin,
                self.desired_width.unwrap_or(actual.width),
                self.desired_height.unwrap_or(actual.height),
            ),
            pointer,
        );

        let lease = provider.request_capture(CaptureRequest {
            holder: CaptureHolder::Window(self.id),
            cursor: mode.cursor(),
        });
        if lease.is_some() {
            events.push(ChromeEvent::CaptureStarted);
        }

        let mut gesture = Gesture::new(mode, snapshot, lease);
        if self.maximized {
            gesture = gesture.with_threshold(self.metrics.drag_threshold);
        }
        debug!(window = self.id, ?mode, "gesture started");
        self.gesture = Some(gesture);

        events
    }

    /// Pointer moved on the capture surface. Returns whether geometry changed.
    pub fn pointer_move(&mut self, pointer: Vec2, container: Size) -> bool {
        let step = match self.gesture.as_mut() {
            Some(gesture) => gesture.track(pointer, container, self.metrics.min_size),
            None => return false,
        };

        let geometry = match step {
            GestureStep::BelowThreshold => return false,
            GestureStep::Crossed(geometry) => {
                self.set_maximized(false);
                geometry
            }
            GestureStep::Moved(geometry) => geometry,
        };

        trace!(window = self.id, ?geometry, "gesture move");
        self.set_desired_margin(geometry.margin);
        self.set_desired_width(Some(geometry.width));
        self.set_desired_height(Some(geometry.height));
        true
    }

    pub fn pointer_up(&mut self) -> Option<ChromeEvent> {
        self.end_gesture()
    }

    /// Pointer left the tracking surface
    pub fn pointer_leave(&mut self) -> Option<ChromeEvent> {
        self.end_gesture()
    }

    /// Abort any gesture, e.g. when the window is hidden or closed mid-drag
    pub fn force_detach(&mut self) -> Option<ChromeEvent> {
        self.end_gesture()
    }

    fn end_gesture(&mut self) -> Option<ChromeEvent> {
        let gesture = self.gesture.take()?;
        debug!(window = self.id, mode = ?gesture.mode(), "gesture ended");
        let captured = gesture.is_captured();
        drop(gesture);
        captured.then_some(ChromeEvent::CaptureFinished)
    }

    /// Double-click inside the header band toggles maximize.
    ///
    /// Returns `None` when the position is outside the band. Otherwise the
    /// state flipped, and the events report a gesture the toggle aborted.
    pub fn double_click(&mut self, local: Vec2, container: Size) -> Option<Vec<ChromeEvent>> {
        if local.y >= self.header_band() {
            return None;
        }
        if matches!(self.region_at(local, container), ChromeRegion::Button(_)) {
            return None;
        }
        let events = self.end_gesture().into_iter().collect();
        self.set_maximized(!self.maximized);
        Some(events)
    }

    /// Cursor for a hover at `local`
    pub fn hover(&self, local: Vec2, container: Size) -> CursorShape {
        if let Some(mode) = self.gesture_mode() {
            return mode.cursor();
        }
        match self.region_at(local, container) {
            ChromeRegion::Zone(mode) => mode.cursor(),
            ChromeRegion::Button(_) | ChromeRegion::Content => CursorShape::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::input::CaptureSurface;

    const CONTAINER: Size = Size::new(1920.0, 1080.0);

    fn chrome() -> WindowChrome {
        WindowChrome::new(
            1,
            WindowConfig {
                title: "Notes".to_string(),
                width: Some(400.0),
                height: Some(300.0),
                margin: Some(Margin::new(50.0, 50.0)),
                ..Default::default()
            },
            ChromeMetrics::default(),
        )
    }

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.001
    }

    #[test]
    fn test_header_drag() {
        let mut c = chrome();
        let mut surface = CaptureSurface::new();
        let events = c.pointer_down(Vec2::new(100.0, 20.0), Vec2::new(150.0, 70.0), CONTAINER, &mut surface);
        assert_eq!(events, vec![ChromeEvent::Activated, ChromeEvent::CaptureStarted]);
        assert_eq!(c.gesture_mode(), Some(InteractionMode::DragHeader));

        assert!(c.pointer_move(Vec2::new(180.0, 60.0), CONTAINER));
        assert_eq!(c.desired_margin(), Margin::new(80.0, 40.0));
        assert_eq!(c.desired_width(), Some(400.0));
        assert_eq!(c.desired_height(), Some(300.0));

        assert_eq!(c.pointer_up(), Some(ChromeEvent::CaptureFinished));
        assert!(!surface.is_hit_testable());
        assert!(!c.pointer_move(Vec2::new(500.0, 500.0), CONTAINER));
    }

    #[test]
    fn test_buttons_request_only() {
        let mut c = chrome();
        let mut surface = CaptureSurface::new();
        let events = c.pointer_down(Vec2::new(390.0, 20.0), Vec2::ZERO, CONTAINER, &mut surface);
        assert_eq!(events, vec![ChromeEvent::Activated, ChromeEvent::CloseRequested]);
        assert!(!c.is_dragging());

        let events = c.pointer_down(Vec2::new(350.0, 20.0), Vec2::ZERO, CONTAINER, &mut surface);
        assert_eq!(events[1], ChromeEvent::MaximizeRequested);
        assert!(!c.is_maximized());

        let events = c.pointer_down(Vec2::new(320.0, 20.0), Vec2::ZERO, CONTAINER, &mut surface);
        assert_eq!(events[1], ChromeEvent::MinimizeRequested);
        assert!(c.is_visible());
    }

    #[test]
    fn test_content_click_only_activates() {
        let mut c = chrome();
        let mut surface = CaptureSurface::new();
        let events = c.pointer_down(Vec2::new(200.0, 150.0), Vec2::ZERO, CONTAINER, &mut surface);
        assert_eq!(events, vec![ChromeEvent::Activated]);
        assert!(!surface.is_hit_testable());
    }

    #[test]
    fn test_maximize_keeps_desired() {
        let mut c = chrome();
        c.set_maximized(true);
        let g = c.actual_geometry(CONTAINER);
        assert_eq!(g, Geometry::new(Margin::ZERO, 1920.0, 1080.0));
        c.set_maximized(false);
        assert_eq!(
            c.actual_geometry(CONTAINER),
            Geometry::new(Margin::new(50.0, 50.0), 400.0, 300.0)
        );
    }

    #[test]
    fn test_maximized_drag_threshold() {
        let mut c = chrome();
        c.set_maximized(true);
        let mut surface = CaptureSurface::new();
        c.pointer_down(Vec2::new(500.0, 10.0), Vec2::new(500.0, 10.0), CONTAINER, &mut surface);

        assert!(!c.pointer_move(Vec2::new(501.0, 11.0), CONTAINER));
        assert!(c.is_maximized());

        assert!(c.pointer_move(Vec2::new(520.0, 30.0), CONTAINER));
        assert!(!c.is_maximized());
        // Snapshot used margin 0,0 and the desired size
        assert!(approx_eq(c.desired_margin().left, 20.0));
        assert!(approx_eq(c.desired_margin().top, 20.0));
        assert_eq!(c.desired_width(), Some(400.0));

        c.pointer_up();
        c.set_maximized(true);
        c.set_maximized(false);
        assert_eq!(
            c.actual_geometry(CONTAINER),
            Geometry::new(Margin::new(20.0, 20.0), 400.0, 300.0)
        );
    }

    #[test]
    fn test_double_click_header() {
        let mut c = chrome();
        assert_eq!(c.double_click(Vec2::new(100.0, 36.0), CONTAINER), Some(vec![]));
        assert!(c.is_maximized());
        // Band shrinks to 32 while maximized
        assert!(c.double_click(Vec2::new(100.0, 34.0), CONTAINER).is_none());
        assert!(c.double_click(Vec2::new(100.0, 20.0), CONTAINER).is_some());
        assert!(!c.is_maximized());
        assert!(c.double_click(Vec2::new(100.0, 200.0), CONTAINER).is_none());
    }

    #[test]
    fn test_unset_size_uses_actual() {
        let mut c = WindowChrome::new(2, WindowConfig::titled("x"), ChromeMetrics::default());
        let mut surface = CaptureSurface::new();
        // Bottom-right corner of the default 640x480 window
        c.pointer_down(Vec2::new(638.0, 478.0), Vec2::new(638.0, 478.0), CONTAINER, &mut surface);
        assert_eq!(c.gesture_mode(), Some(InteractionMode::ResizeBottomRight));
        c.pointer_move(Vec2::new(648.0, 488.0), CONTAINER);
        assert_eq!(c.desired_width(), Some(650.0));
        assert_eq!(c.desired_height(), Some(490.0));
    }

    #[test]
    fn test_second_gesture_refused_capture() {
        let surface = CaptureSurface::new();
        let mut a = chrome();
        let mut b = WindowChrome::new(2, WindowConfig::titled("b"), ChromeMetrics::default());
        let mut provider = surface.clone();
        a.pointer_down(Vec2::new(100.0, 20.0), Vec2::ZERO, CONTAINER, &mut provider);
        let events = b.pointer_down(Vec2::new(100.0, 20.0), Vec2::ZERO, CONTAINER, &mut provider);
        assert_eq!(events, vec![ChromeEvent::Activated]);
        assert!(b.is_dragging());
        assert_eq!(surface.holder(), Some(CaptureHolder::Window(1)));
    }

    #[test]
    fn test_hide_detaches_gesture() {
        let mut c = chrome();
        let mut surface = CaptureSurface::new();
        c.pointer_down(Vec2::new(2.0, 150.0), Vec2::ZERO, CONTAINER, &mut surface);
        assert!(surface.is_hit_testable());
        assert_eq!(c.set_visible(false), Some(ChromeEvent::CaptureFinished));
        assert!(!c.is_dragging());
        assert!(!surface.is_hit_testable());
        assert_eq!(c.set_visible(true), None);
    }

    #[test]
    fn test_double_click_mid_drag_reports_release() {
        let mut c = chrome();
        let mut surface = CaptureSurface::new();
        c.pointer_down(Vec2::new(100.0, 20.0), Vec2::new(150.0, 70.0), CONTAINER, &mut surface);
        assert!(surface.is_hit_testable());

        let events = c.double_click(Vec2::new(100.0, 20.0), CONTAINER);
        assert_eq!(events, Some(vec![ChromeEvent::CaptureFinished]));
        assert!(c.is_maximized());
        assert!(!surface.is_hit_testable());
    }

    #[test]
    fn test_property_changes_publish_once() {
        let mut c = chrome();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        c.changed_mut().subscribe(move |p| sink.borrow_mut().push(*p));

        c.set_title("Notes");
        c.set_title("Notes 2");
        c.set_maximized(true);
        c.set_maximized(true);
        c.set_desired_width(Some(400.0));

        assert_eq!(*seen.borrow(), vec![ChromeProperty::Title, ChromeProperty::Maximized]);
    }

    #[test]
    fn test_hover_cursor() {
        let c = chrome();
        assert_eq!(c.hover(Vec2::new(2.0, 150.0), CONTAINER), CursorShape::SizeWE);
        assert_eq!(c.hover(Vec2::new(200.0, 150.0), CONTAINER), CursorShape::Default);
    }

    #[test]
    fn test_content_rect() {
        let c = chrome();
        assert_eq!(c.content_rect(CONTAINER), Rect::new(50.0, 87.0, 400.0, 263.0));
    }
}
