//! Desktop engine coordinating all components

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::DesktopConfig;
use crate::error::{DesktopError, DesktopResult};
use crate::input::{CaptureHolder, CaptureSurface, CursorShape, InputResult};
use crate::math::{Rect, Size, Vec2};
use crate::notify::Signal;
use crate::registry::{AppManager, Launch, ModuleDefinition};
use crate::shell::{MenuClick, MenuTree, Shell, ShellHit, ShellLayout};
use crate::types::{InstanceId, MenuItemId, ModuleId, WindowId};
use crate::window::{ChromeEvent, ChromeRegion, WindowConfig, WindowStack};

/// Window with screen-space coordinates for rendering
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowScreenRect {
    pub id: WindowId,
    /// Running instance hosted by the window; `None` for ad-hoc windows
    pub instance: Option<InstanceId>,
    pub title: String,
    pub icon: Option<String>,
    pub focused: bool,
    pub maximized: bool,
    pub screen_rect: Rect,
    /// Area below the header
    pub content_rect: Rect,
}

/// Notifications for integrators.
///
/// Subscribers observe; they cannot veto anything. Close in particular is
/// fire-only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DesktopEvent {
    /// A menu leaf was clicked; `path` is the leaf and its ancestors
    ModuleClicked {
        module: ModuleId,
        path: Vec<MenuItemId>,
    },
    AppLaunched {
        instance: InstanceId,
        module: ModuleId,
    },
    AppClosed {
        instance: InstanceId,
        module: ModuleId,
    },
    Activated {
        window: WindowId,
        instance: Option<InstanceId>,
    },
    MinimizeRequested {
        window: WindowId,
        instance: Option<InstanceId>,
    },
    MaximizeRequested {
        window: WindowId,
        instance: Option<InstanceId>,
    },
    CloseRequested {
        window: WindowId,
        instance: Option<InstanceId>,
    },
    CaptureStarted {
        window: WindowId,
    },
    CaptureFinished {
        window: WindowId,
    },
}

/// Desktop engine coordinating all desktop components
///
/// This is the main entry point for desktop operations, managing:
/// - Shell (module catalog, start menu, taskbar layout)
/// - Application manager (running instances, windows, taskbar buttons)
/// - The shared capture surface used by window gestures
/// - Integrator notifications
///
/// All pointer coordinates are screen-space logical units.
pub struct DesktopEngine {
    config: DesktopConfig,
    shell: Shell,
    apps: AppManager,
    capture: CaptureSurface,
    events: Signal<DesktopEvent>,
    screen: Size,
    initialized: bool,
}

impl Default for DesktopEngine {
    fn default() -> Self {
        Self::new(DesktopConfig::default())
    }
}

impl DesktopEngine {
    /// Create a new desktop engine
    pub fn new(config: DesktopConfig) -> Self {
        Self {
            shell: Shell::new(config.shell.clone()),
            config,
            apps: AppManager::new(),
            capture: CaptureSurface::new(),
            events: Signal::new(),
            screen: Size::default(),
            initialized: false,
        }
    }

    /// Initialize the desktop with screen dimensions
    pub fn init(&mut self, width: f32, height: f32) {
        self.initialized = true;
        self.resize(width, height);
        debug!(width, height, "desktop initialized");
    }

    /// Handle screen resize
    pub fn resize(&mut self, width: f32, height: f32) {
        self.screen = Size::new(width, height);
        self.shell.set_screen(self.screen);
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    pub fn screen(&self) -> Size {
        self.screen
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    pub fn apps(&self) -> &AppManager {
        &self.apps
    }

    pub fn windows(&self) -> &WindowStack {
        self.apps.windows()
    }

    pub fn menu(&self) -> &MenuTree {
        self.shell.menu()
    }

    pub fn menu_mut(&mut self) -> &mut MenuTree {
        self.shell.menu_mut()
    }

    pub fn capture_surface(&self) -> &CaptureSurface {
        &self.capture
    }

    /// Integrator notifications
    pub fn events_mut(&mut self) -> &mut Signal<DesktopEvent> {
        &mut self.events
    }

    pub fn shell_layout(&self) -> ShellLayout {
        self.shell.layout(self.apps.taskbar().len())
    }

    /// Screen area left for windows
    pub fn content_area(&self) -> Rect {
        self.shell_layout().content
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    pub fn register_module(&mut self, definition: ModuleDefinition) -> ModuleId {
        self.shell.register_module(definition)
    }

    pub fn launch(&mut self, module: ModuleId) -> DesktopResult<Launch> {
        let launch = self
            .apps
            .launch(self.shell.catalog(), module, &self.config.chrome)?;
        if let Launch::Created(instance) = launch {
            self.events
                .emit(&DesktopEvent::AppLaunched { instance, module });
        }
        Ok(launch)
    }

    pub fn activate(&mut self, instance: InstanceId) -> DesktopResult<()> {
        self.apps.activate(instance)
    }

    pub fn minimize(&mut self, instance: InstanceId) -> DesktopResult<()> {
        let window = self.apps.get(instance)?.window;
        let finished = self.apps.minimize(instance)?;
        self.report_release(window, finished);
        Ok(())
    }

    pub fn toggle_maximize(&mut self, instance: InstanceId) -> DesktopResult<bool> {
        self.apps.toggle_maximize(instance)
    }

    pub fn close(&mut self, instance: InstanceId) -> DesktopResult<()> {
        let (app, finished) = self.apps.close(instance)?;
        self.report_release(app.window, finished);
        self.events.emit(&DesktopEvent::AppClosed {
            instance,
            module: app.module,
        });
        Ok(())
    }

    /// Show a window that is not tied to a module
    pub fn show_window(&mut self, config: WindowConfig) -> DesktopResult<WindowId> {
        if !self.initialized {
            return Err(DesktopError::InvalidOperation {
                op: "show_window",
                reason: "virtual desktop is not initialized",
            });
        }
        let windows = self.apps.windows_mut();
        let id = windows.create(config, &self.config.chrome);
        windows.focus(id);
        Ok(id)
    }

    /// Close a window. A window hosting an instance closes the instance.
    pub fn close_window(&mut self, id: WindowId) -> DesktopResult<()> {
        if let Some(instance) = self.apps.instance_for_window(id) {
            return self.close(instance);
        }
        let (_, finished) = self
            .apps
            .windows_mut()
            .close(id)
            .ok_or(DesktopError::WindowNotFound(id))?;
        self.report_release(id, finished);
        Ok(())
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Handle pointer down
    pub fn handle_pointer_down(&mut self, x: f32, y: f32) -> InputResult {
        let point = Vec2::new(x, y);

        // A press while a gesture is live means its release never arrived
        if self.gesture_window().is_some() {
            self.end_gesture(false);
        }

        match self.shell.hit_test(point, self.apps.taskbar().len()) {
            ShellHit::Backdrop => {
                self.shell.close_menu();
                InputResult::Handled
            }
            ShellHit::Menu | ShellHit::Taskbar => InputResult::Handled,
            ShellHit::MenuItem(item) => {
                self.click_menu_item(item);
                InputResult::Handled
            }
            ShellHit::StartButton => {
                self.shell.toggle_menu();
                InputResult::Handled
            }
            ShellHit::AppButton(index) => {
                let instance = self
                    .apps
                    .taskbar()
                    .buttons()
                    .get(index)
                    .map(|b| b.instance);
                if let Some(instance) = instance {
                    if let Err(err) = self.apps.activate(instance) {
                        warn!(%err, "taskbar button without instance");
                    }
                }
                InputResult::Handled
            }
            ShellHit::Content => self.window_pointer_down(point),
        }
    }

    fn click_menu_item(&mut self, item: MenuItemId) {
        match self.shell.menu_mut().click(item) {
            Ok(MenuClick::Module { module, path }) => {
                self.events
                    .emit(&DesktopEvent::ModuleClicked { module, path });
                self.shell.close_menu();
                if let Err(err) = self.launch(module) {
                    warn!(%err, module, "menu launch failed");
                }
            }
            Ok(MenuClick::Toggled { .. }) => {}
            Err(err) => warn!(%err, "menu click ignored"),
        }
    }

    fn window_pointer_down(&mut self, point: Vec2) -> InputResult {
        let area = self.content_area();
        let surface_point = area.to_local(point);
        let Some(window) = self.windows().window_at(surface_point, area.size()) else {
            return InputResult::Unhandled;
        };
        let Some(chrome) = self.apps.windows_mut().get_mut(window) else {
            return InputResult::Unhandled;
        };

        let local = chrome.actual_geometry(area.size()).rect().to_local(surface_point);
        let region = chrome.region_at(local, area.size());
        let events = chrome.pointer_down(local, surface_point, area.size(), &mut self.capture);
        for event in events {
            self.dispatch_chrome_event(window, event);
        }

        match region {
            ChromeRegion::Content => {
                // Forward in content-region coordinates
                let header = self
                    .windows()
                    .get(window)
                    .map_or(0.0, |c| c.header_band());
                InputResult::Forward {
                    window_id: window,
                    local_x: local.x,
                    local_y: local.y - header,
                }
            }
            ChromeRegion::Button(_) | ChromeRegion::Zone(_) => InputResult::Handled,
        }
    }

    /// Route a chrome notification back into the lifecycle
    fn dispatch_chrome_event(&mut self, window: WindowId, event: ChromeEvent) {
        let instance = self.apps.instance_for_window(window);
        let result = match event {
            ChromeEvent::Activated => {
                self.events
                    .emit(&DesktopEvent::Activated { window, instance });
                match instance {
                    Some(id) => self.apps.activate(id),
                    None => {
                        self.apps.windows_mut().focus(window);
                        Ok(())
                    }
                }
            }
            ChromeEvent::MinimizeRequested => {
                self.events
                    .emit(&DesktopEvent::MinimizeRequested { window, instance });
                match instance {
                    Some(id) => self.minimize(id),
                    None => {
                        let finished = self.apps.windows_mut().hide(window);
                        self.report_release(window, finished);
                        Ok(())
                    }
                }
            }
            ChromeEvent::MaximizeRequested => {
                self.events
                    .emit(&DesktopEvent::MaximizeRequested { window, instance });
                match instance {
                    Some(id) => self.apps.toggle_maximize(id).map(|_| ()),
                    None => self.toggle_window_maximize(window),
                }
            }
            ChromeEvent::CloseRequested => {
                self.events
                    .emit(&DesktopEvent::CloseRequested { window, instance });
                self.close_window(window)
            }
            ChromeEvent::CaptureStarted => {
                self.events.emit(&DesktopEvent::CaptureStarted { window });
                Ok(())
            }
            ChromeEvent::CaptureFinished => {
                self.events.emit(&DesktopEvent::CaptureFinished { window });
                Ok(())
            }
        };
        if let Err(err) = result {
            warn!(%err, window, ?event, "chrome event ignored");
        }
    }

    /// Dispatch the capture release of a gesture that was aborted by a
    /// lifecycle change
    fn report_release(&mut self, window: WindowId, finished: Option<ChromeEvent>) {
        if let Some(event) = finished {
            self.dispatch_chrome_event(window, event);
        }
    }

    fn toggle_window_maximize(&mut self, window: WindowId) -> DesktopResult<()> {
        let chrome = self
            .apps
            .windows_mut()
            .get_mut(window)
            .ok_or(DesktopError::WindowNotFound(window))?;
        let maximized = !chrome.is_maximized();
        chrome.set_maximized(maximized);
        Ok(())
    }

    /// Window holding the current gesture
    fn gesture_window(&self) -> Option<WindowId> {
        match self.capture.holder() {
            Some(CaptureHolder::Window(id)) => Some(id),
            _ => self.windows().dragging(),
        }
    }

    /// Handle pointer move
    pub fn handle_pointer_move(&mut self, x: f32, y: f32) -> InputResult {
        let Some(window) = self.gesture_window() else {
            return InputResult::Unhandled;
        };
        let area = self.content_area();
        let surface_point = area.to_local(Vec2::new(x, y));
        match self.apps.windows_mut().get_mut(window) {
            Some(chrome) => {
                chrome.pointer_move(surface_point, area.size());
                InputResult::Handled
            }
            None => InputResult::Unhandled,
        }
    }

    /// Handle pointer up
    pub fn handle_pointer_up(&mut self) -> InputResult {
        self.end_gesture(false)
    }

    /// Pointer left the desktop surface
    pub fn handle_pointer_leave(&mut self) -> InputResult {
        self.end_gesture(true)
    }

    fn end_gesture(&mut self, left: bool) -> InputResult {
        let Some(window) = self.gesture_window() else {
            return InputResult::Unhandled;
        };
        let event = self.apps.windows_mut().get_mut(window).and_then(|chrome| {
            if left {
                chrome.pointer_leave()
            } else {
                chrome.pointer_up()
            }
        });
        if let Some(event) = event {
            self.dispatch_chrome_event(window, event);
        }
        InputResult::Handled
    }

    /// Handle double click (header toggles maximize)
    pub fn handle_double_click(&mut self, x: f32, y: f32) -> InputResult {
        if self.shell.is_menu_open() {
            return InputResult::Handled;
        }
        let area = self.content_area();
        let surface_point = area.to_local(Vec2::new(x, y));
        let Some(window) = self.windows().window_at(surface_point, area.size()) else {
            return InputResult::Unhandled;
        };
        let Some(chrome) = self.apps.windows_mut().get_mut(window) else {
            return InputResult::Unhandled;
        };
        let local = chrome.actual_geometry(area.size()).rect().to_local(surface_point);
        let Some(events) = chrome.double_click(local, area.size()) else {
            return InputResult::Unhandled;
        };
        for event in events {
            self.dispatch_chrome_event(window, event);
        }
        InputResult::Handled
    }

    /// Handle wheel event. Scrolls the start menu when over it.
    pub fn handle_wheel(&mut self, _dx: f32, dy: f32, x: f32, y: f32) -> InputResult {
        if !self.shell.is_menu_open() {
            return InputResult::Unhandled;
        }
        if self.shell_layout().menu.contains(Vec2::new(x, y)) {
            self.shell.scroll_menu(dy);
        }
        InputResult::Handled
    }

    /// Cursor to display at a screen position
    pub fn cursor_at(&self, x: f32, y: f32) -> CursorShape {
        if self.capture.is_hit_testable() {
            return self.capture.cursor();
        }
        if self.shell.is_menu_open() {
            return CursorShape::Default;
        }
        let area = self.content_area();
        let surface_point = area.to_local(Vec2::new(x, y));
        self.windows()
            .window_at(surface_point, area.size())
            .and_then(|id| self.windows().get(id))
            .map_or(CursorShape::Default, |chrome| {
                let local = chrome.actual_geometry(area.size()).rect().to_local(surface_point);
                chrome.hover(local, area.size())
            })
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Visible windows back to front, in screen coordinates
    pub fn window_screen_rects(&self) -> Vec<WindowScreenRect> {
        let area = self.content_area();
        let offset = area.position();
        let focused = self.windows().focused();

        self.windows()
            .windows_by_z()
            .into_iter()
            .filter(|w| w.is_visible())
            .map(|w| {
                let rect = w.actual_geometry(area.size()).rect();
                let content = w.content_rect(area.size());
                WindowScreenRect {
                    id: w.id(),
                    instance: self.apps.instance_for_window(w.id()),
                    title: w.title().to_string(),
                    icon: w.icon().map(str::to_string),
                    focused: focused == Some(w.id()),
                    maximized: w.is_maximized(),
                    screen_rect: Rect::new(
                        rect.x + offset.x,
                        rect.y + offset.y,
                        rect.width,
                        rect.height,
                    ),
                    content_rect: Rect::new(
                        content.x + offset.x,
                        content.y + offset.y,
                        content.width,
                        content.height,
                    ),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::math::Margin;
    use crate::registry::{Content, DesiredGeometry};

    fn engine() -> DesktopEngine {
        let mut engine = DesktopEngine::default();
        engine.init(1920.0, 1080.0);
        engine
    }

    fn notes() -> ModuleDefinition {
        ModuleDefinition::new("Notes", || Some(Content::new(String::from("notes")))).with_geometry(
            DesiredGeometry {
                width: Some(400.0),
                height: Some(300.0),
                margin: Some(Margin::new(100.0, 100.0)),
                maximized: false,
            },
        )
    }

    #[test]
    fn test_desktop_engine_init() {
        let engine = engine();
        assert!(engine.is_initialized());
        assert_eq!(engine.content_area(), Rect::new(0.0, 0.0, 1920.0, 1032.0));
    }

    #[test]
    fn test_show_window_before_init_fails() {
        let mut engine = DesktopEngine::default();
        let err = engine.show_window(WindowConfig::titled("early")).unwrap_err();
        assert_eq!(
            err,
            DesktopError::InvalidOperation {
                op: "show_window",
                reason: "virtual desktop is not initialized",
            }
        );
        engine.init(800.0, 600.0);
        assert!(engine.show_window(WindowConfig::titled("late")).is_ok());
    }

    #[test]
    fn test_pointer_drag_moves_window() {
        let mut engine = engine();
        let module = engine.register_module(notes());
        let id = engine.launch(module).unwrap().instance();
        let window = engine.apps().get(id).unwrap().window;

        assert_eq!(engine.handle_pointer_down(200.0, 120.0), InputResult::Handled);
        assert!(engine.capture_surface().is_hit_testable());
        engine.handle_pointer_move(230.0, 110.0);
        engine.handle_pointer_up();
        assert!(!engine.capture_surface().is_hit_testable());

        let chrome = engine.windows().get(window).unwrap();
        assert_eq!(chrome.desired_margin(), Margin::new(130.0, 90.0));
    }

    #[test]
    fn test_content_click_forwards() {
        let mut engine = engine();
        let module = engine.register_module(notes());
        engine.launch(module).unwrap();
        match engine.handle_pointer_down(200.0, 237.0) {
            InputResult::Forward { local_x, local_y, .. } => {
                assert!((local_x - 100.0).abs() < 0.001);
                assert!((local_y - 100.0).abs() < 0.001);
            }
            other => panic!("expected forward, got {other:?}"),
        }
    }

    #[test]
    fn test_close_button_closes_instance() {
        let mut engine = engine();
        let module = engine.register_module(notes());
        let id = engine.launch(module).unwrap().instance();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        engine.events_mut().subscribe(move |e| sink.borrow_mut().push(e.clone()));

        // Close button: right-most 32px of the header at x 468..500, y 105..137
        engine.handle_pointer_down(490.0, 120.0);
        assert!(engine.apps().get(id).is_err());
        assert!(engine.apps().taskbar().is_empty());
        assert!(seen
            .borrow()
            .contains(&DesktopEvent::AppClosed { instance: id, module }));
    }

    #[test]
    fn test_start_menu_launch() {
        let mut engine = engine();
        let module = engine.register_module(notes());
        let group = engine.menu_mut().add_group(None, "Office").unwrap();
        let leaf = engine.menu_mut().add_leaf(Some(group), "Notes", None, module).unwrap();

        engine.handle_pointer_down(10.0, 1050.0);
        assert!(engine.shell().is_menu_open());
        // One row: the collapsed group at y 1000..1032
        engine.handle_pointer_down(10.0, 1010.0);
        assert!(engine.menu().get(group).unwrap().is_expanded());

        // Two rows now: menu spans y 968..1032, leaf on the second
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        engine.events_mut().subscribe(move |e| sink.borrow_mut().push(e.clone()));
        engine.handle_pointer_down(10.0, 1010.0);

        assert!(!engine.shell().is_menu_open());
        assert_eq!(engine.apps().running().len(), 1);
        assert_eq!(
            seen.borrow()[0],
            DesktopEvent::ModuleClicked {
                module,
                path: vec![leaf, group],
            }
        );
    }

    #[test]
    fn test_backdrop_collapses_menu() {
        let mut engine = engine();
        engine.handle_pointer_down(10.0, 1050.0);
        assert!(engine.shell().is_menu_open());
        assert_eq!(engine.handle_pointer_down(10.0, 1050.0), InputResult::Handled);
        assert!(!engine.shell().is_menu_open());
    }

    #[test]
    fn test_wheel_scrolls_open_menu() {
        let mut engine = engine();
        let module = engine.register_module(notes());
        let mut last = 0;
        for i in 0..30 {
            last = engine.menu_mut().add_leaf(None, format!("Notes {i}"), None, module).unwrap();
        }
        assert_eq!(engine.handle_wheel(0.0, 100.0, 10.0, 900.0), InputResult::Unhandled);

        engine.handle_pointer_down(10.0, 1050.0);
        let menu = engine.shell_layout().menu;
        assert_eq!(engine.handle_wheel(0.0, 10_000.0, 10.0, 900.0), InputResult::Handled);
        assert_eq!(engine.shell().menu_scroll(), 960.0 - menu.height);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        engine.events_mut().subscribe(move |e| sink.borrow_mut().push(e.clone()));
        engine.handle_pointer_down(10.0, menu.bottom() - 1.0);

        assert!(!engine.shell().is_menu_open());
        assert_eq!(engine.apps().running().len(), 1);
        assert_eq!(
            seen.borrow()[0],
            DesktopEvent::ModuleClicked {
                module,
                path: vec![last],
            }
        );
    }

    #[test]
    fn test_window_screen_rects_skip_minimized() {
        let mut engine = engine();
        let module = engine.register_module(notes());
        let a = engine.launch(module).unwrap().instance();
        let b = engine.launch(module).unwrap().instance();
        engine.minimize(a).unwrap();

        let rects = engine.window_screen_rects();
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].instance, Some(b));
        assert!(rects[0].focused);
    }

    #[test]
    fn test_cursor_follows_capture() {
        let mut engine = engine();
        let module = engine.register_module(notes());
        engine.launch(module).unwrap();
        assert_eq!(engine.cursor_at(102.0, 250.0), CursorShape::SizeWE);
        engine.handle_pointer_down(102.0, 250.0);
        assert_eq!(engine.cursor_at(1500.0, 900.0), CursorShape::SizeWE);
        engine.handle_pointer_leave();
        assert_eq!(engine.cursor_at(1500.0, 900.0), CursorShape::Default);
    }
}
