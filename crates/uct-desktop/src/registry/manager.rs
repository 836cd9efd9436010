//! Running instances: launch, activate, minimize, maximize, close

use tracing::debug;

use super::{Content, ModuleCatalog};
use crate::config::ChromeMetrics;
use crate::error::{DesktopError, DesktopResult};
use crate::shell::Taskbar;
use crate::types::{ButtonId, InstanceId, ModuleId, WindowId};
use crate::window::{ChromeEvent, WindowStack};

/// One live application instance
#[derive(Clone, Debug)]
pub struct RunningApp {
    pub id: InstanceId,
    pub module: ModuleId,
    /// Created once at launch; `None` when the factory produced nothing
    pub content: Option<Content>,
    pub button: ButtonId,
    pub window: WindowId,
}

/// Result of a launch request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Launch {
    /// A new instance was created
    Created(InstanceId),
    /// The module was at its instance cap; an existing instance was
    /// activated instead
    Reactivated(InstanceId),
}

impl Launch {
    pub fn instance(self) -> InstanceId {
        match self {
            Launch::Created(id) | Launch::Reactivated(id) => id,
        }
    }
}

/// Tracks running instances together with their windows and taskbar buttons
#[derive(Debug)]
pub struct AppManager {
    /// Launch order
    apps: Vec<RunningApp>,
    windows: WindowStack,
    taskbar: Taskbar,
    next_instance: InstanceId,
}

impl Default for AppManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AppManager {
    pub fn new() -> Self {
        Self {
            apps: Vec::new(),
            windows: WindowStack::new(),
            taskbar: Taskbar::new(),
            next_instance: 1,
        }
    }

    pub fn windows(&self) -> &WindowStack {
        &self.windows
    }

    pub fn windows_mut(&mut self) -> &mut WindowStack {
        &mut self.windows
    }

    pub fn taskbar(&self) -> &Taskbar {
        &self.taskbar
    }

    /// Running instances in launch order
    pub fn running(&self) -> &[RunningApp] {
        &self.apps
    }

    pub fn get(&self, id: InstanceId) -> DesktopResult<&RunningApp> {
        self.apps
            .iter()
            .find(|a| a.id == id)
            .ok_or(DesktopError::InstanceNotFound(id))
    }

    /// Instances of a module in launch order
    pub fn instances_of(&self, module: ModuleId) -> impl Iterator<Item = &RunningApp> {
        self.apps.iter().filter(move |a| a.module == module)
    }

    pub fn instance_for_window(&self, window: WindowId) -> Option<InstanceId> {
        self.apps.iter().find(|a| a.window == window).map(|a| a.id)
    }

    pub fn instance_for_button(&self, button: ButtonId) -> Option<InstanceId> {
        self.apps.iter().find(|a| a.button == button).map(|a| a.id)
    }

    /// Launch a module, or re-activate its first instance when the cap is
    /// reached.
    pub fn launch(
        &mut self,
        catalog: &ModuleCatalog,
        module: ModuleId,
        metrics: &ChromeMetrics,
    ) -> DesktopResult<Launch> {
        let definition = catalog.get(module)?;

        let first = self.instances_of(module).next().map(|a| a.id);
        if definition.is_at_capacity(self.instances_of(module).count()) {
            if let Some(first) = first {
                debug!(module = %definition.name, instance = first, "instance cap reached, reactivating");
                self.activate(first)?;
                return Ok(Launch::Reactivated(first));
            }
        }

        let content = definition.create_content();
        let id = self.next_instance;
        self.next_instance += 1;

        let button = self.taskbar.add(id, module);
        let window = self.windows.create(definition.window_config(), metrics);
        if let Some(chrome) = self.windows.get_mut(window) {
            chrome.set_content(content.clone());
        }

        self.apps.push(RunningApp {
            id,
            module,
            content,
            button,
            window,
        });
        debug!(module = %definition.name, instance = id, window, "application launched");

        self.activate(id)?;
        Ok(Launch::Created(id))
    }

    /// Raise the instance's window, reveal it if minimized, and select its
    /// taskbar button
    pub fn activate(&mut self, id: InstanceId) -> DesktopResult<()> {
        let (window, button) = {
            let app = self.get(id)?;
            (app.window, app.button)
        };
        self.windows.focus(window);
        self.taskbar.select(button);
        debug!(instance = id, "application activated");
        Ok(())
    }

    /// Hide the instance's window; the instance keeps running. Returns the
    /// capture release of a gesture the window was performing.
    pub fn minimize(&mut self, id: InstanceId) -> DesktopResult<Option<ChromeEvent>> {
        let (window, button) = {
            let app = self.get(id)?;
            (app.window, app.button)
        };
        let finished = self.windows.hide(window);
        self.taskbar.deselect(button);
        debug!(instance = id, "application minimized");
        Ok(finished)
    }

    /// Flip the instance's maximized flag. Returns the new state.
    pub fn toggle_maximize(&mut self, id: InstanceId) -> DesktopResult<bool> {
        let window = self.get(id)?.window;
        let chrome = self
            .windows
            .get_mut(window)
            .ok_or(DesktopError::WindowNotFound(window))?;
        let maximized = !chrome.is_maximized();
        chrome.set_maximized(maximized);
        debug!(instance = id, maximized, "application maximize toggled");
        Ok(maximized)
    }

    /// Remove the instance with its window and taskbar button. The caller
    /// receives the record, dropping it releases the content, together with
    /// the capture release of an aborted gesture.
    pub fn close(&mut self, id: InstanceId) -> DesktopResult<(RunningApp, Option<ChromeEvent>)> {
        let index = self
            .apps
            .iter()
            .position(|a| a.id == id)
            .ok_or(DesktopError::InstanceNotFound(id))?;
        let app = self.apps.remove(index);
        self.taskbar.remove(app.button);
        let finished = self.windows.close(app.window).and_then(|(_, finished)| finished);
        debug!(instance = id, "application closed");
        Ok((app, finished))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::CaptureSurface;
    use crate::math::{Size, Vec2};
    use crate::registry::ModuleDefinition;

    fn catalog() -> (ModuleCatalog, ModuleId, ModuleId) {
        let mut catalog = ModuleCatalog::new();
        let single = catalog.register(
            ModuleDefinition::new("Settings", || Some(Content::new("settings")))
                .with_max_instances(1),
        );
        let many = catalog.register(ModuleDefinition::new("Notes", || {
            Some(Content::new(String::from("notes")))
        }));
        (catalog, single, many)
    }

    #[test]
    fn test_launch_creates_everything() {
        let (catalog, _, many) = catalog();
        let mut apps = AppManager::new();
        let id = apps.launch(&catalog, many, &ChromeMetrics::default()).unwrap().instance();

        let app = apps.get(id).unwrap();
        assert_eq!(apps.taskbar().len(), 1);
        assert!(apps.windows().contains(app.window));
        assert_eq!(apps.windows().focused(), Some(app.window));
        assert_eq!(apps.taskbar().selected().map(|b| b.instance), Some(id));

        let chrome = apps.windows().get(app.window).unwrap();
        assert_eq!(chrome.title(), "Notes");
        assert!(chrome.content().unwrap().ptr_eq(app.content.as_ref().unwrap()));
    }

    #[test]
    fn test_cap_reactivates_first() {
        let (catalog, single, many) = catalog();
        let mut apps = AppManager::new();
        let metrics = ChromeMetrics::default();
        let first = apps.launch(&catalog, single, &metrics).unwrap();
        apps.launch(&catalog, many, &metrics).unwrap();
        let again = apps.launch(&catalog, single, &metrics).unwrap();

        assert_eq!(again, Launch::Reactivated(first.instance()));
        assert_eq!(apps.instances_of(single).count(), 1);
        assert_eq!(apps.taskbar().selected().map(|b| b.instance), Some(first.instance()));
    }

    #[test]
    fn test_minimize_and_reveal() {
        let (catalog, _, many) = catalog();
        let mut apps = AppManager::new();
        let id = apps.launch(&catalog, many, &ChromeMetrics::default()).unwrap().instance();
        let window = apps.get(id).unwrap().window;

        apps.minimize(id).unwrap();
        assert!(!apps.windows().get(window).unwrap().is_visible());
        assert!(apps.get(id).is_ok());

        apps.activate(id).unwrap();
        assert!(apps.windows().get(window).unwrap().is_visible());
    }

    #[test]
    fn test_close_removes_all() {
        let (catalog, _, many) = catalog();
        let mut apps = AppManager::new();
        let id = apps.launch(&catalog, many, &ChromeMetrics::default()).unwrap().instance();
        let (closed, finished) = apps.close(id).unwrap();
        assert_eq!(finished, None);

        assert!(apps.taskbar().is_empty());
        assert!(!apps.windows().contains(closed.window));
        assert_eq!(apps.close(id).unwrap_err(), DesktopError::InstanceNotFound(id));
        assert_eq!(closed.content.unwrap().handle_count(), 1);
    }

    #[test]
    fn test_minimize_mid_drag_releases_capture() {
        let (catalog, _, many) = catalog();
        let mut apps = AppManager::new();
        let id = apps.launch(&catalog, many, &ChromeMetrics::default()).unwrap().instance();
        let window = apps.get(id).unwrap().window;

        let mut surface = CaptureSurface::new();
        let header = Vec2::new(100.0, 20.0);
        let container = Size::new(1920.0, 1080.0);
        apps.windows_mut()
            .get_mut(window)
            .unwrap()
            .pointer_down(header, header, container, &mut surface);
        assert!(surface.is_hit_testable());

        assert_eq!(apps.minimize(id).unwrap(), Some(ChromeEvent::CaptureFinished));
        assert!(!surface.is_hit_testable());
        assert_eq!(apps.minimize(id).unwrap(), None);
    }

    #[test]
    fn test_empty_content_still_registers() {
        let mut catalog = ModuleCatalog::new();
        let module = catalog.register(ModuleDefinition::new("Blank", || -> Option<Content> {
            None
        }));
        let mut apps = AppManager::new();
        let id = apps.launch(&catalog, module, &ChromeMetrics::default()).unwrap().instance();
        assert!(apps.get(id).unwrap().content.is_none());
        assert_eq!(apps.running().len(), 1);
    }

    #[test]
    fn test_unknown_ids() {
        let (catalog, _, _) = catalog();
        let mut apps = AppManager::new();
        let metrics = ChromeMetrics::default();
        assert_eq!(
            apps.launch(&catalog, 42, &metrics).unwrap_err(),
            DesktopError::ModuleNotFound(42)
        );
        assert_eq!(apps.activate(9).unwrap_err(), DesktopError::InstanceNotFound(9));
        assert_eq!(apps.toggle_maximize(9).unwrap_err(), DesktopError::InstanceNotFound(9));
    }
}
