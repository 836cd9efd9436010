//! Taskbar and start menu
//!
//! The shell owns the module catalog and the start menu tree, and lays out
//! the taskbar around the window area. Running instances and their taskbar
//! buttons belong to the [`AppManager`](crate::registry::AppManager).

mod layout;
mod menu;
mod taskbar;

pub use layout::{ShellLayout, TaskbarPlacement};
pub use menu::{MenuClick, MenuItem, MenuRow, MenuTree, GROUP_ICON};
pub use taskbar::{Taskbar, TaskbarButton};

use tracing::debug;

use crate::config::ShellMetrics;
use crate::math::{Size, Vec2};
use crate::registry::{ModuleCatalog, ModuleDefinition};
use crate::types::{MenuItemId, ModuleId};

/// What a screen-space pointer-down hits in the shell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShellHit {
    StartButton,
    /// Index into the taskbar's buttons
    AppButton(usize),
    /// Empty taskbar space
    Taskbar,
    /// A visible menu row
    MenuItem(MenuItemId),
    /// Inside the menu but not on a row
    Menu,
    /// Anything else while the menu is open
    Backdrop,
    /// The window area
    Content,
}

/// Start menu, module catalog and taskbar layout
#[derive(Debug)]
pub struct Shell {
    catalog: ModuleCatalog,
    menu: MenuTree,
    menu_open: bool,
    /// Rows scrolled past the top of the menu, in logical units
    menu_scroll: f32,
    metrics: ShellMetrics,
    screen: Size,
}

impl Shell {
    pub fn new(metrics: ShellMetrics) -> Self {
        Self {
            catalog: ModuleCatalog::new(),
            menu: MenuTree::new(),
            menu_open: false,
            menu_scroll: 0.0,
            metrics,
            screen: Size::default(),
        }
    }

    pub fn metrics(&self) -> &ShellMetrics {
        &self.metrics
    }

    pub fn catalog(&self) -> &ModuleCatalog {
        &self.catalog
    }

    pub fn register_module(&mut self, definition: ModuleDefinition) -> ModuleId {
        let id = self.catalog.register(definition);
        debug!(module = id, "module registered");
        id
    }

    pub fn menu(&self) -> &MenuTree {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut MenuTree {
        &mut self.menu
    }

    pub fn screen(&self) -> Size {
        self.screen
    }

    pub fn set_screen(&mut self, screen: Size) {
        self.screen = screen;
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Start button pressed
    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_scroll = 0.0;
        debug!(open = self.menu_open, "start menu toggled");
        self.menu_open
    }

    /// Collapse the start menu
    pub fn close_menu(&mut self) {
        if self.menu_open {
            self.menu_open = false;
            self.menu_scroll = 0.0;
            debug!("start menu closed");
        }
    }

    /// Current menu scroll, clamped to the rows that exist now
    pub fn menu_scroll(&self) -> f32 {
        self.menu_scroll.min(self.max_menu_scroll())
    }

    /// Scroll the open menu by `delta` (positive reveals later rows).
    /// Returns the new offset.
    pub fn scroll_menu(&mut self, delta: f32) -> f32 {
        let max = self.max_menu_scroll();
        self.menu_scroll = (self.menu_scroll.min(max) + delta).clamp(0.0, max);
        self.menu_scroll
    }

    fn max_menu_scroll(&self) -> f32 {
        if !self.menu_open {
            return 0.0;
        }
        let rows = self.menu.visible_rows(&self.metrics).len();
        let content = rows as f32 * self.metrics.menu_row_height;
        (content - self.layout(0).menu.height).max(0.0)
    }

    pub fn layout(&self, app_buttons: usize) -> ShellLayout {
        let rows = if self.menu_open {
            self.menu.visible_rows(&self.metrics).len()
        } else {
            0
        };
        ShellLayout::compute(self.screen, &self.metrics, app_buttons, rows)
    }

    /// Rows of the open menu (empty while closed). Offsets account for the
    /// menu scroll; rows outside `0..menu.height` are clipped by the host.
    pub fn menu_rows(&self) -> Vec<MenuRow> {
        if !self.menu_open {
            return Vec::new();
        }
        let scroll = self.menu_scroll();
        let mut rows = self.menu.visible_rows(&self.metrics);
        for row in &mut rows {
            row.offset -= scroll;
        }
        rows
    }

    /// Classify a screen-space pointer-down.
    ///
    /// While the menu is open its backdrop covers the whole screen, the
    /// start button included.
    pub fn hit_test(&self, point: Vec2, app_buttons: usize) -> ShellHit {
        let layout = self.layout(app_buttons);

        if self.menu_open {
            if !layout.menu.contains(point) {
                return ShellHit::Backdrop;
            }
            let local_y = point.y - layout.menu.y;
            let row_height = self.metrics.menu_row_height;
            return self
                .menu_rows()
                .iter()
                .find(|row| local_y >= row.offset && local_y < row.offset + row_height)
                .map_or(ShellHit::Menu, |row| ShellHit::MenuItem(row.item));
        }

        if layout.start_button.contains(point) {
            ShellHit::StartButton
        } else if let Some(index) = layout.app_button_at(point) {
            ShellHit::AppButton(index)
        } else if layout.taskbar.contains(point) {
            ShellHit::Taskbar
        } else {
            ShellHit::Content
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Content;

    fn shell() -> Shell {
        let mut shell = Shell::new(ShellMetrics::default());
        shell.set_screen(Size::new(1920.0, 1080.0));
        let notes = shell.register_module(ModuleDefinition::new("Notes", || -> Option<Content> {
            None
        }));
        shell.menu_mut().add_leaf(None, "Notes", None, notes).unwrap();
        shell
    }

    #[test]
    fn test_closed_hits() {
        let s = shell();
        assert_eq!(s.hit_test(Vec2::new(10.0, 1050.0), 1), ShellHit::StartButton);
        assert_eq!(s.hit_test(Vec2::new(70.0, 1050.0), 1), ShellHit::AppButton(0));
        assert_eq!(s.hit_test(Vec2::new(900.0, 1050.0), 1), ShellHit::Taskbar);
        assert_eq!(s.hit_test(Vec2::new(900.0, 500.0), 1), ShellHit::Content);
    }

    #[test]
    fn test_open_menu_backdrop_covers_start_button() {
        let mut s = shell();
        assert!(s.toggle_menu());
        // One row: menu spans y 1000..1032
        assert_eq!(s.hit_test(Vec2::new(10.0, 1010.0), 0), ShellHit::MenuItem(0));
        assert_eq!(s.hit_test(Vec2::new(10.0, 1050.0), 0), ShellHit::Backdrop);
        assert_eq!(s.hit_test(Vec2::new(900.0, 500.0), 0), ShellHit::Backdrop);
        s.close_menu();
        assert!(!s.is_menu_open());
        assert!(s.menu_rows().is_empty());
    }

    #[test]
    fn test_long_menu_scrolls_to_last_row() {
        let mut s = shell();
        let module = s.catalog().find("Notes").unwrap();
        let mut last = 0;
        for i in 1..30 {
            last = s.menu_mut().add_leaf(None, format!("Item {i}"), None, module).unwrap();
        }
        s.toggle_menu();

        // 30 rows of 32 = 960, viewport capped at 650
        let menu = s.layout(0).menu;
        assert_eq!(menu.height, 650.0);
        let bottom_row = Vec2::new(10.0, menu.bottom() - 1.0);
        assert_ne!(s.hit_test(bottom_row, 0), ShellHit::MenuItem(last));

        assert_eq!(s.scroll_menu(10_000.0), 310.0);
        assert_eq!(s.hit_test(bottom_row, 0), ShellHit::MenuItem(last));
        assert_eq!(s.hit_test(Vec2::new(10.0, menu.y + 1.0), 0), ShellHit::MenuItem(9));
        assert_eq!(s.menu_rows()[0].offset, -310.0);

        assert_eq!(s.scroll_menu(-10_000.0), 0.0);
        assert_eq!(s.hit_test(Vec2::new(10.0, menu.y + 1.0), 0), ShellHit::MenuItem(0));

        s.scroll_menu(100.0);
        s.close_menu();
        s.toggle_menu();
        assert_eq!(s.menu_scroll(), 0.0);
    }
}
