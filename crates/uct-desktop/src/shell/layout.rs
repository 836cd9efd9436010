//! Taskbar and start menu geometry

use serde::{Deserialize, Serialize};

use crate::config::ShellMetrics;
use crate::math::{Rect, Size, Vec2};

/// Screen edge the taskbar docks to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskbarPlacement {
    #[default]
    Bottom,
    Left,
    Top,
    Right,
}

impl TaskbarPlacement {
    pub fn is_horizontal(self) -> bool {
        matches!(self, TaskbarPlacement::Bottom | TaskbarPlacement::Top)
    }
}

/// Screen-space rectangles of the shell
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShellLayout {
    pub taskbar: Rect,
    pub start_button: Rect,
    /// One per taskbar button, in launch order
    pub app_buttons: Vec<Rect>,
    /// Area left for windows
    pub content: Rect,
    pub menu: Rect,
}

impl ShellLayout {
    /// Compute the layout for a screen, a number of taskbar buttons and a
    /// number of visible menu rows
    pub fn compute(
        screen: Size,
        metrics: &ShellMetrics,
        app_buttons: usize,
        menu_rows: usize,
    ) -> Self {
        let s = metrics.taskbar_size;
        let (w, h) = (screen.width, screen.height);
        let placement = metrics.taskbar_placement;

        let (taskbar, content) = match placement {
            TaskbarPlacement::Bottom => (
                Rect::new(0.0, (h - s).max(0.0), w, s),
                Rect::new(0.0, 0.0, w, (h - s).max(0.0)),
            ),
            TaskbarPlacement::Top => (
                Rect::new(0.0, 0.0, w, s),
                Rect::new(0.0, s, w, (h - s).max(0.0)),
            ),
            TaskbarPlacement::Left => (
                Rect::new(0.0, 0.0, s, h),
                Rect::new(s, 0.0, (w - s).max(0.0), h),
            ),
            TaskbarPlacement::Right => (
                Rect::new((w - s).max(0.0), 0.0, s, h),
                Rect::new(0.0, 0.0, (w - s).max(0.0), h),
            ),
        };

        let start_button = Rect::new(taskbar.x, taskbar.y, s, s);
        let app_buttons = (0..app_buttons)
            .map(|i| {
                let offset = s + metrics.button_padding + i as f32 * s;
                if placement.is_horizontal() {
                    Rect::new(taskbar.x + offset, taskbar.y, s, s)
                } else {
                    Rect::new(taskbar.x, taskbar.y + offset, s, s)
                }
            })
            .collect();

        let menu_height = (menu_rows as f32 * metrics.menu_row_height)
            .min(metrics.menu_max_height)
            .min(content.height);
        let menu_width = metrics.menu_width.min(content.width);
        let menu = match placement {
            TaskbarPlacement::Bottom => Rect::new(
                content.x,
                content.bottom() - menu_height,
                menu_width,
                menu_height,
            ),
            TaskbarPlacement::Top | TaskbarPlacement::Left => {
                Rect::new(content.x, content.y, menu_width, menu_height)
            }
            TaskbarPlacement::Right => Rect::new(
                content.right() - menu_width,
                content.y,
                menu_width,
                menu_height,
            ),
        };

        Self {
            taskbar,
            start_button,
            app_buttons,
            content,
            menu,
        }
    }

    /// Index of the taskbar button under `point`
    pub fn app_button_at(&self, point: Vec2) -> Option<usize> {
        self.app_buttons.iter().position(|r| r.contains(point))
    }
}
