//! Window ownership, z-order and focus

use std::collections::HashMap;

use tracing::debug;

use super::{ChromeEvent, WindowChrome, WindowConfig};
use crate::config::ChromeMetrics;
use crate::math::{Margin, Size, Vec2};
use crate::types::WindowId;

/// All windows on a desktop, back to front.
///
/// Window IDs are allocated here and never reused.
#[derive(Debug)]
pub struct WindowStack {
    windows: HashMap<WindowId, WindowChrome>,
    /// Back-to-front
    z_order: Vec<WindowId>,
    focused: Option<WindowId>,
    next_id: WindowId,
}

impl Default for WindowStack {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowStack {
    pub fn new() -> Self {
        Self {
            windows: HashMap::new(),
            z_order: Vec::new(),
            focused: None,
            next_id: 1,
        }
    }

    /// Create a window on top of the stack.
    ///
    /// A window without a desired margin cascades from the origin by one
    /// step per window already open, wrapping after `cascade_cycle` steps.
    pub fn create(&mut self, mut config: WindowConfig, metrics: &ChromeMetrics) -> WindowId {
        if config.margin.is_none() {
            let cycle = metrics.cascade_cycle.max(1) as usize;
            let offset = (self.windows.len() % cycle) as f32 * metrics.cascade_step;
            config.margin = Some(Margin::new(offset, offset));
        }

        let id = self.next_id;
        self.next_id += 1;
        self.windows
            .insert(id, WindowChrome::new(id, config, metrics.clone()));
        self.z_order.push(id);
        debug!(window = id, "window created");
        id
    }

    /// Remove a window. Any gesture it holds is aborted; the event reports
    /// the capture it gave back.
    pub fn close(&mut self, id: WindowId) -> Option<(WindowChrome, Option<ChromeEvent>)> {
        let mut chrome = self.windows.remove(&id)?;
        let finished = chrome.force_detach();
        self.z_order.retain(|&wid| wid != id);
        if self.focused == Some(id) {
            self.focused = self.topmost_visible();
        }
        debug!(window = id, "window closed");
        Some((chrome, finished))
    }

    pub fn get(&self, id: WindowId) -> Option<&WindowChrome> {
        self.windows.get(&id)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut WindowChrome> {
        self.windows.get_mut(&id)
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    pub fn count(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Raise to the front and give focus. Reveals the window if hidden.
    pub fn focus(&mut self, id: WindowId) -> bool {
        let Some(chrome) = self.windows.get_mut(&id) else {
            return false;
        };
        chrome.set_visible(true);
        self.bring_to_front(id);
        self.focused = Some(id);
        true
    }

    fn bring_to_front(&mut self, id: WindowId) {
        self.z_order.retain(|&wid| wid != id);
        self.z_order.push(id);
    }

    /// Hide a window without closing it. Returns the capture release of an
    /// aborted gesture, if any.
    pub fn hide(&mut self, id: WindowId) -> Option<ChromeEvent> {
        let chrome = self.windows.get_mut(&id)?;
        let finished = chrome.set_visible(false);
        if self.focused == Some(id) {
            self.focused = None;
        }
        finished
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    /// Window IDs back to front
    pub fn z_order(&self) -> &[WindowId] {
        &self.z_order
    }

    /// Windows back to front
    pub fn windows_by_z(&self) -> Vec<&WindowChrome> {
        self.z_order
            .iter()
            .filter_map(|id| self.windows.get(id))
            .collect()
    }

    fn topmost_visible(&self) -> Option<WindowId> {
        self.z_order
            .iter()
            .rev()
            .copied()
            .find(|id| self.windows.get(id).is_some_and(WindowChrome::is_visible))
    }

    /// Topmost visible window whose bounds contain `point`
    pub fn window_at(&self, point: Vec2, container: Size) -> Option<WindowId> {
        self.z_order.iter().rev().copied().find(|id| {
            self.windows.get(id).is_some_and(|w| {
                w.is_visible() && w.actual_geometry(container).rect().contains(point)
            })
        })
    }

    /// The window currently performing a gesture, if any
    pub fn dragging(&self) -> Option<WindowId> {
        self.z_order
            .iter()
            .copied()
            .find(|id| self.windows.get(id).is_some_and(WindowChrome::is_dragging))
    }
}
