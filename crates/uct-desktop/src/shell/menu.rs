//! Hierarchical start menu
//!
//! Items live in an arena addressed by [`MenuItemId`]; parents hold child
//! ids and children hold their parent id. A click on a leaf bubbles up the
//! parent chain to the shell, which launches the module. A click on a group
//! only toggles its expansion.

use serde::{Deserialize, Serialize};

use crate::config::ShellMetrics;
use crate::error::{DesktopError, DesktopResult};
use crate::types::{MenuItemId, ModuleId};

/// Icon key shown for any item that has children
pub const GROUP_ICON: &str = "menu-group";

/// One menu entry
#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem {
    pub label: String,
    pub icon: Option<String>,
    /// Module launched by a click; ignored once the item has children
    pub module: Option<ModuleId>,
    parent: Option<MenuItemId>,
    children: Vec<MenuItemId>,
    expanded: bool,
}

impl MenuItem {
    /// An item with children, or without a module, is a group
    pub fn is_group(&self) -> bool {
        !self.children.is_empty() || self.module.is_none()
    }

    pub fn parent(&self) -> Option<MenuItemId> {
        self.parent
    }

    pub fn children(&self) -> &[MenuItemId] {
        &self.children
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Icon to display: groups always show the group icon
    pub fn display_icon(&self) -> Option<&str> {
        if self.is_group() {
            Some(GROUP_ICON)
        } else {
            self.icon.as_deref()
        }
    }
}

/// Outcome of clicking a menu item
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuClick {
    /// A leaf was clicked. `path` lists the leaf followed by every ancestor
    /// the notification bubbled through, root last.
    Module {
        module: ModuleId,
        path: Vec<MenuItemId>,
    },
    /// A group was clicked and its expansion toggled
    Toggled { item: MenuItemId, expanded: bool },
}

/// A row of the flattened, visible menu
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenuRow {
    pub item: MenuItemId,
    pub depth: u32,
    /// Horizontal indent from the menu's left edge
    pub indent: f32,
    /// Top of the row relative to the menu's top edge
    pub offset: f32,
}

/// Arena of menu items
#[derive(Clone, Debug, Default)]
pub struct MenuTree {
    items: Vec<Option<MenuItem>>,
    roots: Vec<MenuItemId>,
}

impl MenuTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: MenuItemId) -> DesktopResult<&MenuItem> {
        self.items
            .get(id as usize)
            .and_then(Option::as_ref)
            .ok_or(DesktopError::MenuItemNotFound(id))
    }

    fn get_mut(&mut self, id: MenuItemId) -> DesktopResult<&mut MenuItem> {
        self.items
            .get_mut(id as usize)
            .and_then(Option::as_mut)
            .ok_or(DesktopError::MenuItemNotFound(id))
    }

    /// Top-level items in order
    pub fn roots(&self) -> &[MenuItemId] {
        &self.roots
    }

    fn insert(&mut self, parent: Option<MenuItemId>, item: MenuItem) -> DesktopResult<MenuItemId> {
        if let Some(parent) = parent {
            self.get(parent)?;
        }
        let id = self.items.len() as MenuItemId;
        self.items.push(Some(item));
        match parent {
            Some(parent) => self.get_mut(parent)?.children.push(id),
            None => self.roots.push(id),
        }
        Ok(id)
    }

    /// Append a leaf that launches `module`
    pub fn add_leaf(
        &mut self,
        parent: Option<MenuItemId>,
        label: impl Into<String>,
        icon: Option<String>,
        module: ModuleId,
    ) -> DesktopResult<MenuItemId> {
        self.insert(
            parent,
            MenuItem {
                label: label.into(),
                icon,
                module: Some(module),
                parent,
                children: Vec::new(),
                expanded: false,
            },
        )
    }

    /// Append a collapsed group
    pub fn add_group(
        &mut self,
        parent: Option<MenuItemId>,
        label: impl Into<String>,
    ) -> DesktopResult<MenuItemId> {
        self.insert(
            parent,
            MenuItem {
                label: label.into(),
                icon: None,
                module: None,
                parent,
                children: Vec::new(),
                expanded: false,
            },
        )
    }

    /// Remove an item and its whole subtree
    pub fn remove(&mut self, id: MenuItemId) -> DesktopResult<()> {
        let parent = self.get(id)?.parent;
        match parent {
            Some(parent) => self.get_mut(parent)?.children.retain(|&c| c != id),
            None => self.roots.retain(|&r| r != id),
        }

        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(item) = self.items.get_mut(next as usize).and_then(Option::take) {
                pending.extend(item.children);
            }
        }
        Ok(())
    }

    pub fn set_expanded(&mut self, id: MenuItemId, expanded: bool) -> DesktopResult<()> {
        self.get_mut(id)?.expanded = expanded;
        Ok(())
    }

    pub fn collapse_all(&mut self) {
        for item in self.items.iter_mut().flatten() {
            item.expanded = false;
        }
    }

    /// Click an item: toggle a group, or bubble a leaf's module up to the
    /// root
    pub fn click(&mut self, id: MenuItemId) -> DesktopResult<MenuClick> {
        let item = self.get_mut(id)?;
        let module = match item.module {
            Some(module) if item.children.is_empty() => module,
            _ => {
                item.expanded = !item.expanded;
                return Ok(MenuClick::Toggled {
                    item: id,
                    expanded: item.expanded,
                });
            }
        };

        let mut path = vec![id];
        let mut current = self.get(id)?.parent;
        while let Some(ancestor) = current {
            path.push(ancestor);
            current = self.get(ancestor)?.parent;
        }
        Ok(MenuClick::Module { module, path })
    }

    /// Flatten the tree into visible rows: collapsed groups hide their
    /// descendants
    pub fn visible_rows(&self, metrics: &ShellMetrics) -> Vec<MenuRow> {
        let mut rows = Vec::new();
        let mut stack: Vec<(MenuItemId, u32)> =
            self.roots.iter().rev().map(|&id| (id, 0)).collect();

        while let Some((id, depth)) = stack.pop() {
            let Ok(item) = self.get(id) else {
                continue;
            };
            rows.push(MenuRow {
                item: id,
                depth,
                indent: depth as f32 * metrics.submenu_inset,
                offset: rows.len() as f32 * metrics.menu_row_height,
            });
            if item.expanded {
                stack.extend(item.children.iter().rev().map(|&c| (c, depth + 1)));
            }
        }
        rows
    }
}
