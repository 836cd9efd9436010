//! Taskbar buttons for running instances

use serde::{Deserialize, Serialize};

use crate::types::{ButtonId, InstanceId, ModuleId};

/// One taskbar button
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskbarButton {
    pub id: ButtonId,
    pub instance: InstanceId,
    pub module: ModuleId,
    pub selected: bool,
}

/// Buttons in launch order. Buttons are appended and removed, never
/// reordered.
#[derive(Debug, Default)]
pub struct Taskbar {
    buttons: Vec<TaskbarButton>,
    next_id: ButtonId,
}

impl Taskbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, instance: InstanceId, module: ModuleId) -> ButtonId {
        let id = self.next_id;
        self.next_id += 1;
        self.buttons.push(TaskbarButton {
            id,
            instance,
            module,
            selected: false,
        });
        id
    }

    pub fn remove(&mut self, id: ButtonId) -> Option<TaskbarButton> {
        let index = self.buttons.iter().position(|b| b.id == id)?;
        Some(self.buttons.remove(index))
    }

    /// Select one button and deselect all others
    pub fn select(&mut self, id: ButtonId) {
        for button in &mut self.buttons {
            button.selected = button.id == id;
        }
    }

    pub fn deselect(&mut self, id: ButtonId) {
        if let Some(button) = self.buttons.iter_mut().find(|b| b.id == id) {
            button.selected = false;
        }
    }

    pub fn selected(&self) -> Option<&TaskbarButton> {
        self.buttons.iter().find(|b| b.selected)
    }

    pub fn buttons(&self) -> &[TaskbarButton] {
        &self.buttons
    }

    pub fn get(&self, id: ButtonId) -> Option<&TaskbarButton> {
        self.buttons.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}
