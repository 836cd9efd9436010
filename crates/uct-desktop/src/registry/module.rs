//! Launchable module definitions

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::{Content, ContentFactory};
use crate::error::{DesktopError, DesktopResult};
use crate::math::Margin;
use crate::types::ModuleId;
use crate::window::WindowConfig;

/// Initial window placement for a module's instances
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesiredGeometry {
    pub width: Option<f32>,
    pub height: Option<f32>,
    /// `None` cascades new windows
    pub margin: Option<Margin>,
    pub maximized: bool,
}

/// Describes a launchable application
#[derive(Clone)]
pub struct ModuleDefinition {
    pub name: String,
    /// Icon template key, resolved by the host
    pub icon: Option<String>,
    /// Maximum concurrent instances; 0 is unlimited
    pub max_instances: u32,
    pub geometry: DesiredGeometry,
    factory: Rc<dyn ContentFactory>,
}

impl fmt::Debug for ModuleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleDefinition")
            .field("name", &self.name)
            .field("icon", &self.icon)
            .field("max_instances", &self.max_instances)
            .field("geometry", &self.geometry)
            .finish_non_exhaustive()
    }
}

impl ModuleDefinition {
    pub fn new(name: impl Into<String>, factory: impl ContentFactory + 'static) -> Self {
        Self {
            name: name.into(),
            icon: None,
            max_instances: 0,
            geometry: DesiredGeometry::default(),
            factory: Rc::new(factory),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_max_instances(mut self, max: u32) -> Self {
        self.max_instances = max;
        self
    }

    pub fn with_geometry(mut self, geometry: DesiredGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Run the content factory
    pub fn create_content(&self) -> Option<Content> {
        self.factory.create()
    }

    /// Whether `running` instances already reach the cap
    pub fn is_at_capacity(&self, running: usize) -> bool {
        self.max_instances != 0 && running >= self.max_instances as usize
    }

    /// Window configuration for a new instance
    pub fn window_config(&self) -> WindowConfig {
        WindowConfig {
            title: self.name.clone(),
            icon: self.icon.clone(),
            width: self.geometry.width,
            height: self.geometry.height,
            margin: self.geometry.margin,
            maximized: self.geometry.maximized,
        }
    }
}

/// Registered module definitions, addressed by [`ModuleId`]
#[derive(Debug, Default)]
pub struct ModuleCatalog {
    modules: Vec<ModuleDefinition>,
}

impl ModuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, definition: ModuleDefinition) -> ModuleId {
        self.modules.push(definition);
        (self.modules.len() - 1) as ModuleId
    }

    pub fn get(&self, id: ModuleId) -> DesktopResult<&ModuleDefinition> {
        self.modules
            .get(id as usize)
            .ok_or(DesktopError::ModuleNotFound(id))
    }

    /// First module registered under `name`
    pub fn find(&self, name: &str) -> Option<ModuleId> {
        self.modules
            .iter()
            .position(|m| m.name == name)
            .map(|i| i as ModuleId)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModuleId, &ModuleDefinition)> {
        self.modules
            .iter()
            .enumerate()
            .map(|(i, m)| (i as ModuleId, m))
    }
}
