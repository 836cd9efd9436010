use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DesktopResult;

/// Target that matches every element type
pub const ANY_TARGET: &str = "*";

/// Setter priority; higher wins when styles are merged
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Importance(pub i32);

/// One property assignment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Setter {
    pub property: String,
    pub value: Value,
    #[serde(default)]
    pub importance: Importance,
}

impl Setter {
    pub fn new(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            importance: Importance::default(),
        }
    }

    pub fn with_importance(mut self, importance: i32) -> Self {
        self.importance = Importance(importance);
        self
    }
}

/// Named set of setters for one target type
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Element type the style applies to, or [`ANY_TARGET`]
    pub target: String,
    pub setters: Vec<Setter>,
}

impl Style {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            setters: Vec::new(),
        }
    }

    pub fn with(mut self, setter: Setter) -> Self {
        self.setters.push(setter);
        self
    }
}

/// Styles keyed by `"<Target>.<name>"`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleDictionary {
    styles: BTreeMap<String, Style>,
}

impl StyleDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object mapping keys to styles
    pub fn from_json(json: &str) -> DesktopResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add a style under `name`. A style already registered under the same
    /// target and name is replaced.
    pub fn insert(&mut self, name: &str, style: Style) {
        let key = format!("{}.{}", style.target, name);
        self.styles.insert(key, style);
    }

    pub fn with(mut self, name: &str, style: Style) -> Self {
        self.insert(name, style);
        self
    }

    /// Style registered for exactly this target and name
    pub fn get(&self, target: &str, name: &str) -> Option<&Style> {
        self.styles.get(&format!("{}.{}", target, name))
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites_silently() {
        let mut dict = StyleDictionary::new();
        dict.insert("accent", Style::new("Button").with(Setter::new("background", "red")));
        dict.insert("accent", Style::new("Button").with(Setter::new("background", "blue")));
        assert_eq!(dict.len(), 1);
        let style = dict.get("Button", "accent").unwrap();
        assert_eq!(style.setters[0].value, Value::from("blue"));
    }

    #[test]
    fn test_from_json() {
        let dict = StyleDictionary::from_json(
            r#"{
                "Button.accent": {
                    "target": "Button",
                    "setters": [
                        { "property": "background", "value": "red", "importance": 2 },
                        { "property": "padding", "value": 4 }
                    ]
                }
            }"#,
        )
        .unwrap();
        let style = dict.get("Button", "accent").unwrap();
        assert_eq!(style.setters[0].importance, Importance(2));
        assert_eq!(style.setters[1].importance, Importance(0));
        assert_eq!(style.setters[1].value, Value::from(4));
    }
}
