use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use serde_json::Value;
use tracing::trace;

use super::{Importance, StyleDictionary, ANY_TARGET};

/// Winning setter for one property
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedSetter {
    pub value: Value,
    pub importance: Importance,
}

/// Merged style for a combined name and target
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedStyle {
    /// Normalized combined name: sorted, deduplicated, space-separated
    pub name: String,
    pub target: String,
    pub setters: BTreeMap<String, ResolvedSetter>,
}

impl ResolvedStyle {
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.setters.get(property).map(|s| &s.value)
    }

    pub fn is_empty(&self) -> bool {
        self.setters.is_empty()
    }
}

/// Registered dictionaries plus a cache of resolved combinations
#[derive(Debug, Default)]
pub struct StyleContext {
    dictionaries: Vec<StyleDictionary>,
    cache: HashMap<(String, String), Rc<ResolvedStyle>>,
}

impl StyleContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dictionary. Earlier dictionaries win importance ties.
    pub fn register(&mut self, dictionary: StyleDictionary) {
        self.dictionaries.push(dictionary);
        self.cache.clear();
    }

    /// Drop every registered dictionary and all cached results
    pub fn clear(&mut self) {
        self.dictionaries.clear();
        self.cache.clear();
    }

    pub fn dictionary_count(&self) -> usize {
        self.dictionaries.len()
    }

    /// Resolve a space-separated list of style names for `target`.
    ///
    /// Returns `None` for an empty or blank list.
    pub fn resolve(&mut self, names: &str, target: &str) -> Option<Rc<ResolvedStyle>> {
        let mut names: Vec<&str> = names.split_whitespace().collect();
        if names.is_empty() {
            return None;
        }
        names.sort_unstable();
        names.dedup();
        let combined = names.join(" ");

        let key = (combined, target.to_string());
        if let Some(resolved) = self.cache.get(&key) {
            return Some(Rc::clone(resolved));
        }

        let resolved = Rc::new(self.build(&names, &key.0, target));
        trace!(style = %key.0, target, setters = resolved.setters.len(), "style resolved");
        self.cache.insert(key, Rc::clone(&resolved));
        Some(resolved)
    }

    fn build(&self, names: &[&str], combined: &str, target: &str) -> ResolvedStyle {
        let mut setters: BTreeMap<String, ResolvedSetter> = BTreeMap::new();

        for name in names {
            for dictionary in &self.dictionaries {
                let matches = [dictionary.get(target, name), dictionary.get(ANY_TARGET, name)];
                for style in matches.into_iter().flatten() {
                    for setter in &style.setters {
                        let wins = setters
                            .get(&setter.property)
                            .map_or(true, |current| setter.importance > current.importance);
                        if wins {
                            setters.insert(
                                setter.property.clone(),
                                ResolvedSetter {
                                    value: setter.value.clone(),
                                    importance: setter.importance,
                                },
                            );
                        }
                    }
                }
            }
        }

        ResolvedStyle {
            name: combined.to_string(),
            target: target.to_string(),
            setters,
        }
    }
}
