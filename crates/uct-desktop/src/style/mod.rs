//! Combined style resolution
//!
//! Styles are registered in dictionaries under keys of the form
//! `"<Target>.<name>"`. An element asks for a space-separated list of style
//! names, e.g. `"accent rounded"`, and receives the merged setters of every
//! matching style. When several styles set the same property, the setter
//! with the highest importance wins.
//!
//! There is no global registry: callers construct a [`StyleContext`], pass
//! it to whatever needs styling, and call [`StyleContext::clear`] to drop
//! everything registered so far.

mod context;
mod dictionary;

pub use context::{ResolvedSetter, ResolvedStyle, StyleContext};
pub use dictionary::{Importance, Setter, Style, StyleDictionary, ANY_TARGET};
