//! crates/match/src/pattern.rs
//! Late-bound pattern entries and pattern-list string helpers.

use std::path::MAIN_SEPARATOR;

use crate::glob::is_separator;
use crate::properties::PropertyResolver;

/// A pattern whose participation depends on property conditions.
///
/// The entry is active when the `if` property (if any) is set and the
/// `unless` property (if any) is not. An inactive entry, or one with empty
/// text, evaluates to nothing and contributes no pattern.
///
/// # Examples
///
/// ```
/// use matching::{NoProperties, Pattern};
/// use std::collections::HashMap;
///
/// let debug_only = Pattern::new("**/*.dbg").when_set("debug");
/// assert_eq!(debug_only.evaluate(&NoProperties), None);
///
/// let mut props = HashMap::new();
/// props.insert("debug".to_string(), "true".to_string());
/// assert_eq!(debug_only.evaluate(&props), Some("**/*.dbg"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pattern {
    text: String,
    if_property: Option<String>,
    unless_property: Option<String>,
}

impl Pattern {
    /// Creates an unconditional pattern.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            if_property: None,
            unless_property: None,
        }
    }

    /// Activates the pattern only while `property` is set.
    #[must_use]
    pub fn when_set(mut self, property: impl Into<String>) -> Self {
        self.if_property = Some(property.into());
        self
    }

    /// Deactivates the pattern while `property` is set.
    #[must_use]
    pub fn unless_set(mut self, property: impl Into<String>) -> Self {
        self.unless_property = Some(property.into());
        self
    }

    /// The raw pattern text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the property conditions currently hold.
    pub fn is_active(&self, properties: &dyn PropertyResolver) -> bool {
        let if_ok = self
            .if_property
            .as_deref()
            .is_none_or(|name| properties.property(name).is_some());
        let unless_ok = self
            .unless_property
            .as_deref()
            .is_none_or(|name| properties.property(name).is_none());
        if_ok && unless_ok
    }

    /// Returns the pattern text when active and non-empty.
    pub fn evaluate(&self, properties: &dyn PropertyResolver) -> Option<&str> {
        (!self.text.is_empty() && self.is_active(properties)).then_some(self.text.as_str())
    }
}

impl From<&str> for Pattern {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Pattern {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Splits a configuration string into patterns on commas and whitespace.
///
/// # Examples
///
/// ```
/// use matching::split_pattern_list;
///
/// let parts: Vec<_> = split_pattern_list("**/*.java, **/*.xml  docs/").collect();
/// assert_eq!(parts, ["**/*.java", "**/*.xml", "docs/"]);
/// ```
pub fn split_pattern_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
}

/// Rewrites both `/` and `\` to the host separator.
pub fn normalize_separators(path: &str) -> String {
    path.chars()
        .map(|c| if is_separator(c) { MAIN_SEPARATOR } else { c })
        .collect()
}

/// Normalizes separators and expands a trailing separator to `**`.
///
/// `build/` selects everything beneath `build`, so it becomes `build/**`.
///
/// # Examples
///
/// ```
/// use matching::normalize_pattern;
/// use std::path::MAIN_SEPARATOR;
///
/// assert_eq!(normalize_pattern("build/"), format!("build{MAIN_SEPARATOR}**"));
/// assert_eq!(normalize_pattern("a\\b"), format!("a{MAIN_SEPARATOR}b"));
/// ```
pub fn normalize_pattern(pattern: &str) -> String {
    let mut normalized = normalize_separators(pattern);
    if normalized.ends_with(MAIN_SEPARATOR) {
        normalized.push_str("**");
    }
    normalized
}
