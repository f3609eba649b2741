//! crates/match/src/properties.rs
//! Property lookup used by late-bound patterns and list-file substitution.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Resolves a property name to its current value.
pub trait PropertyResolver {
    /// Returns the value bound to `key`, if any.
    fn property(&self, key: &str) -> Option<String>;
}

impl<T: PropertyResolver + ?Sized> PropertyResolver for &T {
    fn property(&self, key: &str) -> Option<String> {
        (**self).property(key)
    }
}

impl<S: BuildHasher> PropertyResolver for HashMap<String, String, S> {
    fn property(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl PropertyResolver for BTreeMap<String, String> {
    fn property(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Resolver with no properties at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProperties;

impl PropertyResolver for NoProperties {
    fn property(&self, _key: &str) -> Option<String> {
        None
    }
}

/// Replaces `${name}` references in `text` with property values.
///
/// Unknown properties and an unterminated `${` are left verbatim, and `$$`
/// collapses to a single `$`.
///
/// # Examples
///
/// ```
/// use matching::substitute_properties;
/// use std::collections::HashMap;
///
/// let mut props = HashMap::new();
/// props.insert("module".to_string(), "core".to_string());
///
/// assert_eq!(substitute_properties("${module}/**/*.rs", &props), "core/**/*.rs");
/// assert_eq!(substitute_properties("${missing}/x", &props), "${missing}/x");
/// assert_eq!(substitute_properties("cost$$", &props), "cost$");
/// ```
pub fn substitute_properties(text: &str, resolver: &dyn PropertyResolver) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(dollar) = rest.find('$') {
        out.push_str(&rest[..dollar]);
        let tail = &rest[dollar..];

        if let Some(after) = tail.strip_prefix("$$") {
            out.push('$');
            rest = after;
        } else if let Some(body) = tail.strip_prefix("${") {
            let Some(close) = body.find('}') else {
                out.push_str(tail);
                return out;
            };
            let name = &body[..close];
            match resolver.property(name) {
                Some(value) => out.push_str(&value),
                None => out.push_str(&tail[..close + 3]),
            }
            rest = &body[close + 1..];
        } else {
            out.push('$');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}
