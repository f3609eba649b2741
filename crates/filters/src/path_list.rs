use std::path::{Path, PathBuf};

use logging::{debug_log, info_log};
use matching::{normalize_separators, substitute_properties};
use rustc_hash::FxHashSet;

use crate::context::Context;
use crate::error::ConfigError;
use crate::file_set::FileSet;
use crate::registry::{DataType, RefId};
use crate::trace;

/// Separator placed between entries by [`PathList::to_display_string`].
pub const PATH_LIST_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// One element of a [`PathList`].
#[derive(Clone, Debug)]
pub enum PathElement {
    /// A single location, relative to the base directory or absolute.
    Location(PathBuf),
    /// A `:` or `;` separated list of locations, tokenized at resolution.
    PathString(String),
    /// Another list, expanded in place.
    Nested(PathList),
    /// The included files of a file set, in scan order.
    FileSet(FileSet),
    /// A registered path list or file set.
    Reference(RefId),
}

/// Ordered list of locations, de-duplicated on resolution.
///
/// The first occurrence of a location keeps its position; later duplicates
/// contribute nothing.
///
/// # Examples
///
/// ```
/// use filters::{Context, PathList, Registry};
/// use std::path::Path;
///
/// let registry = Registry::new();
/// let context = Context::new(&registry, Path::new("/work"));
///
/// let mut list = PathList::new();
/// list.add_literal("lib/a.jar");
/// list.add_path_string("lib/b.jar:lib/a.jar");
/// if cfg!(unix) {
///     assert_eq!(
///         list.to_display_string(&context).unwrap(),
///         "/work/lib/a.jar:/work/lib/b.jar"
///     );
/// }
/// ```
#[derive(Clone, Debug, Default)]
pub struct PathList {
    elements: Vec<PathElement>,
}

impl PathList {
    /// Kind name used in diagnostics.
    pub const KIND: &'static str = "path";

    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a single location.
    pub fn add_literal(&mut self, location: impl Into<PathBuf>) {
        self.elements.push(PathElement::Location(location.into()));
    }

    /// Appends a `:` or `;` separated list of locations.
    pub fn add_path_string(&mut self, list: impl Into<String>) {
        self.elements.push(PathElement::PathString(list.into()));
    }

    /// Appends another list.
    pub fn add_nested(&mut self, list: PathList) {
        self.elements.push(PathElement::Nested(list));
    }

    /// Appends the included files of a file set.
    pub fn add_file_set(&mut self, set: FileSet) {
        self.elements.push(PathElement::FileSet(set));
    }

    /// Appends a registered path list or file set.
    pub fn add_reference(&mut self, id: impl Into<RefId>) {
        self.elements.push(PathElement::Reference(id.into()));
    }

    /// Appends the resolved entries of `other` that exist on disk.
    ///
    /// # Errors
    ///
    /// Any failure resolving `other`.
    pub fn add_existing(&mut self, other: &PathList, context: &Context<'_>) -> Result<(), ConfigError> {
        for entry in other.resolve(context)? {
            let path = PathBuf::from(&entry);
            if path.exists() {
                self.elements.push(PathElement::Location(path));
            } else {
                info_log!(Path, 1, "dropping {} from path as it doesn't exist", entry);
            }
        }
        Ok(())
    }

    /// The elements in insertion order.
    #[must_use]
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// Number of elements, before expansion.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether no element was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Expands every element to absolute locations.
    ///
    /// # Errors
    ///
    /// Reference failures and any failure scanning a file set.
    pub fn resolve(&self, context: &Context<'_>) -> Result<Vec<String>, ConfigError> {
        let mut resolved = Resolved::default();
        self.expand_into(&mut resolved, context)?;
        debug_log!(Path, 1, "path resolved to {} entries", resolved.entries.len());
        Ok(resolved.entries)
    }

    /// Resolved entries joined with [`PATH_LIST_SEPARATOR`]; an empty list
    /// gives an empty string.
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub fn to_display_string(&self, context: &Context<'_>) -> Result<String, ConfigError> {
        let separator = PATH_LIST_SEPARATOR.to_string();
        Ok(self.resolve(context)?.join(separator.as_str()))
    }

    fn expand_into(&self, resolved: &mut Resolved, context: &Context<'_>) -> Result<(), ConfigError> {
        for element in &self.elements {
            match element {
                PathElement::Location(location) => {
                    resolved.push_location(location, context);
                }
                PathElement::PathString(list) => {
                    let list = substitute_properties(list, context.properties());
                    for token in split_path_list(&list) {
                        resolved.push_location(Path::new(&token), context);
                    }
                }
                PathElement::Nested(list) => list.expand_into(resolved, context)?,
                PathElement::FileSet(set) => {
                    for path in set.included_paths(context)? {
                        resolved.push_path(&path);
                    }
                }
                PathElement::Reference(id) => {
                    trace::reference_followed(id, Self::KIND);
                    match context.registry().resolve(id)? {
                        DataType::Path(list) => list.expand_into(resolved, context)?,
                        DataType::FileSet(set) => {
                            for path in set.included_paths(context)? {
                                resolved.push_path(&path);
                            }
                        }
                        other => {
                            return Err(ConfigError::ReferenceTypeMismatch {
                                id: id.clone(),
                                expected: Self::KIND,
                                found: other.kind_name(),
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub(crate) fn references(&self) -> Vec<&RefId> {
        self.elements
            .iter()
            .flat_map(|element| match element {
                PathElement::Reference(id) => vec![id],
                PathElement::Nested(list) => list.references(),
                PathElement::FileSet(set) => set.references(),
                PathElement::Location(_) | PathElement::PathString(_) => Vec::new(),
            })
            .collect()
    }
}

#[derive(Default)]
struct Resolved {
    entries: Vec<String>,
    seen: FxHashSet<String>,
}

impl Resolved {
    fn push_location(&mut self, location: &Path, context: &Context<'_>) {
        let normalized = normalize_separators(&location.to_string_lossy());
        let absolute = context.resolve_path(Path::new(&normalized));
        self.push_path(&absolute);
    }

    fn push_path(&mut self, path: &Path) {
        let entry = normalize_separators(&path.to_string_lossy());
        if self.seen.insert(entry.clone()) {
            self.entries.push(entry);
        } else {
            debug_log!(Path, 2, "dropping duplicate path entry {}", entry);
        }
    }
}

/// Splits a path-list string at `:` and `;`.
///
/// A single ASCII letter followed by `:` and a separator is kept together as
/// a drive prefix. Empty tokens are dropped.
#[must_use]
pub fn split_path_list(list: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = list.chars().peekable();
    while let Some(ch) = chars.next() {
        let splits = match ch {
            ';' => true,
            ':' => {
                let drive = is_drive_letter(&current)
                    && chars.peek().is_some_and(|next| matches!(next, '/' | '\\'));
                !drive
            }
            _ => false,
        };
        if splits {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn is_drive_letter(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() == 1 && bytes[0].is_ascii_alphabetic()
}
