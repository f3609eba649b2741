use std::cell::RefCell;
use std::fmt;

use logging::debug_log;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::ConfigError;
use crate::file_set::FileSet;
use crate::path_list::PathList;
use crate::pattern_set::PatternSet;
use crate::trace;

/// Name under which a data type is registered.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RefId(String);

impl RefId {
    /// Wraps a reference name.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The reference name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RefId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RefId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A value that can be registered and referenced by id.
#[derive(Clone, Debug)]
pub enum DataType {
    /// A pattern set.
    PatternSet(PatternSet),
    /// A file set.
    FileSet(FileSet),
    /// A path list.
    Path(PathList),
}

impl DataType {
    /// Kind name used in diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::PatternSet(_) => PatternSet::KIND,
            Self::FileSet(_) => FileSet::KIND,
            Self::Path(_) => PathList::KIND,
        }
    }

    fn references(&self) -> Vec<&RefId> {
        match self {
            Self::PatternSet(set) => set.references(),
            Self::FileSet(set) => set.references(),
            Self::Path(list) => list.references(),
        }
    }
}

impl From<PatternSet> for DataType {
    fn from(set: PatternSet) -> Self {
        Self::PatternSet(set)
    }
}

impl From<FileSet> for DataType {
    fn from(set: FileSet) -> Self {
        Self::FileSet(set)
    }
}

impl From<PathList> for DataType {
    fn from(list: PathList) -> Self {
        Self::Path(list)
    }
}

enum Step<'a> {
    Enter(&'a RefId),
    Exit(&'a RefId),
}

/// Table of named data types.
///
/// Lookups of a reference first verify that following references from it
/// never revisits an id. Ids that passed the check are remembered until the
/// table changes.
#[derive(Debug, Default)]
pub struct Registry {
    entries: FxHashMap<RefId, DataType>,
    checked: RefCell<FxHashSet<RefId>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `value` under `id`, replacing any previous value.
    pub fn insert(&mut self, id: impl Into<RefId>, value: impl Into<DataType>) -> Option<DataType> {
        self.checked.get_mut().clear();
        self.entries.insert(id.into(), value.into())
    }

    /// Removes the value registered under `id`.
    pub fn remove(&mut self, id: &RefId) -> Option<DataType> {
        self.checked.get_mut().clear();
        self.entries.remove(id)
    }

    /// Raw lookup without any checks.
    #[must_use]
    pub fn get(&self, id: &RefId) -> Option<&DataType> {
        self.entries.get(id)
    }

    /// Number of registered values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Verifies that the references reachable from `id` form no cycle and
    /// all exist.
    ///
    /// # Errors
    ///
    /// [`ConfigError::CircularReference`] naming the cycle, or
    /// [`ConfigError::UnknownReference`] for a dangling id.
    pub fn check(&self, id: &RefId) -> Result<(), ConfigError> {
        if self.checked.borrow().contains(id) {
            return Ok(());
        }

        let mut chain: Vec<&RefId> = Vec::new();
        let mut on_chain: FxHashSet<&RefId> = FxHashSet::default();
        let mut done: FxHashSet<&RefId> = FxHashSet::default();
        let mut stack = vec![Step::Enter(id)];

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(current) => {
                    if done.contains(current) || self.checked.borrow().contains(current) {
                        continue;
                    }
                    if on_chain.contains(current) {
                        let start = chain.iter().position(|id| *id == current).unwrap_or(0);
                        let mut cycle: Vec<&str> =
                            chain[start..].iter().map(|id| id.as_str()).collect();
                        cycle.push(current.as_str());
                        let chain = cycle.join(" -> ");
                        debug_log!(Refs, 1, "circular reference: {}", chain);
                        return Err(ConfigError::CircularReference { chain });
                    }
                    let value = self
                        .entries
                        .get(current)
                        .ok_or_else(|| ConfigError::UnknownReference { id: current.clone() })?;

                    chain.push(current);
                    on_chain.insert(current);
                    stack.push(Step::Exit(current));
                    for child in value.references().into_iter().rev() {
                        stack.push(Step::Enter(child));
                    }
                }
                Step::Exit(current) => {
                    chain.pop();
                    on_chain.remove(current);
                    done.insert(current);
                }
            }
        }

        debug_log!(Refs, 2, "{} references checked from {}", done.len(), id);
        trace::references_checked(id, done.len());
        self.checked
            .borrow_mut()
            .extend(done.into_iter().cloned());
        Ok(())
    }

    /// Checks and returns the value registered under `id`.
    ///
    /// # Errors
    ///
    /// See [`check`](Self::check).
    pub fn resolve(&self, id: &RefId) -> Result<&DataType, ConfigError> {
        self.check(id)?;
        self.entries
            .get(id)
            .ok_or_else(|| ConfigError::UnknownReference { id: id.clone() })
    }

    fn mismatch(id: &RefId, expected: &'static str, found: &DataType) -> ConfigError {
        ConfigError::ReferenceTypeMismatch {
            id: id.clone(),
            expected,
            found: found.kind_name(),
        }
    }

    /// Resolves `id` as a pattern set.
    ///
    /// # Errors
    ///
    /// Cycle and lookup failures, or a value of another kind.
    pub fn pattern_set(&self, id: &RefId) -> Result<&PatternSet, ConfigError> {
        match self.resolve(id)? {
            DataType::PatternSet(set) => Ok(set),
            other => Err(Self::mismatch(id, PatternSet::KIND, other)),
        }
    }

    /// Resolves `id` as a file set.
    ///
    /// # Errors
    ///
    /// Cycle and lookup failures, or a value of another kind.
    pub fn file_set(&self, id: &RefId) -> Result<&FileSet, ConfigError> {
        match self.resolve(id)? {
            DataType::FileSet(set) => Ok(set),
            other => Err(Self::mismatch(id, FileSet::KIND, other)),
        }
    }

    /// Resolves `id` as a path list.
    ///
    /// # Errors
    ///
    /// Cycle and lookup failures, or a value of another kind.
    pub fn path_list(&self, id: &RefId) -> Result<&PathList, ConfigError> {
        match self.resolve(id)? {
            DataType::Path(list) => Ok(list),
            other => Err(Self::mismatch(id, PathList::KIND, other)),
        }
    }

    #[cfg(test)]
    pub(crate) fn checked_count(&self) -> usize {
        self.checked.borrow().len()
    }
}
