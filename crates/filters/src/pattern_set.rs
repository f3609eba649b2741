use std::cell::OnceCell;
use std::fs;
use std::io;
use std::path::Path;

use logging::debug_log;
use matching::{Pattern, split_pattern_list, substitute_properties};

use crate::context::Context;
use crate::error::{ConfigError, ListKind};
use crate::registry::RefId;
use crate::trace;

/// Entries read from include and exclude list files.
#[derive(Clone, Debug, Default)]
struct ListContents {
    includes: Vec<Pattern>,
    excludes: Vec<Pattern>,
}

/// The patterns of an owned pattern set.
///
/// List files are read on first resolution and cached. Any later change
/// folds the cached entries into the plain lists, so each file is read at
/// most once.
#[derive(Clone, Debug, Default)]
pub struct PatternLists {
    includes: Vec<Pattern>,
    excludes: Vec<Pattern>,
    include_files: Vec<Pattern>,
    exclude_files: Vec<Pattern>,
    loaded: OnceCell<ListContents>,
}

impl PatternLists {
    /// Creates empty lists.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn fold_loaded(&mut self) {
        if let Some(contents) = self.loaded.take() {
            self.includes.extend(contents.includes);
            self.excludes.extend(contents.excludes);
            self.include_files.clear();
            self.exclude_files.clear();
        }
    }

    /// Appends every pattern of a comma or whitespace separated list to the
    /// includes.
    pub fn add_includes(&mut self, list: &str) {
        self.fold_loaded();
        self.includes
            .extend(split_pattern_list(list).map(Pattern::from));
    }

    /// Appends every pattern of a comma or whitespace separated list to the
    /// excludes.
    pub fn add_excludes(&mut self, list: &str) {
        self.fold_loaded();
        self.excludes
            .extend(split_pattern_list(list).map(Pattern::from));
    }

    /// Appends one include entry.
    pub fn add_include(&mut self, pattern: impl Into<Pattern>) {
        self.fold_loaded();
        self.includes.push(pattern.into());
    }

    /// Appends one exclude entry.
    pub fn add_exclude(&mut self, pattern: impl Into<Pattern>) {
        self.fold_loaded();
        self.excludes.push(pattern.into());
    }

    /// Adds a file holding one include pattern per line. The entry's text
    /// names the file and its conditions decide whether it is read.
    pub fn add_includes_file(&mut self, file: impl Into<Pattern>) {
        self.fold_loaded();
        self.include_files.push(file.into());
    }

    /// Adds a file holding one exclude pattern per line.
    pub fn add_excludes_file(&mut self, file: impl Into<Pattern>) {
        self.fold_loaded();
        self.exclude_files.push(file.into());
    }

    /// Whether any entry or list file was configured.
    #[must_use]
    pub fn has_patterns(&self) -> bool {
        !(self.includes.is_empty()
            && self.excludes.is_empty()
            && self.include_files.is_empty()
            && self.exclude_files.is_empty()
            && self.loaded.get().is_none_or(|contents| {
                contents.includes.is_empty() && contents.excludes.is_empty()
            }))
    }

    fn loaded(&self, context: &Context<'_>) -> Result<&ListContents, ConfigError> {
        if let Some(contents) = self.loaded.get() {
            return Ok(contents);
        }
        let contents = ListContents {
            includes: read_list_files(&self.include_files, ListKind::Includes, context)?,
            excludes: read_list_files(&self.exclude_files, ListKind::Excludes, context)?,
        };
        Ok(self.loaded.get_or_init(|| contents))
    }

    /// Active include patterns, list-file entries last.
    ///
    /// # Errors
    ///
    /// A missing or unreadable list file.
    pub fn include_patterns(&self, context: &Context<'_>) -> Result<Vec<String>, ConfigError> {
        let loaded = self.loaded(context)?;
        Ok(evaluate(self.includes.iter().chain(&loaded.includes), context))
    }

    /// Active exclude patterns, list-file entries last.
    ///
    /// # Errors
    ///
    /// A missing or unreadable list file.
    pub fn exclude_patterns(&self, context: &Context<'_>) -> Result<Vec<String>, ConfigError> {
        let loaded = self.loaded(context)?;
        Ok(evaluate(self.excludes.iter().chain(&loaded.excludes), context))
    }
}

fn evaluate<'p>(patterns: impl Iterator<Item = &'p Pattern>, context: &Context<'_>) -> Vec<String> {
    patterns
        .filter_map(|pattern| pattern.evaluate(context.properties()))
        .map(str::to_owned)
        .collect()
}

fn read_list_files(
    files: &[Pattern],
    kind: ListKind,
    context: &Context<'_>,
) -> Result<Vec<Pattern>, ConfigError> {
    let mut patterns = Vec::new();
    for file in files {
        let Some(name) = file.evaluate(context.properties()) else {
            continue;
        };
        let path = context.resolve_path(Path::new(name));
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::MissingListFile { kind, path });
            }
            Err(source) => return Err(ConfigError::ReadListFile { path, source }),
        };
        let before = patterns.len();
        patterns.extend(
            text.lines()
                .filter(|line| !line.is_empty())
                .map(|line| Pattern::new(substitute_properties(line, context.properties()))),
        );
        debug_log!(
            Select,
            1,
            "read {} patterns from {}",
            patterns.len() - before,
            path.display()
        );
    }
    Ok(patterns)
}

/// A named collection of include and exclude patterns, or a reference to
/// one.
///
/// # Examples
///
/// ```
/// use filters::{Context, PatternSet, Registry};
/// use std::path::Path;
///
/// let mut registry = Registry::new();
/// let mut sources = PatternSet::new();
/// sources.set_includes("**/*.rs, **/*.toml").unwrap();
/// sources.set_excludes("target/").unwrap();
/// registry.insert("sources", sources);
///
/// let alias = PatternSet::reference("sources");
/// let context = Context::new(&registry, Path::new("."));
/// assert_eq!(alias.include_patterns(&context).unwrap(), ["**/*.rs", "**/*.toml"]);
/// ```
#[derive(Clone, Debug)]
pub enum PatternSet {
    /// Patterns held by this value.
    Owned(PatternLists),
    /// Patterns held by the registered set with this id.
    Reference(RefId),
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::Owned(PatternLists::default())
    }
}

impl PatternSet {
    /// Kind name used in diagnostics.
    pub const KIND: &'static str = "patternset";

    /// Creates an empty owned set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reference to the set registered under `id`.
    #[must_use]
    pub fn reference(id: impl Into<RefId>) -> Self {
        Self::Reference(id.into())
    }

    /// Whether this value is a reference.
    #[must_use]
    pub const fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }

    fn lists_mut(&mut self) -> Result<&mut PatternLists, ConfigError> {
        match self {
            Self::Owned(lists) => Ok(lists),
            Self::Reference(id) => Err(ConfigError::NotAllowedOnReference { id: id.clone() }),
        }
    }

    /// Adds include patterns from a comma or whitespace separated list.
    /// Repeated calls accumulate.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotAllowedOnReference`] on a reference.
    pub fn set_includes(&mut self, list: &str) -> Result<(), ConfigError> {
        self.lists_mut()?.add_includes(list);
        Ok(())
    }

    /// Adds exclude patterns from a comma or whitespace separated list.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotAllowedOnReference`] on a reference.
    pub fn set_excludes(&mut self, list: &str) -> Result<(), ConfigError> {
        self.lists_mut()?.add_excludes(list);
        Ok(())
    }

    /// Adds one include entry.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotAllowedOnReference`] on a reference.
    pub fn add_include(&mut self, pattern: impl Into<Pattern>) -> Result<(), ConfigError> {
        self.lists_mut()?.add_include(pattern);
        Ok(())
    }

    /// Adds one exclude entry.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotAllowedOnReference`] on a reference.
    pub fn add_exclude(&mut self, pattern: impl Into<Pattern>) -> Result<(), ConfigError> {
        self.lists_mut()?.add_exclude(pattern);
        Ok(())
    }

    /// Adds an includes list file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotAllowedOnReference`] on a reference.
    pub fn add_includes_file(&mut self, file: impl Into<Pattern>) -> Result<(), ConfigError> {
        self.lists_mut()?.add_includes_file(file);
        Ok(())
    }

    /// Adds an excludes list file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotAllowedOnReference`] on a reference.
    pub fn add_excludes_file(&mut self, file: impl Into<Pattern>) -> Result<(), ConfigError> {
        self.lists_mut()?.add_excludes_file(file);
        Ok(())
    }

    /// Turns this value into a reference.
    ///
    /// # Errors
    ///
    /// [`ConfigError::TooManyAttributes`] when patterns were already added.
    pub fn set_refid(&mut self, id: impl Into<RefId>) -> Result<(), ConfigError> {
        if let Self::Owned(lists) = self {
            if lists.has_patterns() {
                return Err(ConfigError::TooManyAttributes);
            }
        }
        *self = Self::Reference(id.into());
        Ok(())
    }

    /// Copies the resolved patterns of `other` onto the end of this set.
    ///
    /// # Errors
    ///
    /// [`ConfigError::AppendToReference`] on a reference, or any failure
    /// resolving `other`.
    pub fn append(&mut self, other: &PatternSet, context: &Context<'_>) -> Result<(), ConfigError> {
        if let Self::Reference(id) = self {
            return Err(ConfigError::AppendToReference { id: id.clone() });
        }
        let includes = other.include_patterns(context)?;
        let excludes = other.exclude_patterns(context)?;
        let lists = self.lists_mut()?;
        for pattern in includes {
            lists.add_include(pattern);
        }
        for pattern in excludes {
            lists.add_exclude(pattern);
        }
        Ok(())
    }

    /// Follows references to the owned lists.
    ///
    /// # Errors
    ///
    /// Cycle, lookup and kind failures from the registry.
    pub fn lists<'c>(&'c self, context: &Context<'c>) -> Result<&'c PatternLists, ConfigError> {
        match self {
            Self::Owned(lists) => Ok(lists),
            Self::Reference(id) => {
                trace::reference_followed(id, Self::KIND);
                debug_log!(Refs, 2, "following patternset reference {}", id);
                context.registry().pattern_set(id)?.lists(context)
            }
        }
    }

    /// Whether the resolved set has any entries or list files.
    ///
    /// # Errors
    ///
    /// See [`lists`](Self::lists).
    pub fn has_patterns(&self, context: &Context<'_>) -> Result<bool, ConfigError> {
        Ok(self.lists(context)?.has_patterns())
    }

    /// Active include patterns of the resolved set.
    ///
    /// # Errors
    ///
    /// Reference failures and list-file failures.
    pub fn include_patterns(&self, context: &Context<'_>) -> Result<Vec<String>, ConfigError> {
        self.lists(context)?.include_patterns(context)
    }

    /// Active exclude patterns of the resolved set.
    ///
    /// # Errors
    ///
    /// Reference failures and list-file failures.
    pub fn exclude_patterns(&self, context: &Context<'_>) -> Result<Vec<String>, ConfigError> {
        self.lists(context)?.exclude_patterns(context)
    }

    pub(crate) fn references(&self) -> Vec<&RefId> {
        match self {
            Self::Owned(_) => Vec::new(),
            Self::Reference(id) => vec![id],
        }
    }
}

impl From<PatternLists> for PatternSet {
    fn from(lists: PatternLists) -> Self {
        Self::Owned(lists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use std::collections::HashMap;
    use test_support::TestDir;

    #[test]
    fn csv_setters_accumulate() {
        let registry = Registry::new();
        let context = Context::new(&registry, Path::new("."));
        let mut set = PatternSet::new();
        set.set_includes("a, b").expect("owned");
        set.set_includes("c d").expect("owned");
        set.set_excludes("").expect("owned");
        assert_eq!(set.include_patterns(&context).expect("resolve"), ["a", "b", "c", "d"]);
        assert!(set.exclude_patterns(&context).expect("resolve").is_empty());
    }

    #[test]
    fn conditional_entries_follow_properties() {
        let registry = Registry::new();
        let mut props = HashMap::new();
        props.insert("release".to_owned(), "yes".to_owned());
        let context = Context::new(&registry, Path::new(".")).with_properties(&props);

        let mut set = PatternSet::new();
        set.add_include(Pattern::new("**/*.dbg").unless_set("release")).expect("owned");
        set.add_include(Pattern::new("**/*.so").when_set("release")).expect("owned");
        set.add_include("").expect("owned");
        assert_eq!(set.include_patterns(&context).expect("resolve"), ["**/*.so"]);
    }

    #[test]
    fn references_reject_local_patterns() {
        let mut set = PatternSet::reference("shared");
        assert!(matches!(
            set.set_includes("a"),
            Err(ConfigError::NotAllowedOnReference { .. })
        ));
        assert!(matches!(
            set.add_excludes_file("x"),
            Err(ConfigError::NotAllowedOnReference { .. })
        ));
    }

    #[test]
    fn refid_on_configured_set_is_rejected() {
        let mut set = PatternSet::new();
        set.set_refid("other").expect("empty set may become a reference");
        assert!(set.is_reference());

        let mut configured = PatternSet::new();
        configured.set_excludes("*.bak").expect("owned");
        assert!(matches!(
            configured.set_refid("other"),
            Err(ConfigError::TooManyAttributes)
        ));
    }

    #[test]
    fn append_copies_resolved_patterns() {
        let mut registry = Registry::new();
        let mut shared = PatternSet::new();
        shared.set_includes("**/*.java").expect("owned");
        shared.set_excludes("**/Test*").expect("owned");
        registry.insert("shared", shared);
        let context = Context::new(&registry, Path::new("."));

        let mut set = PatternSet::new();
        set.set_includes("*.xml").expect("owned");
        set.append(&PatternSet::reference("shared"), &context).expect("append");
        assert_eq!(set.include_patterns(&context).expect("resolve"), ["*.xml", "**/*.java"]);
        assert_eq!(set.exclude_patterns(&context).expect("resolve"), ["**/Test*"]);

        let mut reference = PatternSet::reference("shared");
        assert!(matches!(
            reference.append(&set, &context),
            Err(ConfigError::AppendToReference { .. })
        ));
    }

    #[test]
    fn list_files_are_read_once_with_substitution() {
        let dir = TestDir::new();
        dir.write_file("includes.txt", "${module}/**\n\n*.txt\r\n");
        let registry = Registry::new();
        let mut props = HashMap::new();
        props.insert("module".to_owned(), "core".to_owned());
        let context = Context::new(&registry, dir.path()).with_properties(&props);

        let mut set = PatternSet::new();
        set.add_includes_file("includes.txt").expect("owned");
        assert_eq!(set.include_patterns(&context).expect("resolve"), ["core/**", "*.txt"]);

        // Changing the file after the first read has no effect.
        dir.write_file("includes.txt", "changed");
        assert_eq!(set.include_patterns(&context).expect("resolve"), ["core/**", "*.txt"]);

        // Later additions keep the loaded entries.
        set.set_includes("extra").expect("owned");
        assert_eq!(
            set.include_patterns(&context).expect("resolve"),
            ["core/**", "*.txt", "extra"]
        );
    }

    #[test]
    fn missing_list_file_is_fatal() {
        let dir = TestDir::new();
        let registry = Registry::new();
        let context = Context::new(&registry, dir.path());

        let mut set = PatternSet::new();
        set.add_excludes_file("absent.txt").expect("owned");
        let error = set.exclude_patterns(&context).expect_err("missing");
        assert!(matches!(
            error,
            ConfigError::MissingListFile { kind: ListKind::Excludes, ref path } if path == &dir.join("absent.txt")
        ));
    }

    #[test]
    fn inactive_list_files_are_not_read() {
        let registry = Registry::new();
        let context = Context::new(&registry, Path::new("."));
        let mut set = PatternSet::new();
        set.add_includes_file(Pattern::new("absent.txt").when_set("never")).expect("owned");
        assert!(set.include_patterns(&context).expect("resolve").is_empty());
        assert!(set.has_patterns(&context).expect("resolve"));
    }
}
