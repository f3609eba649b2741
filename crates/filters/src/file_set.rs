use std::fs;
use std::path::{Path, PathBuf};

use logging::{debug_log, info_log};
use matching::Pattern;
use walk::{ArchiveScanner, DirectoryScanner, FileScanner, ScanError, Selection};

use crate::context::Context;
use crate::error::ConfigError;
use crate::pattern_set::{PatternLists, PatternSet};
use crate::registry::RefId;
use crate::trace;

/// Configuration of an owned file set.
///
/// A file set is rooted either at a directory (`dir`) or at an archive
/// (`src`). Its patterns are the default lists plus any number of additional
/// pattern sets, merged in that order.
#[derive(Clone, Debug)]
pub struct FileSetSpec {
    dir: Option<PathBuf>,
    src: Option<PathBuf>,
    file: Option<PathBuf>,
    patterns: PatternLists,
    additional: Vec<PatternSet>,
    case_sensitive: bool,
    default_excludes: bool,
    follow_symlinks: bool,
    error_on_missing_dir: bool,
}

impl Default for FileSetSpec {
    fn default() -> Self {
        Self {
            dir: None,
            src: None,
            file: None,
            patterns: PatternLists::default(),
            additional: Vec::new(),
            case_sensitive: true,
            default_excludes: true,
            follow_symlinks: true,
            error_on_missing_dir: true,
        }
    }
}

impl FileSetSpec {
    /// Creates an empty specification.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Roots the set at `dir`.
    #[must_use]
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Roots the set at the archive `src`.
    #[must_use]
    pub fn with_src(mut self, src: impl Into<PathBuf>) -> Self {
        self.src = Some(src.into());
        self
    }

    /// Adds include patterns from a comma or whitespace separated list.
    #[must_use]
    pub fn with_includes(mut self, list: &str) -> Self {
        self.patterns.add_includes(list);
        self
    }

    /// Adds exclude patterns from a comma or whitespace separated list.
    #[must_use]
    pub fn with_excludes(mut self, list: &str) -> Self {
        self.patterns.add_excludes(list);
        self
    }

    /// Adds a nested pattern set.
    #[must_use]
    pub fn with_pattern_set(mut self, set: PatternSet) -> Self {
        self.additional.push(set);
        self
    }

    /// Sets case sensitivity.
    #[must_use]
    pub const fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Enables or disables the default excludes.
    #[must_use]
    pub const fn with_default_excludes(mut self, enabled: bool) -> Self {
        self.default_excludes = enabled;
        self
    }

    /// Sets whether the directory scan enters symbolic links.
    #[must_use]
    pub const fn with_follow_symlinks(mut self, follow_symlinks: bool) -> Self {
        self.follow_symlinks = follow_symlinks;
        self
    }

    /// Chooses between an error and an empty result for a missing `dir`.
    #[must_use]
    pub const fn with_error_on_missing_dir(mut self, enabled: bool) -> Self {
        self.error_on_missing_dir = enabled;
        self
    }

    /// The configured directory.
    #[must_use]
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// The configured archive.
    #[must_use]
    pub fn src(&self) -> Option<&Path> {
        self.src.as_deref()
    }

    fn has_configuration(&self) -> bool {
        self.dir.is_some()
            || self.src.is_some()
            || self.patterns.has_patterns()
            || !self.additional.is_empty()
    }

    /// Include patterns of the default lists followed by those of every
    /// additional set.
    fn merged(&self, context: &Context<'_>) -> Result<(Vec<String>, Vec<String>), ConfigError> {
        let mut includes = self.patterns.include_patterns(context)?;
        let mut excludes = self.patterns.exclude_patterns(context)?;
        for set in &self.additional {
            includes.extend(set.include_patterns(context)?);
            excludes.extend(set.exclude_patterns(context)?);
        }
        Ok((includes, excludes))
    }

    fn selection(&self, context: &Context<'_>) -> Result<Selection, ConfigError> {
        let (includes, excludes) = self.merged(context)?;
        Ok(Selection {
            includes,
            excludes,
            case_sensitive: self.case_sensitive,
            default_excludes: self.default_excludes,
            follow_symlinks: self.follow_symlinks,
        })
    }
}

/// A directory or archive plus the patterns selecting files from it, or a
/// reference to one.
#[derive(Clone, Debug)]
pub enum FileSet {
    /// Configuration held by this value.
    Owned(FileSetSpec),
    /// Configuration held by the registered file set with this id.
    Reference(RefId),
}

impl Default for FileSet {
    fn default() -> Self {
        Self::Owned(FileSetSpec::default())
    }
}

impl From<FileSetSpec> for FileSet {
    fn from(spec: FileSetSpec) -> Self {
        Self::Owned(spec)
    }
}

impl FileSet {
    /// Kind name used in diagnostics.
    pub const KIND: &'static str = "fileset";

    /// Creates an empty owned file set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reference to the file set registered under `id`.
    #[must_use]
    pub fn reference(id: impl Into<RefId>) -> Self {
        Self::Reference(id.into())
    }

    fn spec_mut(&mut self) -> Result<&mut FileSetSpec, ConfigError> {
        match self {
            Self::Owned(spec) => Ok(spec),
            Self::Reference(id) => Err(ConfigError::NotAllowedOnReference { id: id.clone() }),
        }
    }

    /// Roots the set at `dir`.
    ///
    /// # Errors
    ///
    /// On a reference, or when `file` already chose another directory.
    pub fn set_dir(&mut self, dir: impl Into<PathBuf>) -> Result<(), ConfigError> {
        let spec = self.spec_mut()?;
        let dir = dir.into();
        if spec.file.is_some() && spec.dir.as_ref() != Some(&dir) {
            return Err(ConfigError::DirAndFile);
        }
        spec.dir = Some(dir);
        Ok(())
    }

    /// Roots the set at an archive.
    ///
    /// # Errors
    ///
    /// On a reference.
    pub fn set_src(&mut self, src: impl Into<PathBuf>) -> Result<(), ConfigError> {
        self.spec_mut()?.src = Some(src.into());
        Ok(())
    }

    /// Selects a single file: the directory becomes its parent and its name
    /// the only include.
    ///
    /// # Errors
    ///
    /// On a reference, when `dir` is already set, or when a different file
    /// was selected before.
    pub fn set_file(&mut self, file: impl AsRef<Path>) -> Result<(), ConfigError> {
        let spec = self.spec_mut()?;
        let file = file.as_ref();
        if let Some(previous) = &spec.file {
            return if previous == file {
                Ok(())
            } else {
                Err(ConfigError::FileTwice)
            };
        }
        if spec.dir.is_some() {
            return Err(ConfigError::DirAndFile);
        }
        let parent = file.parent().map(Path::to_path_buf).unwrap_or_default();
        let name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        spec.dir = Some(parent);
        spec.file = Some(file.to_path_buf());
        spec.patterns.add_include(name);
        Ok(())
    }

    /// Adds include patterns from a comma or whitespace separated list.
    ///
    /// # Errors
    ///
    /// On a reference.
    pub fn set_includes(&mut self, list: &str) -> Result<(), ConfigError> {
        self.spec_mut()?.patterns.add_includes(list);
        Ok(())
    }

    /// Adds exclude patterns from a comma or whitespace separated list.
    ///
    /// # Errors
    ///
    /// On a reference.
    pub fn set_excludes(&mut self, list: &str) -> Result<(), ConfigError> {
        self.spec_mut()?.patterns.add_excludes(list);
        Ok(())
    }

    /// Adds one include entry.
    ///
    /// # Errors
    ///
    /// On a reference.
    pub fn add_include(&mut self, pattern: impl Into<Pattern>) -> Result<(), ConfigError> {
        self.spec_mut()?.patterns.add_include(pattern);
        Ok(())
    }

    /// Adds one exclude entry.
    ///
    /// # Errors
    ///
    /// On a reference.
    pub fn add_exclude(&mut self, pattern: impl Into<Pattern>) -> Result<(), ConfigError> {
        self.spec_mut()?.patterns.add_exclude(pattern);
        Ok(())
    }

    /// Adds an includes list file.
    ///
    /// # Errors
    ///
    /// On a reference.
    pub fn add_includes_file(&mut self, file: impl Into<Pattern>) -> Result<(), ConfigError> {
        self.spec_mut()?.patterns.add_includes_file(file);
        Ok(())
    }

    /// Adds an excludes list file.
    ///
    /// # Errors
    ///
    /// On a reference.
    pub fn add_excludes_file(&mut self, file: impl Into<Pattern>) -> Result<(), ConfigError> {
        self.spec_mut()?.patterns.add_excludes_file(file);
        Ok(())
    }

    /// Adds a nested pattern set, which may itself be a reference.
    ///
    /// # Errors
    ///
    /// On a reference.
    pub fn add_pattern_set(&mut self, set: PatternSet) -> Result<(), ConfigError> {
        self.spec_mut()?.additional.push(set);
        Ok(())
    }

    /// Sets case sensitivity.
    ///
    /// # Errors
    ///
    /// On a reference.
    pub fn set_case_sensitive(&mut self, case_sensitive: bool) -> Result<(), ConfigError> {
        self.spec_mut()?.case_sensitive = case_sensitive;
        Ok(())
    }

    /// Enables or disables the default excludes.
    ///
    /// # Errors
    ///
    /// On a reference.
    pub fn set_default_excludes(&mut self, enabled: bool) -> Result<(), ConfigError> {
        self.spec_mut()?.default_excludes = enabled;
        Ok(())
    }

    /// Sets whether the directory scan enters symbolic links.
    ///
    /// # Errors
    ///
    /// On a reference.
    pub fn set_follow_symlinks(&mut self, follow_symlinks: bool) -> Result<(), ConfigError> {
        self.spec_mut()?.follow_symlinks = follow_symlinks;
        Ok(())
    }

    /// Chooses between an error and an empty result for a missing `dir`.
    ///
    /// # Errors
    ///
    /// On a reference.
    pub fn set_error_on_missing_dir(&mut self, enabled: bool) -> Result<(), ConfigError> {
        self.spec_mut()?.error_on_missing_dir = enabled;
        Ok(())
    }

    /// Turns this value into a reference.
    ///
    /// # Errors
    ///
    /// [`ConfigError::TooManyAttributes`] when anything was configured.
    pub fn set_refid(&mut self, id: impl Into<RefId>) -> Result<(), ConfigError> {
        if let Self::Owned(spec) = self {
            if spec.has_configuration() {
                return Err(ConfigError::TooManyAttributes);
            }
        }
        *self = Self::Reference(id.into());
        Ok(())
    }

    /// Follows references to the owned specification.
    ///
    /// # Errors
    ///
    /// Cycle, lookup and kind failures from the registry.
    pub fn spec<'c>(&'c self, context: &Context<'c>) -> Result<&'c FileSetSpec, ConfigError> {
        match self {
            Self::Owned(spec) => Ok(spec),
            Self::Reference(id) => {
                trace::reference_followed(id, Self::KIND);
                debug_log!(Refs, 2, "following fileset reference {}", id);
                context.registry().file_set(id)?.spec(context)
            }
        }
    }

    /// Merged patterns and flags of the resolved set.
    ///
    /// # Errors
    ///
    /// Reference, nested pattern set and list-file failures.
    pub fn selection(&self, context: &Context<'_>) -> Result<Selection, ConfigError> {
        self.spec(context)?.selection(context)
    }

    /// Builds and runs the scanner for the resolved set.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoDirectory`], [`ConfigError::DirAndSrc`],
    /// [`ConfigError::MissingDirectory`], [`ConfigError::NotADirectory`],
    /// reference failures, list-file failures, and scan failures.
    pub fn scan<'c>(&self, context: &Context<'c>) -> Result<Box<dyn FileScanner + 'c>, ConfigError> {
        let spec = self.spec(context)?;
        let mut scanner: Box<dyn FileScanner + 'c> = match (&spec.dir, &spec.src) {
            (Some(_), Some(_)) => return Err(ConfigError::DirAndSrc),
            (None, None) => return Err(ConfigError::NoDirectory),
            (Some(dir), None) => {
                let dir = context.resolve_path(dir);
                match fs::metadata(&dir) {
                    Ok(metadata) if metadata.is_dir() => {}
                    Ok(_) => return Err(ConfigError::NotADirectory { path: dir }),
                    Err(_) if spec.error_on_missing_dir => {
                        return Err(ConfigError::MissingDirectory { path: dir });
                    }
                    Err(_) => {
                        info_log!(Select, 1, "{} does not exist, selecting nothing", dir.display());
                        return Ok(Box::new(EmptyScanner { basedir: dir }));
                    }
                }
                let selection = spec.selection(context)?;
                info_log!(
                    Select,
                    2,
                    "fileset: setup scanner in dir {} with includes {:?} excludes {:?}",
                    dir.display(),
                    selection.includes,
                    selection.excludes
                );
                trace::scanner_configured(&dir, selection.includes.len(), selection.excludes.len());
                Box::new(DirectoryScanner::from_selection(dir, &selection))
            }
            (None, Some(src)) => {
                let src = context.resolve_path(src);
                let selection = spec.selection(context)?;
                trace::scanner_configured(&src, selection.includes.len(), selection.excludes.len());
                let scanner = ArchiveScanner::new(src, &selection);
                match context.archive_lister() {
                    Some(lister) => Box::new(scanner.with_lister(lister)),
                    None => Box::new(scanner),
                }
            }
        };
        scanner.scan()?;
        Ok(scanner)
    }

    /// Absolute paths of the included files, in scan order.
    ///
    /// # Errors
    ///
    /// See [`scan`](Self::scan).
    pub fn included_paths(&self, context: &Context<'_>) -> Result<Vec<PathBuf>, ConfigError> {
        Ok(self.scan(context)?.included_paths())
    }

    pub(crate) fn references(&self) -> Vec<&RefId> {
        match self {
            Self::Reference(id) => vec![id],
            Self::Owned(spec) => spec
                .additional
                .iter()
                .flat_map(PatternSet::references)
                .collect(),
        }
    }
}

/// Result of a lenient file set whose directory is missing.
#[derive(Debug)]
struct EmptyScanner {
    basedir: PathBuf,
}

impl FileScanner for EmptyScanner {
    fn scan(&mut self) -> Result<(), ScanError> {
        Ok(())
    }

    fn basedir(&self) -> Option<&Path> {
        Some(&self.basedir)
    }

    fn included_files(&self) -> &[String] {
        &[]
    }

    fn included_directories(&self) -> &[String] {
        &[]
    }

    fn excluded_files(&mut self) -> Result<&[String], ScanError> {
        Ok(&[])
    }

    fn excluded_directories(&mut self) -> Result<&[String], ScanError> {
        Ok(&[])
    }

    fn not_included_files(&mut self) -> Result<&[String], ScanError> {
        Ok(&[])
    }

    fn not_included_directories(&mut self) -> Result<&[String], ScanError> {
        Ok(&[])
    }
}
