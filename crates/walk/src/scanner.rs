use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use logging::{debug_log, info_log};

use crate::buckets::{BucketCounts, EntryKind, ScanBuckets};
use crate::classifier::Classifier;
use crate::error::ScanError;
use crate::trace;
use crate::traversal::Traversal;

/// Progress of a [`DirectoryScanner`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanState {
    /// No results are available.
    #[default]
    Unscanned,
    /// The included buckets are complete; excluded and not-included buckets
    /// may be missing entries below pruned directories.
    FastScanned,
    /// All six buckets are complete.
    FullyScanned,
}

/// Pattern configuration shared by the directory and archive scanners.
///
/// An empty `includes` list leaves the scanner's default `**` in force.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    /// Include patterns.
    pub includes: Vec<String>,
    /// Exclude patterns.
    pub excludes: Vec<String>,
    /// Case sensitivity for every comparison.
    pub case_sensitive: bool,
    /// Whether the default excludes are appended.
    pub default_excludes: bool,
    /// Whether symbolic links are entered and their targets scanned.
    pub follow_symlinks: bool,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            includes: Vec::new(),
            excludes: Vec::new(),
            case_sensitive: true,
            default_excludes: true,
            follow_symlinks: true,
        }
    }
}

impl Selection {
    pub(crate) fn classifier(&self) -> Classifier {
        let mut classifier = Classifier::default();
        if !self.includes.is_empty() {
            classifier.set_includes(&self.includes);
        }
        classifier.set_excludes(&self.excludes);
        if self.default_excludes {
            classifier.add_default_excludes();
        }
        classifier.set_case_sensitive(self.case_sensitive);
        classifier
    }
}

/// Scans a basedir and sorts every entry into six buckets.
///
/// [`scan`](Self::scan) runs a fast pass that skips directories whose names
/// rule out any include match. The excluded and not-included accessors
/// complete those buckets on first use with a slow pass; the included
/// accessors never do.
///
/// Changing the configuration discards previous results.
#[derive(Clone, Debug)]
pub struct DirectoryScanner {
    basedir: Option<PathBuf>,
    classifier: Classifier,
    follow_symlinks: bool,
    buckets: ScanBuckets,
    state: ScanState,
}

impl Default for DirectoryScanner {
    fn default() -> Self {
        Self {
            basedir: None,
            classifier: Classifier::default(),
            follow_symlinks: true,
            buckets: ScanBuckets::default(),
            state: ScanState::default(),
        }
    }
}

impl DirectoryScanner {
    /// Creates a scanner with no basedir and no patterns.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scanner configured from a [`Selection`].
    #[must_use]
    pub fn from_selection(basedir: impl Into<PathBuf>, selection: &Selection) -> Self {
        Self {
            basedir: Some(basedir.into()),
            classifier: selection.classifier(),
            follow_symlinks: selection.follow_symlinks,
            ..Self::default()
        }
    }

    /// Sets the basedir and returns the scanner.
    #[must_use]
    pub fn with_basedir(mut self, basedir: impl Into<PathBuf>) -> Self {
        self.set_basedir(basedir);
        self
    }

    /// Sets the include patterns and returns the scanner.
    #[must_use]
    pub fn with_includes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.set_includes(patterns);
        self
    }

    /// Sets the exclude patterns and returns the scanner.
    #[must_use]
    pub fn with_excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.set_excludes(patterns);
        self
    }

    /// Sets whether symbolic links are followed and returns the scanner.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow_symlinks: bool) -> Self {
        self.set_follow_symlinks(follow_symlinks);
        self
    }

    /// Sets the directory scans are rooted at.
    pub fn set_basedir(&mut self, basedir: impl Into<PathBuf>) {
        self.basedir = Some(basedir.into());
        self.invalidate();
    }

    /// Replaces the include patterns.
    pub fn set_includes<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.classifier.set_includes(patterns);
        self.invalidate();
    }

    /// Replaces the exclude patterns.
    pub fn set_excludes<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.classifier.set_excludes(patterns);
        self.invalidate();
    }

    /// Appends [`DEFAULT_EXCLUDES`](crate::DEFAULT_EXCLUDES) to the excludes.
    pub fn add_default_excludes(&mut self) {
        self.classifier.add_default_excludes();
        self.invalidate();
    }

    /// Sets case sensitivity for matching.
    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.classifier.set_case_sensitive(case_sensitive);
        self.invalidate();
    }

    /// Sets whether symbolic links are followed. Links left unfollowed are
    /// recorded as excluded.
    pub fn set_follow_symlinks(&mut self, follow_symlinks: bool) {
        self.follow_symlinks = follow_symlinks;
        self.invalidate();
    }

    /// Whether symbolic links are followed.
    #[must_use]
    pub const fn follow_symlinks(&self) -> bool {
        self.follow_symlinks
    }

    /// The configured basedir.
    #[must_use]
    pub fn basedir(&self) -> Option<&Path> {
        self.basedir.as_deref()
    }

    /// The patterns used for classification.
    #[must_use]
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Current scan progress.
    #[must_use]
    pub const fn state(&self) -> ScanState {
        self.state
    }

    /// Tests a relative name against the include patterns.
    #[must_use]
    pub fn is_included(&self, name: &str) -> bool {
        self.classifier.is_included(name)
    }

    /// Tests a relative name against the exclude patterns.
    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        self.classifier.is_excluded(name)
    }

    fn invalidate(&mut self) {
        if self.state != ScanState::Unscanned {
            self.buckets = ScanBuckets::default();
            self.state = ScanState::Unscanned;
        }
    }

    /// Runs the fast pass.
    ///
    /// # Errors
    ///
    /// Fails when no basedir is set, when it is missing or not a directory,
    /// or when any directory below it cannot be read. No results are kept
    /// after a failure.
    pub fn scan(&mut self) -> Result<(), ScanError> {
        let basedir = self.basedir.clone().ok_or_else(ScanError::no_basedir)?;
        match fs::metadata(&basedir) {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => return Err(ScanError::not_a_directory(basedir)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Err(ScanError::missing_basedir(basedir));
            }
            Err(error) => return Err(ScanError::metadata(basedir, error)),
        }

        self.classifier.default_includes();
        self.buckets = ScanBuckets::default();
        self.state = ScanState::Unscanned;

        info_log!(Scan, 1, "scanning {}", basedir.display());
        trace::scan_started(&basedir, true);

        let root = self.classifier.classify("");
        self.buckets.record(EntryKind::Directory, root, String::new());
        let result = Traversal::new(&basedir, &self.classifier, &mut self.buckets, true)
            .with_follow_symlinks(self.follow_symlinks)
            .visit("");
        if let Err(error) = result {
            self.buckets = ScanBuckets::default();
            return Err(error);
        }

        self.state = ScanState::FastScanned;
        info_log!(Scan, 2, "{}: {}", basedir.display(), self.buckets.counts());
        trace::scan_finished(&self.buckets.counts());
        Ok(())
    }

    /// Completes the excluded and not-included buckets. Runs at most once
    /// per scan.
    fn slow_scan(&mut self) -> Result<(), ScanError> {
        match self.state {
            ScanState::Unscanned => return Err(ScanError::not_scanned()),
            ScanState::FullyScanned => return Ok(()),
            ScanState::FastScanned => {}
        }
        let basedir = self.basedir.clone().ok_or_else(ScanError::no_basedir)?;

        let pruned: Vec<String> = self
            .buckets
            .dirs_excluded()
            .iter()
            .chain(self.buckets.dirs_not_included())
            .filter(|name| !name.is_empty() && !self.classifier.could_hold_included(name))
            .cloned()
            .collect();
        debug_log!(Scan, 1, "slow scan revisiting {} directories", pruned.len());
        trace::scan_started(&basedir, false);

        let result = {
            let mut traversal =
                Traversal::new(&basedir, &self.classifier, &mut self.buckets, false)
                    .with_follow_symlinks(self.follow_symlinks);
            pruned.iter().try_for_each(|name| traversal.visit(name))
        };
        if let Err(error) = result {
            self.buckets = ScanBuckets::default();
            self.state = ScanState::Unscanned;
            return Err(error);
        }

        self.state = ScanState::FullyScanned;
        trace::scan_finished(&self.buckets.counts());
        Ok(())
    }

    /// Included files, in visit order.
    #[must_use]
    pub fn included_files(&self) -> &[String] {
        self.buckets.files_included()
    }

    /// Included directories, in visit order. The basedir itself appears as
    /// `""` when it matches.
    #[must_use]
    pub fn included_directories(&self) -> &[String] {
        self.buckets.dirs_included()
    }

    /// Excluded files, completing the scan first if needed.
    ///
    /// # Errors
    ///
    /// Fails before [`scan`](Self::scan) or when the slow pass fails.
    pub fn excluded_files(&mut self) -> Result<&[String], ScanError> {
        self.slow_scan()?;
        Ok(self.buckets.files_excluded())
    }

    /// Excluded directories, completing the scan first if needed.
    ///
    /// # Errors
    ///
    /// Fails before [`scan`](Self::scan) or when the slow pass fails.
    pub fn excluded_directories(&mut self) -> Result<&[String], ScanError> {
        self.slow_scan()?;
        Ok(self.buckets.dirs_excluded())
    }

    /// Files matching no include, completing the scan first if needed.
    ///
    /// # Errors
    ///
    /// Fails before [`scan`](Self::scan) or when the slow pass fails.
    pub fn not_included_files(&mut self) -> Result<&[String], ScanError> {
        self.slow_scan()?;
        Ok(self.buckets.files_not_included())
    }

    /// Directories matching no include, completing the scan first if needed.
    ///
    /// # Errors
    ///
    /// Fails before [`scan`](Self::scan) or when the slow pass fails.
    pub fn not_included_directories(&mut self) -> Result<&[String], ScanError> {
        self.slow_scan()?;
        Ok(self.buckets.dirs_not_included())
    }

    /// All six buckets after completing the scan.
    ///
    /// # Errors
    ///
    /// Fails before [`scan`](Self::scan) or when the slow pass fails.
    pub fn complete_buckets(&mut self) -> Result<&ScanBuckets, ScanError> {
        self.slow_scan()?;
        Ok(&self.buckets)
    }

    /// Symbolic links that were not followed but could have contributed
    /// included entries. Always empty while links are followed.
    #[must_use]
    pub fn not_followed_symlinks(&self) -> &[String] {
        self.buckets.not_followed_symlinks()
    }

    /// Sizes of the buckets as they stand.
    #[must_use]
    pub fn counts(&self) -> BucketCounts {
        self.buckets.counts()
    }

    /// Whether every entry seen so far was included.
    #[must_use]
    pub const fn is_everything_included(&self) -> bool {
        self.buckets.is_everything_included()
    }
}
