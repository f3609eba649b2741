use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use logging::debug_log;
use rustc_hash::FxHashSet;

use crate::buckets::{EntryKind, ScanBuckets};
use crate::classifier::{Classification, Classifier};
use crate::error::ScanError;
use crate::trace;

/// One depth-first pass over part of a basedir.
///
/// Directories are kept on an explicit stack so tree depth never grows the
/// call stack. Entries of each directory are visited in sorted order, and a
/// directory is recorded before anything beneath it.
///
/// `open` holds the canonical paths of the directories currently on the
/// stack. A directory is skipped only when it is one of its own ancestors,
/// so several links to the same directory are all walked.
pub(crate) struct Traversal<'a> {
    basedir: &'a Path,
    classifier: &'a Classifier,
    buckets: &'a mut ScanBuckets,
    fast: bool,
    follow_symlinks: bool,
    stack: Vec<DirectoryState>,
    open: FxHashSet<PathBuf>,
}

impl<'a> Traversal<'a> {
    pub(crate) fn new(
        basedir: &'a Path,
        classifier: &'a Classifier,
        buckets: &'a mut ScanBuckets,
        fast: bool,
    ) -> Self {
        Self {
            basedir,
            classifier,
            buckets,
            fast,
            follow_symlinks: true,
            stack: Vec::new(),
            open: FxHashSet::default(),
        }
    }

    /// Stops the pass from entering symbolic links; they are recorded as
    /// excluded instead.
    pub(crate) fn with_follow_symlinks(mut self, follow_symlinks: bool) -> Self {
        self.follow_symlinks = follow_symlinks;
        self
    }

    /// Visits everything below the directory `relative` names. The directory
    /// itself must already be recorded by the caller.
    pub(crate) fn visit(&mut self, relative: &str) -> Result<(), ScanError> {
        let fs_path = if relative.is_empty() {
            self.basedir.to_path_buf()
        } else {
            self.basedir.join(relative)
        };
        if !relative.is_empty() && !self.follow_symlinks && is_symlink(&fs_path) {
            debug_log!(Scan, 2, "not following symlink: {:?}", relative);
            return Ok(());
        }
        self.push_directory(fs_path, relative.to_owned())?;

        while let Some(state) = self.stack.last_mut() {
            let Some(name) = state.next_name() else {
                if let Some(done) = self.stack.pop() {
                    self.open.remove(&done.canonical);
                }
                continue;
            };
            let full_path = state.fs_path.join(&name);
            let relative = state.child_name(&name);
            self.process_entry(full_path, relative)?;
        }
        Ok(())
    }

    fn push_directory(&mut self, fs_path: PathBuf, relative: String) -> Result<(), ScanError> {
        let canonical = fs::canonicalize(&fs_path)
            .map_err(|error| ScanError::metadata(fs_path.clone(), error))?;
        if self.open.contains(&canonical) {
            debug_log!(Scan, 1, "skipping symlink loop: {:?}", fs_path);
            return Ok(());
        }

        debug_log!(Scan, 2, "entering directory: {:?}", fs_path);
        let state = DirectoryState::read(fs_path, relative, canonical.clone())?;
        self.open.insert(canonical);
        self.stack.push(state);
        Ok(())
    }

    fn process_entry(&mut self, full_path: PathBuf, relative: String) -> Result<(), ScanError> {
        debug_log!(Scan, 3, "processing entry: {:?}", relative);

        if !self.follow_symlinks && is_symlink(&full_path) {
            self.record_unfollowed(&full_path, relative);
            return Ok(());
        }

        // Follows symlinks: a link to a directory is walked as a directory.
        let metadata = match fs::metadata(&full_path) {
            Ok(metadata) => metadata,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug_log!(Scan, 1, "skipping dangling entry: {:?}", full_path);
                return Ok(());
            }
            Err(error) => return Err(ScanError::metadata(full_path, error)),
        };

        if metadata.is_dir() {
            let class = self.classifier.classify(&relative);
            self.buckets
                .record(EntryKind::Directory, class, relative.clone());
            let descend = class == Classification::Included
                || !self.fast
                || self.classifier.could_hold_included(&relative);
            if descend {
                self.push_directory(full_path, relative)?;
            } else {
                debug_log!(Scan, 2, "pruned directory: {:?}", relative);
                trace::directory_pruned(&relative);
            }
        } else if metadata.is_file() {
            let class = self.classifier.classify(&relative);
            self.buckets.record(EntryKind::File, class, relative);
        } else {
            debug_log!(Scan, 2, "ignoring special file: {:?}", full_path);
        }
        Ok(())
    }

    /// Files the link under the excluded bucket of its target's kind. The
    /// name is also kept as not followed when it is not excluded and could
    /// have contributed included entries.
    fn record_unfollowed(&mut self, full_path: &Path, relative: String) {
        let target = fs::metadata(full_path).ok();
        let is_dir = target.as_ref().is_some_and(fs::Metadata::is_dir);
        let counts = !self.classifier.is_excluded(&relative)
            && (self.classifier.is_included(&relative)
                || (is_dir && self.classifier.could_hold_included(&relative)));

        match &target {
            Some(metadata) if metadata.is_dir() => {
                self.buckets
                    .record(EntryKind::Directory, Classification::Excluded, relative.clone());
            }
            Some(metadata) if metadata.is_file() => {
                self.buckets
                    .record(EntryKind::File, Classification::Excluded, relative.clone());
            }
            _ => {}
        }
        debug_log!(Scan, 2, "not following symlink: {:?}", relative);
        if counts {
            self.buckets.record_not_followed(relative);
        }
    }
}

fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|metadata| metadata.file_type().is_symlink())
}

#[derive(Clone, Debug)]
struct DirectoryState {
    fs_path: PathBuf,
    canonical: PathBuf,
    relative_prefix: String,
    entries: Vec<OsString>,
    index: usize,
}

impl DirectoryState {
    fn read(fs_path: PathBuf, relative_prefix: String, canonical: PathBuf) -> Result<Self, ScanError> {
        let read_dir =
            fs::read_dir(&fs_path).map_err(|error| ScanError::read_dir(fs_path.clone(), error))?;
        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|error| ScanError::read_dir_entry(fs_path.clone(), error))?;
            entries.push(entry.file_name());
        }
        entries.sort();

        debug_log!(Scan, 3, "found {} entries in {:?}", entries.len(), fs_path);

        Ok(Self {
            fs_path,
            canonical,
            relative_prefix,
            entries,
            index: 0,
        })
    }

    fn next_name(&mut self) -> Option<OsString> {
        let name = self.entries.get(self.index)?.clone();
        self.index += 1;
        Some(name)
    }

    fn child_name(&self, name: &OsString) -> String {
        let name = name.to_string_lossy();
        if self.relative_prefix.is_empty() {
            name.into_owned()
        } else {
            format!("{}{}{}", self.relative_prefix, MAIN_SEPARATOR, name)
        }
    }
}
