use std::fmt;

use crate::classifier::Classification;

/// Whether a scanned entry is a directory or a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    /// A directory (symlinks to directories included).
    Directory,
    /// A regular file.
    File,
}

/// The six result lists of a scan.
///
/// Names are relative to the scanner's basedir and use the host separator.
/// The root directory is recorded as the empty name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanBuckets {
    files_included: Vec<String>,
    files_excluded: Vec<String>,
    files_not_included: Vec<String>,
    dirs_included: Vec<String>,
    dirs_excluded: Vec<String>,
    dirs_not_included: Vec<String>,
    not_followed_symlinks: Vec<String>,
    everything_included: bool,
}

impl Default for ScanBuckets {
    fn default() -> Self {
        Self {
            files_included: Vec::new(),
            files_excluded: Vec::new(),
            files_not_included: Vec::new(),
            dirs_included: Vec::new(),
            dirs_excluded: Vec::new(),
            dirs_not_included: Vec::new(),
            not_followed_symlinks: Vec::new(),
            everything_included: true,
        }
    }
}

impl ScanBuckets {
    pub(crate) fn record(&mut self, kind: EntryKind, class: Classification, name: String) {
        if class != Classification::Included {
            self.everything_included = false;
        }
        let bucket = match (kind, class) {
            (EntryKind::File, Classification::Included) => &mut self.files_included,
            (EntryKind::File, Classification::Excluded) => &mut self.files_excluded,
            (EntryKind::File, Classification::NotIncluded) => &mut self.files_not_included,
            (EntryKind::Directory, Classification::Included) => &mut self.dirs_included,
            (EntryKind::Directory, Classification::Excluded) => &mut self.dirs_excluded,
            (EntryKind::Directory, Classification::NotIncluded) => &mut self.dirs_not_included,
        };
        bucket.push(name);
    }

    pub(crate) fn record_not_followed(&mut self, name: String) {
        self.not_followed_symlinks.push(name);
    }

    /// Returns the list for one kind and class.
    #[must_use]
    pub fn get(&self, kind: EntryKind, class: Classification) -> &[String] {
        match (kind, class) {
            (EntryKind::File, Classification::Included) => &self.files_included,
            (EntryKind::File, Classification::Excluded) => &self.files_excluded,
            (EntryKind::File, Classification::NotIncluded) => &self.files_not_included,
            (EntryKind::Directory, Classification::Included) => &self.dirs_included,
            (EntryKind::Directory, Classification::Excluded) => &self.dirs_excluded,
            (EntryKind::Directory, Classification::NotIncluded) => &self.dirs_not_included,
        }
    }

    /// Included files.
    #[must_use]
    pub fn files_included(&self) -> &[String] {
        &self.files_included
    }

    /// Excluded files.
    #[must_use]
    pub fn files_excluded(&self) -> &[String] {
        &self.files_excluded
    }

    /// Files that matched no include.
    #[must_use]
    pub fn files_not_included(&self) -> &[String] {
        &self.files_not_included
    }

    /// Included directories.
    #[must_use]
    pub fn dirs_included(&self) -> &[String] {
        &self.dirs_included
    }

    /// Excluded directories.
    #[must_use]
    pub fn dirs_excluded(&self) -> &[String] {
        &self.dirs_excluded
    }

    /// Directories that matched no include.
    #[must_use]
    pub fn dirs_not_included(&self) -> &[String] {
        &self.dirs_not_included
    }

    /// Symbolic links left unfollowed that could have contributed included
    /// entries.
    #[must_use]
    pub fn not_followed_symlinks(&self) -> &[String] {
        &self.not_followed_symlinks
    }

    /// Whether every recorded entry so far landed in an included bucket.
    #[must_use]
    pub const fn is_everything_included(&self) -> bool {
        self.everything_included
    }

    /// Bucket sizes for reporting.
    #[must_use]
    pub fn counts(&self) -> BucketCounts {
        BucketCounts {
            files_included: self.files_included.len(),
            files_excluded: self.files_excluded.len(),
            files_not_included: self.files_not_included.len(),
            dirs_included: self.dirs_included.len(),
            dirs_excluded: self.dirs_excluded.len(),
            dirs_not_included: self.dirs_not_included.len(),
        }
    }
}

/// Sizes of the six buckets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BucketCounts {
    /// Included files.
    pub files_included: usize,
    /// Excluded files.
    pub files_excluded: usize,
    /// Not-included files.
    pub files_not_included: usize,
    /// Included directories.
    pub dirs_included: usize,
    /// Excluded directories.
    pub dirs_excluded: usize,
    /// Not-included directories.
    pub dirs_not_included: usize,
}

impl fmt::Display for BucketCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "files: {} included, {} excluded, {} not included; \
             dirs: {} included, {} excluded, {} not included",
            self.files_included,
            self.files_excluded,
            self.files_not_included,
            self.dirs_included,
            self.dirs_excluded,
            self.dirs_not_included
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_routes_to_matching_bucket() {
        let mut buckets = ScanBuckets::default();
        buckets.record(EntryKind::File, Classification::Included, "a".into());
        buckets.record(EntryKind::File, Classification::NotIncluded, "b".into());
        buckets.record(EntryKind::Directory, Classification::Excluded, "c".into());

        assert_eq!(buckets.files_included(), ["a"]);
        assert_eq!(buckets.files_not_included(), ["b"]);
        assert_eq!(buckets.dirs_excluded(), ["c"]);
        assert_eq!(
            buckets.get(EntryKind::Directory, Classification::Excluded),
            ["c"]
        );
        assert!(buckets.dirs_included().is_empty());
        assert!(!buckets.is_everything_included());
    }

    #[test]
    fn everything_included_until_first_miss() {
        let mut buckets = ScanBuckets::default();
        assert!(buckets.is_everything_included());
        buckets.record(EntryKind::Directory, Classification::Included, String::new());
        assert!(buckets.is_everything_included());
        buckets.record(EntryKind::File, Classification::Excluded, "x~".into());
        assert!(!buckets.is_everything_included());
    }

    #[test]
    fn counts_render_summary() {
        let mut buckets = ScanBuckets::default();
        buckets.record(EntryKind::File, Classification::Included, "a".into());
        buckets.record(EntryKind::Directory, Classification::Included, String::new());

        let counts = buckets.counts();
        assert_eq!(counts.files_included, 1);
        assert_eq!(counts.dirs_included, 1);
        assert_eq!(
            counts.to_string(),
            "files: 1 included, 0 excluded, 0 not included; dirs: 1 included, 0 excluded, 0 not included"
        );
    }
}
