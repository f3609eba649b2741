use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use logging::debug_log;
use matching::normalize_separators;

use crate::buckets::{EntryKind, ScanBuckets};
use crate::classifier::Classifier;
use crate::error::ScanError;
use crate::file_scanner::FileScanner;
use crate::scanner::Selection;

/// Reads the entry names of an archive.
///
/// Names use `/` separators; directory entries end with `/`.
pub trait ArchiveLister {
    /// Lists every entry of `archive`.
    ///
    /// # Errors
    ///
    /// Any I/O or format failure while reading the archive.
    fn entry_names(&self, archive: &Path) -> io::Result<Vec<String>>;
}

impl<F> ArchiveLister for F
where
    F: Fn(&Path) -> io::Result<Vec<String>>,
{
    fn entry_names(&self, archive: &Path) -> io::Result<Vec<String>> {
        self(archive)
    }
}

/// Scanner for a file set backed by an archive instead of a directory.
///
/// The archive itself is the single included file. Entry-level
/// classification is available through [`classify_entries`](Self::classify_entries)
/// when an [`ArchiveLister`] is supplied.
pub struct ArchiveScanner<'a> {
    src: PathBuf,
    classifier: Classifier,
    lister: Option<&'a dyn ArchiveLister>,
    included: Vec<String>,
    entries: Option<ScanBuckets>,
}

impl fmt::Debug for ArchiveScanner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveScanner")
            .field("src", &self.src)
            .field("classifier", &self.classifier)
            .field("has_lister", &self.lister.is_some())
            .field("included", &self.included)
            .finish_non_exhaustive()
    }
}

impl<'a> ArchiveScanner<'a> {
    /// Creates a scanner for `src` using the patterns of `selection`.
    #[must_use]
    pub fn new(src: impl Into<PathBuf>, selection: &Selection) -> Self {
        Self {
            src: src.into(),
            classifier: selection.classifier(),
            lister: None,
            included: Vec::new(),
            entries: None,
        }
    }

    /// Supplies the collaborator used to read entry names.
    #[must_use]
    pub fn with_lister(mut self, lister: &'a dyn ArchiveLister) -> Self {
        self.lister = Some(lister);
        self
    }

    /// The configured archive path.
    #[must_use]
    pub fn src(&self) -> &Path {
        &self.src
    }

    fn empty_after_scan(&self) -> Result<&[String], ScanError> {
        if self.included.is_empty() {
            Err(ScanError::not_scanned())
        } else {
            Ok(&[])
        }
    }

    /// Classifies the archive's entries into the six buckets.
    ///
    /// The listing is read once and cached.
    ///
    /// # Errors
    ///
    /// Fails without a lister or when the lister fails.
    pub fn classify_entries(&mut self) -> Result<&ScanBuckets, ScanError> {
        if self.entries.is_none() {
            let lister = self
                .lister
                .ok_or_else(|| ScanError::no_archive_lister(self.src.clone()))?;
            let names = lister
                .entry_names(&self.src)
                .map_err(|error| ScanError::list_archive(self.src.clone(), error))?;
            debug_log!(Scan, 1, "{} entries in {:?}", names.len(), self.src);

            self.classifier.default_includes();
            let mut buckets = ScanBuckets::default();
            for name in names {
                let (kind, name) = match name.strip_suffix('/') {
                    Some(dir) => (EntryKind::Directory, dir),
                    None => (EntryKind::File, name.as_str()),
                };
                let name = normalize_separators(name);
                let class = self.classifier.classify(&name);
                buckets.record(kind, class, name);
            }
            self.entries = Some(buckets);
        }
        Ok(self.entries.get_or_insert_with(ScanBuckets::default))
    }
}

impl FileScanner for ArchiveScanner<'_> {
    fn scan(&mut self) -> Result<(), ScanError> {
        let archive = std::path::absolute(&self.src)
            .map_err(|error| ScanError::metadata(self.src.clone(), error))?;
        match fs::metadata(&archive) {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => return Err(ScanError::not_a_file(archive)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Err(ScanError::missing_archive(archive));
            }
            Err(error) => return Err(ScanError::metadata(archive, error)),
        }
        self.included = vec![archive.to_string_lossy().into_owned()];
        self.entries = None;
        Ok(())
    }

    fn basedir(&self) -> Option<&Path> {
        None
    }

    fn included_files(&self) -> &[String] {
        &self.included
    }

    fn included_directories(&self) -> &[String] {
        &[]
    }

    fn excluded_files(&mut self) -> Result<&[String], ScanError> {
        self.empty_after_scan()
    }

    fn excluded_directories(&mut self) -> Result<&[String], ScanError> {
        self.empty_after_scan()
    }

    fn not_included_files(&mut self) -> Result<&[String], ScanError> {
        self.empty_after_scan()
    }

    fn not_included_directories(&mut self) -> Result<&[String], ScanError> {
        self.empty_after_scan()
    }
}
