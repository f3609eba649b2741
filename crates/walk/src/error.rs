use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Error returned when a scan cannot be completed.
///
/// Every failure is fatal for the scan that produced it: partially filled
/// buckets are never handed out as a result.
#[derive(Debug)]
pub struct ScanError {
    kind: ScanErrorKind,
}

impl ScanError {
    pub(crate) fn new(kind: ScanErrorKind) -> Self {
        Self { kind }
    }

    pub(crate) fn no_basedir() -> Self {
        Self::new(ScanErrorKind::NoBasedir)
    }

    pub(crate) fn missing_basedir(path: PathBuf) -> Self {
        Self::new(ScanErrorKind::MissingBasedir { path })
    }

    pub(crate) fn not_a_directory(path: PathBuf) -> Self {
        Self::new(ScanErrorKind::NotADirectory { path })
    }

    pub(crate) fn read_dir(path: PathBuf, source: io::Error) -> Self {
        Self::new(ScanErrorKind::ReadDir { path, source })
    }

    pub(crate) fn read_dir_entry(path: PathBuf, source: io::Error) -> Self {
        Self::new(ScanErrorKind::ReadDirEntry { path, source })
    }

    pub(crate) fn metadata(path: PathBuf, source: io::Error) -> Self {
        Self::new(ScanErrorKind::Metadata { path, source })
    }

    pub(crate) fn not_scanned() -> Self {
        Self::new(ScanErrorKind::NotScanned)
    }

    pub(crate) fn missing_archive(path: PathBuf) -> Self {
        Self::new(ScanErrorKind::MissingArchive { path })
    }

    pub(crate) fn not_a_file(path: PathBuf) -> Self {
        Self::new(ScanErrorKind::NotAFile { path })
    }

    pub(crate) fn no_archive_lister(path: PathBuf) -> Self {
        Self::new(ScanErrorKind::NoArchiveLister { path })
    }

    pub(crate) fn list_archive(path: PathBuf, source: io::Error) -> Self {
        Self::new(ScanErrorKind::ListArchive { path, source })
    }

    /// Returns the specific failure that terminated the scan.
    #[must_use]
    pub fn kind(&self) -> &ScanErrorKind {
        &self.kind
    }

    /// Returns the filesystem path associated with the error, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use walk::DirectoryScanner;
    ///
    /// let mut scanner = DirectoryScanner::new().with_basedir("./definitely_missing_root");
    /// let error = scanner.scan().unwrap_err();
    /// assert!(error.path().unwrap().ends_with("definitely_missing_root"));
    /// ```
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.kind.path()
    }

    /// Reports whether the failure came from the operating system rather
    /// than from the scanner configuration.
    #[must_use]
    pub fn is_io(&self) -> bool {
        self.source().is_some()
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ScanErrorKind::NoBasedir => f.write_str("no basedir set"),
            ScanErrorKind::MissingBasedir { path } => {
                write!(f, "basedir '{}' does not exist", path.display())
            }
            ScanErrorKind::NotADirectory { path } => {
                write!(f, "basedir '{}' is not a directory", path.display())
            }
            ScanErrorKind::ReadDir { path, source } => {
                write!(
                    f,
                    "IO error scanning directory '{}': {}",
                    path.display(),
                    source
                )
            }
            ScanErrorKind::ReadDirEntry { path, source } => {
                write!(
                    f,
                    "failed to read entry in '{}': {}",
                    path.display(),
                    source
                )
            }
            ScanErrorKind::Metadata { path, source } => {
                write!(
                    f,
                    "failed to inspect metadata for '{}': {}",
                    path.display(),
                    source
                )
            }
            ScanErrorKind::NotScanned => {
                f.write_str("scan() must run before results can be requested")
            }
            ScanErrorKind::MissingArchive { path } => {
                write!(f, "archive '{}' does not exist", path.display())
            }
            ScanErrorKind::NotAFile { path } => {
                write!(f, "archive '{}' is not a file", path.display())
            }
            ScanErrorKind::NoArchiveLister { path } => {
                write!(
                    f,
                    "no archive lister available to read entries of '{}'",
                    path.display()
                )
            }
            ScanErrorKind::ListArchive { path, source } => {
                write!(
                    f,
                    "failed to list entries of archive '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl Error for ScanError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            ScanErrorKind::ReadDir { source, .. }
            | ScanErrorKind::ReadDirEntry { source, .. }
            | ScanErrorKind::Metadata { source, .. }
            | ScanErrorKind::ListArchive { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Classification of scan failures.
#[derive(Debug)]
pub enum ScanErrorKind {
    /// `scan()` was called before a basedir was configured.
    NoBasedir,
    /// The configured basedir does not exist.
    MissingBasedir {
        /// Configured basedir.
        path: PathBuf,
    },
    /// The configured basedir exists but is not a directory.
    NotADirectory {
        /// Configured basedir.
        path: PathBuf,
    },
    /// Failed to list the contents of a directory.
    ReadDir {
        /// Directory whose contents could not be read.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Failed to obtain a directory entry during iteration.
    ReadDirEntry {
        /// Directory being iterated when the failure occurred.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Failed to query metadata for an entry.
    Metadata {
        /// Entry whose metadata could not be retrieved.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// A result accessor that needs a completed scan was called too early.
    NotScanned,
    /// The archive backing a scanner does not exist.
    MissingArchive {
        /// Configured archive path.
        path: PathBuf,
    },
    /// The archive path names something other than a regular file.
    NotAFile {
        /// Configured archive path.
        path: PathBuf,
    },
    /// Archive entries were requested without an archive lister.
    NoArchiveLister {
        /// Configured archive path.
        path: PathBuf,
    },
    /// The archive lister failed.
    ListArchive {
        /// Archive being listed.
        path: PathBuf,
        /// Error reported by the lister.
        source: io::Error,
    },
}

impl ScanErrorKind {
    /// Returns the path associated with the error kind, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NoBasedir | Self::NotScanned => None,
            Self::MissingBasedir { path }
            | Self::NotADirectory { path }
            | Self::ReadDir { path, .. }
            | Self::ReadDirEntry { path, .. }
            | Self::Metadata { path, .. }
            | Self::MissingArchive { path }
            | Self::NotAFile { path }
            | Self::NoArchiveLister { path }
            | Self::ListArchive { path, .. } => Some(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_have_no_source() {
        let error = ScanError::not_a_directory(PathBuf::from("/tmp/file"));
        assert!(error.source().is_none());
        assert!(!error.is_io());
        assert_eq!(error.path(), Some(Path::new("/tmp/file")));
        assert_eq!(error.to_string(), "basedir '/tmp/file' is not a directory");
    }

    #[test]
    fn io_errors_expose_source() {
        let error = ScanError::read_dir(
            PathBuf::from("/locked"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(error.is_io());
        assert!(matches!(error.kind(), ScanErrorKind::ReadDir { .. }));
        assert!(error.to_string().starts_with("IO error scanning directory '/locked'"));
    }

    #[test]
    fn pathless_kinds_report_none() {
        assert_eq!(ScanError::no_basedir().path(), None);
        assert_eq!(ScanError::not_scanned().path(), None);
        assert_eq!(ScanError::no_basedir().to_string(), "no basedir set");
    }

    #[test]
    fn archive_errors_carry_the_archive_path() {
        let error = ScanError::list_archive(
            PathBuf::from("lib.zip"),
            io::Error::new(io::ErrorKind::InvalidData, "bad header"),
        );
        assert_eq!(error.path(), Some(Path::new("lib.zip")));
        assert!(error.to_string().contains("bad header"));
        assert!(
            ScanError::no_archive_lister(PathBuf::from("lib.zip"))
                .to_string()
                .contains("lib.zip")
        );
        assert!(ScanError::missing_archive(PathBuf::from("x.zip")).to_string().contains("does not exist"));
        assert!(ScanError::not_a_file(PathBuf::from("dir.zip")).to_string().contains("not a file"));
    }
}
