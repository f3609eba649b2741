use std::path::{Path, PathBuf};

use crate::error::ScanError;
use crate::scanner::DirectoryScanner;

/// Common surface of the directory and archive scanners.
///
/// Consumers such as path lists only need the included files; the slow
/// accessors exist for reporting.
pub trait FileScanner {
    /// Runs the scan.
    ///
    /// # Errors
    ///
    /// Propagates the scanner's configuration and I/O failures.
    fn scan(&mut self) -> Result<(), ScanError>;

    /// Directory the reported names are relative to, if any.
    fn basedir(&self) -> Option<&Path>;

    /// Included file names.
    fn included_files(&self) -> &[String];

    /// Included directory names.
    fn included_directories(&self) -> &[String];

    /// Excluded file names.
    ///
    /// # Errors
    ///
    /// Fails when called before [`scan`](Self::scan).
    fn excluded_files(&mut self) -> Result<&[String], ScanError>;

    /// Excluded directory names.
    ///
    /// # Errors
    ///
    /// Fails when called before [`scan`](Self::scan).
    fn excluded_directories(&mut self) -> Result<&[String], ScanError>;

    /// File names matching no include.
    ///
    /// # Errors
    ///
    /// Fails when called before [`scan`](Self::scan).
    fn not_included_files(&mut self) -> Result<&[String], ScanError>;

    /// Directory names matching no include.
    ///
    /// # Errors
    ///
    /// Fails when called before [`scan`](Self::scan).
    fn not_included_directories(&mut self) -> Result<&[String], ScanError>;

    /// Included files as paths joined onto [`basedir`](Self::basedir).
    fn included_paths(&self) -> Vec<PathBuf> {
        let files = self.included_files().iter();
        match self.basedir() {
            Some(basedir) => files.map(|name| basedir.join(name)).collect(),
            None => files.map(PathBuf::from).collect(),
        }
    }
}

impl FileScanner for DirectoryScanner {
    fn scan(&mut self) -> Result<(), ScanError> {
        DirectoryScanner::scan(self)
    }

    fn basedir(&self) -> Option<&Path> {
        DirectoryScanner::basedir(self)
    }

    fn included_files(&self) -> &[String] {
        DirectoryScanner::included_files(self)
    }

    fn included_directories(&self) -> &[String] {
        DirectoryScanner::included_directories(self)
    }

    fn excluded_files(&mut self) -> Result<&[String], ScanError> {
        DirectoryScanner::excluded_files(self)
    }

    fn excluded_directories(&mut self) -> Result<&[String], ScanError> {
        DirectoryScanner::excluded_directories(self)
    }

    fn not_included_files(&mut self) -> Result<&[String], ScanError> {
        DirectoryScanner::not_included_files(self)
    }

    fn not_included_directories(&mut self) -> Result<&[String], ScanError> {
        DirectoryScanner::not_included_directories(self)
    }
}
