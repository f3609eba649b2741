#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` classifies every entry below a basedir as included, excluded or
//! not included, using the glob patterns of the [`matching`] crate. Results
//! are kept in six buckets (files and directories for each class) holding
//! names relative to the basedir with host separators.
//!
//! # Design
//!
//! - [`DirectoryScanner`] owns its configuration and results. [`scan`] runs
//!   a fast pass that skips directories which can hold no included entry;
//!   the excluded and not-included accessors finish those buckets lazily
//!   with a slow pass. [`ScanState`] records which pass has completed.
//! - [`Classifier`] holds the include and exclude lists and implements the
//!   three-way [`Classification`].
//! - Traversal uses an explicit stack of directory states and visits entries
//!   in sorted order, so output is deterministic and tree depth never grows
//!   the call stack.
//! - [`ArchiveScanner`] stands in for a directory when a file set is backed
//!   by an archive. Both scanners implement [`FileScanner`].
//!
//! # Invariants
//!
//! - Every visited name lands in exactly one bucket.
//! - A directory is recorded before any entry beneath it.
//! - Symlinks to directories are walked, but a directory whose canonical
//!   path was already entered during a pass is not entered again.
//! - Included buckets are complete after [`scan`]; requesting them never
//!   triggers the slow pass.
//!
//! # Errors
//!
//! [`ScanError`] reports configuration problems (no basedir, missing
//! basedir) and I/O failures. Any unreadable directory aborts the scan and
//! discards partial results.
//!
//! # Examples
//!
//! ```
//! use std::fs;
//! use walk::DirectoryScanner;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! fs::create_dir_all(temp.path().join("src/CVS"))?;
//! fs::write(temp.path().join("src/Main.java"), b"class Main {}")?;
//! fs::write(temp.path().join("src/CVS/Entries"), b"")?;
//!
//! let mut scanner = DirectoryScanner::new()
//!     .with_basedir(temp.path())
//!     .with_includes(["**/*.java", "**/Entries"]);
//! scanner.add_default_excludes();
//! scanner.scan()?;
//!
//! let sep = std::path::MAIN_SEPARATOR;
//! assert_eq!(scanner.included_files(), [format!("src{sep}Main.java")]);
//! assert_eq!(scanner.excluded_files()?, [format!("src{sep}CVS{sep}Entries")]);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```
//!
//! # See also
//!
//! - [`matching`] for the pattern language.
//! - `filters` for pattern sets and file sets that configure scanners.
//!
//! [`scan`]: DirectoryScanner::scan

mod archive;
mod buckets;
mod classifier;
mod defaults;
mod error;
mod file_scanner;
mod scanner;
mod trace;
mod traversal;

pub use archive::{ArchiveLister, ArchiveScanner};
pub use buckets::{BucketCounts, EntryKind, ScanBuckets};
pub use classifier::{Classification, Classifier};
pub use defaults::{DEFAULT_EXCLUDES, default_excludes};
pub use error::{ScanError, ScanErrorKind};
pub use file_scanner::FileScanner;
pub use scanner::{DirectoryScanner, ScanState, Selection};

#[cfg(test)]
mod tests;
