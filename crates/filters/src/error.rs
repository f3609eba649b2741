//! crates/filters/src/error.rs
//!
//! Configuration errors raised while building or resolving data types.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use walk::ScanError;

use crate::registry::RefId;

/// Which side of a pattern set a list file feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    /// An includes file.
    Includes,
    /// An excludes file.
    Excludes,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Includes => "Includesfile",
            Self::Excludes => "Excludesfile",
        })
    }
}

/// Errors produced while configuring or resolving pattern sets, file sets
/// and path lists.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A reference chain leads back to one of its own members.
    #[error("This data type contains a circular reference: {chain}")]
    CircularReference {
        /// Reference ids along the cycle, joined with ` -> `.
        chain: String,
    },
    /// No data type is registered under the id.
    #[error("Reference {id} not found.")]
    UnknownReference {
        /// Missing id.
        id: RefId,
    },
    /// The id names a data type of another kind.
    #[error("{id} doesn't denote a {expected} (found a {found})")]
    ReferenceTypeMismatch {
        /// Offending id.
        id: RefId,
        /// Kind the caller asked for.
        expected: &'static str,
        /// Kind actually registered.
        found: &'static str,
    },
    /// Patterns or attributes were added to a reference.
    #[error("You must not specify nested elements or attributes when using refid {id}")]
    NotAllowedOnReference {
        /// The reference the value points to.
        id: RefId,
    },
    /// A value with its own configuration was turned into a reference.
    #[error("You must not specify more than one attribute when using refid")]
    TooManyAttributes,
    /// `append` was called on a reference.
    #[error("Cannot append to a reference ({id})")]
    AppendToReference {
        /// The reference the value points to.
        id: RefId,
    },
    /// A file set has neither `dir` nor `src`.
    #[error("No directory specified for fileset.")]
    NoDirectory,
    /// A file set has both `dir` and `src`.
    #[error("Cannot set both dir and src attributes")]
    DirAndSrc,
    /// A file set has both `dir` and `file`.
    #[error("Cannot set both dir and file attributes")]
    DirAndFile,
    /// `file` was set twice with different values.
    #[error("setFile cannot be called twice with different arguments")]
    FileTwice,
    /// The file set's directory does not exist.
    #[error("{} does not exist.", path.display())]
    MissingDirectory {
        /// Resolved directory.
        path: PathBuf,
    },
    /// The file set's directory is not a directory.
    #[error("{} is not a directory.", path.display())]
    NotADirectory {
        /// Resolved directory.
        path: PathBuf,
    },
    /// A pattern list file does not exist.
    #[error("{kind} {} not found.", path.display())]
    MissingListFile {
        /// Includes or excludes.
        kind: ListKind,
        /// Resolved list file.
        path: PathBuf,
    },
    /// A pattern list file could not be read.
    #[error("An error occurred while reading from pattern file: {}", path.display())]
    ReadListFile {
        /// Resolved list file.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// Scanning a resolved file set failed.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

impl ConfigError {
    /// Reports whether the failure came from the filesystem rather than from
    /// the configuration.
    #[must_use]
    pub fn is_io(&self) -> bool {
        match self {
            Self::ReadListFile { .. } => true,
            Self::Scan(error) => error.is_io(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn messages_name_the_offender() {
        let error = ConfigError::ReferenceTypeMismatch {
            id: RefId::from("src.files"),
            expected: "patternset",
            found: "path",
        };
        assert_eq!(
            error.to_string(),
            "src.files doesn't denote a patternset (found a path)"
        );

        let error = ConfigError::MissingListFile {
            kind: ListKind::Excludes,
            path: PathBuf::from("/work/excludes.txt"),
        };
        assert_eq!(error.to_string(), "Excludesfile /work/excludes.txt not found.");
    }

    #[test]
    fn read_failures_keep_their_source() {
        let error = ConfigError::ReadListFile {
            path: PathBuf::from("list"),
            source: io::Error::new(io::ErrorKind::InvalidData, "not utf-8"),
        };
        assert!(error.is_io());
        assert_eq!(error.source().map(ToString::to_string).as_deref(), Some("not utf-8"));
    }

    #[test]
    fn configuration_errors_are_not_io() {
        assert!(!ConfigError::NoDirectory.is_io());
        assert!(!ConfigError::TooManyAttributes.is_io());
    }
}
