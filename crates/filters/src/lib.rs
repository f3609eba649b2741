#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `filters` holds the declarative selection types of the workspace:
//! [`PatternSet`] (include and exclude patterns, optionally read from list
//! files), [`FileSet`] (a directory or archive plus patterns) and
//! [`PathList`] (an ordered, de-duplicated list of locations). Values can be
//! registered by name in a [`Registry`] and referenced from elsewhere.
//!
//! # Design
//!
//! - Every referencable type is either owned configuration or a
//!   [`RefId`] naming a registered value. Mutating a reference fails with
//!   [`ConfigError::NotAllowedOnReference`].
//! - Resolution takes a [`Context`] bundling the registry, the property
//!   resolver, the base directory and an optional archive lister. Relative
//!   locations resolve against the base directory.
//! - File sets configure a [`walk::DirectoryScanner`] (or
//!   [`walk::ArchiveScanner`] for `src`) and hand it back as a
//!   [`walk::FileScanner`] trait object.
//!
//! # Invariants
//!
//! - Following references never revisits an id; the check runs before any
//!   dereference and is cached until the registry changes.
//! - A list file is read at most once per pattern set.
//! - [`PathList::resolve`] keeps the first occurrence of every location and
//!   never reorders entries.
//!
//! # Errors
//!
//! All failures surface as [`ConfigError`]. Scan failures are wrapped
//! transparently; [`ConfigError::is_io`] distinguishes I/O problems from
//! configuration mistakes.
//!
//! # Examples
//!
//! ```
//! use filters::{Context, FileSet, FileSetSpec, PathList, Registry};
//! use std::fs;
//!
//! let dir = tempfile::tempdir().unwrap();
//! fs::create_dir(dir.path().join("lib")).unwrap();
//! fs::write(dir.path().join("lib/core.jar"), b"").unwrap();
//! fs::write(dir.path().join("lib/README"), b"").unwrap();
//!
//! let mut registry = Registry::new();
//! registry.insert(
//!     "libs",
//!     FileSet::from(FileSetSpec::new().with_dir("lib").with_includes("*.jar")),
//! );
//!
//! let mut classpath = PathList::new();
//! classpath.add_literal("classes");
//! classpath.add_reference("libs");
//!
//! let context = Context::new(&registry, dir.path());
//! let entries = classpath.resolve(&context).unwrap();
//! assert_eq!(entries.len(), 2);
//! assert!(entries[1].ends_with("core.jar"));
//! ```
//!
//! # See also
//!
//! - [`walk`] for the scanner these types configure.
//! - [`matching`] for the pattern language.

mod context;
mod error;
mod file_set;
mod path_list;
mod pattern_set;
mod registry;
mod trace;

pub use context::Context;
pub use error::{ConfigError, ListKind};
pub use file_set::{FileSet, FileSetSpec};
pub use path_list::{PATH_LIST_SEPARATOR, PathElement, PathList, split_path_list};
pub use pattern_set::{PatternLists, PatternSet};
pub use registry::{DataType, RefId, Registry};

#[cfg(test)]
mod tests;
