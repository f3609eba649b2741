#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `engine` answers the incremental-build question: given a list of source
//! names, which of them have targets that are missing or older? Targets are
//! derived from sources by a [`FileNameMapper`].
//!
//! # Design
//!
//! - [`Mapper`] is a closed set of built-in variants selected by
//!   [`MapperKind`] plus `from`/`to` parameters. Hosts that need more
//!   register factories in a [`MapperRegistry`].
//! - [`FreshnessScanner`] compares modification times through the
//!   filesystem and reports every decision to a [`logging::LogSink`].
//! - [`FreshnessScanner::restrict_file_set`] connects the scanner to a
//!   [`filters::FileSet`] so callers can go from configuration to stale
//!   files in one step.
//!
//! # Invariants
//!
//! - A source appears at most once in the result, in input order.
//! - Equal modification times are fresh; a missing target is stale.
//! - A source the mapper does not handle is never selected.
//!
//! # Errors
//!
//! Building mappers reports [`MapperError`]. Freshness checks themselves
//! never fail: unreadable timestamps count as missing targets or as
//! epoch-dated sources.
//!
//! # Examples
//!
//! ```
//! use engine::{FreshnessScanner, MapperRegistry};
//! use std::fs;
//!
//! let src = tempfile::tempdir().unwrap();
//! let dest = tempfile::tempdir().unwrap();
//! fs::write(src.path().join("index.md"), b"# hi").unwrap();
//!
//! let mapper = MapperRegistry::with_builtins()
//!     .create("glob", Some("*.md"), Some("*.html"))
//!     .unwrap();
//! let stale = FreshnessScanner::default().restrict(
//!     &["index.md", "logo.png"],
//!     src.path(),
//!     dest.path(),
//!     mapper.as_ref(),
//! );
//! assert_eq!(stale, ["index.md"]);
//! ```
//!
//! # See also
//!
//! - [`walk`] for producing the source names.

mod error;
mod freshness;
mod mapper;
mod trace;

pub use error::MapperError;
pub use freshness::{COARSE_TIMESTAMP_SLACK, DEFAULT_FUTURE_SLACK, FreshnessScanner};
pub use mapper::{
    FileNameMapper, GlobMapper, Mapper, MapperFactory, MapperKind, MapperRegistry, RegexpMapper,
};
