#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `matching` implements the glob language used by file selection:
//!
//! - `*` matches zero or more characters within one path segment,
//! - `?` matches exactly one character,
//! - `**`, as a whole segment, matches zero or more whole segments.
//!
//! [`match_segment`], [`match_path`] and [`match_prefix`] are pure
//! functions. [`Pattern`] wraps a pattern string with optional property
//! conditions, and [`PropertyResolver`] supplies the values those
//! conditions and `${name}` substitutions read.
//!
//! # Design
//!
//! Segment and path matching share one star algorithm: literal prefix,
//! literal suffix, then leftmost placement of every star-delimited block.
//! Paths are split on both `/` and `\`, with empty segments dropped.
//!
//! # Invariants
//!
//! - A pattern and a path must agree on a leading separator to match.
//! - [`match_prefix`] never returns `false` for a directory that holds an
//!   entry matched by [`match_path`] with the same pattern.
//!
//! # Examples
//!
//! ```
//! use matching::{match_path, match_prefix};
//!
//! assert!(match_path("**/CVS/**", "src/CVS/Entries", true));
//! assert!(match_prefix("src/**/*.rs", "src/deep", true));
//! ```
//!
//! # See also
//!
//! - `walk::DirectoryScanner`, the main consumer of these functions.

mod glob;
mod pattern;
mod properties;

pub use glob::{RECURSIVE_WILDCARD, is_separator, match_path, match_prefix, match_segment};
pub use pattern::{Pattern, normalize_pattern, normalize_separators, split_pattern_list};
pub use properties::{NoProperties, PropertyResolver, substitute_properties};
