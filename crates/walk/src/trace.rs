//! Structured tracing for traversal and classification.
//!
//! Every function compiles to an inline no-op unless the `tracing` feature is
//! enabled, so call sites stay unconditional.

use crate::buckets::BucketCounts;
use crate::classifier::Classification;

// ============================================================================
// Tracing functions (feature-gated)
// ============================================================================

/// Traces the start of a scan pass.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn scan_started(basedir: &std::path::Path, fast: bool) {
    logging::trace_scan!(basedir = %basedir.display(), fast = fast, "scan_started");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn scan_started(_basedir: &std::path::Path, _fast: bool) {}

/// Traces the bucket sizes after a pass.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn scan_finished(counts: &BucketCounts) {
    logging::trace_scan!(
        files_included = counts.files_included,
        files_excluded = counts.files_excluded,
        files_not_included = counts.files_not_included,
        dirs_included = counts.dirs_included,
        dirs_excluded = counts.dirs_excluded,
        dirs_not_included = counts.dirs_not_included,
        "scan_finished"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn scan_finished(_counts: &BucketCounts) {}

/// Traces a directory skipped by prefix pruning.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn directory_pruned(name: &str) {
    logging::trace_scan!(name = %name, "directory_pruned");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn directory_pruned(_name: &str) {}

/// Traces one classification decision.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn entry_classified(name: &str, class: Classification) {
    logging::trace_match!(name = %name, class = class.label(), "entry_classified");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn entry_classified(_name: &str, _class: Classification) {}
