//! Structured tracing for reference resolution and file set setup.
//!
//! No-op unless the `tracing` feature is enabled.

use crate::registry::RefId;

/// Traces a successful cycle check.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn references_checked(id: &RefId, reachable: usize) {
    logging::trace_refs!(id = %id, reachable = reachable, "references_checked");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn references_checked(_id: &RefId, _reachable: usize) {}

/// Traces a reference being followed to its target.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn reference_followed(id: &RefId, kind: &'static str) {
    logging::trace_refs!(id = %id, kind = kind, "reference_followed");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn reference_followed(_id: &RefId, _kind: &'static str) {}

/// Traces the scanner configuration derived from a file set.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn scanner_configured(root: &std::path::Path, includes: usize, excludes: usize) {
    logging::trace_scan!(
        root = %root.display(),
        includes = includes,
        excludes = excludes,
        "scanner_configured"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn scanner_configured(_root: &std::path::Path, _includes: usize, _excludes: usize) {}
