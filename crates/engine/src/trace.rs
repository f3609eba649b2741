//! Structured tracing for freshness decisions.
//!
//! No-op unless the `tracing` feature is enabled.

#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn source_checked(name: &str, targets: usize, stale: bool) {
    logging::trace_fresh!(name = name, targets = targets, stale = stale, "source_checked");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn source_checked(_name: &str, _targets: usize, _stale: bool) {}

#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn restrict_finished(candidates: usize, stale: usize) {
    logging::trace_fresh!(candidates = candidates, stale = stale, "restrict_finished");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn restrict_finished(_candidates: usize, _stale: usize) {}
