//! crates/logging/src/tracing_macros.rs
//! Convenience macros that emit tracing events under the `scanset::*`
//! targets understood by [`ScanLayer`](crate::ScanLayer).
//!
//! The calling crate must depend on `tracing` itself.

/// Emit a directory traversal trace.
///
/// # Example
/// ```ignore
/// trace_scan!("entering {}", dir.display());
/// ```
#[macro_export]
macro_rules! trace_scan {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "scanset::scan", $($arg)*);
    };
}

/// Emit a per-pattern match trace.
#[macro_export]
macro_rules! trace_match {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "scanset::match", $($arg)*);
    };
}

/// Emit a reference resolution trace.
#[macro_export]
macro_rules! trace_refs {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "scanset::refs", $($arg)*);
    };
}

/// Emit a freshness comparison trace.
#[macro_export]
macro_rules! trace_fresh {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "scanset::fresh", $($arg)*);
    };
}
