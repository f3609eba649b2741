#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` carries the diagnostic plumbing shared by every scanset crate:
//! per-category verbosity flags, a thread-local event buffer fed by the
//! [`debug_log!`], [`info_log!`] and [`warn_log!`] macros, and the
//! [`LogSink`] abstraction that library code receives when it has to report
//! `(message, severity)` pairs to its host.
//!
//! # Design
//!
//! - [`VerbosityConfig`] combines [`InfoLevels`] and [`DebugLevels`]. It is
//!   built from a `-v` count or from `flag[level]` tokens such as `scan2`.
//! - [`init`] installs a configuration for the current thread. The macros
//!   consult it through [`info_gte`] / [`debug_gte`] before formatting
//!   anything, so disabled diagnostics cost a thread-local lookup.
//! - Events accumulate until [`drain_events`] hands them to the front end.
//! - [`DiagnosticSink`], [`MemorySink`], [`WriterSink`] and [`NullSink`]
//!   implement [`LogSink`].
//! - With the `tracing` feature, `ScanLayer` forwards `tracing` events under
//!   `scanset::*` targets into the same buffer.
//!
//! # Invariants
//!
//! - State is per thread; scanners never share a buffer across threads.
//! - Warnings are recorded regardless of the configured levels.
//!
//! # Errors
//!
//! Flag parsing returns a `String` describing the unknown flag or malformed
//! level.
//!
//! # Examples
//!
//! ```
//! use logging::{DebugFlag, DiagnosticEvent, VerbosityConfig, debug_log, drain_events, init};
//!
//! let mut config = VerbosityConfig::default();
//! config.apply_debug_flag("scan2").unwrap();
//! init(config);
//!
//! debug_log!(Scan, 1, "visiting {}", "src/main");
//! let events = drain_events();
//! assert!(matches!(
//!     &events[0],
//!     DiagnosticEvent::Debug { flag: DebugFlag::Scan, level: 1, .. }
//! ));
//! ```
//!
//! # See also
//!
//! - `walk` and `engine`, the main producers of diagnostics.

mod config;
mod levels;
mod macros;
mod sink;
mod thread_local;

#[cfg(feature = "tracing")]
mod tracing_bridge;
#[cfg(feature = "tracing")]
mod tracing_macros;

pub use config::VerbosityConfig;
pub use levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};
pub use sink::{DiagnosticSink, LogRecord, LogSink, MemorySink, NullSink, Severity, WriterSink};
pub use thread_local::{
    DiagnosticEvent, apply_debug_flag, apply_info_flag, current, debug_gte, drain_events,
    emit_debug, emit_info, emit_warning, info_gte, init,
};

#[cfg(feature = "tracing")]
pub use tracing_bridge::{ScanLayer, init_tracing, init_tracing_with_filter};
