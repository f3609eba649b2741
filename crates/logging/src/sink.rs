//! crates/logging/src/sink.rs
//! Severity-tagged log sinks handed to library code that reports progress.

use std::cell::RefCell;
use std::fmt;
use std::io::Write;

use super::levels::{DebugFlag, InfoFlag};
use super::thread_local::{debug_gte, emit_debug, emit_info, emit_warning, info_gte};

/// Importance of a message handed to a [`LogSink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// A failure the user must see.
    Error,
    /// A suspicious condition that does not stop the operation.
    Warn,
    /// Normal progress output.
    Info,
    /// Additional detail shown in verbose mode.
    Verbose,
    /// Developer-level tracing.
    Debug,
}

impl Severity {
    /// Lower-case label used when rendering records.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warning",
            Self::Info => "info",
            Self::Verbose => "verbose",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Destination for `(message, severity)` pairs.
pub trait LogSink {
    /// Records a single message.
    fn log(&self, message: &str, severity: Severity);
}

impl<T: LogSink + ?Sized> LogSink for &T {
    fn log(&self, message: &str, severity: Severity) {
        (**self).log(message, severity);
    }
}

impl<T: LogSink + ?Sized> LogSink for Box<T> {
    fn log(&self, message: &str, severity: Severity) {
        (**self).log(message, severity);
    }
}

/// Sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _message: &str, _severity: Severity) {}
}

/// Sink that feeds the thread-local diagnostic event buffer.
///
/// Errors and warnings always become [`DiagnosticEvent::Warning`](crate::DiagnosticEvent)
/// records. `Info` maps onto the configured info flag at level 1, while
/// `Verbose` and `Debug` map onto the debug flag at levels 1 and 2.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticSink {
    info: InfoFlag,
    debug: DebugFlag,
}

impl DiagnosticSink {
    /// Creates a sink bound to the given flag pair.
    #[must_use]
    pub const fn new(info: InfoFlag, debug: DebugFlag) -> Self {
        Self { info, debug }
    }
}

impl LogSink for DiagnosticSink {
    fn log(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Error | Severity::Warn => emit_warning(message.to_owned()),
            Severity::Info => {
                if info_gte(self.info, 1) {
                    emit_info(self.info, 1, message.to_owned());
                }
            }
            Severity::Verbose | Severity::Debug => {
                let level = if severity == Severity::Verbose { 1 } else { 2 };
                if debug_gte(self.debug, level) {
                    emit_debug(self.debug, level, message.to_owned());
                }
            }
        }
    }
}

/// A single record captured by [`MemorySink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRecord {
    /// Severity the record was logged at.
    pub severity: Severity,
    /// Message text.
    pub message: String,
}

/// Sink that keeps every record in memory, mostly for assertions in tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: RefCell<Vec<LogRecord>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the captured records.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.borrow().clone()
    }

    /// Returns the messages logged at exactly `severity`.
    #[must_use]
    pub fn messages_at(&self, severity: Severity) -> Vec<String> {
        self.records
            .borrow()
            .iter()
            .filter(|record| record.severity == severity)
            .map(|record| record.message.clone())
            .collect()
    }
}

impl LogSink for MemorySink {
    fn log(&self, message: &str, severity: Severity) {
        self.records.borrow_mut().push(LogRecord {
            severity,
            message: message.to_owned(),
        });
    }
}

/// Sink that renders records as `"<program> <severity>: <message>"` lines.
///
/// Records below `threshold` are dropped. Write failures are ignored because
/// a diagnostic channel has nowhere left to report them.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: RefCell<W>,
    program: String,
    threshold: Severity,
}

impl<W: Write> WriterSink<W> {
    /// Creates a sink that shows records up to and including `Info`.
    pub fn new(writer: W, program: impl Into<String>) -> Self {
        Self {
            writer: RefCell::new(writer),
            program: program.into(),
            threshold: Severity::Info,
        }
    }

    /// Sets the least important severity that is still rendered.
    #[must_use]
    pub fn with_threshold(mut self, threshold: Severity) -> Self {
        self.threshold = threshold;
        self
    }

    /// Consumes the sink and returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write> LogSink for WriterSink<W> {
    fn log(&self, message: &str, severity: Severity) {
        if severity > self.threshold {
            return;
        }
        let mut writer = self.writer.borrow_mut();
        let _ = writeln!(writer, "{} {}: {}", self.program, severity, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiagnosticEvent, VerbosityConfig, drain_events, init};

    #[test]
    fn severity_orders_from_most_to_least_important() {
        assert!(Severity::Error < Severity::Warn);
        assert!(Severity::Info < Severity::Verbose);
        assert_eq!(Severity::Warn.to_string(), "warning");
    }

    #[test]
    fn memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.log("one", Severity::Info);
        sink.log("two", Severity::Warn);
        sink.log("three", Severity::Info);

        assert_eq!(sink.records().len(), 3);
        assert_eq!(sink.messages_at(Severity::Info), ["one", "three"]);
        assert_eq!(sink.messages_at(Severity::Warn), ["two"]);
    }

    #[test]
    fn writer_sink_filters_by_threshold() {
        let sink = WriterSink::new(Vec::new(), "scanset");
        sink.log("kept", Severity::Warn);
        sink.log("dropped", Severity::Verbose);

        let output = String::from_utf8(sink.into_inner()).expect("utf-8");
        assert_eq!(output, "scanset warning: kept\n");
    }

    #[test]
    fn writer_sink_threshold_can_be_lowered() {
        let sink = WriterSink::new(Vec::new(), "scanset").with_threshold(Severity::Debug);
        sink.log("a", Severity::Debug);
        sink.log("b", Severity::Error);

        let output = String::from_utf8(sink.into_inner()).expect("utf-8");
        assert_eq!(output, "scanset debug: a\nscanset error: b\n");
    }

    #[test]
    fn diagnostic_sink_respects_flag_levels() {
        let mut config = VerbosityConfig::default();
        config.debug.fresh = 1;
        init(config);
        drain_events();

        let sink = DiagnosticSink::new(InfoFlag::Select, DebugFlag::Fresh);
        sink.log("verbose", Severity::Verbose);
        sink.log("debug", Severity::Debug);
        sink.log("info", Severity::Info);
        sink.log("warn", Severity::Warn);

        let events = drain_events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            DiagnosticEvent::Debug {
                flag: DebugFlag::Fresh,
                level: 1,
                message: "verbose".to_string(),
            }
        );
        assert_eq!(
            events[1],
            DiagnosticEvent::Warning {
                message: "warn".to_string()
            }
        );
    }

    #[test]
    fn null_sink_accepts_everything() {
        let sink: Box<dyn LogSink> = Box::new(NullSink);
        sink.log("ignored", Severity::Error);
    }
}
