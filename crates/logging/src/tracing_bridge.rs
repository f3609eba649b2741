//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the scanset verbosity flags.
//!
//! [`ScanLayer`] is a `tracing_subscriber` layer that maps events emitted
//! under `scanset::<flag>` targets onto the info/debug flag system, so code
//! written against the standard tracing macros lands in the same
//! thread-local event buffer as [`debug_log!`](crate::debug_log).
//!
//! Mapping rules:
//!
//! - `ERROR` and `WARN` events become warnings regardless of the target.
//! - `INFO` events map onto the info flag named by the last target segment.
//! - `DEBUG` and `TRACE` events map onto the debug flag named by the last
//!   target segment at levels 1 and 2.
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! init_tracing(VerbosityConfig::from_verbose_level(2));
//! tracing::debug!(target: "scanset::scan", "entering src");
//! ```

use super::config::VerbosityConfig;
use super::levels::{DebugFlag, InfoFlag};
use super::thread_local::{debug_gte, emit_debug, emit_info, emit_warning, info_gte};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// A tracing layer that forwards `scanset::*` events to the event buffer.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScanLayer;

impl ScanLayer {
    /// Creates the layer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn flag_name(target: &str) -> &str {
        target.rsplit("::").next().unwrap_or(target)
    }

    /// Map a tracing target to an info flag.
    fn target_to_info_flag(target: &str) -> Option<InfoFlag> {
        let name = Self::flag_name(target);
        InfoFlag::ALL.into_iter().find(|flag| flag.name() == name)
    }

    /// Map a tracing target to a debug flag.
    fn target_to_debug_flag(target: &str) -> Option<DebugFlag> {
        let name = Self::flag_name(target);
        DebugFlag::ALL.into_iter().find(|flag| flag.name() == name)
    }

    const fn debug_level(level: &Level) -> u8 {
        if matches!(*level, Level::TRACE) { 2 } else { 1 }
    }
}

impl<S> Layer<S> for ScanLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();
        let level = *metadata.level();

        let message = || {
            let mut visitor = MessageVisitor::default();
            event.record(&mut visitor);
            visitor.message
        };

        if level == Level::ERROR || level == Level::WARN {
            if let Some(message) = message() {
                emit_warning(message);
            }
            return;
        }

        if level == Level::INFO {
            if let Some(flag) = Self::target_to_info_flag(target) {
                if info_gte(flag, 1) {
                    if let Some(message) = message() {
                        emit_info(flag, 1, message);
                    }
                }
            }
            return;
        }

        if let Some(flag) = Self::target_to_debug_flag(target) {
            let verbosity = Self::debug_level(&level);
            if debug_gte(flag, verbosity) {
                if let Some(message) = message() {
                    emit_debug(flag, verbosity, message);
                }
            }
        }
    }
}

/// Visitor to extract the message field from a tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Installs [`ScanLayer`] as the global subscriber and applies `config` to
/// the current thread.
///
/// Returns `false` when a global subscriber was already installed; the
/// thread-local configuration is applied either way.
pub fn init_tracing(config: VerbosityConfig) -> bool {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    super::thread_local::init(config);
    tracing_subscriber::registry()
        .with(ScanLayer::new())
        .try_init()
        .is_ok()
}

/// Like [`init_tracing`], with an additional filter layer such as
/// `tracing_subscriber::EnvFilter`.
pub fn init_tracing_with_filter<F>(config: VerbosityConfig, filter: F) -> bool
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    super::thread_local::init(config);
    tracing_subscriber::registry()
        .with(filter)
        .with(ScanLayer::new())
        .try_init()
        .is_ok()
}
