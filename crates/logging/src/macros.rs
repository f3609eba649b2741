//! crates/logging/src/macros.rs
//! Level-gated logging macros backed by the thread-local event buffer.

/// Records a debug event when `flag` is enabled at `level` or above.
///
/// The message is only formatted when the level check passes.
///
/// # Example
/// ```
/// use logging::{debug_log, drain_events, init, VerbosityConfig};
///
/// let mut config = VerbosityConfig::default();
/// config.debug.scan = 2;
/// init(config);
///
/// debug_log!(Scan, 2, "entering {}", "src");
/// debug_log!(Scan, 3, "suppressed");
/// assert_eq!(drain_events().len(), 1);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($flag:ident, $level:expr, $($arg:tt)+) => {{
        let level: u8 = $level;
        if $crate::debug_gte($crate::DebugFlag::$flag, level) {
            $crate::emit_debug($crate::DebugFlag::$flag, level, ::std::format!($($arg)+));
        }
    }};
}

/// Records an info event when `flag` is enabled at `level` or above.
#[macro_export]
macro_rules! info_log {
    ($flag:ident, $level:expr, $($arg:tt)+) => {{
        let level: u8 = $level;
        if $crate::info_gte($crate::InfoFlag::$flag, level) {
            $crate::emit_info($crate::InfoFlag::$flag, level, ::std::format!($($arg)+));
        }
    }};
}

/// Records a warning event unconditionally.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)+) => {
        $crate::emit_warning(::std::format!($($arg)+))
    };
}
