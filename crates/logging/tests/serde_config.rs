//! Serialization of verbosity configuration (requires the `serde` feature).

#![cfg(feature = "serde")]

use logging::{Severity, VerbosityConfig};

#[test]
fn verbosity_config_survives_json() {
    let mut config = VerbosityConfig::from_verbose_level(2);
    config.apply_debug_flag("match3").unwrap();

    let json = serde_json::to_string(&config).expect("serialize");
    let decoded: VerbosityConfig = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(decoded, config);
}

#[test]
fn severity_serializes_by_variant_name() {
    let json = serde_json::to_string(&Severity::Warn).expect("serialize");
    assert_eq!(json, "\"Warn\"");
}
