// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Tether configuration system.

use std::io::Write;

use tether_config::diagnostic::ConfigError;
use tether_config::model::TetherConfig;
use tether_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_tether_config() {
    let toml = r#"
[logging]
level = "debug"

[storage]
database_path = "/tmp/tether-test.db"
wal_mode = false

[queue]
max_attempts = 3
send_delay_ms = 100
storage_key = "outbox"

[reminders]
snooze_minutes = 10
critical_categories = ["medication", "meal"]

[[reminders.tiers]]
offset_minutes = 10
title = "Again: {title}"
body = "{body}"

[[reminders.tiers]]
offset_minutes = 30
title = "Urgent: {title}"
body = "Please answer: {body_lower}"

[heartbeat]
enabled = false
interval_minutes = 30
task_id = "hb"
low_battery_percent = 15

[device]
subject_id = "patient-7"
"#;

    let config = load_and_validate_str(toml).expect("valid TOML should load");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.storage.database_path, "/tmp/tether-test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.queue.max_attempts, 3);
    assert_eq!(config.queue.send_delay_ms, 100);
    assert_eq!(config.queue.storage_key, "outbox");
    assert_eq!(config.reminders.snooze_minutes, 10);
    assert_eq!(config.reminders.critical_categories, vec!["medication", "meal"]);
    assert_eq!(config.reminders.tiers.len(), 2);
    assert_eq!(config.reminders.tiers[1].offset_minutes, 30);
    assert!(!config.heartbeat.enabled);
    assert_eq!(config.heartbeat.interval_minutes, 30);
    assert_eq!(config.heartbeat.task_id, "hb");
    assert_eq!(config.heartbeat.low_battery_percent, 15);
    assert_eq!(config.device.subject_id.as_deref(), Some("patient-7"));
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.logging.level, "info");
    assert!(config.storage.wal_mode);
    assert_eq!(config.queue.max_attempts, 5);
    assert_eq!(config.queue.send_delay_ms, 500);
    assert_eq!(config.queue.storage_key, "pending_messages");
    assert_eq!(config.reminders.snooze_minutes, 5);
    assert_eq!(config.reminders.critical_categories, vec!["medication"]);
    assert_eq!(config.reminders.tiers.len(), 3);
    assert!(config.heartbeat.enabled);
    assert_eq!(config.heartbeat.interval_minutes, 15);
    assert_eq!(config.heartbeat.low_battery_percent, 20);
    assert!(config.device.subject_id.is_none());
}

/// Unknown key in a section becomes an UnknownKey diagnostic with a suggestion.
#[test]
fn unknown_key_produces_suggestion() {
    let toml = r#"
[queue]
max_atempts = 3
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown key");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "max_atempts");
            assert_eq!(suggestion.as_deref(), Some("max_attempts"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[telemetry]
enabled = true
"#;

    let err = load_config_from_str(toml).expect_err("unknown section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("telemetry"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// A string where a number is expected is an InvalidType diagnostic.
#[test]
fn wrong_type_produces_invalid_type() {
    let toml = r#"
[heartbeat]
interval_minutes = "often"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject wrong type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("interval_minutes"))),
        "got: {errors:?}"
    );
}

/// Semantic violations surface as validation diagnostics after deserialization.
#[test]
fn validation_runs_after_load() {
    let toml = r#"
[queue]
max_attempts = 0

[[reminders.tiers]]
offset_minutes = 20
title = "a"
body = "b"

[[reminders.tiers]]
offset_minutes = 15
title = "c"
body = "d"
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert_eq!(errors.len(), 2, "got: {errors:?}");
    assert!(errors.iter().all(|e| matches!(e, ConfigError::Validation { .. })));
}

/// An explicit config file is loaded and validated.
#[test]
#[serial_test::serial]
fn loads_from_explicit_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[queue]\nsend_delay_ms = 0").unwrap();

    let config = load_and_validate_path(file.path()).expect("file should load");
    assert_eq!(config.queue.send_delay_ms, 0);
}

/// Typos in an explicit file point back into that file.
#[test]
#[serial_test::serial]
fn unknown_key_in_file_carries_source() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[heartbeat]\nenabeld = true").unwrap();

    let errors = load_and_validate_path(file.path()).expect_err("should reject typo");
    match &errors[0] {
        ConfigError::UnknownKey {
            suggestion, src, ..
        } => {
            assert_eq!(suggestion.as_deref(), Some("enabled"));
            assert!(src.is_some());
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

/// Serialized defaults survive a round-trip through TOML.
#[test]
fn defaults_serialize_to_loadable_toml() {
    let rendered = toml::to_string(&TetherConfig::default()).expect("defaults should serialize");
    let reloaded = load_and_validate_str(&rendered).expect("rendered defaults should reload");
    assert_eq!(reloaded.reminders.tiers, TetherConfig::default().reminders.tiers);
}

/// Diagnostics render without panicking.
#[test]
fn render_errors_handles_every_variant() {
    let errors = vec![
        ConfigError::MissingKey { key: "x".into() },
        ConfigError::Validation {
            message: "bad".into(),
        },
        ConfigError::Other("other".into()),
    ];
    tether_config::render_errors(&errors);
}
