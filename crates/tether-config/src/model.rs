// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Tether delivery core.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level Tether configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TetherConfig {
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Outbound queue settings.
    #[serde(default)]
    pub queue: QueueConfig,

    /// Reminder cascade settings.
    #[serde(default)]
    pub reminders: RemindersConfig,

    /// Liveness heartbeat settings.
    #[serde(default)]
    pub heartbeat: HeartbeatConfig,

    /// Identity of the device's user.
    #[serde(default)]
    pub device: DeviceConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("tether").join("tether.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("tether.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Outbound queue configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QueueConfig {
    /// Send attempts before a queued message is discarded.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Pause between consecutive sends within one drain, in milliseconds.
    #[serde(default = "default_send_delay_ms")]
    pub send_delay_ms: u64,

    /// Key under which the queue is persisted.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            send_delay_ms: default_send_delay_ms(),
            storage_key: default_storage_key(),
        }
    }
}

impl QueueConfig {
    pub fn send_delay(&self) -> Duration {
        Duration::from_millis(self.send_delay_ms)
    }
}

fn default_max_attempts() -> u32 {
    tether_core::types::DEFAULT_MAX_ATTEMPTS
}

fn default_send_delay_ms() -> u64 {
    500
}

fn default_storage_key() -> String {
    "pending_messages".to_string()
}

/// Reminder cascade configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RemindersConfig {
    /// Delay applied by the snooze action, in minutes.
    #[serde(default = "default_snooze_minutes")]
    pub snooze_minutes: u32,

    /// Categories routed through the critical alarm channel.
    #[serde(default = "default_critical_categories")]
    pub critical_categories: Vec<String>,

    /// Retry tiers after the initial trigger, in escalation order.
    ///
    /// Templates accept `{title}`, `{body}` and `{body_lower}`.
    #[serde(default = "default_tiers")]
    pub tiers: Vec<EscalationTierConfig>,
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            snooze_minutes: default_snooze_minutes(),
            critical_categories: default_critical_categories(),
            tiers: default_tiers(),
        }
    }
}

/// One retry tier of a reminder cascade.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EscalationTierConfig {
    /// Minutes after the scheduled time at which this tier fires.
    pub offset_minutes: u32,

    /// Title template.
    pub title: String,

    /// Body template.
    pub body: String,
}

fn default_snooze_minutes() -> u32 {
    5
}

fn default_critical_categories() -> Vec<String> {
    vec!["medication".to_string()]
}

fn default_tiers() -> Vec<EscalationTierConfig> {
    vec![
        EscalationTierConfig {
            offset_minutes: 15,
            title: "Reminder: {title}".to_string(),
            body: "Please confirm: {body}".to_string(),
        },
        EscalationTierConfig {
            offset_minutes: 20,
            title: "Check-in needed: {title}".to_string(),
            body: "We haven't heard from you. {body}".to_string(),
        },
        EscalationTierConfig {
            offset_minutes: 25,
            title: "Important: {title}".to_string(),
            body: "We haven't heard from you yet. Please respond: {body}".to_string(),
        },
    ]
}

/// Liveness heartbeat configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HeartbeatConfig {
    /// Register the periodic heartbeat task.
    #[serde(default = "default_heartbeat_enabled")]
    pub enabled: bool,

    /// Minutes between periodic heartbeats.
    #[serde(default = "default_heartbeat_interval_minutes")]
    pub interval_minutes: u64,

    /// Identifier of the periodic background task.
    #[serde(default = "default_heartbeat_task_id")]
    pub task_id: String,

    /// Battery percentage below which a low-battery check sends a report.
    #[serde(default = "default_low_battery_percent")]
    pub low_battery_percent: u8,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            enabled: default_heartbeat_enabled(),
            interval_minutes: default_heartbeat_interval_minutes(),
            task_id: default_heartbeat_task_id(),
            low_battery_percent: default_low_battery_percent(),
        }
    }
}

impl HeartbeatConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes * 60)
    }
}

fn default_heartbeat_enabled() -> bool {
    true
}

fn default_heartbeat_interval_minutes() -> u64 {
    15
}

fn default_heartbeat_task_id() -> String {
    "tether-heartbeat".to_string()
}

fn default_low_battery_percent() -> u8 {
    20
}

/// Device identity configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceConfig {
    /// Patient id messages and heartbeats are attributed to. `None` until paired.
    #[serde(default)]
    pub subject_id: Option<String>,
}
