// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as positive attempt ceilings and strictly increasing tier offsets.

use std::str::FromStr;

use tether_core::types::ReminderCategory;

use crate::diagnostic::ConfigError;
use crate::model::TetherConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns all collected validation errors (does not fail fast).
pub fn validate_config(config: &TetherConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.logging.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::validation(format!(
            "logging.level `{}` must be one of {}",
            config.logging.level,
            LOG_LEVELS.join(", ")
        )));
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::validation(
            "storage.database_path must not be empty",
        ));
    }

    if config.queue.max_attempts == 0 {
        errors.push(ConfigError::validation(
            "queue.max_attempts must be at least 1",
        ));
    }

    if config.queue.storage_key.trim().is_empty() {
        errors.push(ConfigError::validation(
            "queue.storage_key must not be empty",
        ));
    }

    if config.reminders.snooze_minutes == 0 {
        errors.push(ConfigError::validation(
            "reminders.snooze_minutes must be at least 1",
        ));
    }

    for category in &config.reminders.critical_categories {
        if ReminderCategory::from_str(category).is_err() {
            errors.push(ConfigError::validation(format!(
                "reminders.critical_categories contains unknown category `{category}`"
            )));
        }
    }

    let mut previous_offset = 0;
    for (i, tier) in config.reminders.tiers.iter().enumerate() {
        if tier.offset_minutes <= previous_offset {
            errors.push(ConfigError::validation(format!(
                "reminders.tiers[{i}].offset_minutes must be greater than {previous_offset}, got {}",
                tier.offset_minutes
            )));
        }
        previous_offset = previous_offset.max(tier.offset_minutes);

        if tier.title.trim().is_empty() {
            errors.push(ConfigError::validation(format!(
                "reminders.tiers[{i}].title must not be empty"
            )));
        }
        if tier.body.trim().is_empty() {
            errors.push(ConfigError::validation(format!(
                "reminders.tiers[{i}].body must not be empty"
            )));
        }
    }

    if config.heartbeat.interval_minutes == 0 {
        errors.push(ConfigError::validation(
            "heartbeat.interval_minutes must be at least 1",
        ));
    }

    if config.heartbeat.task_id.trim().is_empty() {
        errors.push(ConfigError::validation(
            "heartbeat.task_id must not be empty",
        ));
    }

    if config.heartbeat.low_battery_percent > 100 {
        errors.push(ConfigError::validation(format!(
            "heartbeat.low_battery_percent must be at most 100, got {}",
            config.heartbeat.low_battery_percent
        )));
    }

    if let Some(subject) = &config.device.subject_id
        && subject.trim().is_empty()
    {
        errors.push(ConfigError::validation(
            "device.subject_id must not be empty when set",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
