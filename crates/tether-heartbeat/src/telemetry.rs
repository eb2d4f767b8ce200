// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-effort telemetry collection.
//!
//! Every read is independent. A failed read is logged and replaced by its
//! default; collection itself never fails.

use chrono::Utc;
use tracing::warn;

use tether_core::{ActivityType, AppState, DeviceInfo, DeviceTelemetry, HeartbeatReport, TetherError};

/// Battery percent reported when the level cannot be read.
const DEFAULT_BATTERY_PERCENT: u8 = 100;

/// Network type reported when it cannot be read.
const UNKNOWN_NETWORK: &str = "unknown";

/// Assemble a heartbeat report for `activity`.
pub async fn collect_report(telemetry: &dyn DeviceTelemetry, activity: ActivityType) -> HeartbeatReport {
    let battery_level = or_default(
        "battery_level",
        telemetry.battery_level().await.map(battery_percent),
        DEFAULT_BATTERY_PERCENT,
    );
    let is_charging = or_default("is_charging", telemetry.is_charging().await, false);
    let app_state = or_default("app_state", telemetry.app_state().await, AppState::Active);
    let network_type = or_default(
        "network_type",
        telemetry.network_type().await,
        UNKNOWN_NETWORK.to_string(),
    );
    let device = or_default("device_info", telemetry.device_info().await, DeviceInfo::default());
    let last_interaction = or_default("last_interaction", telemetry.last_interaction().await, None);

    HeartbeatReport {
        activity_type: activity,
        battery_level,
        is_charging,
        app_state,
        network_type,
        last_interaction,
        device,
        collected_at: Utc::now(),
    }
}

/// Convert a `0.0..=1.0` battery fraction to a rounded percent.
pub fn battery_percent(level: f32) -> u8 {
    // Clamped to 0..=100 before the cast.
    (level * 100.0).round().clamp(0.0, 100.0) as u8
}

fn or_default<T>(read: &'static str, result: Result<T, TetherError>, default: T) -> T {
    result.unwrap_or_else(|e| {
        warn!(read, error = %e, "telemetry read failed, using default");
        default
    })
}
