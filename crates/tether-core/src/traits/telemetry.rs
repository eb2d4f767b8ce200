// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Device telemetry trait. Every read is independently fallible.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::TetherError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{AppState, DeviceInfo};

/// OS telemetry primitives used to assemble heartbeat reports.
#[async_trait]
pub trait DeviceTelemetry: PluginAdapter {
    /// Battery level as a fraction in `0.0..=1.0`.
    async fn battery_level(&self) -> Result<f32, TetherError>;

    async fn is_charging(&self) -> Result<bool, TetherError>;

    async fn app_state(&self) -> Result<AppState, TetherError>;

    async fn network_type(&self) -> Result<String, TetherError>;

    async fn device_info(&self) -> Result<DeviceInfo, TetherError>;

    /// Time of the user's last interaction with the app, if recorded.
    async fn last_interaction(&self) -> Result<Option<DateTime<Utc>>, TetherError>;
}
