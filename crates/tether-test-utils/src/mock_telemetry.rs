// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock device telemetry with per-read failure injection.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use tether_core::traits::adapter::PluginAdapter;
use tether_core::traits::telemetry::DeviceTelemetry;
use tether_core::types::{AdapterType, AppState, DeviceInfo};
use tether_core::TetherError;

/// Individual telemetry reads that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TelemetryRead {
    Battery,
    Charging,
    AppState,
    Network,
    Device,
    LastInteraction,
}

/// Snapshot of the values the mock reports.
#[derive(Debug, Clone)]
pub struct TelemetryValues {
    pub battery_level: f32,
    pub is_charging: bool,
    pub app_state: AppState,
    pub network_type: String,
    pub device: DeviceInfo,
    pub last_interaction: Option<DateTime<Utc>>,
}

impl Default for TelemetryValues {
    fn default() -> Self {
        Self {
            battery_level: 0.8,
            is_charging: false,
            app_state: AppState::Background,
            network_type: "wifi".to_string(),
            device: DeviceInfo {
                model: "mock-tablet".to_string(),
                os_version: "14".to_string(),
                app_version: "1.0.0".to_string(),
            },
            last_interaction: None,
        }
    }
}

#[derive(Default)]
pub struct MockTelemetry {
    values: Mutex<TelemetryValues>,
    failing: Mutex<HashSet<TelemetryRead>>,
}

impl MockTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_battery(&self, level: f32, charging: bool) {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.battery_level = level;
        values.is_charging = charging;
    }

    pub fn set_last_interaction(&self, at: Option<DateTime<Utc>>) {
        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last_interaction = at;
    }

    pub fn fail(&self, read: TelemetryRead) {
        self.failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(read);
    }

    /// Make every read fail.
    pub fn fail_all(&self) {
        for read in [
            TelemetryRead::Battery,
            TelemetryRead::Charging,
            TelemetryRead::AppState,
            TelemetryRead::Network,
            TelemetryRead::Device,
            TelemetryRead::LastInteraction,
        ] {
            self.fail(read);
        }
    }

    fn read<T>(
        &self,
        read: TelemetryRead,
        get: impl FnOnce(&TelemetryValues) -> T,
    ) -> Result<T, TetherError> {
        if self
            .failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&read)
        {
            return Err(TetherError::Telemetry(format!("{read:?} unavailable")));
        }
        Ok(get(&self.values.lock().unwrap_or_else(|e| e.into_inner())))
    }
}

#[async_trait]
impl PluginAdapter for MockTelemetry {
    fn name(&self) -> &str {
        "mock-telemetry"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Telemetry
    }
}

#[async_trait]
impl DeviceTelemetry for MockTelemetry {
    async fn battery_level(&self) -> Result<f32, TetherError> {
        self.read(TelemetryRead::Battery, |v| v.battery_level)
    }

    async fn is_charging(&self) -> Result<bool, TetherError> {
        self.read(TelemetryRead::Charging, |v| v.is_charging)
    }

    async fn app_state(&self) -> Result<AppState, TetherError> {
        self.read(TelemetryRead::AppState, |v| v.app_state)
    }

    async fn network_type(&self) -> Result<String, TetherError> {
        self.read(TelemetryRead::Network, |v| v.network_type.clone())
    }

    async fn device_info(&self) -> Result<DeviceInfo, TetherError> {
        self.read(TelemetryRead::Device, |v| v.device.clone())
    }

    async fn last_interaction(&self) -> Result<Option<DateTime<Utc>>, TetherError> {
        self.read(TelemetryRead::LastInteraction, |v| v.last_interaction)
    }
}
