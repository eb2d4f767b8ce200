// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heartbeat scheduler.
//!
//! Registers one periodic background task that sends a liveness report on
//! every wake, plus on-demand reports for app lifecycle events, low battery
//! and emergencies.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use chrono::{DateTime, Utc};
use futures::FutureExt;
use tracing::{debug, error, info, warn};

use tether_config::model::HeartbeatConfig;
use tether_core::{
    ActivityType, BackgroundStatus, BackgroundTasks, DeviceTelemetry, TetherError, TickHandler,
    Transport,
};

use crate::telemetry::{battery_percent, collect_report};

/// Snapshot of the scheduler's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartbeatStatus {
    pub initialized: bool,
    /// When the last report was delivered.
    pub last_heartbeat: Option<DateTime<Utc>>,
    pub background_status: BackgroundStatus,
}

/// Sends periodic and on-demand heartbeat reports. Cheap to clone.
#[derive(Clone)]
pub struct HeartbeatScheduler {
    inner: Arc<Inner>,
}

struct Inner {
    transport: Arc<dyn Transport>,
    telemetry: Arc<dyn DeviceTelemetry>,
    background: Arc<dyn BackgroundTasks>,
    config: HeartbeatConfig,
    subject_id: String,
    initialized: AtomicBool,
    /// Serializes `initialize` and `stop`.
    lifecycle: tokio::sync::Mutex<()>,
    last_heartbeat: Mutex<Option<DateTime<Utc>>>,
}

impl HeartbeatScheduler {
    pub fn new(
        transport: Arc<dyn Transport>,
        telemetry: Arc<dyn DeviceTelemetry>,
        background: Arc<dyn BackgroundTasks>,
        config: HeartbeatConfig,
        subject_id: impl Into<String>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                transport,
                telemetry,
                background,
                config,
                subject_id: subject_id.into(),
                initialized: AtomicBool::new(false),
                lifecycle: tokio::sync::Mutex::new(()),
                last_heartbeat: Mutex::new(None),
            }),
        }
    }

    pub fn config(&self) -> &HeartbeatConfig {
        &self.inner.config
    }

    /// Register the periodic task and send one heartbeat right away.
    ///
    /// Calling it again once initialized is a no-op. A platform refusal to
    /// register is returned and leaves the scheduler uninitialized.
    pub async fn initialize(&self) -> Result<(), TetherError> {
        if !self.inner.config.enabled {
            info!("heartbeat disabled by configuration");
            return Ok(());
        }

        let _lifecycle = self.inner.lifecycle.lock().await;
        if self.inner.initialized.load(Ordering::SeqCst) {
            debug!("heartbeat already initialized");
            return Ok(());
        }

        let status = self
            .inner
            .background
            .register_periodic(
                &self.inner.config.task_id,
                self.inner.config.interval(),
                self.tick_handler(),
            )
            .await
            .inspect_err(|e| error!(error = %e, "failed to register heartbeat task"))?;

        self.inner.initialized.store(true, Ordering::SeqCst);
        info!(
            task_id = %self.inner.config.task_id,
            interval_minutes = self.inner.config.interval_minutes,
            background = %status,
            "heartbeat initialized"
        );

        self.send_heartbeat(ActivityType::Heartbeat).await;
        Ok(())
    }

    /// Collect telemetry and send one report. Failures are logged, not returned.
    ///
    /// Returns whether the transport accepted the report.
    pub async fn send_heartbeat(&self, activity: ActivityType) -> bool {
        match self.deliver(activity).await {
            Ok(()) => true,
            Err(e) => {
                warn!(activity = %activity, error = %e, "heartbeat not delivered");
                false
            }
        }
    }

    /// Send an emergency report. Unlike heartbeats, failure is returned.
    pub async fn send_emergency_alert(&self) -> Result<(), TetherError> {
        self.deliver(ActivityType::Emergency)
            .await
            .inspect_err(|e| error!(error = %e, "emergency alert not delivered"))
    }

    /// Send a heartbeat outside the periodic schedule.
    pub async fn force_send(&self) -> bool {
        self.send_heartbeat(ActivityType::Heartbeat).await
    }

    /// Report an app lifecycle event.
    pub async fn record_app_event(&self, foreground: bool) -> bool {
        let activity = if foreground {
            ActivityType::AppOpen
        } else {
            ActivityType::AppClose
        };
        self.send_heartbeat(activity).await
    }

    /// Send a heartbeat if the battery is below the configured threshold.
    ///
    /// Returns whether the battery is low. An unreadable battery is not low.
    pub async fn check_low_battery(&self) -> bool {
        let percent = match self.inner.telemetry.battery_level().await {
            Ok(level) => battery_percent(level),
            Err(e) => {
                warn!(error = %e, "battery level unavailable");
                return false;
            }
        };
        if percent >= self.inner.config.low_battery_percent {
            return false;
        }
        warn!(battery_percent = percent, "battery low");
        self.send_heartbeat(ActivityType::Heartbeat).await;
        true
    }

    pub async fn get_status(&self) -> HeartbeatStatus {
        HeartbeatStatus {
            initialized: self.inner.initialized.load(Ordering::SeqCst),
            last_heartbeat: self.last_heartbeat(),
            background_status: self.inner.background.status().await,
        }
    }

    pub fn last_heartbeat(&self) -> Option<DateTime<Utc>> {
        *self
            .inner
            .last_heartbeat
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    /// Stop the periodic task. `initialize` may be called again afterwards.
    pub async fn stop(&self) -> Result<(), TetherError> {
        let _lifecycle = self.inner.lifecycle.lock().await;
        self.inner.background.stop(&self.inner.config.task_id).await?;
        self.inner.initialized.store(false, Ordering::SeqCst);
        info!(task_id = %self.inner.config.task_id, "heartbeat stopped");
        Ok(())
    }

    async fn deliver(&self, activity: ActivityType) -> Result<(), TetherError> {
        let report = collect_report(self.inner.telemetry.as_ref(), activity).await;
        self.inner
            .transport
            .send_heartbeat(&self.inner.subject_id, &report)
            .await?;

        *self
            .inner
            .last_heartbeat
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = Some(report.collected_at);
        info!(
            activity = %activity,
            battery_percent = report.battery_level,
            network_type = %report.network_type,
            "heartbeat sent"
        );
        Ok(())
    }

    /// The periodic callback holds a weak handle so the background registry
    /// does not keep the scheduler alive.
    fn tick_handler(&self) -> TickHandler {
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        Arc::new(move || {
            let weak = weak.clone();
            async move {
                match weak.upgrade() {
                    Some(inner) => {
                        HeartbeatScheduler { inner }
                            .send_heartbeat(ActivityType::Heartbeat)
                            .await;
                    }
                    None => debug!("heartbeat tick after scheduler dropped"),
                }
            }
            .boxed()
        })
    }
}
