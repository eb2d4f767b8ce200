// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`BackgroundTasks`] on tokio intervals, for daemon deployments without a
//! platform wake facility.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use tether_core::{AdapterType, BackgroundStatus, BackgroundTasks, PluginAdapter, TetherError, TickHandler};

/// Runs each periodic task on its own tokio interval.
///
/// The first tick fires one interval after registration. Ticks missed while a
/// handler is still running are skipped.
pub struct IntervalTasks {
    shutdown: CancellationToken,
    tasks: Mutex<HashMap<String, CancellationToken>>,
}

impl IntervalTasks {
    pub fn new() -> Self {
        Self::with_shutdown(CancellationToken::new())
    }

    /// Tie every task to an external shutdown token.
    pub fn with_shutdown(shutdown: CancellationToken) -> Self {
        Self {
            shutdown,
            tasks: Mutex::new(HashMap::new()),
        }
    }

    pub fn task_count(&self) -> usize {
        self.tasks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Default for IntervalTasks {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for IntervalTasks {
    fn name(&self) -> &str {
        "tokio-interval"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Background
    }

    async fn shutdown(&self) -> Result<(), TetherError> {
        self.shutdown.cancel();
        self.tasks.lock().unwrap_or_else(|e| e.into_inner()).clear();
        Ok(())
    }
}

#[async_trait]
impl BackgroundTasks for IntervalTasks {
    async fn register_periodic(
        &self,
        task_id: &str,
        interval: Duration,
        on_tick: TickHandler,
    ) -> Result<BackgroundStatus, TetherError> {
        if interval.is_zero() {
            return Err(TetherError::Config(format!(
                "background task {task_id} needs a non-zero interval"
            )));
        }
        if self.shutdown.is_cancelled() {
            return Err(TetherError::platform("register background task", "shut down"));
        }

        let token = self.shutdown.child_token();
        if let Some(previous) = self
            .tasks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(task_id.to_string(), token.clone())
        {
            previous.cancel();
        }

        let id = task_id.to_string();
        let start = Instant::now() + interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(start, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        debug!(task_id = %id, "background task stopped");
                        break;
                    }
                    _ = ticker.tick() => on_tick().await,
                }
            }
        });

        info!(task_id, interval_secs = interval.as_secs(), "background task registered");
        Ok(BackgroundStatus::Available)
    }

    async fn status(&self) -> BackgroundStatus {
        if self.shutdown.is_cancelled() {
            BackgroundStatus::Denied
        } else if self.task_count() == 0 {
            BackgroundStatus::NotRegistered
        } else {
            BackgroundStatus::Available
        }
    }

    async fn stop(&self, task_id: &str) -> Result<(), TetherError> {
        if let Some(token) = self
            .tasks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(task_id)
        {
            token.cancel();
        }
        Ok(())
    }
}
