// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Background task registry whose ticks are fired by the test.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use tether_core::traits::adapter::PluginAdapter;
use tether_core::traits::background::{BackgroundTasks, TickHandler};
use tether_core::types::{AdapterType, BackgroundStatus};
use tether_core::TetherError;

/// Captures periodic task registrations; `fire` runs one tick on demand.
#[derive(Default)]
pub struct ManualBackground {
    tasks: Mutex<HashMap<String, (Duration, TickHandler)>>,
    deny: AtomicBool,
    registrations: AtomicUsize,
}

impl ManualBackground {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse registrations, as when the user disabled background execution.
    pub fn deny(&self, deny: bool) {
        self.deny.store(deny, Ordering::SeqCst);
    }

    /// Number of successful `register_periodic` calls.
    pub fn registration_count(&self) -> usize {
        self.registrations.load(Ordering::SeqCst)
    }

    /// Interval of a registered task.
    pub fn interval_of(&self, task_id: &str) -> Option<Duration> {
        self.tasks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(task_id)
            .map(|(interval, _)| *interval)
    }

    /// Run one tick of `task_id`. Returns `false` if it is not registered.
    pub async fn fire(&self, task_id: &str) -> bool {
        let handler = self
            .tasks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(task_id)
            .map(|(_, handler)| handler.clone());
        match handler {
            Some(handler) => {
                handler().await;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl PluginAdapter for ManualBackground {
    fn name(&self) -> &str {
        "manual-background"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Background
    }
}

#[async_trait]
impl BackgroundTasks for ManualBackground {
    async fn register_periodic(
        &self,
        task_id: &str,
        interval: Duration,
        on_tick: TickHandler,
    ) -> Result<BackgroundStatus, TetherError> {
        if self.deny.load(Ordering::SeqCst) {
            return Err(TetherError::platform(
                "register background task",
                "background execution denied",
            ));
        }
        self.tasks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(task_id.to_string(), (interval, on_tick));
        self.registrations.fetch_add(1, Ordering::SeqCst);
        Ok(BackgroundStatus::Available)
    }

    async fn status(&self) -> BackgroundStatus {
        if self.deny.load(Ordering::SeqCst) {
            BackgroundStatus::Denied
        } else if self
            .tasks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_empty()
        {
            BackgroundStatus::NotRegistered
        } else {
            BackgroundStatus::Available
        }
    }

    async fn stop(&self, task_id: &str) -> Result<(), TetherError> {
        self.tasks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(task_id);
        Ok(())
    }
}
