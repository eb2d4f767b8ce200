// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock notification trigger registry with failure injection.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use tether_core::traits::adapter::PluginAdapter;
use tether_core::traits::notifications::TriggerRegistry;
use tether_core::types::{AdapterType, NotificationContent, ScheduledTrigger, TriggerRequest};
use tether_core::TetherError;

/// An in-memory stand-in for the OS trigger registry.
///
/// Registering an existing id replaces it, as the platform does.
#[derive(Default)]
pub struct MockTriggerRegistry {
    active: Mutex<BTreeMap<String, ScheduledTrigger>>,
    registrations: Mutex<Vec<TriggerRequest>>,
    cancellations: Mutex<Vec<String>>,
    displayed: Mutex<Vec<(String, NotificationContent)>>,
    failing_ids: Mutex<HashSet<String>>,
    fail_cancels: AtomicBool,
    fail_listing: AtomicBool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl MockTriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse registration of the given trigger id.
    pub fn fail_register(&self, trigger_id: &str) {
        lock(&self.failing_ids).insert(trigger_id.to_string());
    }

    pub fn fail_cancels(&self, fail: bool) {
        self.fail_cancels.store(fail, Ordering::SeqCst);
    }

    pub fn fail_listing(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::SeqCst);
    }

    /// Every successful `register` call, in call order.
    pub fn registrations(&self) -> Vec<TriggerRequest> {
        lock(&self.registrations).clone()
    }

    /// Every `cancel` call, in call order.
    pub fn cancellations(&self) -> Vec<String> {
        lock(&self.cancellations).clone()
    }

    /// Every notification surfaced through `display`.
    pub fn displayed(&self) -> Vec<(String, NotificationContent)> {
        lock(&self.displayed).clone()
    }

    /// Ids of triggers still armed.
    pub fn active_ids(&self) -> Vec<String> {
        lock(&self.active).keys().cloned().collect()
    }

    pub fn is_active(&self, trigger_id: &str) -> bool {
        lock(&self.active).contains_key(trigger_id)
    }
}

#[async_trait]
impl PluginAdapter for MockTriggerRegistry {
    fn name(&self) -> &str {
        "mock-notifications"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Notifications
    }
}

#[async_trait]
impl TriggerRegistry for MockTriggerRegistry {
    async fn register(&self, request: &TriggerRequest) -> Result<String, TetherError> {
        if lock(&self.failing_ids).contains(&request.id) {
            return Err(TetherError::platform("register trigger", "permission revoked"));
        }
        lock(&self.registrations).push(request.clone());
        lock(&self.active).insert(
            request.id.clone(),
            ScheduledTrigger {
                id: request.id.clone(),
                fire_at: request.fire_at,
                content: request.content.clone(),
            },
        );
        Ok(request.id.clone())
    }

    async fn cancel(&self, trigger_id: &str) -> Result<(), TetherError> {
        lock(&self.cancellations).push(trigger_id.to_string());
        if self.fail_cancels.load(Ordering::SeqCst) {
            return Err(TetherError::platform("cancel trigger", "registry unavailable"));
        }
        lock(&self.active).remove(trigger_id);
        Ok(())
    }

    async fn display(
        &self,
        trigger_id: &str,
        content: &NotificationContent,
    ) -> Result<String, TetherError> {
        if lock(&self.failing_ids).contains(trigger_id) {
            return Err(TetherError::platform("display notification", "permission revoked"));
        }
        lock(&self.displayed).push((trigger_id.to_string(), content.clone()));
        Ok(trigger_id.to_string())
    }

    async fn pending(&self) -> Result<Vec<ScheduledTrigger>, TetherError> {
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(TetherError::platform("list triggers", "registry unavailable"));
        }
        let mut triggers: Vec<ScheduledTrigger> = lock(&self.active).values().cloned().collect();
        triggers.sort_by_key(|t| t.fire_at);
        Ok(triggers)
    }
}
