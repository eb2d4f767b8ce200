// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification trigger registry trait wrapping the OS notification primitives.

use async_trait::async_trait;

use crate::error::TetherError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{NotificationContent, ScheduledTrigger, TriggerRequest};

/// OS-level notification trigger registry.
///
/// Trigger ids are caller-chosen; registering an id that already exists
/// replaces the previous trigger.
#[async_trait]
pub trait TriggerRegistry: PluginAdapter {
    /// Registers a trigger that fires at `request.fire_at`. Returns the platform trigger id.
    async fn register(&self, request: &TriggerRequest) -> Result<String, TetherError>;

    /// Cancels a registered or displayed trigger. Unknown ids are not an error.
    async fn cancel(&self, trigger_id: &str) -> Result<(), TetherError>;

    /// Surfaces a notification immediately.
    async fn display(
        &self,
        trigger_id: &str,
        content: &NotificationContent,
    ) -> Result<String, TetherError>;

    /// Lists the triggers that have not fired yet.
    async fn pending(&self) -> Result<Vec<ScheduledTrigger>, TetherError>;
}
