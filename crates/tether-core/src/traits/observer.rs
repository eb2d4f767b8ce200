// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hooks through which the outbound queue reports progress to the application.

/// Receives outbound-queue events for UI feedback.
///
/// Every method defaults to a no-op; implement only what the UI needs.
/// Hooks run inline on the orchestrator's task and must not block.
pub trait SyncObserver: Send + Sync + 'static {
    /// Connectivity came back (offline to online edge).
    fn on_online(&self) {}

    /// Connectivity was lost (online to offline edge).
    fn on_offline(&self) {}

    /// A drain is about to attempt the queue.
    fn on_sync_start(&self) {}

    /// A drain finished.
    fn on_sync_complete(&self, _success: usize, _failed: usize) {}

    /// A message was persisted to the queue.
    fn on_message_queued(&self, _message_id: &str) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SyncObserver for NoopObserver {}
