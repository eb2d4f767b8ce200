// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Observer that records outbound-queue events as strings.

use std::sync::Mutex;

use tether_core::traits::observer::SyncObserver;

/// Records every hook call as `online`, `offline`, `sync_start`,
/// `sync_complete:{success}:{failed}` or `queued:{id}`.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn push(&self, event: String) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}

impl SyncObserver for RecordingObserver {
    fn on_online(&self) {
        self.push("online".to_string());
    }

    fn on_offline(&self) {
        self.push("offline".to_string());
    }

    fn on_sync_start(&self) {
        self.push("sync_start".to_string());
    }

    fn on_sync_complete(&self, success: usize, failed: usize) {
        self.push(format!("sync_complete:{success}:{failed}"));
    }

    fn on_message_queued(&self, message_id: &str) {
        self.push(format!("queued:{message_id}"));
    }
}
