// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport trait: the opaque send operation towards the backend.

use async_trait::async_trait;

use crate::error::TetherError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{HeartbeatReport, OutboundMessage};

/// The opaque send primitive shared by the outbound queue and the heartbeat.
///
/// Returning an error is the only failure signal callers understand. Timeouts
/// are the implementation's responsibility.
#[async_trait]
pub trait Transport: PluginAdapter {
    /// Delivers one conversational message. Returns the backend's receipt id.
    async fn send_message(&self, message: &OutboundMessage) -> Result<String, TetherError>;

    /// Delivers one liveness report for the given subject.
    async fn send_heartbeat(
        &self,
        subject_id: &str,
        report: &HeartbeatReport,
    ) -> Result<(), TetherError>;
}
