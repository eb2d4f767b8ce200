// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Queue store trait for durable persistence of pending outbound messages.

use async_trait::async_trait;

use crate::error::TetherError;
use crate::traits::adapter::PluginAdapter;
use crate::types::PendingMessage;

/// Durable whole-collection storage of the outbound queue.
///
/// Every operation is a read-modify-write of the complete list. On cold start
/// whatever was last durably written is the queue. Callers prune exhausted
/// entries before writing back; the store never compacts on its own.
#[async_trait]
pub trait QueueStore: PluginAdapter {
    /// Appends one entry to the end of the persisted list.
    async fn append(&self, entry: &PendingMessage) -> Result<(), TetherError>;

    /// Reads the full persisted list in insertion order.
    async fn read_all(&self) -> Result<Vec<PendingMessage>, TetherError>;

    /// Atomically supersedes the persisted list.
    async fn replace_all(&self, entries: &[PendingMessage]) -> Result<(), TetherError>;

    /// Removes every entry.
    async fn clear(&self) -> Result<(), TetherError> {
        self.replace_all(&[]).await
    }
}
