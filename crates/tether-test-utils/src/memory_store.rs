// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory queue store with failure injection.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use tether_core::traits::adapter::PluginAdapter;
use tether_core::traits::store::QueueStore;
use tether_core::types::{AdapterType, PendingMessage};
use tether_core::TetherError;

/// A `QueueStore` backed by a vector.
pub struct MemoryQueueStore {
    entries: Mutex<Vec<PendingMessage>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

fn injected(operation: &str) -> TetherError {
    TetherError::Storage {
        source: format!("injected {operation} failure").into(),
    }
}

impl MemoryQueueStore {
    pub fn new() -> Self {
        Self::with_entries(Vec::new())
    }

    /// Start from a previously persisted list.
    pub fn with_entries(entries: Vec<PendingMessage>) -> Self {
        Self {
            entries: Mutex::new(entries),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Current contents, bypassing failure injection.
    pub fn snapshot(&self) -> Vec<PendingMessage> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(&self, flag: &AtomicBool, operation: &str) -> Result<(), TetherError> {
        if flag.load(Ordering::SeqCst) {
            Err(injected(operation))
        } else {
            Ok(())
        }
    }
}

impl Default for MemoryQueueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MemoryQueueStore {
    fn name(&self) -> &str {
        "memory-queue"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::QueueStore
    }
}

#[async_trait]
impl QueueStore for MemoryQueueStore {
    async fn append(&self, entry: &PendingMessage) -> Result<(), TetherError> {
        self.check(&self.fail_writes, "write")?;
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(entry.clone());
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<PendingMessage>, TetherError> {
        self.check(&self.fail_reads, "read")?;
        Ok(self.snapshot())
    }

    async fn replace_all(&self, entries: &[PendingMessage]) -> Result<(), TetherError> {
        self.check(&self.fail_writes, "write")?;
        *self.entries.lock().unwrap_or_else(|e| e.into_inner()) = entries.to_vec();
        Ok(())
    }
}
