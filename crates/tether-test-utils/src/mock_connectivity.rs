// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock connectivity probe with injectable transitions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::broadcast;

use tether_core::traits::adapter::PluginAdapter;
use tether_core::traits::connectivity::ConnectivityProbe;
use tether_core::types::{AdapterType, ConnectivityState};
use tether_core::TetherError;

const READINGS_CAPACITY: usize = 32;

/// A connectivity probe driven by the test.
pub struct MockConnectivity {
    state: Mutex<ConnectivityState>,
    readings: broadcast::Sender<ConnectivityState>,
    fail_reads: AtomicBool,
}

impl MockConnectivity {
    pub fn new(initial: ConnectivityState) -> Self {
        let (readings, _) = broadcast::channel(READINGS_CAPACITY);
        Self {
            state: Mutex::new(initial),
            readings,
            fail_reads: AtomicBool::new(false),
        }
    }

    /// Report a new reading to the platform state and every subscriber.
    pub fn emit(&self, state: ConnectivityState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = state.clone();
        let _ = self.readings.send(state);
    }

    /// Make `read` fail, as when the platform API is unavailable.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn subscriber_count(&self) -> usize {
        self.readings.receiver_count()
    }
}

#[async_trait]
impl PluginAdapter for MockConnectivity {
    fn name(&self) -> &str {
        "mock-connectivity"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Connectivity
    }
}

#[async_trait]
impl ConnectivityProbe for MockConnectivity {
    async fn read(&self) -> Result<ConnectivityState, TetherError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(TetherError::platform("network read", "unavailable"));
        }
        Ok(self.state.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn subscribe(&self) -> Result<broadcast::Receiver<ConnectivityState>, TetherError> {
        Ok(self.readings.subscribe())
    }
}
