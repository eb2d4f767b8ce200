// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock transport for deterministic testing.
//!
//! `MockTransport` implements `Transport` with scripted failures, an attempt
//! log, and an optional gate that holds sends until the test releases them.

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::{Notify, Semaphore};

use tether_core::traits::adapter::PluginAdapter;
use tether_core::traits::transport::Transport;
use tether_core::types::{AdapterType, HeartbeatReport, OutboundMessage};
use tether_core::TetherError;

/// A mock backend transport.
///
/// Failure sources, checked in order: the scripted outcome queue, the set of
/// failing payloads, then the global `fail_all` switch.
pub struct MockTransport {
    attempts: Mutex<Vec<String>>,
    sent: Mutex<Vec<OutboundMessage>>,
    heartbeats: Mutex<Vec<(String, HeartbeatReport)>>,
    script: Mutex<VecDeque<bool>>,
    failing_payloads: Mutex<HashSet<String>>,
    fail_all: AtomicBool,
    fail_heartbeats: AtomicBool,
    gate: Mutex<Option<Arc<Semaphore>>>,
    entered: Arc<Notify>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl MockTransport {
    /// Create a transport that accepts everything.
    pub fn new() -> Self {
        Self {
            attempts: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
            heartbeats: Mutex::new(Vec::new()),
            script: Mutex::new(VecDeque::new()),
            failing_payloads: Mutex::new(HashSet::new()),
            fail_all: AtomicBool::new(false),
            fail_heartbeats: AtomicBool::new(false),
            gate: Mutex::new(None),
            entered: Arc::new(Notify::new()),
        }
    }

    /// Queue per-call outcomes (`true` = success) consumed before other rules.
    pub fn script(&self, outcomes: impl IntoIterator<Item = bool>) {
        lock(&self.script).extend(outcomes);
    }

    /// Fail every send of a message carrying `payload`.
    pub fn fail_payload(&self, payload: &str) {
        lock(&self.failing_payloads).insert(payload.to_string());
    }

    pub fn fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    pub fn fail_heartbeats(&self, fail: bool) {
        self.fail_heartbeats.store(fail, Ordering::SeqCst);
    }

    /// Hold every subsequent message send until a permit is added to the gate.
    pub fn install_gate(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *lock(&self.gate) = Some(gate.clone());
        gate
    }

    /// Wait until a message send has started.
    pub async fn wait_for_send(&self) {
        self.entered.notified().await;
    }

    /// Message ids in attempt order, including failed attempts.
    pub fn attempts(&self) -> Vec<String> {
        lock(&self.attempts).clone()
    }

    /// Messages accepted by the mock backend.
    pub fn sent_messages(&self) -> Vec<OutboundMessage> {
        lock(&self.sent).clone()
    }

    /// Heartbeat reports accepted by the mock backend.
    pub fn heartbeats(&self) -> Vec<(String, HeartbeatReport)> {
        lock(&self.heartbeats).clone()
    }

    fn should_fail(&self, message: &OutboundMessage) -> bool {
        if let Some(ok) = lock(&self.script).pop_front() {
            return !ok;
        }
        lock(&self.failing_payloads).contains(&message.payload)
            || self.fail_all.load(Ordering::SeqCst)
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockTransport {
    fn name(&self) -> &str {
        "mock-transport"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Transport
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send_message(&self, message: &OutboundMessage) -> Result<String, TetherError> {
        lock(&self.attempts).push(message.message_id.clone());
        self.entered.notify_one();

        let gate = lock(&self.gate).clone();
        if let Some(gate) = gate {
            gate.acquire()
                .await
                .map_err(|_| TetherError::transport("gate closed"))?
                .forget();
        }

        if self.should_fail(message) {
            return Err(TetherError::transport("mock backend unavailable"));
        }
        lock(&self.sent).push(message.clone());
        Ok(format!("receipt-{}", message.message_id))
    }

    async fn send_heartbeat(
        &self,
        subject_id: &str,
        report: &HeartbeatReport,
    ) -> Result<(), TetherError> {
        if self.fail_heartbeats.load(Ordering::SeqCst) {
            return Err(TetherError::transport("mock backend unavailable"));
        }
        lock(&self.heartbeats).push((subject_id.to_string(), report.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::types::MessageKind;

    fn outbound(payload: &str) -> OutboundMessage {
        OutboundMessage {
            message_id: format!("id-{payload}"),
            subject_id: "p".into(),
            payload: payload.into(),
            kind: MessageKind::Spontaneous,
        }
    }

    #[tokio::test]
    async fn script_takes_precedence() {
        let transport = MockTransport::new();
        transport.fail_all(true);
        transport.script([true]);
        assert!(transport.send_message(&outbound("a")).await.is_ok());
        assert!(transport.send_message(&outbound("a")).await.is_err());
        assert_eq!(transport.attempts().len(), 2);
        assert_eq!(transport.sent_messages().len(), 1);
    }

    #[tokio::test]
    async fn failing_payload_only_affects_matches() {
        let transport = MockTransport::new();
        transport.fail_payload("bad");
        assert!(transport.send_message(&outbound("bad")).await.is_err());
        assert!(transport.send_message(&outbound("good")).await.is_ok());
    }

    #[tokio::test]
    async fn gate_holds_send_until_released() {
        let transport = Arc::new(MockTransport::new());
        let gate = transport.install_gate();
        let sender = transport.clone();
        let task = tokio::spawn(async move { sender.send_message(&outbound("x")).await });

        transport.wait_for_send().await;
        assert!(transport.sent_messages().is_empty());
        gate.add_permits(1);
        assert!(task.await.unwrap().is_ok());
        assert_eq!(transport.sent_messages().len(), 1);
    }
}
