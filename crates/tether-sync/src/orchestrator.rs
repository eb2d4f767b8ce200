// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound sync orchestrator.
//!
//! Owns the persisted outbound queue: accepts messages regardless of
//! connectivity and drains them, in enqueue order, whenever connectivity is
//! regained or a caller asks. Delivery is at-least-once; the transport sees a
//! stable `message_id` across retries.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use tether_config::model::QueueConfig;
use tether_core::{
    MessageKind, NetworkEdge, NoopObserver, PendingMessage, PluginAdapter, QueueStore, Subscription,
    SyncObserver, SyncReport, TetherError, Transport,
};

use crate::network::NetworkMonitor;

/// Counters describing the orchestrator's history since construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncDiagnostics {
    /// Drains that actually ran (guarded and offline calls excluded).
    pub drains_total: u64,
    /// Messages delivered across all drains.
    pub delivered_total: u64,
    /// Messages discarded after reaching their attempt ceiling.
    pub exhausted_total: u64,
    /// Ids of the most recently exhausted messages, oldest first.
    pub recently_exhausted: Vec<String>,
    pub last_report: Option<SyncReport>,
    pub last_sync_at: Option<DateTime<Utc>>,
    /// Whether a drain is running right now.
    pub in_flight: bool,
}

/// Number of exhausted ids kept in [`SyncDiagnostics::recently_exhausted`].
const EXHAUSTED_HISTORY: usize = 32;

/// Persistent outbound queue with network-driven draining.
///
/// Cheap to clone; clones share the same queue, guard and observer.
#[derive(Clone)]
pub struct OutboundSync {
    inner: Arc<Inner>,
}

struct Inner {
    store: Arc<dyn QueueStore>,
    transport: Arc<dyn Transport>,
    observer: Arc<dyn SyncObserver>,
    config: QueueConfig,
    monitor: RwLock<Option<NetworkMonitor>>,
    draining: AtomicBool,
    /// Serializes store mutations: enqueue, clear and the drain write-back.
    store_lock: tokio::sync::Mutex<()>,
    diagnostics: Mutex<SyncDiagnostics>,
    shutdown: CancellationToken,
}

/// Clears the in-flight flag when a drain ends, however it ends.
struct DrainGuard<'a>(&'a AtomicBool);

impl<'a> DrainGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl OutboundSync {
    pub fn new(
        store: Arc<dyn QueueStore>,
        transport: Arc<dyn Transport>,
        config: QueueConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                transport,
                observer: Arc::new(NoopObserver),
                config,
                monitor: RwLock::new(None),
                draining: AtomicBool::new(false),
                store_lock: tokio::sync::Mutex::new(()),
                diagnostics: Mutex::new(SyncDiagnostics::default()),
                shutdown: CancellationToken::new(),
            }),
        }
    }

    /// Replace the observer. Must be called before the orchestrator is shared.
    pub fn with_observer(self, observer: Arc<dyn SyncObserver>) -> Self {
        match Arc::try_unwrap(self.inner) {
            Ok(mut inner) => {
                inner.observer = observer;
                Self {
                    inner: Arc::new(inner),
                }
            }
            Err(inner) => {
                warn!("observer not installed: orchestrator already shared");
                Self { inner }
            }
        }
    }

    pub fn config(&self) -> &QueueConfig {
        &self.inner.config
    }

    /// Persist a message for later delivery. Never touches the network.
    ///
    /// Returns the generated message id. The only error is a local storage failure.
    pub async fn enqueue(
        &self,
        subject_id: &str,
        payload: &str,
        kind: MessageKind,
    ) -> Result<String, TetherError> {
        let entry = PendingMessage::new(subject_id, payload, kind, self.inner.config.max_attempts);
        {
            let _lock = self.inner.store_lock.lock().await;
            self.inner.store.append(&entry).await?;
        }
        info!(message_id = %entry.id, kind = %kind, "message queued");
        self.inner.observer.on_message_queued(&entry.id);
        Ok(entry.id)
    }

    /// Attempt every queued message once, in enqueue order.
    ///
    /// Never errors. Returns an empty report without attempting anything when
    /// the attached monitor reports offline or another drain is in flight.
    pub async fn sync_now(&self) -> SyncReport {
        if !self.is_online() {
            debug!("device is offline, skipping drain");
            return SyncReport::idle();
        }

        let Some(_flight) = DrainGuard::acquire(&self.inner.draining) else {
            debug!("drain already in flight");
            return SyncReport::idle();
        };

        self.inner.observer.on_sync_start();
        let report = self.drain().await;
        self.record(&report);
        self.inner
            .observer
            .on_sync_complete(report.success, report.failed);
        report
    }

    async fn drain(&self) -> SyncReport {
        let snapshot = match self.inner.store.read_all().await {
            Ok(entries) => entries,
            Err(e) => {
                error!(error = %e, "could not read outbound queue, skipping drain");
                return SyncReport::idle();
            }
        };

        if snapshot.is_empty() {
            debug!("outbound queue is empty");
            return SyncReport::idle();
        }

        info!(pending = snapshot.len(), "draining outbound queue");
        let snapshot_ids: HashSet<String> = snapshot.iter().map(|m| m.id.clone()).collect();
        let delay = self.inner.config.send_delay();
        let mut retained = Vec::new();
        let mut exhausted = Vec::new();
        let mut success = 0;

        for (index, mut entry) in snapshot.into_iter().enumerate() {
            if index > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            match self.inner.transport.send_message(&entry.to_outbound()).await {
                Ok(receipt) => {
                    success += 1;
                    info!(message_id = %entry.id, receipt = %receipt, "message delivered");
                }
                Err(e) => {
                    if entry.record_failure() {
                        warn!(
                            message_id = %entry.id,
                            attempt = entry.attempt,
                            max_attempts = entry.max_attempts,
                            error = %e,
                            "send failed, will retry"
                        );
                        retained.push(entry);
                    } else {
                        warn!(
                            message_id = %entry.id,
                            attempt = entry.attempt,
                            error = %e,
                            "message exhausted its attempts, discarding"
                        );
                        exhausted.push(entry.id);
                    }
                }
            }
        }

        let remaining = self.write_back(retained, &snapshot_ids).await;
        let failed = exhausted.len();
        self.note_exhausted(exhausted);

        info!(success, failed, remaining, "drain complete");
        SyncReport {
            success,
            failed,
            remaining,
        }
    }

    /// Persist the retained entries followed by anything enqueued mid-drain.
    async fn write_back(&self, retained: Vec<PendingMessage>, snapshot_ids: &HashSet<String>) -> usize {
        let _lock = self.inner.store_lock.lock().await;

        let arrived: Vec<PendingMessage> = match self.inner.store.read_all().await {
            Ok(current) => current
                .into_iter()
                .filter(|m| !snapshot_ids.contains(&m.id))
                .collect(),
            Err(e) => {
                // Writing now could drop messages queued mid-drain. The
                // previous list stays durable and delivered entries are re-sent.
                error!(error = %e, "could not re-read outbound queue, skipping write-back");
                return snapshot_ids.len();
            }
        };
        if !arrived.is_empty() {
            debug!(count = arrived.len(), "keeping messages queued during drain");
        }

        let mut next = retained;
        next.extend(arrived);
        if let Err(e) = self.inner.store.replace_all(&next).await {
            // The previous list stays durable; delivered entries will be re-sent.
            error!(error = %e, "failed to persist outbound queue after drain");
        }
        next.len()
    }

    /// Pull-to-refresh: drain now, or fail with [`TetherError::Offline`].
    pub async fn manual_sync(&self) -> Result<SyncReport, TetherError> {
        if !self.is_online() {
            return Err(TetherError::Offline);
        }
        Ok(self.sync_now().await)
    }

    /// Number of messages waiting for delivery.
    pub async fn pending_count(&self) -> Result<usize, TetherError> {
        Ok(self.inner.store.read_all().await?.len())
    }

    /// The queued messages, in delivery order.
    pub async fn pending(&self) -> Result<Vec<PendingMessage>, TetherError> {
        self.inner.store.read_all().await
    }

    /// Drop every queued message.
    pub async fn clear_all(&self) -> Result<(), TetherError> {
        let _lock = self.inner.store_lock.lock().await;
        self.inner.store.clear().await?;
        warn!("outbound queue cleared");
        Ok(())
    }

    /// Whether connectivity is believed to be available.
    ///
    /// Without an attached monitor there is no connectivity information and
    /// drains are always attempted.
    pub fn is_online(&self) -> bool {
        self.monitor().is_none_or(|m| m.is_online())
    }

    /// Whether a drain is running right now.
    pub fn is_draining(&self) -> bool {
        self.inner.draining.load(Ordering::Acquire)
    }

    pub fn diagnostics(&self) -> SyncDiagnostics {
        let mut snapshot = self
            .inner
            .diagnostics
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default();
        snapshot.in_flight = self.is_draining();
        snapshot
    }

    /// Drain on every offline-to-online edge of `monitor`.
    ///
    /// No polling: the drain is triggered by the edge alone. Disposing the
    /// returned subscription (or calling [`OutboundSync::shutdown`]) stops it.
    pub fn attach(&self, monitor: &NetworkMonitor) -> Subscription {
        if let Ok(mut slot) = self.inner.monitor.write() {
            *slot = Some(monitor.clone());
        }

        let mut edges = monitor.subscribe();
        let token = self.inner.shutdown.child_token();
        let child = token.clone();
        let sync = self.clone();

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = child.cancelled() => break,
                    edge = edges.recv() => match edge {
                        Ok(NetworkEdge::Online) => {
                            info!("connection restored, draining outbound queue");
                            sync.inner.observer.on_online();
                            sync.sync_now().await;
                        }
                        Ok(NetworkEdge::Offline) => {
                            info!("connection lost, messages will be queued");
                            sync.inner.observer.on_offline();
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "connectivity edges lagged");
                            if sync.is_online() {
                                sync.sync_now().await;
                            }
                        }
                        Err(RecvError::Closed) => break,
                    },
                }
            }
            debug!("outbound sync listener stopped");
        });

        Subscription::new("outbound-sync", token, handle)
    }

    /// Stop every listener started by [`OutboundSync::attach`] and flush the store.
    pub async fn shutdown(&self) {
        self.inner.shutdown.cancel();
        if let Err(e) = self.inner.store.shutdown().await {
            warn!(error = %e, "queue store shutdown failed");
        }
        info!("outbound sync shut down");
    }

    fn monitor(&self) -> Option<NetworkMonitor> {
        self.inner
            .monitor
            .read()
            .ok()
            .and_then(|slot| slot.clone())
    }

    fn record(&self, report: &SyncReport) {
        if let Ok(mut d) = self.inner.diagnostics.lock() {
            d.drains_total += 1;
            d.delivered_total += report.success as u64;
            d.exhausted_total += report.failed as u64;
            d.last_report = Some(*report);
            d.last_sync_at = Some(Utc::now());
        }
    }

    fn note_exhausted(&self, ids: Vec<String>) {
        if ids.is_empty() {
            return;
        }
        if let Ok(mut d) = self.inner.diagnostics.lock() {
            d.recently_exhausted.extend(ids);
            let overflow = d.recently_exhausted.len().saturating_sub(EXHAUSTED_HISTORY);
            d.recently_exhausted.drain(..overflow);
        }
    }
}
