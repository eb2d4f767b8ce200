// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tether enqueue` and `tether clear-queue`.
//!
//! Both go through [`OutboundSync`] so the CLI mutates the queue exactly the
//! way the app does. The CLI never drains; delivery is left to the app.

use std::sync::Arc;

use async_trait::async_trait;
use tether_config::model::TetherConfig;
use tether_core::{
    AdapterType, HeartbeatReport, MessageKind, OutboundMessage, PluginAdapter, TetherError,
    Transport,
};
use tether_storage::{Database, SqliteQueueStore};
use tether_sync::OutboundSync;

pub(crate) async fn open_store(config: &TetherConfig) -> Result<SqliteQueueStore, TetherError> {
    let db = Database::open_config(&config.storage).await?;
    Ok(SqliteQueueStore::new(db, config.queue.storage_key.clone()))
}

/// Transport for a process that only queues: every send is refused.
struct QueueOnly;

#[async_trait]
impl PluginAdapter for QueueOnly {
    fn name(&self) -> &str {
        "queue-only"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Transport
    }
}

#[async_trait]
impl Transport for QueueOnly {
    async fn send_message(&self, _message: &OutboundMessage) -> Result<String, TetherError> {
        Err(TetherError::Offline)
    }

    async fn send_heartbeat(
        &self,
        _subject_id: &str,
        _report: &HeartbeatReport,
    ) -> Result<(), TetherError> {
        Err(TetherError::Offline)
    }
}

async fn open_queue(config: &TetherConfig) -> Result<OutboundSync, TetherError> {
    let store = open_store(config).await?;
    Ok(OutboundSync::new(
        Arc::new(store),
        Arc::new(QueueOnly),
        config.queue.clone(),
    ))
}

/// Persist one message for the next drain by the running app.
pub async fn run_enqueue(
    config: &TetherConfig,
    subject: Option<&str>,
    payload: &str,
    kind: MessageKind,
) -> Result<(), TetherError> {
    let subject = subject
        .or(config.device.subject_id.as_deref())
        .ok_or_else(|| {
            TetherError::Config("no subject: pass --subject or set device.subject_id".into())
        })?;

    let queue = open_queue(config).await?;
    let id = queue.enqueue(subject, payload, kind).await;
    queue.shutdown().await;
    println!("{}", id?);
    Ok(())
}

pub async fn run_clear(config: &TetherConfig, yes: bool) -> Result<(), TetherError> {
    if !yes {
        return Err(TetherError::Config(
            "refusing to clear the queue without --yes".into(),
        ));
    }
    let queue = open_queue(config).await?;
    let cleared = match queue.pending_count().await {
        Ok(dropped) => queue.clear_all().await.map(|()| dropped),
        Err(e) => Err(e),
    };
    queue.shutdown().await;
    println!("cleared {} queued message(s)", cleared?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::QueueStore;

    fn config_in(dir: &tempfile::TempDir) -> TetherConfig {
        let mut config = TetherConfig::default();
        config.storage.database_path = dir.path().join("cli.db").to_string_lossy().to_string();
        config
    }

    #[tokio::test]
    async fn enqueue_then_clear() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        run_enqueue(&config, Some("patient-9"), "hello", MessageKind::CheckIn)
            .await
            .unwrap();
        let entries = open_store(&config).await.unwrap().read_all().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].subject_id, "patient-9");
        assert_eq!(entries[0].kind, MessageKind::CheckIn);
        assert_eq!(entries[0].max_attempts, config.queue.max_attempts);
        assert_eq!(entries[0].attempt, 0);

        assert!(run_clear(&config, false).await.is_err());
        run_clear(&config, true).await.unwrap();
        let entries = open_store(&config).await.unwrap().read_all().await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn cli_queue_never_sends() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        run_enqueue(&config, Some("patient-9"), "hello", MessageKind::CheckIn)
            .await
            .unwrap();

        // A drain through the queue-only transport keeps the message for the app.
        let queue = open_queue(&config).await.unwrap();
        let report = queue.sync_now().await;
        assert_eq!(report.success, 0);
        assert_eq!(queue.pending_count().await.unwrap(), 1);
        queue.shutdown().await;
    }

    #[tokio::test]
    async fn enqueue_needs_a_subject() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_enqueue(&config_in(&dir), None, "hi", MessageKind::Spontaneous)
            .await
            .unwrap_err();
        assert!(matches!(err, TetherError::Config(_)));
    }
}
