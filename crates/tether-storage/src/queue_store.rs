// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the QueueStore trait.
//!
//! The whole queue is one JSON array stored under a single `kv_store` key.

use async_trait::async_trait;
use rusqlite::{OptionalExtension, params};
use tracing::{debug, warn};

use tether_core::types::PendingMessage;
use tether_core::{AdapterType, HealthStatus, PluginAdapter, QueueStore, TetherError};

use crate::database::{Database, map_tr_err};
use crate::queries;

/// SQLite-backed outbound queue store.
#[derive(Debug, Clone)]
pub struct SqliteQueueStore {
    db: Database,
    key: String,
}

impl SqliteQueueStore {
    /// Create a store persisting the queue under `key`.
    pub fn new(db: Database, key: impl Into<String>) -> Self {
        Self {
            db,
            key: key.into(),
        }
    }

    /// The key the queue is persisted under.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

fn decode(raw: Option<String>) -> Result<Vec<PendingMessage>, serde_json::Error> {
    match raw {
        Some(json) => serde_json::from_str(&json),
        None => Ok(Vec::new()),
    }
}

fn corrupt(e: serde_json::Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
}

#[async_trait]
impl PluginAdapter for SqliteQueueStore {
    fn name(&self) -> &str {
        "sqlite-queue"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::QueueStore
    }

    async fn health_check(&self) -> Result<HealthStatus, TetherError> {
        match self.read_all().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }

    async fn shutdown(&self) -> Result<(), TetherError> {
        self.db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("shutdown: WAL checkpoint complete");
        Ok(())
    }
}

#[async_trait]
impl QueueStore for SqliteQueueStore {
    async fn append(&self, entry: &PendingMessage) -> Result<(), TetherError> {
        let key = self.key.clone();
        let entry = entry.clone();
        let message_id = entry.id.clone();
        self.db
            .connection()
            .call(move |conn| -> Result<(), rusqlite::Error> {
                let tx = conn.transaction()?;
                let raw: Option<String> = tx
                    .query_row(
                        "SELECT value FROM kv_store WHERE key = ?1",
                        params![key],
                        |row| row.get(0),
                    )
                    .optional()?;
                // A corrupt document is reported, never overwritten.
                let mut entries = decode(raw).map_err(corrupt)?;
                entries.push(entry);
                let json = serde_json::to_string(&entries).map_err(corrupt)?;
                queries::kv::upsert(&tx, &key, &json)?;
                tx.commit()
            })
            .await
            .map_err(map_tr_err)?;
        debug!(message_id = %message_id, "queue entry persisted");
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<PendingMessage>, TetherError> {
        let raw = queries::kv::get(&self.db, &self.key).await?;
        decode(raw).map_err(|e| {
            warn!(key = %self.key, error = %e, "persisted queue is unreadable");
            TetherError::Storage {
                source: Box::new(e),
            }
        })
    }

    async fn replace_all(&self, entries: &[PendingMessage]) -> Result<(), TetherError> {
        let json = serde_json::to_string(entries)?;
        queries::kv::put(&self.db, &self.key, &json).await
    }
}
