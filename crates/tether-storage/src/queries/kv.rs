// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value document operations on the `kv_store` table.

use rusqlite::{OptionalExtension, params};
use tether_core::TetherError;

use crate::database::Database;

/// Read the value stored under `key`, if any.
pub async fn get(db: &Database, key: &str) -> Result<Option<String>, TetherError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<String>, rusqlite::Error> {
            conn.query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert or replace the value stored under `key`.
pub async fn put(db: &Database, key: &str, value: &str) -> Result<(), TetherError> {
    let key = key.to_string();
    let value = value.to_string();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            upsert(conn, &key, &value)?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Remove `key`. Missing keys are not an error.
pub async fn delete(db: &Database, key: &str) -> Result<(), TetherError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Upsert helper usable inside a caller's transaction.
pub(crate) fn upsert(
    conn: &rusqlite::Connection,
    key: &str,
    value: &str,
) -> Result<usize, rusqlite::Error> {
    conn.execute(
        "INSERT INTO kv_store (key, value, updated_at)
         VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
         ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at",
        params![key, value],
    )
}
