// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for the Tether outbound queue.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a single-writer
//! concurrency model via `tokio-rusqlite`, and a [`QueueStore`](tether_core::QueueStore)
//! that keeps the queue as one JSON document.

pub mod database;
pub mod migrations;
pub mod queries;
pub mod queue_store;

pub use database::Database;
pub use queue_store::SqliteQueueStore;
