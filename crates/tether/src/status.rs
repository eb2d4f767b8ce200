// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tether status` command implementation.
//!
//! Reads the persisted outbound queue and shows the backlog and the next
//! entries due for delivery.

use std::io::IsTerminal;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tether_config::model::TetherConfig;
use tether_core::{PendingMessage, PluginAdapter, QueueStore, TetherError};

use crate::queue::open_store;

/// Entries listed in the human-readable output.
const PREVIEW_LEN: usize = 5;

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub pending: usize,
    pub database_path: String,
    pub next: Vec<EntrySummary>,
}

#[derive(Debug, Serialize)]
pub struct EntrySummary {
    pub id: String,
    pub kind: String,
    pub attempt: u32,
    pub max_attempts: u32,
    pub enqueued_at: DateTime<Utc>,
}

impl From<&PendingMessage> for EntrySummary {
    fn from(entry: &PendingMessage) -> Self {
        Self {
            id: entry.id.clone(),
            kind: entry.kind.to_string(),
            attempt: entry.attempt,
            max_attempts: entry.max_attempts,
            enqueued_at: entry.enqueued_at,
        }
    }
}

fn summarize(config: &TetherConfig, entries: &[PendingMessage], limit: usize) -> StatusResponse {
    StatusResponse {
        pending: entries.len(),
        database_path: config.storage.database_path.clone(),
        next: entries.iter().take(limit).map(EntrySummary::from).collect(),
    }
}

/// Run the `tether status` command.
pub async fn run_status(config: &TetherConfig, json: bool, plain: bool) -> Result<(), TetherError> {
    let store = open_store(config).await?;
    let entries = store.read_all().await?;

    if json {
        let status = summarize(config, &entries, entries.len());
        println!(
            "{}",
            serde_json::to_string_pretty(&status).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        print_status(&summarize(config, &entries, PREVIEW_LEN), use_color);
    }
    store.shutdown().await
}

fn print_status(status: &StatusResponse, use_color: bool) {
    println!();
    println!("  tether status");
    println!("  {}", "-".repeat(35));

    if use_color {
        use colored::Colorize;
        if status.pending == 0 {
            println!("    Queue:    {} {}", "✓".green(), "empty".green());
        } else {
            println!(
                "    Queue:    {} {}",
                "!".yellow(),
                format!("{} pending", status.pending).yellow()
            );
        }
    } else if status.pending == 0 {
        println!("    Queue:    [OK] empty");
    } else {
        println!("    Queue:    [PENDING] {}", status.pending);
    }
    println!("    Database: {}", status.database_path);

    for entry in &status.next {
        println!(
            "      {}  {:<18} attempt {}/{}  queued {}",
            entry.id,
            entry.kind,
            entry.attempt,
            entry.max_attempts,
            entry.enqueued_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    if status.pending > status.next.len() {
        println!("      ... and {} more", status.pending - status.next.len());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::MessageKind;

    #[test]
    fn summary_limits_preview() {
        let entries: Vec<PendingMessage> = (0..8)
            .map(|i| PendingMessage::new("p", format!("m{i}"), MessageKind::Spontaneous, 5))
            .collect();
        let status = summarize(&TetherConfig::default(), &entries, PREVIEW_LEN);
        assert_eq!(status.pending, 8);
        assert_eq!(status.next.len(), PREVIEW_LEN);
        assert_eq!(status.next[0].id, entries[0].id);
    }

    #[test]
    fn status_response_serializes() {
        let mut entry = PendingMessage::new("p", "x", MessageKind::ScheduledResponse, 5);
        entry.attempt = 2;
        let status = summarize(&TetherConfig::default(), &[entry], 10);
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"pending\":1"));
        assert!(json.contains("\"kind\":\"reminder_response\""));
        assert!(json.contains("\"attempt\":2"));
    }

    #[test]
    fn print_handles_empty_and_full_queues() {
        let config = TetherConfig::default();
        print_status(&summarize(&config, &[], PREVIEW_LEN), false);
        let entries = vec![PendingMessage::new("p", "x", MessageKind::Emergency, 5)];
        print_status(&summarize(&config, &entries, PREVIEW_LEN), true);
    }
}
