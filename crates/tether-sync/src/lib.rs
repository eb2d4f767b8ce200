// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offline-resilient outbound messaging for the Tether delivery core.
//!
//! [`NetworkMonitor`] turns raw connectivity readings into edges;
//! [`OutboundSync`] persists outbound messages and drains them on every
//! offline-to-online edge.

pub mod network;
pub mod orchestrator;

pub use network::NetworkMonitor;
pub use orchestrator::{OutboundSync, SyncDiagnostics};
