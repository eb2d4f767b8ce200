// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Periodic liveness reporting for the Tether delivery core.
//!
//! [`HeartbeatScheduler`] registers a periodic background task that collects
//! device telemetry and sends it through the shared transport. Heartbeats are
//! best effort: no retry, no persistence.

pub mod interval;
pub mod scheduler;
pub mod telemetry;

pub use interval::IntervalTasks;
pub use scheduler::{HeartbeatScheduler, HeartbeatStatus};
pub use telemetry::collect_report;
