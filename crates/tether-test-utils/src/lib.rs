// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Tether integration tests.
//!
//! Provides mock collaborators and test harness infrastructure for fast,
//! deterministic tests without a device or backend.
//!
//! # Components
//!
//! - [`MockTransport`] - Scripted send operation with an optional gate
//! - [`MockTriggerRegistry`] - Trigger registry with failure injection
//! - [`MockConnectivity`] - Connectivity probe with injectable transitions
//! - [`MockTelemetry`] - Device telemetry with per-read failures
//! - [`ManualBackground`] - Background ticker fired by the test
//! - [`TestHarness`] - The whole delivery core on a temp SQLite database

pub mod harness;
pub mod memory_store;
pub mod mock_background;
pub mod mock_connectivity;
pub mod mock_registry;
pub mod mock_speaker;
pub mod mock_telemetry;
pub mod mock_transport;
pub mod observer;

pub use harness::{TestHarness, TEST_SUBJECT};
pub use memory_store::MemoryQueueStore;
pub use mock_background::ManualBackground;
pub use mock_connectivity::MockConnectivity;
pub use mock_registry::MockTriggerRegistry;
pub use mock_speaker::MockSpeaker;
pub use mock_telemetry::{MockTelemetry, TelemetryRead, TelemetryValues};
pub use mock_transport::MockTransport;
pub use observer::RecordingObserver;
