// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions.
//!
//! External collaborators extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod background;
pub mod connectivity;
pub mod notifications;
pub mod observer;
pub mod speech;
pub mod store;
pub mod telemetry;
pub mod transport;

pub use adapter::PluginAdapter;
pub use background::{BackgroundTasks, TickHandler};
pub use connectivity::ConnectivityProbe;
pub use notifications::TriggerRegistry;
pub use observer::{NoopObserver, SyncObserver};
pub use speech::Speaker;
pub use store::QueueStore;
pub use telemetry::DeviceTelemetry;
pub use transport::Transport;
