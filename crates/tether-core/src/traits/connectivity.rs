// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connectivity probe trait wrapping the platform network API.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::TetherError;
use crate::traits::adapter::PluginAdapter;
use crate::types::ConnectivityState;

/// Platform network primitive.
///
/// `subscribe` yields every raw reading the platform reports, including
/// repeated ones; edge detection is the network monitor's job. Dropping the
/// receiver unsubscribes.
#[async_trait]
pub trait ConnectivityProbe: PluginAdapter {
    /// Reads the current connectivity state.
    async fn read(&self) -> Result<ConnectivityState, TetherError>;

    /// Subscribes to connectivity change notifications.
    fn subscribe(&self) -> Result<broadcast::Receiver<ConnectivityState>, TetherError>;
}
