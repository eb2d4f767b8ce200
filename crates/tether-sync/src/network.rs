// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Network state monitor.
//!
//! Folds the probe's raw readings into a single online flag and emits
//! [`NetworkEdge`]s only on transitions. Repeated readings of the same state
//! never re-fire.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use tether_core::{ConnectivityProbe, ConnectivityState, NetworkEdge, Subscription, TetherError};

const EDGE_CHANNEL_CAPACITY: usize = 16;

/// Shared view of device connectivity.
///
/// Cheap to clone; every clone observes the same state.
#[derive(Clone)]
pub struct NetworkMonitor {
    state: Arc<watch::Sender<ConnectivityState>>,
    edges: broadcast::Sender<NetworkEdge>,
}

impl std::fmt::Debug for NetworkMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkMonitor")
            .field("state", &*self.state.borrow())
            .finish()
    }
}

impl NetworkMonitor {
    /// Read the current state, then follow the probe's change stream.
    ///
    /// The initial read completes before this returns, so callers never see an
    /// uninitialized monitor. A failed read counts as offline. Only a failure
    /// to subscribe is returned as an error.
    pub async fn start(
        probe: Arc<dyn ConnectivityProbe>,
    ) -> Result<(Self, Subscription), TetherError> {
        let mut readings = probe.subscribe()?;
        let initial = read_or_offline(probe.as_ref()).await;
        info!(
            online = initial.is_online(),
            network_type = %initial.network_type,
            "network monitor started"
        );

        let monitor = Self::with_state(initial);
        let token = CancellationToken::new();
        let child = token.clone();
        let listener = monitor.clone();

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = child.cancelled() => break,
                    reading = readings.recv() => match reading {
                        Ok(state) => listener.apply(state),
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "connectivity readings lagged, re-reading state");
                            let state = read_or_offline(probe.as_ref()).await;
                            listener.apply(state);
                        }
                        Err(RecvError::Closed) => {
                            debug!("connectivity probe closed its stream");
                            break;
                        }
                    },
                }
            }
        });

        Ok((monitor, Subscription::new("network-monitor", token, handle)))
    }

    /// A monitor pinned to `state` with no probe behind it.
    ///
    /// Transitions can still be fed through [`NetworkMonitor::apply`].
    pub fn with_state(state: ConnectivityState) -> Self {
        let (state, _) = watch::channel(state);
        let (edges, _) = broadcast::channel(EDGE_CHANNEL_CAPACITY);
        Self {
            state: Arc::new(state),
            edges,
        }
    }

    /// Whether the device is currently online. Unknown counts as offline.
    pub fn is_online(&self) -> bool {
        self.state.borrow().is_online()
    }

    /// The most recent reading.
    pub fn current(&self) -> ConnectivityState {
        self.state.borrow().clone()
    }

    /// Subscribe to connectivity edges. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<NetworkEdge> {
        self.edges.subscribe()
    }

    /// Fold one reading into the state, emitting an edge on a transition.
    pub fn apply(&self, reading: ConnectivityState) {
        let now_online = reading.is_online();
        let was_online = self.state.send_replace(reading).is_online();

        let edge = match (was_online, now_online) {
            (false, true) => NetworkEdge::Online,
            (true, false) => NetworkEdge::Offline,
            _ => {
                debug!(online = now_online, "connectivity reading unchanged");
                return;
            }
        };

        info!(edge = %edge, "connectivity changed");
        // No receivers is fine: nothing is attached yet.
        let _ = self.edges.send(edge);
    }
}

async fn read_or_offline(probe: &dyn ConnectivityProbe) -> ConnectivityState {
    match probe.read().await {
        Ok(state) => state,
        Err(e) => {
            warn!(error = %e, "connectivity read failed, assuming offline");
            ConnectivityState::offline()
        }
    }
}
