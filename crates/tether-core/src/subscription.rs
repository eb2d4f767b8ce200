// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Disposer handles for background listeners.
//!
//! Every listener spawned by a Tether component is tied to a [`Subscription`].
//! Disposing it (explicitly or by dropping it) cancels the listener, so
//! components constructed repeatedly never leak handlers.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Handle owning one background listener.
#[derive(Debug)]
pub struct Subscription {
    name: &'static str,
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Wrap a spawned listener that watches `token` for cancellation.
    pub fn new(name: &'static str, token: CancellationToken, handle: JoinHandle<()>) -> Self {
        Self {
            name,
            token,
            handle: Some(handle),
        }
    }

    /// Name given to the listener, for logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the listener has been told to stop.
    pub fn is_disposed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Stop the listener and wait for it to exit.
    pub async fn dispose(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                debug!(listener = self.name, error = %e, "listener ended abnormally");
            }
        }
        debug!(listener = self.name, "subscription disposed");
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
