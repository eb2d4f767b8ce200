// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Background execution trait wrapping the platform's periodic wake facility.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::error::TetherError;
use crate::traits::adapter::PluginAdapter;
use crate::types::BackgroundStatus;

/// Callback invoked on every periodic wake.
pub type TickHandler = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// Platform background execution primitive.
#[async_trait]
pub trait BackgroundTasks: PluginAdapter {
    /// Registers a periodic task. Re-registering the same id replaces it.
    ///
    /// A platform refusal is reported as [`TetherError::Platform`].
    async fn register_periodic(
        &self,
        task_id: &str,
        interval: Duration,
        on_tick: TickHandler,
    ) -> Result<BackgroundStatus, TetherError>;

    /// Current platform status of background execution.
    async fn status(&self) -> BackgroundStatus;

    /// Stops a periodic task. Unknown ids are not an error.
    async fn stop(&self, task_id: &str) -> Result<(), TetherError>;
}
