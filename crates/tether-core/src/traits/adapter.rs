// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that every external collaborator implements.

use async_trait::async_trait;

use crate::error::TetherError;
use crate::types::{AdapterType, HealthStatus};

/// The base trait for all Tether collaborator adapters.
///
/// Every adapter (transport, store, notification registry, etc.) implements
/// this trait, which provides identity, lifecycle, and health check capabilities.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the type of collaborator this adapter stands in for.
    fn adapter_type(&self) -> AdapterType;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, TetherError> {
        Ok(HealthStatus::Healthy)
    }

    /// Gracefully shuts down the adapter, releasing any held resources.
    async fn shutdown(&self) -> Result<(), TetherError> {
        Ok(())
    }
}
