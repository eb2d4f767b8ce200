// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Tether delivery core.

use thiserror::Error;

/// The primary error type used across all Tether collaborator traits and core operations.
#[derive(Debug, Error)]
pub enum TetherError {
    /// Configuration errors (invalid values, missing sections).
    #[error("configuration error: {0}")]
    Config(String),

    /// Persistent store errors (database open, query failure, corrupt value).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The opaque send operation failed (network, backend rejection, timeout).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The platform refused an operation (permission revoked, quota, task denied).
    #[error("platform refused {operation}: {reason}")]
    Platform { operation: String, reason: String },

    /// A device telemetry read failed.
    #[error("telemetry unavailable: {0}")]
    Telemetry(String),

    /// An operation that requires connectivity was requested while offline.
    #[error("device is offline")]
    Offline,

    /// Serialization or deserialization of a persisted value failed.
    #[error("serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TetherError {
    /// Builds a transport error from a plain message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Builds a platform refusal for the named operation.
    pub fn platform(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Platform {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Whether retrying the same operation later may succeed.
    ///
    /// Platform refusals and configuration errors need user or operator action.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Offline | Self::Timeout { .. } | Self::Storage { .. }
        )
    }
}
