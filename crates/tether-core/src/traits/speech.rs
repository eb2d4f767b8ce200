// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text-to-speech trait.

use async_trait::async_trait;

use crate::error::TetherError;
use crate::traits::adapter::PluginAdapter;

/// Opaque `speak` operation provided by the text-to-speech engine.
#[async_trait]
pub trait Speaker: PluginAdapter {
    async fn speak(&self, text: &str) -> Result<(), TetherError>;
}
