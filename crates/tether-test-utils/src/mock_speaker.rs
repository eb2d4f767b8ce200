// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock text-to-speech engine capturing spoken text.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use tether_core::traits::adapter::PluginAdapter;
use tether_core::traits::speech::Speaker;
use tether_core::types::AdapterType;
use tether_core::TetherError;

#[derive(Default)]
pub struct MockSpeaker {
    spoken: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl MockSpeaker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl PluginAdapter for MockSpeaker {
    fn name(&self) -> &str {
        "mock-speaker"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Speech
    }
}

#[async_trait]
impl Speaker for MockSpeaker {
    async fn speak(&self, text: &str) -> Result<(), TetherError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(TetherError::platform("speak", "audio session unavailable"));
        }
        self.spoken
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(text.to_string());
        Ok(())
    }
}
