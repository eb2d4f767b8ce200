// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the full delivery core (SQLite-backed queue,
//! network monitor, sync orchestrator, reminder and heartbeat schedulers)
//! on mock collaborators and a temp database.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tether_config::model::TetherConfig;
use tether_core::{ConnectivityState, Subscription, TetherError};
use tether_heartbeat::HeartbeatScheduler;
use tether_reminders::ReminderScheduler;
use tether_storage::{Database, SqliteQueueStore};
use tether_sync::{NetworkMonitor, OutboundSync};

use crate::mock_background::ManualBackground;
use crate::mock_connectivity::MockConnectivity;
use crate::mock_registry::MockTriggerRegistry;
use crate::mock_speaker::MockSpeaker;
use crate::mock_telemetry::MockTelemetry;
use crate::mock_transport::MockTransport;
use crate::observer::RecordingObserver;

/// How long the harness waits for background work to settle.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);
const SETTLE_POLL: Duration = Duration::from_millis(5);

/// Subject id used for every message and heartbeat the harness sends.
pub const TEST_SUBJECT: &str = "patient-1";

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    config: TetherConfig,
    online: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        let mut config = TetherConfig::default();
        config.queue.send_delay_ms = 0;
        Self {
            config,
            online: true,
        }
    }

    /// Start with the device offline.
    pub fn offline(mut self) -> Self {
        self.online = false;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.config.queue.max_attempts = max_attempts;
        self
    }

    /// Replace the whole configuration. The database path is always the harness's.
    pub fn with_config(mut self, config: TetherConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, TetherError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| TetherError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let mut config = self.config;
        config.storage.database_path = db_path.to_string_lossy().to_string();

        let initial = if self.online {
            ConnectivityState::online("wifi")
        } else {
            ConnectivityState::offline()
        };
        let connectivity = Arc::new(MockConnectivity::new(initial));
        let (monitor, monitor_sub) = NetworkMonitor::start(connectivity.clone()).await?;

        let transport = Arc::new(MockTransport::new());
        let observer = Arc::new(RecordingObserver::new());
        let store = Arc::new(open_store(&config).await?);
        let sync = OutboundSync::new(store.clone(), transport.clone(), config.queue.clone())
            .with_observer(observer.clone());
        let sync_sub = sync.attach(&monitor);

        let registry = Arc::new(MockTriggerRegistry::new());
        let speaker = Arc::new(MockSpeaker::new());
        let reminders = ReminderScheduler::new(registry.clone(), speaker.clone(), &config.reminders);

        let telemetry = Arc::new(MockTelemetry::new());
        let background = Arc::new(ManualBackground::new());
        let heartbeat = HeartbeatScheduler::new(
            transport.clone(),
            telemetry.clone(),
            background.clone(),
            config.heartbeat.clone(),
            TEST_SUBJECT,
        );

        Ok(TestHarness {
            config,
            store,
            sync,
            monitor,
            connectivity,
            transport,
            observer,
            registry,
            speaker,
            reminders,
            telemetry,
            background,
            heartbeat,
            subscriptions: vec![monitor_sub, sync_sub],
            db_path,
            _temp_dir: temp_dir,
        })
    }
}

async fn open_store(config: &TetherConfig) -> Result<SqliteQueueStore, TetherError> {
    let db = Database::open_config(&config.storage).await?;
    Ok(SqliteQueueStore::new(db, config.queue.storage_key.clone()))
}

/// A fully wired delivery core on mock collaborators.
pub struct TestHarness {
    pub config: TetherConfig,
    pub store: Arc<SqliteQueueStore>,
    pub sync: OutboundSync,
    pub monitor: NetworkMonitor,
    pub connectivity: Arc<MockConnectivity>,
    pub transport: Arc<MockTransport>,
    pub observer: Arc<RecordingObserver>,
    pub registry: Arc<MockTriggerRegistry>,
    pub speaker: Arc<MockSpeaker>,
    pub reminders: ReminderScheduler,
    pub telemetry: Arc<MockTelemetry>,
    pub background: Arc<ManualBackground>,
    pub heartbeat: HeartbeatScheduler,
    subscriptions: Vec<Subscription>,
    db_path: PathBuf,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Enqueue a spontaneous message for [`TEST_SUBJECT`].
    pub async fn enqueue(&self, payload: &str) -> Result<String, TetherError> {
        self.sync
            .enqueue(TEST_SUBJECT, payload, tether_core::MessageKind::Spontaneous)
            .await
    }

    pub fn go_online(&self) {
        self.connectivity.emit(ConnectivityState::online("wifi"));
    }

    pub fn go_offline(&self) {
        self.connectivity.emit(ConnectivityState::offline());
    }

    /// Wait until `count` drains have completed in total.
    pub async fn wait_for_drains(&self, count: u64) -> Result<(), TetherError> {
        tokio::time::timeout(SETTLE_TIMEOUT, async {
            while self.sync.diagnostics().drains_total < count {
                tokio::time::sleep(SETTLE_POLL).await;
            }
        })
        .await
        .map_err(|_| TetherError::Timeout {
            duration: SETTLE_TIMEOUT,
        })
    }

    /// A second orchestrator over the same database, as after an app restart.
    ///
    /// It has no network monitor attached and therefore treats the device as online.
    pub async fn restart_sync(&self) -> Result<OutboundSync, TetherError> {
        let store = Arc::new(open_store(&self.config).await?);
        Ok(OutboundSync::new(
            store,
            self.transport.clone(),
            self.config.queue.clone(),
        ))
    }

    /// Stop background listeners.
    pub async fn shutdown(self) {
        self.sync.shutdown().await;
        for sub in self.subscriptions {
            sub.dispose().await;
        }
    }
}
