// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Tether delivery core.
//!
//! This crate provides the collaborator trait definitions, error types, and
//! domain types shared by the outbound queue, the reminder scheduler, and the
//! heartbeat scheduler. Platform integrations implement the traits defined here.

pub mod error;
pub mod subscription;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TetherError;
pub use subscription::Subscription;
pub use types::{
    ActivityType, AdapterType, AppState, BackgroundStatus, ConnectivityState, DeviceInfo,
    HealthStatus, HeartbeatReport, MessageKind, NetworkEdge, NotificationAction,
    NotificationContent, NotificationEvent, OutboundMessage, PendingMessage, ReminderCategory,
    ReminderNotification, ScheduledTrigger, SyncReport, TriggerData, TriggerRequest,
};

// Re-export all collaborator traits at crate root.
pub use traits::{
    BackgroundTasks, ConnectivityProbe, DeviceTelemetry, NoopObserver, PluginAdapter,
    QueueStore, Speaker, SyncObserver, TickHandler, Transport, TriggerRegistry,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tether_error_has_all_variants() {
        let _config = TetherError::Config("test".into());
        let _storage = TetherError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _transport = TetherError::transport("test");
        let _platform = TetherError::platform("register", "denied");
        let _telemetry = TetherError::Telemetry("battery".into());
        let _offline = TetherError::Offline;
        let _timeout = TetherError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        let _internal = TetherError::Internal("test".into());
    }

    #[test]
    fn transient_errors_are_classified() {
        assert!(TetherError::transport("503").is_transient());
        assert!(TetherError::Offline.is_transient());
        assert!(!TetherError::platform("register", "denied").is_transient());
        assert!(!TetherError::Config("bad".into()).is_transient());
    }

    #[test]
    fn adapter_type_round_trips_through_strings() {
        use std::str::FromStr;

        let variants = [
            AdapterType::Transport,
            AdapterType::QueueStore,
            AdapterType::Connectivity,
            AdapterType::Notifications,
            AdapterType::Telemetry,
            AdapterType::Background,
            AdapterType::Speech,
        ];
        for variant in &variants {
            let s = variant.to_string();
            let parsed = AdapterType::from_str(&s).expect("should parse back");
            assert_eq!(*variant, parsed);
        }
    }

    #[test]
    fn health_status_variants() {
        let healthy = HealthStatus::Healthy;
        let degraded = HealthStatus::Degraded("slow".into());
        assert_eq!(healthy, HealthStatus::Healthy);
        assert_ne!(degraded, healthy);
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_transport<T: Transport>() {}
        fn _assert_queue_store<T: QueueStore>() {}
        fn _assert_connectivity<T: ConnectivityProbe>() {}
        fn _assert_registry<T: TriggerRegistry>() {}
        fn _assert_telemetry<T: DeviceTelemetry>() {}
        fn _assert_background<T: BackgroundTasks>() {}
        fn _assert_speaker<T: Speaker>() {}
        fn _assert_observer<T: SyncObserver>() {}
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn attempts_never_exceed_ceiling(ceiling in 1u32..10, failures in 0usize..20) {
                let mut msg = PendingMessage::new("p", "x", MessageKind::Spontaneous, ceiling);
                let mut retried = 0usize;
                for _ in 0..failures {
                    if !msg.record_failure() {
                        break;
                    }
                    retried += 1;
                }
                prop_assert!(msg.attempt <= ceiling);
                prop_assert!(retried < ceiling as usize);
            }
        }
    }
}
