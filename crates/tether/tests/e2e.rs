// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the complete delivery core.
//!
//! Each test creates an isolated TestHarness with temp SQLite and mock
//! collaborators. Tests are independent and order-insensitive.

use chrono::{DateTime, TimeZone, Utc};
use tether_core::{
    ActivityType, MessageKind, NotificationAction, NotificationEvent, ReminderCategory,
    ReminderNotification,
};
use tether_reminders::InteractionOutcome;
use tether_test_utils::{TestHarness, TEST_SUBJECT};

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, hour, minute, 0).unwrap()
}

fn medication(id: &str) -> ReminderNotification {
    ReminderNotification {
        id: id.into(),
        reminder_id: "med-1".into(),
        category: ReminderCategory::Medication,
        scheduled_time: at(8, 0),
        title: "Morning medication".into(),
        body: "Take your heart pills".into(),
        speak_text: None,
        requires_response: true,
        escalation_tier: 0,
        interactive: false,
    }
}

// ---- Reminder cascade ----

#[tokio::test]
async fn medication_cascade_registers_four_critical_triggers() {
    let harness = TestHarness::builder().build().await.unwrap();

    let schedule = harness.reminders.schedule_with_retries(&medication("m1")).await;
    assert!(schedule.is_complete());

    let triggers = harness.reminders.get_scheduled().await;
    let times: Vec<DateTime<Utc>> = triggers.iter().map(|t| t.fire_at).collect();
    assert_eq!(times, [at(8, 0), at(8, 15), at(8, 20), at(8, 25)]);
    assert!(triggers.iter().all(|t| t.content.critical));
    assert!(triggers[1..].iter().all(|t| t.content.data.requires_response));
    harness.shutdown().await;
}

#[tokio::test]
async fn acknowledging_a_retry_queues_response_and_cancels_cascade() {
    let harness = TestHarness::builder().offline().build().await.unwrap();
    harness.reminders.schedule_with_retries(&medication("m1")).await;

    let retry = harness
        .reminders
        .get_scheduled()
        .await
        .into_iter()
        .find(|t| t.id == "m1_retry1")
        .unwrap();
    let outcome = harness
        .reminders
        .handle_interaction(NotificationEvent::Action {
            trigger_id: retry.id.clone(),
            action: NotificationAction::Acknowledge,
            data: retry.content.data.clone(),
        })
        .await
        .unwrap();
    assert_eq!(outcome, InteractionOutcome::Acknowledged { base_id: "m1".into() });
    assert!(harness.reminders.get_scheduled().await.is_empty());

    // The app records the answer while offline; it is delivered on reconnect.
    harness
        .sync
        .enqueue(TEST_SUBJECT, "I took my heart pills", MessageKind::ScheduledResponse)
        .await
        .unwrap();
    assert!(harness.transport.sent_messages().is_empty());

    harness.go_online();
    harness.wait_for_drains(1).await.unwrap();
    let sent = harness.transport.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, MessageKind::ScheduledResponse);
    harness.shutdown().await;
}

#[tokio::test]
async fn cancel_twice_leaves_registry_empty() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness.reminders.schedule_with_retries(&medication("m1")).await;
    harness.reminders.cancel_all("m1").await;
    harness.reminders.cancel_all("m1").await;
    assert!(harness.registry.active_ids().is_empty());
    harness.shutdown().await;
}

// ---- Heartbeat ----

#[tokio::test]
async fn heartbeat_initializes_and_ticks() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness.heartbeat.initialize().await.unwrap();

    let task_id = harness.config.heartbeat.task_id.clone();
    assert!(harness.background.fire(&task_id).await);

    let beats = harness.transport.heartbeats();
    assert_eq!(beats.len(), 2);
    assert!(beats.iter().all(|(subject, _)| subject == TEST_SUBJECT));
    assert!(harness.heartbeat.get_status().await.initialized);
    harness.shutdown().await;
}

#[tokio::test]
async fn emergency_alert_is_not_queued() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness.transport.fail_heartbeats(true);

    assert!(harness.heartbeat.send_emergency_alert().await.is_err());
    assert_eq!(harness.sync.pending_count().await.unwrap(), 0);

    harness.transport.fail_heartbeats(false);
    harness.heartbeat.send_emergency_alert().await.unwrap();
    let (_, report) = harness.transport.heartbeats().pop().unwrap();
    assert_eq!(report.activity_type, ActivityType::Emergency);
    harness.shutdown().await;
}

// ---- Outbound queue ----

#[tokio::test]
async fn reconnect_drains_once_per_edge() {
    let harness = TestHarness::builder().offline().build().await.unwrap();
    harness.enqueue("one").await.unwrap();

    harness.go_online();
    harness.wait_for_drains(1).await.unwrap();
    // A repeated online reading is not an edge.
    harness.go_online();
    harness.enqueue("two").await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    assert_eq!(harness.sync.diagnostics().drains_total, 1);
    assert_eq!(harness.sync.pending_count().await.unwrap(), 1);

    harness.go_offline();
    harness.go_online();
    harness.wait_for_drains(2).await.unwrap();
    assert_eq!(harness.transport.sent_messages().len(), 2);
    harness.shutdown().await;
}
