// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the collaborator traits and the Tether components.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Default ceiling of send attempts before a queued message is discarded.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Length of the random suffix appended to generated message ids.
const MESSAGE_ID_SUFFIX_LEN: usize = 9;

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of external collaborator behind an adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Transport,
    QueueStore,
    Connectivity,
    Notifications,
    Telemetry,
    Background,
    Speech,
}

// --- Outbound queue ---

/// Categorical tag of an outbound message.
///
/// Affects downstream handling by the backend, not queue mechanics.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MessageKind {
    #[default]
    Spontaneous,
    #[serde(rename = "reminder_response")]
    #[strum(serialize = "reminder_response")]
    ScheduledResponse,
    CheckIn,
    Emergency,
}

/// One queued outbound unit, persisted until delivered or exhausted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingMessage {
    pub id: String,
    pub subject_id: String,
    pub payload: String,
    pub kind: MessageKind,
    pub enqueued_at: DateTime<Utc>,
    /// Prior failed send attempts.
    #[serde(default)]
    pub attempt: u32,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

impl PendingMessage {
    /// Create a fresh entry with a generated id and zero attempts.
    pub fn new(
        subject_id: impl Into<String>,
        payload: impl Into<String>,
        kind: MessageKind,
        max_attempts: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Self::generate_id(now),
            subject_id: subject_id.into(),
            payload: payload.into(),
            kind,
            enqueued_at: now,
            attempt: 0,
            max_attempts,
        }
    }

    /// Generate a message id of the form `msg_{unix_millis}_{random}`.
    pub fn generate_id(now: DateTime<Utc>) -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(MESSAGE_ID_SUFFIX_LEN)
            .map(|b| char::from(b).to_ascii_lowercase())
            .collect();
        format!("msg_{}_{suffix}", now.timestamp_millis())
    }

    /// Record one failed send attempt.
    ///
    /// Returns `true` if the entry may be retried, `false` once the ceiling is reached.
    pub fn record_failure(&mut self) -> bool {
        self.attempt = self.attempt.saturating_add(1);
        !self.is_exhausted()
    }

    /// Whether the entry has used up its attempts.
    pub fn is_exhausted(&self) -> bool {
        self.attempt >= self.max_attempts
    }

    /// The request handed to the transport for this entry.
    pub fn to_outbound(&self) -> OutboundMessage {
        OutboundMessage {
            message_id: self.id.clone(),
            subject_id: self.subject_id.clone(),
            payload: self.payload.clone(),
            kind: self.kind,
        }
    }
}

/// A message handed to the opaque send operation.
///
/// `message_id` is stable across retries so the backend can de-duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub message_id: String,
    pub subject_id: String,
    pub payload: String,
    pub kind: MessageKind,
}

/// Result of one drain of the outbound queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Entries delivered and removed.
    pub success: usize,
    /// Entries that hit their attempt ceiling and were discarded.
    pub failed: usize,
    /// Entries kept for the next drain.
    pub remaining: usize,
}

impl SyncReport {
    /// A report for a drain that did not run.
    pub fn idle() -> Self {
        Self::default()
    }
}

// --- Connectivity ---

/// A single connectivity reading from the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectivityState {
    /// `None` when the platform cannot tell.
    pub connected: Option<bool>,
    /// Platform network type (`wifi`, `cellular`, `none`, `unknown`).
    pub network_type: String,
}

impl ConnectivityState {
    pub fn online(network_type: impl Into<String>) -> Self {
        Self {
            connected: Some(true),
            network_type: network_type.into(),
        }
    }

    pub fn offline() -> Self {
        Self {
            connected: Some(false),
            network_type: "none".to_string(),
        }
    }

    pub fn unknown() -> Self {
        Self {
            connected: None,
            network_type: "unknown".to_string(),
        }
    }

    /// Unknown connectivity is reported as offline.
    pub fn is_online(&self) -> bool {
        self.connected.unwrap_or(false)
    }
}

/// A connectivity transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum NetworkEdge {
    /// Offline to online.
    Online,
    /// Online to offline.
    Offline,
}

// --- Reminders ---

/// Domain category of a caregiving reminder.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReminderCategory {
    Medication,
    Meal,
    Activity,
    #[default]
    Other,
}

/// One schedulable alert instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderNotification {
    /// Trigger id; the base id of a cascade for tier 0.
    pub id: String,
    /// The domain reminder this notification represents.
    pub reminder_id: String,
    #[serde(default)]
    pub category: ReminderCategory,
    pub scheduled_time: DateTime<Utc>,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub speak_text: Option<String>,
    #[serde(default)]
    pub requires_response: bool,
    #[serde(default)]
    pub escalation_tier: u32,
    /// Interaction opens a live two-way conversation instead of a passive screen.
    #[serde(default)]
    pub interactive: bool,
}

/// Action buttons attached to a reminder trigger.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationAction {
    Acknowledge,
    Snooze,
    #[serde(rename = "voice_chat")]
    #[strum(serialize = "voice_chat")]
    Talk,
}

impl NotificationAction {
    /// Button label shown by the platform.
    pub fn label(self) -> &'static str {
        match self {
            Self::Acknowledge => "I did it",
            Self::Snooze => "Snooze",
            Self::Talk => "Talk",
        }
    }
}

/// Data carried with a trigger and handed back on user interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerData {
    /// Base id of the cascade the trigger belongs to.
    pub base_id: String,
    pub reminder_id: String,
    pub category: ReminderCategory,
    pub speak_text: String,
    pub requires_response: bool,
    pub interactive: bool,
    pub escalation_tier: u32,
}

/// Presentation content of a trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    /// Route through the alarm channel that bypasses quiet modes where allowed.
    pub critical: bool,
    pub actions: Vec<NotificationAction>,
    pub data: TriggerData,
}

/// A request to register one OS-level trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRequest {
    pub id: String,
    pub fire_at: DateTime<Utc>,
    pub content: NotificationContent,
}

/// A trigger currently held by the platform registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTrigger {
    pub id: String,
    pub fire_at: DateTime<Utc>,
    pub content: NotificationContent,
}

/// A user interaction with a surfaced notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    /// The notification body was pressed.
    Pressed { trigger_id: String, data: TriggerData },
    /// An action button was pressed.
    Action {
        trigger_id: String,
        action: NotificationAction,
        data: TriggerData,
    },
}

// --- Heartbeat ---

/// What a heartbeat report represents.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActivityType {
    #[default]
    Heartbeat,
    AppOpen,
    AppClose,
    Emergency,
}

/// Foreground/background state of the companion app.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AppState {
    #[default]
    Active,
    Background,
    Inactive,
}

/// Static device and build metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub model: String,
    pub os_version: String,
    pub app_version: String,
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self {
            model: "unknown".to_string(),
            os_version: "unknown".to_string(),
            app_version: "unknown".to_string(),
        }
    }
}

/// A liveness/status report. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartbeatReport {
    pub activity_type: ActivityType,
    /// Battery level in percent (0-100).
    pub battery_level: u8,
    pub is_charging: bool,
    pub app_state: AppState,
    pub network_type: String,
    pub last_interaction: Option<DateTime<Utc>>,
    pub device: DeviceInfo,
    pub collected_at: DateTime<Utc>,
}

/// State of the platform's periodic background execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BackgroundStatus {
    /// Periodic execution is registered and permitted.
    Available,
    /// The platform restricts background execution (e.g. parental controls).
    Restricted,
    /// The user or OS denied background execution.
    Denied,
    /// Nothing registered yet, or stopped.
    #[default]
    NotRegistered,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn generated_ids_are_prefixed_and_unique() {
        let now = Utc::now();
        let a = PendingMessage::generate_id(now);
        let b = PendingMessage::generate_id(now);
        assert!(a.starts_with(&format!("msg_{}_", now.timestamp_millis())));
        assert_ne!(a, b);
    }

    #[test]
    fn record_failure_stops_at_ceiling() {
        let mut msg = PendingMessage::new("patient-1", "hello", MessageKind::Spontaneous, 2);
        assert!(msg.record_failure());
        assert_eq!(msg.attempt, 1);
        assert!(!msg.record_failure());
        assert!(msg.is_exhausted());
    }

    #[test]
    fn message_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&MessageKind::ScheduledResponse).unwrap(),
            "\"reminder_response\""
        );
        assert_eq!(MessageKind::CheckIn.to_string(), "check_in");
        assert_eq!(
            MessageKind::from_str("reminder_response").unwrap(),
            MessageKind::ScheduledResponse
        );
    }

    #[test]
    fn pending_message_defaults_missing_counters() {
        let json = r#"{
            "id": "msg_1_abc",
            "subject_id": "p1",
            "payload": "hi",
            "kind": "check_in",
            "enqueued_at": "2026-01-01T08:00:00Z"
        }"#;
        let msg: PendingMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.attempt, 0);
        assert_eq!(msg.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(msg.kind, MessageKind::CheckIn);
    }

    #[test]
    fn unknown_connectivity_is_offline() {
        assert!(!ConnectivityState::unknown().is_online());
        assert!(!ConnectivityState::offline().is_online());
        assert!(ConnectivityState::online("wifi").is_online());
    }

    #[test]
    fn talk_action_uses_voice_chat_id() {
        assert_eq!(NotificationAction::Talk.to_string(), "voice_chat");
        assert_eq!(
            NotificationAction::from_str("acknowledge").unwrap(),
            NotificationAction::Acknowledge
        );
    }
}
