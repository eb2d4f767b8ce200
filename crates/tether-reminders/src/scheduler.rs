// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reminder notification scheduler.
//!
//! Registers reminder cascades with the platform trigger registry, cancels
//! them, surfaces notifications immediately and routes user interactions.
//! Trigger ids are `{base}`, `{base}_retry{n}` and `{base}_snooze`.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use tether_config::model::RemindersConfig;
use tether_core::{
    NotificationAction, NotificationContent, NotificationEvent, ReminderCategory,
    ReminderNotification, ScheduledTrigger, Speaker, TetherError, TriggerData, TriggerRegistry,
    TriggerRequest,
};

use crate::escalation::EscalationPolicy;

/// Buttons attached to every reminder trigger.
const ACTIONS: [NotificationAction; 3] = [
    NotificationAction::Acknowledge,
    NotificationAction::Snooze,
    NotificationAction::Talk,
];

/// Title used when a snoozed trigger's cascade is no longer tracked.
const FALLBACK_SNOOZE_TITLE: &str = "Reminder";

/// Outcome of registering one cascade.
#[derive(Debug)]
pub struct CascadeSchedule {
    pub base_id: String,
    /// Registered trigger ids, in tier order.
    pub ids: Vec<String>,
    /// Triggers the registry refused, with the reason.
    pub failures: Vec<(String, TetherError)>,
}

impl CascadeSchedule {
    /// Whether at least one trigger of the cascade is armed.
    pub fn is_scheduled(&self) -> bool {
        !self.ids.is_empty()
    }

    /// Whether every tier was registered.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// What the app should do after a user interacted with a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionOutcome {
    /// Open a live two-way conversation about the reminder.
    Conversation { reminder_id: String, autostart: bool },
    /// The trigger's text was read aloud.
    Spoke { text: String },
    /// The cascade was cancelled.
    Acknowledged { base_id: String },
    /// A snooze trigger was registered.
    Snoozed {
        trigger_id: String,
        fire_at: DateTime<Utc>,
    },
}

#[derive(Debug, Clone)]
struct Cascade {
    reminder_id: String,
    lead: NotificationContent,
}

/// Schedules reminder cascades on the platform trigger registry.
pub struct ReminderScheduler {
    registry: Arc<dyn TriggerRegistry>,
    speaker: Arc<dyn Speaker>,
    policy: EscalationPolicy,
    critical: HashSet<ReminderCategory>,
    snooze: Duration,
    /// Active cascades keyed by base id.
    cascades: Mutex<HashMap<String, Cascade>>,
}

impl ReminderScheduler {
    pub fn new(
        registry: Arc<dyn TriggerRegistry>,
        speaker: Arc<dyn Speaker>,
        config: &RemindersConfig,
    ) -> Self {
        let critical = config
            .critical_categories
            .iter()
            .filter_map(|name| match ReminderCategory::from_str(name) {
                Ok(category) => Some(category),
                Err(_) => {
                    warn!(category = %name, "ignoring unknown critical reminder category");
                    None
                }
            })
            .collect();

        Self {
            registry,
            speaker,
            policy: EscalationPolicy::from_config(config),
            critical,
            snooze: Duration::minutes(i64::from(config.snooze_minutes)),
            cascades: Mutex::new(HashMap::new()),
        }
    }

    pub fn policy(&self) -> &EscalationPolicy {
        &self.policy
    }

    /// Whether reminders of `category` use the critical alarm channel.
    pub fn is_critical(&self, category: ReminderCategory) -> bool {
        self.critical.contains(&category)
    }

    /// Register the tier-0 trigger and every retry tier for a reminder.
    ///
    /// Any cascade already active for the same `reminder_id`, whether tracked
    /// here or only present in the registry, is cancelled first. Registration failures are per trigger and never abort the rest
    /// of the cascade.
    pub async fn schedule_with_retries(&self, notification: &ReminderNotification) -> CascadeSchedule {
        let mut superseded: HashSet<String> = self
            .cascades
            .lock()
            .await
            .iter()
            .filter(|(_, cascade)| cascade.reminder_id == notification.reminder_id)
            .map(|(base, _)| base.clone())
            .collect();
        // Triggers outlive the process, so cascades armed before a restart
        // are only visible through the registry.
        superseded.extend(
            self.get_scheduled()
                .await
                .into_iter()
                .filter(|trigger| trigger.content.data.reminder_id == notification.reminder_id)
                .map(|trigger| trigger.content.data.base_id),
        );
        for base in superseded {
            info!(
                reminder_id = %notification.reminder_id,
                base_id = %base,
                "replacing existing reminder cascade"
            );
            self.cancel_all(&base).await;
        }

        let base_id = notification.id.clone();
        let mut schedule = CascadeSchedule {
            base_id: base_id.clone(),
            ids: Vec::new(),
            failures: Vec::new(),
        };
        let mut lead = None;

        for tier in self.policy.cascade(notification) {
            let content = self.content_for(&tier, &base_id);
            if tier.escalation_tier == 0 {
                lead = Some(content.clone());
            }
            let request = TriggerRequest {
                id: tier.id.clone(),
                fire_at: tier.scheduled_time,
                content,
            };
            match self.registry.register(&request).await {
                Ok(trigger_id) => {
                    debug!(
                        trigger_id = %trigger_id,
                        tier = tier.escalation_tier,
                        fire_at = %tier.scheduled_time,
                        "reminder trigger registered"
                    );
                    schedule.ids.push(trigger_id);
                }
                Err(e) => {
                    error!(
                        trigger_id = %tier.id,
                        reminder_id = %tier.reminder_id,
                        error = %e,
                        "failed to register reminder trigger"
                    );
                    schedule.failures.push((tier.id, e));
                }
            }
        }

        if let Some(lead) = lead.filter(|_| schedule.is_scheduled()) {
            self.cascades.lock().await.insert(
                base_id,
                Cascade {
                    reminder_id: notification.reminder_id.clone(),
                    lead,
                },
            );
        }

        info!(
            reminder_id = %notification.reminder_id,
            registered = schedule.ids.len(),
            failed = schedule.failures.len(),
            "reminder cascade scheduled"
        );
        schedule
    }

    /// Cancel every trigger of the cascade rooted at `base_id`.
    ///
    /// Unknown ids are a no-op; failures are logged and never returned.
    pub async fn cancel_all(&self, base_id: &str) {
        let mut ids = Vec::with_capacity(self.policy.retry_count() + 2);
        ids.push(base_id.to_string());
        ids.extend((1..=self.policy.retry_count()).map(|tier| EscalationPolicy::retry_id(base_id, tier)));
        ids.push(snooze_id(base_id));

        for id in &ids {
            if let Err(e) = self.registry.cancel(id).await {
                warn!(trigger_id = %id, error = %e, "failed to cancel reminder trigger");
            }
        }
        self.cascades.lock().await.remove(base_id);
        debug!(base_id, "reminder cascade cancelled");
    }

    /// Cancel every cascade this scheduler tracks or the registry still holds.
    ///
    /// Returns the number of cascades cancelled.
    pub async fn cancel_everything(&self) -> usize {
        let mut bases: HashSet<String> = self.cascades.lock().await.keys().cloned().collect();
        bases.extend(
            self.get_scheduled()
                .await
                .into_iter()
                .map(|trigger| trigger.content.data.base_id),
        );
        for base in &bases {
            self.cancel_all(base).await;
        }
        info!(cascades = bases.len(), "all reminder cascades cancelled");
        bases.len()
    }

    /// Surface a notification now, reading `speak_text` aloud if present.
    pub async fn display_now(&self, notification: &ReminderNotification) -> Result<String, TetherError> {
        let content = self.content_for(notification, &notification.id);
        let trigger_id = self.registry.display(&notification.id, &content).await?;
        if let Some(text) = &notification.speak_text {
            self.speak(text).await;
        }
        Ok(trigger_id)
    }

    /// Triggers the registry still holds. A failed listing is logged and empty.
    pub async fn get_scheduled(&self) -> Vec<ScheduledTrigger> {
        match self.registry.pending().await {
            Ok(triggers) => triggers,
            Err(e) => {
                error!(error = %e, "failed to list scheduled reminder triggers");
                Vec::new()
            }
        }
    }

    /// Route a user interaction with a surfaced notification.
    pub async fn handle_interaction(
        &self,
        event: NotificationEvent,
    ) -> Result<InteractionOutcome, TetherError> {
        self.handle_interaction_at(event, Utc::now()).await
    }

    /// [`ReminderScheduler::handle_interaction`] with an explicit clock.
    pub async fn handle_interaction_at(
        &self,
        event: NotificationEvent,
        now: DateTime<Utc>,
    ) -> Result<InteractionOutcome, TetherError> {
        match event {
            NotificationEvent::Pressed { trigger_id, data } => {
                debug!(trigger_id = %trigger_id, interactive = data.interactive, "notification pressed");
                if data.interactive {
                    Ok(InteractionOutcome::Conversation {
                        reminder_id: data.reminder_id,
                        autostart: true,
                    })
                } else {
                    self.speak(&data.speak_text).await;
                    Ok(InteractionOutcome::Spoke {
                        text: data.speak_text,
                    })
                }
            }
            NotificationEvent::Action {
                trigger_id,
                action,
                data,
            } => {
                info!(trigger_id = %trigger_id, action = %action, "notification action");
                match action {
                    NotificationAction::Acknowledge => {
                        self.cancel_all(&data.base_id).await;
                        Ok(InteractionOutcome::Acknowledged {
                            base_id: data.base_id,
                        })
                    }
                    NotificationAction::Snooze => self.snooze(&trigger_id, data, now).await,
                    NotificationAction::Talk => Ok(InteractionOutcome::Conversation {
                        reminder_id: data.reminder_id,
                        autostart: false,
                    }),
                }
            }
        }
    }

    async fn snooze(
        &self,
        trigger_id: &str,
        data: TriggerData,
        now: DateTime<Utc>,
    ) -> Result<InteractionOutcome, TetherError> {
        if let Err(e) = self.registry.cancel(trigger_id).await {
            warn!(trigger_id, error = %e, "failed to dismiss snoozed trigger");
        }

        let lead = self
            .cascades
            .lock()
            .await
            .get(&data.base_id)
            .map(|cascade| cascade.lead.clone());
        let content = match lead {
            Some(lead) => lead,
            None => NotificationContent {
                title: FALLBACK_SNOOZE_TITLE.to_string(),
                body: data.speak_text.clone(),
                critical: self.is_critical(data.category),
                actions: ACTIONS.to_vec(),
                data: data.clone(),
            },
        };

        let request = TriggerRequest {
            id: snooze_id(&data.base_id),
            fire_at: now + self.snooze,
            content,
        };
        let registered = self.registry.register(&request).await?;
        info!(trigger_id = %registered, fire_at = %request.fire_at, "reminder snoozed");
        Ok(InteractionOutcome::Snoozed {
            trigger_id: registered,
            fire_at: request.fire_at,
        })
    }

    async fn speak(&self, text: &str) {
        if let Err(e) = self.speaker.speak(text).await {
            warn!(error = %e, "failed to speak reminder text");
        }
    }

    fn content_for(&self, notification: &ReminderNotification, base_id: &str) -> NotificationContent {
        NotificationContent {
            title: notification.title.clone(),
            body: notification.body.clone(),
            critical: self.is_critical(notification.category),
            actions: ACTIONS.to_vec(),
            data: TriggerData {
                base_id: base_id.to_string(),
                reminder_id: notification.reminder_id.clone(),
                category: notification.category,
                speak_text: notification
                    .speak_text
                    .clone()
                    .unwrap_or_else(|| notification.body.clone()),
                requires_response: notification.requires_response,
                interactive: notification.interactive,
                escalation_tier: notification.escalation_tier,
            },
        }
    }
}

fn snooze_id(base_id: &str) -> String {
    format!("{base_id}_snooze")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tether_test_utils::{MockSpeaker, MockTriggerRegistry};

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, minute, 0).unwrap()
    }

    fn reminder(id: &str, reminder_id: &str, category: ReminderCategory) -> ReminderNotification {
        ReminderNotification {
            id: id.into(),
            reminder_id: reminder_id.into(),
            category,
            scheduled_time: at(8, 0),
            title: "Morning pills".into(),
            body: "Take your blood pressure medication".into(),
            speak_text: Some("Time for your morning pills".into()),
            requires_response: false,
            escalation_tier: 0,
            interactive: false,
        }
    }

    fn setup() -> (Arc<MockTriggerRegistry>, Arc<MockSpeaker>, ReminderScheduler) {
        let registry = Arc::new(MockTriggerRegistry::new());
        let speaker = Arc::new(MockSpeaker::new());
        let scheduler =
            ReminderScheduler::new(registry.clone(), speaker.clone(), &RemindersConfig::default());
        (registry, speaker, scheduler)
    }

    #[tokio::test]
    async fn medication_cascade_fires_at_each_tier() {
        let (registry, _, scheduler) = setup();
        let schedule = scheduler
            .schedule_with_retries(&reminder("r1", "42", ReminderCategory::Medication))
            .await;

        assert!(schedule.is_complete());
        assert_eq!(schedule.ids, ["r1", "r1_retry1", "r1_retry2", "r1_retry3"]);

        let fire_times: Vec<DateTime<Utc>> =
            registry.registrations().iter().map(|r| r.fire_at).collect();
        assert_eq!(fire_times, [at(8, 0), at(8, 15), at(8, 20), at(8, 25)]);

        let registrations = registry.registrations();
        let titles: Vec<&str> = registrations.iter().map(|r| r.content.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "Morning pills",
                "Reminder: Morning pills",
                "Check-in needed: Morning pills",
                "Important: Morning pills",
            ]
        );
        let spoken: Vec<&str> = registrations
            .iter()
            .map(|r| r.content.data.speak_text.as_str())
            .collect();
        assert_eq!(
            spoken,
            [
                "Time for your morning pills",
                "Please confirm: Take your blood pressure medication",
                "We haven't heard from you. Take your blood pressure medication",
                "We haven't heard from you yet. Please respond: Take your blood pressure medication",
            ]
        );
        assert!(registrations[1..].iter().all(|r| r.content.data.interactive));
        assert!(registry.registrations().iter().all(|r| r.content.critical));
        assert!(
            registry
                .registrations()
                .iter()
                .all(|r| r.content.actions == ACTIONS.to_vec())
        );
    }

    #[tokio::test]
    async fn non_critical_category_uses_standard_channel() {
        let (registry, _, scheduler) = setup();
        scheduler
            .schedule_with_retries(&reminder("r1", "42", ReminderCategory::Meal))
            .await;
        assert!(registry.registrations().iter().all(|r| !r.content.critical));
    }

    #[tokio::test]
    async fn partial_registration_failure_keeps_other_tiers() {
        let (registry, _, scheduler) = setup();
        registry.fail_register("r1_retry2");

        let schedule = scheduler
            .schedule_with_retries(&reminder("r1", "42", ReminderCategory::Medication))
            .await;

        assert!(schedule.is_scheduled());
        assert!(!schedule.is_complete());
        assert_eq!(schedule.ids, ["r1", "r1_retry1", "r1_retry3"]);
        assert_eq!(schedule.failures.len(), 1);
        assert_eq!(schedule.failures[0].0, "r1_retry2");
    }

    #[tokio::test]
    async fn fully_refused_cascade_is_not_scheduled() {
        let (registry, _, scheduler) = setup();
        for id in ["r1", "r1_retry1", "r1_retry2", "r1_retry3"] {
            registry.fail_register(id);
        }
        let schedule = scheduler
            .schedule_with_retries(&reminder("r1", "42", ReminderCategory::Medication))
            .await;
        assert!(!schedule.is_scheduled());
        assert_eq!(schedule.failures.len(), 4);
    }

    #[tokio::test]
    async fn cancel_all_is_idempotent() {
        let (registry, _, scheduler) = setup();
        scheduler
            .schedule_with_retries(&reminder("r1", "42", ReminderCategory::Medication))
            .await;

        scheduler.cancel_all("r1").await;
        assert!(registry.active_ids().is_empty());
        scheduler.cancel_all("r1").await;
        assert!(registry.active_ids().is_empty());
        scheduler.cancel_all("never-scheduled").await;

        let cancelled = registry.cancellations();
        assert_eq!(
            &cancelled[..5],
            ["r1", "r1_retry1", "r1_retry2", "r1_retry3", "r1_snooze"]
        );
    }

    #[tokio::test]
    async fn cancel_failures_are_swallowed() {
        let (registry, _, scheduler) = setup();
        registry.fail_cancels(true);
        scheduler.cancel_all("r1").await;
        assert_eq!(registry.cancellations().len(), 5);
    }

    #[tokio::test]
    async fn rescheduling_same_reminder_replaces_cascade() {
        let (registry, _, scheduler) = setup();
        scheduler
            .schedule_with_retries(&reminder("r1", "42", ReminderCategory::Medication))
            .await;
        scheduler
            .schedule_with_retries(&reminder("r2", "42", ReminderCategory::Medication))
            .await;

        assert_eq!(
            registry.active_ids(),
            ["r2", "r2_retry1", "r2_retry2", "r2_retry3"]
        );
    }

    #[tokio::test]
    async fn rescheduling_after_restart_replaces_persisted_cascade() {
        let (registry, speaker, before_restart) = setup();
        before_restart
            .schedule_with_retries(&reminder("r1", "42", ReminderCategory::Medication))
            .await;
        before_restart
            .schedule_with_retries(&reminder("other", "7", ReminderCategory::Meal))
            .await;
        drop(before_restart);

        let after_restart =
            ReminderScheduler::new(registry.clone(), speaker, &RemindersConfig::default());
        after_restart
            .schedule_with_retries(&reminder("r2", "42", ReminderCategory::Medication))
            .await;

        let active = registry.active_ids();
        assert!(!active.iter().any(|id| id.starts_with("r1")), "active: {active:?}");
        assert_eq!(
            active.iter().filter(|id| id.starts_with("r2")).count(),
            4,
            "active: {active:?}"
        );
        assert_eq!(
            active.iter().filter(|id| id.starts_with("other")).count(),
            4,
            "active: {active:?}"
        );
    }

    #[tokio::test]
    async fn display_now_speaks_text() {
        let (registry, speaker, scheduler) = setup();
        let id = scheduler
            .display_now(&reminder("now", "7", ReminderCategory::Activity))
            .await
            .unwrap();
        assert_eq!(id, "now");
        assert_eq!(registry.displayed().len(), 1);
        assert_eq!(speaker.spoken(), ["Time for your morning pills"]);
    }

    #[tokio::test]
    async fn display_now_survives_speech_failure() {
        let (_, speaker, scheduler) = setup();
        speaker.fail(true);
        let result = scheduler
            .display_now(&reminder("now", "7", ReminderCategory::Activity))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn display_now_reports_refusal() {
        let (registry, _, scheduler) = setup();
        registry.fail_register("now");
        let err = scheduler
            .display_now(&reminder("now", "7", ReminderCategory::Activity))
            .await
            .unwrap_err();
        assert!(matches!(err, TetherError::Platform { .. }));
    }

    #[tokio::test]
    async fn get_scheduled_lists_in_fire_order() {
        let (registry, _, scheduler) = setup();
        scheduler
            .schedule_with_retries(&reminder("r1", "42", ReminderCategory::Medication))
            .await;
        let listed: Vec<String> = scheduler.get_scheduled().await.into_iter().map(|t| t.id).collect();
        assert_eq!(listed, ["r1", "r1_retry1", "r1_retry2", "r1_retry3"]);

        registry.fail_listing(true);
        assert!(scheduler.get_scheduled().await.is_empty());
    }

    #[tokio::test]
    async fn cancel_everything_clears_registry() {
        let (registry, _, scheduler) = setup();
        scheduler
            .schedule_with_retries(&reminder("r1", "1", ReminderCategory::Medication))
            .await;
        scheduler
            .schedule_with_retries(&reminder("r2", "2", ReminderCategory::Meal))
            .await;

        assert_eq!(scheduler.cancel_everything().await, 2);
        assert!(registry.active_ids().is_empty());
    }

    fn data_for(registry: &MockTriggerRegistry, id: &str) -> TriggerData {
        registry
            .registrations()
            .into_iter()
            .find(|r| r.id == id)
            .map(|r| r.content.data)
            .unwrap()
    }

    #[tokio::test]
    async fn acknowledge_cancels_cascade() {
        let (registry, _, scheduler) = setup();
        scheduler
            .schedule_with_retries(&reminder("r1", "42", ReminderCategory::Medication))
            .await;

        let data = data_for(&registry, "r1_retry1");
        let outcome = scheduler
            .handle_interaction(NotificationEvent::Action {
                trigger_id: "r1_retry1".into(),
                action: NotificationAction::Acknowledge,
                data,
            })
            .await
            .unwrap();

        assert_eq!(outcome, InteractionOutcome::Acknowledged { base_id: "r1".into() });
        assert!(registry.active_ids().is_empty());
    }

    #[tokio::test]
    async fn press_on_retry_opens_conversation() {
        let (registry, speaker, scheduler) = setup();
        scheduler
            .schedule_with_retries(&reminder("r1", "42", ReminderCategory::Medication))
            .await;

        let outcome = scheduler
            .handle_interaction(NotificationEvent::Pressed {
                trigger_id: "r1_retry2".into(),
                data: data_for(&registry, "r1_retry2"),
            })
            .await
            .unwrap();
        assert_eq!(
            outcome,
            InteractionOutcome::Conversation {
                reminder_id: "42".into(),
                autostart: true
            }
        );
        assert!(speaker.spoken().is_empty());
    }

    #[tokio::test]
    async fn press_on_plain_trigger_speaks() {
        let (registry, speaker, scheduler) = setup();
        scheduler
            .schedule_with_retries(&reminder("r1", "42", ReminderCategory::Medication))
            .await;

        let outcome = scheduler
            .handle_interaction(NotificationEvent::Pressed {
                trigger_id: "r1".into(),
                data: data_for(&registry, "r1"),
            })
            .await
            .unwrap();
        assert_eq!(
            outcome,
            InteractionOutcome::Spoke {
                text: "Time for your morning pills".into()
            }
        );
        assert_eq!(speaker.spoken(), ["Time for your morning pills"]);
    }

    #[tokio::test]
    async fn talk_opens_conversation_without_autostart() {
        let (registry, _, scheduler) = setup();
        scheduler
            .schedule_with_retries(&reminder("r1", "42", ReminderCategory::Medication))
            .await;
        let outcome = scheduler
            .handle_interaction(NotificationEvent::Action {
                trigger_id: "r1".into(),
                action: NotificationAction::Talk,
                data: data_for(&registry, "r1"),
            })
            .await
            .unwrap();
        assert_eq!(
            outcome,
            InteractionOutcome::Conversation {
                reminder_id: "42".into(),
                autostart: false
            }
        );
    }

    #[tokio::test]
    async fn snooze_registers_delayed_trigger() {
        let (registry, _, scheduler) = setup();
        scheduler
            .schedule_with_retries(&reminder("r1", "42", ReminderCategory::Medication))
            .await;

        let outcome = scheduler
            .handle_interaction_at(
                NotificationEvent::Action {
                    trigger_id: "r1".into(),
                    action: NotificationAction::Snooze,
                    data: data_for(&registry, "r1"),
                },
                at(8, 1),
            )
            .await
            .unwrap();

        assert_eq!(
            outcome,
            InteractionOutcome::Snoozed {
                trigger_id: "r1_snooze".into(),
                fire_at: at(8, 6)
            }
        );
        assert!(!registry.is_active("r1"));
        assert!(registry.is_active("r1_retry1"));
        let snoozed = data_for(&registry, "r1_snooze");
        assert_eq!(snoozed.base_id, "r1");

        scheduler.cancel_all("r1").await;
        assert!(!registry.is_active("r1_snooze"));
    }

    #[tokio::test]
    async fn snooze_refusal_is_returned() {
        let (registry, _, scheduler) = setup();
        scheduler
            .schedule_with_retries(&reminder("r1", "42", ReminderCategory::Medication))
            .await;
        registry.fail_register("r1_snooze");
        let result = scheduler
            .handle_interaction(NotificationEvent::Action {
                trigger_id: "r1".into(),
                action: NotificationAction::Snooze,
                data: data_for(&registry, "r1"),
            })
            .await;
        assert!(result.is_err());
    }
}
