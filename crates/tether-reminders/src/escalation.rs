// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Escalation tiers and their phrasing.
//!
//! Templates accept `{title}`, `{body}` and `{body_lower}` placeholders,
//! filled from the tier-0 notification.

use chrono::Duration;

use tether_config::model::{EscalationTierConfig, RemindersConfig};
use tether_core::ReminderNotification;

/// One retry tier: when it fires relative to the due time and what it says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationTier {
    pub offset: Duration,
    pub title: String,
    pub body: String,
}

impl From<&EscalationTierConfig> for EscalationTier {
    fn from(config: &EscalationTierConfig) -> Self {
        Self {
            offset: Duration::minutes(i64::from(config.offset_minutes)),
            title: config.title.clone(),
            body: config.body.clone(),
        }
    }
}

/// Ordered retry tiers. Tier 1 is the first entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationPolicy {
    tiers: Vec<EscalationTier>,
}

impl EscalationPolicy {
    pub fn new(tiers: Vec<EscalationTier>) -> Self {
        Self { tiers }
    }

    pub fn from_config(config: &RemindersConfig) -> Self {
        Self::new(config.tiers.iter().map(EscalationTier::from).collect())
    }

    /// Number of retry tiers after tier 0.
    pub fn retry_count(&self) -> usize {
        self.tiers.len()
    }

    pub fn tiers(&self) -> &[EscalationTier] {
        &self.tiers
    }

    /// Trigger id of retry tier `tier` (1-based) for a cascade.
    pub fn retry_id(base_id: &str, tier: usize) -> String {
        format!("{base_id}_retry{tier}")
    }

    /// Build the notification for retry tier `tier` (1-based).
    ///
    /// Returns `None` when the policy has no such tier.
    pub fn escalate(&self, base: &ReminderNotification, tier: usize) -> Option<ReminderNotification> {
        let step = self.tiers.get(tier.checked_sub(1)?)?;
        let title = render(&step.title, base);
        let body = render(&step.body, base);
        Some(ReminderNotification {
            id: Self::retry_id(&base.id, tier),
            reminder_id: base.reminder_id.clone(),
            category: base.category,
            scheduled_time: base.scheduled_time + step.offset,
            speak_text: Some(body.clone()),
            title,
            body,
            requires_response: true,
            escalation_tier: u32::try_from(tier).unwrap_or(u32::MAX),
            interactive: true,
        })
    }

    /// Tier 0 followed by every retry tier, in firing order.
    pub fn cascade(&self, base: &ReminderNotification) -> Vec<ReminderNotification> {
        let mut notifications = Vec::with_capacity(self.tiers.len() + 1);
        notifications.push(ReminderNotification {
            escalation_tier: 0,
            ..base.clone()
        });
        notifications.extend((1..=self.tiers.len()).filter_map(|tier| self.escalate(base, tier)));
        notifications
    }
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self::from_config(&RemindersConfig::default())
    }
}

fn render(template: &str, base: &ReminderNotification) -> String {
    template
        .replace("{title}", &base.title)
        .replace("{body_lower}", &lowercase_first(&base.body))
        .replace("{body}", &base.body)
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
