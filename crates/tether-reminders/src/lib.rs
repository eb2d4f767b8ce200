// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local reminder notifications with cascading retry and escalation.
//!
//! A reminder is registered as a cascade: the tier-0 trigger at its due time
//! plus one escalated trigger per configured retry tier. Acknowledging any
//! trigger of a cascade cancels the rest.

pub mod escalation;
pub mod scheduler;

pub use escalation::{EscalationPolicy, EscalationTier};
pub use scheduler::{CascadeSchedule, InteractionOutcome, ReminderScheduler};
