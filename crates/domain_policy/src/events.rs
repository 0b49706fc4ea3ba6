//! Domain events for the policy aggregate
//!
//! Domain events capture significant lifecycle occurrences for audit
//! trails and downstream integrations.

use chrono::{DateTime, Utc};
use core_kernel::{CoveragePeriod, Money, PolicyId};
use serde::{Deserialize, Serialize};

/// Domain events emitted by the Policy aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PolicyEvent {
    /// Policy purchased and created in pending state
    PolicyCreated {
        policy_id: PolicyId,
        destination: String,
        period: CoveragePeriod,
        timestamp: DateTime<Utc>,
    },

    /// A weather summary was attached (first fetch or refresh)
    MonitoringStarted {
        policy_id: PolicyId,
        total_rain_days: u32,
        timestamp: DateTime<Utc>,
    },

    /// Settlement has begun; terms and summary are frozen
    SettlementStarted {
        policy_id: PolicyId,
        timestamp: DateTime<Utc>,
    },

    /// Settlement committed; the policy is terminal
    PolicySettled {
        policy_id: PolicyId,
        condition_met: bool,
        payout: Money,
        timestamp: DateTime<Utc>,
    },
}

impl PolicyEvent {
    /// Returns the policy ID associated with this event
    pub fn policy_id(&self) -> PolicyId {
        match self {
            PolicyEvent::PolicyCreated { policy_id, .. } => *policy_id,
            PolicyEvent::MonitoringStarted { policy_id, .. } => *policy_id,
            PolicyEvent::SettlementStarted { policy_id, .. } => *policy_id,
            PolicyEvent::PolicySettled { policy_id, .. } => *policy_id,
        }
    }

    /// Returns the timestamp of this event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            PolicyEvent::PolicyCreated { timestamp, .. } => *timestamp,
            PolicyEvent::MonitoringStarted { timestamp, .. } => *timestamp,
            PolicyEvent::SettlementStarted { timestamp, .. } => *timestamp,
            PolicyEvent::PolicySettled { timestamp, .. } => *timestamp,
        }
    }

    /// Returns the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            PolicyEvent::PolicyCreated { .. } => "PolicyCreated",
            PolicyEvent::MonitoringStarted { .. } => "MonitoringStarted",
            PolicyEvent::SettlementStarted { .. } => "SettlementStarted",
            PolicyEvent::PolicySettled { .. } => "PolicySettled",
        }
    }
}
