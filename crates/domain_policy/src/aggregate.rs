//! Policy Aggregate Root
//!
//! The Policy aggregate is the consistency boundary for a single cover.
//! It exclusively owns its status payload - the cached weather summary
//! while monitoring, the outcome once settled - and all changes go through
//! lifecycle transitions that maintain the invariants.
//!
//! # State Machine
//!
//! Valid transitions:
//! - Pending -> Monitoring (via begin_monitoring)
//! - Monitoring -> Monitoring (begin_monitoring again; replaces the summary)
//! - Monitoring -> Settling (via begin_settlement; summary frozen)
//! - Settling -> Settled (via complete_settlement; terminal)
//!
//! Anything else is an `InvalidStateTransition`. A settled policy is never
//! recomputed; a session abandons the aggregate and creates a fresh one
//! under a new identifier instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::{CoveragePeriod, PolicyId};
use domain_weather::{Destination, WeatherSummary};

use crate::error::PolicyError;
use crate::events::PolicyEvent;
use crate::outcome::SettlementOutcome;
use crate::terms::PolicyTerms;

/// Policy lifecycle states
///
/// Each state carries the payload the policy owns while in it. The payloads
/// are never mutated in place; transitions replace the whole status value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PolicyStatus {
    /// Created, no weather fetched yet
    Pending,

    /// Weather summary attached; refreshed on every re-fetch
    Monitoring {
        summary: WeatherSummary,
    },

    /// Settlement in progress; the summary is frozen for the computation
    Settling {
        summary: WeatherSummary,
    },

    /// Terminal; outcome attached and immutable
    Settled {
        outcome: SettlementOutcome,
    },
}

impl PolicyStatus {
    /// Returns the state name for errors and logs
    pub fn name(&self) -> &'static str {
        match self {
            PolicyStatus::Pending => "pending",
            PolicyStatus::Monitoring { .. } => "monitoring",
            PolicyStatus::Settling { .. } => "settling",
            PolicyStatus::Settled { .. } => "settled",
        }
    }
}

/// The Policy aggregate root
///
/// Created once by the purchase action; mutated only through
/// lifecycle-defined transitions; never deleted, only abandoned by the
/// controlling session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    /// Unique policy identifier
    id: PolicyId,
    /// Covered destination
    destination: Destination,
    /// Inclusive coverage date window
    period: CoveragePeriod,
    /// Contractual terms
    terms: PolicyTerms,
    /// Current lifecycle state
    status: PolicyStatus,
    /// Domain events to be published
    #[serde(skip)]
    events: Vec<PolicyEvent>,
    /// Version for optimistic concurrency
    version: u32,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl Policy {
    /// Returns the policy ID
    pub fn id(&self) -> PolicyId {
        self.id
    }

    /// Returns the covered destination
    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    /// Returns the coverage period
    pub fn period(&self) -> CoveragePeriod {
        self.period
    }

    /// Returns the contractual terms
    pub fn terms(&self) -> &PolicyTerms {
        &self.terms
    }

    /// Returns the current status
    pub fn status(&self) -> &PolicyStatus {
        &self.status
    }

    /// Returns the aggregate version
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Returns the creation timestamp
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns accumulated domain events and clears them
    pub fn take_events(&mut self) -> Vec<PolicyEvent> {
        std::mem::take(&mut self.events)
    }

    /// Checks if the policy is awaiting its first weather fetch
    pub fn is_pending(&self) -> bool {
        matches!(self.status, PolicyStatus::Pending)
    }

    /// Checks if the policy is monitoring weather
    pub fn is_monitoring(&self) -> bool {
        matches!(self.status, PolicyStatus::Monitoring { .. })
    }

    /// Checks if settlement is in progress
    pub fn is_settling(&self) -> bool {
        matches!(self.status, PolicyStatus::Settling { .. })
    }

    /// Checks if the policy has reached its terminal state
    pub fn is_settled(&self) -> bool {
        matches!(self.status, PolicyStatus::Settled { .. })
    }

    /// Returns the attached weather summary, if any
    ///
    /// Available while monitoring (the refreshable cache) and while
    /// settling (the frozen copy).
    pub fn weather_summary(&self) -> Option<&WeatherSummary> {
        match &self.status {
            PolicyStatus::Monitoring { summary } | PolicyStatus::Settling { summary } => {
                Some(summary)
            }
            _ => None,
        }
    }

    /// Returns the settlement outcome once settled
    pub fn outcome(&self) -> Option<&SettlementOutcome> {
        match &self.status {
            PolicyStatus::Settled { outcome } => Some(outcome),
            _ => None,
        }
    }

    /// Attaches a fresh weather summary and enters monitoring
    ///
    /// Re-entrant: fetching fresh weather while already monitoring replaces
    /// the cached summary on this same aggregate.
    ///
    /// # Errors
    ///
    /// Returns `SummaryPeriodMismatch` when the summary does not cover the
    /// policy's period, and `InvalidStateTransition` once settlement has
    /// begun.
    pub fn begin_monitoring(&mut self, summary: WeatherSummary) -> Result<(), PolicyError> {
        if !matches!(
            self.status,
            PolicyStatus::Pending | PolicyStatus::Monitoring { .. }
        ) {
            return Err(PolicyError::invalid_transition(
                self.status.name(),
                "monitoring",
            ));
        }
        if !summary.covers(&self.period) {
            return Err(PolicyError::SummaryPeriodMismatch {
                expected: self.period.to_string(),
                actual: summary
                    .period()
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "empty summary".to_string()),
            });
        }

        let now = Utc::now();
        let total_rain_days = summary.total_rain_days();
        self.status = PolicyStatus::Monitoring { summary };
        self.touch(now);

        info!(policy_id = %self.id, total_rain_days, "policy monitoring weather");
        self.events.push(PolicyEvent::MonitoringStarted {
            policy_id: self.id,
            total_rain_days,
            timestamp: now,
        });

        Ok(())
    }

    /// Freezes the cached summary and enters settlement
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` unless the policy is monitoring -
    /// settling with no attached weather would silently record a false
    /// "condition not met".
    pub fn begin_settlement(&mut self) -> Result<(), PolicyError> {
        match std::mem::replace(&mut self.status, PolicyStatus::Pending) {
            PolicyStatus::Monitoring { summary } => {
                let now = Utc::now();
                self.status = PolicyStatus::Settling { summary };
                self.touch(now);

                info!(policy_id = %self.id, "policy entering settlement");
                self.events.push(PolicyEvent::SettlementStarted {
                    policy_id: self.id,
                    timestamp: now,
                });

                Ok(())
            }
            other => {
                let error = PolicyError::invalid_transition(other.name(), "settling");
                self.status = other;
                Err(error)
            }
        }
    }

    /// Commits the settlement outcome; terminal
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` unless settlement is in progress.
    /// A second settlement attempt against a settled policy is rejected,
    /// not recomputed.
    pub fn complete_settlement(&mut self, outcome: SettlementOutcome) -> Result<(), PolicyError> {
        match std::mem::replace(&mut self.status, PolicyStatus::Pending) {
            PolicyStatus::Settling { .. } => {
                let now = Utc::now();
                let condition_met = outcome.condition_met;
                let payout = outcome.payout_amount;
                self.status = PolicyStatus::Settled { outcome };
                self.touch(now);

                info!(policy_id = %self.id, condition_met, %payout, "policy settled");
                self.events.push(PolicyEvent::PolicySettled {
                    policy_id: self.id,
                    condition_met,
                    payout,
                    timestamp: now,
                });

                Ok(())
            }
            other => {
                let error = PolicyError::invalid_transition(other.name(), "settled");
                self.status = other;
                Err(error)
            }
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.version += 1;
        self.updated_at = now;
    }
}

/// Builder for creating new policies
///
/// # Example
///
/// ```rust,ignore
/// let policy = PolicyBuilder::new()
///     .destination(paris)
///     .period(CoveragePeriod::new(start, end)?)
///     .terms(PolicyTerms::standard())
///     .build()?;
/// ```
pub struct PolicyBuilder {
    destination: Option<Destination>,
    period: Option<CoveragePeriod>,
    terms: PolicyTerms,
}

impl PolicyBuilder {
    /// Creates a new builder with the standard product terms
    pub fn new() -> Self {
        Self {
            destination: None,
            period: None,
            terms: PolicyTerms::standard(),
        }
    }

    /// Sets the covered destination
    pub fn destination(mut self, destination: Destination) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Sets the coverage period
    pub fn period(mut self, period: CoveragePeriod) -> Self {
        self.period = Some(period);
        self
    }

    /// Overrides the standard terms
    pub fn terms(mut self, terms: PolicyTerms) -> Self {
        self.terms = terms;
        self
    }

    /// Builds the policy in `pending` state
    ///
    /// # Errors
    ///
    /// Returns error if required fields are missing
    pub fn build(self) -> Result<Policy, PolicyError> {
        let destination = self
            .destination
            .ok_or(PolicyError::MissingRequiredField("destination".to_string()))?;
        let period = self
            .period
            .ok_or(PolicyError::MissingRequiredField("period".to_string()))?;

        let now = Utc::now();
        let policy_id = PolicyId::new_v7();

        Ok(Policy {
            id: policy_id,
            destination: destination.clone(),
            period,
            terms: self.terms,
            status: PolicyStatus::Pending,
            events: vec![PolicyEvent::PolicyCreated {
                policy_id,
                destination: destination.name().to_string(),
                period,
                timestamp: now,
            }],
            version: 1,
            created_at: now,
            updated_at: now,
        })
    }
}

impl Default for PolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}
