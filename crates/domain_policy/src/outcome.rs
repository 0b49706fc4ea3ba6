//! Settlement outcome and evidence record
//!
//! These value types are owned by the `settled` status payload and are
//! never mutated after construction. The proof is an audit artifact - an
//! ordered list of the checks performed at settlement - not a cryptographic
//! integrity guarantee, although its digest is content-derived so any
//! tampering with the recorded inputs is detectable.

use chrono::{DateTime, Utc};
use core_kernel::{Money, PolicyId};
use serde::{Deserialize, Serialize};
use std::fmt;

use domain_weather::WeatherSummary;

/// Final decision for a settled policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementOutcome {
    /// Whether the contractual condition was met
    pub condition_met: bool,
    /// Rain days observed over the coverage period
    pub rain_days: u32,
    /// The threshold the observation was compared against
    pub threshold: u32,
    /// Payout actually awarded (zero when the condition was not met)
    pub payout_amount: Money,
    /// The weather summary the decision was made on, condition finalized
    pub weather_summary: WeatherSummary,
    /// Evidence record for the decision
    pub proof: SettlementProof,
    /// When settlement was committed
    pub settled_at: DateTime<Utc>,
}

impl SettlementOutcome {
    /// Returns true if a non-zero payout was awarded
    pub fn is_paid(&self) -> bool {
        self.condition_met && self.payout_amount.is_positive()
    }
}

/// Audit record of the checks performed during settlement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementProof {
    /// The settled policy
    pub policy_id: PolicyId,
    /// SHA-256 content digest over the canonical decision inputs, 0x-prefixed
    pub digest: String,
    /// Constraint checks in the fixed contract order
    pub constraints: Vec<ProofConstraint>,
    /// Identifier of the weather data source
    pub data_source: String,
    /// Opaque settlement transaction reference
    pub settlement_tx: String,
}

impl SettlementProof {
    /// Returns the constraint names in recorded order
    pub fn constraint_names(&self) -> Vec<ConstraintName> {
        self.constraints.iter().map(|c| c.name).collect()
    }

    /// Returns true if every recorded check verified
    pub fn all_verified(&self) -> bool {
        self.constraints.iter().all(|c| c.verified)
    }

    /// Returns the checks that failed verification
    pub fn failed_constraints(&self) -> Vec<&ProofConstraint> {
        self.constraints.iter().filter(|c| !c.verified).collect()
    }
}

/// One named check in the settlement proof
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofConstraint {
    pub name: ConstraintName,
    pub verified: bool,
    pub details: String,
}

/// The fixed set of settlement checks
///
/// The set and order are part of the settlement contract; tests verify
/// them against `ConstraintName::CONTRACT_ORDER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConstraintName {
    CoveragePeriodEnded,
    DataSourceAuthorized,
    LocationVerified,
    RainDayCalculationCorrect,
    ThresholdCheck,
    PayoutAmountCorrect,
    RecipientVerified,
}

impl ConstraintName {
    /// The contractual check order
    pub const CONTRACT_ORDER: [ConstraintName; 7] = [
        ConstraintName::CoveragePeriodEnded,
        ConstraintName::DataSourceAuthorized,
        ConstraintName::LocationVerified,
        ConstraintName::RainDayCalculationCorrect,
        ConstraintName::ThresholdCheck,
        ConstraintName::PayoutAmountCorrect,
        ConstraintName::RecipientVerified,
    ];

    /// Returns the kebab-case identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintName::CoveragePeriodEnded => "coverage-period-ended",
            ConstraintName::DataSourceAuthorized => "data-source-authorized",
            ConstraintName::LocationVerified => "location-verified",
            ConstraintName::RainDayCalculationCorrect => "rain-day-calculation-correct",
            ConstraintName::ThresholdCheck => "threshold-check",
            ConstraintName::PayoutAmountCorrect => "payout-amount-correct",
            ConstraintName::RecipientVerified => "recipient-verified",
        }
    }
}

impl fmt::Display for ConstraintName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
