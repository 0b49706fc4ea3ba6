//! Settlement domain errors

use domain_policy::PolicyError;
use thiserror::Error;

/// Errors that can occur during settlement
///
/// Settlement computation itself has no failure mode once given valid
/// inputs; these errors cover misuse (wrong lifecycle state, mismatched
/// summary) and evidence-record serialization.
#[derive(Debug, Error)]
pub enum SettlementError {
    /// The policy has not entered the settling state
    #[error("Policy is {status}, settlement requires the settling state")]
    PolicyNotSettling {
        status: String,
    },

    /// The summary does not cover the policy's period
    #[error("Weather summary covers {actual}, policy covers {expected}")]
    PeriodMismatch {
        expected: String,
        actual: String,
    },

    /// A lifecycle transition failed while committing the outcome
    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    /// Canonical serialization of the proof inputs failed
    #[error("Proof canonicalization error: {0}")]
    Canonicalization(#[from] serde_json::Error),
}
