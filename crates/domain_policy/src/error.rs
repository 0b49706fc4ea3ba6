//! Policy domain errors
//!
//! This module defines all error types that can occur within the
//! policy lifecycle.

use core_kernel::TemporalError;
use thiserror::Error;

/// Errors that can occur in the policy domain
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Invalid state transition attempted
    ///
    /// Fatal to the operation and surfaced to the caller; transitions are
    /// never silently ignored or retried.
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition {
        from: String,
        to: String,
    },

    /// Required field is missing
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    /// Attached summary does not cover the policy's period
    #[error("Weather summary covers {actual}, policy covers {expected}")]
    SummaryPeriodMismatch {
        expected: String,
        actual: String,
    },

    /// Contractual terms failed validation
    #[error("Invalid terms: {0}")]
    InvalidTerms(String),

    /// Coverage period validation error
    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),
}

impl PolicyError {
    /// Creates an invalid transition error
    pub fn invalid_transition(from: impl Into<String>, to: impl Into<String>) -> Self {
        PolicyError::InvalidStateTransition {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Creates an invalid terms error
    pub fn invalid_terms(message: impl Into<String>) -> Self {
        PolicyError::InvalidTerms(message.into())
    }
}
