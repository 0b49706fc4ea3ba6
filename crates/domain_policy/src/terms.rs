//! Contractual terms of a cover

use core_kernel::Money;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

/// Immutable contractual parameters of a policy
///
/// The rain-day threshold is the only parametric knob; premium and payout
/// are flat amounts in the same settlement currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyTerms {
    rain_days_threshold: u32,
    premium: Money,
    payout: Money,
}

impl PolicyTerms {
    /// Creates validated terms
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::InvalidTerms` when the threshold is zero, an
    /// amount is negative, or premium and payout currencies differ.
    pub fn new(rain_days_threshold: u32, premium: Money, payout: Money) -> Result<Self, PolicyError> {
        if rain_days_threshold == 0 {
            return Err(PolicyError::invalid_terms(
                "rain-day threshold must be at least 1",
            ));
        }
        if premium.is_negative() || payout.is_negative() {
            return Err(PolicyError::invalid_terms(
                "premium and payout must be non-negative",
            ));
        }
        if premium.currency() != payout.currency() {
            return Err(PolicyError::invalid_terms(format!(
                "premium currency {} differs from payout currency {}",
                premium.currency(),
                payout.currency()
            )));
        }

        Ok(Self {
            rain_days_threshold,
            premium,
            payout,
        })
    }

    /// The standard rain-cover product: 2 rain days, $25 premium, $500 payout
    pub fn standard() -> Self {
        Self {
            rain_days_threshold: 2,
            premium: Money::usdc(dec!(25)),
            payout: Money::usdc(dec!(500)),
        }
    }

    /// Returns the rain-day threshold
    pub fn rain_days_threshold(&self) -> u32 {
        self.rain_days_threshold
    }

    /// Returns the premium amount
    pub fn premium(&self) -> Money {
        self.premium
    }

    /// Returns the payout amount awarded when the condition is met
    pub fn payout(&self) -> Money {
        self.payout
    }
}
