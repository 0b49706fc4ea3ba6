//! Settlement engine
//!
//! Combines a settling policy's contractual terms with a weather summary to
//! produce the final `SettlementOutcome`. The decision is a pure function
//! of (terms, summary); the engine holds only the data-source identifier
//! recorded in the evidence record.

use chrono::{DateTime, Utc};
use tracing::info;

use core_kernel::Money;
use domain_policy::{Policy, SettlementOutcome};
use domain_weather::WeatherSummary;

use crate::error::SettlementError;
use crate::proof::build_proof;

/// Domain service producing settlement outcomes
///
/// # Example
///
/// ```rust,ignore
/// let engine = SettlementEngine::new(provider.source_id());
/// policy.begin_settlement()?;
/// let outcome = engine.settle_and_commit(&mut policy, Utc::now())?;
/// ```
pub struct SettlementEngine {
    data_source: String,
}

impl SettlementEngine {
    /// Creates an engine recording the given data-source identifier
    pub fn new(data_source: impl Into<String>) -> Self {
        Self {
            data_source: data_source.into(),
        }
    }

    /// Produces the settlement outcome for a settling policy
    ///
    /// The summary may be the policy's frozen copy or a freshly re-fetched
    /// one; either way it must cover exactly the policy's period. The
    /// decision is deterministic given (terms, summary) - only `settled_at`
    /// and the transaction reference salted by it vary between calls.
    ///
    /// # Errors
    ///
    /// Returns `PolicyNotSettling` unless the policy is in the settling
    /// state, and `PeriodMismatch` when the summary covers a different
    /// window.
    pub fn settle(
        &self,
        policy: &Policy,
        summary: &WeatherSummary,
        settled_at: DateTime<Utc>,
    ) -> Result<SettlementOutcome, SettlementError> {
        if !policy.is_settling() {
            return Err(SettlementError::PolicyNotSettling {
                status: policy.status().name().to_string(),
            });
        }
        if !summary.covers(&policy.period()) {
            return Err(SettlementError::PeriodMismatch {
                expected: policy.period().to_string(),
                actual: summary
                    .period()
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "empty summary".to_string()),
            });
        }

        let terms = policy.terms();
        let threshold = terms.rain_days_threshold();
        let rain_days = summary.total_rain_days();
        let condition_met = rain_days >= threshold;
        let payout_amount = if condition_met {
            terms.payout()
        } else {
            Money::zero(terms.payout().currency())
        };

        let finalized = summary.finalized(threshold);
        let proof = build_proof(
            policy,
            &finalized,
            condition_met,
            payout_amount,
            settled_at,
            &self.data_source,
        )?;

        info!(
            policy_id = %policy.id(),
            rain_days,
            threshold,
            condition_met,
            payout = %payout_amount,
            "settlement decision computed"
        );

        Ok(SettlementOutcome {
            condition_met,
            rain_days,
            threshold,
            payout_amount,
            weather_summary: finalized,
            proof,
            settled_at,
        })
    }

    /// Settles against the policy's frozen summary and commits the outcome
    ///
    /// # Errors
    ///
    /// Returns `PolicyNotSettling` when no frozen summary is attached, or
    /// any error from the settle computation and the terminal transition.
    pub fn settle_and_commit(
        &self,
        policy: &mut Policy,
        settled_at: DateTime<Utc>,
    ) -> Result<SettlementOutcome, SettlementError> {
        let summary = policy
            .weather_summary()
            .cloned()
            .ok_or_else(|| SettlementError::PolicyNotSettling {
                status: policy.status().name().to_string(),
            })?;

        let outcome = self.settle(policy, &summary, settled_at)?;
        policy.complete_settlement(outcome.clone())?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::{CoveragePeriod, Timezone};
    use domain_policy::PolicyBuilder;
    use domain_weather::{Destination, SyntheticWeatherGenerator};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal_macros::dec;

    fn period() -> CoveragePeriod {
        CoveragePeriod::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 7).unwrap(),
        )
        .unwrap()
    }

    fn settling_policy(rain_days: usize) -> (Policy, WeatherSummary) {
        let destination = Destination::new(
            "Paris",
            48.8566,
            2.3522,
            Timezone::new(chrono_tz::Europe::Paris),
        )
        .unwrap();
        let mut policy = PolicyBuilder::new()
            .destination(destination)
            .period(period())
            .build()
            .unwrap();

        let mut rng = StdRng::seed_from_u64(17);
        let summary =
            SyntheticWeatherGenerator::new().generate(period(), Some(rain_days), &mut rng);
        policy.begin_monitoring(summary.clone()).unwrap();
        policy.begin_settlement().unwrap();
        (policy, summary)
    }

    #[test]
    fn test_settle_requires_settling_state() {
        let destination = Destination::new("Paris", 48.8566, 2.3522, Timezone::default()).unwrap();
        let policy = PolicyBuilder::new()
            .destination(destination)
            .period(period())
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let summary = SyntheticWeatherGenerator::new().generate(period(), Some(2), &mut rng);

        let engine = SettlementEngine::new("test source");
        let result = engine.settle(&policy, &summary, Utc::now());

        assert!(matches!(
            result,
            Err(SettlementError::PolicyNotSettling { .. })
        ));
    }

    #[test]
    fn test_payout_when_condition_met() {
        let (policy, summary) = settling_policy(3);
        let engine = SettlementEngine::new("test source");

        let outcome = engine.settle(&policy, &summary, Utc::now()).unwrap();

        assert!(outcome.condition_met);
        assert_eq!(outcome.payout_amount, core_kernel::Money::usdc(dec!(500)));
        assert!(outcome.weather_summary.condition_met());
    }

    #[test]
    fn test_zero_payout_when_condition_not_met() {
        let (policy, summary) = settling_policy(1);
        let engine = SettlementEngine::new("test source");

        let outcome = engine.settle(&policy, &summary, Utc::now()).unwrap();

        assert!(!outcome.condition_met);
        assert!(outcome.payout_amount.is_zero());
        assert!(!outcome.weather_summary.condition_met());
    }

    #[test]
    fn test_settle_and_commit_reaches_terminal_state() {
        let (mut policy, _) = settling_policy(2);
        let engine = SettlementEngine::new("test source");

        let outcome = engine.settle_and_commit(&mut policy, Utc::now()).unwrap();

        assert!(policy.is_settled());
        assert_eq!(policy.outcome().unwrap(), &outcome);
    }
}
