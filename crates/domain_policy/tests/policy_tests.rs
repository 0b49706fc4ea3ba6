//! Comprehensive unit tests for the Policy domain
//!
//! Tests cover policy creation, lifecycle transitions, terminal-state
//! protection, and event emission.

use chrono::{NaiveDate, Utc};
use core_kernel::{CoveragePeriod, Money, PolicyId, Timezone};
use domain_policy::{
    ConstraintName, Policy, PolicyBuilder, PolicyError, PolicyStatus, PolicyTerms,
    SettlementOutcome, SettlementProof,
};
use domain_weather::{Destination, SyntheticWeatherGenerator, WeatherSummary};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn test_period() -> CoveragePeriod {
    CoveragePeriod::new(date(2024, 6, 1), date(2024, 6, 7)).unwrap()
}

fn test_destination() -> Destination {
    Destination::new(
        "Paris",
        48.8566,
        2.3522,
        Timezone::new(chrono_tz::Europe::Paris),
    )
    .unwrap()
}

fn create_test_policy() -> Policy {
    PolicyBuilder::new()
        .destination(test_destination())
        .period(test_period())
        .build()
        .unwrap()
}

fn summary_with(rain_days: usize, seed: u64) -> WeatherSummary {
    let mut rng = StdRng::seed_from_u64(seed);
    SyntheticWeatherGenerator::new().generate(test_period(), Some(rain_days), &mut rng)
}

/// Hand-assembled outcome for transition tests; the settlement engine's own
/// construction is covered in the settlement crate.
fn stub_outcome(policy: &Policy, summary: &WeatherSummary) -> SettlementOutcome {
    let condition_met = summary.total_rain_days() >= policy.terms().rain_days_threshold();
    SettlementOutcome {
        condition_met,
        rain_days: summary.total_rain_days(),
        threshold: policy.terms().rain_days_threshold(),
        payout_amount: if condition_met {
            policy.terms().payout()
        } else {
            Money::zero(policy.terms().payout().currency())
        },
        weather_summary: summary.finalized(policy.terms().rain_days_threshold()),
        proof: SettlementProof {
            policy_id: policy.id(),
            digest: "0x00".to_string(),
            constraints: vec![],
            data_source: "test".to_string(),
            settlement_tx: "0x00".to_string(),
        },
        settled_at: Utc::now(),
    }
}

mod policy_creation {
    use super::*;

    #[test]
    fn test_builder_creates_pending_policy() {
        let policy = create_test_policy();
        assert!(matches!(policy.status(), PolicyStatus::Pending));
    }

    #[test]
    fn test_policy_id_has_prefix() {
        let policy = create_test_policy();
        assert!(policy.id().to_string().starts_with(PolicyId::prefix()));
    }

    #[test]
    fn test_standard_terms_by_default() {
        let policy = create_test_policy();
        assert_eq!(policy.terms(), &PolicyTerms::standard());
    }

    #[test]
    fn test_custom_terms() {
        let terms =
            PolicyTerms::new(3, Money::usdc(dec!(40)), Money::usdc(dec!(1000))).unwrap();
        let policy = PolicyBuilder::new()
            .destination(test_destination())
            .period(test_period())
            .terms(terms.clone())
            .build()
            .unwrap();

        assert_eq!(policy.terms(), &terms);
    }

    #[test]
    fn test_builder_requires_period() {
        let result = PolicyBuilder::new().destination(test_destination()).build();
        assert!(matches!(result, Err(PolicyError::MissingRequiredField(_))));
    }

    #[test]
    fn test_distinct_policies_get_distinct_ids() {
        assert_ne!(create_test_policy().id(), create_test_policy().id());
    }
}

mod lifecycle {
    use super::*;

    #[test]
    fn test_full_lifecycle_to_settled() {
        let mut policy = create_test_policy();
        let summary = summary_with(2, 1);

        policy.begin_monitoring(summary.clone()).unwrap();
        policy.begin_settlement().unwrap();
        let outcome = stub_outcome(&policy, &summary);
        policy.complete_settlement(outcome).unwrap();

        assert!(policy.is_settled());
        assert!(policy.outcome().unwrap().condition_met);
        assert_eq!(policy.outcome().unwrap().payout_amount, Money::usdc(dec!(500)));
    }

    #[test]
    fn test_settle_pending_policy_fails() {
        let mut policy = create_test_policy();
        let result = policy.begin_settlement();

        assert!(matches!(
            result,
            Err(PolicyError::InvalidStateTransition { .. })
        ));
    }

    #[test]
    fn test_complete_settlement_requires_settling_state() {
        let mut policy = create_test_policy();
        let summary = summary_with(2, 2);
        policy.begin_monitoring(summary.clone()).unwrap();

        let outcome = stub_outcome(&policy, &summary);
        let result = policy.complete_settlement(outcome);

        assert!(matches!(
            result,
            Err(PolicyError::InvalidStateTransition { .. })
        ));
        assert!(policy.is_monitoring());
    }

    #[test]
    fn test_settled_policy_rejects_second_settlement() {
        let mut policy = create_test_policy();
        let summary = summary_with(1, 3);

        policy.begin_monitoring(summary.clone()).unwrap();
        policy.begin_settlement().unwrap();
        let outcome = stub_outcome(&policy, &summary);
        policy.complete_settlement(outcome.clone()).unwrap();

        // One commit per policy; never recomputed
        let second = policy.complete_settlement(outcome);
        assert!(matches!(
            second,
            Err(PolicyError::InvalidStateTransition { .. })
        ));
        assert!(policy.is_settled());
    }

    #[test]
    fn test_settled_policy_rejects_monitoring() {
        let mut policy = create_test_policy();
        let summary = summary_with(2, 4);

        policy.begin_monitoring(summary.clone()).unwrap();
        policy.begin_settlement().unwrap();
        policy
            .complete_settlement(stub_outcome(&policy, &summary))
            .unwrap();

        let result = policy.begin_monitoring(summary_with(5, 5));
        assert!(matches!(
            result,
            Err(PolicyError::InvalidStateTransition { .. })
        ));
    }

    #[test]
    fn test_failed_transition_leaves_state_unchanged() {
        let mut policy = create_test_policy();
        let before_version = policy.version();

        let _ = policy.begin_settlement();

        assert!(policy.is_pending());
        assert_eq!(policy.version(), before_version);
    }

    #[test]
    fn test_no_payout_outcome_is_stored_immutably() {
        let mut policy = create_test_policy();
        let summary = summary_with(1, 6);

        policy.begin_monitoring(summary.clone()).unwrap();
        policy.begin_settlement().unwrap();
        policy
            .complete_settlement(stub_outcome(&policy, &summary))
            .unwrap();

        let outcome = policy.outcome().unwrap();
        assert!(!outcome.condition_met);
        assert!(outcome.payout_amount.is_zero());
    }
}

mod events {
    use super::*;

    #[test]
    fn test_lifecycle_emits_ordered_events() {
        let mut policy = create_test_policy();
        let summary = summary_with(2, 7);

        policy.begin_monitoring(summary.clone()).unwrap();
        policy.begin_settlement().unwrap();
        policy
            .complete_settlement(stub_outcome(&policy, &summary))
            .unwrap();

        let events: Vec<&'static str> = policy
            .take_events()
            .iter()
            .map(|e| e.event_type())
            .collect();

        assert_eq!(
            events,
            vec![
                "PolicyCreated",
                "MonitoringStarted",
                "SettlementStarted",
                "PolicySettled",
            ]
        );
    }

    #[test]
    fn test_events_carry_policy_id() {
        let mut policy = create_test_policy();
        let id = policy.id();
        policy.begin_monitoring(summary_with(0, 8)).unwrap();

        for event in policy.take_events() {
            assert_eq!(event.policy_id(), id);
        }
    }
}

mod serialization {
    use super::*;

    #[test]
    fn test_policy_round_trips_through_json() {
        let mut policy = create_test_policy();
        policy.begin_monitoring(summary_with(2, 9)).unwrap();

        let json = serde_json::to_string(&policy).unwrap();
        let back: Policy = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id(), policy.id());
        assert_eq!(back.status(), policy.status());
        assert_eq!(
            back.weather_summary().unwrap().total_rain_days(),
            policy.weather_summary().unwrap().total_rain_days()
        );
    }

    #[test]
    fn test_status_tag_is_snake_case() {
        let policy = create_test_policy();
        let value = serde_json::to_value(&policy).unwrap();
        assert_eq!(value["status"]["type"], "pending");
    }

    #[test]
    fn test_proof_constraint_names_are_kebab_case() {
        let json = serde_json::to_string(&ConstraintName::CoveragePeriodEnded).unwrap();
        assert_eq!(json, "\"coverage-period-ended\"");
    }
}
