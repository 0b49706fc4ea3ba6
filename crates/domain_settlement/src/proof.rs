//! Settlement proof construction
//!
//! The proof is an ordered audit record of the checks performed at
//! settlement. Checks with a computable predicate are evaluated against the
//! actual inputs and can report `verified: false`; the two attestations
//! without a local predicate (data source authorization, recipient
//! identity) are recorded as asserted.
//!
//! The digest is a SHA-256 over the canonical JSON serialization of the
//! decision inputs, so the recorded decision is tamper-evident even though
//! it remains locally asserted rather than consensus-verified.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt::Write;
use tracing::warn;

use core_kernel::{CoveragePeriod, Money, PolicyId};
use domain_policy::{ConstraintName, Policy, PolicyTerms, ProofConstraint, SettlementProof};
use domain_weather::{DayWeather, Destination, WeatherSummary, WINDOW_END_HOUR};

/// Canonical decision inputs the digest commits to
///
/// Field order is fixed by this struct; serde_json preserves it, which is
/// what makes the serialization canonical.
#[derive(Serialize)]
struct DigestInputs<'a> {
    policy_id: PolicyId,
    period: CoveragePeriod,
    destination: &'a Destination,
    terms: &'a PolicyTerms,
    summary: &'a WeatherSummary,
    condition_met: bool,
    payout: Money,
}

/// Builds the evidence record for a settlement decision
///
/// `summary` must already be finalized against the policy threshold.
pub fn build_proof(
    policy: &Policy,
    summary: &WeatherSummary,
    condition_met: bool,
    payout: Money,
    settled_at: DateTime<Utc>,
    data_source: &str,
) -> Result<SettlementProof, serde_json::Error> {
    let digest = decision_digest(policy, summary, condition_met, payout)?;
    let settlement_tx = transaction_reference(&digest, settled_at);

    let constraints = vec![
        coverage_period_ended(policy, settled_at),
        data_source_authorized(data_source),
        location_verified(policy.destination()),
        rain_day_calculation_correct(summary),
        threshold_check(policy.terms(), summary, condition_met),
        payout_amount_correct(policy.terms(), condition_met, payout),
        recipient_verified(),
    ];

    for constraint in constraints.iter().filter(|c| !c.verified) {
        warn!(
            policy_id = %policy.id(),
            constraint = %constraint.name,
            details = %constraint.details,
            "settlement constraint failed verification"
        );
    }

    Ok(SettlementProof {
        policy_id: policy.id(),
        digest,
        constraints,
        data_source: data_source.to_string(),
        settlement_tx,
    })
}

/// SHA-256 over the canonical decision inputs, 0x-prefixed
fn decision_digest(
    policy: &Policy,
    summary: &WeatherSummary,
    condition_met: bool,
    payout: Money,
) -> Result<String, serde_json::Error> {
    let inputs = DigestInputs {
        policy_id: policy.id(),
        period: policy.period(),
        destination: policy.destination(),
        terms: policy.terms(),
        summary,
        condition_met,
        payout,
    };

    let canonical = serde_json::to_vec(&inputs)?;
    Ok(format!("0x{}", hex_encode(&Sha256::digest(&canonical))))
}

/// Opaque transaction reference: digest salted with the settlement instant
fn transaction_reference(digest: &str, settled_at: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(digest.as_bytes());
    hasher.update(settled_at.timestamp_millis().to_be_bytes());
    format!("0x{}", hex_encode(&hasher.finalize()))
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().fold(
        String::with_capacity(bytes.len() * 2),
        |mut out, byte| {
            let _ = write!(out, "{:02x}", byte);
            out
        },
    )
}

/// The coverage window closes at 8:00 PM local on the end date
fn coverage_period_ended(policy: &Policy, settled_at: DateTime<Utc>) -> ProofConstraint {
    let end = policy.period().end();
    let window_close = policy
        .destination()
        .timezone()
        .at_hour(end, WINDOW_END_HOUR as u32);

    ProofConstraint {
        name: ConstraintName::CoveragePeriodEnded,
        verified: settled_at >= window_close,
        details: format!("{} 8:00 PM local", end.format("%b %-d, %Y")),
    }
}

fn data_source_authorized(data_source: &str) -> ProofConstraint {
    ProofConstraint {
        name: ConstraintName::DataSourceAuthorized,
        verified: true,
        details: data_source.to_string(),
    }
}

fn location_verified(destination: &Destination) -> ProofConstraint {
    let in_range = (-90.0..=90.0).contains(&destination.latitude())
        && (-180.0..=180.0).contains(&destination.longitude());

    ProofConstraint {
        name: ConstraintName::LocationVerified,
        verified: in_range,
        details: destination.coordinate_label(),
    }
}

/// Recounts every verdict from its raw readings through the shared classifier
fn rain_day_calculation_correct(summary: &WeatherSummary) -> ProofConstraint {
    let recount = summary
        .days()
        .iter()
        .filter(|day| DayWeather::classify(day.date(), day.hourly_precipitation()).is_rain_day())
        .count() as u32;
    let verdicts_consistent = summary
        .days()
        .iter()
        .all(|day| DayWeather::classify(day.date(), day.hourly_precipitation()) == *day);

    let total = summary.total_rain_days();
    ProofConstraint {
        name: ConstraintName::RainDayCalculationCorrect,
        verified: verdicts_consistent && recount == total,
        details: format!(
            "{} rain day{} detected",
            total,
            if total == 1 { "" } else { "s" }
        ),
    }
}

fn threshold_check(
    terms: &PolicyTerms,
    summary: &WeatherSummary,
    condition_met: bool,
) -> ProofConstraint {
    let rain_days = summary.total_rain_days();
    let threshold = terms.rain_days_threshold();

    ProofConstraint {
        name: ConstraintName::ThresholdCheck,
        verified: condition_met == (rain_days >= threshold),
        details: if condition_met {
            format!("{} ≥ {} (condition met)", rain_days, threshold)
        } else {
            format!("{} < {} (condition not met)", rain_days, threshold)
        },
    }
}

fn payout_amount_correct(
    terms: &PolicyTerms,
    condition_met: bool,
    payout: Money,
) -> ProofConstraint {
    let expected = if condition_met {
        terms.payout()
    } else {
        Money::zero(terms.payout().currency())
    };

    ProofConstraint {
        name: ConstraintName::PayoutAmountCorrect,
        verified: payout == expected,
        details: if condition_met {
            payout.to_string()
        } else {
            "$0 (condition not met)".to_string()
        },
    }
}

fn recipient_verified() -> ProofConstraint {
    ProofConstraint {
        name: ConstraintName::RecipientVerified,
        verified: true,
        details: "Policy holder session wallet".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_encode() {
        assert_eq!(hex_encode(&[0x00, 0xff, 0x0a]), "00ff0a");
    }

    #[test]
    fn test_transaction_reference_varies_with_time() {
        let digest = "0xabc";
        let t1 = Utc::now();
        let t2 = t1 + chrono::Duration::milliseconds(1);

        assert_ne!(
            transaction_reference(digest, t1),
            transaction_reference(digest, t2)
        );
        assert_eq!(
            transaction_reference(digest, t1),
            transaction_reference(digest, t1)
        );
    }
}
