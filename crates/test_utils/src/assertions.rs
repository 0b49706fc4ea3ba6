//! Custom Test Assertions
//!
//! Specialized assertion helpers for domain types that give more meaningful
//! error messages than standard assertions.

use chrono::Duration;
use core_kernel::CoveragePeriod;
use domain_policy::{ConstraintName, SettlementProof};
use domain_weather::{DayWeather, WeatherSummary};

/// Asserts that a summary covers the period gaplessly, in order
///
/// # Panics
///
/// Panics with the offending dates if a day is missing, duplicated, or out
/// of order.
pub fn assert_summary_covers(summary: &WeatherSummary, period: &CoveragePeriod) {
    assert_eq!(
        summary.days().len() as u32,
        period.day_count(),
        "summary has {} days, period {} needs {}",
        summary.days().len(),
        period,
        period.day_count()
    );

    for (day, expected_date) in summary.days().iter().zip(period.iter_days()) {
        assert_eq!(
            day.date(),
            expected_date,
            "expected {} at this position, found {}",
            expected_date,
            day.date()
        );
    }

    for pair in summary.days().windows(2) {
        assert_eq!(
            pair[1].date() - pair[0].date(),
            Duration::days(1),
            "gap between {} and {}",
            pair[0].date(),
            pair[1].date()
        );
    }
}

/// Asserts that every derived field agrees with its readings
///
/// # Panics
///
/// Panics on the first day whose verdict differs from a fresh
/// classification of its own readings.
pub fn assert_verdicts_consistent(summary: &WeatherSummary) {
    for day in summary.days() {
        let reclassified = DayWeather::classify(day.date(), day.hourly_precipitation());
        assert_eq!(
            &reclassified, day,
            "derived fields drifted from readings on {}",
            day.date()
        );
    }

    let recount = summary.days().iter().filter(|d| d.is_rain_day()).count() as u32;
    assert_eq!(
        summary.total_rain_days(),
        recount,
        "total_rain_days {} disagrees with verdict count {}",
        summary.total_rain_days(),
        recount
    );
}

/// Asserts that a proof records the contractual constraint set in order
///
/// # Panics
///
/// Panics if the set or order differs from the settlement contract.
pub fn assert_constraint_contract(proof: &SettlementProof) {
    assert_eq!(
        proof.constraint_names(),
        ConstraintName::CONTRACT_ORDER.to_vec(),
        "proof constraints deviate from the contractual set/order"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{PeriodFixtures, WeatherFixtures};

    #[test]
    fn test_dry_summary_passes_assertions() {
        let period = PeriodFixtures::june_week();
        let summary = WeatherFixtures::dry_summary(period);

        assert_summary_covers(&summary, &period);
        assert_verdicts_consistent(&summary);
    }

    #[test]
    #[should_panic(expected = "summary has 7 days")]
    fn test_coverage_assertion_catches_wrong_period() {
        let summary = WeatherFixtures::dry_summary(PeriodFixtures::june_week());
        assert_summary_covers(&summary, &PeriodFixtures::june_fortnight());
    }
}
