//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data that
//! maintains domain invariants.

use chrono::{Duration, NaiveDate};
use core_kernel::CoveragePeriod;
use domain_weather::HOURS_PER_DAY;
use proptest::prelude::*;

/// Strategy for a day's hourly readings (0 to 10mm per hour)
pub fn hourly_readings_strategy() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(0.0_f64..10.0, HOURS_PER_DAY..=HOURS_PER_DAY)
}

/// Strategy for partial series as a gappy feed would deliver them
pub fn partial_readings_strategy() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(0.0_f64..10.0, 0..=HOURS_PER_DAY)
}

/// Strategy for coverage periods starting in 2024, up to two months long
pub fn coverage_period_strategy() -> impl Strategy<Value = CoveragePeriod> {
    (0i64..365, 0i64..60).prop_map(|(start_offset, extra_days)| {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")
            + Duration::days(start_offset);
        let end = start + Duration::days(extra_days);
        CoveragePeriod::new(start, end).expect("generated period is ordered")
    })
}

/// Strategy for rain-day thresholds (1 to 10)
pub fn threshold_strategy() -> impl Strategy<Value = u32> {
    1u32..=10
}

/// Strategy for a wet/dry mask over a short period
pub fn wet_mask_strategy() -> impl Strategy<Value = Vec<bool>> {
    proptest::collection::vec(any::<bool>(), 1..=31)
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_periods_are_ordered(period in coverage_period_strategy()) {
            prop_assert!(period.start() <= period.end());
            prop_assert!(period.day_count() >= 1);
        }

        #[test]
        fn generated_readings_fit_one_day(readings in hourly_readings_strategy()) {
            prop_assert_eq!(readings.len(), HOURS_PER_DAY);
            prop_assert!(readings.iter().all(|mm| *mm >= 0.0));
        }

        #[test]
        fn thresholds_are_contractual(threshold in threshold_strategy()) {
            prop_assert!(threshold >= 1);
        }

        #[test]
        fn partial_readings_classify_without_panicking(
            readings in partial_readings_strategy()
        ) {
            let day = domain_weather::DayWeather::classify(
                NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
                &readings,
            );
            prop_assert!(day.qualifying_hours() <= 12);
        }

        #[test]
        fn wet_masks_bound_the_rain_day_total(mask in wet_mask_strategy()) {
            prop_assert!((1..=31).contains(&mask.len()));
        }
    }
}
