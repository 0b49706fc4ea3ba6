//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the cover
//! engine. These fixtures are deterministic and predictable for unit tests.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use core_kernel::{CoveragePeriod, Money, Timezone};
use domain_policy::PolicyTerms;
use domain_weather::{Destination, WeatherSummary, HOURS_PER_DAY};
use rust_decimal_macros::dec;

/// Fixture for destination test data
pub struct DestinationFixtures;

impl DestinationFixtures {
    /// Paris, the standard covered city
    pub fn paris() -> Destination {
        Destination::new(
            "Paris",
            48.8566,
            2.3522,
            Timezone::new(chrono_tz::Europe::Paris),
        )
        .expect("valid fixture destination")
    }

    /// Kyoto, for a non-European timezone
    pub fn kyoto() -> Destination {
        Destination::new(
            "Kyoto",
            35.0116,
            135.7681,
            Timezone::new(chrono_tz::Asia::Tokyo),
        )
        .expect("valid fixture destination")
    }

    /// Bali, for southern-hemisphere coordinates
    pub fn bali() -> Destination {
        Destination::new(
            "Bali",
            -8.4095,
            115.1889,
            Timezone::new(chrono_tz::Asia::Makassar),
        )
        .expect("valid fixture destination")
    }
}

/// Fixture for coverage period test data
pub struct PeriodFixtures;

impl PeriodFixtures {
    /// Standard one-week cover (Jun 1-7, 2024)
    pub fn june_week() -> CoveragePeriod {
        CoveragePeriod::new(Self::date(2024, 6, 1), Self::date(2024, 6, 7))
            .expect("valid fixture period")
    }

    /// Single-day cover (Jul 1, 2024)
    pub fn single_july_day() -> CoveragePeriod {
        CoveragePeriod::single_day(Self::date(2024, 7, 1))
    }

    /// Two-week cover (Jun 1-14, 2024)
    pub fn june_fortnight() -> CoveragePeriod {
        CoveragePeriod::new(Self::date(2024, 6, 1), Self::date(2024, 6, 14))
            .expect("valid fixture period")
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
    }
}

/// Fixture for contractual terms
pub struct TermsFixtures;

impl TermsFixtures {
    /// The standard product: threshold 2, $25 premium, $500 payout
    pub fn standard() -> PolicyTerms {
        PolicyTerms::standard()
    }

    /// A stricter product for threshold-boundary tests
    pub fn high_threshold() -> PolicyTerms {
        PolicyTerms::new(5, Money::usdc(dec!(40)), Money::usdc(dec!(1500)))
            .expect("valid fixture terms")
    }
}

/// Fixture for weather test data
pub struct WeatherFixtures;

impl WeatherFixtures {
    /// A day's readings with two qualifying hours mid-window
    pub fn rain_hours() -> Vec<f64> {
        let mut readings = vec![0.0; HOURS_PER_DAY];
        readings[9] = 2.0;
        readings[10] = 3.0;
        readings
    }

    /// A day's readings with sub-threshold drizzle only
    pub fn drizzle_hours() -> Vec<f64> {
        let mut readings = vec![0.0; HOURS_PER_DAY];
        readings[14] = 0.5;
        readings
    }

    /// Summary over the period with rain on exactly the given dates
    pub fn summary_with_rain_on(
        period: CoveragePeriod,
        rain_dates: &[NaiveDate],
    ) -> WeatherSummary {
        let mut readings = BTreeMap::new();
        for date in rain_dates {
            readings.insert(*date, Self::rain_hours());
        }
        WeatherSummary::aggregate(period, &readings)
    }

    /// Fully dry summary over the period
    pub fn dry_summary(period: CoveragePeriod) -> WeatherSummary {
        WeatherSummary::aggregate(period, &BTreeMap::new())
    }
}
