//! Period aggregation of daily verdicts
//!
//! A `WeatherSummary` covers every calendar date of a coverage period, in
//! order, with no gaps and no duplicates. The aggregator never decides the
//! cover condition: `condition_met` stays false until the settlement engine
//! finalizes the summary against the policy threshold, so the same summary
//! serves monitoring display and final settlement.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use core_kernel::CoveragePeriod;
use serde::{Deserialize, Serialize};

use crate::observation::DayWeather;

/// An ordered, gapless window of daily verdicts with rain-day totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WeatherSummaryWire")]
pub struct WeatherSummary {
    days: Vec<DayWeather>,
    total_rain_days: u32,
    condition_met: bool,
}

impl WeatherSummary {
    /// Aggregates per-day readings over a coverage period
    ///
    /// Produces exactly one `DayWeather` per calendar date of the period, in
    /// ascending order. Dates the provider did not return are classified as
    /// dry days rather than failing, so a summary always covers the full
    /// requested range.
    pub fn aggregate(
        period: CoveragePeriod,
        readings_by_date: &BTreeMap<NaiveDate, Vec<f64>>,
    ) -> Self {
        let days: Vec<DayWeather> = period
            .iter_days()
            .map(|date| match readings_by_date.get(&date) {
                Some(readings) => DayWeather::classify(date, readings),
                None => DayWeather::dry(date),
            })
            .collect();

        Self::from_classified_days(days)
    }

    fn from_classified_days(days: Vec<DayWeather>) -> Self {
        let total_rain_days = days.iter().filter(|day| day.is_rain_day()).count() as u32;
        Self {
            days,
            total_rain_days,
            condition_met: false,
        }
    }

    /// Returns the daily verdicts in ascending date order
    pub fn days(&self) -> &[DayWeather] {
        &self.days
    }

    /// Returns the number of rain days observed
    pub fn total_rain_days(&self) -> u32 {
        self.total_rain_days
    }

    /// Returns whether the cover condition has been finalized as met
    ///
    /// Always false on a freshly aggregated summary; only the settlement
    /// engine finalizes this against a policy threshold.
    pub fn condition_met(&self) -> bool {
        self.condition_met
    }

    /// Returns the period this summary covers
    pub fn period(&self) -> Option<CoveragePeriod> {
        let first = self.days.first()?.date();
        let last = self.days.last()?.date();
        CoveragePeriod::new(first, last).ok()
    }

    /// Returns true if the summary covers exactly the given period
    pub fn covers(&self, period: &CoveragePeriod) -> bool {
        self.period().is_some_and(|own| own == *period)
            && self.days.len() == period.day_count() as usize
    }

    /// Finalizes the cover condition against a contractual threshold
    ///
    /// Settlement-engine use only; aggregation has no knowledge of terms.
    pub fn finalized(&self, rain_days_threshold: u32) -> Self {
        Self {
            condition_met: self.total_rain_days >= rain_days_threshold,
            ..self.clone()
        }
    }
}

/// Wire shape for WeatherSummary
///
/// `total_rain_days` is recomputed from the day verdicts on the way in;
/// `condition_met` is preserved because it depends on a threshold the
/// summary does not carry.
#[derive(Deserialize)]
struct WeatherSummaryWire {
    days: Vec<DayWeather>,
    #[serde(default)]
    condition_met: bool,
}

impl From<WeatherSummaryWire> for WeatherSummary {
    fn from(wire: WeatherSummaryWire) -> Self {
        let mut summary = WeatherSummary::from_classified_days(wire.days);
        summary.condition_met = wire.condition_met;
        summary
    }
}
