//! Daily rain-day classification
//!
//! `DayWeather` is the atomic evaluation unit: one calendar day, 24 hourly
//! precipitation readings, and the derived qualifying-hour count and
//! rain-day verdict. The derived fields are projections of the readings -
//! they cannot be constructed independently, and deserialization recomputes
//! them, so display and settlement can never disagree on a verdict.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Hourly readings per calendar day
pub const HOURS_PER_DAY: usize = 24;

/// First hour (inclusive) of the qualifying window, local time
pub const WINDOW_START_HOUR: usize = 8;

/// End hour (exclusive) of the qualifying window, local time
pub const WINDOW_END_HOUR: usize = 20;

/// Minimum hourly precipitation for a qualifying hour, in millimeters
pub const QUALIFYING_RATE_MM: f64 = 1.0;

/// Qualifying hours required for a rain-day verdict
pub const RAIN_DAY_HOURS: u32 = 2;

/// One calendar day's evaluation result
///
/// Invariants:
/// - `qualifying_hours == count(readings[8..20) where reading >= 1.0)`
/// - `is_rain_day == (qualifying_hours >= 2)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DayWeatherWire")]
pub struct DayWeather {
    date: NaiveDate,
    hourly_precipitation: [f64; HOURS_PER_DAY],
    qualifying_hours: u32,
    is_rain_day: bool,
}

impl DayWeather {
    /// Classifies a day's hourly readings
    ///
    /// Readings are indexed by hour-of-day (index 0 = midnight). Missing
    /// trailing hours default to 0.0mm - gaps in the source feed mean "no
    /// precipitation recorded", not an error. Readings beyond 24 hours are
    /// ignored.
    pub fn classify(date: NaiveDate, readings: &[f64]) -> Self {
        let mut hourly = [0.0_f64; HOURS_PER_DAY];
        for (hour, value) in readings.iter().take(HOURS_PER_DAY).enumerate() {
            hourly[hour] = *value;
        }

        let qualifying_hours = hourly[WINDOW_START_HOUR..WINDOW_END_HOUR]
            .iter()
            .filter(|mm| **mm >= QUALIFYING_RATE_MM)
            .count() as u32;

        Self {
            date,
            hourly_precipitation: hourly,
            qualifying_hours,
            is_rain_day: qualifying_hours >= RAIN_DAY_HOURS,
        }
    }

    /// A day with no precipitation recorded at any hour
    ///
    /// Used when the provider returned no data for a requested date.
    pub fn dry(date: NaiveDate) -> Self {
        Self::classify(date, &[])
    }

    /// Returns the calendar date
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the 24 hourly readings in millimeters
    pub fn hourly_precipitation(&self) -> &[f64; HOURS_PER_DAY] {
        &self.hourly_precipitation
    }

    /// Returns the count of qualifying hours within the 8AM-8PM window
    pub fn qualifying_hours(&self) -> u32 {
        self.qualifying_hours
    }

    /// Returns the rain-day verdict
    pub fn is_rain_day(&self) -> bool {
        self.is_rain_day
    }

    /// Total precipitation over the qualifying window, in millimeters
    pub fn window_precipitation(&self) -> f64 {
        self.hourly_precipitation[WINDOW_START_HOUR..WINDOW_END_HOUR]
            .iter()
            .sum()
    }

    /// Display condition for monitoring views
    pub fn sky(&self) -> SkyCondition {
        if self.is_rain_day {
            SkyCondition::Rain
        } else if self.window_precipitation() > 0.0 {
            SkyCondition::Cloud
        } else {
            SkyCondition::Sun
        }
    }
}

/// Wire shape for DayWeather
///
/// Carries only the raw readings; the derived fields are recomputed through
/// `classify` on the way in, so a hand-edited record cannot smuggle in a
/// verdict that disagrees with its readings.
#[derive(Deserialize)]
struct DayWeatherWire {
    date: NaiveDate,
    hourly_precipitation: Vec<f64>,
}

impl From<DayWeatherWire> for DayWeather {
    fn from(wire: DayWeatherWire) -> Self {
        DayWeather::classify(wire.date, &wire.hourly_precipitation)
    }
}

/// Coarse display condition for a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkyCondition {
    Sun,
    Cloud,
    Rain,
}
