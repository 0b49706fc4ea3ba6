//! Weather Domain - Rain-day classification and aggregation
//!
//! This crate turns raw hourly precipitation into the per-day verdicts and
//! period summaries the settlement engine decides on:
//! - `DayWeather`: one day's readings plus its derived rain-day verdict
//! - `WeatherSummary`: a gapless, ordered window of days with rain-day totals
//! - `SyntheticWeatherGenerator`: provider-free summaries for demos and tests
//! - `WeatherProvider`: the port live and synthetic data sources implement
//!
//! The classification rule (>= 1.0mm for >= 2 hours between 8AM and 8PM
//! local) is a fixed business rule; there is exactly one classification
//! function and every data path goes through it.

pub mod destination;
pub mod observation;
pub mod summary;
pub mod synthetic;
pub mod ports;
pub mod error;

pub use destination::Destination;
pub use observation::{DayWeather, SkyCondition, HOURS_PER_DAY, QUALIFYING_RATE_MM, RAIN_DAY_HOURS, WINDOW_END_HOUR, WINDOW_START_HOUR};
pub use summary::WeatherSummary;
pub use synthetic::SyntheticWeatherGenerator;
pub use ports::WeatherProvider;
pub use error::WeatherError;
