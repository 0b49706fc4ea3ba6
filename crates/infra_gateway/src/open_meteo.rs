//! Open-Meteo archive adapter
//!
//! Live implementation of the `WeatherProvider` port against the
//! Open-Meteo historical archive. The adapter fetches hourly precipitation
//! for the coverage window, regroups the timestamp-keyed series into
//! per-day 24-slot readings, and aggregates them through the domain
//! classifier - the same path synthetic data takes.
//!
//! # Error Handling
//!
//! Request errors translate to `PortError` variants:
//! - timeouts -> `PortError::Timeout`
//! - connection failures -> `PortError::Connection`
//! - HTTP error statuses -> `PortError::ServiceUnavailable`
//! - malformed payloads -> `PortError::Transformation`
//!
//! All of these are fetch failures only; the caller's lifecycle state is
//! never advanced on failure.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::Deserialize;
use tracing::{debug, instrument};

use core_kernel::{CoveragePeriod, DomainPort, PortError};
use domain_weather::{Destination, WeatherProvider, WeatherSummary, HOURS_PER_DAY};

use crate::config::GatewayConfig;

/// Data-source identifier recorded in settlement proofs
pub const OPEN_METEO_SOURCE: &str = "Open-Meteo Historical API (NOAA, ECMWF)";

/// Raw archive response
#[derive(Debug, Deserialize)]
pub struct OpenMeteoResponse {
    pub hourly: HourlySeries,
}

/// Hourly series keyed by ISO timestamp
///
/// The archive reports precipitation as nullable; a null reading means no
/// precipitation was recorded for that hour.
#[derive(Debug, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    pub precipitation: Vec<Option<f64>>,
}

/// Live Open-Meteo implementation of the WeatherProvider port
#[derive(Debug, Clone)]
pub struct OpenMeteoAdapter {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl OpenMeteoAdapter {
    /// Creates the adapter from gateway configuration
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.provider_base_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

impl DomainPort for OpenMeteoAdapter {}

#[async_trait]
impl WeatherProvider for OpenMeteoAdapter {
    #[instrument(skip_all, fields(destination = %destination.name(), %period))]
    async fn fetch_summary(
        &self,
        destination: &Destination,
        period: CoveragePeriod,
    ) -> Result<WeatherSummary, PortError> {
        let response = self
            .client
            .get(&self.base_url)
            .timeout(self.timeout)
            .query(&[
                ("latitude", destination.latitude().to_string()),
                ("longitude", destination.longitude().to_string()),
                ("start_date", period.start().to_string()),
                ("end_date", period.end().to_string()),
                ("hourly", "precipitation".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(|error| translate_request_error(error, self.timeout))?;

        let response = response.error_for_status().map_err(|error| {
            PortError::ServiceUnavailable {
                service: format!(
                    "open-meteo ({})",
                    error
                        .status()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "unknown status".to_string())
                ),
            }
        })?;

        let body: OpenMeteoResponse = response.json().await.map_err(|error| {
            PortError::transformation(format!("malformed archive response: {}", error))
        })?;

        let readings = regroup_hourly_series(&body)?;
        debug!(days = readings.len(), "parsed archive hourly series");

        Ok(WeatherSummary::aggregate(period, &readings))
    }

    fn source_id(&self) -> &str {
        OPEN_METEO_SOURCE
    }
}

/// Regroups the flat timestamp series into per-day 24-slot readings
///
/// Hours the archive does not report stay at 0.0mm; the aggregator fills
/// wholly absent days the same way.
pub fn regroup_hourly_series(
    response: &OpenMeteoResponse,
) -> Result<BTreeMap<NaiveDate, Vec<f64>>, PortError> {
    let mut readings_by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();

    for (timestamp, value) in response
        .hourly
        .time
        .iter()
        .zip(response.hourly.precipitation.iter())
    {
        let parsed = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M")
            .map_err(|error| {
                PortError::transformation(format!(
                    "unparseable archive timestamp {:?}: {}",
                    timestamp, error
                ))
            })?;

        let slots = readings_by_date
            .entry(parsed.date())
            .or_insert_with(|| vec![0.0; HOURS_PER_DAY]);
        slots[parsed.hour() as usize] = value.unwrap_or(0.0);
    }

    Ok(readings_by_date)
}

fn translate_request_error(error: reqwest::Error, timeout: Duration) -> PortError {
    if error.is_timeout() {
        PortError::Timeout {
            operation: "fetch_summary".to_string(),
            duration_ms: timeout.as_millis() as u64,
        }
    } else if error.is_connect() {
        PortError::Connection {
            message: error.to_string(),
            source: Some(Box::new(error)),
        }
    } else {
        PortError::ServiceUnavailable {
            service: "open-meteo".to_string(),
        }
    }
}
