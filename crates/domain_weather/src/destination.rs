//! Covered destination value object

use core_kernel::Timezone;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::WeatherError;

/// A location a policy covers
///
/// Immutable once constructed; the timezone determines local hour
/// boundaries for the coverage window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    name: String,
    latitude: f64,
    longitude: f64,
    timezone: Timezone,
}

impl Destination {
    /// Creates a validated destination
    ///
    /// # Errors
    ///
    /// Returns `WeatherError::InvalidDestination` for an empty name or
    /// coordinates outside the WGS84 range.
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        timezone: Timezone,
    ) -> Result<Self, WeatherError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(WeatherError::InvalidDestination(
                "name must not be empty".to_string(),
            ));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(WeatherError::InvalidDestination(format!(
                "latitude {} outside [-90, 90]",
                latitude
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidDestination(format!(
                "longitude {} outside [-180, 180]",
                longitude
            )));
        }

        Ok(Self {
            name,
            latitude,
            longitude,
            timezone,
        })
    }

    /// Returns the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the latitude in decimal degrees
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in decimal degrees
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns the destination timezone
    pub fn timezone(&self) -> Timezone {
        self.timezone
    }

    /// Hemisphere-aware coordinate label, e.g. "48.8566°N, 2.3522°E"
    pub fn coordinate_label(&self) -> String {
        let lat_hemisphere = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let lng_hemisphere = if self.longitude >= 0.0 { 'E' } else { 'W' };
        format!(
            "{:.4}°{}, {:.4}°{}",
            self.latitude.abs(),
            lat_hemisphere,
            self.longitude.abs(),
            lng_hemisphere
        )
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.coordinate_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_destination() {
        let destination = Destination::new(
            "Paris",
            48.8566,
            2.3522,
            Timezone::new(chrono_tz::Europe::Paris),
        )
        .unwrap();

        assert_eq!(destination.name(), "Paris");
        assert_eq!(destination.coordinate_label(), "48.8566°N, 2.3522°E");
    }

    #[test]
    fn test_southern_western_coordinates() {
        let destination = Destination::new(
            "Lima",
            -12.0464,
            -77.0428,
            Timezone::new(chrono_tz::America::Lima),
        )
        .unwrap();

        assert_eq!(destination.coordinate_label(), "12.0464°S, 77.0428°W");
    }

    #[test]
    fn test_rejects_empty_name() {
        let result = Destination::new("  ", 0.0, 0.0, Timezone::default());
        assert!(matches!(result, Err(WeatherError::InvalidDestination(_))));
    }

    #[test]
    fn test_rejects_out_of_range_coordinates() {
        assert!(Destination::new("X", 91.0, 0.0, Timezone::default()).is_err());
        assert!(Destination::new("X", 0.0, -181.0, Timezone::default()).is_err());
    }
}
