//! Weather domain errors

use thiserror::Error;

/// Errors that can occur in the weather domain
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Destination failed validation
    #[error("Invalid destination: {0}")]
    InvalidDestination(String),
}
