//! Infrastructure Gateway - Adapters behind the domain ports
//!
//! This crate provides the concrete implementations the engine is wired
//! with:
//! - `OpenMeteoAdapter`: live precipitation from the Open-Meteo archive API
//! - `SyntheticWeatherProvider`: provider-free summaries for demos/tests
//! - `InMemoryPolicyStore`: session-keyed policy persistence
//!
//! Configuration comes from the environment (`GATEWAY_*` variables); the
//! simulation section switches the engine onto the synthetic provider
//! without touching any domain code.

pub mod config;
pub mod open_meteo;
pub mod simulation;
pub mod store;

use std::sync::Arc;

use domain_weather::WeatherProvider;

pub use crate::config::{GatewayConfig, SimulatedOutcome, SimulationConfig};
pub use crate::open_meteo::{OpenMeteoAdapter, OPEN_METEO_SOURCE};
pub use crate::simulation::{SyntheticWeatherProvider, SYNTHETIC_SOURCE};
pub use crate::store::InMemoryPolicyStore;

/// Selects the weather provider the configuration asks for
///
/// The synthetic provider honors the simulation section's forced rain-day
/// count or forced outcome (resolved against the policy threshold).
pub fn weather_provider(config: &GatewayConfig, threshold: u32) -> Arc<dyn WeatherProvider> {
    if config.simulation.enabled {
        Arc::new(SyntheticWeatherProvider::from_config(
            &config.simulation,
            threshold,
        ))
    } else {
        Arc::new(OpenMeteoAdapter::new(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_selection_follows_simulation_flag() {
        let mut config = GatewayConfig::default();
        assert_eq!(
            weather_provider(&config, 2).source_id(),
            OPEN_METEO_SOURCE
        );

        config.simulation.enabled = true;
        assert_eq!(weather_provider(&config, 2).source_id(), SYNTHETIC_SOURCE);
    }
}
