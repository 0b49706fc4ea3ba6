//! Gateway configuration

use serde::Deserialize;

/// Gateway configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base URL of the Open-Meteo archive API
    pub provider_base_url: String,
    /// Provider request timeout in seconds
    pub timeout_secs: u64,
    /// Simulation settings for provider-free operation
    pub simulation: SimulationConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            provider_base_url: "https://archive-api.open-meteo.com/v1/archive".to_string(),
            timeout_secs: 30,
            simulation: SimulationConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from environment
    ///
    /// Variables use the `GATEWAY_` prefix with `__` separating nested
    /// sections, e.g. `GATEWAY_SIMULATION__ENABLED=true`.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("GATEWAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

/// Simulation settings
///
/// When enabled, the engine runs on the synthetic provider. The rain-day
/// count can be pinned exactly, or an outcome can be forced and the count
/// is resolved against the policy threshold.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Use the synthetic provider instead of the live archive
    pub enabled: bool,
    /// Exact number of rain days to synthesize
    pub rain_days: Option<u32>,
    /// Force the settlement outcome instead of pinning a count
    pub outcome: Option<SimulatedOutcome>,
}

impl SimulationConfig {
    /// Resolves the forced rain-day count, if any
    ///
    /// An explicit `rain_days` wins over a forced outcome; a forced outcome
    /// maps to the smallest count meeting (or just missing) the threshold.
    pub fn forced_rain_days(&self, threshold: u32) -> Option<usize> {
        if let Some(count) = self.rain_days {
            return Some(count as usize);
        }
        match self.outcome {
            Some(SimulatedOutcome::Payout) => Some(threshold as usize),
            Some(SimulatedOutcome::NoPayout) => Some(threshold.saturating_sub(1) as usize),
            None => None,
        }
    }
}

/// A forced settlement outcome for demos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimulatedOutcome {
    Payout,
    NoPayout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert!(config.provider_base_url.contains("archive-api.open-meteo.com"));
        assert_eq!(config.timeout_secs, 30);
        assert!(!config.simulation.enabled);
    }

    #[test]
    fn test_explicit_rain_days_wins() {
        let simulation = SimulationConfig {
            enabled: true,
            rain_days: Some(4),
            outcome: Some(SimulatedOutcome::NoPayout),
        };
        assert_eq!(simulation.forced_rain_days(2), Some(4));
    }

    #[test]
    fn test_forced_outcome_resolves_against_threshold() {
        let payout = SimulationConfig {
            enabled: true,
            rain_days: None,
            outcome: Some(SimulatedOutcome::Payout),
        };
        assert_eq!(payout.forced_rain_days(3), Some(3));

        let no_payout = SimulationConfig {
            outcome: Some(SimulatedOutcome::NoPayout),
            ..payout
        };
        assert_eq!(no_payout.forced_rain_days(3), Some(2));
        assert_eq!(no_payout.forced_rain_days(1), Some(0));
    }

    #[test]
    fn test_unforced_simulation() {
        let simulation = SimulationConfig {
            enabled: true,
            ..Default::default()
        };
        assert_eq!(simulation.forced_rain_days(2), None);
    }
}
