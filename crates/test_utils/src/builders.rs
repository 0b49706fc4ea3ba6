//! Test Data Builders
//!
//! Builder for constructing policies in a chosen lifecycle state with
//! sensible defaults, so tests specify only what they care about.

use core_kernel::CoveragePeriod;
use domain_policy::{Policy, PolicyBuilder, PolicyTerms};
use domain_weather::{Destination, SyntheticWeatherGenerator, WeatherSummary};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::fixtures::{DestinationFixtures, PeriodFixtures};

/// Builder for test policies
///
/// Defaults to the standard product covering Paris for the June week; the
/// state-targeting constructors advance the lifecycle with a deterministic
/// synthetic summary.
pub struct TestPolicyBuilder {
    destination: Destination,
    period: CoveragePeriod,
    terms: PolicyTerms,
    rain_days: usize,
    seed: u64,
}

impl Default for TestPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPolicyBuilder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        Self {
            destination: DestinationFixtures::paris(),
            period: PeriodFixtures::june_week(),
            terms: PolicyTerms::standard(),
            rain_days: 2,
            seed: 42,
        }
    }

    /// Sets the covered destination
    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destination = destination;
        self
    }

    /// Sets the coverage period
    pub fn with_period(mut self, period: CoveragePeriod) -> Self {
        self.period = period;
        self
    }

    /// Sets the contractual terms
    pub fn with_terms(mut self, terms: PolicyTerms) -> Self {
        self.terms = terms;
        self
    }

    /// Sets the synthesized rain-day count for monitoring/settling states
    pub fn with_rain_days(mut self, rain_days: usize) -> Self {
        self.rain_days = rain_days;
        self
    }

    /// Sets the RNG seed for the synthesized summary
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// The summary the monitoring/settling states are built with
    pub fn summary(&self) -> WeatherSummary {
        let mut rng = StdRng::seed_from_u64(self.seed);
        SyntheticWeatherGenerator::new().generate(self.period, Some(self.rain_days), &mut rng)
    }

    /// Builds a pending policy
    pub fn pending(self) -> Policy {
        PolicyBuilder::new()
            .destination(self.destination.clone())
            .period(self.period)
            .terms(self.terms.clone())
            .build()
            .expect("test builder produces a valid policy")
    }

    /// Builds a monitoring policy with a synthetic summary attached
    pub fn monitoring(self) -> Policy {
        let summary = self.summary();
        let mut policy = self.pending();
        policy
            .begin_monitoring(summary)
            .expect("pending policy accepts monitoring");
        policy
    }

    /// Builds a policy frozen in the settling state
    pub fn settling(self) -> Policy {
        let mut policy = self.monitoring();
        policy
            .begin_settlement()
            .expect("monitoring policy accepts settlement");
        policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let policy = TestPolicyBuilder::new().pending();
        assert!(policy.is_pending());
        assert_eq!(policy.destination().name(), "Paris");
        assert_eq!(policy.terms(), &PolicyTerms::standard());
    }

    #[test]
    fn test_monitoring_state_carries_requested_rain_days() {
        let policy = TestPolicyBuilder::new().with_rain_days(3).monitoring();
        assert!(policy.is_monitoring());
        assert_eq!(policy.weather_summary().unwrap().total_rain_days(), 3);
    }

    #[test]
    fn test_settling_state_freezes_summary() {
        let policy = TestPolicyBuilder::new().with_rain_days(1).settling();
        assert!(policy.is_settling());
        assert_eq!(policy.weather_summary().unwrap().total_rain_days(), 1);
    }

    #[test]
    fn test_same_seed_same_summary() {
        let a = TestPolicyBuilder::new().with_seed(7).summary();
        let b = TestPolicyBuilder::new().with_seed(7).summary();
        assert_eq!(a, b);
    }
}
