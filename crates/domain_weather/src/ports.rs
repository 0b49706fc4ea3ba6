//! Weather domain ports

use async_trait::async_trait;
use core_kernel::{CoveragePeriod, DomainPort, PortError};

use crate::destination::Destination;
use crate::summary::WeatherSummary;

/// Port for per-day precipitation sources
///
/// Implemented by the live archive adapter and by the synthetic provider;
/// the lifecycle layer treats them interchangeably. Fetching is the only
/// suspending operation in the system - a failed fetch produces no summary
/// and leaves the caller's lifecycle state untouched.
#[async_trait]
pub trait WeatherProvider: DomainPort {
    /// Fetches a summary covering exactly the given period
    async fn fetch_summary(
        &self,
        destination: &Destination,
        period: CoveragePeriod,
    ) -> Result<WeatherSummary, PortError>;

    /// Identifier of the underlying data source, recorded in settlement proofs
    fn source_id(&self) -> &str;
}
