//! Core Kernel - Foundational types and utilities for the cover engine
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Temporal types for coverage windows and destination timezones
//! - Common identifiers and value objects
//! - Port infrastructure for pluggable adapters

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod error;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{CoveragePeriod, Timezone, TemporalError};
pub use identifiers::{PolicyId, SettlementId, TransactionId};
pub use error::CoreError;
pub use ports::{DomainPort, PortError};
