//! Policy Domain - Parametric cover lifecycle
//!
//! The `Policy` aggregate owns a single cover from purchase to settlement.
//! Its status is a state machine - `pending`, `monitoring`, `settling`,
//! `settled` - and every mutation goes through a lifecycle transition that
//! either succeeds atomically or leaves the aggregate untouched.

pub mod aggregate;
pub mod terms;
pub mod events;
pub mod outcome;
pub mod ports;
pub mod error;

pub use aggregate::{Policy, PolicyBuilder, PolicyStatus};
pub use terms::PolicyTerms;
pub use events::PolicyEvent;
pub use outcome::{ConstraintName, ProofConstraint, SettlementOutcome, SettlementProof};
pub use ports::{PolicyStore, SessionKey};
pub use error::PolicyError;
