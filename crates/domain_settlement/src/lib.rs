//! Settlement Domain - Deciding and evidencing a cover's outcome
//!
//! The `SettlementEngine` combines a policy's contractual terms with a
//! weather summary to produce the final outcome: the condition decision,
//! the payout awarded, and a `SettlementProof` evidence record whose digest
//! is content-derived from the decision inputs.
//!
//! Settlement is pure given its inputs - the same terms and summary always
//! yield the same decision, payout, and constraint set. Only the timestamp
//! and the transaction reference (salted by the timestamp) vary between
//! runs.

pub mod engine;
pub mod proof;
pub mod error;

pub use engine::SettlementEngine;
pub use error::SettlementError;
