//! Policy domain ports
//!
//! Persistence is a generic session-keyed store so the surrounding
//! application can survive reloads; the aggregate is plain serde data and
//! the store never participates in lifecycle decisions. Concurrent
//! sessions are simply different keys - there is no global "current
//! policy" slot.

use async_trait::async_trait;
use core_kernel::{DomainPort, PortError};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::aggregate::Policy;

/// Opaque key identifying a controlling session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(String);

impl SessionKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

/// Port for policy persistence keyed by session
///
/// `reset` semantics live here: discarding a policy is `delete` followed by
/// saving a freshly built aggregate under the same key - a settled outcome
/// is never mutated in place.
#[async_trait]
pub trait PolicyStore: DomainPort {
    /// Loads the session's policy, if one exists
    async fn load(&self, session: &SessionKey) -> Result<Option<Policy>, PortError>;

    /// Saves the session's policy, replacing any previous value
    async fn save(&self, session: &SessionKey, policy: &Policy) -> Result<(), PortError>;

    /// Discards the session's policy
    async fn delete(&self, session: &SessionKey) -> Result<(), PortError>;
}
