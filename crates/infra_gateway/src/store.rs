//! In-memory policy store
//!
//! Session-keyed implementation of the `PolicyStore` port. The surrounding
//! application can swap in a durable store without touching domain code;
//! the aggregate is plain serde data.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{DomainPort, PortError};
use domain_policy::{Policy, PolicyStore, SessionKey};

/// Map-backed policy store
///
/// One entry per session key; saving replaces the previous aggregate
/// atomically. Each policy is exclusively owned by its session - there is
/// no cross-session shared state.
#[derive(Debug, Default)]
pub struct InMemoryPolicyStore {
    policies: RwLock<HashMap<SessionKey, Policy>>,
}

impl InMemoryPolicyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored policies
    pub async fn len(&self) -> usize {
        self.policies.read().await.len()
    }

    /// Returns true if no policies are stored
    pub async fn is_empty(&self) -> bool {
        self.policies.read().await.is_empty()
    }
}

impl DomainPort for InMemoryPolicyStore {}

#[async_trait]
impl PolicyStore for InMemoryPolicyStore {
    async fn load(&self, session: &SessionKey) -> Result<Option<Policy>, PortError> {
        Ok(self.policies.read().await.get(session).cloned())
    }

    async fn save(&self, session: &SessionKey, policy: &Policy) -> Result<(), PortError> {
        debug!(%session, policy_id = %policy.id(), "saving policy");
        self.policies
            .write()
            .await
            .insert(session.clone(), policy.clone());
        Ok(())
    }

    async fn delete(&self, session: &SessionKey) -> Result<(), PortError> {
        debug!(%session, "deleting policy");
        self.policies.write().await.remove(session);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::{CoveragePeriod, Timezone};
    use domain_policy::PolicyBuilder;
    use domain_weather::Destination;

    fn test_policy() -> Policy {
        let destination =
            Destination::new("Bali", -8.4095, 115.1889, Timezone::default()).unwrap();
        let period = CoveragePeriod::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 7).unwrap(),
        )
        .unwrap();

        PolicyBuilder::new()
            .destination(destination)
            .period(period)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let store = InMemoryPolicyStore::new();
        let session = SessionKey::new("session-1");
        let policy = test_policy();

        store.save(&session, &policy).await.unwrap();
        let loaded = store.load(&session).await.unwrap().unwrap();

        assert_eq!(loaded.id(), policy.id());
        assert_eq!(loaded.status(), policy.status());
    }

    #[tokio::test]
    async fn test_load_missing_session_is_none() {
        let store = InMemoryPolicyStore::new();
        let loaded = store.load(&SessionKey::new("nobody")).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = InMemoryPolicyStore::new();
        let policy_a = test_policy();
        let policy_b = test_policy();

        store.save(&SessionKey::new("a"), &policy_a).await.unwrap();
        store.save(&SessionKey::new("b"), &policy_b).await.unwrap();

        assert_eq!(store.len().await, 2);
        let loaded_a = store.load(&SessionKey::new("a")).await.unwrap().unwrap();
        assert_eq!(loaded_a.id(), policy_a.id());
    }

    #[tokio::test]
    async fn test_delete_discards_the_aggregate() {
        let store = InMemoryPolicyStore::new();
        let session = SessionKey::new("session-1");

        store.save(&session, &test_policy()).await.unwrap();
        store.delete(&session).await.unwrap();

        assert!(store.load(&session).await.unwrap().is_none());
        assert!(store.is_empty().await);

        // Deleting an absent key is not an error
        store.delete(&session).await.unwrap();
    }

    #[tokio::test]
    async fn test_save_replaces_previous_policy() {
        let store = InMemoryPolicyStore::new();
        let session = SessionKey::new("session-1");
        let first = test_policy();
        let second = test_policy();

        store.save(&session, &first).await.unwrap();
        store.save(&session, &second).await.unwrap();

        let loaded = store.load(&session).await.unwrap().unwrap();
        assert_eq!(loaded.id(), second.id());
        assert_eq!(store.len().await, 1);
    }
}
