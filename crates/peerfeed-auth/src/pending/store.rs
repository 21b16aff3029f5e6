//! Staging area for accounts awaiting email verification.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use peerfeed_cache::{keys, CacheManager};
use peerfeed_core::result::AppResult;
use peerfeed_core::traits::CacheProvider;
use peerfeed_entity::PendingAccount;

/// Holds not-yet-verified signups in the cache, keyed by username.
///
/// Entries carry the verification TTL; an entry that is never verified
/// simply ages out, freeing the username and email for a fresh signup.
#[derive(Debug, Clone)]
pub struct PendingAccountStore {
    cache: Arc<CacheManager>,
    ttl_seconds: u64,
}

impl PendingAccountStore {
    pub fn new(cache: Arc<CacheManager>, ttl_seconds: u64) -> Self {
        Self { cache, ttl_seconds }
    }

    /// Stages a pending account under its username.
    ///
    /// Overwrites any existing entry for the same username and resets the
    /// TTL; callers that want first-write-wins must check [`get`] first.
    ///
    /// [`get`]: PendingAccountStore::get
    pub async fn put(&self, account: &PendingAccount) -> AppResult<()> {
        let key = keys::pending_signup(&account.username);
        self.cache
            .set_json(&key, account, Duration::from_secs(self.ttl_seconds))
            .await?;
        debug!(username = %account.username, ttl = self.ttl_seconds, "Staged pending account");
        Ok(())
    }

    /// Looks up a staged account by username. `None` when absent or expired.
    pub async fn get(&self, username: &str) -> AppResult<Option<PendingAccount>> {
        let key = keys::pending_signup(username);
        self.cache.get_json(&key).await
    }

    /// Removes a staged account after verification completes.
    pub async fn delete(&self, username: &str) -> AppResult<()> {
        let key = keys::pending_signup(username);
        self.cache.delete(&key).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use peerfeed_cache::memory::MemoryCacheProvider;
    use peerfeed_core::config::cache::MemoryCacheConfig;

    fn store() -> PendingAccountStore {
        let provider = MemoryCacheProvider::new(&MemoryCacheConfig::default());
        PendingAccountStore::new(
            Arc::new(CacheManager::from_provider(Arc::new(provider))),
            7200,
        )
    }

    fn pending(username: &str) -> PendingAccount {
        PendingAccount {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            full_name: "Test User".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = store();
        store.put(&pending("alice")).await.unwrap();

        let found = store.get("alice").await.unwrap().unwrap();
        assert_eq!(found.username, "alice");
        assert_eq!(found.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = store();
        assert!(store.get("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_entry() {
        let store = store();
        store.put(&pending("bob")).await.unwrap();
        store.delete("bob").await.unwrap();
        assert!(store.get("bob").await.unwrap().is_none());
    }
}
