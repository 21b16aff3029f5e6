//! Revoked-token store for signed-out sessions.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use peerfeed_cache::{keys, CacheManager};
use peerfeed_core::result::AppResult;
use peerfeed_core::traits::CacheProvider;

/// Records bearer tokens that were signed out before their natural expiry.
///
/// Each entry lives exactly as long as the token it denies would have
/// remained valid, so the store holds only live revocations and cleans
/// itself up. Tokens are the keys; no payload is stored.
#[derive(Debug, Clone)]
pub struct SessionDenylist {
    cache: Arc<CacheManager>,
}

impl SessionDenylist {
    pub fn new(cache: Arc<CacheManager>) -> Self {
        Self { cache }
    }

    /// Denylists a token for its remaining lifetime in seconds.
    ///
    /// A token that is already expired (`remaining_seconds <= 0`) is not
    /// recorded; ordinary expiry checks reject it anyway.
    pub async fn add(&self, token: &str, remaining_seconds: i64) -> AppResult<()> {
        if remaining_seconds <= 0 {
            debug!("Skipping denylist entry for already-expired token");
            return Ok(());
        }
        let key = keys::denied_session(token);
        self.cache
            .set_key_only(&key, Duration::from_secs(remaining_seconds as u64))
            .await?;
        debug!(ttl = remaining_seconds, "Denylisted session token");
        Ok(())
    }

    /// Whether the token has been signed out and is still within its
    /// original lifetime.
    pub async fn contains(&self, token: &str) -> AppResult<bool> {
        let key = keys::denied_session(token);
        self.cache.exists(&key).await
    }
}
