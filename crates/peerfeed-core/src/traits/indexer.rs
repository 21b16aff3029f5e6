//! Downstream profile indexing hook.

use async_trait::async_trait;

use crate::result::AppResult;

/// Receives newly verified account usernames for downstream indexing
/// (e.g. sitemap regeneration).
///
/// Invoked fire-and-forget after a successful verification; a failure here
/// must never block or fail the verification response.
#[async_trait]
pub trait ProfileIndexer: Send + Sync + std::fmt::Debug + 'static {
    /// Add a newly verified profile to the index.
    async fn index_profile(&self, username: &str) -> AppResult<()>;
}

/// No-op indexer for deployments without a downstream index.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProfileIndexer;

#[async_trait]
impl ProfileIndexer for NoopProfileIndexer {
    async fn index_profile(&self, _username: &str) -> AppResult<()> {
        Ok(())
    }
}
