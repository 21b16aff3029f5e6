//! Refresh-token rotation and recovery-key management.

use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use peerfeed_core::error::AppError;
use peerfeed_core::result::AppResult;
use peerfeed_database::repositories::UserRepository;
use peerfeed_entity::User;

use crate::jwt::TokenCodec;

/// Number of random bytes behind a recovery key (32 hex characters).
const RECOVERY_KEY_BYTES: usize = 16;

/// Manages the per-user single-slot refresh token and recovery keys.
///
/// Each user holds at most one live refresh token; rotating writes a new
/// one over the old, so only the most recent token validates. Recovery
/// keys are single-use random secrets consumed atomically at reset time.
#[derive(Debug, Clone)]
pub struct AccountStore {
    repo: Arc<dyn UserRepository>,
    codec: Arc<TokenCodec>,
}

impl AccountStore {
    pub fn new(repo: Arc<dyn UserRepository>, codec: Arc<TokenCodec>) -> Self {
        Self { repo, codec }
    }

    /// Mints a fresh refresh token for the user and persists it,
    /// displacing whatever token was stored before.
    pub async fn rotate_refresh_token(&self, user: &User) -> AppResult<String> {
        let token = self.codec.issue_refresh(user)?;
        self.repo
            .set_refresh_token(&user.username, Some(&token))
            .await?;
        debug!(username = %user.username, "Rotated refresh token");
        Ok(token)
    }

    /// Clears the stored refresh token so no refresh token validates for
    /// this user until the next sign-in.
    pub async fn invalidate_refresh_token(&self, username: &str) -> AppResult<()> {
        self.repo.set_refresh_token(username, None).await?;
        debug!(username = %username, "Invalidated refresh token");
        Ok(())
    }

    /// Resolves the user whose persisted refresh token matches `token`
    /// exactly. A rotated-out or cleared token resolves to nothing.
    pub async fn validate_refresh_token(&self, username: &str, token: &str) -> AppResult<User> {
        self.repo
            .find_by_refresh_token(username, token)
            .await?
            .ok_or_else(|| AppError::invalid_refresh_token("Refresh token is not valid"))
    }

    /// Generates a fresh recovery key for the account with the given email
    /// and persists it, overwriting any previous key.
    ///
    /// Returns the updated user together with the plaintext key, which is
    /// never stored anywhere except on the user row.
    pub async fn generate_recovery_key(&self, email: &str) -> AppResult<(User, String)> {
        let key = random_recovery_key();
        let user = self.repo.set_recovery_key(email, &key).await?;
        debug!(username = %user.username, "Generated recovery key");
        Ok((user, key))
    }

    /// Consumes a recovery key: replaces the credential hash and clears the
    /// key in one step, failing with `InvalidRecoveryKey` unless the stored
    /// key matches exactly.
    pub async fn consume_recovery_key(
        &self,
        email: &str,
        key: &str,
        new_password_hash: &str,
    ) -> AppResult<()> {
        self.repo
            .consume_recovery_key(email, key, new_password_hash)
            .await
    }
}

/// Generates a random recovery key as lowercase hex.
fn random_recovery_key() -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..RECOVERY_KEY_BYTES).map(|_| rng.gen()).collect();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
