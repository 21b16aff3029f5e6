//! User repository trait and implementations.

pub mod memory;
pub mod user;

use async_trait::async_trait;
use uuid::Uuid;

use peerfeed_core::result::AppResult;
use peerfeed_entity::{PendingAccount, User};

pub use memory::MemoryUserRepository;
pub use user::PostgresUserRepository;

/// Persistent store of verified users.
///
/// Username and email uniqueness is a storage-level guarantee: `create`
/// must fail with a `DuplicateAccount` error when a concurrent promotion
/// wins the race, because the caller's existence pre-check and the write
/// are not atomic.
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by username (case-insensitive).
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user matching either the username or the email.
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> AppResult<Option<User>>;

    /// Promote a pending account to a verified user.
    ///
    /// Fails with `DuplicateAccount` if the username or email unique
    /// constraint is violated.
    async fn create(&self, pending: &PendingAccount) -> AppResult<User>;

    /// Overwrite the stored refresh token (`None` clears it).
    ///
    /// The subject may be identified by username or email. Fails with
    /// `AccountNotFound` if no user matches.
    async fn set_refresh_token(
        &self,
        username_or_email: &str,
        token: Option<&str>,
    ) -> AppResult<User>;

    /// Find the user whose username and persisted refresh token both match
    /// exactly. A rotated-out token matches nothing.
    async fn find_by_refresh_token(&self, username: &str, token: &str) -> AppResult<Option<User>>;

    /// Persist a recovery key on the user with the given email.
    ///
    /// Overwrites any previous key. Fails with `AccountNotFound` if no user
    /// matches.
    async fn set_recovery_key(&self, email: &str, key: &str) -> AppResult<User>;

    /// Atomically consume a recovery key: overwrite the credential hash and
    /// clear the key, but only where the persisted key equals `key` exactly.
    ///
    /// Fails with `InvalidRecoveryKey` when no row matches (wrong key,
    /// already consumed, or unknown email).
    async fn consume_recovery_key(
        &self,
        email: &str,
        key: &str,
        new_password_hash: &str,
    ) -> AppResult<()>;

    /// Flip the active flag on the user matching the username or email.
    ///
    /// Fails with `AccountNotFound` if no user matches.
    async fn set_active(&self, username_or_email: &str, active: bool) -> AppResult<User>;
}
