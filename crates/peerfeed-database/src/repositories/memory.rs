//! In-memory user repository using a Tokio mutex for single-node use.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use peerfeed_core::error::AppError;
use peerfeed_core::result::AppResult;
use peerfeed_entity::{PendingAccount, User, UserRole};

use super::UserRepository;

/// In-memory user repository.
///
/// All operations take the table lock, so the uniqueness check inside
/// `create` is atomic with the insert — the same guarantee the Postgres
/// unique constraints give. Suitable for tests and single-node development.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    /// Users keyed by ID.
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl MemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user directly, bypassing promotion (test seeding).
    pub async fn insert(&self, user: User) {
        self.users.lock().await.insert(user.id, user);
    }
}

fn matches_ident(user: &User, ident: &str) -> bool {
    user.username.eq_ignore_ascii_case(ident) || user.email.eq_ignore_ascii_case(ident)
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.lock().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users
            .values()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> AppResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users
            .values()
            .find(|u| {
                u.username.eq_ignore_ascii_case(username) || u.email.eq_ignore_ascii_case(email)
            })
            .cloned())
    }

    async fn create(&self, pending: &PendingAccount) -> AppResult<User> {
        let mut users = self.users.lock().await;

        if users
            .values()
            .any(|u| u.username.eq_ignore_ascii_case(&pending.username))
        {
            return Err(AppError::duplicate_account(format!(
                "Username '{}' already exists",
                pending.username
            )));
        }
        if users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&pending.email))
        {
            return Err(AppError::duplicate_account("Email already in use"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: pending.username.clone(),
            email: pending.email.clone(),
            full_name: pending.full_name.clone(),
            password_hash: pending.password_hash.clone(),
            role: UserRole::Member,
            is_active: true,
            is_banned: false,
            refresh_token: None,
            recovery_key: None,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn set_refresh_token(
        &self,
        username_or_email: &str,
        token: Option<&str>,
    ) -> AppResult<User> {
        let mut users = self.users.lock().await;
        let user = users
            .values_mut()
            .find(|u| matches_ident(u, username_or_email))
            .ok_or_else(|| {
                AppError::account_not_found(format!("User {username_or_email} not found"))
            })?;

        user.refresh_token = token.map(String::from);
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn find_by_refresh_token(&self, username: &str, token: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users
            .values()
            .find(|u| {
                u.username.eq_ignore_ascii_case(username)
                    && u.refresh_token.as_deref() == Some(token)
            })
            .cloned())
    }

    async fn set_recovery_key(&self, email: &str, key: &str) -> AppResult<User> {
        let mut users = self.users.lock().await;
        let user = users
            .values_mut()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .ok_or_else(|| AppError::account_not_found(format!("No account with email {email}")))?;

        user.recovery_key = Some(key.to_string());
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn consume_recovery_key(
        &self,
        email: &str,
        key: &str,
        new_password_hash: &str,
    ) -> AppResult<()> {
        let mut users = self.users.lock().await;
        let user = users
            .values_mut()
            .find(|u| u.email.eq_ignore_ascii_case(email) && u.recovery_key.as_deref() == Some(key));

        match user {
            Some(user) => {
                user.password_hash = new_password_hash.to_string();
                user.recovery_key = None;
                user.updated_at = Utc::now();
                Ok(())
            }
            None => Err(AppError::invalid_recovery_key("Recovery key is invalid")),
        }
    }

    async fn set_active(&self, username_or_email: &str, active: bool) -> AppResult<User> {
        let mut users = self.users.lock().await;
        let user = users
            .values_mut()
            .find(|u| matches_ident(u, username_or_email))
            .ok_or_else(|| {
                AppError::account_not_found(format!("User {username_or_email} not found"))
            })?;

        user.is_active = active;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peerfeed_core::error::ErrorKind;

    fn pending(username: &str, email: &str) -> PendingAccount {
        PendingAccount {
            username: username.to_string(),
            email: email.to_string(),
            full_name: "Test User".to_string(),
            password_hash: "hash".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = MemoryUserRepository::new();
        let user = repo.create(&pending("alice", "a@x.com")).await.unwrap();

        assert_eq!(user.username, "alice");
        assert!(user.is_active);
        assert!(!user.is_banned);

        let found = repo.find_by_username("ALICE").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn test_create_duplicate_username_fails() {
        let repo = MemoryUserRepository::new();
        repo.create(&pending("alice", "a@x.com")).await.unwrap();

        let err = repo
            .create(&pending("alice", "other@x.com"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::DuplicateAccount));
    }

    #[tokio::test]
    async fn test_create_case_variant_username_fails() {
        let repo = MemoryUserRepository::new();
        repo.create(&pending("Alice", "a@x.com")).await.unwrap();

        // "Alice" and "alice" are the same identity.
        let err = repo
            .create(&pending("alice", "other@x.com"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::DuplicateAccount));
    }

    #[tokio::test]
    async fn test_create_duplicate_email_fails() {
        let repo = MemoryUserRepository::new();
        repo.create(&pending("alice", "a@x.com")).await.unwrap();

        let err = repo.create(&pending("bob", "A@X.COM")).await.unwrap_err();
        assert!(err.is(ErrorKind::DuplicateAccount));
    }

    #[tokio::test]
    async fn test_refresh_token_roundtrip() {
        let repo = MemoryUserRepository::new();
        repo.create(&pending("alice", "a@x.com")).await.unwrap();

        repo.set_refresh_token("alice", Some("tok-1")).await.unwrap();
        assert!(repo
            .find_by_refresh_token("alice", "tok-1")
            .await
            .unwrap()
            .is_some());

        // Rotation invalidates the previous token.
        repo.set_refresh_token("a@x.com", Some("tok-2"))
            .await
            .unwrap();
        assert!(repo
            .find_by_refresh_token("alice", "tok-1")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_consume_recovery_key_single_use() {
        let repo = MemoryUserRepository::new();
        repo.create(&pending("alice", "a@x.com")).await.unwrap();
        repo.set_recovery_key("a@x.com", "key-1").await.unwrap();

        repo.consume_recovery_key("a@x.com", "key-1", "new-hash")
            .await
            .unwrap();

        let user = repo.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(user.password_hash, "new-hash");
        assert_eq!(user.recovery_key, None);

        let err = repo
            .consume_recovery_key("a@x.com", "key-1", "again")
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::InvalidRecoveryKey));
    }
}
