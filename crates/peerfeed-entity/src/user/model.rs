//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A verified, registered user.
///
/// Users come into existence only by promotion of a [`crate::PendingAccount`]
/// after email verification. Username and email are globally unique,
/// enforced at the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Human-readable full name.
    pub full_name: String,
    /// Argon2 credential hash.
    pub password_hash: String,
    /// User role.
    pub role: UserRole,
    /// Whether the account is currently active (sign-in allowed).
    pub is_active: bool,
    /// Whether the account is banned.
    pub is_banned: bool,
    /// Currently active refresh token, if any. Rotation overwrites this
    /// value, so at most one refresh token per user is ever valid.
    pub refresh_token: Option<String>,
    /// Single-use account recovery key, if one has been generated.
    pub recovery_key: Option<String>,
    /// When the user was created (promoted from pending).
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
