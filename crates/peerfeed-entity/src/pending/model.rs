//! Pending account value object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A signup awaiting email verification.
///
/// Lives only in the ephemeral TTL store, keyed by username. At most one
/// pending account per username exists at a time; a later `put` for the same
/// username overwrites the earlier one (last-write-wins). The entry is
/// destroyed on successful promotion to [`crate::User`] or by natural TTL
/// expiry when the signup is abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAccount {
    /// Requested login name.
    pub username: String,
    /// Requested email address.
    pub email: String,
    /// Human-readable full name.
    pub full_name: String,
    /// Argon2 credential hash, computed at signup time.
    pub password_hash: String,
    /// When the signup request was accepted.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_roundtrip() {
        let pending = PendingAccount {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            full_name: "Alice Doe".to_string(),
            password_hash: "$argon2id$...".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&pending).unwrap();
        let back: PendingAccount = serde_json::from_str(&json).unwrap();
        assert_eq!(pending, back);
    }
}
