//! JWT claims structure shared by all token kinds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use peerfeed_entity::user::UserRole;

/// JWT claims payload embedded in every PeerFeed token.
///
/// The `kind` discriminant closes the set of token shapes: a token is only
/// ever one of the four known kinds, never an open claim map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject username.
    pub username: String,
    /// Subject email.
    pub email: String,
    /// User role at the time of token issuance (access tokens only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token kind discriminant.
    pub kind: TokenKind,
}

/// Distinguishes the four token kinds issued by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short-lived bearer token for API requests.
    Access,
    /// Longer-lived token used solely to mint new access tokens.
    Refresh,
    /// Single-purpose capability mailed out to confirm a signup.
    Verification,
    /// Single-purpose capability mailed out to re-enable an account.
    Activation,
}

impl Claims {
    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Returns the remaining lifetime in whole seconds at `now`,
    /// negative once expired.
    pub fn remaining_seconds(&self, now: i64) -> i64 {
        self.exp - now
    }
}
