//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and token configuration.
///
/// Two independent signing keys are used: the access-family secret signs
/// access, verification, and activation tokens; the refresh secret signs
/// refresh tokens only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for access, verification, and activation tokens (HMAC-SHA256).
    #[serde(default = "default_access_secret")]
    pub access_token_secret: String,
    /// Secret key for refresh tokens (HMAC-SHA256).
    #[serde(default = "default_refresh_secret")]
    pub refresh_token_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_hours: u64,
    /// Verification token and pending-signup TTL in seconds.
    #[serde(default = "default_verification_ttl")]
    pub verification_ttl_seconds: u64,
    /// Activation token TTL in seconds.
    #[serde(default = "default_activation_ttl")]
    pub activation_ttl_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: default_access_secret(),
            refresh_token_secret: default_refresh_secret(),
            access_ttl_minutes: default_access_ttl(),
            refresh_ttl_hours: default_refresh_ttl(),
            verification_ttl_seconds: default_verification_ttl(),
            activation_ttl_seconds: default_activation_ttl(),
        }
    }
}

fn default_access_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_refresh_secret() -> String {
    "CHANGE_ME_TOO_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    24
}

// 120 minutes: the verification link and the cached pending signup
// expire together.
fn default_verification_ttl() -> u64 {
    7200
}

fn default_activation_ttl() -> u64 {
    900
}
