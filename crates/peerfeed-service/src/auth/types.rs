//! Request and response shapes for the auth flows.

use serde::{Deserialize, Serialize};

use peerfeed_entity::User;

/// A new-account request, as received from the signup form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub full_name: String,
    /// Plaintext credential; hashed before anything is stored.
    pub password: String,
}

/// Result of a successful sign-in.
///
/// Carries the full user record; field redaction (credential hash,
/// recovery key, internal id) is the response shaper's job downstream.
#[derive(Debug, Clone, Serialize)]
pub struct SignInOutcome {
    pub access_token: String,
    /// Present only when the sign-in asked to be remembered.
    pub refresh_token: Option<String>,
    pub user: User,
}
