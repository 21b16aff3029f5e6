//! Cache key builders for all PeerFeed cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

/// Prefix applied to all PeerFeed cache keys.
const PREFIX: &str = "peerfeed";

/// Cache key for a pending (unverified) signup, keyed by username.
///
/// The username is lowercased so case variants of the same identity
/// collide here, matching the case-insensitive user uniqueness rule.
pub fn pending_signup(username: &str) -> String {
    format!("{PREFIX}:signup:pending:{}", username.to_lowercase())
}

/// Cache key for a denylisted (signed-out) bearer token.
pub fn denied_session(token: &str) -> String {
    format!("{PREFIX}:session:denied:{token}")
}
