//! Token signing, verification, and unverified decoding.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use peerfeed_core::config::AuthConfig;
use peerfeed_core::error::AppError;
use peerfeed_core::result::AppResult;
use peerfeed_core::traits::{Clock, SystemClock};
use peerfeed_entity::User;

use super::claims::{Claims, TokenKind};

/// Signs, verifies, and decodes PeerFeed tokens.
///
/// Two independent signing keys are in play: the access-family secret covers
/// access, verification, and activation tokens; refresh tokens use their own
/// secret. The codec is pure given the injected clock — it holds no state
/// beyond keys and TTLs.
#[derive(Clone)]
pub struct TokenCodec {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
    verification_ttl_seconds: i64,
    activation_ttl_seconds: i64,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("refresh_ttl_seconds", &self.refresh_ttl_seconds)
            .finish()
    }
}

impl TokenCodec {
    /// Creates a new codec from auth configuration and a clock.
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(config.access_token_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_token_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            access_ttl_seconds: (config.access_ttl_minutes * 60) as i64,
            refresh_ttl_seconds: (config.refresh_ttl_hours * 3600) as i64,
            verification_ttl_seconds: config.verification_ttl_seconds as i64,
            activation_ttl_seconds: config.activation_ttl_seconds as i64,
            clock,
        }
    }

    /// Creates a codec driven by the system wall clock.
    pub fn with_system_clock(config: &AuthConfig) -> Self {
        Self::new(config, Arc::new(SystemClock))
    }

    /// The TTL in seconds for the given token kind.
    pub fn ttl_seconds(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Access => self.access_ttl_seconds,
            TokenKind::Refresh => self.refresh_ttl_seconds,
            TokenKind::Verification => self.verification_ttl_seconds,
            TokenKind::Activation => self.activation_ttl_seconds,
        }
    }

    fn encoding_key(&self, kind: TokenKind) -> &EncodingKey {
        match kind {
            TokenKind::Refresh => &self.refresh_encoding,
            _ => &self.access_encoding,
        }
    }

    fn decoding_key(&self, kind: TokenKind) -> &DecodingKey {
        match kind {
            TokenKind::Refresh => &self.refresh_decoding,
            _ => &self.access_decoding,
        }
    }

    /// Signs a token of the given kind for the subject.
    ///
    /// Embeds `exp = now + ttl(kind)` as integer epoch seconds.
    pub fn issue(
        &self,
        kind: TokenKind,
        username: &str,
        email: &str,
        role: Option<peerfeed_entity::UserRole>,
    ) -> AppResult<String> {
        let now = self.clock.now();
        let exp = now + Duration::seconds(self.ttl_seconds(kind));

        let claims = Claims {
            username: username.to_string(),
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            kind,
        };

        encode(&Header::default(), &claims, self.encoding_key(kind))
            .map_err(|e| AppError::internal(format!("Failed to encode {kind:?} token: {e}")))
    }

    /// Signs an access token carrying the user's role.
    pub fn issue_access(&self, user: &User) -> AppResult<String> {
        self.issue(
            TokenKind::Access,
            &user.username,
            &user.email,
            Some(user.role),
        )
    }

    /// Signs a refresh token for the user.
    pub fn issue_refresh(&self, user: &User) -> AppResult<String> {
        self.issue(TokenKind::Refresh, &user.username, &user.email, None)
    }

    /// Verifies signature and expiry, and checks the kind discriminant.
    ///
    /// Signature and structure failures map to `InvalidSignature`; expiry is
    /// checked against a live clock read after the signature check and maps
    /// to `TokenExpired`; a kind mismatch maps to `InvalidToken`.
    pub fn verify(&self, token: &str, expected: TokenKind) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against the injected clock, not by the
        // library against the process clock.
        validation.validate_exp = false;
        validation.set_required_spec_claims::<&str>(&[]);

        let data = decode::<Claims>(token, self.decoding_key(expected), &validation)
            .map_err(|_| AppError::invalid_signature("Invalid token signature"))?;

        let claims = data.claims;

        if claims.exp <= self.clock.now_timestamp() {
            return Err(AppError::token_expired("Incoming token is expired"));
        }

        if claims.kind != expected {
            return Err(AppError::invalid_token("Incoming token is not valid"));
        }

        Ok(claims)
    }

    /// Parses claims without verifying the signature.
    ///
    /// Only for extracting the subject and expiry of a token that an earlier
    /// middleware step has already authenticated (sign-out). Never use the
    /// result to authorize anything.
    pub fn decode_unverified(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.set_required_spec_claims::<&str>(&[]);

        let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
            .map_err(|_| AppError::invalid_signature("Malformed token"))?;

        Ok(data.claims)
    }

    /// A live clock read, exposed for callers that need "now" in the same
    /// time base as the codec.
    pub fn now_timestamp(&self) -> i64 {
        self.clock.now_timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use peerfeed_core::error::ErrorKind;
    use std::sync::Mutex;

    /// Clock that tests can advance by hand.
    #[derive(Debug)]
    struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        fn starting_at(ts: i64) -> Arc<Self> {
            Arc::new(Self(Mutex::new(Utc.timestamp_opt(ts, 0).unwrap())))
        }

        fn advance_seconds(&self, secs: i64) {
            let mut now = self.0.lock().unwrap();
            *now += Duration::seconds(secs);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn config() -> AuthConfig {
        AuthConfig {
            access_token_secret: "access-secret".to_string(),
            refresh_token_secret: "refresh-secret".to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let clock = ManualClock::starting_at(1_700_000_000);
        let codec = TokenCodec::new(&config(), clock);

        let token = codec
            .issue(TokenKind::Verification, "alice", "a@x.com", None)
            .unwrap();
        let claims = codec.verify(&token, TokenKind::Verification).unwrap();

        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.kind, TokenKind::Verification);
        assert_eq!(claims.exp, 1_700_000_000 + 7200);
    }

    #[test]
    fn test_verify_rejects_expired() {
        let clock = ManualClock::starting_at(1_700_000_000);
        let codec = TokenCodec::new(&config(), clock.clone());

        let token = codec
            .issue(TokenKind::Verification, "alice", "a@x.com", None)
            .unwrap();

        clock.advance_seconds(7200);
        let err = codec.verify(&token, TokenKind::Verification).unwrap_err();
        assert!(err.is(ErrorKind::TokenExpired));
    }

    #[test]
    fn test_verify_rejects_wrong_family_secret() {
        let clock = ManualClock::starting_at(1_700_000_000);
        let codec = TokenCodec::new(&config(), clock);

        // Signed with the access-family secret, verified as a refresh token.
        let token = codec
            .issue(TokenKind::Access, "alice", "a@x.com", None)
            .unwrap();
        let err = codec.verify(&token, TokenKind::Refresh).unwrap_err();
        assert!(err.is(ErrorKind::InvalidSignature));
    }

    #[test]
    fn test_verify_rejects_kind_mismatch() {
        let clock = ManualClock::starting_at(1_700_000_000);
        let codec = TokenCodec::new(&config(), clock);

        // Access and verification tokens share a secret, so the signature
        // verifies and only the discriminant separates them.
        let token = codec
            .issue(TokenKind::Access, "alice", "a@x.com", None)
            .unwrap();
        let err = codec.verify(&token, TokenKind::Verification).unwrap_err();
        assert!(err.is(ErrorKind::InvalidToken));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let clock = ManualClock::starting_at(1_700_000_000);
        let codec = TokenCodec::new(&config(), clock);

        let err = codec
            .verify("not-a-token", TokenKind::Access)
            .unwrap_err();
        assert!(err.is(ErrorKind::InvalidSignature));
    }

    #[test]
    fn test_decode_unverified_reads_exp_of_expired_token() {
        let clock = ManualClock::starting_at(1_700_000_000);
        let codec = TokenCodec::new(&config(), clock.clone());

        let token = codec
            .issue(TokenKind::Access, "alice", "a@x.com", None)
            .unwrap();
        clock.advance_seconds(100_000);

        let claims = codec.decode_unverified(&token).unwrap();
        assert_eq!(claims.username, "alice");
        assert!(claims.remaining_seconds(codec.now_timestamp()) < 0);
    }
}
