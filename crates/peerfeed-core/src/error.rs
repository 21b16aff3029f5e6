//! Unified application error types for PeerFeed.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
///
/// The auth-specific kinds mirror the account lifecycle: every terminal,
/// user-reportable failure of a flow has its own kind so callers can react
/// without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A verified account with the same username or email already exists.
    AccountAlreadyExists,
    /// A signup for this username is already pending email verification.
    PendingVerificationExists,
    /// No pending signup was found to verify (already promoted or expired).
    NoPendingAccount,
    /// The token is structurally valid but not usable for this operation.
    InvalidToken,
    /// The token's expiry has passed.
    TokenExpired,
    /// The token signature does not verify, or the token is malformed.
    InvalidSignature,
    /// The presented refresh token does not match the persisted one.
    InvalidRefreshToken,
    /// Mail could not be handed off to the SMTP transport.
    MailDelivery,
    /// The account is banned.
    Banned,
    /// The account is deactivated.
    Inactive,
    /// No account matches the given username or email.
    AccountNotFound,
    /// The presented recovery key does not match the persisted one.
    InvalidRecoveryKey,
    /// A unique constraint was violated while promoting a pending account.
    DuplicateAccount,
    /// Input validation failed.
    Validation,
    /// A database error occurred.
    Database,
    /// A cache error occurred.
    Cache,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccountAlreadyExists => write!(f, "ACCOUNT_ALREADY_EXISTS"),
            Self::PendingVerificationExists => write!(f, "PENDING_VERIFICATION_EXISTS"),
            Self::NoPendingAccount => write!(f, "NO_PENDING_ACCOUNT"),
            Self::InvalidToken => write!(f, "INVALID_TOKEN"),
            Self::TokenExpired => write!(f, "TOKEN_EXPIRED"),
            Self::InvalidSignature => write!(f, "INVALID_SIGNATURE"),
            Self::InvalidRefreshToken => write!(f, "INVALID_REFRESH_TOKEN"),
            Self::MailDelivery => write!(f, "MAIL_DELIVERY_FAILED"),
            Self::Banned => write!(f, "BANNED"),
            Self::Inactive => write!(f, "INACTIVE"),
            Self::AccountNotFound => write!(f, "ACCOUNT_NOT_FOUND"),
            Self::InvalidRecoveryKey => write!(f, "INVALID_RECOVERY_KEY"),
            Self::DuplicateAccount => write!(f, "DUPLICATE_ACCOUNT"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Database => write!(f, "DATABASE"),
            Self::Cache => write!(f, "CACHE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout PeerFeed.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary. None of these failures are retried by
/// the core; each aborts the flow that raised it.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Check whether this error carries the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// Create an account-already-exists error.
    pub fn account_already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AccountAlreadyExists, message)
    }

    /// Create a pending-verification-exists error.
    pub fn pending_verification_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PendingVerificationExists, message)
    }

    /// Create a no-pending-account error.
    pub fn no_pending_account(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoPendingAccount, message)
    }

    /// Create an invalid-token error.
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidToken, message)
    }

    /// Create a token-expired error.
    pub fn token_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenExpired, message)
    }

    /// Create an invalid-signature error.
    pub fn invalid_signature(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidSignature, message)
    }

    /// Create an invalid-refresh-token error.
    pub fn invalid_refresh_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRefreshToken, message)
    }

    /// Create a mail-delivery error.
    pub fn mail_delivery(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MailDelivery, message)
    }

    /// Create a banned-account error.
    pub fn banned(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Banned, message)
    }

    /// Create an inactive-account error.
    pub fn inactive(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Inactive, message)
    }

    /// Create an account-not-found error.
    pub fn account_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AccountNotFound, message)
    }

    /// Create an invalid-recovery-key error.
    pub fn invalid_recovery_key(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRecoveryKey, message)
    }

    /// Create a duplicate-account error.
    pub fn duplicate_account(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateAccount, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a cache error.
    pub fn cache(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cache, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
