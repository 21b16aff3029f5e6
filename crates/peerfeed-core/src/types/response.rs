//! Shared outcome types for service flows.

use serde::{Deserialize, Serialize};

/// Informational success outcome.
///
/// Terminal flows that produce no data (sign-up accepted, token killed,
/// account verified, …) resolve to a `Notice` carrying a human-readable
/// message. This is the success channel — failures are always `AppError`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Human-readable status message.
    pub message: String,
}

impl Notice {
    /// Create a notice with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
