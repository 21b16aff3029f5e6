//! Mail gateway trait for outbound delivery.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A single outbound mail message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailBody {
    /// Destination address.
    pub receiver_email: String,
    /// Destination display name.
    pub receiver_name: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body (typically a single link).
    pub text: String,
}

/// Trait for outbound mail transports.
///
/// Delivery failure is surfaced to the caller as a `MailDelivery` error and
/// is never retried by the gateway or its callers.
#[async_trait]
pub trait MailGateway: Send + Sync + std::fmt::Debug + 'static {
    /// Hand a message to the transport.
    async fn send(&self, body: &MailBody) -> AppResult<()>;
}
