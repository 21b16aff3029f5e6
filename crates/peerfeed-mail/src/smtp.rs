//! SMTP transport implementing the mail gateway.

use async_trait::async_trait;
use lettre::{
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{debug, warn};

use peerfeed_core::config::MailConfig;
use peerfeed_core::error::AppError;
use peerfeed_core::result::AppResult;
use peerfeed_core::traits::{MailBody, MailGateway};

/// Mail gateway backed by an async SMTP relay over STARTTLS.
///
/// Delivery is single-shot: a transport error maps to a `MailDelivery`
/// error and the message is not retried.
#[derive(Debug)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    /// Builds a mailer from SMTP configuration.
    pub fn new(config: &MailConfig) -> AppResult<Self> {
        let creds = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| {
                AppError::configuration(format!(
                    "Invalid SMTP relay '{}': {e}",
                    config.smtp_host
                ))
            })?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            from: format!("{} <{}>", config.from_name, config.from_email),
        })
    }
}

#[async_trait]
impl MailGateway for SmtpMailer {
    async fn send(&self, body: &MailBody) -> AppResult<()> {
        let to = format!("{} <{}>", body.receiver_name, body.receiver_email);

        let message = Message::builder()
            .from(self.from.parse().map_err(|e| {
                AppError::configuration(format!("Invalid sender address '{}': {e}", self.from))
            })?)
            .to(to.parse().map_err(|e| {
                AppError::mail_delivery(format!(
                    "Invalid recipient address '{}': {e}",
                    body.receiver_email
                ))
            })?)
            .subject(&body.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.text.clone())
            .map_err(|e| AppError::mail_delivery(format!("Failed to build message: {e}")))?;

        match self.transport.send(message).await {
            Ok(_) => {
                debug!(to = %body.receiver_email, subject = %body.subject, "Mail delivered");
                Ok(())
            }
            Err(e) => {
                warn!(to = %body.receiver_email, error = %e, "SMTP delivery failed");
                Err(AppError::mail_delivery(format!("SMTP transport failed: {e}")))
            }
        }
    }
}
