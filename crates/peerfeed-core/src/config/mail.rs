//! Outbound mail (SMTP) configuration.

use serde::{Deserialize, Serialize};

/// SMTP transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// SMTP relay hostname.
    #[serde(default = "default_host")]
    pub smtp_host: String,
    /// SMTP relay port.
    #[serde(default = "default_port")]
    pub smtp_port: u16,
    /// SMTP username.
    #[serde(default)]
    pub smtp_username: String,
    /// SMTP password.
    #[serde(default)]
    pub smtp_password: String,
    /// Sender address used in the `From` header.
    #[serde(default = "default_from_email")]
    pub from_email: String,
    /// Sender display name used in the `From` header.
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_host(),
            smtp_port: default_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: default_from_email(),
            from_name: default_from_name(),
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    587
}

fn default_from_email() -> String {
    "noreply@peerfeed.dev".to_string()
}

fn default_from_name() -> String {
    "PeerFeed".to_string()
}
