//! # peerfeed-mail
//!
//! Outbound SMTP delivery for PeerFeed. Implements the core
//! [`MailGateway`](peerfeed_core::traits::MailGateway) trait over an
//! asynchronous STARTTLS relay.

pub mod smtp;

pub use smtp::SmtpMailer;
