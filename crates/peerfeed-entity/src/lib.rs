//! # peerfeed-entity
//!
//! Domain entity models for PeerFeed. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod pending;
pub mod user;

pub use pending::PendingAccount;
pub use user::{User, UserRole};
