//! # peerfeed-auth
//!
//! Authentication primitives for PeerFeed.
//!
//! ## Modules
//!
//! - `jwt` — token signing, verification, and unverified decoding
//! - `pending` — ephemeral store for not-yet-verified signups
//! - `denylist` — revoked-token store with remaining-lifetime TTLs
//! - `account` — refresh-token rotation and recovery-key management
//! - `password` — Argon2id credential hashing

pub mod account;
pub mod denylist;
pub mod jwt;
pub mod password;
pub mod pending;

pub use account::AccountStore;
pub use denylist::SessionDenylist;
pub use jwt::{Claims, TokenCodec, TokenKind};
pub use password::PasswordHasher;
pub use pending::PendingAccountStore;
