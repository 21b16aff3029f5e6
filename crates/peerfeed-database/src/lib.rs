//! # peerfeed-database
//!
//! PostgreSQL connection management and user repository implementations
//! for PeerFeed. The [`repositories::UserRepository`] trait is implemented
//! by both the Postgres-backed repository and an in-memory repository for
//! tests and single-node development.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::UserRepository;
