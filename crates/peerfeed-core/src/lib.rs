//! # peerfeed-core
//!
//! Core crate for PeerFeed. Contains traits, configuration schemas,
//! shared outcome types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other PeerFeed crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
