//! Pending (not yet verified) signup.

pub mod model;

pub use model::PendingAccount;
