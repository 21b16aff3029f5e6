//! User entity and related enums.

pub mod model;
pub mod role;

pub use model::User;
pub use role::UserRole;
