//! JWT token signing, verification, and claims management.

pub mod claims;
pub mod codec;

pub use claims::{Claims, TokenKind};
pub use codec::TokenCodec;
