//! # peerfeed-service
//!
//! Account-lifecycle orchestration for PeerFeed. The [`AuthService`]
//! composes the token codec, pending-signup store, session denylist, and
//! user repository into the sign-up, verification, sign-in, sign-out,
//! refresh, recovery, and activation flows. All state lives in the backing
//! stores; the service itself holds only its collaborators.

pub mod auth;

pub use auth::{AuthService, SignInOutcome, SignUpRequest};
