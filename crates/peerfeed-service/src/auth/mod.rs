mod service;
mod types;

pub use service::AuthService;
pub use types::{SignInOutcome, SignUpRequest};
