//! Core traits defined in `peerfeed-core` and implemented by other crates.

pub mod cache;
pub mod clock;
pub mod indexer;
pub mod mail;

pub use cache::CacheProvider;
pub use clock::{Clock, SystemClock};
pub use indexer::{NoopProfileIndexer, ProfileIndexer};
pub use mail::{MailBody, MailGateway};
