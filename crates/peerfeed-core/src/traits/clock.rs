//! Injectable wall-clock source.

use chrono::{DateTime, Utc};

/// Source of the current time.
///
/// Expiry checks must read the clock live at check time, never a value
/// cached earlier in the same call. Injecting the clock keeps token expiry
/// deterministic under test.
pub trait Clock: Send + Sync + std::fmt::Debug + 'static {
    /// The current wall-clock time.
    fn now(&self) -> DateTime<Utc>;

    /// The current time as integer seconds since the Unix epoch.
    fn now_timestamp(&self) -> i64 {
        self.now().timestamp()
    }
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
