//! Injectable wall clock.
//!
//! Every derived value in the trackers is a function of `now`, so the
//! clock is a constructor argument instead of a call to `Utc::now()`
//! scattered through the logic. Tests pin it with [`test_utils::ManualClock`].

use chrono::{DateTime, Utc};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
