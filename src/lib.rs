//! Local-first temporal state engine for personal care tracking.
//!
//! Two independent engines share the same shape: a grooming task tracker
//! (completion history + reminder intervals → days remaining and
//! overdue/urgent/ok status) and a menstrual cycle tracker (logged start
//! dates + configured lengths → next predicted start, current phase,
//! rolling average cycle length). Both load their state from JSON records
//! under the state directory on construction and rewrite them after every
//! mutation.
//!
//! Presentation and notification delivery live outside this crate; the
//! reminder check in [`notify`] only produces the once-per-day decision.

pub mod clock;
pub mod cycle;
pub mod error;
pub mod grooming;
pub mod notify;
pub mod storage;
pub mod types;
mod util;

pub use clock::{Clock, SystemClock};
pub use cycle::CycleTracker;
pub use error::TrackerError;
pub use grooming::GroomingTracker;
pub use notify::{ReminderCheck, ReminderNotice};
pub use storage::Storage;
pub use types::{
    CycleConfig, CycleEntry, CyclePhase, GroomingConfig, GroomingTask, NotificationState,
    TaskStatus,
};
