//! Once-per-day reminder decision.
//!
//! The tracker core never raises notifications itself; it only decides,
//! at most once per UTC calendar day, whether anything is due and what
//! the message should say. Whoever owns a delivery channel (a tray icon,
//! a system notification, a cron mail) polls [`ReminderCheck::check`] as
//! often as it likes; repeat polls within the same day return `None`.

use std::sync::Arc;

use crate::clock::Clock;
use crate::grooming::GroomingTracker;
use crate::storage::Storage;
use crate::types::{GroomingTask, NotificationState, URGENT_WINDOW_DAYS};

/// A notification the caller should surface to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderNotice {
    pub title: String,
    pub body: String,
}

pub struct ReminderCheck {
    state: NotificationState,
    storage: Storage,
    clock: Arc<dyn Clock>,
}

impl ReminderCheck {
    pub fn load(storage: Storage, clock: Arc<dyn Clock>) -> Self {
        let state = storage.load_notification_state();
        Self {
            state,
            storage,
            clock,
        }
    }

    /// Whether the user has opted in to reminders. Defaults to off.
    pub fn enabled(&self) -> bool {
        self.state.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.state.enabled = enabled;
        self.persist();
    }

    /// Run the daily check against current grooming state.
    ///
    /// Returns `None` when reminders are disabled, when a check already
    /// ran today, or when nothing is due. A quiet day still consumes the
    /// day's one decision. Overdue tasks take precedence over urgent ones.
    pub fn check(&mut self, grooming: &GroomingTracker) -> Option<ReminderNotice> {
        if !self.state.enabled {
            return None;
        }

        let today = self.clock.now().date_naive();
        if self.state.last_checked == Some(today) {
            return None;
        }
        self.state.last_checked = Some(today);
        self.persist();

        let overdue: Vec<&GroomingTask> = grooming
            .tasks()
            .iter()
            .filter(|t| grooming.days_remaining(t) == 0)
            .collect();
        let urgent: Vec<&GroomingTask> = grooming
            .tasks()
            .iter()
            .filter(|t| {
                let days = grooming.days_remaining(t);
                days > 0 && days <= URGENT_WINDOW_DAYS
            })
            .collect();

        if !overdue.is_empty() {
            let verb = if overdue.len() == 1 { "is" } else { "are" };
            Some(ReminderNotice {
                title: "Grooming tasks overdue".to_string(),
                body: format!("{} {} past the deadline.", join_titles(&overdue), verb),
            })
        } else if !urgent.is_empty() {
            Some(ReminderNotice {
                title: "Grooming reminder".to_string(),
                body: format!(
                    "{} due within {} days.",
                    join_titles(&urgent),
                    URGENT_WINDOW_DAYS
                ),
            })
        } else {
            None
        }
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save_notification_state(&self.state) {
            log::warn!("Failed to save notification state: {}", e);
        }
    }
}

fn join_titles(tasks: &[&GroomingTask]) -> String {
    tasks
        .iter()
        .map(|t| t.title.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
