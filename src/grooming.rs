//! Grooming task tracker: completion history and reminder status.
//!
//! Days-remaining is a ceiling division over the millisecond gap to the
//! due instant, floored at zero: a task completed 39.1 days ago with a
//! 40-day interval still reports 1 day remaining. A task with no
//! completion on record is immediately due.

use std::sync::Arc;

use chrono::Duration;

use crate::clock::Clock;
use crate::error::TrackerError;
use crate::storage::Storage;
use crate::types::{
    self, clamp_reminder_interval, GroomingConfig, GroomingTask, TaskStatus, URGENT_WINDOW_DAYS,
};
use crate::util::ceil_days;

pub struct GroomingTracker {
    tasks: Vec<GroomingTask>,
    config: GroomingConfig,
    storage: Storage,
    clock: Arc<dyn Clock>,
}

impl GroomingTracker {
    /// Load tracker state from storage. The fixed default task set is
    /// installed when no stored collection exists.
    pub fn load(storage: Storage, clock: Arc<dyn Clock>) -> Self {
        let tasks = storage.load_tasks();
        let config = storage.load_grooming_config();
        Self {
            tasks,
            config,
            storage,
            clock,
        }
    }

    pub fn tasks(&self) -> &[GroomingTask] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&GroomingTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn global_interval_days(&self) -> u32 {
        self.config.reminder_interval_days
    }

    /// Record a completion now: `last_completed_at` is set and the timestamp
    /// prepended to the task's history.
    pub fn mark_complete(&mut self, id: &str) -> Result<(), TrackerError> {
        let now = self.clock.now();
        let task = self.task_mut(id)?;
        task.last_completed_at = Some(now);
        task.history.insert(0, now);
        self.persist();
        Ok(())
    }

    /// Whole days until the task is due again, never negative. A task
    /// that was never completed is due immediately.
    pub fn days_remaining(&self, task: &GroomingTask) -> i64 {
        let Some(last) = task.last_completed_at else {
            return 0;
        };
        let due = last + Duration::days(i64::from(task.reminder_interval_days));
        let remaining = ceil_days((due - self.clock.now()).num_milliseconds());
        remaining.max(0)
    }

    pub fn status(&self, task: &GroomingTask) -> TaskStatus {
        match self.days_remaining(task) {
            0 => TaskStatus::Overdue,
            days if days <= URGENT_WINDOW_DAYS => TaskStatus::Urgent,
            _ => TaskStatus::Ok,
        }
    }

    /// Set the global reminder interval, clamped to [1, 365]. The new
    /// value cascades to every task, overwriting per-task customizations.
    pub fn set_global_interval(&mut self, days: u32) {
        let days = clamp_reminder_interval(days);
        self.config.reminder_interval_days = days;
        for task in &mut self.tasks {
            task.reminder_interval_days = days;
        }
        self.persist();
    }

    /// Set one task's reminder interval, clamped to [1, 365]. Applies
    /// until the next global change.
    pub fn set_task_interval(&mut self, id: &str, days: u32) -> Result<(), TrackerError> {
        let days = clamp_reminder_interval(days);
        let task = self.task_mut(id)?;
        task.reminder_interval_days = days;
        self.persist();
        Ok(())
    }

    /// Wipe a task's completion history. Irreversible.
    pub fn clear_history(&mut self, id: &str) -> Result<(), TrackerError> {
        let task = self.task_mut(id)?;
        task.history.clear();
        task.last_completed_at = None;
        self.persist();
        Ok(())
    }

    /// Replace the whole collection with the default task set and restore
    /// the global interval. Irreversible, idempotent.
    pub fn reset_all(&mut self) {
        self.tasks = types::default_tasks();
        self.config = GroomingConfig::default();
        self.persist();
    }

    fn task_mut(&mut self, id: &str) -> Result<&mut GroomingTask, TrackerError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TrackerError::TaskNotFound(id.to_string()))
    }

    // Persist to disk (fire and forget): a failed write must not block
    // the in-memory mutation.
    fn persist(&self) {
        if let Err(e) = self.storage.save_tasks(&self.tasks) {
            log::warn!("Failed to save grooming tasks: {}", e);
        }
        if let Err(e) = self.storage.save_grooming_config(&self.config) {
            log::warn!("Failed to save grooming config: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use tempfile::TempDir;

    use crate::clock::test_utils::ManualClock;

    use super::*;

    fn start_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    fn tracker() -> (GroomingTracker, Arc<ManualClock>, TempDir) {
        let dir = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::at(start_time()));
        let tracker = GroomingTracker::load(Storage::at(dir.path()), clock.clone());
        (tracker, clock, dir)
    }

    #[test]
    fn test_never_completed_is_immediately_due() {
        let (tracker, _clock, _dir) = tracker();

        for task in tracker.tasks() {
            assert_eq!(tracker.days_remaining(task), 0);
            assert_eq!(tracker.status(task), TaskStatus::Overdue);
        }
    }

    #[test]
    fn test_mark_complete_starts_a_full_interval() {
        let (mut tracker, _clock, _dir) = tracker();

        tracker.mark_complete("nails").unwrap();

        let task = tracker.task("nails").unwrap();
        assert_eq!(task.last_completed_at, Some(start_time()));
        assert_eq!(task.history, vec![start_time()]);
        assert_eq!(tracker.days_remaining(task), 40);
        assert_eq!(tracker.status(task), TaskStatus::Ok);
    }

    #[test]
    fn test_history_stays_most_recent_first() {
        let (mut tracker, clock, _dir) = tracker();

        tracker.mark_complete("nails").unwrap();
        clock.advance_days(10);
        tracker.mark_complete("nails").unwrap();

        let task = tracker.task("nails").unwrap();
        assert_eq!(task.history.len(), 2);
        assert_eq!(task.history[0], clock.now());
        assert_eq!(task.last_completed_at, Some(task.history[0]));
        assert!(task.history[0] > task.history[1]);
    }

    #[test]
    fn test_days_remaining_uses_ceiling_division() {
        let (mut tracker, clock, _dir) = tracker();

        tracker.mark_complete("nails").unwrap();

        // 39.1 days elapsed of a 40-day interval: 0.9 days left rounds up.
        clock.advance(chrono::Duration::days(39) + chrono::Duration::hours(2));
        let task = tracker.task("nails").unwrap();
        assert_eq!(tracker.days_remaining(task), 1);
    }

    #[test]
    fn test_status_over_the_40_day_window() {
        let (mut tracker, clock, _dir) = tracker();

        tracker.mark_complete("nails").unwrap();

        clock.advance_days(30);
        let task = tracker.task("nails").unwrap();
        assert_eq!(tracker.days_remaining(task), 10);
        assert_eq!(tracker.status(task), TaskStatus::Ok);

        clock.advance_days(9);
        let task = tracker.task("nails").unwrap();
        assert_eq!(tracker.days_remaining(task), 1);
        assert_eq!(tracker.status(task), TaskStatus::Urgent);

        clock.advance_days(2);
        let task = tracker.task("nails").unwrap();
        assert_eq!(tracker.days_remaining(task), 0);
        assert_eq!(tracker.status(task), TaskStatus::Overdue);
    }

    #[test]
    fn test_clear_history_makes_task_due() {
        let (mut tracker, _clock, _dir) = tracker();

        tracker.mark_complete("armpit").unwrap();
        tracker.clear_history("armpit").unwrap();

        let task = tracker.task("armpit").unwrap();
        assert!(task.last_completed_at.is_none());
        assert!(task.history.is_empty());
        assert_eq!(tracker.days_remaining(task), 0);
        assert_eq!(tracker.status(task), TaskStatus::Overdue);
    }

    #[test]
    fn test_unknown_id_is_reported() {
        let (mut tracker, _clock, _dir) = tracker();

        assert!(tracker.mark_complete("beard").unwrap_err().is_not_found());
        assert!(tracker.clear_history("beard").unwrap_err().is_not_found());
        assert!(tracker
            .set_task_interval("beard", 10)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_global_interval_clamps_and_cascades() {
        let (mut tracker, _clock, _dir) = tracker();

        tracker.set_task_interval("nails", 14).unwrap();

        tracker.set_global_interval(9999);
        assert_eq!(tracker.global_interval_days(), 365);
        for task in tracker.tasks() {
            assert_eq!(task.reminder_interval_days, 365);
        }

        tracker.set_global_interval(0);
        assert_eq!(tracker.global_interval_days(), 1);
        for task in tracker.tasks() {
            assert_eq!(task.reminder_interval_days, 1);
        }
    }

    #[test]
    fn test_task_interval_clamps_and_stays_per_task() {
        let (mut tracker, _clock, _dir) = tracker();

        tracker.set_task_interval("mustache", 0).unwrap();
        assert_eq!(
            tracker.task("mustache").unwrap().reminder_interval_days,
            1
        );
        assert_eq!(tracker.task("nails").unwrap().reminder_interval_days, 40);
    }

    #[test]
    fn test_reset_all_is_idempotent() {
        let (mut tracker, _clock, _dir) = tracker();

        tracker.mark_complete("nails").unwrap();
        tracker.set_global_interval(90);

        tracker.reset_all();
        let once = tracker.tasks().to_vec();
        let interval_once = tracker.global_interval_days();

        tracker.reset_all();
        assert_eq!(tracker.tasks(), once.as_slice());
        assert_eq!(tracker.global_interval_days(), interval_once);
        assert_eq!(tracker.tasks(), types::default_tasks().as_slice());
        assert_eq!(interval_once, 40);
    }

    #[test]
    fn test_state_round_trips_through_storage() {
        let dir = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::at(start_time()));

        let mut tracker =
            GroomingTracker::load(Storage::at(dir.path()), clock.clone());
        tracker.mark_complete("nails").unwrap();
        tracker.mark_complete("pubic").unwrap();
        tracker.set_task_interval("pubic", 21).unwrap();
        let saved = tracker.tasks().to_vec();
        let saved_interval = tracker.global_interval_days();
        drop(tracker);

        let reloaded = GroomingTracker::load(Storage::at(dir.path()), clock);
        assert_eq!(reloaded.tasks(), saved.as_slice());
        assert_eq!(reloaded.global_interval_days(), saved_interval);
    }
}
