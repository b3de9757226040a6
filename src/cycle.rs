//! Menstrual cycle tracker: logged periods and derived predictions.
//!
//! Entries are kept sorted descending by start date after every insert or
//! update, so `entries[0]` is always the most recent period. Predictions
//! are wall-clock arithmetic over the configured cycle/period lengths;
//! unlike the grooming tracker, days-until-next is not floored at zero so
//! callers can distinguish an overdue cycle.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::clock::Clock;
use crate::storage::Storage;
use crate::types::{
    clamp_cycle_length, clamp_period_length, CycleConfig, CycleEntry, CyclePhase,
};
use crate::util::{ceil_days, floor_days};

pub struct CycleTracker {
    entries: Vec<CycleEntry>,
    config: CycleConfig,
    storage: Storage,
    clock: Arc<dyn Clock>,
}

impl CycleTracker {
    /// Load tracker state from storage. Entries are re-sorted on load so
    /// the descending-by-start invariant holds even for hand-edited files.
    pub fn load(storage: Storage, clock: Arc<dyn Clock>) -> Self {
        let mut entries = storage.load_cycle_entries();
        entries.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        let config = storage.load_cycle_config();
        Self {
            entries,
            config,
            storage,
            clock,
        }
    }

    /// Entries sorted descending by start date.
    pub fn entries(&self) -> &[CycleEntry] {
        &self.entries
    }

    pub fn cycle_length_days(&self) -> u32 {
        self.config.cycle_length_days
    }

    pub fn period_length_days(&self) -> u32 {
        self.config.period_length_days
    }

    /// Log a period. Duplicate or future start dates are the caller's
    /// responsibility to reject. Returns the new entry's id.
    pub fn add_period(
        &mut self,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
    ) -> String {
        let id = self.next_entry_id();
        self.entries.push(CycleEntry {
            id: id.clone(),
            start_date,
            end_date,
        });
        self.sort_entries();
        self.persist();
        id
    }

    /// Replace an entry's dates. Silent no-op on unknown id.
    pub fn update_period(
        &mut self,
        id: &str,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
    ) {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            log::debug!("update_period: no entry with id {}", id);
            return;
        };
        entry.start_date = start_date;
        entry.end_date = end_date;
        self.sort_entries();
        self.persist();
    }

    /// Remove an entry. No-op if absent.
    pub fn delete_period(&mut self, id: &str) {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() != before {
            self.persist();
        }
    }

    /// Predicted start of the next period: last start plus the configured
    /// cycle length. `None` when nothing has been logged.
    pub fn next_predicted_start(&self) -> Option<DateTime<Utc>> {
        let last = self.entries.first()?;
        Some(last.start_date + Duration::days(i64::from(self.config.cycle_length_days)))
    }

    /// Whole days until the predicted next start. Negative when the
    /// prediction has already passed.
    pub fn days_until_next(&self) -> Option<i64> {
        let next = self.next_predicted_start()?;
        Some(ceil_days((next - self.clock.now()).num_milliseconds()))
    }

    /// Classify the current phase from elapsed days since the last start.
    /// `None` when nothing is logged, the last start is in the future, or
    /// the cycle has run past its expected length.
    pub fn current_phase(&self) -> Option<CyclePhase> {
        let last = self.entries.first()?;
        let days_since =
            floor_days((self.clock.now() - last.start_date).num_milliseconds());
        if days_since < 0 {
            return None;
        }

        // The follicular/ovulation boundaries sit at the real-valued cycle
        // midpoint, so an odd cycle length splits on a half day.
        let midpoint = f64::from(self.config.cycle_length_days) / 2.0;
        if days_since < i64::from(self.config.period_length_days) {
            Some(CyclePhase::Menstrual)
        } else if (days_since as f64) < midpoint - 2.0 {
            Some(CyclePhase::Follicular)
        } else if (days_since as f64) < midpoint + 2.0 {
            Some(CyclePhase::Ovulation)
        } else if days_since < i64::from(self.config.cycle_length_days) {
            Some(CyclePhase::Luteal)
        } else {
            None
        }
    }

    /// Rolling average of day gaps between consecutive starts, rounded to
    /// the nearest whole day. Requires at least two entries.
    pub fn average_cycle_length(&self) -> Option<i64> {
        if self.entries.len() < 2 {
            return None;
        }

        let mut total_days = 0i64;
        for pair in self.entries.windows(2) {
            let gap = (pair[0].start_date - pair[1].start_date).num_milliseconds();
            total_days += floor_days(gap);
        }

        let gaps = (self.entries.len() - 1) as f64;
        Some((total_days as f64 / gaps).round() as i64)
    }

    /// Set the expected cycle length, clamped to [21, 45].
    pub fn set_cycle_length(&mut self, days: u32) {
        self.config.cycle_length_days = clamp_cycle_length(days);
        self.persist();
    }

    /// Set the expected period length, clamped to [2, 10].
    pub fn set_period_length(&mut self, days: u32) {
        self.config.period_length_days = clamp_period_length(days);
        self.persist();
    }

    /// Clear all entries and restore both lengths to their defaults.
    /// Irreversible, idempotent.
    pub fn reset_all(&mut self) {
        self.entries.clear();
        self.config = CycleConfig::default();
        self.persist();
    }

    // Time-based id: millisecond timestamp of creation, bumped past any
    // existing id minted in the same millisecond.
    fn next_entry_id(&self) -> String {
        let mut millis = self.clock.now().timestamp_millis();
        while self.entries.iter().any(|e| e.id == millis.to_string()) {
            millis += 1;
        }
        millis.to_string()
    }

    fn sort_entries(&mut self) {
        self.entries.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    }

    // Persist to disk (fire and forget), same contract as the grooming
    // tracker.
    fn persist(&self) {
        if let Err(e) = self.storage.save_cycle_entries(&self.entries) {
            log::warn!("Failed to save cycle entries: {}", e);
        }
        if let Err(e) = self.storage.save_cycle_config(&self.config) {
            log::warn!("Failed to save cycle config: {}", e);
        }
    }
}
