use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Default reminder interval for grooming tasks, in days.
pub const DEFAULT_REMINDER_INTERVAL_DAYS: u32 = 40;

/// Valid reminder interval range, in days.
pub const REMINDER_INTERVAL_MIN_DAYS: u32 = 1;
pub const REMINDER_INTERVAL_MAX_DAYS: u32 = 365;

/// Tasks due within this many days are flagged urgent. Not configurable.
pub const URGENT_WINDOW_DAYS: i64 = 5;

/// Default cycle configuration, in days.
pub const DEFAULT_CYCLE_LENGTH_DAYS: u32 = 28;
pub const DEFAULT_PERIOD_LENGTH_DAYS: u32 = 5;

/// Valid cycle/period length ranges, in days.
pub const CYCLE_LENGTH_MIN_DAYS: u32 = 21;
pub const CYCLE_LENGTH_MAX_DAYS: u32 = 45;
pub const PERIOD_LENGTH_MIN_DAYS: u32 = 2;
pub const PERIOD_LENGTH_MAX_DAYS: u32 = 10;

/// A recurring grooming task with its completion history.
///
/// Invariant: `history` is ordered most-recent-first, is empty iff
/// `last_completed_at` is `None`, and `history[0] == last_completed_at` whenever
/// non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroomingTask {
    pub id: String,
    pub title: String,
    pub arabic_title: String,
    pub last_completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub history: Vec<DateTime<Utc>>,
    #[serde(default = "default_reminder_interval")]
    pub reminder_interval_days: u32,
}

/// Derived reminder status for a grooming task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Overdue,
    Urgent,
    Ok,
}

/// A logged menstrual period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleEntry {
    pub id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Classified stage of the tracked cycle, derived from elapsed days since
/// the last recorded start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePhase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
}

/// Grooming tracker configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroomingConfig {
    #[serde(default = "default_reminder_interval")]
    pub reminder_interval_days: u32,
}

impl Default for GroomingConfig {
    fn default() -> Self {
        Self {
            reminder_interval_days: DEFAULT_REMINDER_INTERVAL_DAYS,
        }
    }
}

/// Cycle tracker configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleConfig {
    #[serde(default = "default_cycle_length")]
    pub cycle_length_days: u32,
    #[serde(default = "default_period_length")]
    pub period_length_days: u32,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            cycle_length_days: DEFAULT_CYCLE_LENGTH_DAYS,
            period_length_days: DEFAULT_PERIOD_LENGTH_DAYS,
        }
    }
}

/// Opt-in flag and day-keyed rate limit for the reminder check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationState {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub last_checked: Option<NaiveDate>,
}

fn default_reminder_interval() -> u32 {
    DEFAULT_REMINDER_INTERVAL_DAYS
}

fn default_cycle_length() -> u32 {
    DEFAULT_CYCLE_LENGTH_DAYS
}

fn default_period_length() -> u32 {
    DEFAULT_PERIOD_LENGTH_DAYS
}

/// Clamp a reminder interval to its valid range.
pub fn clamp_reminder_interval(days: u32) -> u32 {
    days.clamp(REMINDER_INTERVAL_MIN_DAYS, REMINDER_INTERVAL_MAX_DAYS)
}

/// Clamp a cycle length to its valid range.
pub fn clamp_cycle_length(days: u32) -> u32 {
    days.clamp(CYCLE_LENGTH_MIN_DAYS, CYCLE_LENGTH_MAX_DAYS)
}

/// Clamp a period length to its valid range.
pub fn clamp_period_length(days: u32) -> u32 {
    days.clamp(PERIOD_LENGTH_MIN_DAYS, PERIOD_LENGTH_MAX_DAYS)
}

/// The fixed default task set, installed on first run and by reset.
pub fn default_tasks() -> Vec<GroomingTask> {
    let task = |id: &str, title: &str, arabic_title: &str| GroomingTask {
        id: id.to_string(),
        title: title.to_string(),
        arabic_title: arabic_title.to_string(),
        last_completed_at: None,
        history: Vec::new(),
        reminder_interval_days: DEFAULT_REMINDER_INTERVAL_DAYS,
    };

    vec![
        task("nails", "Trim Nails", "تقليم الأظافر"),
        task("armpit", "Armpit Hair", "نتف الإبط"),
        task("pubic", "Pubic Hair", "حلق العانة"),
        task("mustache", "Trim Mustache", "قص الشارب"),
    ]
}
