//! JSON-file persistence for tracker state.
//!
//! Five logically independent records live under the state root (default
//! `~/.preen/`): the task collection, the grooming config, the cycle
//! entries, the cycle config, and the notification state. Each record is
//! loaded once at tracker construction and rewritten after every mutation.
//!
//! Loading is never fatal: a missing record yields the documented
//! defaults, and malformed content is replaced with defaults behind a
//! `log::warn!` diagnostic.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::TrackerError;
use crate::types::{self, CycleConfig, CycleEntry, GroomingConfig, GroomingTask, NotificationState};

const TASKS_FILE: &str = "grooming_tasks.json";
const GROOMING_CONFIG_FILE: &str = "grooming_config.json";
const CYCLE_ENTRIES_FILE: &str = "cycle_entries.json";
const CYCLE_CONFIG_FILE: &str = "cycle_config.json";
const NOTIFICATIONS_FILE: &str = "notifications.json";

/// Handle to the on-disk state directory.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Storage rooted at an explicit directory. Tests point this at a
    /// tempdir; nothing is created until the first write.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Storage at the canonical per-user state directory (`~/.preen`).
    pub fn at_default() -> Result<Self, TrackerError> {
        let home = dirs::home_dir()
            .ok_or_else(|| TrackerError::Io("Could not find home directory".to_string()))?;
        Ok(Self::at(home.join(".preen")))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn load_tasks(&self) -> Vec<GroomingTask> {
        self.load_or(TASKS_FILE, types::default_tasks)
    }

    pub fn save_tasks(&self, tasks: &[GroomingTask]) -> Result<(), TrackerError> {
        self.save(TASKS_FILE, &tasks)
    }

    pub fn load_grooming_config(&self) -> GroomingConfig {
        self.load_or(GROOMING_CONFIG_FILE, GroomingConfig::default)
    }

    pub fn save_grooming_config(&self, config: &GroomingConfig) -> Result<(), TrackerError> {
        self.save(GROOMING_CONFIG_FILE, config)
    }

    pub fn load_cycle_entries(&self) -> Vec<CycleEntry> {
        self.load_or(CYCLE_ENTRIES_FILE, Vec::new)
    }

    pub fn save_cycle_entries(&self, entries: &[CycleEntry]) -> Result<(), TrackerError> {
        self.save(CYCLE_ENTRIES_FILE, &entries)
    }

    pub fn load_cycle_config(&self) -> CycleConfig {
        self.load_or(CYCLE_CONFIG_FILE, CycleConfig::default)
    }

    pub fn save_cycle_config(&self, config: &CycleConfig) -> Result<(), TrackerError> {
        self.save(CYCLE_CONFIG_FILE, config)
    }

    pub fn load_notification_state(&self) -> NotificationState {
        self.load_or(NOTIFICATIONS_FILE, NotificationState::default)
    }

    pub fn save_notification_state(&self, state: &NotificationState) -> Result<(), TrackerError> {
        self.save(NOTIFICATIONS_FILE, state)
    }

    fn load_or<T: DeserializeOwned>(&self, file: &str, fallback: impl FnOnce() -> T) -> T {
        let path = self.root.join(file);
        if !path.exists() {
            return fallback();
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Failed to read {}: {}. Using defaults.", path.display(), e);
                return fallback();
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                fallback()
            }
        }
    }

    fn save<T: Serialize>(&self, file: &str, value: &T) -> Result<(), TrackerError> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }

        let content = serde_json::to_string_pretty(value)?;
        fs::write(self.root.join(file), content)?;
        Ok(())
    }
}
