//! Heartbeat record: run statistics persisted as JSON.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Deserializer, Serialize};

use crate::time::unix_secs;

use super::PersistenceError;
use super::file::write_atomically;

const SECS_PER_DAY: u64 = 86_400;

/// Diagnostic statistics about past checks.
///
/// All timestamps are Unix seconds. Fractional timestamps are accepted on
/// load and truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartbeatRecord {
    /// Start of the current heartbeat period
    #[serde(deserialize_with = "whole_secs")]
    pub start_time: u64,

    /// Most recent completed check
    #[serde(default, deserialize_with = "whole_secs")]
    pub last_check: u64,

    /// Most recent detected address change
    #[serde(deserialize_with = "whole_secs")]
    pub last_ip_change: u64,

    /// Number of address changes since the record was created
    pub ip_change_count: u64,
}

impl HeartbeatRecord {
    /// Creates a record for a first run at `now`.
    #[must_use]
    pub fn fresh(now: SystemTime) -> Self {
        let secs = unix_secs(now);
        Self {
            start_time: secs,
            last_check: secs,
            last_ip_change: secs,
            ip_change_count: 0,
        }
    }

    /// Returns true once `interval` has passed since `start_time`.
    #[must_use]
    pub fn is_due(&self, now: SystemTime, interval: Duration) -> bool {
        unix_secs(now).saturating_sub(self.start_time) >= interval.as_secs()
    }

    /// Whole days since `start_time`.
    #[must_use]
    pub fn days_running(&self, now: SystemTime) -> u64 {
        unix_secs(now).saturating_sub(self.start_time) / SECS_PER_DAY
    }

    /// Whole days since the last address change.
    #[must_use]
    pub fn days_since_change(&self, now: SystemTime) -> u64 {
        unix_secs(now).saturating_sub(self.last_ip_change) / SECS_PER_DAY
    }

    /// Starts a new heartbeat period at `now`.
    pub fn restart_period(&mut self, now: SystemTime) {
        self.start_time = unix_secs(now);
    }

    /// Records a completed check at `now`.
    pub fn record_check(&mut self, now: SystemTime) {
        self.last_check = unix_secs(now);
    }

    /// Records an address change at `now`.
    pub fn record_change(&mut self, now: SystemTime) {
        self.last_ip_change = unix_secs(now);
        self.ip_change_count += 1;
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Timestamp {
    Whole(u64),
    Fractional(f64),
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_secs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match Timestamp::deserialize(deserializer)? {
        Timestamp::Whole(secs) => Ok(secs),
        // Saturating cast: negative and NaN become 0
        Timestamp::Fractional(secs) => Ok(secs as u64),
    }
}

/// JSON file holding the [`HeartbeatRecord`].
#[derive(Debug, Clone)]
pub struct HeartbeatStore {
    path: PathBuf,
}

impl HeartbeatStore {
    /// Creates a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the heartbeat file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the record, starting a fresh one if the file is missing or unreadable.
    ///
    /// The record is diagnostic only, so problems are logged rather than returned.
    #[must_use]
    pub fn load_or_fresh(&self, now: SystemTime) -> HeartbeatRecord {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return HeartbeatRecord::fresh(now),
            Err(e) => {
                tracing::warn!(
                    "Cannot read heartbeat file '{}' ({e}), starting fresh",
                    self.path.display()
                );
                return HeartbeatRecord::fresh(now);
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(
                "Heartbeat file '{}' is invalid ({e}), starting fresh",
                self.path.display()
            );
            HeartbeatRecord::fresh(now)
        })
    }

    /// Writes the record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized or written.
    pub fn save(&self, record: &HeartbeatRecord) -> Result<(), PersistenceError> {
        let content = serde_json::to_string_pretty(record).map_err(PersistenceError::Serialize)?;
        write_atomically(&self.path, &content).map_err(|source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
