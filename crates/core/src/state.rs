//! Counter and cooldown persistence.
//!
//! Whole-file reads and writes of two tiny plain-text files, sized for a
//! single-process cron job. `counter.txt` holds the counter and, on a second
//! line, the id of the last published tweet. `rate_limit_failure.txt` holds
//! the RFC 3339 timestamp of the last rate-limit signal.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};

/// File name of the counter state, relative to the state directory.
pub const COUNTER_FILE: &str = "counter.txt";

/// File name of the rate-limit cooldown marker.
pub const RATE_LIMIT_FILE: &str = "rate_limit_failure.txt";

/// Counter value a fresh deployment starts from.
pub const DEFAULT_COUNTER: i64 = 1;

/// Error type for state persistence operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("state io error: {0}")]
    Io(#[from] std::io::Error),
}

/// State carried between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedState {
    pub counter: i64,
    /// Id of the tweet published for `counter`, when known. Primary
    /// reference for locating the anchor post across restarts.
    pub last_post_id: Option<String>,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            counter: DEFAULT_COUNTER,
            last_post_id: None,
        }
    }
}

/// Reads and writes the two state files inside one directory.
#[derive(Debug, Clone)]
pub struct StateStore {
    counter_path: PathBuf,
    rate_limit_path: PathBuf,
}

impl StateStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            counter_path: dir.join(COUNTER_FILE),
            rate_limit_path: dir.join(RATE_LIMIT_FILE),
        }
    }

    /// Path of the counter file, for operator-facing messages.
    pub fn counter_path(&self) -> &Path {
        &self.counter_path
    }

    /// Read the persisted counter state.
    ///
    /// Fails soft: a missing or unparsable file yields the default state so
    /// a fresh checkout can run. A parsable but out-of-range value is
    /// returned as-is; rejecting it is the caller's decision.
    pub fn read_state(&self) -> PersistedState {
        let Ok(content) = fs::read_to_string(&self.counter_path) else {
            return PersistedState::default();
        };

        let mut lines = content.lines();
        let Some(counter) = lines.next().and_then(|line| line.trim().parse::<i64>().ok()) else {
            return PersistedState::default();
        };
        let last_post_id = lines
            .next()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string);

        PersistedState {
            counter,
            last_post_id,
        }
    }

    /// Write the persisted counter state.
    ///
    /// Fails hard: I/O errors propagate so the caller can tell "published
    /// but not persisted" apart from success.
    pub fn write_state(&self, state: &PersistedState) -> Result<(), StateError> {
        let mut content = state.counter.to_string();
        if let Some(id) = &state.last_post_id {
            content.push('\n');
            content.push_str(id);
        }
        content.push('\n');
        fs::write(&self.counter_path, content)?;
        Ok(())
    }

    /// Timestamp of the last rate-limit signal, if one is recorded.
    /// An unreadable or malformed marker is treated as absent.
    pub fn read_cooldown(&self) -> Option<DateTime<Utc>> {
        let content = fs::read_to_string(&self.rate_limit_path).ok()?;
        DateTime::parse_from_rfc3339(content.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Record that the platform reported rate limiting at `observed_at`.
    pub fn write_cooldown(&self, observed_at: DateTime<Utc>) -> Result<(), StateError> {
        fs::write(&self.rate_limit_path, observed_at.to_rfc3339())?;
        Ok(())
    }

    /// Remove the cooldown marker. A missing marker is not an error.
    pub fn clear_cooldown(&self) -> Result<(), StateError> {
        match fs::remove_file(&self.rate_limit_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Time left inside the cooldown window, or `None` when no marker is
    /// recorded or the window has elapsed. Clearing an elapsed marker is the
    /// caller's job.
    pub fn cooldown_remaining(&self, now: DateTime<Utc>, window: Duration) -> Option<Duration> {
        let observed_at = self.read_cooldown()?;
        let elapsed = now - observed_at;
        if elapsed < window {
            Some(window - elapsed)
        } else {
            None
        }
    }
}
