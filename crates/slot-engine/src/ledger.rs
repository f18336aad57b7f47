//! Per-user free-time store persisted as JSON.
//!
//! The on-disk form is a JSON object keyed by user id whose values are arrays
//! of `[start, end]` RFC 3339 pairs:
//!
//! ```json
//! { "user-1": [["2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z"]] }
//! ```
//!
//! A sync overwrites a user's entry; each reservation only shrinks it. The
//! ledger takes `&mut self` for writes, which keeps a single writer per
//! in-memory ledger. Serializing access across processes that share one file
//! is up to the caller.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::config::SchedulerConfig;
use crate::error::{Result, SlotError};
use crate::freetime::{free_time_frames, FreeTimeSet};
use crate::interval::Interval;
use crate::reserve::schedule_and_reserve;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FreeTimeLedger {
    users: BTreeMap<String, FreeTimeSet>,
}

impl FreeTimeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a ledger from JSON. Blank input is an empty ledger.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a ledger file; a missing file is an empty ledger.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "ledger file missing, starting empty");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let ledger = Self::from_json(&raw)?;
        debug!(path = %path.display(), users = ledger.users.len(), "loaded ledger");
        Ok(ledger)
    }

    /// Write the ledger to `path`, replacing any existing file atomically.
    ///
    /// The JSON is staged in a temporary file in the same directory and then
    /// renamed over `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(self.to_json_pretty()?.as_bytes())?;
        staged.as_file().sync_all()?;
        staged.persist(path).map_err(|err| err.error)?;
        debug!(path = %path.display(), users = self.users.len(), "saved ledger");
        Ok(())
    }

    pub fn get(&self, user_id: &str) -> Option<&FreeTimeSet> {
        self.users.get(user_id)
    }

    pub fn remove(&mut self, user_id: &str) -> Option<FreeTimeSet> {
        self.users.remove(user_id)
    }

    pub fn users(&self) -> impl Iterator<Item = &str> {
        self.users.keys().map(String::as_str)
    }

    /// Replace a user's free time with a fresh extraction from busy intervals.
    pub fn sync(
        &mut self,
        user_id: &str,
        window_start: DateTime<Utc>,
        busy: &[Interval],
        window_end: DateTime<Utc>,
        config: &SchedulerConfig,
    ) -> &FreeTimeSet {
        let free = free_time_frames(window_start, busy, window_end, config);
        info!(
            user = user_id,
            busy = busy.len(),
            free = free.len(),
            "synced free time"
        );
        self.users.insert(user_id.to_string(), free);
        &self.users[user_id]
    }

    /// Reserve `num_events` reminder slots from a user's stored free time.
    ///
    /// The user's entry is replaced by the pruned set before returning, so a
    /// slot stays consumed even if delivering its reminder later fails.
    ///
    /// # Errors
    /// Returns `SlotError::UnknownUser` if the user was never synced.
    pub fn reserve(
        &mut self,
        user_id: &str,
        num_events: usize,
        config: &SchedulerConfig,
    ) -> Result<Vec<DateTime<Utc>>> {
        let entry = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| SlotError::UnknownUser(user_id.to_string()))?;

        let reservation = schedule_and_reserve(entry, num_events, config)?;
        if reservation.scheduled.len() < num_events {
            warn!(
                user = user_id,
                requested = num_events,
                scheduled = reservation.scheduled.len(),
                "not enough free time for every requested reminder"
            );
        }
        info!(
            user = user_id,
            scheduled = reservation.scheduled.len(),
            remaining = reservation.free.len(),
            "reserved reminder slots"
        );

        *entry = reservation.free;
        Ok(reservation.scheduled)
    }
}
