//! Scheduling configuration: reminder block length and minimum usable gap.

use chrono::Duration;

use crate::error::{Result, SlotError};

/// Default length of a reminder block and of the smallest kept free gap.
pub const DEFAULT_MINUTES: i64 = 5;

/// Durations that shape free-time extraction and reservation.
///
/// Both values are treated as constants for the lifetime of a call; the
/// engine never stores them between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// How long a scheduled reminder occupies the calendar.
    pub block_duration: Duration,
    /// Free intervals shorter than this are discarded.
    pub min_keep_duration: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            block_duration: Duration::minutes(DEFAULT_MINUTES),
            min_keep_duration: Duration::minutes(DEFAULT_MINUTES),
        }
    }
}

impl SchedulerConfig {
    /// Build a config, rejecting zero or negative durations.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidDuration` if either duration is not positive.
    pub fn new(block_duration: Duration, min_keep_duration: Duration) -> Result<Self> {
        if block_duration <= Duration::zero() {
            return Err(SlotError::InvalidDuration(format!(
                "block duration must be positive, got {block_duration}"
            )));
        }
        if min_keep_duration <= Duration::zero() {
            return Err(SlotError::InvalidDuration(format!(
                "minimum keep duration must be positive, got {min_keep_duration}"
            )));
        }
        Ok(Self {
            block_duration,
            min_keep_duration,
        })
    }

    /// Convenience constructor taking whole minutes.
    pub fn from_minutes(block_minutes: u32, min_keep_minutes: u32) -> Result<Self> {
        Self::new(
            Duration::minutes(i64::from(block_minutes)),
            Duration::minutes(i64::from(min_keep_minutes)),
        )
    }
}
