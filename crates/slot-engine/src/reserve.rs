//! Reserve reminder blocks against a free-time set.
//!
//! Each scheduled instant consumes `[t, t + block_duration)`. Blocks are
//! subtracted one at a time, the working set is re-merged after each block,
//! and sub-minimum leftovers are pruned at the end.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SchedulerConfig;
use crate::error::Result;
use crate::freetime::FreeTimeSet;
use crate::interval::{merge_intervals, subtract_one, Interval};
use crate::scheduler::schedule_events_evenly;

/// Outcome of [`schedule_and_reserve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    /// Instants chosen for the new reminders, in chronological order.
    pub scheduled: Vec<DateTime<Utc>>,
    /// Free time left after every reminder block was removed.
    pub free: FreeTimeSet,
}

/// Subtract a `config.block_duration` block at each instant from `free`.
///
/// # Errors
/// Returns `SlotError::InstantOutOfRange` if a block end overflows.
pub fn remove_scheduled_blocks(
    free: &FreeTimeSet,
    scheduled: &[DateTime<Utc>],
    config: &SchedulerConfig,
) -> Result<FreeTimeSet> {
    let mut current: Vec<Interval> = free.as_slice().to_vec();

    for &instant in scheduled {
        let block = Interval::starting_at(instant, config.block_duration)?;
        let pieces: Vec<Interval> = current
            .iter()
            .flat_map(|interval| subtract_one(interval, &block))
            .filter(|piece| !piece.is_empty())
            .collect();
        current = merge_intervals(&pieces);
    }

    current.retain(|interval| interval.duration() >= config.min_keep_duration);
    Ok(FreeTimeSet::from_sorted(current))
}

/// Schedule `num_events` reminders evenly and reserve a block for each.
///
/// The returned free-time set is what the caller should persist. Nothing is
/// rolled back if a reminder later fails to deliver.
///
/// # Errors
/// Returns `SlotError::InstantOutOfRange` if a block end overflows.
pub fn schedule_and_reserve(
    free: &FreeTimeSet,
    num_events: usize,
    config: &SchedulerConfig,
) -> Result<Reservation> {
    let scheduled = schedule_events_evenly(free, num_events);
    let free = remove_scheduled_blocks(free, &scheduled, config)?;
    Ok(Reservation { scheduled, free })
}
