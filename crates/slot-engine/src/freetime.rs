//! Compute free time from calendar busy intervals.
//!
//! Sorts busy intervals by start, walks them with a running busy-end cursor so
//! overlapping and nested events never open spurious gaps, then keeps only the
//! gaps inside the window that are long enough to hold a reminder.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SchedulerConfig;
use crate::error::{Result, SlotError};
use crate::interval::Interval;

/// Sorted, pairwise disjoint free intervals.
///
/// This is the value callers persist between calls. It is never mutated in
/// place: extraction and reservation each return a new set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Interval>", into = "Vec<Interval>")]
pub struct FreeTimeSet(Vec<Interval>);

impl FreeTimeSet {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Validate intervals read back from storage.
    ///
    /// Requires every interval to be non-empty and each start to be at or
    /// after the previous end. The minimum keep-duration is not re-checked
    /// here since it depends on the config the set was produced with.
    ///
    /// # Errors
    /// Returns `SlotError::UnsortedFreeTime` with the offending index.
    pub fn try_from_intervals(intervals: Vec<Interval>) -> Result<Self> {
        for (index, interval) in intervals.iter().enumerate() {
            if interval.is_empty() {
                return Err(SlotError::UnsortedFreeTime { index });
            }
            if index > 0 && interval.start() < intervals[index - 1].end() {
                return Err(SlotError::UnsortedFreeTime { index });
            }
        }
        Ok(Self(intervals))
    }

    /// Caller guarantees the intervals are sorted, disjoint and non-empty.
    pub(crate) fn from_sorted(intervals: Vec<Interval>) -> Self {
        debug_assert!(Self::try_from_intervals(intervals.clone()).is_ok());
        Self(intervals)
    }

    pub fn as_slice(&self) -> &[Interval] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all interval durations.
    pub fn total_duration(&self) -> Duration {
        self.0
            .iter()
            .fold(Duration::zero(), |acc, interval| acc + interval.duration())
    }

    pub fn into_inner(self) -> Vec<Interval> {
        self.0
    }
}

impl TryFrom<Vec<Interval>> for FreeTimeSet {
    type Error = SlotError;

    fn try_from(intervals: Vec<Interval>) -> Result<Self> {
        Self::try_from_intervals(intervals)
    }
}

impl From<FreeTimeSet> for Vec<Interval> {
    fn from(set: FreeTimeSet) -> Self {
        set.0
    }
}

impl<'a> IntoIterator for &'a FreeTimeSet {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Find the free time inside `[window_start, window_end)` given busy intervals.
///
/// Busy intervals may be unsorted, overlapping, or stick out of the window.
/// Gaps shorter than `config.min_keep_duration` are dropped. A zero-length
/// busy interval still splits the gap it falls in. An empty or inverted
/// window yields an empty set.
pub fn free_time_frames(
    window_start: DateTime<Utc>,
    busy: &[Interval],
    window_end: DateTime<Utc>,
    config: &SchedulerConfig,
) -> FreeTimeSet {
    if window_start >= window_end {
        return FreeTimeSet::empty();
    }

    let mut sorted = busy.to_vec();
    sorted.sort_by_key(|interval| interval.start());

    let mut gaps = Vec::with_capacity(sorted.len() + 1);
    let mut cursor = window_start;

    for interval in &sorted {
        if interval.start() > cursor {
            push_gap(&mut gaps, cursor, interval.start().min(window_end), config);
        }
        cursor = cursor.max(interval.end());
        if cursor >= window_end {
            break;
        }
    }

    // Trailing free time after the last busy period.
    push_gap(&mut gaps, cursor, window_end, config);

    FreeTimeSet::from_sorted(gaps)
}

/// [`free_time_frames`] with the default five-minute minimum.
pub fn free_time_frames_default(
    window_start: DateTime<Utc>,
    busy: &[Interval],
    window_end: DateTime<Utc>,
) -> FreeTimeSet {
    free_time_frames(window_start, busy, window_end, &SchedulerConfig::default())
}

fn push_gap(
    gaps: &mut Vec<Interval>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    config: &SchedulerConfig,
) {
    if end <= start || end - start < config.min_keep_duration {
        return;
    }
    if let Ok(gap) = Interval::new(start, end) {
        gaps.push(gap);
    }
}
