//! Closed-open time intervals and the primitive set operations on them.
//!
//! An [`Interval`] is `[start, end)` with `start <= end`. The two primitives
//! here, [`subtract_one`] and [`merge_intervals`], are the building blocks the
//! reservation updater uses to carve reminder blocks out of free time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// A closed-open time range `[start, end)`.
///
/// Serialized as a two-element array of RFC 3339 timestamps. Deserialization
/// also accepts an object with `start` and `end` fields, and rejects intervals
/// whose end precedes their start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval", into = "(DateTime<Utc>, DateTime<Utc>)")]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInterval {
    Pair(DateTime<Utc>, DateTime<Utc>),
    Fields {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl TryFrom<RawInterval> for Interval {
    type Error = SlotError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        match raw {
            RawInterval::Pair(start, end) | RawInterval::Fields { start, end } => {
                Interval::new(start, end)
            }
        }
    }
}

impl From<Interval> for (DateTime<Utc>, DateTime<Utc>) {
    fn from(interval: Interval) -> Self {
        (interval.start, interval.end)
    }
}

impl Interval {
    /// Create an interval, rejecting `end < start`.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidInterval` when the end precedes the start.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end < start {
            return Err(SlotError::InvalidInterval {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    /// The block `[start, start + length)`.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidDuration` for a negative length and
    /// `SlotError::InstantOutOfRange` if the end is not representable.
    pub fn starting_at(start: DateTime<Utc>, length: Duration) -> Result<Self> {
        if length < Duration::zero() {
            return Err(SlotError::InvalidDuration(format!(
                "interval length must not be negative, got {length}"
            )));
        }
        let end = start.checked_add_signed(length).ok_or_else(|| {
            SlotError::InstantOutOfRange(format!("{} + {}", start.to_rfc3339(), length))
        })?;
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// `true` when `instant` lies in `[start, end)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Closed-open overlap test. Intervals that merely touch do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Remove `block` from `interval`, returning the 0, 1 or 2 remaining pieces.
///
/// Pieces come back in chronological order. No zero-length filtering happens
/// here; that is left to the caller.
pub fn subtract_one(interval: &Interval, block: &Interval) -> Vec<Interval> {
    let (s, e) = (interval.start, interval.end);
    let (a, b) = (block.start, block.end);

    if b <= s || a >= e {
        return vec![*interval];
    }
    if a <= s && b >= e {
        return Vec::new();
    }
    if a <= s {
        // Block clips the head.
        return vec![Interval { start: b, end: e }];
    }
    if b >= e {
        // Block clips the tail.
        return vec![Interval { start: s, end: a }];
    }
    vec![Interval { start: s, end: a }, Interval { start: b, end: e }]
}

/// Merge overlapping or touching intervals.
///
/// Sorting is stable, so intervals sharing a start keep their input order.
/// The result is sorted and pairwise disjoint with no touching neighbours.
pub fn merge_intervals(intervals: &[Interval]) -> Vec<Interval> {
    let mut sorted = intervals.to_vec();
    sorted.sort_by_key(|interval| interval.start);

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for next in sorted {
        if let Some(running) = merged.last_mut() {
            if next.start <= running.end {
                running.end = running.end.max(next.end);
                continue;
            }
        }
        merged.push(next);
    }
    merged
}
