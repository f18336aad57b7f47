//! Spread reminder instants evenly across free time.
//!
//! Spacing is measured in cumulative *free* time, not wall-clock time, so busy
//! periods are skipped entirely and longer free intervals receive
//! proportionally more reminders.

use chrono::{DateTime, Duration, Utc};

use crate::freetime::FreeTimeSet;

/// Place `num_events` instants evenly by cumulative free duration.
///
/// The target offset of event `i` is `total * i / num_events` (in whole
/// nanoseconds), located by walking the free intervals in order. The first
/// instant is always the start of the first free interval, instants are
/// non-decreasing, and each lies inside `[start, end)` of some free interval.
///
/// Returns an empty list for `num_events == 0` or an empty set. If the walk
/// runs off the end of the set, the instants placed so far are returned.
pub fn schedule_events_evenly(free: &FreeTimeSet, num_events: usize) -> Vec<DateTime<Utc>> {
    if num_events == 0 || free.is_empty() {
        return Vec::new();
    }

    let lengths: Vec<i128> = free.iter().map(|interval| nanos(interval.duration())).collect();
    let total: i128 = lengths.iter().sum();
    let count = num_events as i128;
    // floor(total * i / count) without multiplying `total` by `i`.
    let (step, remainder) = (total / count, total % count);

    let mut scheduled = Vec::with_capacity(num_events);
    let mut consumed: i128 = 0;
    let mut idx = 0;

    for i in 0..count {
        let target = step * i + remainder * i / count;

        while idx < lengths.len() && consumed + lengths[idx] <= target {
            consumed += lengths[idx];
            idx += 1;
        }
        if idx >= lengths.len() {
            break;
        }

        scheduled.push(free.as_slice()[idx].start() + from_nanos(target - consumed));
    }

    scheduled
}

const NANOS_PER_SEC: i128 = 1_000_000_000;

fn nanos(duration: Duration) -> i128 {
    i128::from(duration.num_seconds()) * NANOS_PER_SEC + i128::from(duration.subsec_nanos())
}

/// Inverse of [`nanos`] for offsets shorter than an existing interval.
fn from_nanos(nanos: i128) -> Duration {
    Duration::seconds((nanos / NANOS_PER_SEC) as i64)
        + Duration::nanoseconds((nanos % NANOS_PER_SEC) as i64)
}
