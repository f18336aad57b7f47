//! Tests for free-time extraction from busy intervals.

use chrono::{DateTime, Duration, TimeZone, Utc};
use slot_engine::{
    free_time_frames, free_time_frames_default, FreeTimeSet, Interval, SchedulerConfig, SlotError,
};

/// D0: the start of every scenario window.
fn d0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap()
}

fn hours(h: i64) -> DateTime<Utc> {
    d0() + Duration::hours(h)
}

fn minutes(m: i64) -> DateTime<Utc> {
    d0() + Duration::minutes(m)
}

fn busy(start: DateTime<Utc>, end: DateTime<Utc>) -> Interval {
    Interval::new(start, end).unwrap()
}

fn pairs(set: &FreeTimeSet) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    set.iter().map(|i| (i.start(), i.end())).collect()
}

#[test]
fn no_busy_intervals_whole_week_is_free() {
    let end = d0() + Duration::days(7);
    let free = free_time_frames_default(d0(), &[], end);

    assert_eq!(pairs(&free), vec![(d0(), end)]);
}

#[test]
fn single_busy_interval_splits_the_day() {
    let free = free_time_frames_default(d0(), &[busy(hours(2), hours(3))], hours(24));

    assert_eq!(pairs(&free), vec![(d0(), hours(2)), (hours(3), hours(24))]);
}

#[test]
fn overlapping_busy_intervals_leave_no_gap() {
    let events = vec![busy(hours(1), hours(3)), busy(hours(2), hours(4))];
    let free = free_time_frames_default(d0(), &events, hours(5));

    assert_eq!(pairs(&free), vec![(d0(), hours(1)), (hours(4), hours(5))]);
}

#[test]
fn nested_busy_interval_does_not_reopen_time() {
    // 01:00-05:00 swallows 02:00-03:00 even though the inner one sorts later.
    let events = vec![busy(hours(2), hours(3)), busy(hours(1), hours(5))];
    let free = free_time_frames_default(d0(), &events, hours(6));

    assert_eq!(pairs(&free), vec![(d0(), hours(1)), (hours(5), hours(6))]);
}

#[test]
fn three_minute_gap_is_dropped() {
    let events = vec![busy(minutes(60), minutes(120)), busy(minutes(123), minutes(180))];
    let free = free_time_frames_default(d0(), &events, minutes(240));

    assert_eq!(
        pairs(&free),
        vec![(d0(), minutes(60)), (minutes(180), minutes(240))]
    );
}

#[test]
fn exactly_minimum_gap_is_kept() {
    let events = vec![busy(minutes(0), minutes(60)), busy(minutes(65), minutes(120))];
    let free = free_time_frames_default(d0(), &events, minutes(120));

    assert_eq!(pairs(&free), vec![(minutes(60), minutes(65))]);
}

#[test]
fn unsorted_input_is_handled() {
    let events = vec![
        busy(hours(15), hours(16)),
        busy(hours(9), hours(10)),
        busy(hours(12), hours(13)),
    ];
    let free = free_time_frames_default(hours(8), &events, hours(18));

    assert_eq!(
        pairs(&free),
        vec![
            (hours(8), hours(9)),
            (hours(10), hours(12)),
            (hours(13), hours(15)),
            (hours(16), hours(18)),
        ]
    );
}

#[test]
fn busy_filling_entire_window_leaves_nothing() {
    let free = free_time_frames_default(hours(9), &[busy(hours(9), hours(12))], hours(12));
    assert!(free.is_empty());
}

#[test]
fn inverted_window_is_empty() {
    assert!(free_time_frames_default(hours(5), &[], hours(5)).is_empty());
    assert!(free_time_frames_default(hours(6), &[], hours(5)).is_empty());
}

#[test]
fn busy_outside_window_is_clipped() {
    // Starts before the window and another ends after it.
    let events = vec![
        busy(hours(-3), hours(-2)),
        busy(hours(-1), hours(1)),
        busy(hours(7), hours(30)),
        busy(hours(40), hours(41)),
    ];
    let free = free_time_frames_default(d0(), &events, hours(8));

    assert_eq!(pairs(&free), vec![(hours(1), hours(7))]);
}

#[test]
fn busy_entirely_after_window_is_ignored() {
    let free = free_time_frames_default(d0(), &[busy(hours(10), hours(11))], hours(2));
    assert_eq!(pairs(&free), vec![(d0(), hours(2))]);
}

#[test]
fn custom_minimum_keep_duration() {
    let config = SchedulerConfig::from_minutes(5, 30).unwrap();
    let events = vec![busy(minutes(0), minutes(60)), busy(minutes(80), minutes(120))];
    let free = free_time_frames(d0(), &events, minutes(180), &config);

    assert_eq!(pairs(&free), vec![(minutes(120), minutes(180))]);
}

#[test]
fn short_window_with_no_busy_is_filtered() {
    let free = free_time_frames_default(d0(), &[], minutes(4));
    assert!(free.is_empty());
}

#[test]
fn free_time_set_roundtrips_through_json() {
    let free = free_time_frames_default(d0(), &[busy(hours(2), hours(3))], hours(24));
    let json = serde_json::to_string(&free).unwrap();

    assert_eq!(
        json,
        r#"[["2026-03-02T00:00:00Z","2026-03-02T02:00:00Z"],["2026-03-02T03:00:00Z","2026-03-03T00:00:00Z"]]"#
    );
    let back: FreeTimeSet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, free);
}

#[test]
fn stored_set_must_be_sorted() {
    let intervals = vec![busy(hours(3), hours(4)), busy(hours(1), hours(2))];
    let err = FreeTimeSet::try_from_intervals(intervals).unwrap_err();
    assert!(matches!(err, SlotError::UnsortedFreeTime { index: 1 }));
}

#[test]
fn stored_set_rejects_overlap_and_empty_members() {
    let overlapping = vec![busy(hours(1), hours(3)), busy(hours(2), hours(4))];
    assert!(FreeTimeSet::try_from_intervals(overlapping).is_err());

    let empty_member = vec![busy(hours(1), hours(1))];
    assert!(FreeTimeSet::try_from_intervals(empty_member).is_err());

    let json = r#"[["2026-03-02T03:00:00Z","2026-03-02T04:00:00Z"],["2026-03-02T01:00:00Z","2026-03-02T02:00:00Z"]]"#;
    assert!(serde_json::from_str::<FreeTimeSet>(json).is_err());
}

#[test]
fn total_duration_sums_intervals() {
    let free = free_time_frames_default(d0(), &[busy(hours(2), hours(3))], hours(24));
    assert_eq!(free.total_duration(), Duration::hours(23));
}

#[test]
fn zero_length_busy_interval_drops_short_leading_gap() {
    // The gap before 00:03 is only three minutes and is filtered on its own.
    let free = free_time_frames_default(d0(), &[busy(minutes(3), minutes(3))], minutes(60));
    assert_eq!(pairs(&free), vec![(minutes(3), minutes(60))]);
}

#[test]
fn zero_length_busy_interval_splits_free_time() {
    let free = free_time_frames_default(d0(), &[busy(minutes(30), minutes(30))], minutes(60));
    assert_eq!(
        pairs(&free),
        vec![(d0(), minutes(30)), (minutes(30), minutes(60))]
    );
}
