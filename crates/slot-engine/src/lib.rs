//! # slot-engine
//!
//! Free-time extraction and even reminder scheduling for a study-reminder
//! service.
//!
//! Calendar collaborators hand over busy intervals for a window; the engine
//! computes the complementary free time, spreads reminder instants evenly
//! over that free time, and reserves a fixed block per reminder so later
//! batches never double-book the same slot. All core operations are pure
//! functions over immutable values.
//!
//! ## Modules
//!
//! - [`interval`] -- closed-open intervals, subtraction and merging
//! - [`freetime`] -- busy intervals → sorted, filtered free-time set
//! - [`scheduler`] -- place N instants evenly by cumulative free time
//! - [`reserve`] -- subtract reminder blocks and prune the free-time set
//! - [`ledger`] -- per-user free-time store persisted as JSON
//! - [`cursor`] -- bounded skip-ahead over already answered questions
//! - [`config`] -- block and minimum keep durations
//! - [`error`] -- Error types

pub mod config;
pub mod cursor;
pub mod error;
pub mod freetime;
pub mod interval;
pub mod ledger;
pub mod reserve;
pub mod scheduler;

pub use config::SchedulerConfig;
pub use cursor::{next_unanswered, CursorStep};
pub use error::SlotError;
pub use freetime::{free_time_frames, free_time_frames_default, FreeTimeSet};
pub use interval::{merge_intervals, subtract_one, Interval};
pub use ledger::FreeTimeLedger;
pub use reserve::{remove_scheduled_blocks, schedule_and_reserve, Reservation};
pub use scheduler::schedule_events_evenly;
