//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid interval: end {end} is before start {start}")]
    InvalidInterval { start: String, end: String },

    #[error("Free time is not sorted and disjoint at index {index}")]
    UnsortedFreeTime { index: usize },

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Instant out of range: {0}")]
    InstantOutOfRange(String),

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Ledger I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ledger JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
