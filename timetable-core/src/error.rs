//! Error types for timetable-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a run.
///
/// Per-plan and per-entry problems are not represented here; the pipeline
/// logs those and keeps going.
#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read and parse {} with known encodings", .0.display())]
    UnreadableDocument(PathBuf),

    #[error("Invalid date/time '{value}': {reason}")]
    InvalidDateTime { value: String, reason: String },

    #[error("Unknown time zone '{0}'")]
    UnknownTimeZone(String),

    #[error("Slot ends at {end} before it starts at {start}")]
    InvertedSlot {
        start: chrono::NaiveTime,
        end: chrono::NaiveTime,
    },

    #[error("Local time {0} does not map to a single instant in the configured zone")]
    NonexistentLocalTime(chrono::NaiveDateTime),

    #[error("Recurrence error: {0}")]
    Recurrence(String),
}

/// Result type alias for timetable operations.
pub type TimetableResult<T> = Result<T, TimetableError>;
