//! Core of timetable-ics.
//!
//! Turns a class schedule profile into weekly-recurring calendar events:
//! - `schedule` and `encoding` load the profile
//! - `occurrence`, `align`, `filter` and `recurrence` do the mapping
//! - `pipeline` drives them over every class plan
//! - `ics` serializes the result

pub mod align;
pub mod config;
pub mod constants;
pub mod datetime;
pub mod encoding;
pub mod error;
pub mod filter;
pub mod ics;
pub mod occurrence;
pub mod pipeline;
pub mod recurrence;
pub mod schedule;

pub use error::{TimetableError, TimetableResult};
pub use pipeline::{BuildOutcome, ResolvedEvent, SkipReport, build_events};
pub use schedule::Schedule;
