//! ICS feed generation.
//!
//! Writes the resolved events as one VCALENDAR per RFC 5545.

mod generate;

pub use generate::generate_calendar;
