//! Terminal rendering for timetable-core types.
//!
//! Extension traits that add colored output using owo_colors.

use owo_colors::OwoColorize;
use timetable_core::occurrence::day_code;
use timetable_core::{ResolvedEvent, SkipReport};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for ResolvedEvent {
    fn render(&self) -> String {
        let occ = &self.occurrence;
        let time = format!(
            "{} {}-{}",
            day_code(occ.weekday),
            occ.start.format("%H:%M"),
            occ.end.format("%H:%M")
        );

        let location = match &self.location {
            Some(loc) => format!(" @ {}", loc),
            None => String::new(),
        };

        let span = match self.event.occurrences() {
            Ok(dates) => match (dates.first(), dates.last()) {
                (Some(first), Some(last)) => {
                    format!("{} → {}, {}×", first, last, dates.len())
                }
                _ => "no occurrences".to_string(),
            },
            Err(e) => e.to_string().red().to_string(),
        };

        format!(
            "{} {}{} {}",
            time.yellow(),
            self.summary.green(),
            location,
            span.dimmed()
        )
    }
}

impl Render for SkipReport {
    fn render(&self) -> String {
        let counts = [
            (self.disabled_plans, "disabled plan"),
            (self.unusable_plans, "unusable plan"),
            (self.empty_periods, "empty period"),
            (self.unknown_subjects, "unknown subject"),
            (self.ignored_names, "ignored by name"),
            (self.ignored_window, "in ignore window"),
            (self.invalid_slots, "invalid slot"),
            (self.unmatched_entries, "without a slot"),
            (self.after_end_date, "after end date"),
        ];

        let parts: Vec<String> = counts
            .iter()
            .filter(|(n, _)| *n > 0)
            .map(|(n, label)| format!("{} {}", n, label))
            .collect();

        if parts.is_empty() {
            "Nothing skipped".dimmed().to_string()
        } else {
            format!("Skipped: {}", parts.join(", ")).dimmed().to_string()
        }
    }
}
