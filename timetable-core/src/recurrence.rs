//! Weekly recurrence building and RRULE expansion.
//!
//! A class occurrence becomes a zoned start/end pair plus a weekly RRULE whose
//! UNTIL is the last second of the calendar end date, converted to UTC so
//! clients agree on the final occurrence whatever their own zone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use rrule::RRuleSet;

use crate::error::{TimetableError, TimetableResult};
use crate::occurrence::day_code;

/// Most occurrences `occurrences` will expand. A school year is ~45 weeks.
const MAX_EXPANDED_OCCURRENCES: u16 = 1000;

/// The first concrete meeting of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub weekday: Weekday,
}

/// FREQ=WEEKLY rule on a single day, terminated at an absolute instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyRecurrence {
    pub weekday: Weekday,
    pub until: DateTime<Utc>,
}

impl WeeklyRecurrence {
    /// RRULE value, e.g. `FREQ=WEEKLY;UNTIL=20250630T155959Z;BYDAY=MO;WKST=MO`
    pub fn rrule(&self) -> String {
        format!(
            "FREQ=WEEKLY;UNTIL={};BYDAY={};WKST=MO",
            self.until.format("%Y%m%dT%H%M%SZ"),
            day_code(self.weekday)
        )
    }
}

/// A zoned weekly event, ready for serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurringEvent {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub recurrence: WeeklyRecurrence,
}

impl RecurringEvent {
    /// IANA name used for the TZID parameter.
    pub fn tzid(&self) -> &'static str {
        self.start.timezone().name()
    }

    /// Expand the rule into the local dates it produces.
    pub fn occurrences(&self) -> TimetableResult<Vec<NaiveDate>> {
        let rrule_str = self.rrule_set_string();

        let rrule_set: RRuleSet = rrule_str.parse().map_err(|e| {
            TimetableError::Recurrence(format!("Failed to parse '{}': {}", rrule_str, e))
        })?;

        let result = rrule_set.all(MAX_EXPANDED_OCCURRENCES);
        Ok(result.dates.iter().map(|dt| dt.date_naive()).collect())
    }

    /// DTSTART + RRULE lines in the form the rrule crate parses.
    fn rrule_set_string(&self) -> String {
        format!(
            "DTSTART;TZID={}:{}\nRRULE:{}",
            self.tzid(),
            self.start.naive_local().format("%Y%m%dT%H%M%S"),
            self.recurrence.rrule()
        )
    }
}

/// Last second of `end_date` in `tz`, as a UTC instant.
pub fn until_instant(end_date: NaiveDate, tz: Tz) -> TimetableResult<DateTime<Utc>> {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59)
        .ok_or_else(|| TimetableError::Recurrence("invalid end-of-day time".into()))?;
    let local = localize(end_date.and_time(last_second), tz)?;
    Ok(local.with_timezone(&Utc))
}

/// Build the weekly event for one occurrence.
///
/// Slots that end before they start are rejected rather than reordered or
/// rolled over to the next day.
pub fn build_recurring_event(
    occurrence: &Occurrence,
    end_date: NaiveDate,
    tz: Tz,
) -> TimetableResult<RecurringEvent> {
    if occurrence.end < occurrence.start {
        return Err(TimetableError::InvertedSlot {
            start: occurrence.start,
            end: occurrence.end,
        });
    }

    let start = localize(occurrence.date.and_time(occurrence.start), tz)?;
    let end = localize(occurrence.date.and_time(occurrence.end), tz)?;

    Ok(RecurringEvent {
        start,
        end,
        recurrence: WeeklyRecurrence {
            weekday: occurrence.weekday,
            until: until_instant(end_date, tz)?,
        },
    })
}

fn localize(naive: NaiveDateTime, tz: Tz) -> TimetableResult<DateTime<Tz>> {
    tz.from_local_datetime(&naive)
        .single()
        .ok_or(TimetableError::NonexistentLocalTime(naive))
}
