//! First-occurrence resolution for weekly class plans.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Weekday rule values a profile is expected to use.
pub const WEEKDAY_RULE_RANGE: std::ops::RangeInclusive<i64> = 1..=7;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Map a plan's weekday rule (1 = Monday .. 7 = Sunday) to a weekday.
///
/// Values outside 1..=7 wrap with Euclidean modulo, so 0 is Sunday and 8 is
/// Monday. Callers decide whether to warn about such values.
pub fn weekday_from_rule(rule: i64) -> Weekday {
    WEEK[((rule.rem_euclid(7) + 6) % 7) as usize]
}

/// First date on or after `start` that falls on `weekday`.
pub fn first_occurrence(start: NaiveDate, weekday: Weekday) -> NaiveDate {
    let target = weekday.num_days_from_monday() as i64;
    let current = start.weekday().num_days_from_monday() as i64;
    let days_ahead = (target - current).rem_euclid(7);
    start + Duration::days(days_ahead)
}

/// RRULE `BYDAY` code for a weekday.
pub fn day_code(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}
