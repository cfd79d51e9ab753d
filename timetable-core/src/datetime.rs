//! Parsing for the date and time strings found in settings, profiles and CLI flags.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{TimetableError, TimetableResult};

const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

fn invalid(value: &str, reason: impl Into<String>) -> TimetableError {
    TimetableError::InvalidDateTime {
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Parse an ISO-8601 date-time as written by the schedule editor.
///
/// Accepts naive date-times, RFC 3339 (the offset is dropped and the wall
/// clock kept) and bare dates, which map to midnight.
pub fn parse_iso_datetime(s: &str) -> TimetableResult<NaiveDateTime> {
    let s = s.trim();

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d.and_time(NaiveTime::MIN));
    }

    Err(invalid(s, "expected an ISO-8601 date-time such as 2024-09-01T00:00:00"))
}

/// Parse a slot boundary (`StartSecond` / `EndSecond`) into a time of day.
///
/// Slots are stored either as bare times or as full date-times on a dummy
/// date; only the time-of-day is meaningful.
pub fn parse_time_of_day(s: &str) -> TimetableResult<NaiveTime> {
    let trimmed = s.trim();

    for fmt in TIME_FORMATS {
        if let Ok(t) = NaiveTime::parse_from_str(trimmed, fmt) {
            return Ok(t);
        }
    }

    parse_iso_datetime(trimmed)
        .map(|dt| dt.time())
        .map_err(|_| invalid(trimmed, "expected a time of day such as 07:30:00"))
}

/// Parse YYYY-MM-DD.
pub fn parse_date(s: &str) -> TimetableResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| invalid(s, "expected YYYY-MM-DD"))
}

/// Parse HH:MM, as used for the ignore window flags.
pub fn parse_hhmm(s: &str) -> TimetableResult<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|_| invalid(s, "expected HH:MM"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn time_of_day_accepts_bare_times() {
        assert_eq!(parse_time_of_day("07:30:00").unwrap(), hms(7, 30, 0));
        assert_eq!(parse_time_of_day("18:59").unwrap(), hms(18, 59, 0));
    }

    #[test]
    fn time_of_day_accepts_dummy_dates() {
        assert_eq!(
            parse_time_of_day("0001-01-01T08:15:00").unwrap(),
            hms(8, 15, 0)
        );
        assert_eq!(
            parse_time_of_day("2024-09-01T19:30:00.0000000").unwrap(),
            hms(19, 30, 0)
        );
    }

    #[test]
    fn time_of_day_drops_offset() {
        assert_eq!(
            parse_time_of_day("2024-09-01T07:30:00+08:00").unwrap(),
            hms(7, 30, 0)
        );
    }

    #[test]
    fn time_of_day_rejects_garbage() {
        assert!(parse_time_of_day("half past seven").is_err());
        assert!(parse_time_of_day("25:00:00").is_err());
    }

    #[test]
    fn iso_datetime_date_only_is_midnight() {
        let dt = parse_iso_datetime("2024-09-01").unwrap();
        assert_eq!(dt.time(), NaiveTime::MIN);
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
    }

    #[test]
    fn iso_datetime_rejects_garbage() {
        let err = parse_iso_datetime("next monday").unwrap_err();
        assert!(
            err.to_string().contains("next monday"),
            "error should name the bad value, got: {}",
            err
        );
    }

    #[test]
    fn hhmm_and_date() {
        assert_eq!(parse_hhmm("22:30").unwrap(), hms(22, 30, 0));
        assert!(parse_hhmm("7pm").is_err());
        assert_eq!(
            parse_date("2025-06-30").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
        );
        assert!(parse_date("30/06/2025").is_err());
    }
}
