//! Resolved options for a generation run.
//!
//! Each value comes from, in order of precedence: a command-line override,
//! the settings document, a built-in default.

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;

use crate::config::Settings;
use crate::constants::{
    DEFAULT_END_DAY, DEFAULT_END_MONTH, DEFAULT_IGNORE_CLASS_NAMES, DEFAULT_TIMEZONE,
};
use crate::datetime::{parse_date, parse_hhmm, parse_iso_datetime};
use crate::error::{TimetableError, TimetableResult};
use crate::filter::{EventFilter, IgnoreWindow};

/// Raw command-line overrides. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// YYYY-MM-DD
    pub start_date: Option<String>,
    /// YYYY-MM-DD
    pub end_date: Option<String>,
    /// HH:MM
    pub ignore_start: Option<String>,
    /// HH:MM
    pub ignore_end: Option<String>,
    /// Comma-separated subject names
    pub ignore_classes: Option<String>,
    pub profile: Option<PathBuf>,
    /// ISO-8601 date-time
    pub single_week_start: Option<String>,
    /// IANA zone name
    pub timezone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub profile: PathBuf,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub filter: EventFilter,
    pub timezone: Tz,
}

impl GenerateOptions {
    pub fn resolve(settings: &Settings, overrides: &Overrides) -> TimetableResult<Self> {
        let profile = overrides
            .profile
            .clone()
            .unwrap_or_else(|| PathBuf::from(&settings.selected_profile));

        let single_week_start = overrides
            .single_week_start
            .as_deref()
            .unwrap_or(&settings.single_week_start_time);
        let single_week_start = parse_iso_datetime(single_week_start)?;
        tracing::info!("SingleWeekStartTime: {}", single_week_start);

        let start_date = match overrides.start_date.as_deref() {
            Some(s) => parse_date(s)?,
            None => single_week_start.date(),
        };

        let end_date = match overrides.end_date.as_deref() {
            Some(s) => parse_date(s)?,
            None => default_end_date(start_date)?,
        };

        if end_date < start_date {
            return Err(TimetableError::Config(format!(
                "End date {} is before start date {}",
                end_date, start_date
            )));
        }

        let defaults = IgnoreWindow::default();
        let window = IgnoreWindow {
            start: match overrides.ignore_start.as_deref() {
                Some(s) => parse_hhmm(s)?,
                None => defaults.start,
            },
            end: match overrides.ignore_end.as_deref() {
                Some(s) => parse_hhmm(s)?,
                None => defaults.end,
            },
        };

        if window.end < window.start {
            return Err(TimetableError::Config(format!(
                "Ignore window ends at {} before it starts at {}",
                window.end, window.start
            )));
        }

        let ignore_names: Vec<String> = match overrides.ignore_classes.as_deref() {
            Some(list) => parse_name_list(list),
            None => DEFAULT_IGNORE_CLASS_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };

        let timezone = match overrides.timezone.as_deref() {
            Some(name) => name
                .trim()
                .parse::<Tz>()
                .map_err(|_| TimetableError::UnknownTimeZone(name.to_string()))?,
            None => DEFAULT_TIMEZONE,
        };

        tracing::info!("Calendar will cover from {} to {}", start_date, end_date);

        Ok(GenerateOptions {
            profile,
            start_date,
            end_date,
            filter: EventFilter::new(ignore_names, window),
            timezone,
        })
    }
}

/// June 30 of the year after the start date's year.
pub fn default_end_date(start: NaiveDate) -> TimetableResult<NaiveDate> {
    NaiveDate::from_ymd_opt(start.year() + 1, DEFAULT_END_MONTH, DEFAULT_END_DAY).ok_or_else(
        || TimetableError::Config(format!("No default end date for start date {}", start)),
    )
}

fn parse_name_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn defaults_come_from_settings() {
        let options =
            GenerateOptions::resolve(&Settings::default(), &Overrides::default()).unwrap();

        assert_eq!(options.profile, PathBuf::from("main.json"));
        assert_eq!(options.start_date, date(2024, 9, 1));
        assert_eq!(options.end_date, date(2025, 6, 30));
        assert_eq!(options.timezone, chrono_tz::Asia::Shanghai);
        assert_eq!(options.filter, EventFilter::default());
    }

    #[test]
    fn settings_start_time_drives_default_end() {
        let settings = Settings {
            single_week_start_time: "2025-02-17T08:00:00".into(),
            ..Settings::default()
        };
        let options = GenerateOptions::resolve(&settings, &Overrides::default()).unwrap();
        assert_eq!(options.start_date, date(2025, 2, 17));
        assert_eq!(options.end_date, date(2026, 6, 30));
    }

    #[test]
    fn overrides_win_over_settings() {
        let overrides = Overrides {
            start_date: Some("2024-09-02".into()),
            end_date: Some("2025-01-19".into()),
            ignore_start: Some("12:00".into()),
            ignore_end: Some("13:30".into()),
            ignore_classes: Some(" Assembly, ,Lunch ".into()),
            profile: Some(PathBuf::from("senior.json")),
            single_week_start: Some("2030-01-01T00:00:00".into()),
            timezone: Some("Asia/Tokyo".into()),
        };

        let options = GenerateOptions::resolve(&Settings::default(), &overrides).unwrap();
        assert_eq!(options.profile, PathBuf::from("senior.json"));
        assert_eq!(options.start_date, date(2024, 9, 2));
        assert_eq!(options.end_date, date(2025, 1, 19));
        assert_eq!(options.timezone, chrono_tz::Asia::Tokyo);
        assert_eq!(
            options.filter.window(),
            IgnoreWindow {
                start: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
                end: NaiveTime::from_hms_opt(13, 30, 0).unwrap(),
            }
        );
        let mut names: Vec<&str> = options.filter.ignored_names().collect();
        names.sort();
        assert_eq!(names, ["Assembly", "Lunch"]);
    }

    #[test]
    fn single_week_start_override_sets_start_date() {
        let overrides = Overrides {
            single_week_start: Some("2024-09-09T00:00:00".into()),
            ..Overrides::default()
        };
        let options = GenerateOptions::resolve(&Settings::default(), &overrides).unwrap();
        assert_eq!(options.start_date, date(2024, 9, 9));
    }

    #[test]
    fn malformed_values_are_fatal() {
        let settings = Settings {
            single_week_start_time: "first of september".into(),
            ..Settings::default()
        };
        assert!(GenerateOptions::resolve(&settings, &Overrides::default()).is_err());

        for overrides in [
            Overrides {
                end_date: Some("June 30".into()),
                ..Overrides::default()
            },
            Overrides {
                ignore_start: Some("7pm".into()),
                ..Overrides::default()
            },
            Overrides {
                timezone: Some("Mars/Olympus_Mons".into()),
                ..Overrides::default()
            },
        ] {
            assert!(
                GenerateOptions::resolve(&Settings::default(), &overrides).is_err(),
                "{:?} should be rejected",
                overrides
            );
        }
    }

    #[test]
    fn reversed_ranges_are_rejected() {
        let overrides = Overrides {
            start_date: Some("2025-07-01".into()),
            end_date: Some("2025-06-30".into()),
            ..Overrides::default()
        };
        let err = GenerateOptions::resolve(&Settings::default(), &overrides).unwrap_err();
        assert!(matches!(err, TimetableError::Config(_)));

        let overrides = Overrides {
            ignore_start: Some("22:30".into()),
            ignore_end: Some("19:00".into()),
            ..Overrides::default()
        };
        let err = GenerateOptions::resolve(&Settings::default(), &overrides).unwrap_err();
        assert!(matches!(err, TimetableError::Config(_)));
    }

    #[test]
    fn empty_ignore_list_disables_name_filter() {
        let overrides = Overrides {
            ignore_classes: Some(String::new()),
            ..Overrides::default()
        };
        let options = GenerateOptions::resolve(&Settings::default(), &overrides).unwrap();
        assert!(!options.filter.is_ignored_name("眼保健操"));
    }
}
