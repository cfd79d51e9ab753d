//! Defaults shared by the core and the CLI.

use chrono::NaiveTime;
use chrono_tz::Tz;

/// Settings file read when no `--settings` path is given.
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Schedule profile used when the settings document names none.
pub const DEFAULT_PROFILE: &str = "main.json";

pub const DEFAULT_SINGLE_WEEK_START: &str = "2024-09-01T00:00:00";

pub const DEFAULT_CLASS_PREPARE_NOTIFY_SECONDS: i64 = 60;

/// Output file name. Only the directory is configurable.
pub const OUTPUT_FILE_NAME: &str = "schedule.ics";

pub const PRODID: &str = "-//ClassIsland Schedule//";

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Shanghai;

/// Eye exercises, recess drill and evening training.
pub const DEFAULT_IGNORE_CLASS_NAMES: [&str; 3] = ["眼保健操", "课间操", "晚训"];

pub const DEFAULT_IGNORE_START: NaiveTime = match NaiveTime::from_hms_opt(19, 0, 0) {
    Some(t) => t,
    None => panic!("invalid ignore window start"),
};

pub const DEFAULT_IGNORE_END: NaiveTime = match NaiveTime::from_hms_opt(22, 30, 0) {
    Some(t) => t,
    None => panic!("invalid ignore window end"),
};

/// Month/day the school year ends, in the year after the start date.
pub const DEFAULT_END_MONTH: u32 = 6;
pub const DEFAULT_END_DAY: u32 = 30;

/// `TimeType` value of a class period in a time layout.
pub const CLASS_PERIOD_TIME_TYPE: i64 = 0;
