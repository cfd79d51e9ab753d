//! The schedule editor's settings document.

use std::path::Path;

use serde::Deserialize;

use crate::constants::{
    DEFAULT_CLASS_PREPARE_NOTIFY_SECONDS, DEFAULT_PROFILE, DEFAULT_SINGLE_WEEK_START,
};
use crate::encoding::read_json_file;
use crate::error::TimetableResult;

fn default_selected_profile() -> String {
    DEFAULT_PROFILE.to_string()
}

fn default_single_week_start_time() -> String {
    DEFAULT_SINGLE_WEEK_START.to_string()
}

fn default_class_prepare_notify_seconds() -> i64 {
    DEFAULT_CLASS_PREPARE_NOTIFY_SECONDS
}

/// Keys read from settings.json. Everything else in the file is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Settings {
    /// Path of the schedule profile to convert
    #[serde(default = "default_selected_profile")]
    pub selected_profile: String,

    /// Anchor for weekday resolution; its date is the calendar start
    #[serde(default = "default_single_week_start_time")]
    pub single_week_start_time: String,

    /// Logged for reference, not used when building events
    #[serde(default = "default_class_prepare_notify_seconds")]
    pub class_prepare_notify_seconds: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            selected_profile: default_selected_profile(),
            single_week_start_time: default_single_week_start_time(),
            class_prepare_notify_seconds: default_class_prepare_notify_seconds(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> TimetableResult<Self> {
        let settings: Settings = read_json_file(path)?;

        tracing::info!("Selected profile: {}", settings.selected_profile);
        tracing::info!(
            "ClassPrepareNotifySeconds: {}",
            settings.class_prepare_notify_seconds
        );

        Ok(settings)
    }
}
