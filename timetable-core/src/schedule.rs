//! Typed schedule profile.
//!
//! A profile is a JSON document with three top-level maps: `Subjects`,
//! `TimeLayouts` and `ClassPlans`. Missing keys and `null` values fall back to
//! the defaults declared on each field; unknown keys are ignored. Class plans keep their
//! declaration order since it decides the order events are emitted in.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveTime;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::constants::CLASS_PERIOD_TIME_TYPE;
use crate::datetime::parse_time_of_day;
use crate::encoding::read_json_file;
use crate::error::TimetableResult;

/// `null` deserializes to the field's default, same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A loaded schedule profile.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Schedule {
    #[serde(default, deserialize_with = "null_as_default")]
    pub subjects: HashMap<String, Subject>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub time_layouts: HashMap<String, TimeLayout>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub class_plans: IndexMap<String, ClassPlan>,
}

impl Schedule {
    pub fn load(path: &Path) -> TimetableResult<Self> {
        read_json_file(path)
    }

    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.get(id)
    }

    pub fn time_layout(&self, id: &str) -> Option<&TimeLayout> {
        self.time_layouts.get(id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Subject {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Short label shown in compact views
    #[serde(default, deserialize_with = "null_as_default")]
    pub initial: String,

    /// Used as the event location
    #[serde(default, deserialize_with = "null_as_default")]
    pub teacher_name: String,
}

impl Subject {
    pub fn location(&self) -> Option<&str> {
        if self.teacher_name.is_empty() {
            None
        } else {
            Some(&self.teacher_name)
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeLayout {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub layouts: Vec<TimeSlot>,
}

impl TimeLayout {
    /// Class-period slots in layout order. Breaks and dividers are dropped.
    pub fn class_slots(&self) -> Vec<&TimeSlot> {
        self.layouts.iter().filter(|s| s.is_class_period()).collect()
    }
}

/// One row of a time layout.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeSlot {
    /// 0 = class period, anything else is a break, divider or action
    #[serde(default)]
    pub time_type: Option<i64>,

    #[serde(default)]
    pub start_second: Option<String>,

    #[serde(default)]
    pub end_second: Option<String>,
}

impl TimeSlot {
    pub fn is_class_period(&self) -> bool {
        self.time_type == Some(CLASS_PERIOD_TIME_TYPE)
    }

    /// Parsed start/end times of day.
    ///
    /// `Ok(None)` when either boundary is missing.
    pub fn times(&self) -> TimetableResult<Option<(NaiveTime, NaiveTime)>> {
        match (&self.start_second, &self.end_second) {
            (Some(start), Some(end)) => {
                Ok(Some((parse_time_of_day(start)?, parse_time_of_day(end)?)))
            }
            _ => Ok(None),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClassPlan {
    #[serde(default, deserialize_with = "null_as_default")]
    pub time_layout_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub time_rule: TimeRule,

    #[serde(default, deserialize_with = "null_as_default")]
    pub classes: Vec<ClassEntry>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub is_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeRule {
    /// 1 = Monday .. 7 = Sunday. Out-of-range values wrap modulo 7.
    #[serde(default)]
    pub week_day: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClassEntry {
    #[serde(default)]
    pub subject_id: Option<String>,
}

impl ClassEntry {
    /// Subject reference, or `None` for an empty period.
    pub fn subject_ref(&self) -> Option<&str> {
        self.subject_id.as_deref().filter(|id| !id.is_empty())
    }
}
