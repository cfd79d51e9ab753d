//! Exclusion rules applied to each paired class before an event is built.

use std::collections::HashSet;

use chrono::NaiveTime;

use crate::constants::{DEFAULT_IGNORE_CLASS_NAMES, DEFAULT_IGNORE_END, DEFAULT_IGNORE_START};

/// Inclusive time-of-day range whose class starts are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IgnoreWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Default for IgnoreWindow {
    /// 19:00–22:30, evening self-study
    fn default() -> Self {
        IgnoreWindow {
            start: DEFAULT_IGNORE_START,
            end: DEFAULT_IGNORE_END,
        }
    }
}

impl IgnoreWindow {
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time <= self.end
    }
}

/// Why a class was excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    IgnoredName,
    InIgnoreWindow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFilter {
    ignore_names: HashSet<String>,
    window: IgnoreWindow,
}

impl Default for EventFilter {
    fn default() -> Self {
        EventFilter::new(
            DEFAULT_IGNORE_CLASS_NAMES.iter().map(|s| s.to_string()),
            IgnoreWindow::default(),
        )
    }
}

impl EventFilter {
    pub fn new(ignore_names: impl IntoIterator<Item = String>, window: IgnoreWindow) -> Self {
        EventFilter {
            ignore_names: ignore_names.into_iter().collect(),
            window,
        }
    }

    pub fn window(&self) -> IgnoreWindow {
        self.window
    }

    pub fn is_ignored_name(&self, name: &str) -> bool {
        self.ignore_names.contains(name)
    }

    pub fn ignored_names(&self) -> impl Iterator<Item = &str> {
        self.ignore_names.iter().map(String::as_str)
    }

    /// Name check first, then the window.
    pub fn check(&self, name: &str, start: NaiveTime) -> Option<Exclusion> {
        if self.is_ignored_name(name) {
            return Some(Exclusion::IgnoredName);
        }
        if self.window.contains(start) {
            return Some(Exclusion::InIgnoreWindow);
        }
        None
    }
}
