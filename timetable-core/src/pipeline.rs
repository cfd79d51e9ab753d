//! Schedule to recurring events.
//!
//! Plans are walked in declaration order and entries in index order. Problems
//! with a single plan or entry are logged and counted, never fatal.

use chrono::{NaiveDate, Weekday};
use uuid::Uuid;

use crate::align::{Pair, align};
use crate::config::GenerateOptions;
use crate::filter::Exclusion;
use crate::occurrence::{WEEKDAY_RULE_RANGE, first_occurrence, weekday_from_rule};
use crate::recurrence::{Occurrence, RecurringEvent, build_recurring_event};
use crate::schedule::{ClassEntry, ClassPlan, Schedule, TimeSlot};

/// One class, ready to be written as a VEVENT.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEvent {
    /// Stable across runs for the same plan id and entry index
    pub uid: String,
    pub plan_name: String,
    pub summary: String,
    pub location: Option<String>,
    pub occurrence: Occurrence,
    pub event: RecurringEvent,
}

/// Counts of everything that was skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipReport {
    pub disabled_plans: usize,
    /// No weekday rule, unknown layout, or no class periods
    pub unusable_plans: usize,
    pub empty_periods: usize,
    pub unknown_subjects: usize,
    pub ignored_names: usize,
    pub ignored_window: usize,
    /// Missing, unparseable, inverted or non-localizable slot times
    pub invalid_slots: usize,
    /// Entries beyond the last class period of their layout
    pub unmatched_entries: usize,
    /// First meeting falls after the calendar end date
    pub after_end_date: usize,
}

impl SkipReport {
    pub fn skipped_entries(&self) -> usize {
        self.empty_periods
            + self.unknown_subjects
            + self.ignored_names
            + self.ignored_window
            + self.invalid_slots
            + self.unmatched_entries
            + self.after_end_date
    }
}

#[derive(Debug, Clone, Default)]
pub struct BuildOutcome {
    pub events: Vec<ResolvedEvent>,
    pub report: SkipReport,
}

/// Build every event the schedule produces under `options`.
pub fn build_events(schedule: &Schedule, options: &GenerateOptions) -> BuildOutcome {
    let mut outcome = BuildOutcome::default();

    for (plan_id, plan) in &schedule.class_plans {
        build_plan(schedule, plan_id, plan, options, &mut outcome);
    }

    outcome
}

fn build_plan(
    schedule: &Schedule,
    plan_id: &str,
    plan: &ClassPlan,
    options: &GenerateOptions,
    outcome: &mut BuildOutcome,
) {
    if !plan.is_enabled {
        tracing::info!("Skipping disabled ClassPlan '{}'", plan.name);
        outcome.report.disabled_plans += 1;
        return;
    }

    let Some(rule) = plan.time_rule.week_day else {
        tracing::warn!("No WeekDay in TimeRule for ClassPlan '{}'", plan.name);
        outcome.report.unusable_plans += 1;
        return;
    };

    if !WEEKDAY_RULE_RANGE.contains(&rule) {
        tracing::warn!(
            "WeekDay {} of ClassPlan '{}' is outside 1..=7, resolving it modulo 7",
            rule,
            plan.name
        );
    }
    let weekday = weekday_from_rule(rule);

    let Some(layout) = schedule.time_layout(&plan.time_layout_id) else {
        tracing::warn!(
            "No TimeLayout with ID '{}' for ClassPlan '{}'",
            plan.time_layout_id,
            plan.name
        );
        outcome.report.unusable_plans += 1;
        return;
    };

    let slots = layout.class_slots();
    if slots.is_empty() {
        tracing::warn!(
            "TimeLayout '{}' has no class periods, skipping ClassPlan '{}'",
            layout.name,
            plan.name
        );
        outcome.report.unusable_plans += 1;
        return;
    }

    let alignment = align(&plan.classes, &slots);
    if let Some(mismatch) = alignment.mismatch {
        tracing::warn!(
            "Number of classes {} does not match number of class periods {} in ClassPlan '{}'",
            mismatch.entries,
            mismatch.slots,
            plan.name
        );
    }

    let first_date = first_occurrence(options.start_date, weekday);

    for pair in &alignment.pairs {
        let resolved = build_entry(
            schedule,
            plan_id,
            plan,
            pair,
            first_date,
            weekday,
            options,
            &mut outcome.report,
        );
        if let Some(event) = resolved {
            outcome.events.push(event);
        }
    }

    if let Some(index) = alignment.mismatch.and_then(|m| m.first_unmatched_entry()) {
        tracing::warn!(
            "More classes than time slots in ClassPlan '{}' at index {}",
            plan.name,
            index
        );
        outcome.report.unmatched_entries += plan.classes.len() - index;
    }
}

#[allow(clippy::too_many_arguments)]
fn build_entry(
    schedule: &Schedule,
    plan_id: &str,
    plan: &ClassPlan,
    pair: &Pair<'_, ClassEntry, TimeSlot>,
    first_date: NaiveDate,
    weekday: Weekday,
    options: &GenerateOptions,
    report: &mut SkipReport,
) -> Option<ResolvedEvent> {
    let index = pair.index;

    let Some(subject_id) = pair.entry.subject_ref() else {
        tracing::info!(
            "Skipping empty class at index {} in ClassPlan '{}'",
            index,
            plan.name
        );
        report.empty_periods += 1;
        return None;
    };

    let Some(subject) = schedule.subject(subject_id) else {
        tracing::warn!("No subject with ID '{}'", subject_id);
        report.unknown_subjects += 1;
        return None;
    };

    if options.filter.is_ignored_name(&subject.name) {
        tracing::info!(
            "Skipping class '{}' as it is set to be ignored",
            subject.name
        );
        report.ignored_names += 1;
        return None;
    }

    let (start, end) = match pair.slot.times() {
        Ok(Some(times)) => times,
        Ok(None) => {
            tracing::warn!(
                "No start or end time in time slot index {} for ClassPlan '{}'",
                index,
                plan.name
            );
            report.invalid_slots += 1;
            return None;
        }
        Err(e) => {
            tracing::warn!(
                "Error parsing time in time slot index {} for ClassPlan '{}': {}",
                index,
                plan.name,
                e
            );
            report.invalid_slots += 1;
            return None;
        }
    };

    if let Some(Exclusion::InIgnoreWindow) = options.filter.check(&subject.name, start) {
        tracing::info!(
            "Skipping class '{}' starting at {} as it falls within the ignore timespan",
            subject.name,
            start
        );
        report.ignored_window += 1;
        return None;
    }

    if first_date > options.end_date {
        tracing::info!(
            "Skipping class '{}' as its first meeting on {} is after the end date {}",
            subject.name,
            first_date,
            options.end_date
        );
        report.after_end_date += 1;
        return None;
    }

    let occurrence = Occurrence {
        date: first_date,
        start,
        end,
        weekday,
    };

    let event = match build_recurring_event(&occurrence, options.end_date, options.timezone) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(
                "Skipping class '{}' at index {} in ClassPlan '{}': {}",
                subject.name,
                index,
                plan.name,
                e
            );
            report.invalid_slots += 1;
            return None;
        }
    };

    tracing::info!(
        "Added event: '{}' starting on {} at {} - {}",
        subject.name,
        first_date,
        start,
        end
    );

    Some(ResolvedEvent {
        uid: event_uid(plan_id, index),
        plan_name: plan.name.clone(),
        summary: subject.name.clone(),
        location: subject.location().map(str::to_string),
        occurrence,
        event,
    })
}

/// Deterministic UID so re-imports update events instead of duplicating them.
fn event_uid(plan_id: &str, index: usize) -> String {
    let name = format!("{}/{}", plan_id, index);
    let uuid = Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes());
    format!("{}@timetable-ics", uuid)
}
