//! ICS calendar generation.

use chrono::DateTime;
use chrono_tz::Tz;
use icalendar::{Calendar, Component, EventLike, Property};

use crate::constants::PRODID;
use crate::error::TimetableResult;
use crate::pipeline::ResolvedEvent;

/// Generate the .ics document for a set of resolved events.
pub fn generate_calendar(events: &[ResolvedEvent]) -> TimetableResult<String> {
    let mut cal = Calendar::new();

    for event in events {
        cal.push(build_vevent(event));
    }

    let cal = cal.done();

    Ok(strip_ics_bloat(&cal.to_string()))
}

fn build_vevent(event: &ResolvedEvent) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid);
    ics_event.summary(&event.summary);

    if let Some(ref loc) = event.location {
        ics_event.location(loc);
    }

    add_zoned_property(&mut ics_event, "DTSTART", &event.event.start);
    add_zoned_property(&mut ics_event, "DTEND", &event.event.end);

    ics_event.add_property("RRULE", event.event.recurrence.rrule());

    ics_event.done()
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with ours
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// Add a local datetime with its TZID parameter
fn add_zoned_property(ics_event: &mut icalendar::Event, name: &str, time: &DateTime<Tz>) {
    let mut prop = Property::new(name, time.naive_local().format("%Y%m%dT%H%M%S").to_string());
    prop.add_parameter("TZID", time.timezone().name());
    ics_event.append_property(prop);
}
