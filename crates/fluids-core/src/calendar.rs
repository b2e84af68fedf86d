//! iCalendar feed of the `Fluids` sheet.

use chrono::{Duration, NaiveDateTime};
use icalendar::{Calendar, CalendarDateTime, Component, Event, EventLike};

use crate::models::{IntakeEvent, Row};
use crate::row::{map_row, RowError};
use crate::timestamp::LOG_TZID;

/// Every logged drink is shown as a block of this length.
pub const EVENT_DURATION_MINUTES: i64 = 15;

/// US Mountain time rules, so clients can place `TZID=America/Denver` times.
const VTIMEZONE: &[&str] = &[
    "BEGIN:VTIMEZONE",
    "TZID:America/Denver",
    "BEGIN:DAYLIGHT",
    "DTSTART:19700308T020000",
    "TZOFFSETFROM:-0700",
    "TZOFFSETTO:-0600",
    "TZNAME:MDT",
    "RRULE:FREQ=YEARLY;BYMONTH=3;BYDAY=2SU",
    "END:DAYLIGHT",
    "BEGIN:STANDARD",
    "DTSTART:19701101T020000",
    "TZOFFSETFROM:-0600",
    "TZOFFSETTO:-0700",
    "TZNAME:MST",
    "RRULE:FREQ=YEARLY;BYMONTH=11;BYDAY=1SU",
    "END:STANDARD",
    "END:VTIMEZONE",
];

/// One VEVENT, already laid out for the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEntry {
    pub uid: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub summary: String,
    pub location: String,
    pub description: String,
}

impl CalendarEntry {
    /// `position` is 1-based and counted after the header row.
    pub fn from_intake(position: usize, event: &IntakeEvent) -> Self {
        Self {
            uid: format!("fluids{}", position),
            start: event.start,
            end: event.end(Duration::minutes(EVENT_DURATION_MINUTES)),
            summary: event.summary(),
            location: event.purchased_from.clone(),
            description: event.description(),
        }
    }

    fn to_event(&self) -> Event {
        Event::new()
            .uid(&self.uid)
            .summary(&self.summary)
            .location(&self.location)
            .description(&self.description)
            .starts(local_time(self.start))
            .ends(local_time(self.end))
            .done()
    }
}

fn local_time(date_time: NaiveDateTime) -> CalendarDateTime {
    CalendarDateTime::WithTimezone {
        date_time,
        tzid: LOG_TZID.to_string(),
    }
}

/// Map every row after the header. The first bad row fails the whole batch.
pub fn calendar_entries(rows: &[Row]) -> Result<Vec<CalendarEntry>, RowError> {
    rows.iter()
        .skip(1)
        .enumerate()
        .map(|(index, row)| {
            let event = map_row(row).inspect_err(|e| {
                tracing::warn!(position = index + 1, error = %e, "Unmappable Fluids row");
            })?;
            Ok(CalendarEntry::from_intake(index + 1, &event))
        })
        .collect()
}

/// Render the `Fluids` sheet (header row included) as an iCalendar document.
pub fn build_calendar(rows: &[Row]) -> Result<String, RowError> {
    let entries = calendar_entries(rows)?;

    let mut cal = Calendar::new();
    for entry in &entries {
        cal.push(entry.to_event());
    }
    let cal = cal.done();

    tracing::debug!(events = entries.len(), "Built fluids calendar");
    Ok(insert_timezone(&cal.to_string()))
}

/// Place the VTIMEZONE block ahead of the first component.
fn insert_timezone(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len() + 512);
    let mut inserted = false;

    for line in ics.lines() {
        let starts_component = line.starts_with("BEGIN:") && line != "BEGIN:VCALENDAR";
        if !inserted && (starts_component || line == "END:VCALENDAR") {
            for tz_line in VTIMEZONE {
                result.push_str(tz_line);
                result.push_str("\r\n");
            }
            inserted = true;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
