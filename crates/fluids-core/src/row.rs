//! Mapping raw `Fluids` rows onto [`IntakeEvent`].
//!
//! Column positions are only known here:
//!
//! | col | field            |
//! |-----|------------------|
//! | 0   | consumed at      |
//! | 1   | purchased from   |
//! | 2   | item             |
//! | 3   | ounces           |
//! | 4   | vessel           |
//! | 5   | consumed state   |
//! | 6   | notes (optional) |

use chrono::{DateTime, NaiveDateTime};
use thiserror::Error;

use crate::models::IntakeEvent;
use crate::timestamp::LOG_TZ;

/// Cells a row needs before it can be mapped.
const REQUIRED_CELLS: usize = 6;

/// Formats tried, in order, after whitespace has been collapsed.
const DATE_FORMATS: &[&str] = &[
    // What the service itself writes, e.g. "Tue Jan 9 2024 3:45 PM"
    "%a %b %d %Y %I:%M %p",
    "%b %d %Y %I:%M %p",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("row has {found} cells, expected at least 6")]
    TooShort { found: usize },

    #[error("cannot parse {value:?} as a date")]
    Parse { value: String },
}

/// Parse the `consumed at` cell into a wall-clock time in the log timezone.
///
/// Values carrying an explicit offset (RFC 3339) are converted into the log
/// timezone; everything else is taken as already local.
pub fn parse_consumed_at(value: &str) -> Result<NaiveDateTime, RowError> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&LOG_TZ).naive_local());
    }

    let collapsed = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&collapsed, format).ok())
        .ok_or_else(|| RowError::Parse {
            value: value.to_string(),
        })
}

/// Map one raw row. A blank notes cell is treated as absent.
pub fn map_row(row: &[String]) -> Result<IntakeEvent, RowError> {
    if row.len() < REQUIRED_CELLS {
        return Err(RowError::TooShort { found: row.len() });
    }

    let notes = row.get(6).filter(|n| !n.trim().is_empty()).cloned();

    Ok(IntakeEvent {
        start: parse_consumed_at(&row[0])?,
        purchased_from: row[1].clone(),
        item: row[2].clone(),
        ounces: row[3].clone(),
        vessel: row[4].clone(),
        consumed_state: row[5].clone(),
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_parse_written_timestamp() {
        assert_eq!(
            parse_consumed_at("Tue Jan  9 2024  3:45 PM").unwrap(),
            at(2024, 1, 9, 15, 45)
        );
        assert_eq!(
            parse_consumed_at("Sat Dec 14 2024 11:05 AM").unwrap(),
            at(2024, 12, 14, 11, 5)
        );
    }

    #[test]
    fn test_parse_other_formats() {
        assert_eq!(
            parse_consumed_at("2024-01-09 15:45:00").unwrap(),
            at(2024, 1, 9, 15, 45)
        );
        assert_eq!(
            parse_consumed_at("1/9/2024 15:45").unwrap(),
            at(2024, 1, 9, 15, 45)
        );
        // 22:45 UTC is 15:45 MST
        assert_eq!(
            parse_consumed_at("2024-01-09T22:45:00Z").unwrap(),
            at(2024, 1, 9, 15, 45)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_consumed_at("yesterday-ish").unwrap_err();
        assert_eq!(
            err,
            RowError::Parse {
                value: "yesterday-ish".to_string()
            }
        );
    }

    #[test]
    fn test_map_row_fields() {
        let event = map_row(&row(&[
            "Tue Jan  9 2024  3:45 PM",
            "Cafe",
            "Latte",
            "12",
            "Mug",
            "Hot",
            "oat milk",
        ]))
        .unwrap();

        assert_eq!(event.start, at(2024, 1, 9, 15, 45));
        assert_eq!(event.purchased_from, "Cafe");
        assert_eq!(event.item, "Latte");
        assert_eq!(event.ounces, "12");
        assert_eq!(event.vessel, "Mug");
        assert_eq!(event.consumed_state, "Hot");
        assert_eq!(event.notes.as_deref(), Some("oat milk"));
    }

    #[test]
    fn test_map_row_blank_notes_absent() {
        let event = map_row(&row(&[
            "Tue Jan  9 2024  3:45 PM",
            "Home",
            "Water",
            "16",
            "Glass",
            "Water",
            "   ",
        ]))
        .unwrap();

        assert_eq!(event.notes, None);
        assert_eq!(event.description(), "Water, Glass");
    }

    #[test]
    fn test_map_row_too_short() {
        let err = map_row(&row(&["Tue Jan  9 2024  3:45 PM", "Home"])).unwrap_err();
        assert_eq!(err, RowError::TooShort { found: 2 });
    }
}
