use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One spreadsheet record, cells in column order.
pub type Row = Vec<String>;

/// Typed view of a `Fluids` row.
///
/// `start` is a wall-clock time in the log's timezone (see
/// [`crate::timestamp::LOG_TZID`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeEvent {
    pub start: NaiveDateTime,
    pub purchased_from: String,
    pub item: String,
    pub ounces: String,
    pub vessel: String,
    pub consumed_state: String,
    pub notes: Option<String>,
}

impl IntakeEvent {
    /// `"<item> / <ounces>"`
    pub fn summary(&self) -> String {
        format!("{} / {}", self.item, self.ounces)
    }

    /// `"<consumed>, <vessel>"`, followed by `" (<notes>)"` when notes exist.
    pub fn description(&self) -> String {
        match &self.notes {
            Some(notes) => format!("{}, {} ({})", self.consumed_state, self.vessel, notes),
            None => format!("{}, {}", self.consumed_state, self.vessel),
        }
    }

    pub fn end(&self, duration: Duration) -> NaiveDateTime {
        self.start + duration
    }
}

/// Response body for the latest `Fluids` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestEntry {
    pub when: String,
    pub data: Vec<String>,
}

/// Venue name to the items sold there, from the `Catalog` sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: HashMap<String, Vec<String>>,
}

impl Catalog {
    /// Column 0 is the venue, the rest of the row its items. A repeated venue
    /// replaces the earlier row.
    pub fn from_rows(rows: &[Row]) -> Self {
        let entries = rows
            .iter()
            .filter_map(|row| {
                let (venue, items) = row.split_first()?;
                Some((venue.clone(), items.to_vec()))
            })
            .collect();

        Self { entries }
    }

    pub fn items_for(&self, venue: &str) -> Option<&[String]> {
        self.entries.get(venue).map(Vec::as_slice)
    }
}

/// The three pick lists stored on the first rows of the `Lists` sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceLists {
    pub venues: Vec<String>,
    pub sizes: Vec<String>,
    pub vessels: Vec<String>,
}

impl ReferenceLists {
    pub fn from_rows(rows: &[Row]) -> Self {
        let list = |index: usize| rows.get(index).cloned().unwrap_or_default();

        Self {
            venues: list(0),
            sizes: list(1),
            vessels: list(2),
        }
    }
}

/// Fields submitted when logging a new drink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub purchased: String,
    pub item: String,
    pub oz: String,
    pub vessel: String,
    pub consumed: String,
}

impl NewEntry {
    /// Row in `Fluids!A:F` column order.
    pub fn to_row(&self, consumed_at: &str) -> Row {
        vec![
            consumed_at.to_string(),
            self.purchased.clone(),
            self.item.clone(),
            self.oz.clone(),
            self.vessel.clone(),
            self.consumed.clone(),
        ]
    }

    pub fn confirmation(&self, consumed_at: &str) -> String {
        format!(
            "Added: {} / {} / {} at {}.",
            self.item, self.oz, self.vessel, consumed_at
        )
    }
}
