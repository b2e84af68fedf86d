//! Core types for the fluids log: typed views over spreadsheet rows and the
//! iCalendar feed built from them.
//!
//! Nothing in this crate performs I/O. The backend fetches raw rows from the
//! spreadsheet and hands them to the functions here.

pub mod calendar;
pub mod models;
pub mod row;
pub mod sheet;
pub mod timestamp;

pub use calendar::{build_calendar, calendar_entries, CalendarEntry, EVENT_DURATION_MINUTES};
pub use models::{Catalog, IntakeEvent, LatestEntry, NewEntry, ReferenceLists, Row};
pub use row::{map_row, parse_consumed_at, RowError};
pub use sheet::{duplicate_confirmation, duplicate_row, latest_entry, purveyors, EmptyDataset};
