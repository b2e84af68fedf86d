//! Operations over whole sheets of raw rows.

use thiserror::Error;

use crate::models::{LatestEntry, Row};

/// The `Fluids` sheet has no entries below its header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no entries below the header row")]
pub struct EmptyDataset;

fn last_entry(rows: &[Row]) -> Result<&Row, EmptyDataset> {
    rows.split_first()
        .and_then(|(_header, entries)| entries.last())
        .ok_or(EmptyDataset)
}

/// Last `Fluids` row split into its timestamp and the remaining cells.
pub fn latest_entry(rows: &[Row]) -> Result<LatestEntry, EmptyDataset> {
    let (when, data) = last_entry(rows)?.split_first().ok_or(EmptyDataset)?;

    Ok(LatestEntry {
        when: when.clone(),
        data: data.to_vec(),
    })
}

/// Copy of the last `Fluids` row with its timestamp replaced. Every other
/// cell, notes included, is kept.
pub fn duplicate_row(rows: &[Row], consumed_at: &str) -> Result<Row, EmptyDataset> {
    let last = last_entry(rows)?;

    let mut row = Vec::with_capacity(last.len().max(1));
    row.push(consumed_at.to_string());
    row.extend(last.iter().skip(1).cloned());
    Ok(row)
}

pub fn duplicate_confirmation(row: &[String]) -> String {
    let cell = |index: usize| row.get(index).map(String::as_str).unwrap_or_default();
    format!(
        "Duplicated: {} / {} / {} at {}.",
        cell(2),
        cell(3),
        cell(4),
        cell(0)
    )
}

/// Venue names, column 0 of each `Catalog` row.
pub fn purveyors(rows: &[Row]) -> Vec<Option<String>> {
    rows.iter().map(|row| row.first().cloned()).collect()
}
