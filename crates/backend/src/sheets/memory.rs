//! In-memory [`SheetStore`] for handler tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use fluids_core::Row;

use super::{SheetStore, SheetsError};

/// Sheets keyed by name. A range like `Fluids!A:F` resolves to `Fluids`.
#[derive(Default)]
pub struct MemorySheets {
    sheets: Mutex<HashMap<String, Vec<Row>>>,
    fail_auth: bool,
}

fn sheet_name(range: &str) -> &str {
    range.split('!').next().unwrap_or(range)
}

impl MemorySheets {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails as if the token refresh was rejected.
    pub fn failing_auth() -> Self {
        Self {
            fail_auth: true,
            ..Self::default()
        }
    }

    pub fn with_sheet(self, name: &str, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();
        self.sheets.lock().unwrap().insert(name.to_string(), rows);
        self
    }

    pub fn rows(&self, name: &str) -> Vec<Row> {
        self.sheets
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl SheetStore for MemorySheets {
    async fn read_range(&self, range: &str) -> Result<Vec<Row>, SheetsError> {
        if self.fail_auth {
            return Err(SheetsError::Auth("invalid_grant".to_string()));
        }
        Ok(self.rows(sheet_name(range)))
    }

    async fn append_row(&self, range: &str, row: Row) -> Result<(), SheetsError> {
        if self.fail_auth {
            return Err(SheetsError::Auth("invalid_grant".to_string()));
        }
        self.sheets
            .lock()
            .unwrap()
            .entry(sheet_name(range).to_string())
            .or_default()
            .push(row);
        Ok(())
    }
}
