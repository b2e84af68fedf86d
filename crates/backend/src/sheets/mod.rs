//! Access to the Google Sheets document that stores the log.
//!
//! Handlers only see [`SheetStore`]; the Google implementation lives in
//! [`google`] and an in-memory one backs the handler tests.

use async_trait::async_trait;
use fluids_core::Row;
use thiserror::Error;

mod google;
#[cfg(test)]
pub mod memory;
mod oauth;

pub use google::GoogleSheets;
pub use oauth::TokenSource;

/// Log of drinks, header row first.
pub const FLUIDS_SHEET: &str = "Fluids";
/// Columns written by `add` and `dup`.
pub const FLUIDS_APPEND_RANGE: &str = "Fluids!A:F";
pub const CATALOG_SHEET: &str = "Catalog";
pub const LISTS_SHEET: &str = "Lists";

#[derive(Debug, Error)]
pub enum SheetsError {
    /// Exchanging the refresh token for an access token failed
    #[error("OAuth token refresh failed: {0}")]
    Auth(String),

    #[error("Spreadsheet request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Spreadsheet service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Row-level access to the spreadsheet.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Every populated row of `range`, cells as displayed.
    async fn read_range(&self, range: &str) -> Result<Vec<Row>, SheetsError>;

    /// Append one row after the last populated row of `range`.
    async fn append_row(&self, range: &str, row: Row) -> Result<(), SheetsError>;
}
