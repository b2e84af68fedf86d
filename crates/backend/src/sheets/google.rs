//! Sheets v4 `values` endpoints over reqwest.

use async_trait::async_trait;
use fluids_core::Row;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{SheetStore, SheetsError, TokenSource};
use crate::config::AppConfig;

const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Serialize)]
struct AppendBody<'a> {
    values: [&'a Row; 1],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendResponse {
    updates: Option<AppendUpdates>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendUpdates {
    updated_range: Option<String>,
}

/// Cells come back as strings under the default render option; anything
/// else is kept as its JSON text.
fn cell_to_string(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn into_rows(range: ValueRange) -> Vec<Row> {
    range
        .values
        .into_iter()
        .map(|row| row.into_iter().map(cell_to_string).collect())
        .collect()
}

/// Client for one spreadsheet document.
pub struct GoogleSheets {
    http: reqwest::Client,
    tokens: TokenSource,
    sheet_id: String,
}

impl GoogleSheets {
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        let tokens = TokenSource::new(
            http.clone(),
            config.google_client_id.as_str(),
            config.google_client_secret.as_str(),
            config.refresh_token.as_str(),
        );

        Ok(Self {
            http,
            tokens,
            sheet_id: config.sheet_id.clone(),
        })
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/{}/values/{}",
            SHEETS_API,
            urlencoding::encode(&self.sheet_id),
            urlencoding::encode(range)
        )
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, SheetsError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(SheetsError::Status { status, body })
    }
}

#[async_trait]
impl SheetStore for GoogleSheets {
    async fn read_range(&self, range: &str) -> Result<Vec<Row>, SheetsError> {
        let token = self.tokens.access_token().await?;

        let response = self
            .http
            .get(self.values_url(range))
            .bearer_auth(token)
            .send()
            .await?;

        let values: ValueRange = Self::check(response).await?.json().await?;
        let rows = into_rows(values);

        tracing::debug!(range, rows = rows.len(), "Read spreadsheet range");
        Ok(rows)
    }

    async fn append_row(&self, range: &str, row: Row) -> Result<(), SheetsError> {
        let token = self.tokens.access_token().await?;

        let response = self
            .http
            .post(format!("{}:append", self.values_url(range)))
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(token)
            .json(&AppendBody { values: [&row] })
            .send()
            .await?;

        let appended: AppendResponse = Self::check(response).await?.json().await?;
        let updated_range = appended
            .updates
            .and_then(|u| u.updated_range)
            .unwrap_or_default();

        tracing::info!(range, %updated_range, "Appended spreadsheet row");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range_into_rows() {
        let parsed: ValueRange = serde_json::from_str(
            r#"{
                "range": "Fluids!A1:G3",
                "majorDimension": "ROWS",
                "values": [
                    ["Consumed", "Purchased", "Item"],
                    ["Tue Jan  9 2024  3:45 PM", "Cafe", "Latte", 12, true]
                ]
            }"#,
        )
        .unwrap();

        let rows = into_rows(parsed);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["Tue Jan  9 2024  3:45 PM", "Cafe", "Latte", "12", "true"]);
    }

    #[test]
    fn test_empty_range_has_no_values_key() {
        let parsed: ValueRange =
            serde_json::from_str(r#"{"range": "Lists!A1:Z1000", "majorDimension": "ROWS"}"#)
                .unwrap();
        assert!(into_rows(parsed).is_empty());
    }

    #[test]
    fn test_append_body_shape() {
        let row = vec!["t1".to_string(), "Cafe".to_string()];
        let json = serde_json::to_string(&AppendBody { values: [&row] }).unwrap();
        assert_eq!(json, r#"{"values":[["t1","Cafe"]]}"#);
    }

    #[test]
    fn test_append_response_updated_range() {
        let parsed: AppendResponse = serde_json::from_str(
            r#"{"spreadsheetId":"abc","updates":{"updatedRange":"Fluids!A42:F42","updatedRows":1}}"#,
        )
        .unwrap();
        assert_eq!(
            parsed.updates.and_then(|u| u.updated_range).as_deref(),
            Some("Fluids!A42:F42")
        );
    }
}
