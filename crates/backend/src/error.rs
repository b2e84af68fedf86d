//! Unified error handling for the backend API.
//!
//! Handlers return [`ApiResult`] and use `?` freely; [`ApiError`] decides the
//! status code and logs anything that is the server's fault.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fluids_core::{EmptyDataset, RowError};
use serde::Serialize;
use thiserror::Error;

use crate::auth::Unauthorized;
use crate::sheets::SheetsError;

/// API error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Unified error type for API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Passphrase missing or wrong
    #[error("bad passphrase, sorry")]
    Unauthorized,

    /// Invalid request data
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Spreadsheet service or its OAuth endpoint failed
    #[error(transparent)]
    Sheets(#[from] SheetsError),

    /// A `Fluids` row could not be mapped
    #[error("Malformed row: {0}")]
    Row(#[from] RowError),

    /// Duplicate or latest requested on a sheet with no entries
    #[error("{0}")]
    EmptyDataset(#[from] EmptyDataset),
}

impl ApiError {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }
}

impl From<Unauthorized> for ApiError {
    fn from(_: Unauthorized) -> Self {
        ApiError::Unauthorized
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match &self {
            ApiError::Unauthorized => {
                tracing::warn!("Rejected write with bad passphrase");
                (StatusCode::UNAUTHORIZED, self.to_string(), None)
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            ApiError::Sheets(e @ SheetsError::Auth(_)) => {
                tracing::error!("Spreadsheet auth error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Authentication with spreadsheet service failed".to_string(),
                    None,
                )
            }
            ApiError::Sheets(e) => {
                tracing::error!("Spreadsheet error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Spreadsheet request failed".to_string(),
                    Some(e.to_string()),
                )
            }
            ApiError::Row(e) => {
                tracing::error!("Row mapping error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Some(e.to_string()),
                )
            }
            ApiError::EmptyDataset(e) => {
                tracing::error!("Empty dataset: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Some(e.to_string()),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
            details,
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
