//! Access tokens from a stored refresh token.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::SheetsError;

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Refresh this long before Google's stated expiry.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - now > Duration::seconds(EXPIRY_MARGIN_SECS)
    }
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    refresh_token: &'a str,
    grant_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
}

/// Hands out bearer tokens, refreshing through Google's token endpoint when
/// the current one is about to lapse.
pub struct TokenSource {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    refresh_token: String,
    current: Mutex<Option<AccessToken>>,
}

impl TokenSource {
    pub fn new(
        http: reqwest::Client,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
            current: Mutex::new(None),
        }
    }

    pub async fn access_token(&self) -> Result<String, SheetsError> {
        let mut current = self.current.lock().await;

        if let Some(token) = current.as_ref().filter(|t| t.is_fresh(Utc::now())) {
            return Ok(token.value.clone());
        }

        let token = self.refresh().await?;
        let value = token.value.clone();
        *current = Some(token);
        Ok(value)
    }

    async fn refresh(&self) -> Result<AccessToken, SheetsError> {
        tracing::debug!("Refreshing Google access token");

        let response = self
            .http
            .post(TOKEN_URL)
            .form(&RefreshRequest {
                client_id: &self.client_id,
                client_secret: &self.client_secret,
                refresh_token: &self.refresh_token,
                grant_type: "refresh_token",
            })
            .send()
            .await
            .map_err(|e| SheetsError::Auth(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::Auth(format!("{}: {}", status, body)));
        }

        let tokens: TokenResponse = response
            .json()
            .await
            .map_err(|e| SheetsError::Auth(format!("invalid token response: {}", e)))?;

        Ok(AccessToken {
            value: tokens.access_token,
            expires_at: Utc::now() + Duration::seconds(tokens.expires_in.unwrap_or(3600)),
        })
    }
}
