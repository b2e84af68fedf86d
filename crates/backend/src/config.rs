use std::fmt;
use std::time::Duration;

use clap::Parser;

/// Server configuration, taken from flags or the environment (`.env` is
/// loaded first).
#[derive(Clone, Parser)]
#[command(name = "fluids-backend")]
#[command(about = "HTTP API and calendar feed for the fluids log spreadsheet")]
pub struct AppConfig {
    /// ID of the Google Sheets document holding the log.
    #[arg(long, env = "SHEET_ID")]
    pub sheet_id: String,

    /// Google OAuth client ID.
    #[arg(long, env = "GOOGLE_CLIENT_ID")]
    pub google_client_id: String,

    /// Google OAuth client secret.
    #[arg(long, env = "GOOGLE_CLIENT_SECRET", hide_env_values = true)]
    pub google_client_secret: String,

    /// Long-lived refresh token exchanged for access tokens.
    #[arg(long, env = "REFRESH_TOKEN", hide_env_values = true)]
    pub refresh_token: String,

    /// Shared secret required by the write endpoints.
    #[arg(long, env = "PASSPHRASE", hide_env_values = true)]
    pub passphrase: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 4567)]
    pub port: u16,

    /// Timeout for each call to Google, in seconds.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("sheet_id", &self.sheet_id)
            .field("google_client_id", &self.google_client_id)
            .field("google_client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("passphrase", &"<redacted>")
            .field("port", &self.port)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Vec<&'static str> {
        vec![
            "fluids-backend",
            "--sheet-id",
            "sheet-123",
            "--google-client-id",
            "client",
            "--google-client-secret",
            "shh",
            "--refresh-token",
            "refresh",
            "--passphrase",
            "open sesame",
        ]
    }

    #[test]
    fn test_parse_with_defaults() {
        let config = AppConfig::try_parse_from(args()).expect("should parse");

        assert_eq!(config.sheet_id, "sheet-123");
        assert_eq!(config.passphrase, "open sesame");
        assert_eq!(config.port, 4567);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_port_override() {
        let mut args = args();
        args.extend(["--port", "8080", "--request-timeout-secs", "5"]);

        let config = AppConfig::try_parse_from(args).expect("should parse");
        assert_eq!(config.port, 8080);
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AppConfig::try_parse_from(args()).expect("should parse");
        let debug = format!("{:?}", config);

        assert!(debug.contains("sheet-123"));
        assert!(!debug.contains("shh"));
        assert!(!debug.contains("open sesame"));
        assert!(!debug.contains("\"refresh\""));
    }
}
