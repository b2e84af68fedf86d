use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, Method};
use clap::Parser;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod auth;
mod config;
pub mod error;
mod handlers;
mod routes;
mod sheets;

use crate::config::AppConfig;
use crate::sheets::{GoogleSheets, SheetStore};

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub sheets: Arc<dyn SheetStore>,
    pub passphrase: Arc<str>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fluids_backend=debug,fluids_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = AppConfig::parse();
    tracing::debug!(?config, "Loaded configuration");

    let sheets = GoogleSheets::from_config(&config).context("Failed to build Sheets client")?;
    let state = AppState {
        sheets: Arc::new(sheets),
        passphrase: config.passphrase.as_str().into(),
    };

    let app = routes::app(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// CORS for the browser form that drives the log.
///
/// The form reads with GET and writes with form-encoded POSTs, so only those
/// methods and `Content-Type` are allowed. List the form's origin in
/// CORS_ALLOWED_ORIGINS (comma separated). Unset or unparseable falls back to
/// permissive, which suits local development only.
fn build_cors_layer() -> CorsLayer {
    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS").ok();

    match allowed_origins {
        Some(origins) => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                tracing::warn!("CORS_ALLOWED_ORIGINS is set but empty, using permissive CORS");
                CorsLayer::permissive()
            } else {
                tracing::info!("CORS configured for origins: {:?}", origins);
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE])
            }
        }
        None => {
            tracing::warn!("CORS_ALLOWED_ORIGINS not set, using permissive CORS");
            CorsLayer::permissive()
        }
    }
}
