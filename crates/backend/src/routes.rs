use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Reads
        .route("/latest", get(handlers::latest))
        .route("/purveyors", get(handlers::list_purveyors))
        .route("/catalog", get(handlers::catalog))
        .route("/lists", get(handlers::lists))
        // Passphrase-gated writes
        .route("/add", post(handlers::add_entry))
        .route("/dup", post(handlers::duplicate_latest))
}

/// Full router without the tracing and CORS layers added in `main`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::hello))
        .route("/health", get(handlers::health_check))
        .route("/cal", get(handlers::calendar))
        .nest("/api", api_routes())
        .with_state(state)
}
