//! HTTP request handlers for the surfsup API.
//!
//! This module contains all the endpoint handlers for the web server and the
//! router that wires them to their paths.

pub mod heartbeat;
pub mod home;
pub mod precipitation;
pub mod stations;
pub mod temperature;
pub mod tobs;

pub use heartbeat::heartbeat_handler;
pub use home::home_handler;
pub use precipitation::precipitation_handler;
pub use stations::stations_handler;
pub use temperature::{temperature_from_handler, temperature_range_handler};
pub use tobs::tobs_handler;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::error::SurfsUpError;
use crate::logging::{create_http_trace_layer, log_request_error};
use crate::state::AppState;

/// Build the application router.
///
/// Static paths under `/api/v1.0/` take priority over the `:start` capture,
/// so `/api/v1.0/stations` never reaches the temperature handler.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/heartbeat", get(heartbeat_handler))
        .route("/api/v1.0/precipitation", get(precipitation_handler))
        .route("/api/v1.0/stations", get(stations_handler))
        .route("/api/v1.0/tobs", get(tobs_handler))
        .route("/api/v1.0/:start", get(temperature_from_handler))
        .route("/api/v1.0/:start/:end", get(temperature_range_handler))
        .layer(create_http_trace_layer())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Turn a request-time failure into a 500 response.
///
/// The error text is only exposed when the server runs with `--debug`.
fn error_response(
    state: &AppState,
    error: SurfsUpError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) -> Response {
    log_request_error(&error, endpoint, request_id, params);

    let message = if state.debug() {
        error.to_string()
    } else {
        "Internal server error".to_string()
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "error": message,
            "request_id": request_id
        })),
    )
        .into_response()
}
