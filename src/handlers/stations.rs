//! Stations endpoint handler.
//!
//! Returns the identifiers of every station that has observations.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::error_response;
use crate::error::Result;
use crate::logging::generate_request_id;
use crate::queries;
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/stations";

/// Handle GET /api/v1.0/stations requests
pub async fn stations_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        "Processing stations request"
    );

    match fetch_stations(&state).await {
        Ok(stations) => {
            info!(
                endpoint = ENDPOINT,
                request_id = %request_id,
                duration_us = start_time.elapsed().as_micros() as u64,
                station_count = stations.len(),
                "Stations request successful"
            );
            Json(stations).into_response()
        }
        Err(error) => error_response(&state, error, ENDPOINT, &request_id, None),
    }
}

async fn fetch_stations(state: &AppState) -> Result<Vec<String>> {
    let mut conn = state.connection().await?;
    queries::distinct_stations(&mut conn).await
}
