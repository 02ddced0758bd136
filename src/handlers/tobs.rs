//! Temperature observations endpoint handler.
//!
//! Returns one `{date: tobs}` object per observation of the most active
//! station during the final year of the dataset.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::error_response;
use crate::error::Result;
use crate::logging::generate_request_id;
use crate::queries::{self, TemperatureObservation, MOST_ACTIVE_STATION};
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/tobs";

/// Handle GET /api/v1.0/tobs requests
pub async fn tobs_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        station = MOST_ACTIVE_STATION,
        "Processing temperature observations request"
    );

    match fetch_observations(&state).await {
        Ok(rows) => {
            info!(
                endpoint = ENDPOINT,
                request_id = %request_id,
                duration_us = start_time.elapsed().as_micros() as u64,
                rows = rows.len(),
                "Temperature observations request successful"
            );
            Json(rows).into_response()
        }
        Err(error) => error_response(&state, error, ENDPOINT, &request_id, None),
    }
}

async fn fetch_observations(state: &AppState) -> Result<Vec<TemperatureObservation>> {
    let mut conn = state.connection().await?;
    queries::most_active_station_temperatures(&mut conn).await
}
