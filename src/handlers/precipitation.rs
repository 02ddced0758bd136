//! Precipitation endpoint handler.
//!
//! Returns one `{date: prcp}` object per observation in the final year of the
//! dataset, ascending by date.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::error_response;
use crate::error::Result;
use crate::logging::generate_request_id;
use crate::queries::{self, Precipitation};
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/precipitation";

/// Handle GET /api/v1.0/precipitation requests
pub async fn precipitation_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        "Processing precipitation request"
    );

    match fetch_precipitation(&state).await {
        Ok(rows) => {
            info!(
                endpoint = ENDPOINT,
                request_id = %request_id,
                duration_us = start_time.elapsed().as_micros() as u64,
                rows = rows.len(),
                "Precipitation request successful"
            );
            Json(rows).into_response()
        }
        Err(error) => error_response(&state, error, ENDPOINT, &request_id, None),
    }
}

async fn fetch_precipitation(state: &AppState) -> Result<Vec<Precipitation>> {
    let mut conn = state.connection().await?;
    queries::precipitation_last_year(&mut conn).await
}
