//! Temperature summary endpoint handlers.
//!
//! `/api/v1.0/:start` and `/api/v1.0/:start/:end` return a one-element array
//! holding `{TMIN, TAVG, TMAX}`. Path segments are used as given: a value
//! that is not a date yields nulls, never an error status.
//!
//! Segments are read from the request URI and percent-decoded lossily, so a
//! byte sequence that is not UTF-8 still reaches the query as an opaque
//! string instead of being rejected by the extractor.

use axum::extract::State;
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use axum::Json;
use percent_encoding::percent_decode_str;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::error_response;
use crate::error::Result;
use crate::logging::generate_request_id;
use crate::queries::{self, TemperatureSummary};
use crate::state::AppState;

const FROM_ENDPOINT: &str = "/api/v1.0/:start";
const RANGE_ENDPOINT: &str = "/api/v1.0/:start/:end";
const API_PREFIX: &str = "/api/v1.0/";

/// Handle GET /api/v1.0/:start requests
pub async fn temperature_from_handler(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    let mut segments = path_segments(&uri).into_iter();
    let start = segments.next().unwrap_or_default();

    debug!(
        endpoint = FROM_ENDPOINT,
        request_id = %request_id,
        start = %start,
        "Processing temperature summary request"
    );

    match fetch_summary_from(&state, &start).await {
        Ok(summary) => summary_response(summary, FROM_ENDPOINT, &request_id, start_time),
        Err(error) => error_response(
            &state,
            error,
            FROM_ENDPOINT,
            &request_id,
            Some(&format!("start={start}")),
        ),
    }
}

/// Handle GET /api/v1.0/:start/:end requests
pub async fn temperature_range_handler(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    let mut segments = path_segments(&uri).into_iter();
    let start = segments.next().unwrap_or_default();
    let end = segments.next().unwrap_or_default();

    debug!(
        endpoint = RANGE_ENDPOINT,
        request_id = %request_id,
        start = %start,
        end = %end,
        "Processing temperature summary request"
    );

    match fetch_summary_between(&state, &start, &end).await {
        Ok(summary) => summary_response(summary, RANGE_ENDPOINT, &request_id, start_time),
        Err(error) => error_response(
            &state,
            error,
            RANGE_ENDPOINT,
            &request_id,
            Some(&format!("start={start}, end={end}")),
        ),
    }
}

/// Percent-decoded segments following `/api/v1.0/`.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than rejected.
fn path_segments(uri: &Uri) -> Vec<String> {
    uri.path()
        .strip_prefix(API_PREFIX)
        .unwrap_or_default()
        .split('/')
        .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
        .collect()
}

async fn fetch_summary_from(state: &AppState, start: &str) -> Result<TemperatureSummary> {
    let mut conn = state.connection().await?;
    queries::temperature_summary_from(&mut conn, start).await
}

async fn fetch_summary_between(
    state: &AppState,
    start: &str,
    end: &str,
) -> Result<TemperatureSummary> {
    let mut conn = state.connection().await?;
    queries::temperature_summary_between(&mut conn, start, end).await
}

fn summary_response(
    summary: TemperatureSummary,
    endpoint: &str,
    request_id: &str,
    start_time: Instant,
) -> Response {
    info!(
        endpoint = endpoint,
        request_id = %request_id,
        duration_us = start_time.elapsed().as_micros() as u64,
        matched = summary.tmin.is_some(),
        "Temperature summary request successful"
    );

    Json(vec![summary]).into_response()
}
