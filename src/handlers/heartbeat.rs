//! Heartbeat endpoint handler.
//!
//! Returns server status information, including uptime and what was found in
//! the dataset at startup.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::database::DatasetSummary;
use crate::error::Result;
use crate::state::AppState;

/// Random per-process identifier
static SERVER_ID: once_cell::sync::Lazy<String> =
    once_cell::sync::Lazy::new(|| Uuid::new_v4().to_string());

/// Heartbeat response structure
#[derive(Debug, Serialize)]
pub struct HeartbeatResponse {
    /// Server ID (unique per instance)
    pub server_id: String,
    /// Current timestamp (ISO 8601 format)
    pub timestamp: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// "healthy" when the dataset answers queries, "degraded" otherwise
    pub status: String,
    /// Dataset information
    pub dataset: DatasetSummary,
}

/// Handle GET /heartbeat requests
pub async fn heartbeat_handler(State(state): State<Arc<AppState>>) -> Json<HeartbeatResponse> {
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    let status = match check_dataset(&state).await {
        Ok(()) => "healthy",
        Err(error) => {
            tracing::warn!(error = %error, "Dataset health check failed");
            "degraded"
        }
    };

    Json(HeartbeatResponse {
        server_id: SERVER_ID.clone(),
        timestamp,
        uptime_seconds: state.started_at.elapsed().as_secs(),
        status: status.to_string(),
        dataset: state.dataset.clone(),
    })
}

/// Check that a connection can be borrowed and answers a trivial query
async fn check_dataset(state: &AppState) -> Result<()> {
    let mut conn = state.connection().await?;
    sqlx::query("SELECT 1").execute(&mut *conn).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::database::test_support::test_state;
    use crate::handlers::test_util::get_json;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_heartbeat_healthy() {
        let state = test_state(false).await;
        let (status, json) = get_json(state, "/heartbeat").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["dataset"]["observation_count"], 9);
        assert_eq!(json["dataset"]["station_count"], 4);
        assert_eq!(json["dataset"]["first_date"], "2010-01-01");
        assert!(json["server_id"].as_str().unwrap().len() == 36);
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_heartbeat_degraded() {
        let state = test_state(false).await;
        state.pool.close().await;

        let (status, json) = get_json(state, "/heartbeat").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "degraded");
    }
}
