//! Application state management for surfsup.
//!
//! This module defines the context object built once at startup and handed
//! to every handler: the configuration, the dataset connection pool and the
//! dataset summary computed at load time.

use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqlitePool};
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::database::DatasetSummary;
use crate::error::{Result, SurfsUpError};

/// The main application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Read-only connections to the dataset
    pub pool: SqlitePool,
    /// What was found in the dataset at startup
    pub dataset: DatasetSummary,
    /// When the state was built
    pub started_at: Instant,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Config, pool: SqlitePool, dataset: DatasetSummary) -> Self {
        Self {
            config,
            pool,
            dataset,
            started_at: Instant::now(),
        }
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub fn new_shared(config: Config, pool: SqlitePool, dataset: DatasetSummary) -> Arc<Self> {
        Arc::new(Self::new(config, pool, dataset))
    }

    /// Borrow a connection for the duration of one request.
    ///
    /// The connection goes back to the pool when the returned guard is dropped,
    /// on every exit path of the caller.
    pub async fn connection(&self) -> Result<PoolConnection<Sqlite>> {
        Ok(self.pool.acquire().await?)
    }

    /// Whether error responses should carry the underlying error text
    pub fn debug(&self) -> bool {
        self.config.server.debug
    }

    /// Validate that the application state is consistent and ready for use
    pub fn validate(&self) -> Result<()> {
        if self.pool.is_closed() {
            return Err(SurfsUpError::Server {
                message: "Dataset connection pool is closed".to_string(),
            });
        }

        if self.dataset.observation_count == 0 {
            return Err(SurfsUpError::Schema {
                table: "measurement".to_string(),
                message: "no observations found in the dataset".to_string(),
            });
        }

        if self.dataset.observed_station_count > self.dataset.observation_count {
            return Err(SurfsUpError::Schema {
                table: "measurement".to_string(),
                message: format!(
                    "inconsistent counts: {} stations for {} observations",
                    self.dataset.observed_station_count, self.dataset.observation_count
                ),
            });
        }

        Ok(())
    }
}
