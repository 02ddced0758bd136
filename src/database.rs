//! Dataset access.
//!
//! Opens the pre-populated SQLite file read-only, checks it against the
//! declared schema and summarizes its contents. Handlers never hold a
//! connection beyond a single request: they borrow one from the pool and the
//! guard hands it back when dropped.

use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{SqliteConnection, SqlitePool};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Result, SurfsUpError};
use crate::schema;
use crate::state::AppState;

/// Overview of the loaded dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    /// Path of the SQLite file as configured
    pub file_path: String,
    /// Rows in `measurement`
    pub observation_count: i64,
    /// Rows in `station`
    pub station_count: i64,
    /// Distinct station identifiers referenced by `measurement`
    pub observed_station_count: i64,
    /// Earliest observation date (string order)
    pub first_date: Option<String>,
    /// Latest observation date (string order)
    pub last_date: Option<String>,
}

/// Open the dataset file as a read-only connection pool.
///
/// Fails if the file is missing, is not a SQLite database, or does not carry
/// the tables and columns declared in [`schema::TABLES`].
pub async fn open_dataset(path: &Path, max_connections: u32) -> Result<SqlitePool> {
    if !path.exists() {
        return Err(SurfsUpError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Dataset not found: {}", path.display()),
        )));
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .read_only(true)
        .create_if_missing(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    info!("Opened dataset: {}", path.display());

    let mut conn = pool.acquire().await?;
    schema::validate_schema(&mut conn).await?;
    debug!("Dataset schema validated");

    Ok(pool)
}

/// Count rows and find the observed date span
pub async fn summarize(conn: &mut SqliteConnection, file_path: &str) -> Result<DatasetSummary> {
    let (observation_count, observed_station_count, first_date, last_date) =
        sqlx::query_as::<_, (i64, i64, Option<String>, Option<String>)>(
            "SELECT COUNT(*), COUNT(DISTINCT station), MIN(date), MAX(date) FROM measurement",
        )
        .fetch_one(&mut *conn)
        .await?;

    let station_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM station")
        .fetch_one(&mut *conn)
        .await?;

    Ok(DatasetSummary {
        file_path: file_path.to_string(),
        observation_count,
        station_count,
        observed_station_count,
        first_date,
        last_date,
    })
}

/// Open the configured dataset and build the application state
pub async fn load_dataset(config: Config) -> Result<AppState> {
    let start = Instant::now();
    let path = config.data.database_path.clone();

    let pool = open_dataset(&path, config.data.max_connections).await?;

    let summary = {
        let mut conn = pool.acquire().await?;
        summarize(&mut conn, &path.display().to_string()).await?
    };

    debug!(
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Dataset load finished"
    );

    Ok(AppState::new(config, pool, summary))
}
