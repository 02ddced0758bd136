//! Test data generation utilities.
//!
//! Writes SQLite files laid out like the Hawaii climate dataset, filled with
//! deterministic observations whose expected query results can be computed
//! from the returned rows.

use chrono::NaiveDate;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, Executor, SqliteConnection};
use std::path::Path;

use surfsup::Observation;

type Result<T> = std::result::Result<T, sqlx::Error>;

/// Stations that report observations
pub const STATIONS: &[&str] = &["USC00519397", "USC00519281", "USC00513117"];

/// A catalog station with no observations at all
pub const SILENT_STATION: &str = "USC00517948";

/// Only the most active station reports on this day
pub const SINGLE_OBSERVATION_DAY: &str = "2017-01-01";

/// Nobody reports on this day
pub const EMPTY_DAY: &str = "2017-02-01";

const SCHEMA: &str = r#"
    CREATE TABLE measurement (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        station TEXT,
        date TEXT,
        prcp FLOAT,
        tobs FLOAT
    );
    CREATE TABLE station (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        station TEXT,
        name TEXT,
        latitude FLOAT,
        longitude FLOAT,
        elevation FLOAT
    );
"#;

/// Generate daily observations from 2016-07-01 through 2017-08-31.
pub fn generate_observations() -> Vec<Observation> {
    let first = NaiveDate::from_ymd_opt(2016, 7, 1).unwrap();
    let last = NaiveDate::from_ymd_opt(2017, 8, 31).unwrap();

    let mut observations = Vec::new();
    let mut day = first;
    let mut day_index = 0usize;

    while day <= last {
        let date = day.format("%Y-%m-%d").to_string();

        for (i, station) in STATIONS.iter().enumerate() {
            if date == EMPTY_DAY {
                continue;
            }
            if date == SINGLE_OBSERVATION_DAY && *station != "USC00519281" {
                continue;
            }

            let prcp = if day_index % 11 == 0 && i == 1 {
                None
            } else {
                Some(((day_index + i) % 10) as f64 / 10.0)
            };
            let tobs = 60.0 + ((day_index * 7 + i * 3) % 25) as f64;

            observations.push(Observation {
                station: station.to_string(),
                date: date.clone(),
                prcp,
                tobs,
            });
        }

        day = day.succ_opt().unwrap();
        day_index += 1;
    }

    observations
}

/// Create a dataset file at `path` and return the observations written to it.
pub async fn create_test_dataset(path: &Path) -> Result<Vec<Observation>> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let mut conn = SqliteConnection::connect_with(&options).await?;

    conn.execute(SCHEMA).await?;

    let observations = generate_observations();

    let mut tx = conn.begin().await?;
    for obs in &observations {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
            .bind(obs.station.as_str())
            .bind(obs.date.as_str())
            .bind(obs.prcp)
            .bind(obs.tobs)
            .execute(&mut *tx)
            .await?;
    }

    let catalog = [
        ("USC00519397", "WAIKIKI 717.2, HI US", 21.2716, -157.8168, 3.0),
        ("USC00519281", "WAIHEE 837.5, HI US", 21.45167, -157.84889, 32.9),
        ("USC00513117", "KANEOHE 838.1, HI US", 21.4234, -157.8015, 14.6),
        (SILENT_STATION, "PEARL CITY, HI US", 21.3934, -157.9751, 11.9),
    ];
    for (station, name, latitude, longitude, elevation) in catalog {
        sqlx::query(
            "INSERT INTO station (station, name, latitude, longitude, elevation) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(station)
        .bind(name)
        .bind(latitude)
        .bind(longitude)
        .bind(elevation)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    conn.close().await?;
    Ok(observations)
}

/// Create a SQLite file whose `measurement` table lacks the temperature column
pub async fn create_mismatched_dataset(path: &Path) -> Result<()> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let mut conn = SqliteConnection::connect_with(&options).await?;

    conn.execute(
        "CREATE TABLE measurement (station TEXT, date TEXT, prcp FLOAT); \
         CREATE TABLE station (station TEXT);",
    )
    .await?;

    conn.close().await?;
    Ok(())
}

/// Min, mean and max temperature over the observations matching `filter`
pub fn expected_summary<F>(observations: &[Observation], filter: F) -> Option<(f64, f64, f64)>
where
    F: Fn(&Observation) -> bool,
{
    let temps: Vec<f64> = observations
        .iter()
        .filter(|o| filter(o))
        .map(|o| o.tobs)
        .collect();

    if temps.is_empty() {
        return None;
    }

    let min = temps.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = temps.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mean = temps.iter().sum::<f64>() / temps.len() as f64;
    Some((min, mean, max))
}
