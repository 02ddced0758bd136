//! The fixed queries behind each API route.
//!
//! Date bounds are compared as plain strings, exactly as SQLite compares TEXT
//! values. Nothing here parses or validates a date: a bound that is not an
//! ISO-8601 date simply matches whatever sorts on the right side of it.

use serde::ser::{Serialize, SerializeMap, Serializer};
use sqlx::sqlite::SqliteRow;
use sqlx::{Decode, FromRow, Row, Sqlite, SqliteConnection, Type};

use crate::error::Result;
use crate::schema::{Observation, Station};

/// First day of the final year of observations
pub const LAST_YEAR_START: &str = "2016-08-23";

/// Last day of observations in the dataset
pub const LAST_YEAR_END: &str = "2017-08-23";

/// Station with the most observations in the dataset
pub const MOST_ACTIVE_STATION: &str = "USC00519281";

/// A value keyed by its observation date.
///
/// Serializes as a single-entry JSON object, `{"2017-01-01": 0.08}`.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedValue<T> {
    pub date: String,
    pub value: T,
}

impl<'r, T> FromRow<'r, SqliteRow> for DatedValue<T>
where
    T: Decode<'r, Sqlite> + Type<Sqlite>,
{
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            date: row.try_get("date")?,
            value: row.try_get("value")?,
        })
    }
}

impl<T: Serialize> Serialize for DatedValue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.value)?;
        map.end()
    }
}

/// Daily precipitation, absent when the station did not report one
pub type Precipitation = DatedValue<Option<f64>>;

/// A temperature observation
pub type TemperatureObservation = DatedValue<f64>;

/// Min, average and max temperature over a set of observations.
///
/// All three are `None` when no observation matched.
#[derive(Debug, Clone, PartialEq, FromRow, serde::Serialize)]
pub struct TemperatureSummary {
    #[serde(rename = "TMIN")]
    pub tmin: Option<f64>,
    #[serde(rename = "TAVG")]
    pub tavg: Option<f64>,
    #[serde(rename = "TMAX")]
    pub tmax: Option<f64>,
}

/// Precipitation for every observation in the final year, ascending by date
pub async fn precipitation_last_year(conn: &mut SqliteConnection) -> Result<Vec<Precipitation>> {
    let rows = sqlx::query_as::<_, Precipitation>(
        "SELECT date, prcp AS value FROM measurement \
         WHERE date >= ?1 AND date <= ?2 \
         ORDER BY date",
    )
    .bind(LAST_YEAR_START)
    .bind(LAST_YEAR_END)
    .fetch_all(conn)
    .await?;

    Ok(rows)
}

/// Every station identifier that appears in the observations
pub async fn distinct_stations(conn: &mut SqliteConnection) -> Result<Vec<String>> {
    let stations = sqlx::query_scalar::<_, String>("SELECT DISTINCT station FROM measurement")
        .fetch_all(conn)
        .await?;

    Ok(stations)
}

/// Temperatures recorded by the most active station during the final year
pub async fn most_active_station_temperatures(
    conn: &mut SqliteConnection,
) -> Result<Vec<TemperatureObservation>> {
    let rows = sqlx::query_as::<_, TemperatureObservation>(
        "SELECT date, tobs AS value FROM measurement \
         WHERE station = ?1 AND date >= ?2 AND date <= ?3",
    )
    .bind(MOST_ACTIVE_STATION)
    .bind(LAST_YEAR_START)
    .bind(LAST_YEAR_END)
    .fetch_all(conn)
    .await?;

    Ok(rows)
}

/// Temperature summary over every observation dated `start` or later
pub async fn temperature_summary_from(
    conn: &mut SqliteConnection,
    start: &str,
) -> Result<TemperatureSummary> {
    let summary = sqlx::query_as::<_, TemperatureSummary>(
        "SELECT MIN(tobs) AS tmin, AVG(tobs) AS tavg, MAX(tobs) AS tmax \
         FROM measurement WHERE date >= ?1",
    )
    .bind(start)
    .fetch_one(conn)
    .await?;

    Ok(summary)
}

/// Temperature summary over observations dated between `start` and `end`, inclusive
pub async fn temperature_summary_between(
    conn: &mut SqliteConnection,
    start: &str,
    end: &str,
) -> Result<TemperatureSummary> {
    let summary = sqlx::query_as::<_, TemperatureSummary>(
        "SELECT MIN(tobs) AS tmin, AVG(tobs) AS tavg, MAX(tobs) AS tmax \
         FROM measurement WHERE date >= ?1 AND date <= ?2",
    )
    .bind(start)
    .bind(end)
    .fetch_one(conn)
    .await?;

    Ok(summary)
}

/// Metadata of every known station, ordered by identifier
pub async fn station_catalog(conn: &mut SqliteConnection) -> Result<Vec<Station>> {
    let stations = sqlx::query_as::<_, Station>(
        "SELECT station, name, latitude, longitude, elevation FROM station ORDER BY station",
    )
    .fetch_all(conn)
    .await?;

    Ok(stations)
}

/// The most recent `limit` observations, newest first
pub async fn latest_observations(
    conn: &mut SqliteConnection,
    limit: i64,
) -> Result<Vec<Observation>> {
    let rows = sqlx::query_as::<_, Observation>(
        "SELECT station, date, prcp, tobs FROM measurement \
         ORDER BY date DESC, station LIMIT ?1",
    )
    .bind(limit)
    .fetch_all(conn)
    .await?;

    Ok(rows)
}
