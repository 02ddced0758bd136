//! Print the layout and contents overview of a climate dataset file.
//!
//! Usage: `inspect_dataset [PATH]` (defaults to `Resources/hawaii.sqlite`).

use anyhow::Context;
use std::path::PathBuf;

use surfsup::config::DEFAULT_DATABASE_PATH;
use surfsup::{database, queries, schema};

const SAMPLE_SIZE: i64 = 10;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));

    println!("Inspecting dataset: {}", path.display());

    let pool = database::open_dataset(&path, 1)
        .await
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut conn = pool.acquire().await?;

    println!("\n=== TABLES ===");
    for spec in schema::TABLES {
        println!("\n{}:", spec.name);
        for column in schema::table_columns(&mut conn, spec.name).await? {
            let affinity = schema::Affinity::from_declared_type(&column.declared_type);
            println!("  {} {} ({:?})", column.name, column.declared_type, affinity);
        }
    }

    let summary = database::summarize(&mut conn, &path.display().to_string())
        .await
        .context("failed to summarize dataset")?;

    println!("\n=== SUMMARY ===");
    println!("  observations:      {}", summary.observation_count);
    println!("  stations:          {}", summary.station_count);
    println!("  observed stations: {}", summary.observed_station_count);
    println!(
        "  date span:         {} .. {}",
        summary.first_date.as_deref().unwrap_or("-"),
        summary.last_date.as_deref().unwrap_or("-")
    );

    println!("\n=== STATIONS ===");
    for station in queries::station_catalog(&mut conn).await? {
        println!(
            "  {:<12} {:<40} lat={:>9} lon={:>10} elev={:>6}",
            station.station,
            station.name.as_deref().unwrap_or(""),
            fmt_opt(station.latitude),
            fmt_opt(station.longitude),
            fmt_opt(station.elevation),
        );
    }

    println!("\n=== LATEST OBSERVATIONS ===");
    for observation in queries::latest_observations(&mut conn, SAMPLE_SIZE).await? {
        println!(
            "  {:<12} {}  prcp={:>5} tobs={:>5}",
            observation.station,
            observation.date,
            fmt_opt(observation.prcp),
            observation.tobs,
        );
    }

    Ok(())
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
