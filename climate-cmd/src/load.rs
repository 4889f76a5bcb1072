//! Build a dataset file from its two source CSVs.

use anyhow::Context;
use climate_db::Database;
use log::info;

/// Create `database` and fill it from the stations and measurements CSVs.
///
/// Refuses to append to a dataset that already holds rows, so running the
/// command twice cannot silently double every measurement.
pub fn run_load(stations_csv: &str, measurements_csv: &str, database: &str) -> anyhow::Result<()> {
    let stations_data = std::fs::read_to_string(stations_csv)
        .with_context(|| format!("failed to read {}", stations_csv))?;
    let measurements_data = std::fs::read_to_string(measurements_csv)
        .with_context(|| format!("failed to read {}", measurements_csv))?;

    let db = Database::create(database)?;
    if db.count_measurements()? > 0 || db.count_stations()? > 0 {
        anyhow::bail!("{} already contains data; remove it first", database);
    }

    let stations = db.load_stations(&stations_data)?;
    let measurements = db.load_measurements(&measurements_data)?;

    info!(
        "Load complete. {} stations and {} measurements written to {}",
        stations, measurements, database
    );
    Ok(())
}
