//! SQL schema definitions for the climate dataset.
//!
//! The table layout matches the published dataset file, so applying the
//! schema to an existing file is a no-op and the query layer never has to
//! discover columns at runtime.

use rusqlite::Connection;

/// Tables every dataset file must contain.
pub const REQUIRED_TABLES: [&str; 2] = ["measurement", "station"];

/// Returns the full SQL schema as a single batch string.
///
/// This creates the following tables:
///
/// - `measurement` - Daily observations (station identifier, ISO date,
///   precipitation, temperature observation). Both readings are nullable.
/// - `station` - Station metadata (identifier, name, coordinates, elevation)
///
/// Dates are stored as `YYYY-MM-DD` text, so lexicographic comparison in SQL
/// is chronological comparison.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS measurement (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL,
        date TEXT NOT NULL,
        prcp REAL,
        tobs REAL
    );
    CREATE INDEX IF NOT EXISTS idx_measurement_station ON measurement(station);
    CREATE INDEX IF NOT EXISTS idx_measurement_date ON measurement(date);

    CREATE TABLE IF NOT EXISTS station (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL,
        name TEXT NOT NULL,
        latitude REAL NOT NULL,
        longitude REAL NOT NULL,
        elevation REAL NOT NULL
    );
    "#
}

/// Check that a connection holds every table in [`REQUIRED_TABLES`].
pub fn verify_schema(conn: &Connection) -> anyhow::Result<()> {
    for table in REQUIRED_TABLES {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |row| row.get(0),
        )?;
        if count != 1 {
            anyhow::bail!("missing required table '{}'", table);
        }
    }
    Ok(())
}
