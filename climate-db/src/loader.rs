//! CSV data loading functions for building a dataset.
//!
//! Each loader parses CSV data from a string slice and inserts rows into the
//! corresponding table inside a single transaction. The CSV formats are the
//! two source files the published dataset was built from.
//!
//! # CSV Formats
//!
//! - **Stations** (has headers): `station,name,latitude,longitude,elevation`
//! - **Measurements** (has headers): `station,date,prcp,tobs`

use crate::models::{Measurement, Station};
use crate::Database;
use anyhow::Context;
use climate_utils::dates;
use rusqlite::params;

impl Database {
    /// Load station metadata from CSV string, returning the number of rows inserted.
    ///
    /// Expected format (with headers): `station,name,latitude,longitude,elevation`
    ///
    /// # Example CSV
    /// ```text
    /// station,name,latitude,longitude,elevation
    /// USC00519397,"WAIKIKI 717.2, HI US",21.2716,-157.8168,3.0
    /// ```
    pub fn load_stations(&self, csv_data: &str) -> anyhow::Result<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0usize;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO station (station, name, latitude, longitude, elevation)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (line, result) in rdr.records().enumerate() {
                let r = result?;
                let station = Station {
                    station: r.get(0).unwrap_or("").trim().to_string(),
                    name: r.get(1).unwrap_or("").trim().to_string(),
                    latitude: parse_coordinate(r.get(2), "latitude", line)?,
                    longitude: parse_coordinate(r.get(3), "longitude", line)?,
                    elevation: parse_coordinate(r.get(4), "elevation", line)?,
                };
                if station.station.is_empty() {
                    anyhow::bail!("station row {}: empty station identifier", line + 1);
                }
                stmt.execute(params![
                    station.station,
                    station.name,
                    station.latitude,
                    station.longitude,
                    station.elevation
                ])?;
                count += 1;
            }
        }
        tx.commit()?;
        log::info!("loader: Loaded {} stations", count);
        Ok(count)
    }

    /// Load measurements from CSV string, returning the number of rows inserted.
    ///
    /// Expected format (with headers): `station,date,prcp,tobs`
    ///
    /// Empty `prcp`/`tobs` fields are stored as NULL; so are non-numeric
    /// readings, which are counted and logged. Rows without a station, or
    /// whose date is not a `YYYY-MM-DD` calendar date, are skipped.
    ///
    /// # Example CSV
    /// ```text
    /// station,date,prcp,tobs
    /// USC00519397,2010-01-01,0.08,65
    /// USC00519397,2010-01-06,,73
    /// ```
    pub fn load_measurements(&self, csv_data: &str) -> anyhow::Result<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0usize;
        let mut skipped = 0usize;
        let mut unreadable = 0usize;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO measurement (station, date, prcp, tobs)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for result in rdr.records() {
                let r = result?;
                let station = r.get(0).unwrap_or("").trim();
                let date = r.get(1).unwrap_or("").trim();

                if station.is_empty() || date.is_empty() {
                    skipped += 1;
                    continue;
                }
                if let Err(e) = dates::parse_date(date) {
                    log::warn!("loader: skipping measurement for {}: {}", station, e);
                    skipped += 1;
                    continue;
                }

                let (prcp, prcp_ok) = parse_reading(r.get(2));
                let (tobs, tobs_ok) = parse_reading(r.get(3));
                if !prcp_ok || !tobs_ok {
                    unreadable += 1;
                }

                let m = Measurement {
                    station: station.to_string(),
                    date: date.to_string(),
                    prcp,
                    tobs,
                };
                stmt.execute(params![m.station, m.date, m.prcp, m.tobs])?;
                count += 1;
            }
        }
        tx.commit()?;
        log::info!(
            "loader: Loaded {} measurements, skipped {}, {} with unreadable readings",
            count,
            skipped,
            unreadable
        );
        Ok(count)
    }
}

fn parse_coordinate(field: Option<&str>, column: &str, line: usize) -> anyhow::Result<f64> {
    let raw = field.unwrap_or("").trim();
    raw.parse::<f64>()
        .with_context(|| format!("station row {}: invalid {} '{}'", line + 1, column, raw))
}

/// Parse an optional numeric reading. The flag is false when the field had
/// content that was not a number.
fn parse_reading(field: Option<&str>) -> (Option<f64>, bool) {
    let raw = field.unwrap_or("").trim();
    if raw.is_empty() {
        return (None, true);
    }
    match raw.parse::<f64>() {
        Ok(v) => (Some(v), true),
        Err(_) => (None, false),
    }
}
