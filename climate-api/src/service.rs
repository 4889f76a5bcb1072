//! The reporting operations behind each route.
//!
//! Every operation is a synchronous read against the injected [`Database`]
//! handle followed by a reshape into the JSON contract of its route. The
//! response shapes are deliberately irregular (a header object followed by
//! data objects, single-key aggregate objects) and are kept that way for
//! compatibility with existing clients.

use crate::error::ApiError;
use climate_db::Database;
use climate_utils::dates;
use serde::Serialize;
use std::collections::BTreeMap;

/// Route listing served at `/`.
pub const ROUTE_LISTING: [&str; 5] = [
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/(input starting date)",
    "/api/v1.0/(input starting date)/(input ending date)",
];

/// Date to precipitation for the last year of data.
pub type PrecipitationReport = BTreeMap<String, Option<f64>>;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StationName {
    pub name: String,
}

/// One element of the `/tobs` response: the header naming the station,
/// then one observation per row.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum TobsEntry {
    Header { station_name: String },
    Observation { date: String, tobs: Option<f64> },
}

/// One element of the date range statistics response.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum StatsEntry {
    Range { start_date: String, end_date: String },
    Min {
        #[serde(rename = "TMIN")]
        tmin: Option<f64>,
    },
    Avg {
        #[serde(rename = "TAVG")]
        tavg: Option<f64>,
    },
    Max {
        #[serde(rename = "TMAX")]
        tmax: Option<f64>,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HealthReport {
    pub status: &'static str,
    pub measurements: i64,
    pub stations: i64,
    pub latest_date: Option<String>,
}

#[derive(Clone)]
pub struct ReportingService {
    db: Database,
}

impl ReportingService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// HTML listing of the available routes.
    pub fn list_routes(&self) -> String {
        route_listing()
    }

    /// Precipitation for every date in the year ending at the latest observation.
    pub fn precipitation_last_year(&self) -> Result<PrecipitationReport, ApiError> {
        let window_start = self.window_start()?;
        let rows = self.db.query_precipitation_since(&window_start)?;

        // Several stations report on the same date. Rows arrive in table
        // order and a later row overwrites an earlier one for the same date.
        let mut report = PrecipitationReport::new();
        for row in rows {
            report.insert(row.date, row.prcp);
        }
        Ok(report)
    }

    /// Names of all stations, in table order.
    pub fn list_stations(&self) -> Result<Vec<StationName>, ApiError> {
        Ok(self
            .db
            .query_stations()?
            .into_iter()
            .map(|station| StationName { name: station.name })
            .collect())
    }

    /// Temperature observations of the most active station over the last year of data.
    pub fn tobs_last_year(&self) -> Result<Vec<TobsEntry>, ApiError> {
        let window_start = self.window_start()?;
        let most_active = self
            .db
            .query_most_active_station()?
            .ok_or(ApiError::NoData)?;
        log::debug!(
            "most active station {} with {} rows",
            most_active.station,
            most_active.count
        );

        let rows = self
            .db
            .query_tobs_since(&most_active.station, &window_start)?;

        let mut entries = Vec::with_capacity(rows.len() + 1);
        entries.push(TobsEntry::Header {
            station_name: most_active.station,
        });
        entries.extend(rows.into_iter().map(|row| TobsEntry::Observation {
            date: row.date,
            tobs: row.tobs,
        }));
        Ok(entries)
    }

    /// TMIN/TAVG/TMAX over `start..=end`.
    ///
    /// Without an `end`, the range runs to the latest date in the whole
    /// dataset. Both bounds must be `YYYY-MM-DD` calendar dates.
    pub fn stats_for_range(&self, start: &str, end: Option<&str>) -> Result<Vec<StatsEntry>, ApiError> {
        validate_date(start)?;
        let end = match end {
            Some(end) => {
                validate_date(end)?;
                end.to_string()
            }
            None => self.db.query_max_date()?.ok_or(ApiError::NoData)?,
        };

        let stats = self.db.query_temperature_stats(start, &end)?;
        Ok(vec![
            StatsEntry::Range {
                start_date: start.to_string(),
                end_date: end,
            },
            StatsEntry::Min { tmin: stats.tmin },
            StatsEntry::Avg { tavg: stats.tavg },
            StatsEntry::Max { tmax: stats.tmax },
        ])
    }

    pub fn health(&self) -> Result<HealthReport, ApiError> {
        Ok(HealthReport {
            status: "ok",
            measurements: self.db.count_measurements()?,
            stations: self.db.count_stations()?,
            latest_date: self.db.query_max_date()?,
        })
    }

    /// Start of the one-year window ending at the latest observation date.
    fn window_start(&self) -> Result<String, ApiError> {
        let max_date = self.db.query_max_date()?.ok_or(ApiError::NoData)?;
        Ok(dates::window_start(&max_date)?)
    }
}

/// HTML listing of [`ROUTE_LISTING`]. Needs no dataset.
pub fn route_listing() -> String {
    let mut listing = String::from("All Available Routes Below:");
    for route in ROUTE_LISTING {
        listing.push_str("<br/>");
        listing.push_str(route);
    }
    listing
}

fn validate_date(value: &str) -> Result<(), ApiError> {
    dates::parse_date(value)
        .map(|_| ())
        .map_err(|e| ApiError::InvalidInput(e.to_string()))
}
