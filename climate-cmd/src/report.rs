//! Run a single reporting operation against a dataset file.

use clap::ValueEnum;
use climate_api::{service::route_listing, ReportingService};
use climate_db::Database;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Route listing
    Routes,
    /// Date to precipitation for the last year of data
    Precipitation,
    /// Station names
    Stations,
    /// Temperature observations of the most active station for the last year
    Tobs,
    /// TMIN/TAVG/TMAX for --start [--end]
    Stats,
}

/// Produce the pretty-printed JSON a report would return over HTTP.
///
/// `routes` is returned as the raw listing text and does not open the dataset.
pub fn run_report(
    database: &str,
    kind: ReportKind,
    start: Option<&str>,
    end: Option<&str>,
) -> anyhow::Result<String> {
    match kind {
        ReportKind::Routes => Ok(route_listing()),
        ReportKind::Precipitation => to_json(&open_service(database)?.precipitation_last_year()?),
        ReportKind::Stations => to_json(&open_service(database)?.list_stations()?),
        ReportKind::Tobs => to_json(&open_service(database)?.tobs_last_year()?),
        ReportKind::Stats => {
            let start = start.ok_or_else(|| anyhow::anyhow!("--start is required for stats"))?;
            to_json(&open_service(database)?.stats_for_range(start, end)?)
        }
    }
}

fn open_service(database: &str) -> anyhow::Result<ReportingService> {
    Ok(ReportingService::new(Database::open(database)?))
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
