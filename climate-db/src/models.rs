//! Row and query result model structs for the climate dataset.
//!
//! All structs derive `Serialize` so they can be handed straight to the
//! JSON layer.

use serde::Serialize;

/// A single observation row: one station on one date.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Measurement {
    /// Station identifier, references [`Station::station`].
    pub station: String,
    /// Observation date (`YYYY-MM-DD`).
    pub date: String,
    /// Precipitation in inches, if recorded.
    pub prcp: Option<f64>,
    /// Temperature observation in degrees Fahrenheit, if recorded.
    pub tobs: Option<f64>,
}

/// Station metadata.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Station {
    /// Station identifier (e.g. "USC00519281").
    pub station: String,
    /// Human readable station name.
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation in feet.
    pub elevation: f64,
}

/// A (date, precipitation) pair.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatePrecipitation {
    pub date: String,
    pub prcp: Option<f64>,
}

/// A (date, temperature observation) pair.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DateTobs {
    pub date: String,
    pub tobs: Option<f64>,
}

/// A station identifier with its number of measurement rows.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StationActivity {
    pub station: String,
    pub count: i64,
}

/// MIN/AVG/MAX of `tobs` over a date range.
///
/// Each aggregate is `None` when no row in the range has a temperature
/// observation, following SQL aggregate-of-empty-set semantics.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct TemperatureStats {
    pub tmin: Option<f64>,
    pub tavg: Option<f64>,
    pub tmax: Option<f64>,
}
