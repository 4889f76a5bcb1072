//! Read-only JSON reporting service over the station climate dataset.
//!
//! Five fixed routes, each a single filtered aggregate query against the
//! [`climate_db::Database`] handle injected at startup:
//!
//! | Path | Response |
//! |---|---|
//! | `/` | HTML listing of routes |
//! | `/api/v1.0/precipitation` | date → precipitation for the last year of data |
//! | `/api/v1.0/stations` | `[{name}]` |
//! | `/api/v1.0/tobs` | `[{station_name}, {date, tobs}, ...]` for the most active station |
//! | `/api/v1.0/{start}` and `/api/v1.0/{start}/{end}` | `[{start_date, end_date}, {TMIN}, {TAVG}, {TMAX}]` |

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod service;

pub use config::Settings;
pub use error::ApiError;
pub use routes::create_app;
pub use service::ReportingService;
