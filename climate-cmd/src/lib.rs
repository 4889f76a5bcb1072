//! Command implementations for the climate CLI.
//!
//! Provides subcommands for serving the reporting API, building a dataset
//! file from its source CSVs, and running a single report from the shell.

use clap::Subcommand;
use climate_api::Settings;

pub mod load;
pub mod report;
pub mod serve;

pub use report::ReportKind;

#[derive(Subcommand)]
pub enum Command {
    /// Serve the reporting API over HTTP
    Serve {
        /// Address to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the SQLite dataset (overrides database.path)
        #[arg(short, long)]
        database: Option<String>,
    },

    /// Build a dataset file from station and measurement CSVs
    Load {
        /// Stations CSV: station,name,latitude,longitude,elevation
        #[arg(short, long)]
        stations: String,

        /// Measurements CSV: station,date,prcp,tobs
        #[arg(short, long)]
        measurements: String,

        /// Path of the SQLite dataset to create (defaults to database.path)
        #[arg(short, long)]
        database: Option<String>,
    },

    /// Run one report and print its JSON to stdout
    Report {
        #[arg(value_enum)]
        kind: ReportKind,

        /// Range start (YYYY-MM-DD), required for `stats`
        #[arg(long)]
        start: Option<String>,

        /// Range end (YYYY-MM-DD); defaults to the latest date in the dataset
        #[arg(long)]
        end: Option<String>,

        /// Path to the SQLite dataset (defaults to database.path)
        #[arg(short, long)]
        database: Option<String>,
    },
}

pub async fn run(command: Command, mut settings: Settings) -> anyhow::Result<()> {
    match command {
        Command::Serve {
            host,
            port,
            database,
        } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            if let Some(database) = database {
                settings.database.path = database;
            }
            serve::run_serve(&settings).await
        }
        Command::Load {
            stations,
            measurements,
            database,
        } => {
            let database = database.unwrap_or(settings.database.path);
            load::run_load(&stations, &measurements, &database)
        }
        Command::Report {
            kind,
            start,
            end,
            database,
        } => {
            let database = database.unwrap_or(settings.database.path);
            let json = report::run_report(&database, kind, start.as_deref(), end.as_deref())?;
            println!("{}", json);
            Ok(())
        }
    }
}
