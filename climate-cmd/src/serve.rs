//! Start the HTTP reporting server.

use climate_api::Settings;
use climate_db::Database;
use log::info;

/// Open the dataset read-only and serve it until shutdown.
pub async fn run_serve(settings: &Settings) -> anyhow::Result<()> {
    info!("Opening dataset {}", settings.database.path);
    let db = Database::open(&settings.database.path)?;
    info!(
        "Dataset holds {} measurements from {} stations",
        db.count_measurements()?,
        db.count_stations()?
    );
    climate_api::server::run(settings, db).await
}
