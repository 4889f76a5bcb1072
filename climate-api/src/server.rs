use crate::{config::Settings, routes::create_app, service::ReportingService};
use anyhow::Context;
use climate_db::Database;
use tokio::net::TcpListener;

/// Serve the reporting routes until Ctrl-C.
///
/// The dataset handle is opened once by the caller and shared by every request.
pub async fn run(settings: &Settings, db: Database) -> anyhow::Result<()> {
    let app = create_app(ReportingService::new(db));

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    log::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    log::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Graceful shutdown initiated");
}
