use crate::{
    error::ApiError,
    service::{HealthReport, PrecipitationReport, ReportingService, StationName, StatsEntry, TobsEntry},
};
use axum::{
    Json, Router,
    extract::{Path, Request, State},
    middleware::{self, Next},
    response::{Html, Response},
    routing::get,
};
use std::time::Instant;

/// Build the application router around a shared reporting service.
pub fn create_app(service: ReportingService) -> Router {
    create_report_routes()
        .route("/health", get(health))
        .layer(middleware::from_fn(request_logger))
        .with_state(service)
}

/// Reporting routes. Static segments take precedence over `{start}`.
pub fn create_report_routes() -> Router<ReportingService> {
    Router::new()
        .route("/", get(home))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/{start}", get(stats_from))
        .route("/api/v1.0/{start}/{end}", get(stats_between))
}

async fn home(State(service): State<ReportingService>) -> Html<String> {
    Html(service.list_routes())
}

async fn precipitation(
    State(service): State<ReportingService>,
) -> Result<Json<PrecipitationReport>, ApiError> {
    let report = run_blocking(move || service.precipitation_last_year()).await?;
    Ok(Json(report))
}

async fn stations(
    State(service): State<ReportingService>,
) -> Result<Json<Vec<StationName>>, ApiError> {
    let stations = run_blocking(move || service.list_stations()).await?;
    Ok(Json(stations))
}

async fn tobs(State(service): State<ReportingService>) -> Result<Json<Vec<TobsEntry>>, ApiError> {
    let entries = run_blocking(move || service.tobs_last_year()).await?;
    Ok(Json(entries))
}

async fn stats_from(
    State(service): State<ReportingService>,
    Path(start): Path<String>,
) -> Result<Json<Vec<StatsEntry>>, ApiError> {
    let entries = run_blocking(move || service.stats_for_range(&start, None)).await?;
    Ok(Json(entries))
}

async fn stats_between(
    State(service): State<ReportingService>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<StatsEntry>>, ApiError> {
    let entries = run_blocking(move || service.stats_for_range(&start, Some(&end))).await?;
    Ok(Json(entries))
}

async fn health(State(service): State<ReportingService>) -> Result<Json<HealthReport>, ApiError> {
    let report = run_blocking(move || service.health()).await?;
    Ok(Json(report))
}

/// Run a SQLite-bound operation off the async worker threads.
async fn run_blocking<T, F>(op: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| ApiError::Internal(format!("blocking task failed: {}", e)))?
}

async fn request_logger(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    log::info!(
        "{} {} -> {} ({:?})",
        method,
        path,
        response.status().as_u16(),
        started.elapsed()
    );
    response
}
