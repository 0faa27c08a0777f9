use axum::{
    extract::{Path, State},
    response::Json,
};
use common::errors::AppError;
use common::models::{DashboardResponse, ForecastSeries};
use std::sync::Arc;
use tracing::info;

use crate::api_client::OpenWeatherMapClient;
use crate::presentation::build_dashboard;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<OpenWeatherMapClient>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check")
    )
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "service": "forecast-service" }))
}

#[utoipa::path(
    get,
    path = "/api/forecast/{place}",
    params(
        ("place" = String, Path, description = "Place name")
    ),
    responses(
        (status = 200, description = "Today's strip and the multi-day outlook", body = DashboardResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Unknown place or empty forecast"),
        (status = 502, description = "Upstream failure")
    ),
    tag = "forecast"
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(place): Path<String>,
) -> Result<Json<DashboardResponse>, AppError> {
    info!(place = %place, "Dashboard request received");

    let series = state.client.get_forecast(&place).await?;
    let dashboard = build_dashboard(&series)?;

    Ok(Json(dashboard))
}

#[utoipa::path(
    get,
    path = "/api/forecast/{place}/raw",
    params(
        ("place" = String, Path, description = "Place name")
    ),
    responses(
        (status = 200, description = "Sanitized forecast series", body = ForecastSeries),
        (status = 400, description = "Invalid request"),
        (status = 502, description = "Upstream failure")
    ),
    tag = "forecast"
)]
pub async fn get_series(
    State(state): State<AppState>,
    Path(place): Path<String>,
) -> Result<Json<ForecastSeries>, AppError> {
    info!(place = %place, "Series request received");

    let series = state.client.get_forecast(&place).await?;

    Ok(Json(series))
}
