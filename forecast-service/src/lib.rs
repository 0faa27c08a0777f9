pub mod aggregator;
pub mod api_client;
pub mod cache;
pub mod config;
pub mod handlers;
pub mod openapi;
pub mod presentation;
pub mod sanitize;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn app(state: handlers::AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/forecast/{place}", get(handlers::get_dashboard))
        .route("/api/forecast/{place}/raw", get(handlers::get_series))
        .merge(openapi::swagger_ui())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
