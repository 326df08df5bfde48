use axum::{middleware, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{self, charts, insights, recipes};
use super::health;
use super::middleware::logging_middleware;
use super::state::AppState;

/// Create the full router with application state
///
/// Every endpoint is served under its short name and under the
/// `/api/get-*` name.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/health", get(health::health_check))
        .route("/insights", get(insights::get_insights))
        .route("/api/get-insights", get(insights::get_insights))
        .route("/recipes", get(recipes::get_recipes))
        .route("/api/get-recipes", get(recipes::get_recipes))
        .route("/charts", get(charts::get_charts))
        .route("/api/get-charts", get(charts::get_charts))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
