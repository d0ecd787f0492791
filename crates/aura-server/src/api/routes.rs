//! REST API routes.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;

use crate::api::{briefing, geodesic, performance, request_id};
use crate::config::Config;
use crate::state::AppState;

/// Create the API router.
pub fn create_router(config: &Config) -> Router<Arc<AppState>> {
    let read_routes = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/v1/aircraft", get(performance::list_aircraft));

    // Report payloads can be large; everything that takes a body is capped
    let compute_routes = Router::new()
        .route("/v1/geodesic/arc", post(geodesic::build_arc))
        .route("/v1/performance", post(performance::estimate))
        .route("/v1/briefing", post(briefing::create_briefing))
        .route("/v1/alternatives", post(briefing::suggest_alternatives))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes));

    read_routes
        .merge(compute_routes)
        .layer(middleware::from_fn(request_id::ensure_request_id))
}
