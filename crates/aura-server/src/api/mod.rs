//! API routes for the briefing server.

pub mod briefing;
pub mod error;
pub mod geodesic;
pub mod performance;
pub mod request_id;
mod routes;

use crate::config::Config;
use axum::Router;

pub fn routes(config: &Config) -> Router<std::sync::Arc<crate::state::AppState>> {
    routes::create_router(config)
}
