//! Briefing server - route weather, great-circle geometry and performance over HTTP

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aura_server::api;
use aura_server::config::Config;
use aura_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("aura_server=debug".parse()?))
        .init();

    tracing::info!("Starting briefing server...");

    let config = Config::from_env();
    let port = config.server_port;
    tracing::info!(
        arc_samples = config.arc_samples,
        max_arc_samples = config.max_arc_samples,
        default_aircraft = %config.default_aircraft,
        body_limit_bytes = config.body_limit_bytes,
        "configuration loaded"
    );

    let mut app = api::routes(&config)
        .with_state(Arc::new(AppState::new(config.clone())))
        .layer(TraceLayer::new_for_http());
    if config.cors_permissive {
        app = app.layer(CorsLayer::permissive());
    }

    // Run server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
