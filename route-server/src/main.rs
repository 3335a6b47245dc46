use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use route_server::cache::CacheConfig;
use route_server::config::ServerConfig;
use route_server::graph::GraphConfig;
use route_server::routing::RouteService;
use route_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("route_server=info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    // Load cities and build the graph (fail fast if unavailable)
    info!(source = %config.cities, "Loading city dataset");
    let routes = match RouteService::load(
        &config.cities,
        GraphConfig::default(),
        &CacheConfig::default(),
    )
    .await
    {
        Ok(routes) => Arc::new(routes),
        Err(e) => {
            error!(source = %config.cities, error = %e, "Failed to load city dataset");
            std::process::exit(1);
        }
    };

    // Spawn background task to rebuild the graph periodically
    if let Some(period) = config.refresh_interval {
        let routes_refresh = routes.clone();
        let source = config.cities.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                if let Err(e) = routes_refresh.refresh(&source).await {
                    warn!(error = %e, "Failed to refresh city graph, keeping current one");
                }
            }
        });
    }

    // Build app state
    let state = AppState::new(routes);

    // Create router
    let app = create_router(state, &config.static_dir);

    // Bind and serve
    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %config.addr, "Route server listening on http://{}", config.addr);
    info!("API endpoints:");
    info!("  GET  /health             - Health check");
    info!("  GET  /api/cities         - List cities");
    info!("  GET  /api/cities/search  - Search cities by name");
    info!("  GET  /api/graph          - Graph statistics");
    info!("  POST /api/route          - Shortest route between two cities");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
