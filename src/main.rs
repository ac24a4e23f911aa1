// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::config::load_dashboard_config;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

const DEFAULT_LOG_FILTER: &str = "homeboard=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Build and initialize widgets (application layer)
    let dashboard_service =
        DashboardService::from_config(&config).context("failed to initialize widgets")?;
    for page in dashboard_service.pages() {
        tracing::info!(page = %page.name, path = %format!("/{}", page.slug), "Serving page");
    }

    let state = Arc::new(AppState { dashboard_service });
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .address()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.server.address()))?;
    tracing::info!(%addr, "Starting homeboard");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Unable to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
