// Route table
use crate::infrastructure::static_files::STATIC_ROUTE_PREFIX;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    default_page, health_check, page, page_content, preview_notes, static_asset,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/", get(default_page))
        .route("/:slug", get(page))
        .route("/api/pages/:slug/content", get(page_content))
        .route("/api/notes/preview", post(preview_notes))
        .route(&format!("{STATIC_ROUTE_PREFIX}/*path"), get(static_asset))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
