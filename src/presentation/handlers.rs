// HTTP request handlers
use crate::domain::html::Html;
use crate::infrastructure::http_response::{accepts_brotli, bytes_response, html_response};
use crate::infrastructure::static_files::{content_type, static_file};
use crate::infrastructure::template::TemplateError;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub html: String,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// The first configured page
pub async fn default_page(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let rendered = state.dashboard_service.render_default_page();
    page_response(rendered, "/", &headers).await
}

/// A page by slug
pub async fn page(
    Path(slug): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let rendered = state.dashboard_service.render_page(&slug);
    page_response(rendered, &slug, &headers).await
}

/// Widget markup of a page, without the surrounding document
pub async fn page_content(
    Path(slug): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.dashboard_service.render_page_content(&slug) {
        Some(html) => into_html_response(html, &headers).await,
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Render note text the way the notes widget displays it
pub async fn preview_notes(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PreviewRequest>,
) -> Json<PreviewResponse> {
    let html = state.dashboard_service.preview_markdown(&request.content);
    Json(PreviewResponse {
        html: html.into_string(),
    })
}

/// Embedded client assets such as the notes script
pub async fn static_asset(Path(path): Path<String>, headers: HeaderMap) -> Response {
    let Some(bytes) = static_file(&path) else {
        tracing::debug!(path = %path, "Static file not found");
        return StatusCode::NOT_FOUND.into_response();
    };

    match bytes_response(bytes.to_vec(), content_type(&path), accepts_brotli(&headers)).await {
        Ok(response) => response.into_response(),
        Err(status) => status.into_response(),
    }
}

async fn page_response(
    rendered: Result<Option<Html>, TemplateError>,
    slug: &str,
    headers: &HeaderMap,
) -> Response {
    match rendered {
        Ok(Some(html)) => into_html_response(html, headers).await,
        Ok(None) => {
            tracing::debug!(slug = %slug, "Page not found");
            StatusCode::NOT_FOUND.into_response()
        }
        Err(e) => {
            tracing::error!(slug = %slug, error = %e, "Failed to render page");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn into_html_response(html: Html, headers: &HeaderMap) -> Response {
    match html_response(html, accepts_brotli(headers)).await {
        Ok(response) => response.into_response(),
        Err(status) => status.into_response(),
    }
}
