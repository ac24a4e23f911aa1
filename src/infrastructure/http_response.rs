// HTTP response utilities for HTML and static assets with optional Brotli encoding
use crate::domain::html::Html;
use async_compression::tokio::bufread::BrotliEncoder;
use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Response, StatusCode},
};
use tokio::io::AsyncReadExt;

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Whether the client accepts Brotli compressed bodies. `br;q=0` means "not acceptable".
pub fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(',').any(accepts_coding("br")))
        .unwrap_or(false)
}

fn accepts_coding(coding: &str) -> impl Fn(&str) -> bool + '_ {
    move |entry: &str| {
        let mut params = entry.split(';').map(str::trim);
        if !params.next().is_some_and(|name| name.eq_ignore_ascii_case(coding)) {
            return false;
        }

        params
            .filter_map(|param| param.split_once('='))
            .find(|(key, _)| key.trim().eq_ignore_ascii_case("q"))
            .map(|(_, q)| q.trim().parse::<f32>().is_ok_and(|q| q > 0.0))
            .unwrap_or(true)
    }
}

pub async fn brotli_compress(bytes: Vec<u8>) -> std::io::Result<Vec<u8>> {
    let mut encoder = BrotliEncoder::new(std::io::Cursor::new(bytes));
    let mut compressed = Vec::new();
    encoder.read_to_end(&mut compressed).await?;
    Ok(compressed)
}

/// Build an HTML response, Brotli compressed when `compress` is set
pub async fn html_response(html: Html, compress: bool) -> Result<Response<Body>, StatusCode> {
    bytes_response(html.into_string().into_bytes(), HTML_CONTENT_TYPE, compress).await
}

/// Build a response for any body, Brotli compressed when `compress` is set
pub async fn bytes_response(
    bytes: Vec<u8>,
    content_type: &'static str,
    compress: bool,
) -> Result<Response<Body>, StatusCode> {
    let (body_bytes, content_encoding) = if compress {
        let original_len = bytes.len();
        let compressed = brotli_compress(bytes).await.map_err(|e| {
            tracing::error!(error = %e, "Brotli compression failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        tracing::debug!(
            original = original_len,
            compressed = compressed.len(),
            content_type,
            "Compressed response"
        );
        (compressed, Some("br"))
    } else {
        (bytes, None)
    };

    let mut response_builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::VARY, "accept-encoding")
        .header(header::CONTENT_LENGTH, HeaderValue::from(body_bytes.len()));

    if let Some(encoding) = content_encoding {
        response_builder = response_builder.header(header::CONTENT_ENCODING, encoding);
    }

    response_builder.body(Body::from(body_bytes)).map_err(|e| {
        tracing::error!(error = %e, "Response build error");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
