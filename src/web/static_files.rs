//! Embedded stylesheet and script served under `/assets/`.
//!
//! The files are compiled into the binary from the `assets/` directory so the
//! server has no runtime file dependencies.

use axum::{
    body::Body,
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;

/// Static assets embedded at compile time.
#[derive(Embed)]
#[folder = "assets"]
#[include = "*.css"]
#[include = "*.js"]
#[include = "*.svg"]
#[include = "*.ico"]
#[include = "*.woff2"]
pub struct StaticAssets;

/// GET /assets/{*path} - Serves an embedded asset.
pub async fn serve_asset(Path(path): Path<String>) -> Response {
    let path = path.trim_start_matches('/');

    match StaticAssets::get(path) {
        Some(content) => file_response(path, content.data.as_ref()),
        None => (StatusCode::NOT_FOUND, "File not found").into_response(),
    }
}

/// Creates an HTTP response for a file with appropriate content type.
fn file_response(path: &str, content: &[u8]) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CACHE_CONTROL, cache_control_for_path(path))
        .body(Body::from(content.to_vec()))
        .unwrap_or_else(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create response",
            )
                .into_response()
        })
}

/// Returns the Cache-Control header for an asset.
///
/// Fonts and icons never change between releases; stylesheet and script are
/// revalidated so layout tweaks show up after an upgrade.
fn cache_control_for_path(path: &str) -> &'static str {
    let ext = std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();

    if ["woff2", "ico", "svg"]
        .iter()
        .any(|e| ext.eq_ignore_ascii_case(e))
    {
        "public, max-age=31536000, immutable"
    } else {
        "public, max-age=300, must-revalidate"
    }
}

/// Returns true if the stylesheet and script were embedded.
#[must_use]
pub fn has_embedded_assets() -> bool {
    StaticAssets::get("site.css").is_some() && StaticAssets::get("app.js").is_some()
}
