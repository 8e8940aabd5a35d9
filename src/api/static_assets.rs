//! Embedded single-page UI.
//!
//! In release mode: Assets are embedded into the binary at compile time.
//! In debug mode: rust-embed reads from the filesystem (static/) at runtime.

use axum::{
    body::Body,
    http::{Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

/// The page and its script and stylesheet.
#[derive(RustEmbed)]
#[folder = "static/"]
#[include = "*.html"]
#[include = "*.js"]
#[include = "*.css"]
struct FrontendAssets;

/// Serve embedded assets.
///
/// Routing logic:
/// 1. Skip anything under api/ or docs (unmatched routes of those routers)
/// 2. Root path serves index.html
/// 3. Exact file match (e.g., /script.js, /style.css)
/// 4. Otherwise 404
pub async fn serve_frontend(method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::NOT_FOUND.into_response();
    }

    let path = uri.path().trim_start_matches('/');

    if path == "api" || path.starts_with("api/") || path.starts_with("docs") {
        return StatusCode::NOT_FOUND.into_response();
    }

    let asset_path = if path.is_empty() { "index.html" } else { path };

    match FrontendAssets::get(asset_path) {
        Some(content) => {
            let mime = mime_guess::from_path(asset_path).first_or_octet_stream();

            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, mime.as_ref().to_string()),
                    // Assets are not content-hashed, so always revalidate
                    (header::CACHE_CONTROL, "no-cache".to_string()),
                ],
                Body::from(content.data),
            )
                .into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
