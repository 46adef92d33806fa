//! HTTP handler for embedded static assets.

use axum::{
    body::Body,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;
use tracing::{debug, instrument};

#[derive(RustEmbed)]
#[folder = "static/"]
struct Assets;

/// Serve a file from `static/`, or 404 for anything else.
#[instrument]
pub async fn serve_embedded_asset(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    match Assets::get(path) {
        Some(content) if !path.is_empty() => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                [
                    (header::CONTENT_TYPE, mime.as_ref().to_string()),
                    (header::CACHE_CONTROL, "public, max-age=3600".to_string()),
                ],
                Body::from(content.data.into_owned()),
            )
                .into_response()
        }
        _ => {
            debug!("No route or asset for {}", uri.path());
            (StatusCode::NOT_FOUND, "Not Found").into_response()
        }
    }
}
