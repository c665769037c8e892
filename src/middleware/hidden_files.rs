//! Hidden file filter
//!
//! Keeps in-progress uploads and other dotfiles out of the static uploads mount.

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use log::debug;

use crate::storage::{TEMP_SUFFIX, is_hidden_name};

/// Answers 404 for any path with a hidden or temporary segment
pub async fn hide_temp_files(request: Request, next: Next) -> Response {
    if request.uri().path().split('/').any(is_concealed_segment) {
        debug!("Refusing to serve {}", request.uri().path());
        return StatusCode::NOT_FOUND.into_response();
    }
    next.run(request).await
}

fn is_concealed_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    is_hidden_name(&decoded) || decoded.ends_with(TEMP_SUFFIX)
}
