//! Router assembly

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::http::handlers;
use crate::http::state::AppState;
use crate::middleware::{hide_temp_files, log_request};
use crate::ui;

/// Builds the full application router: REST endpoints, static uploads, and admin pages.
pub fn build_router(state: AppState) -> Router {
    let uploads = Router::new()
        .nest_service("/uploads", ServeDir::new(state.upload_dir.as_path()))
        .layer(middleware::from_fn(hide_temp_files));
    let body_limit = state.config.max_upload_size_bytes();

    Router::new()
        .route("/", get(handlers::health))
        .route("/upload", post(handlers::upload))
        .route("/delete/:filename", delete(handlers::delete_image))
        .route("/delete-resource/:number", delete(handlers::delete_resource))
        .merge(ui::routes())
        .merge(uploads)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
