//! Error handlers
//!
//! Maps errors to HTTP status codes and JSON error bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;

use crate::error::types::{AppError, StorageError};
use crate::http::responses::MessageResponse;

/// Log an error that will be reported as a server failure
pub fn handle_error(err: &AppError) {
    error!("Request failed: {}", err);
}

/// Convert a storage error to an HTTP status code
pub fn storage_error_to_status(err: &StorageError) -> StatusCode {
    match err {
        StorageError::InvalidFilename { .. } => StatusCode::BAD_REQUEST,
        StorageError::InvalidNumber(_) => StatusCode::BAD_REQUEST,
        StorageError::FileNotFound(_) => StatusCode::NOT_FOUND,
        StorageError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
        StorageError::FileAlreadyExists(_) => StatusCode::INTERNAL_SERVER_ERROR,
        StorageError::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert an application error to an HTTP status code
pub fn error_to_status(err: &AppError) -> StatusCode {
    match err {
        AppError::Storage { error, .. } => storage_error_to_status(error),
        AppError::Upload(_) => StatusCode::BAD_REQUEST,
    }
}

/// Build the JSON body reported to the client
pub fn error_to_body(err: &AppError) -> MessageResponse {
    match err {
        AppError::Storage { context, error } => match error {
            StorageError::FileAlreadyExists(_) => {
                MessageResponse::with_error("File name conflict", error.to_string())
            }
            StorageError::IoError(e) => MessageResponse::with_error(*context, e.to_string()),
            _ => MessageResponse::new(error.to_string()),
        },
        AppError::Upload(e) => MessageResponse::new(e.to_string()),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = error_to_status(&self);
        if status.is_server_error() {
            handle_error(&self);
        }
        (status, axum::Json(error_to_body(&self))).into_response()
    }
}
