//! HTTP response bodies
//!
//! JSON shapes returned by the upload and delete endpoints.

use serde::Serialize;

/// Generic `{"message": ..., "error": ...}` body used for deletes and errors
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }

    pub fn with_error(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResourceUrls {
    pub text: String,
    pub image: String,
}

/// Body returned after a caption/image pair is stored
#[derive(Debug, Serialize)]
pub struct ResourceUploadResponse {
    pub message: String,
    pub textfile: String,
    pub image: String,
    pub urls: ResourceUrls,
}

/// Body returned after an image slot is overwritten
#[derive(Debug, Serialize)]
pub struct SlotUploadResponse {
    pub message: String,
    pub filename: String,
    pub url: String,
}

pub const UPLOAD_SUCCESSFUL: &str = "Upload successful";
pub const SERVER_RUNNING: &str = "Server is running ✅";
