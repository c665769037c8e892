//! Storage result types
//!
//! Defines result structures returned by storage operations.

use std::path::PathBuf;

/// Result of saving a caption/image resource pair
#[derive(Debug, Clone)]
pub struct ResourceUpload {
    pub number: u64,
    pub text_filename: String,
    pub image_filename: String,
}

/// Result of overwriting an image slot
#[derive(Debug, Clone)]
pub struct SlotUpload {
    pub filename: String,
    pub file_path: PathBuf,
}

/// Result of deleting a resource pair
#[derive(Debug, Clone)]
pub struct ResourceDeletion {
    pub number: String,
    pub deleted_text: bool,
    pub deleted_image: bool,
}
