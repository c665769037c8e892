//! File system storage management
//!
//! Handles resource numbering, slot validation, and file operations
//! in the upload directory.

pub mod filesystem;
pub mod naming;
pub mod operations;
pub mod results;
pub mod validation;

pub use filesystem::{TEMP_SUFFIX, ensure_upload_dir, is_hidden_name, list_uploads};
pub use operations::{delete_resource, delete_slot_image, save_resource, save_slot_image};
pub use results::{ResourceDeletion, ResourceUpload, SlotUpload};
