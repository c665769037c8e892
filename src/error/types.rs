//! Error types
//!
//! Defines domain-specific error types for the storage and upload layers.

use std::fmt;
use std::io;

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    /// Slot name is not in the allow-list; carries the allow-list for the message
    InvalidFilename {
        filename: String,
        allowed: Vec<String>,
    },
    InvalidNumber(String),
    FileNotFound(String),
    ResourceNotFound(String),
    FileAlreadyExists(String),
    IoError(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::InvalidFilename { allowed, .. } => {
                write!(f, "File name must be one of: {}", allowed.join(", "))
            }
            StorageError::InvalidNumber(_) => {
                write!(f, "Invalid number. Must be a positive integer.")
            }
            StorageError::FileNotFound(name) => write!(f, "File {} not found", name),
            StorageError::ResourceNotFound(number) => {
                write!(f, "No files found for number {}", number)
            }
            StorageError::FileAlreadyExists(name) => write!(f, "File {} already exists", name),
            StorageError::IoError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

/// Upload form errors, raised while reading the multipart body
#[derive(Debug)]
pub enum UploadError {
    InvalidFileType {
        field: String,
        expected: &'static str,
    },
    UnexpectedField(String),
    DuplicateField(String),
    MissingFilename,
    InvalidRequest,
    Malformed(String),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::InvalidFileType { field, expected } => {
                write!(f, "Invalid file type for {}. Expected {}.", field, expected)
            }
            UploadError::UnexpectedField(field) => write!(f, "Unexpected field: {}", field),
            UploadError::DuplicateField(field) => {
                write!(f, "Field {} may only be sent once", field)
            }
            UploadError::MissingFilename => write!(f, "Uploaded image has no file name"),
            UploadError::InvalidRequest => write!(
                f,
                "Invalid upload request. Provide either both textfile and file, or only file."
            ),
            UploadError::Malformed(msg) => write!(f, "Malformed upload: {}", msg),
        }
    }
}

impl std::error::Error for UploadError {}

/// General server error returned by HTTP handlers
#[derive(Debug)]
pub enum AppError {
    /// Storage failure, with the message reported when the cause is an I/O error
    Storage {
        context: &'static str,
        error: StorageError,
    },
    Upload(UploadError),
}

impl AppError {
    /// Wraps a storage error with the message shown for unexpected I/O failures
    pub fn storage(context: &'static str, error: StorageError) -> Self {
        AppError::Storage { context, error }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Storage { context, error } => write!(f, "{}: {}", context, error),
            AppError::Upload(e) => write!(f, "Upload error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<UploadError> for AppError {
    fn from(error: UploadError) -> Self {
        AppError::Upload(error)
    }
}

