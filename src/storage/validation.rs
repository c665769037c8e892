//! Filename validation
//!
//! Checks slot names against the allow-list and resource numbers against `^\d+$`.

use crate::error::StorageError;

/// Lower-cases a submitted slot name and checks it against the allow-list.
pub fn validate_slot_name(filename: &str, allowed: &[String]) -> Result<String, StorageError> {
    let normalized = filename.to_lowercase();
    if allowed.iter().any(|name| *name == normalized) {
        Ok(normalized)
    } else {
        Err(StorageError::InvalidFilename {
            filename: normalized,
            allowed: allowed.to_vec(),
        })
    }
}

/// Accepts a non-empty run of ASCII digits, kept verbatim as the file stem.
pub fn validate_resource_number(number: &str) -> Result<&str, StorageError> {
    if !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()) {
        Ok(number)
    } else {
        Err(StorageError::InvalidNumber(number.to_string()))
    }
}
