//! File system operations
//!
//! Low-level helpers over the upload directory.

use log::debug;
use std::io::{self, Result, Write};
use std::path::Path;
use tokio::fs;

/// Temporary files are hidden (`.` prefix) and never match a resource or slot name.
pub const TEMP_PREFIX: &str = ".upload-";
pub const TEMP_SUFFIX: &str = ".tmp";

/// Create the upload directory and its parents
pub async fn ensure_upload_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).await
}

/// Check if a regular file exists
pub async fn file_exists(path: &Path) -> Result<bool> {
    match fs::metadata(path).await {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Writes `contents` to a uniquely named temporary file in the same
/// directory, then renames it over `path`.
///
/// Concurrent writers to the same path each get their own temporary file;
/// the last rename wins and readers never see a partial file.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let path = path.to_path_buf();
    let contents = contents.to_vec();
    tokio::task::spawn_blocking(move || write_atomic_blocking(&path, &contents))
        .await
        .map_err(io::Error::other)?
}

fn write_atomic_blocking(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Dropped (and removed) on any early return.
    let mut temp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)?;
    temp.write_all(contents)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// True for names written by `write_atomic` or any other hidden entry
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}

/// Removes a file, reporting whether it was there.
pub async fn remove_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Sorted names of the entries in the upload directory
pub async fn list_uploads(dir: &Path) -> Result<Vec<String>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().to_string());
    }
    names.sort();
    debug!("Listed {} entries in {}", names.len(), dir.display());
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_names_are_hidden() {
        assert!(is_hidden_name(".upload-a1b2c3.tmp"));
        assert!(is_hidden_name(".env"));
        assert!(!is_hidden_name("banner1.jpg"));
    }

    #[tokio::test]
    async fn write_atomic_replaces_existing_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("about.jpg");

        write_atomic(&path, b"old").await.unwrap();
        write_atomic(&path, b"new").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"new");
        assert_eq!(list_uploads(dir.path()).await.unwrap(), vec!["about.jpg"]);
    }

    #[tokio::test]
    async fn failed_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("1.jpg");
        std::fs::create_dir(&target).unwrap();

        assert!(write_atomic(&target, b"image").await.is_err());
        assert_eq!(list_uploads(dir.path()).await.unwrap(), vec!["1.jpg"]);
    }

    #[tokio::test]
    async fn remove_if_exists_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.txt");
        assert!(!remove_if_exists(&path).await.unwrap());
        std::fs::write(&path, b"caption").unwrap();
        assert!(file_exists(&path).await.unwrap());
        assert!(remove_if_exists(&path).await.unwrap());
        assert!(!file_exists(&path).await.unwrap());
    }
}
