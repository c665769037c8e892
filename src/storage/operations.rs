//! Storage operations
//!
//! Saves and deletes resource pairs and image slots in the upload directory.

use log::{debug, error, info, warn};
use std::path::Path;

use crate::error::StorageError;
use crate::storage::filesystem::{file_exists, list_uploads, remove_if_exists, write_atomic};
use crate::storage::naming::{caption_filename, image_filename, next_resource_number};
use crate::storage::results::{ResourceDeletion, ResourceUpload, SlotUpload};
use crate::storage::validation::{validate_resource_number, validate_slot_name};

/// Saves a caption/image pair under the next sequential number.
///
/// Callers must serialise calls for the same directory; the number is picked
/// from the listing taken at the start of the call.
pub async fn save_resource(
    upload_dir: &Path,
    caption: &[u8],
    image: &[u8],
) -> Result<ResourceUpload, StorageError> {
    let existing = match list_uploads(upload_dir).await {
        Ok(names) => names,
        Err(e) => {
            warn!("Failed to read upload directory {}: {}", upload_dir.display(), e);
            Vec::new()
        }
    };

    let number = next_resource_number(&existing);
    let stem = number.to_string();
    let text_filename = caption_filename(&stem);
    let image_filename = image_filename(&stem);
    let text_path = upload_dir.join(&text_filename);
    let image_path = upload_dir.join(&image_filename);

    info!(
        "Assigned resource number {} ({}, {})",
        number, text_filename, image_filename
    );

    if file_exists(&text_path).await? {
        return Err(StorageError::FileAlreadyExists(text_filename));
    }
    if file_exists(&image_path).await? {
        return Err(StorageError::FileAlreadyExists(image_filename));
    }

    write_pair(&text_path, caption, &image_path, image).await?;

    info!(
        "Saved files: {} ({} bytes), {} ({} bytes)",
        text_filename,
        caption.len(),
        image_filename,
        image.len()
    );
    log_listing(upload_dir).await;

    Ok(ResourceUpload {
        number,
        text_filename,
        image_filename,
    })
}

/// Writes the caption, then the image; removes the caption if the image write fails.
pub(crate) async fn write_pair(
    text_path: &Path,
    caption: &[u8],
    image_path: &Path,
    image: &[u8],
) -> Result<(), StorageError> {
    if let Err(e) = write_atomic(text_path, caption).await {
        error!("Failed to write {}: {}", text_path.display(), e);
        return Err(StorageError::from(e));
    }
    if let Err(e) = write_atomic(image_path, image).await {
        error!("Failed to write {}: {}", image_path.display(), e);
        match remove_if_exists(text_path).await {
            Ok(_) => info!("Removed orphan caption {}", text_path.display()),
            Err(cleanup) => error!(
                "Failed to remove orphan caption {}: {}",
                text_path.display(),
                cleanup
            ),
        }
        return Err(StorageError::from(e));
    }
    Ok(())
}

/// Overwrites one of the fixed image slots.
pub async fn save_slot_image(
    upload_dir: &Path,
    allowed: &[String],
    original_name: &str,
    image: &[u8],
) -> Result<SlotUpload, StorageError> {
    let filename = validate_slot_name(original_name, allowed)?;
    let file_path = upload_dir.join(&filename);

    if let Err(e) = write_atomic(&file_path, image).await {
        error!("Failed to write {}: {}", file_path.display(), e);
        return Err(StorageError::from(e));
    }

    info!("Saved file: {} ({} bytes)", filename, image.len());
    log_listing(upload_dir).await;

    Ok(SlotUpload {
        filename,
        file_path,
    })
}

/// Removes one of the fixed image slots. Returns the normalised name.
pub async fn delete_slot_image(
    upload_dir: &Path,
    allowed: &[String],
    name: &str,
) -> Result<String, StorageError> {
    let filename = validate_slot_name(name, allowed)?;
    let file_path = upload_dir.join(&filename);

    match remove_if_exists(&file_path).await {
        Ok(true) => {
            info!("Deleted file: {}", filename);
            Ok(filename)
        }
        Ok(false) => Err(StorageError::FileNotFound(filename)),
        Err(e) => {
            error!("Failed to delete {}: {}", file_path.display(), e);
            Err(StorageError::from(e))
        }
    }
}

/// Removes both halves of a resource pair, whichever exist.
pub async fn delete_resource(
    upload_dir: &Path,
    number: &str,
) -> Result<ResourceDeletion, StorageError> {
    let number = validate_resource_number(number)?;
    let text_filename = caption_filename(number);
    let image_filename = image_filename(number);

    let deleted_text = remove_if_exists(&upload_dir.join(&text_filename)).await?;
    if deleted_text {
        info!("Deleted file: {}", text_filename);
    }
    let deleted_image = remove_if_exists(&upload_dir.join(&image_filename)).await?;
    if deleted_image {
        info!("Deleted file: {}", image_filename);
    }

    if !deleted_text && !deleted_image {
        return Err(StorageError::ResourceNotFound(number.to_string()));
    }

    Ok(ResourceDeletion {
        number: number.to_string(),
        deleted_text,
        deleted_image,
    })
}

async fn log_listing(upload_dir: &Path) {
    match list_uploads(upload_dir).await {
        Ok(names) => debug!("Files in upload directory after save: {:?}", names),
        Err(e) => warn!("Error listing upload directory: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ALLOWED_IMAGES;
    use std::collections::HashSet;
    use std::fs;
    use std::sync::Arc;

    fn allowed() -> Vec<String> {
        DEFAULT_ALLOWED_IMAGES.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn resources_are_numbered_sequentially() {
        let dir = tempfile::tempdir().unwrap();

        let first = save_resource(dir.path(), b"Title\nhttps://example.org", b"jpeg-1")
            .await
            .unwrap();
        let second = save_resource(dir.path(), b"Other", b"jpeg-2").await.unwrap();

        assert_eq!(first.number, 1);
        assert_eq!(first.text_filename, "1.txt");
        assert_eq!(second.number, 2);
        assert_eq!(second.image_filename, "2.jpg");
        assert_eq!(
            fs::read_to_string(dir.path().join("1.txt")).unwrap(),
            "Title\nhttps://example.org"
        );
        assert_eq!(fs::read(dir.path().join("2.jpg")).unwrap(), b"jpeg-2");
    }

    #[tokio::test]
    async fn numbering_follows_the_highest_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("4.jpg"), b"orphan").unwrap();
        fs::write(dir.path().join("banner1.jpg"), b"slot").unwrap();

        let upload = save_resource(dir.path(), b"caption", b"image").await.unwrap();
        assert_eq!(upload.number, 5);
        assert_eq!(fs::read(dir.path().join("4.jpg")).unwrap(), b"orphan");
    }

    #[tokio::test]
    async fn caption_is_removed_when_image_write_fails() {
        let dir = tempfile::tempdir().unwrap();
        let text_path = dir.path().join("1.txt");
        let image_path = dir.path().join("1.jpg");
        fs::create_dir(&image_path).unwrap();

        let err = write_pair(&text_path, b"caption", &image_path, b"image")
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::IoError(_)));
        assert!(!text_path.exists());
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["1.jpg"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_slot_uploads_keep_one_whole_body() {
        let dir = Arc::new(tempfile::tempdir().unwrap());
        let allowed = Arc::new(allowed());
        let bodies: Vec<Vec<u8>> = (1..=8).map(|i| vec![b'a' + i as u8; i * 4096]).collect();

        for _round in 0..10 {
            let mut handles = Vec::new();
            for body in bodies.clone() {
                let dir = Arc::clone(&dir);
                let allowed = Arc::clone(&allowed);
                handles.push(tokio::spawn(async move {
                    save_slot_image(dir.path(), &allowed, "nia.jpg", &body).await
                }));
            }
            for handle in handles {
                handle.await.unwrap().unwrap();
            }

            let stored = fs::read(dir.path().join("nia.jpg")).unwrap();
            assert!(bodies.contains(&stored));
            let entries: HashSet<_> = fs::read_dir(dir.path())
                .unwrap()
                .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
                .collect();
            assert_eq!(entries, HashSet::from(["nia.jpg".to_string()]));
        }
    }

    #[tokio::test]
    async fn slot_upload_overwrites_and_normalises_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("nia.jpg"), b"old").unwrap();

        let upload = save_slot_image(dir.path(), &allowed(), "NIA.jpg", b"new")
            .await
            .unwrap();

        assert_eq!(upload.filename, "nia.jpg");
        assert_eq!(fs::read(&upload.file_path).unwrap(), b"new");
    }

    #[tokio::test]
    async fn slot_upload_rejects_names_outside_allow_list() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_slot_image(dir.path(), &allowed(), "holiday.jpg", b"x")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidFilename { .. }));
        assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn deleting_a_missing_slot_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = delete_slot_image(dir.path(), &allowed(), "mara.jpg")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::FileNotFound(name) if name == "mara.jpg"));
    }

    #[tokio::test]
    async fn delete_resource_removes_whichever_half_exists() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("3.txt"), b"caption only").unwrap();

        let deletion = delete_resource(dir.path(), "3").await.unwrap();
        assert!(deletion.deleted_text);
        assert!(!deletion.deleted_image);
        assert!(!dir.path().join("3.txt").exists());

        let err = delete_resource(dir.path(), "3").await.unwrap_err();
        assert!(matches!(err, StorageError::ResourceNotFound(n) if n == "3"));
    }

    #[tokio::test]
    async fn delete_resource_rejects_non_numeric_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = delete_resource(dir.path(), "../3").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidNumber(_)));
    }
}
