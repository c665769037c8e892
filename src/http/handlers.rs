//! Request handlers for the upload, delete, and health endpoints.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::response::{IntoResponse, Response};
use log::info;

use crate::error::{AppError, UploadError};
use crate::http::multipart::{UploadForm, UploadKind, UploadedFile};
use crate::http::responses::{
    MessageResponse, ResourceUploadResponse, ResourceUrls, SERVER_RUNNING, SlotUploadResponse,
    UPLOAD_SUCCESSFUL,
};
use crate::http::state::AppState;
use crate::storage;

/// `GET /`
pub async fn health() -> &'static str {
    SERVER_RUNNING
}

/// `POST /upload`
///
/// A `textfile` + `file` pair is stored as the next numbered resource;
/// a lone `file` replaces the image slot named by its file name.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    let multipart = multipart.map_err(|e| UploadError::Malformed(e.body_text()))?;
    let form = UploadForm::read(multipart).await?;

    let kind = match form.into_kind() {
        Ok(kind) => kind,
        Err(e) => {
            info!("Invalid upload request: {}", e);
            return Err(e.into());
        }
    };

    match kind {
        UploadKind::Resource { caption, image } => upload_resource(&state, caption, image).await,
        UploadKind::Slot { image } => upload_slot_image(&state, image).await,
    }
}

async fn upload_resource(
    state: &AppState,
    caption: UploadedFile,
    image: UploadedFile,
) -> Result<Response, AppError> {
    info!(
        "Processing resource upload: caption {:?} ({} bytes), image {:?} ({} bytes)",
        caption.original_name,
        caption.bytes.len(),
        image.original_name,
        image.bytes.len()
    );

    let saved = {
        let _guard = state.resource_lock.lock().await;
        storage::save_resource(&state.upload_dir, &caption.bytes, &image.bytes)
            .await
            .map_err(|e| AppError::storage("Failed to save files", e))?
    };

    let body = ResourceUploadResponse {
        message: UPLOAD_SUCCESSFUL.to_string(),
        urls: ResourceUrls {
            text: state.config.public_url(&saved.text_filename),
            image: state.config.public_url(&saved.image_filename),
        },
        textfile: saved.text_filename,
        image: saved.image_filename,
    };
    Ok(Json(body).into_response())
}

async fn upload_slot_image(state: &AppState, image: UploadedFile) -> Result<Response, AppError> {
    let original_name = image.original_name.ok_or(UploadError::MissingFilename)?;
    info!(
        "Processing image slot upload: {} ({} bytes)",
        original_name,
        image.bytes.len()
    );

    let saved = storage::save_slot_image(
        &state.upload_dir,
        &state.config.allowed_images,
        &original_name,
        &image.bytes,
    )
    .await
    .map_err(|e| AppError::storage("Failed to save file", e))?;
    info!("Stored image slot at {}", saved.file_path.display());

    let body = SlotUploadResponse {
        message: UPLOAD_SUCCESSFUL.to_string(),
        url: state.config.public_url(&saved.filename),
        filename: saved.filename,
    };
    Ok(Json(body).into_response())
}

/// `DELETE /delete/:filename`
pub async fn delete_image(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    info!("Delete request for: {}", filename);

    let deleted =
        storage::delete_slot_image(&state.upload_dir, &state.config.allowed_images, &filename)
            .await
            .map_err(|e| AppError::storage("Failed to delete file", e))?;

    Ok(Json(MessageResponse::new(format!(
        "File {} deleted successfully",
        deleted
    ))))
}

/// `DELETE /delete-resource/:number`
pub async fn delete_resource(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    info!("Delete request for resource number: {}", number);

    let deletion = storage::delete_resource(&state.upload_dir, &number)
        .await
        .map_err(|e| AppError::storage("Failed to delete files", e))?;

    info!(
        "Deleted resource {} (caption: {}, image: {})",
        deletion.number, deletion.deleted_text, deletion.deleted_image
    );
    Ok(Json(MessageResponse::new("Delete successful.")))
}
