//! Upload form parsing
//!
//! Reads the `textfile` and `file` parts of an upload request, enforcing
//! the expected content type and at most one part per field.

use axum::body::Bytes;
use axum::extract::Multipart;
use log::debug;

use crate::error::UploadError;

pub const TEXT_FIELD: &str = "textfile";
pub const IMAGE_FIELD: &str = "file";

const TEXT_MIME: &str = "text/plain";
const IMAGE_MIME: &str = "image/jpeg";

/// One uploaded part
#[derive(Debug)]
pub struct UploadedFile {
    pub original_name: Option<String>,
    pub content_type: String,
    pub bytes: Bytes,
}

/// What an upload request asks for
#[derive(Debug)]
pub enum UploadKind {
    /// Caption and image, stored under the next resource number
    Resource { caption: UploadedFile, image: UploadedFile },
    /// Lone image, stored under its own (allow-listed) name
    Slot { image: UploadedFile },
}

#[derive(Debug, Default)]
pub struct UploadForm {
    pub textfile: Option<UploadedFile>,
    pub file: Option<UploadedFile>,
}

impl UploadForm {
    /// Drains the multipart stream, then validates the collected parts.
    pub async fn read(mut multipart: Multipart) -> Result<Self, UploadError> {
        let mut parts = Vec::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| UploadError::Malformed(e.to_string()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let original_name = field.file_name().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| UploadError::Malformed(e.to_string()))?;

            debug!(
                "Received part {} ({:?}, {}, {} bytes)",
                name,
                original_name,
                content_type,
                bytes.len()
            );
            parts.push((
                name,
                UploadedFile {
                    original_name,
                    content_type,
                    bytes,
                },
            ));
        }

        Self::from_parts(parts)
    }

    /// Assigns named parts to their fields, checking content types and repeats.
    pub fn from_parts(
        parts: impl IntoIterator<Item = (String, UploadedFile)>,
    ) -> Result<Self, UploadError> {
        let mut form = UploadForm::default();

        for (name, part) in parts {
            let (expected, slot) = match name.as_str() {
                TEXT_FIELD => (TEXT_MIME, &mut form.textfile),
                IMAGE_FIELD => (IMAGE_MIME, &mut form.file),
                _ => return Err(UploadError::UnexpectedField(name)),
            };

            if mime_essence(&part.content_type) != expected {
                return Err(UploadError::InvalidFileType {
                    field: name,
                    expected,
                });
            }
            if slot.is_some() {
                return Err(UploadError::DuplicateField(name));
            }
            *slot = Some(part);
        }

        Ok(form)
    }

    /// Classifies the form: both parts make a resource, a lone image a slot upload.
    pub fn into_kind(self) -> Result<UploadKind, UploadError> {
        match (self.textfile, self.file) {
            (Some(caption), Some(image)) => Ok(UploadKind::Resource { caption, image }),
            (None, Some(image)) => Ok(UploadKind::Slot { image }),
            _ => Err(UploadError::InvalidRequest),
        }
    }
}

/// `text/plain; charset=utf-8` -> `text/plain`
fn mime_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(name: &str) -> UploadedFile {
        typed(name, "")
    }

    fn typed(name: &str, content_type: &str) -> UploadedFile {
        UploadedFile {
            original_name: Some(name.to_string()),
            content_type: content_type.to_string(),
            bytes: Bytes::from_static(b"x"),
        }
    }

    #[test]
    fn parts_land_in_their_fields() {
        let form = UploadForm::from_parts([
            ("textfile".to_string(), typed("title.txt", "text/plain")),
            ("file".to_string(), typed("a.jpg", "image/jpeg")),
        ])
        .unwrap();
        assert_eq!(form.textfile.unwrap().original_name.as_deref(), Some("title.txt"));
        assert_eq!(form.file.unwrap().original_name.as_deref(), Some("a.jpg"));
    }

    #[test]
    fn content_type_must_match_the_field() {
        let err = UploadForm::from_parts([("textfile".to_string(), typed("t.txt", "image/jpeg"))])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid file type for textfile. Expected text/plain."
        );
    }

    #[test]
    fn repeated_and_unknown_fields_are_rejected() {
        let err = UploadForm::from_parts([
            ("file".to_string(), typed("a.jpg", "image/jpeg")),
            ("file".to_string(), typed("b.jpg", "image/jpeg")),
        ])
        .unwrap_err();
        assert!(matches!(err, UploadError::DuplicateField(f) if f == "file"));

        let err = UploadForm::from_parts([("avatar".to_string(), typed("a.jpg", "image/jpeg"))])
            .unwrap_err();
        assert!(matches!(err, UploadError::UnexpectedField(f) if f == "avatar"));
    }

    #[test]
    fn mime_parameters_are_ignored() {
        assert_eq!(mime_essence("text/plain; charset=UTF-8"), "text/plain");
        assert_eq!(mime_essence("IMAGE/JPEG"), "image/jpeg");
        assert_eq!(mime_essence(""), "");
    }

    #[test]
    fn both_parts_make_a_resource() {
        let form = UploadForm {
            textfile: Some(part("title.txt")),
            file: Some(part("photo.jpg")),
        };
        assert!(matches!(form.into_kind(), Ok(UploadKind::Resource { .. })));
    }

    #[test]
    fn lone_image_is_a_slot_upload() {
        let form = UploadForm {
            textfile: None,
            file: Some(part("about.jpg")),
        };
        assert!(matches!(form.into_kind(), Ok(UploadKind::Slot { .. })));
    }

    #[test]
    fn caption_without_image_is_rejected() {
        let form = UploadForm {
            textfile: Some(part("title.txt")),
            file: None,
        };
        assert!(matches!(form.into_kind(), Err(UploadError::InvalidRequest)));
        assert!(matches!(
            UploadForm::default().into_kind(),
            Err(UploadError::InvalidRequest)
        ));
    }
}
