//! Multipart file reading for upload endpoints

use axum::extract::Multipart;
use setlistd_core::UploadKind;
use setlistd_service::services::FileUpload;

use crate::response::ApiError;

/// Read the file in the form field for `kind`; `None` when absent.
/// Other fields are skipped.
pub async fn read_upload(
    multipart: &mut Multipart,
    kind: UploadKind,
) -> Result<Option<FileUpload>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_body(e.body_text()))?
    {
        if field.name() != Some(kind.field_name()) {
            continue;
        }

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?;

        if bytes.is_empty() {
            return Ok(None);
        }

        return Ok(Some(FileUpload {
            content_type,
            bytes: bytes.to_vec(),
        }));
    }

    Ok(None)
}
