//! Multipart extraction for the upload form

use axum::extract::Multipart;
use imgvoice_core::{AppError, UploadRequest};

/// Form field carrying the image.
pub const UPLOAD_FIELD: &str = "image_file";

/// Pull the first file part named `field` out of the form.
///
/// Parts without a filename are plain form values and are skipped. `Ok(None)` means
/// the form had no such file part.
pub async fn extract_upload_field(
    mut multipart: Multipart,
    field: &str,
) -> Result<Option<UploadRequest>, AppError> {
    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        if part.name() != Some(field) {
            continue;
        }
        let Some(filename) = part.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = part.content_type().map(str::to_string);

        let data = part
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

        return Ok(Some(UploadRequest::new(filename, content_type, data)));
    }

    Ok(None)
}
