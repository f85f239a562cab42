use axum::extract::Multipart;
use tokio::fs;
use uuid::Uuid;

use crate::{
    dto::uploads::UploadResponse,
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    state::AppState,
};

const ALLOWED_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
];

/// Store an uploaded image under the upload directory and return the URL
/// to keep on the product record. Files are served by the static route.
pub async fn save_image(
    state: &AppState,
    mut multipart: Multipart,
) -> AppResult<ApiResponse<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .map(str::to_owned)
            .ok_or_else(|| AppError::validation("file", "missing content type"))?;
        let ext = ALLOWED_TYPES
            .iter()
            .find(|(ct, _)| *ct == content_type)
            .map(|(_, ext)| *ext)
            .ok_or_else(|| {
                AppError::validation("file", format!("unsupported image type {content_type}"))
            })?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::validation("file", format!("upload failed: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::validation("file", "empty upload"));
        }

        fs::create_dir_all(&state.config.upload_dir)
            .await
            .map_err(|e| AppError::Internal(e.into()))?;
        let filename = format!("{}.{ext}", Uuid::new_v4());
        let path = state.config.upload_dir.join(&filename);
        fs::write(&path, &bytes)
            .await
            .map_err(|e| AppError::Internal(e.into()))?;

        tracing::info!(file = %path.display(), size = bytes.len(), "image stored");
        return Ok(ApiResponse::success(
            "Uploaded",
            UploadResponse {
                url: format!("/uploads/{filename}"),
            },
            Some(Meta::empty()),
        ));
    }

    Err(AppError::validation("file", "no file field in upload"))
}
