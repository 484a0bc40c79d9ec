//! Handlers for file uploads and retrieval.
//!
//! Uploaded files are not linked to orders server-side; the client keeps the
//! returned filename and refers to it when it needs to.

use axum::extract::multipart::MultipartError;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use orderdesk_core::error::CoreError;
use orderdesk_core::upload::UploadedFile;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Name of the multipart field carrying the file.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    pub file: UploadedFile,
}

/// POST /api/upload
///
/// Accepts a multipart form with a required `file` field. Authentication is
/// optional; when present it is only used for logging.
pub async fn upload(
    State(state): State<AppState>,
    auth: Option<AuthUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UploadResponse>> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let mut stored: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) || stored.is_some() {
            continue; // ignore unknown fields and extra files
        }

        let original_name = field.file_name().unwrap_or("").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(multipart_error)?;

        stored = Some(
            state
                .uploads
                .accept(&original_name, content_type.as_deref(), &data)
                .await?,
        );
    }

    let file = stored.ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "No file uploaded. Send it in the '{FILE_FIELD}' form field"
        )))
    })?;

    tracing::info!(
        filename = %file.filename,
        size_bytes = file.size_bytes,
        user_id = auth.as_ref().map(|a| a.user_id),
        "File uploaded"
    );

    Ok(Json(UploadResponse {
        message: "File uploaded successfully",
        file,
    }))
}

/// GET /api/uploads/{filename}
///
/// Stream a stored file back with a content type derived from its extension.
pub async fn serve(
    State(state): State<AppState>,
    filename: Result<Path<String>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(filename) = filename?;
    let stored = state.uploads.open(&filename).await?;
    Ok(([(header::CONTENT_TYPE, stored.content_type)], stored.bytes))
}

/// Map a multipart read failure; exceeding the body limit is a 413.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Core(CoreError::PayloadTooLarge(err.body_text()))
    } else {
        AppError::BadRequest(err.body_text())
    }
}
