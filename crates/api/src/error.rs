use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use orderdesk_core::error::{CoreError, FieldError};
use serde::Serialize;

/// Generic message sent in the body of every 500.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// The real cause of a 500, attached to the response as an extension.
///
/// The body always carries [`INTERNAL_ERROR_MESSAGE`]; the development-only
/// layer in `router.rs` swaps the detail in.
#[derive(Debug, Clone)]
pub struct InternalErrorDetail(pub String);

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `orderdesk_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The request body was not valid JSON for the endpoint.
    #[error("Invalid JSON body: {0}")]
    Json(#[from] JsonRejection),

    /// The query string could not be parsed.
    #[error("Invalid query string: {0}")]
    Query(#[from] QueryRejection),

    /// A path parameter could not be parsed.
    #[error("Invalid path parameter: {0}")]
    Path(#[from] PathRejection),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut errors = None;

        let (status, code, message) = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::ResourceNotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
                CoreError::InvalidInput(fields) => {
                    errors = Some(fields);
                    (
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        "Validation failed".to_string(),
                    )
                }
                // Duplicate registrations are documented as 400.
                CoreError::Conflict(msg) => (StatusCode::BAD_REQUEST, "CONFLICT", msg),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg),
                CoreError::PayloadTooLarge(msg) => {
                    (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg)
                }
                CoreError::UnsupportedMediaType(msg) => (
                    StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    "UNSUPPORTED_MEDIA_TYPE",
                    msg,
                ),
                CoreError::Internal(msg) => internal("Internal core error", msg),
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(&err),

            // --- Extractor rejections ---
            AppError::Json(rejection) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", rejection.body_text())
            }
            AppError::Query(rejection) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", rejection.body_text())
            }
            AppError::Path(rejection) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", rejection.body_text())
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::InternalError(msg) => internal("Internal error", msg),
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            let mut response =
                error_response(status, code, INTERNAL_ERROR_MESSAGE.to_string(), errors);
            response.extensions_mut().insert(InternalErrorDetail(message));
            return response;
        }

        error_response(status, code, message, errors)
    }
}

/// Render the standard JSON error envelope.
pub fn error_response(
    status: StatusCode,
    code: &'static str,
    message: String,
    errors: Option<Vec<FieldError>>,
) -> Response {
    (
        status,
        axum::Json(ErrorBody {
            message,
            code,
            errors,
        }),
    )
        .into_response()
}

/// Log the detail of a 500; the caller strips it from the body.
fn internal(context: &str, detail: String) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %detail, "{context}");
    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", detail)
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to
///   the conflict response.
/// - Foreign-key violations map to 400 (a referenced record no longer exists).
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            match db_err.code().as_deref() {
                // PostgreSQL unique constraint violation
                Some("23505") => {
                    let constraint = db_err.constraint().unwrap_or("unknown");
                    if constraint == "uq_users_email" {
                        return (
                            StatusCode::BAD_REQUEST,
                            "CONFLICT",
                            "Email already registered".to_string(),
                        );
                    }
                    if constraint.starts_with("uq_") {
                        return (
                            StatusCode::BAD_REQUEST,
                            "CONFLICT",
                            format!("Duplicate value violates unique constraint: {constraint}"),
                        );
                    }
                }
                // PostgreSQL foreign key violation
                Some("23503") => {
                    return (
                        StatusCode::BAD_REQUEST,
                        "BAD_REQUEST",
                        "Referenced record does not exist".to_string(),
                    );
                }
                _ => {}
            }
            internal("Database error", db_err.to_string())
        }
        other => internal("Database error", other.to_string()),
    }
}
