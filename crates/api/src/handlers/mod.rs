pub mod auth;
pub mod order;
pub mod upload;
pub mod user;

use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

/// Fallback for unmatched routes, so 404s share the JSON error envelope.
pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Route not found", "code": "NOT_FOUND" })),
    )
}
