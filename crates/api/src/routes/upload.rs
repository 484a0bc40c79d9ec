//! Route definitions for uploads.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Routes mounted at `/upload`.
///
/// ```text
/// POST / -> upload (optional auth, multipart)
/// ```
pub fn upload_router(max_file_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", post(upload::upload))
        .layer(DefaultBodyLimit::max(
            max_file_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES),
        ))
}

/// Routes mounted at `/uploads`.
///
/// ```text
/// GET /{filename} -> serve
/// ```
pub fn files_router() -> Router<AppState> {
    Router::new().route("/{filename}", get(upload::serve))
}
