pub mod auth;
pub mod health;
pub mod order;
pub mod upload;
pub mod user;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /auth/register                  register (POST)
/// /auth/login                     login (POST)
///
/// /users/profile                  current user (GET, auth)
///
/// /orders                         list all (GET, admin), create (POST, auth)
/// /orders/my-orders               own orders (GET, auth)
/// /orders/{id}                    get (GET, owner or admin)
/// /orders/{id}/status             update status (PATCH, admin)
///
/// /upload                         upload a file (POST, multipart, optional auth)
/// /uploads/{filename}             download a stored file (GET)
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", user::router())
        .nest("/orders", order::router())
        .nest("/upload", upload::upload_router(config.upload.max_bytes))
        .nest("/uploads", upload::files_router())
}
