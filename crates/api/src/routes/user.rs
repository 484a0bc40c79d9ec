//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET /profile -> profile (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/profile", get(user::profile))
}
