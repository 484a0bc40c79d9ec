//! Route definitions for the `/orders` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::order;
use crate::state::AppState;

/// Routes mounted at `/orders`.
///
/// ```text
/// POST  /              -> create (requires auth)
/// GET   /              -> list_all (admin only)
/// GET   /my-orders     -> my_orders (requires auth)
/// GET   /{id}          -> get_by_id (owner or admin)
/// PATCH /{id}/status   -> update_status (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(order::list_all).post(order::create))
        .route("/my-orders", get(order::my_orders))
        .route("/{id}", get(order::get_by_id))
        .route("/{id}/status", patch(order::update_status))
}
