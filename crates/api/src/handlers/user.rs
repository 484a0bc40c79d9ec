//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::Json;
use orderdesk_core::error::CoreError;
use orderdesk_db::models::user::UserResponse;
use orderdesk_db::repositories::UserRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
}

/// GET /api/users/profile
///
/// The account behind the bearer token. 404 if it no longer exists.
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ProfileResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(ProfileResponse { user: user.into() }))
}
