//! Startup tasks that prepare the database for serving.

use orderdesk_core::accounts::normalize_email;
use orderdesk_core::roles::ROLE_ADMIN;
use orderdesk_db::models::user::CreateUser;
use orderdesk_db::repositories::UserRepo;
use orderdesk_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::AdminBootstrap;
use crate::error::{AppError, AppResult};

/// Create the configured admin account unless its email is already taken.
///
/// Returns `true` when a new account was created. An existing account is
/// never modified, so restarting with the same settings is harmless.
pub async fn ensure_admin(pool: &DbPool, admin: &AdminBootstrap) -> AppResult<bool> {
    let email = normalize_email(&admin.email);

    if UserRepo::find_by_email(pool, &email).await?.is_some() {
        return Ok(false);
    }

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let created = UserRepo::create_if_absent(
        pool,
        &CreateUser {
            name: admin.name.trim().to_string(),
            email,
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    if let Some(user) = &created {
        tracing::info!(user_id = user.id, "Admin account created");
    }
    Ok(created.is_some())
}
