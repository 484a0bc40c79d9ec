//! The capability gate: every role check in the API goes through [`authorize`].

use orderdesk_core::error::CoreError;
use orderdesk_core::roles::{role_satisfies, validate_role};

use super::jwt::{validate_token, Claims, JwtConfig};

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, CoreError> {
    let header =
        header.ok_or_else(|| CoreError::Unauthorized("Missing Authorization header".into()))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            )
        })
}

/// Verify `token` and check that its role satisfies `required_role`.
///
/// `None` admits any authenticated user. An invalid, expired, or forged token,
/// or one carrying an unknown role, is `Unauthorized`; a valid token with an
/// insufficient role is `Forbidden`.
pub fn authorize(
    token: &str,
    required_role: Option<&str>,
    config: &JwtConfig,
) -> Result<Claims, CoreError> {
    let claims = validate_token(token, config)
        .map_err(|_| CoreError::Unauthorized("Invalid or expired token".into()))?;
    validate_role(&claims.role)
        .map_err(|_| CoreError::Unauthorized("Invalid or expired token".into()))?;

    if let Some(required) = required_role {
        if !role_satisfies(&claims.role, required) {
            return Err(CoreError::Forbidden(format!("{required} role required")));
        }
    }

    Ok(claims)
}
