//! Well-known role name constants.
//!
//! These must match the `ck_users_role` check constraint in the users migration.

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// All valid role values.
pub const VALID_ROLES: &[&str] = &[ROLE_USER, ROLE_ADMIN];

/// Role assigned to every self-registered account.
pub const DEFAULT_ROLE: &str = ROLE_USER;

/// Check whether `actual` satisfies a `required` role.
///
/// `admin` satisfies every requirement; any other role only satisfies itself.
pub fn role_satisfies(actual: &str, required: &str) -> bool {
    actual == ROLE_ADMIN || actual == required
}

/// Validate that a role string is one of the known roles.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        )))
    }
}
