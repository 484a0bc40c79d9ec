//! Account registration and login input rules.

use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;

/// Fields submitted to `POST /auth/register`.
///
/// Missing fields deserialize as empty strings so they are reported as
/// field-level validation errors instead of a body rejection.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct Registration {
    #[serde(default)]
    #[validate(length(min = 2, message = "Name must be at least 2 characters long"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

impl Registration {
    /// Trim the name, normalize the email, then run the field rules.
    ///
    /// The password is left untouched.
    pub fn normalized(self) -> Result<Self, CoreError> {
        let normalized = Self {
            name: self.name.trim().to_string(),
            email: normalize_email(&self.email),
            password: self.password,
        };
        normalized.validate()?;
        Ok(normalized)
    }
}

/// Canonical form of an email address used for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
