//! Display Name Value Object

use kernel::error::app_error::{AppError, AppResult};

/// Maximum display name length in characters
const DISPLAY_NAME_MAX_LENGTH: usize = 100;

/// Human-facing name shown in the app; not unique
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        let name = name.into().trim().to_string();

        if name.is_empty() {
            return Err(AppError::unprocessable("Name cannot be empty").with_code("VALIDATION_ERROR"));
        }

        let char_count = name.chars().count();
        if char_count > DISPLAY_NAME_MAX_LENGTH {
            return Err(AppError::unprocessable(format!(
                "Name must be at most {} characters",
                DISPLAY_NAME_MAX_LENGTH
            ))
            .with_code("VALIDATION_ERROR"));
        }

        if name.chars().any(char::is_control) {
            return Err(AppError::unprocessable("Name contains invalid characters")
                .with_code("VALIDATION_ERROR"));
        }

        Ok(Self(name))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DisplayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
