//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Input failed structural or range validation
    #[error("{0}")]
    MalformedParameters(String),

    /// E-mail already registered
    #[error("Email already registered")]
    EmailAlreadyExists,

    /// Unknown e-mail or wrong password (deliberately indistinguishable)
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// No refresh token with this fingerprint
    #[error("Invalid refresh token")]
    TokenInvalid,

    /// Refresh token past its expiry
    #[error("Refresh token expired")]
    TokenExpired,

    /// Refresh token already consumed or logged out
    #[error("Refresh token revoked")]
    TokenRevoked,

    /// Missing or invalid access token
    #[error("Authentication required")]
    Unauthorized,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MalformedParameters(_) => ErrorKind::UnprocessableEntity,
            AuthError::EmailAlreadyExists => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::TokenInvalid
            | AuthError::TokenExpired
            | AuthError::TokenRevoked
            | AuthError::Unauthorized => ErrorKind::Unauthorized,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Stable machine-readable code for the error envelope
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MalformedParameters(_) => "VALIDATION_ERROR",
            AuthError::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::TokenInvalid
            | AuthError::TokenExpired
            | AuthError::TokenRevoked
            | AuthError::Unauthorized => "UNAUTHORIZED",
            AuthError::Database(_) | AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string()).with_code(self.code())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest | ErrorKind::UnprocessableEntity => {
                AuthError::MalformedParameters(err.message().to_string())
            }
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

/// Whether a database error is a unique-constraint violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_errors_collapse_to_unauthorized() {
        for err in [
            AuthError::TokenInvalid,
            AuthError::TokenExpired,
            AuthError::TokenRevoked,
            AuthError::Unauthorized,
        ] {
            let app = err.to_app_error();
            assert_eq!(app.status_code(), 401);
            assert_eq!(app.code(), "UNAUTHORIZED");
        }
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::EmailAlreadyExists.to_app_error().status_code(), 409);
        assert_eq!(AuthError::InvalidCredentials.to_app_error().status_code(), 401);
        assert_eq!(
            AuthError::MalformedParameters("bad".into())
                .to_app_error()
                .status_code(),
            422
        );
        assert_eq!(AuthError::Internal("x".into()).to_app_error().status_code(), 500);
    }

    #[test]
    fn test_from_validation_app_error() {
        let err: AuthError = AppError::unprocessable("Email cannot be empty").into();
        assert!(matches!(err, AuthError::MalformedParameters(msg) if msg == "Email cannot be empty"));
    }
}
