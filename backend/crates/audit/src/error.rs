//! Audit Error Types

use thiserror::Error;

/// Audit-specific result type alias
pub type AuditResult<T> = Result<T, AuditError>;

/// Audit append failures
///
/// These never reach an HTTP response; see [`crate::append_best_effort`].
#[derive(Debug, Error)]
pub enum AuditError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Journal unavailable
    #[error("Audit journal unavailable: {0}")]
    Unavailable(String),
}
