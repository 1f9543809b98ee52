//! Training Error Types
//!
//! This module provides training-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Training-specific result type alias
pub type TrainingResult<T> = Result<T, TrainingError>;

/// Training-specific error variants
#[derive(Debug, Error)]
pub enum TrainingError {
    /// Input failed structural or range validation
    #[error("{0}")]
    MalformedParameters(String),

    /// Session absent or owned by someone else
    #[error("Session not found")]
    NotFound,

    /// Workout absent or owned by someone else
    #[error("Workout not found")]
    WorkoutNotFound,

    /// Caller already has an active session
    #[error("An active session already exists")]
    ActiveSessionExists,

    /// Set recording on a completed or abandoned session
    #[error("Session is not active")]
    SessionNotActive,

    /// Second terminal transition
    #[error("Session is already closed")]
    SessionAlreadyClosed,

    /// Exercise not attached to the session's workout
    #[error("Exercise not found in this workout")]
    ExerciseNotFound,

    /// Same (session, exercise, set number) recorded twice
    #[error("Set already recorded")]
    SetAlreadyRecorded,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TrainingError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrainingError::MalformedParameters(_) => ErrorKind::UnprocessableEntity,
            TrainingError::NotFound
            | TrainingError::WorkoutNotFound
            | TrainingError::ExerciseNotFound => ErrorKind::NotFound,
            TrainingError::ActiveSessionExists
            | TrainingError::SessionNotActive
            | TrainingError::SessionAlreadyClosed
            | TrainingError::SetAlreadyRecorded => ErrorKind::Conflict,
            TrainingError::Database(_) | TrainingError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Stable machine-readable code for the error envelope
    pub fn code(&self) -> &'static str {
        match self {
            TrainingError::MalformedParameters(_) => "VALIDATION_ERROR",
            TrainingError::NotFound => "NOT_FOUND",
            TrainingError::WorkoutNotFound => "WORKOUT_NOT_FOUND",
            TrainingError::ActiveSessionExists => "ACTIVE_SESSION_EXISTS",
            TrainingError::SessionNotActive => "SESSION_NOT_ACTIVE",
            TrainingError::SessionAlreadyClosed => "SESSION_ALREADY_CLOSED",
            TrainingError::ExerciseNotFound => "EXERCISE_NOT_FOUND",
            TrainingError::SetAlreadyRecorded => "SET_ALREADY_RECORDED",
            TrainingError::Database(_) | TrainingError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string()).with_code(self.code())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            TrainingError::Database(e) => {
                tracing::error!(error = %e, "Training database error");
            }
            TrainingError::Internal(msg) => {
                tracing::error!(message = %msg, "Training internal error");
            }
            _ => {
                tracing::debug!(error = %self, code = self.code(), "Training error");
            }
        }
    }
}

impl IntoResponse for TrainingError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// Whether a database error is a unique-constraint violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
