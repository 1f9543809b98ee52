//! Request extractors

use axum::extract::FromRequest;

use crate::error::app_error::AppError;

/// JSON body extractor whose rejection is rendered as an [`AppError`]
///
/// Malformed or mistyped bodies produce `422 VALIDATION_ERROR` instead of
/// axum's plain-text rejection.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
